//! Host resources which semihosting requests are serviced against.
//!
//! The [`HostIo`] trait abstracts over the host's filesystem, console, and
//! clock. Most users will want to use [`StdHost`] (requires the `std`
//! feature), though custom implementations can be used to sandbox the target,
//! redirect its console, or to fake out the host in tests.
//!
//! Fallible operations return [`HostIoResult`]. On `Ok`, the session's error
//! slot is cleared to [`Errno::NONE`]. On `Err`, the returned [`Errno`] is
//! stored in the error slot (where target code can retrieve it via
//! `SYS_ERRNO`), and the request reports failure to the target.

use bitflags::bitflags;

use crate::common::Errno;

#[cfg(feature = "std")]
mod std_host;

#[cfg(feature = "std")]
pub use std_host::StdHost;

bitflags! {
    /// Host flags for opening files.
    ///
    /// Uses the same layout as the GDB File-I/O
    /// [Open Flags](https://sourceware.org/gdb/current/onlinedocs/gdb/Open-Flags.html#Open-Flags).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HostIoOpenFlags: u32 {
        /// A read-only file.
        const O_RDONLY = 0x0;
        /// A write-only file.
        const O_WRONLY = 0x1;
        /// A read-write file.
        const O_RDWR = 0x2;
        /// Append to an existing file.
        const O_APPEND = 0x8;
        /// Create a non-existent file.
        const O_CREAT = 0x200;
        /// Truncate an existing file.
        const O_TRUNC = 0x400;
    }
}

impl HostIoOpenFlags {
    /// Mask of the access mode bits.
    pub const O_ACCMODE: u32 = 0x3;

    /// Check if the access mode is read-only.
    ///
    /// Note that `O_RDONLY` is zero, so `contains(O_RDONLY)` is always true.
    pub fn is_read_only(self) -> bool {
        self.bits() & Self::O_ACCMODE == 0
    }
}

/// An opaque, host-assigned file handle.
///
/// Handles are handed to target code verbatim, so they must be non-negative.
pub type HostHandle = i32;

/// The console streams which the special `:tt` filename maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    /// The host's standard input.
    Stdin,
    /// The host's standard output.
    Stdout,
}

/// Seek origin and offset, mirroring `std::io::SeekFrom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSeek {
    /// Seek to an absolute position.
    Start(u64),
    /// Seek relative to the end of the file.
    End(i64),
    /// Seek relative to the current position.
    Current(i64),
}

/// A specialized `Result` type for host I/O operations.
pub type HostIoResult<T> = Result<T, Errno>;

/// Host resources available to semihosting requests.
///
/// No attempt is made to validate or sandbox the filenames and handles
/// provided by the target. Implementations which care about that should do so
/// themselves.
pub trait HostIo {
    /// Open the file at `filename`, returning a new handle.
    ///
    /// The filename is passed through as raw bytes, without a trailing NUL.
    fn open(&mut self, filename: &[u8], flags: HostIoOpenFlags) -> HostIoResult<HostHandle>;

    /// Return a new handle which duplicates one of the host's console streams.
    fn dup_console(&mut self, stream: ConsoleStream) -> HostIoResult<HostHandle>;

    /// Close a handle.
    fn close(&mut self, fd: HostHandle) -> HostIoResult<()>;

    /// Write `data` to a handle, returning the number of bytes written (which
    /// may be less than `data.len()`).
    fn write(&mut self, fd: HostHandle, data: &[u8]) -> HostIoResult<usize>;

    /// Read up to `buf.len()` bytes from a handle, returning the number of
    /// bytes read. Returns 0 at end-of-file.
    fn read(&mut self, fd: HostHandle, buf: &mut [u8]) -> HostIoResult<usize>;

    /// Reposition a handle, returning the resulting absolute position.
    fn seek(&mut self, fd: HostHandle, pos: HostSeek) -> HostIoResult<u64>;

    /// Check if a handle refers to an interactive terminal. Invalid handles are
    /// not terminals.
    fn is_tty(&mut self, fd: HostHandle) -> bool;

    /// Delete the file at `filename`.
    fn remove(&mut self, filename: &[u8]) -> HostIoResult<()>;

    /// Rename the file at `from` to `to`.
    fn rename(&mut self, from: &[u8], to: &[u8]) -> HostIoResult<()>;

    /// Seconds since the Unix epoch.
    fn time(&mut self) -> u64;

    /// Write raw bytes to the host console.
    ///
    /// Console output is best-effort: errors are silently dropped.
    fn console_write(&mut self, data: &[u8]);

    /// Read a single byte from the host console, returning `None` at
    /// end-of-file (or on error).
    fn console_read(&mut self) -> Option<u8>;
}
