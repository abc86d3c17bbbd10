use core::convert::TryFrom;
use std::fs::{File, OpenOptions};
use std::io::{IsTerminal, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use alloc::vec::Vec;

use super::{ConsoleStream, HostHandle, HostIo, HostIoOpenFlags, HostIoResult, HostSeek};
use crate::common::Errno;

/// The first handle handed out by [`StdHost`]. Lower values are left alone,
/// so they can't be confused with the conventional stdio descriptors.
const FIRST_HANDLE: HostHandle = 3;

enum HostFile {
    File(File),
    Stdin,
    Stdout,
}

/// A [`HostIo`] implementation backed by the host's real filesystem and
/// console (via `std::fs` and `std::io`).
///
/// Handles index into a per-instance table, so separate `StdHost` instances
/// (e.g: one per core) don't share open files.
#[derive(Default)]
pub struct StdHost {
    files: Vec<Option<HostFile>>,
}

impl StdHost {
    /// Create a new `StdHost` with no open files.
    pub fn new() -> StdHost {
        StdHost::default()
    }

    fn insert(&mut self, file: HostFile) -> HostIoResult<HostHandle> {
        let idx = match self.files.iter().position(|f| f.is_none()) {
            Some(idx) => {
                self.files[idx] = Some(file);
                idx
            }
            None => {
                self.files.push(Some(file));
                self.files.len() - 1
            }
        };

        HostHandle::try_from(idx)
            .ok()
            .and_then(|idx| idx.checked_add(FIRST_HANDLE))
            .ok_or(Errno::EMFILE)
    }

    fn get(&mut self, fd: HostHandle) -> HostIoResult<&mut HostFile> {
        let idx = fd.checked_sub(FIRST_HANDLE).ok_or(Errno::EBADF)?;
        let idx = usize::try_from(idx).map_err(|_| Errno::EBADF)?;
        self.files
            .get_mut(idx)
            .and_then(|f| f.as_mut())
            .ok_or(Errno::EBADF)
    }
}

fn to_path(filename: &[u8]) -> HostIoResult<PathBuf> {
    cfg_if::cfg_if! {
        if #[cfg(unix)] {
            use std::os::unix::ffi::OsStrExt;
            Ok(std::ffi::OsStr::from_bytes(filename).into())
        } else {
            match core::str::from_utf8(filename) {
                Ok(path) => Ok(path.into()),
                Err(_) => Err(Errno::ENOENT),
            }
        }
    }
}

impl HostIo for StdHost {
    fn open(&mut self, filename: &[u8], flags: HostIoOpenFlags) -> HostIoResult<HostHandle> {
        let path = to_path(filename)?;
        let accmode = flags.bits() & HostIoOpenFlags::O_ACCMODE;

        let file = OpenOptions::new()
            .read(accmode != HostIoOpenFlags::O_WRONLY.bits())
            .write(accmode != HostIoOpenFlags::O_RDONLY.bits())
            .append(flags.contains(HostIoOpenFlags::O_APPEND))
            .create(flags.contains(HostIoOpenFlags::O_CREAT))
            .truncate(flags.contains(HostIoOpenFlags::O_TRUNC))
            .open(path)?;

        self.insert(HostFile::File(file))
    }

    fn dup_console(&mut self, stream: ConsoleStream) -> HostIoResult<HostHandle> {
        match stream {
            ConsoleStream::Stdin => self.insert(HostFile::Stdin),
            ConsoleStream::Stdout => self.insert(HostFile::Stdout),
        }
    }

    fn close(&mut self, fd: HostHandle) -> HostIoResult<()> {
        self.get(fd)?;
        let idx = (fd - FIRST_HANDLE) as usize;
        // dropping the `File` closes it
        self.files[idx] = None;
        Ok(())
    }

    fn write(&mut self, fd: HostHandle, data: &[u8]) -> HostIoResult<usize> {
        match self.get(fd)? {
            HostFile::File(file) => Ok(file.write(data)?),
            HostFile::Stdout => {
                let mut stdout = std::io::stdout();
                let n = stdout.write(data)?;
                stdout.flush()?;
                Ok(n)
            }
            HostFile::Stdin => Err(Errno::EBADF),
        }
    }

    fn read(&mut self, fd: HostHandle, buf: &mut [u8]) -> HostIoResult<usize> {
        match self.get(fd)? {
            HostFile::File(file) => Ok(file.read(buf)?),
            HostFile::Stdin => Ok(std::io::stdin().read(buf)?),
            HostFile::Stdout => Err(Errno::EBADF),
        }
    }

    fn seek(&mut self, fd: HostHandle, pos: HostSeek) -> HostIoResult<u64> {
        let pos = match pos {
            HostSeek::Start(n) => SeekFrom::Start(n),
            HostSeek::End(n) => SeekFrom::End(n),
            HostSeek::Current(n) => SeekFrom::Current(n),
        };

        match self.get(fd)? {
            HostFile::File(file) => Ok(file.seek(pos)?),
            HostFile::Stdin | HostFile::Stdout => Err(Errno::ESPIPE),
        }
    }

    fn is_tty(&mut self, fd: HostHandle) -> bool {
        match self.get(fd) {
            Ok(HostFile::File(file)) => file.is_terminal(),
            Ok(HostFile::Stdin) => std::io::stdin().is_terminal(),
            Ok(HostFile::Stdout) => std::io::stdout().is_terminal(),
            Err(_) => false,
        }
    }

    fn remove(&mut self, filename: &[u8]) -> HostIoResult<()> {
        Ok(std::fs::remove_file(to_path(filename)?)?)
    }

    fn rename(&mut self, from: &[u8], to: &[u8]) -> HostIoResult<()> {
        Ok(std::fs::rename(to_path(from)?, to_path(to)?)?)
    }

    fn time(&mut self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn console_write(&mut self, data: &[u8]) {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(data);
        let _ = stdout.flush();
    }

    fn console_read(&mut self) -> Option<u8> {
        let mut c = [0];
        match std::io::stdin().read(&mut c) {
            Ok(1) => Some(c[0]),
            _ => None,
        }
    }
}
