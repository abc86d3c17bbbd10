//! The [`Target`] trait: how `semihost` talks to a halted core.
//!
//! `semihost` doesn't implement any debug transport of its own. Instead, the
//! debugger (or emulator) provides a `Target` implementation which reads and
//! writes the core's registers and memory, tracks the core's cached execution
//! state, and resumes the core once a request has been serviced.
//!
//! Every method may fail with a target-specific [`Target::Error`]. Such errors
//! are always treated as **fatal** to the request being serviced: the request
//! is abandoned, the core is left halted, and the error is returned from
//! [`Semihosting::handle_trap`](crate::Semihosting::handle_trap) wrapped in a
//! [`SemihostingError`](crate::SemihostingError).
//!
//! ### A note on register caches
//!
//! Most debug transports cache a halted core's register file, and only flush
//! modified ("dirty") registers back to the core when it's resumed. `semihost`
//! is written with this model in mind: [`Target::write_register`] must mark
//! the register as modified, and [`Target::resume`] is expected to write back
//! any modified registers before letting the core run.

use crate::arch::arm::reg::ArmCoreRegId;
use crate::arch::arm::CoreState;
use crate::common::Endianness;

/// Width of the individual accesses used to transfer a block of memory.
///
/// Some buses (and peripherals) care about the width of each access. Bulk
/// transfers of target-provided buffers use [`AccessSize::Byte`], whereas
/// parameter blocks and instructions are accessed with their natural width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessSize {
    /// 8-bit accesses.
    Byte,
    /// 16-bit accesses.
    HalfWord,
    /// 32-bit accesses.
    Word,
}

impl AccessSize {
    /// Size of a single access, in bytes.
    pub fn bytes(self) -> usize {
        match self {
            AccessSize::Byte => 1,
            AccessSize::HalfWord => 2,
            AccessSize::Word => 4,
        }
    }
}

/// Events broadcast to the target's listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TargetEvent {
    /// The core has halted, and will remain halted until explicitly resumed.
    Halted,
}

/// A halted ARM core which can service semihosting requests.
pub trait Target {
    /// A target-specific **fatal** error, raised when the transport loses
    /// contact with the core.
    type Error;

    /// Read a core register.
    ///
    /// Banked registers (e.g: [`ArmCoreRegId::LrBanked`]) must be read from
    /// the requested mode's bank, regardless of the core's current mode.
    fn read_register(&mut self, reg: ArmCoreRegId) -> Result<u32, Self::Error>;

    /// Write a core register, marking it as modified.
    fn write_register(&mut self, reg: ArmCoreRegId, val: u32) -> Result<(), Self::Error>;

    /// Read `data.len()` bytes of memory starting at `start_addr`, using
    /// accesses of the specified `size`.
    ///
    /// `data.len()` is always a multiple of `size.bytes()`.
    fn read_memory(
        &mut self,
        start_addr: u32,
        size: AccessSize,
        data: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Write `data` to memory starting at `start_addr`, using accesses of the
    /// specified `size`.
    ///
    /// `data.len()` is always a multiple of `size.bytes()`.
    fn write_memory(&mut self, start_addr: u32, size: AccessSize, data: &[u8])
        -> Result<(), Self::Error>;

    /// The core's cached execution state.
    fn core_state(&self) -> CoreState;

    /// Update the core's cached execution state.
    ///
    /// Called after the `cpsr` has been rewritten, prior to resuming.
    fn set_core_state(&mut self, state: CoreState);

    /// Resume execution at the current `pc`.
    fn resume(&mut self) -> Result<(), Self::Error>;

    /// Broadcast an event to any listeners (e.g: a GDB connection).
    fn notify(&mut self, event: TargetEvent) -> Result<(), Self::Error>;

    /// The byte order of the target's memory. Defaults to little endian.
    #[inline(always)]
    fn endianness(&self) -> Endianness {
        Endianness::Little
    }
}
