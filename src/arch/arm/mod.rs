//! Definitions for 32-bit ARM cores.

mod psr;
mod trap;

pub mod reg;

pub use psr::Psr;
pub use trap::InstrSet;

/// ARM processor modes, as encoded in the `M[4:0]` field of the PSR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ProcessorMode {
    /// User mode.
    User = 0x10,
    /// Fast interrupt mode.
    Fiq = 0x11,
    /// Interrupt mode.
    Irq = 0x12,
    /// Supervisor mode. Entered by the `SVC` (nee `SWI`) instruction.
    Supervisor = 0x13,
    /// Abort mode.
    Abort = 0x17,
    /// Undefined instruction mode.
    Undefined = 0x1b,
    /// System mode.
    System = 0x1f,
}

impl ProcessorMode {
    /// Decode a raw `M[4:0]` field, returning `None` for reserved encodings.
    pub fn from_bits(bits: u8) -> Option<ProcessorMode> {
        use self::ProcessorMode::*;
        let mode = match bits {
            0x10 => User,
            0x11 => Fiq,
            0x12 => Irq,
            0x13 => Supervisor,
            0x17 => Abort,
            0x1b => Undefined,
            0x1f => System,
            _ => return None,
        };
        Some(mode)
    }
}

/// The execution state of a core which semihosting needs to track: which
/// processor mode it's in, and which instruction set it's executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreState {
    /// The current processor mode.
    pub mode: ProcessorMode,
    /// The current instruction set.
    pub instr_set: InstrSet,
}

impl CoreState {
    /// Derive the execution state described by a program status register.
    ///
    /// Returns `None` if the PSR's mode field doesn't hold a valid mode.
    pub fn from_psr(psr: Psr) -> Option<CoreState> {
        Some(CoreState {
            mode: ProcessorMode::from_bits(psr.mode_bits())?,
            instr_set: InstrSet::from_psr(psr),
        })
    }
}
