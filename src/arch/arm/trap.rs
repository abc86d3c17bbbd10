use crate::common::Endianness;

use super::Psr;

/// The instruction set the core was executing when it trapped.
///
/// Each instruction set raises semihosting requests with its own `SVC`
/// encoding, and the trapping instruction sits at a different offset behind
/// the saved return address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrSet {
    /// The 32-bit ARM instruction set. Traps with `SVC 0x123456`.
    Arm,
    /// The 16-bit Thumb instruction set. Traps with `SVC 0xAB`.
    Thumb,
}

impl InstrSet {
    /// Determine the instruction set from a PSR's `T` bit.
    pub fn from_psr(psr: Psr) -> InstrSet {
        if psr.contains(Psr::T) {
            InstrSet::Thumb
        } else {
            InstrSet::Arm
        }
    }

    /// Width of a single instruction, in bytes.
    pub fn insn_len(self) -> usize {
        match self {
            InstrSet::Arm => 4,
            InstrSet::Thumb => 2,
        }
    }

    /// The semihosting trap instruction.
    pub fn trap_insn(self) -> u32 {
        match self {
            InstrSet::Arm => 0xEF12_3456,
            InstrSet::Thumb => 0xDFAB,
        }
    }

    /// Address of the instruction which raised the exception, given the
    /// return address saved in `lr_svc`.
    pub fn trap_addr(self, return_addr: u32) -> u32 {
        return_addr.wrapping_sub(self.insn_len() as u32)
    }

    /// Decode an instruction read from target memory.
    ///
    /// `bytes` must be exactly [`insn_len`](Self::insn_len) bytes long.
    pub fn decode_insn(self, bytes: &[u8], endianness: Endianness) -> Option<u32> {
        match self {
            InstrSet::Arm => endianness.read_u32(bytes),
            InstrSet::Thumb => endianness.read_u16(bytes).map(u32::from),
        }
    }

    /// Check if the bytes read from behind the return address hold the
    /// semihosting trap.
    pub fn is_trap(self, bytes: &[u8], endianness: Endianness) -> bool {
        self.decode_insn(bytes, endianness) == Some(self.trap_insn())
    }
}
