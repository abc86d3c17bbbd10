//! Deciding whether a halt was caused by the semihosting trap.

use alloc::vec;

use log::*;

use super::target_ext::TargetExt;
use super::SemihostingError;
use crate::arch::arm::reg::ArmCoreRegId;
use crate::arch::arm::{InstrSet, ProcessorMode, Psr};
use crate::target::{AccessSize, Target};

/// The Supervisor Call exception vector.
pub(super) const SVC_VECTOR: u32 = 0x0000_0008;
/// The Supervisor Call exception vector, when high vectors are enabled.
pub(super) const SVC_VECTOR_HIGH: u32 = 0xffff_0008;

/// Execution state saved by the core on taking the trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct SavedState {
    /// Address of the instruction following the trap (i.e: `lr_svc`).
    pub return_addr: u32,
    /// The pre-trap PSR (i.e: `spsr_svc`).
    pub psr: Psr,
}

impl SavedState {
    pub fn instr_set(&self) -> InstrSet {
        InstrSet::from_psr(self.psr)
    }
}

/// Check whether the core is halted on the semihosting trap, returning the
/// execution state to restore once the request has been serviced.
///
/// Nothing is read from target memory unless the core is halted in
/// Supervisor mode on the SVC vector.
pub(super) fn match_trap<T: Target>(
    target: &mut T,
    svc_vector: u32,
) -> Result<Option<SavedState>, SemihostingError<T::Error>> {
    if target.core_state().mode != ProcessorMode::Supervisor {
        return Ok(None);
    }

    let pc = target.read_reg(ArmCoreRegId::Pc)?;
    if pc != svc_vector {
        return Ok(None);
    }

    let return_addr = target.read_reg(ArmCoreRegId::LrBanked(ProcessorMode::Supervisor))?;
    let psr = target.read_reg(ArmCoreRegId::Spsr(ProcessorMode::Supervisor))?;
    let saved = SavedState {
        return_addr,
        psr: Psr::from_bits_retain(psr),
    };
    trace!(
        "semihosting: halted on SVC vector, lr={:#010x} spsr={:#010x}",
        return_addr,
        psr
    );

    let instr_set = saved.instr_set();
    let size = match instr_set {
        InstrSet::Arm => AccessSize::Word,
        InstrSet::Thumb => AccessSize::HalfWord,
    };
    let addr = instr_set.trap_addr(return_addr);
    let mut insn = vec![0; instr_set.insn_len()];
    target.read_mem(addr, size, &mut insn)?;

    if !instr_set.is_trap(&insn, target.endianness()) {
        trace!("semihosting: {:?} SVC at {:#010x} isn't a semihosting trap", instr_set, addr);
        return Ok(None);
    }

    Ok(Some(saved))
}
