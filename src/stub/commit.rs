use log::*;

use super::target_ext::TargetExt;
use super::trap::SavedState;
use super::SemihostingError;
use crate::arch::arm::reg::ArmCoreRegId;
use crate::arch::arm::CoreState;
use crate::target::Target;

/// Hand the request's result back to the target, return from the exception,
/// and resume the core.
pub(super) fn commit<T: Target>(
    target: &mut T,
    saved: SavedState,
    result: i32,
) -> Result<(), SemihostingError<T::Error>> {
    trace!(
        "semihosting: r0={:#010x}, returning to {:#010x}",
        result,
        saved.return_addr
    );

    target.write_reg(ArmCoreRegId::R0, result as u32)?;
    target.write_reg(ArmCoreRegId::Pc, saved.return_addr)?;
    target.write_reg(ArmCoreRegId::Cpsr, saved.psr.bits())?;

    match CoreState::from_psr(saved.psr) {
        Some(state) => target.set_core_state(state),
        None => warn!(
            "semihosting: restored cpsr {:#010x} has an invalid mode field",
            saved.psr.bits()
        ),
    }

    target.resume().map_err(SemihostingError::Resume)
}
