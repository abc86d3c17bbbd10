//! The core [`Semihosting`] type, used to service semihosting requests raised
//! by a particular core.

use alloc::vec::Vec;

use log::*;

use crate::arch::arm::reg::ArmCoreRegId;
use crate::common::{Errno, ExceptionReason, Request};
use crate::host::HostIo;
use crate::target::Target;

mod builder;
mod commit;
mod core_impl;
mod error;
mod marshal;
mod target_ext;
mod trap;

#[cfg(test)]
mod test_util;

pub use builder::{SemihostingBuilder, SemihostingBuilderError};
pub use error::SemihostingError;

use self::core_impl::{Completion, Ctx};
use self::marshal::Marshaler;
use self::target_ext::TargetExt;

/// The result of handing a halt to [`Semihosting::handle_trap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome {
    /// The halt wasn't caused by a semihosting request (or semihosting is
    /// disabled). Nothing was done, and the core is still halted.
    NotApplicable,
    /// The request was serviced, and the core has been resumed.
    Resumed,
    /// The target reported an exception via `REPORT_EXCEPTION` (e.g: the
    /// application exited). A [`TargetEvent::Halted`] notification has been
    /// sent, and the core has been left halted.
    ///
    /// [`TargetEvent::Halted`]: crate::target::TargetEvent::Halted
    Halted(ExceptionReason),
}

/// Semihosting state for a single core.
///
/// Each core which may raise semihosting requests needs its own session, as
/// the session holds the error slot read back by `SYS_ERRNO`.
pub struct Semihosting {
    enabled: bool,
    high_vectors: bool,
    cmdline: Vec<u8>,
    errno: Errno,
}

impl Default for Semihosting {
    fn default() -> Self {
        Semihosting::new()
    }
}

impl Semihosting {
    /// Create a [`SemihostingBuilder`].
    pub fn builder() -> SemihostingBuilder {
        SemihostingBuilder::new()
    }

    /// Create a new session using the default configuration.
    pub fn new() -> Semihosting {
        Semihosting {
            enabled: true,
            high_vectors: false,
            cmdline: builder::DEFAULT_CMDLINE.to_vec(),
            errno: Errno::NONE,
        }
    }

    /// Enable or disable semihosting. While disabled, every halt is reported
    /// as [`TrapOutcome::NotApplicable`].
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if semihosting is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The session's error slot, as returned to the target by `SYS_ERRNO`.
    pub fn errno(&self) -> Errno {
        self.errno
    }

    fn svc_vector(&self) -> u32 {
        if self.high_vectors {
            trap::SVC_VECTOR_HIGH
        } else {
            trap::SVC_VECTOR
        }
    }

    /// Inspect a halted core, and if it's halted on a semihosting request,
    /// service the request and resume the core.
    ///
    /// This should be called every time the core halts on a debug event,
    /// _before_ reporting the halt anywhere else. If the halt wasn't caused by
    /// semihosting, [`TrapOutcome::NotApplicable`] is returned without having
    /// touched the core.
    ///
    /// If an error is returned, the request was abandoned part-way through,
    /// and the core is still halted.
    pub fn handle_trap<T: Target, H: HostIo>(
        &mut self,
        target: &mut T,
        host: &mut H,
    ) -> Result<TrapOutcome, SemihostingError<T::Error>> {
        if !self.enabled {
            return Ok(TrapOutcome::NotApplicable);
        }

        let saved = match trap::match_trap(target, self.svc_vector())? {
            Some(saved) => saved,
            None => return Ok(TrapOutcome::NotApplicable),
        };

        let request = Request(target.read_reg(ArmCoreRegId::R0)?);
        let arg = target.read_reg(ArmCoreRegId::R1)?;

        let mut ctx = Ctx {
            request,
            arg,
            mem: Marshaler::new(target),
            host,
            errno: &mut self.errno,
            cmdline: &self.cmdline,
        };

        match core_impl::dispatch(&mut ctx)? {
            Completion::Resume(result) => {
                commit::commit(target, saved, result)?;
                Ok(TrapOutcome::Resumed)
            }
            Completion::Halt(reason) => {
                debug!("semihosting: leaving core halted ({})", reason);
                Ok(TrapOutcome::Halted(reason))
            }
        }
    }
}
