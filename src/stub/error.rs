use core::fmt::{self, Debug, Display};

use crate::arch::arm::reg::ArmCoreRegId;

/// A fatal error which occurred while servicing a semihosting request.
///
/// All variants indicate that `semihost` lost contact with the core, and
/// carry the underlying [`Target::Error`](crate::target::Target::Error). When
/// one of these is returned, the in-flight request has been abandoned and the
/// core has been left halted.
///
/// Note that errors raised by _host_ operations (e.g: a missing file) are not
/// fatal, and are instead reported back to the target via `r0` and the
/// session's error slot.
#[derive(Debug)]
#[non_exhaustive]
pub enum SemihostingError<T> {
    /// Could not read a core register.
    RegisterRead(ArmCoreRegId, T),
    /// Could not write a core register.
    RegisterWrite(ArmCoreRegId, T),
    /// Could not read target memory at the specified address.
    MemoryRead(u32, T),
    /// Could not write target memory at the specified address.
    MemoryWrite(u32, T),
    /// Could not resume the core after servicing the request.
    Resume(T),
    /// Could not broadcast a target event.
    Notify(T),
}

impl<T> SemihostingError<T> {
    /// Return the underlying target error.
    pub fn into_inner(self) -> T {
        use self::SemihostingError::*;
        match self {
            RegisterRead(_, e)
            | RegisterWrite(_, e)
            | MemoryRead(_, e)
            | MemoryWrite(_, e)
            | Resume(e)
            | Notify(e) => e,
        }
    }
}

impl<T> Display for SemihostingError<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::SemihostingError::*;
        match self {
            RegisterRead(reg, e) => write!(f, "Could not read register {:?}: {:?}", reg, e),
            RegisterWrite(reg, e) => write!(f, "Could not write register {:?}: {:?}", reg, e),
            MemoryRead(addr, e) => write!(f, "Could not read target memory at {:#010x}: {:?}", addr, e),
            MemoryWrite(addr, e) => write!(f, "Could not write target memory at {:#010x}: {:?}", addr, e),
            Resume(e) => write!(f, "Could not resume the target: {:?}", e),
            Notify(e) => write!(f, "Could not broadcast target event: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<T> std::error::Error for SemihostingError<T> where T: Debug {}
