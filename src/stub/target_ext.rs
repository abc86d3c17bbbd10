use super::SemihostingError;
use crate::arch::arm::reg::ArmCoreRegId;
use crate::target::{AccessSize, Target};

/// Extension trait to ease working with fallible [`Target`] accesses in the
/// semihosting implementation, attaching the context each error needs.
pub(super) trait TargetExt: Target {
    fn read_reg(&mut self, reg: ArmCoreRegId) -> Result<u32, SemihostingError<Self::Error>> {
        self.read_register(reg)
            .map_err(|e| SemihostingError::RegisterRead(reg, e))
    }

    fn write_reg(
        &mut self,
        reg: ArmCoreRegId,
        val: u32,
    ) -> Result<(), SemihostingError<Self::Error>> {
        self.write_register(reg, val)
            .map_err(|e| SemihostingError::RegisterWrite(reg, e))
    }

    fn read_mem(
        &mut self,
        addr: u32,
        size: AccessSize,
        data: &mut [u8],
    ) -> Result<(), SemihostingError<Self::Error>> {
        self.read_memory(addr, size, data)
            .map_err(|e| SemihostingError::MemoryRead(addr, e))
    }

    fn write_mem(
        &mut self,
        addr: u32,
        size: AccessSize,
        data: &[u8],
    ) -> Result<(), SemihostingError<Self::Error>> {
        self.write_memory(addr, size, data)
            .map_err(|e| SemihostingError::MemoryWrite(addr, e))
    }
}

impl<T: Target> TargetExt for T {}
