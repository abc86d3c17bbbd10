use crate::arch::arm::ProcessorMode;

/// 32-bit ARM core register identifier.
///
/// Unqualified variants (`Gpr`, `Sp`, `Lr`, ...) refer to the register as seen
/// from the core's _current_ processor mode. Registers which are banked per
/// mode can be addressed explicitly via `LrBanked` and `Spsr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ArmCoreRegId {
    /// General purpose registers (R0-R12)
    Gpr(u8),
    /// Stack Pointer (R13)
    Sp,
    /// Link Register (R14)
    Lr,
    /// Program Counter (R15)
    Pc,
    /// Current Program Status Register (cpsr)
    Cpsr,
    /// Link Register (R14) of the specified mode's register bank
    LrBanked(ProcessorMode),
    /// Saved Program Status Register of the specified mode
    ///
    /// `User` and `System` mode don't have an SPSR.
    Spsr(ProcessorMode),
}

impl ArmCoreRegId {
    /// `r0`: the semihosting request code on entry, and the result on exit.
    pub const R0: Self = Self::Gpr(0);
    /// `r1`: the address of the parameter block.
    pub const R1: Self = Self::Gpr(1);
}
