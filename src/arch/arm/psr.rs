use bitflags::bitflags;

bitflags! {
    /// ARM Program Status Register (`cpsr` / `spsr`).
    ///
    /// Only the fields semihosting cares about are named. Construct values
    /// with `from_bits_retain` so the mode field survives, and use
    /// [`Psr::mode_bits`] to extract it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Psr: u32 {
        /// Thumb state.
        const T = 1 << 5;
        /// FIQ disable.
        const F = 1 << 6;
        /// IRQ disable.
        const I = 1 << 7;
        /// Overflow condition flag.
        const V = 1 << 28;
        /// Carry condition flag.
        const C = 1 << 29;
        /// Zero condition flag.
        const Z = 1 << 30;
        /// Negative condition flag.
        const N = 1 << 31;
    }
}

impl Psr {
    /// Mask of the processor mode field.
    pub const MODE_MASK: u32 = 0x1f;

    /// The raw processor mode field.
    pub fn mode_bits(self) -> u8 {
        (self.bits() & Self::MODE_MASK) as u8
    }
}
