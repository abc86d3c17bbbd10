use core::convert::TryInto;

/// Byte order of the target's memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    /// Little endian.
    #[default]
    Little,
    /// Big endian.
    Big,
}

impl Endianness {
    /// Decode a `u32` from exactly 4 bytes.
    pub fn read_u32(self, bytes: &[u8]) -> Option<u32> {
        let bytes: [u8; 4] = bytes.try_into().ok()?;
        Some(self.u32_from_bytes(bytes))
    }

    /// Decode a `u32`.
    pub fn u32_from_bytes(self, bytes: [u8; 4]) -> u32 {
        match self {
            Endianness::Little => u32::from_le_bytes(bytes),
            Endianness::Big => u32::from_be_bytes(bytes),
        }
    }

    /// Decode a `u16` from exactly 2 bytes.
    pub fn read_u16(self, bytes: &[u8]) -> Option<u16> {
        let bytes: [u8; 2] = bytes.try_into().ok()?;
        Some(match self {
            Endianness::Little => u16::from_le_bytes(bytes),
            Endianness::Big => u16::from_be_bytes(bytes),
        })
    }

    /// Encode a `u32`.
    pub fn write_u32(self, val: u32) -> [u8; 4] {
        match self {
            Endianness::Little => val.to_le_bytes(),
            Endianness::Big => val.to_be_bytes(),
        }
    }
}
