//! Data movement between target memory and host-side buffers.
//!
//! The marshaler applies no policy of its own: any failed access is a fatal
//! [`SemihostingError`], never a host errno.

use alloc::vec;

use super::target_ext::TargetExt;
use super::SemihostingError;
use crate::target::{AccessSize, Target};

/// Reads and writes target memory on behalf of a request handler.
pub(crate) struct Marshaler<'a, T: Target> {
    target: &'a mut T,
}

impl<'a, T: Target> Marshaler<'a, T> {
    pub fn new(target: &'a mut T) -> Marshaler<'a, T> {
        Marshaler { target }
    }

    pub fn target(&mut self) -> &mut T {
        self.target
    }

    /// Read a block of `N` consecutive 32-bit words, decoded using the
    /// target's byte order.
    pub fn read_words<const N: usize>(
        &mut self,
        addr: u32,
    ) -> Result<[u32; N], SemihostingError<T::Error>> {
        let mut buf = vec![0; N * 4];
        self.target.read_mem(addr, AccessSize::Word, &mut buf)?;

        let endianness = self.target.endianness();
        let mut words = [0; N];
        for (word, b) in words.iter_mut().zip(buf.chunks_exact(4)) {
            *word = endianness.u32_from_bytes([b[0], b[1], b[2], b[3]]);
        }
        Ok(words)
    }

    /// Write a block of 32-bit words, encoded using the target's byte order.
    pub fn write_words(
        &mut self,
        addr: u32,
        words: &[u32],
    ) -> Result<(), SemihostingError<T::Error>> {
        let endianness = self.target.endianness();
        let buf = words
            .iter()
            .flat_map(|w| endianness.write_u32(*w))
            .collect::<alloc::vec::Vec<u8>>();
        self.target.write_mem(addr, AccessSize::Word, &buf)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self, addr: u32) -> Result<u8, SemihostingError<T::Error>> {
        let mut c = [0];
        self.target.read_mem(addr, AccessSize::Byte, &mut c)?;
        Ok(c[0])
    }

    /// Fill `buf` with the bytes starting at `addr`.
    pub fn read_bytes(
        &mut self,
        addr: u32,
        buf: &mut [u8],
    ) -> Result<(), SemihostingError<T::Error>> {
        if buf.is_empty() {
            return Ok(());
        }
        self.target.read_mem(addr, AccessSize::Byte, buf)
    }

    /// Copy `data` into target memory starting at `addr`.
    pub fn write_bytes(&mut self, addr: u32, data: &[u8]) -> Result<(), SemihostingError<T::Error>> {
        if data.is_empty() {
            return Ok(());
        }
        self.target.write_mem(addr, AccessSize::Byte, data)
    }
}
