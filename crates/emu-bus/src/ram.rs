//! Flat RAM device.

use crate::bus::BusDevice;
use crate::memory::{Memory16, MemoryAccessError, ReadResult};

/// Byte-backed RAM with word-granularity bus access.
///
/// Stores bytes big-endian so word reads compose high byte first, the
/// way the 68000 sees memory. Also implements [`Memory16`] directly so
/// tests can drive a CPU without building a full device-mapped bus.
pub struct Ram {
    data: Vec<u8>,
}

impl Ram {
    /// Create zero-filled RAM of `size` bytes.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// RAM size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the RAM has zero capacity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read one byte without going through the bus (test inspection).
    ///
    /// Unlike the bus paths, which report unmapped accesses as errors,
    /// this panics on an out-of-range offset: in test setup that is a
    /// bug in the test, not a runtime condition.
    #[must_use]
    pub fn peek(&self, offset: u32) -> u8 {
        assert!(
            (offset as usize) < self.data.len(),
            "peek at {offset:#010X} outside RAM of {} bytes",
            self.data.len()
        );
        self.data[offset as usize]
    }

    /// Write one byte without going through the bus (test setup).
    ///
    /// Panics on an out-of-range offset, like [`peek`](Self::peek).
    pub fn poke(&mut self, offset: u32, value: u8) {
        assert!(
            (offset as usize) < self.data.len(),
            "poke at {offset:#010X} outside RAM of {} bytes",
            self.data.len()
        );
        self.data[offset as usize] = value;
    }

    /// Read a big-endian word without going through the bus.
    #[must_use]
    pub fn peek_word(&self, offset: u32) -> u16 {
        self.word_at(offset)
    }

    /// Write a big-endian word (test setup helper).
    pub fn poke_word(&mut self, offset: u32, value: u16) {
        self.poke(offset, (value >> 8) as u8);
        self.poke(offset + 1, (value & 0xFF) as u8);
    }

    /// Write a big-endian long word (test setup helper).
    pub fn poke_long(&mut self, offset: u32, value: u32) {
        self.poke_word(offset, (value >> 16) as u16);
        self.poke_word(offset + 2, (value & 0xFFFF) as u16);
    }

    fn word_at(&self, offset: u32) -> u16 {
        let index = (offset & !1) as usize;
        (u16::from(self.data[index]) << 8) | u16::from(self.data[index + 1])
    }

    fn set_word_at(&mut self, offset: u32, value: u16) {
        let index = (offset & !1) as usize;
        self.data[index] = (value >> 8) as u8;
        self.data[index + 1] = (value & 0xFF) as u8;
    }

    fn in_bounds(&self, offset: u32) -> bool {
        ((offset | 1) as usize) < self.data.len()
    }
}

impl BusDevice for Ram {
    fn read16(&mut self, offset: u32) -> u16 {
        self.word_at(offset)
    }

    fn write16(&mut self, offset: u32, value: u16) {
        self.set_word_at(offset, value);
    }
}

impl Memory16 for Ram {
    fn read16(&mut self, address: u32) -> Result<ReadResult, MemoryAccessError> {
        if !self.in_bounds(address) {
            return Err(MemoryAccessError::ReadFromUnmappedAddress);
        }

        Ok(ReadResult::new(self.word_at(address)))
    }

    fn write16(&mut self, address: u32, value: u16) -> Result<(), MemoryAccessError> {
        if !self.in_bounds(address) {
            return Err(MemoryAccessError::WriteToUnmappedAddress);
        }

        self.set_word_at(address, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Ram;
    use crate::memory::{Memory16, MemoryAccessError};

    #[test]
    fn words_are_big_endian() {
        let mut ram = Ram::new(0x100);
        ram.poke(0x10, 0x12);
        ram.poke(0x11, 0x34);

        assert_eq!(ram.read16(0x10).map(|r| r.data), Ok(0x1234));
    }

    #[test]
    fn word_access_ignores_the_low_address_bit() {
        let mut ram = Ram::new(0x100);
        ram.poke_word(0x20, 0xABCD);

        assert_eq!(ram.read16(0x21).map(|r| r.data), Ok(0xABCD));
    }

    #[test]
    #[should_panic(expected = "outside RAM")]
    fn peek_outside_ram_panics() {
        Ram::new(0x10).peek(0x10);
    }

    #[test]
    #[should_panic(expected = "outside RAM")]
    fn poke_outside_ram_panics() {
        Ram::new(0x10).poke(0x10, 0);
    }

    #[test]
    fn out_of_bounds_access_is_unmapped() {
        let mut ram = Ram::new(0x10);
        assert_eq!(
            ram.read16(0x10).unwrap_err(),
            MemoryAccessError::ReadFromUnmappedAddress
        );
        assert_eq!(
            ram.write16(0x10, 0).unwrap_err(),
            MemoryAccessError::WriteToUnmappedAddress
        );
    }
}
