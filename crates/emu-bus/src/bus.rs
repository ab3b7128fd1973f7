//! Address-range device mapping.
//!
//! Devices register with a base address plus independent optional read
//! and write ranges. Registration rejects any overlap with an already
//! mapped range, so routing is unambiguous: the first device whose
//! matching range contains the address handles the access, and sees the
//! address translated to a device-local offset (address minus base).

use crate::memory::{Memory16, MemoryAccessError, ReadResult};

/// An inclusive range of bus addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    /// First address in the range.
    pub start: u32,
    /// Last address in the range (inclusive).
    pub end: u32,
}

impl AddressRange {
    /// Create a range covering `start..=end`.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// True if `address` falls inside this range.
    #[must_use]
    pub const fn contains(&self, address: u32) -> bool {
        address >= self.start && address <= self.end
    }

    /// True if the two ranges share any address.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// A device attached to the bus.
///
/// Devices see device-local offsets, never global addresses: the bus
/// subtracts the device's base address before dispatching.
pub trait BusDevice {
    /// Read the word at the device-local `offset`.
    fn read16(&mut self, offset: u32) -> u16;

    /// Write a word to the device-local `offset`.
    fn write16(&mut self, offset: u32, value: u16);

    /// Wait cycles this device inserts per access. Zero for most devices.
    fn wait_cycles(&self) -> u32 {
        0
    }
}

/// A device plus where it lives on the bus.
pub struct DeviceMapping {
    /// The device itself.
    pub device: Box<dyn BusDevice>,
    /// Global address corresponding to device offset 0.
    pub base_address: u32,
    /// Addresses this device answers reads on, if any.
    pub read_range: Option<AddressRange>,
    /// Addresses this device accepts writes on, if any.
    pub write_range: Option<AddressRange>,
}

enum Operation {
    Read,
    Write,
}

/// The system bus: routes each access to the mapped device claiming it.
#[derive(Default)]
pub struct Bus {
    devices: Vec<DeviceMapping>,
}

impl Bus {
    /// Create an empty bus with no devices mapped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a device onto the bus.
    ///
    /// Returns `false` (and drops the mapping) if the device declares
    /// neither a read nor a write range, or if either declared range
    /// overlaps any range already mapped — overlapping devices would
    /// make routing order-dependent, so they are rejected up front.
    pub fn map_device(&mut self, mapping: DeviceMapping) -> bool {
        if mapping.read_range.is_none() && mapping.write_range.is_none() {
            return false;
        }

        if !self.ranges_are_free(mapping.read_range) || !self.ranges_are_free(mapping.write_range) {
            return false;
        }

        self.devices.push(mapping);
        true
    }

    fn ranges_are_free(&self, candidate: Option<AddressRange>) -> bool {
        let Some(candidate) = candidate else {
            return true;
        };

        self.devices.iter().all(|existing| {
            let read_clear = existing
                .read_range
                .is_none_or(|range| !range.overlaps(&candidate));
            let write_clear = existing
                .write_range
                .is_none_or(|range| !range.overlaps(&candidate));
            read_clear && write_clear
        })
    }

    fn find_device(&mut self, op: &Operation, address: u32) -> Option<(&mut DeviceMapping, u32)> {
        self.devices.iter_mut().find_map(|mapping| {
            let range = match op {
                Operation::Read => mapping.read_range,
                Operation::Write => mapping.write_range,
            }?;

            if range.contains(address) {
                let offset = address - mapping.base_address;
                Some((mapping, offset))
            } else {
                None
            }
        })
    }
}

impl Memory16 for Bus {
    fn read16(&mut self, address: u32) -> Result<ReadResult, MemoryAccessError> {
        let Some((mapping, offset)) = self.find_device(&Operation::Read, address) else {
            return Err(MemoryAccessError::ReadFromUnmappedAddress);
        };

        let data = mapping.device.read16(offset);
        Ok(ReadResult::with_wait(data, mapping.device.wait_cycles()))
    }

    fn write16(&mut self, address: u32, value: u16) -> Result<(), MemoryAccessError> {
        let Some((mapping, offset)) = self.find_device(&Operation::Write, address) else {
            return Err(MemoryAccessError::WriteToUnmappedAddress);
        };

        mapping.device.write16(offset, value);
        Ok(())
    }
}
