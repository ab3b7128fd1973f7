//! Word-granularity memory interface.

use std::fmt;

/// Error raised at the bus boundary when an access hits no mapped device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryAccessError {
    /// A read landed in an address range no device claims.
    ReadFromUnmappedAddress,
    /// A write landed in an address range no device claims.
    WriteToUnmappedAddress,
}

impl fmt::Display for MemoryAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFromUnmappedAddress => write!(f, "read from unmapped address"),
            Self::WriteToUnmappedAddress => write!(f, "write to unmapped address"),
        }
    }
}

impl std::error::Error for MemoryAccessError {}

/// Result of a successful 16-bit read.
///
/// Wait cycles are informational: slow devices report how many extra
/// cycles the access cost, for future timing-accurate emulation. Nothing
/// in the core gates on them today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadResult {
    /// The word read from the bus.
    pub data: u16,
    /// Extra cycles the device inserted to complete the access.
    pub wait_cycles: u32,
}

impl ReadResult {
    /// A read that completed with no wait states.
    #[must_use]
    pub const fn new(data: u16) -> Self {
        Self {
            data,
            wait_cycles: 0,
        }
    }

    /// A read with wait states.
    #[must_use]
    pub const fn with_wait(data: u16, wait_cycles: u32) -> Self {
        Self { data, wait_cycles }
    }
}

/// The word-level memory interface the CPU drives.
///
/// Every wider or narrower access the CPU performs is built from these
/// two primitives. Implementations route the address to whatever backs
/// it (flat RAM, a mapped device set, a test fixture).
pub trait Memory16 {
    /// Read the 16-bit word at `address`.
    fn read16(&mut self, address: u32) -> Result<ReadResult, MemoryAccessError>;

    /// Write a 16-bit word to `address`.
    fn write16(&mut self, address: u32, value: u16) -> Result<(), MemoryAccessError>;
}
