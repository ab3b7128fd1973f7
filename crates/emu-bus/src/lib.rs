//! 16-bit data bus with device mapping for 68000-family emulation.
//!
//! The bus is word-granular: `read16`/`write16` are the only primitives,
//! matching the 68000's 16-bit data bus. Byte and long accesses are
//! composed by the CPU on top of these. Byte order at the bus boundary
//! is big-endian (high byte at the lower address).

mod bus;
mod memory;
mod ram;

pub use bus::{AddressRange, Bus, BusDevice, DeviceMapping};
pub use memory::{Memory16, MemoryAccessError, ReadResult};
pub use ram::Ram;
