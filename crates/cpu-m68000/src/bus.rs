//! Typed reads composed from the 16-bit bus primitive.
//!
//! The 68000's bus is 16 bits wide; every 8- and 32-bit access the CPU
//! performs is built from word reads:
//!
//! - 8-bit: one word read; an even address selects the high byte, an
//!   odd address the low byte
//! - 16-bit: one word read
//! - 32-bit: two word reads, high word at the lower address
//!
//! Wait cycles from the underlying reads are summed. Errors propagate
//! unchanged, and for 32-bit reads the high-word error short-circuits
//! before the low word is attempted.

use emu_bus::{Memory16, MemoryAccessError};

/// A typed read plus the wait cycles it cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryAccessResult<T> {
    /// The value read.
    pub data: T,
    /// Summed wait cycles of the underlying word reads.
    pub wait_cycles: u32,
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for i8 {}
    impl Sealed for u16 {}
    impl Sealed for i16 {}
    impl Sealed for u32 {}
    impl Sealed for i32 {}
}

/// Widths the bus helper can access: 8, 16, or 32 bits, signed or unsigned.
pub trait BusData: sealed::Sealed + Sized {
    /// Read a value of this width at `address`.
    fn read_from<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
    ) -> Result<MemoryAccessResult<Self>, MemoryAccessError>;

    /// Write a value of this width at `address`.
    fn write_to<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
        value: Self,
    ) -> Result<(), MemoryAccessError>;
}

fn read_byte<B: Memory16 + ?Sized>(
    bus: &mut B,
    address: u32,
) -> Result<MemoryAccessResult<u8>, MemoryAccessError> {
    let word = bus.read16(address)?;
    let data = if address & 1 != 0 {
        (word.data & 0xFF) as u8
    } else {
        (word.data >> 8) as u8
    };

    Ok(MemoryAccessResult {
        data,
        wait_cycles: word.wait_cycles,
    })
}

// Byte writes merge into the containing word: the bus is word-granular,
// so the other byte must be read back and preserved.
fn write_byte<B: Memory16 + ?Sized>(
    bus: &mut B,
    address: u32,
    value: u8,
) -> Result<(), MemoryAccessError> {
    let word = bus.read16(address)?;
    let merged = if address & 1 != 0 {
        (word.data & 0xFF00) | u16::from(value)
    } else {
        (word.data & 0x00FF) | (u16::from(value) << 8)
    };

    bus.write16(address, merged)
}

fn write_long<B: Memory16 + ?Sized>(
    bus: &mut B,
    address: u32,
    value: u32,
) -> Result<(), MemoryAccessError> {
    bus.write16(address, (value >> 16) as u16)?;
    bus.write16(address.wrapping_add(2), (value & 0xFFFF) as u16)
}

fn read_long<B: Memory16 + ?Sized>(
    bus: &mut B,
    address: u32,
) -> Result<MemoryAccessResult<u32>, MemoryAccessError> {
    let high = bus.read16(address)?;
    let low = bus.read16(address.wrapping_add(2))?;

    Ok(MemoryAccessResult {
        data: (u32::from(high.data) << 16) | u32::from(low.data),
        wait_cycles: high.wait_cycles + low.wait_cycles,
    })
}

impl BusData for u8 {
    fn read_from<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
    ) -> Result<MemoryAccessResult<Self>, MemoryAccessError> {
        read_byte(bus, address)
    }

    fn write_to<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
        value: Self,
    ) -> Result<(), MemoryAccessError> {
        write_byte(bus, address, value)
    }
}

impl BusData for i8 {
    fn read_from<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
    ) -> Result<MemoryAccessResult<Self>, MemoryAccessError> {
        let result = read_byte(bus, address)?;
        Ok(MemoryAccessResult {
            data: result.data as i8,
            wait_cycles: result.wait_cycles,
        })
    }

    fn write_to<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
        value: Self,
    ) -> Result<(), MemoryAccessError> {
        write_byte(bus, address, value as u8)
    }
}

impl BusData for u16 {
    fn read_from<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
    ) -> Result<MemoryAccessResult<Self>, MemoryAccessError> {
        let word = bus.read16(address)?;
        Ok(MemoryAccessResult {
            data: word.data,
            wait_cycles: word.wait_cycles,
        })
    }

    fn write_to<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
        value: Self,
    ) -> Result<(), MemoryAccessError> {
        bus.write16(address, value)
    }
}

impl BusData for i16 {
    fn read_from<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
    ) -> Result<MemoryAccessResult<Self>, MemoryAccessError> {
        let word = bus.read16(address)?;
        Ok(MemoryAccessResult {
            data: word.data as i16,
            wait_cycles: word.wait_cycles,
        })
    }

    fn write_to<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
        value: Self,
    ) -> Result<(), MemoryAccessError> {
        bus.write16(address, value as u16)
    }
}

impl BusData for u32 {
    fn read_from<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
    ) -> Result<MemoryAccessResult<Self>, MemoryAccessError> {
        read_long(bus, address)
    }

    fn write_to<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
        value: Self,
    ) -> Result<(), MemoryAccessError> {
        write_long(bus, address, value)
    }
}

impl BusData for i32 {
    fn read_from<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
    ) -> Result<MemoryAccessResult<Self>, MemoryAccessError> {
        let result = read_long(bus, address)?;
        Ok(MemoryAccessResult {
            data: result.data as i32,
            wait_cycles: result.wait_cycles,
        })
    }

    fn write_to<B: Memory16 + ?Sized>(
        bus: &mut B,
        address: u32,
        value: Self,
    ) -> Result<(), MemoryAccessError> {
        write_long(bus, address, value as u32)
    }
}

/// Read a typed value from the bus.
///
/// The width and signedness come from `T`; see the module docs for how
/// each width maps onto word reads.
pub fn read<T: BusData, B: Memory16 + ?Sized>(
    bus: &mut B,
    address: u32,
) -> Result<MemoryAccessResult<T>, MemoryAccessError> {
    T::read_from(bus, address)
}

/// Write a typed value to the bus.
///
/// A byte write reads the containing word first to preserve its other
/// byte; a long write stores the high word at the lower address.
pub fn write<T: BusData, B: Memory16 + ?Sized>(
    bus: &mut B,
    address: u32,
    value: T,
) -> Result<(), MemoryAccessError> {
    T::write_to(bus, address, value)
}
