//! Motorola 68000 CPU registers.
//!
//! - D0-D7: 8 data registers (32-bit)
//! - A0-A7: 8 address registers (32-bit, A7 is the active stack pointer)
//! - USP: User stack pointer (A7 when in user mode)
//! - SSP: Supervisor stack pointer (A7 when in supervisor mode)
//! - PC: Program counter (32-bit)
//! - SR: Status register, held as discrete fields

/// Status register fields, stored unpacked.
///
/// SR word layout (reserved bits read back as zero):
/// - Bit 0: C (carry)
/// - Bit 1: V (overflow)
/// - Bit 2: Z (zero)
/// - Bit 3: N (negative)
/// - Bit 4: X (extend)
/// - Bits 8-10: interrupt mask
/// - Bit 12: M (master/interrupt state)
/// - Bit 13: S (supervisor/user state)
/// - Bits 14-15: trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusRegister {
    /// Carry flag.
    pub carry: bool,
    /// Overflow flag.
    pub overflow: bool,
    /// Zero flag.
    pub zero: bool,
    /// Negative flag.
    pub negative: bool,
    /// Extend flag (copy of carry for multi-precision arithmetic).
    pub extend: bool,
    /// Interrupt mask level, 0-7.
    pub interrupt_mask: u8,
    /// Master/interrupt state flag.
    pub master_state: bool,
    /// Supervisor/user state flag.
    pub supervisor_state: bool,
    /// Trace mode, 2 bits.
    pub trace: u8,
}

impl StatusRegister {
    /// Pack the fields into the 16-bit SR encoding.
    #[must_use]
    pub fn to_word(self) -> u16 {
        let mut word = 0u16;
        if self.carry {
            word |= 1 << 0;
        }
        if self.overflow {
            word |= 1 << 1;
        }
        if self.zero {
            word |= 1 << 2;
        }
        if self.negative {
            word |= 1 << 3;
        }
        if self.extend {
            word |= 1 << 4;
        }
        word |= u16::from(self.interrupt_mask & 0x07) << 8;
        if self.master_state {
            word |= 1 << 12;
        }
        if self.supervisor_state {
            word |= 1 << 13;
        }
        word |= u16::from(self.trace & 0x03) << 14;
        word
    }

    /// Unpack a 16-bit SR word; reserved bits are discarded.
    #[must_use]
    pub fn from_word(word: u16) -> Self {
        Self {
            carry: word & (1 << 0) != 0,
            overflow: word & (1 << 1) != 0,
            zero: word & (1 << 2) != 0,
            negative: word & (1 << 3) != 0,
            extend: word & (1 << 4) != 0,
            interrupt_mask: ((word >> 8) & 0x07) as u8,
            master_state: word & (1 << 12) != 0,
            supervisor_state: word & (1 << 13) != 0,
            trace: ((word >> 14) & 0x03) as u8,
        }
    }

    /// Pack just the condition-code byte (bits 0-4).
    #[must_use]
    pub fn ccr(self) -> u8 {
        (self.to_word() & 0x1F) as u8
    }

    /// Replace the condition-code bits, leaving the system byte alone.
    pub fn set_ccr(&mut self, ccr: u8) {
        let system = self.to_word() & 0xFF00;
        *self = Self::from_word(system | u16::from(ccr & 0x1F));
    }
}

/// 68000 CPU register set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Data registers D0-D7.
    pub d: [u32; 8],
    /// Address registers A0-A6 (A7 is handled via USP/SSP).
    pub a: [u32; 7],
    /// User stack pointer (active A7 when in user mode).
    pub usp: u32,
    /// Supervisor stack pointer (active A7 when in supervisor mode).
    pub ssp: u32,
    /// Program counter.
    pub pc: u32,
    /// Status register.
    pub sr: StatusRegister,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Create registers in reset state: supervisor mode, interrupt mask 7.
    #[must_use]
    pub fn new() -> Self {
        Self {
            d: [0; 8],
            a: [0; 7],
            usp: 0,
            ssp: 0,
            pc: 0,
            sr: StatusRegister {
                supervisor_state: true,
                interrupt_mask: 7,
                ..StatusRegister::default()
            },
        }
    }

    /// Get data register by index (0-7).
    #[must_use]
    pub fn d(&self, n: u8) -> u32 {
        debug_assert!(n < 8);
        self.d[n as usize]
    }

    /// Set data register by index (0-7).
    pub fn set_d(&mut self, n: u8, value: u32) {
        debug_assert!(n < 8);
        self.d[n as usize] = value;
    }

    /// Get address register by index (0-7).
    /// A7 returns the active stack pointer based on supervisor state.
    #[must_use]
    pub fn a(&self, n: u8) -> u32 {
        debug_assert!(n < 8);
        if n < 7 {
            self.a[n as usize]
        } else {
            self.active_sp()
        }
    }

    /// Set address register by index (0-7).
    /// A7 sets the active stack pointer based on supervisor state.
    pub fn set_a(&mut self, n: u8, value: u32) {
        debug_assert!(n < 8);
        if n < 7 {
            self.a[n as usize] = value;
        } else {
            self.set_active_sp(value);
        }
    }

    /// Get the active stack pointer (USP or SSP based on supervisor state).
    #[must_use]
    pub const fn active_sp(&self) -> u32 {
        if self.sr.supervisor_state {
            self.ssp
        } else {
            self.usp
        }
    }

    /// Set the active stack pointer.
    pub fn set_active_sp(&mut self, value: u32) {
        if self.sr.supervisor_state {
            self.ssp = value;
        } else {
            self.usp = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Registers, StatusRegister};

    #[test]
    fn reset_state_is_supervisor_with_mask_7() {
        let regs = Registers::new();
        assert!(regs.sr.supervisor_state);
        assert_eq!(regs.sr.interrupt_mask, 7);
        assert_eq!(regs.sr.to_word(), 0x2700);
    }

    #[test]
    fn a7_tracks_the_active_stack_pointer() {
        let mut regs = Registers::new();
        regs.ssp = 0x0010_0000;
        regs.usp = 0x0020_0000;

        assert_eq!(regs.a(7), 0x0010_0000);

        regs.sr.supervisor_state = false;
        assert_eq!(regs.a(7), 0x0020_0000);

        regs.set_a(7, 0x0030_0000);
        assert_eq!(regs.usp, 0x0030_0000);
        assert_eq!(regs.ssp, 0x0010_0000);
    }

    #[test]
    fn sr_word_round_trips_without_reserved_bits() {
        let sr = StatusRegister::from_word(0xFFFF);
        // Reserved bits 5-7 and 11 must not survive.
        assert_eq!(sr.to_word(), 0xF71F);
    }

    #[test]
    fn ccr_covers_only_the_flag_bits() {
        let mut sr = StatusRegister::from_word(0x2700);
        sr.set_ccr(0xFF);
        assert_eq!(sr.ccr(), 0x1F);
        assert_eq!(sr.to_word(), 0x271F);
        assert!(sr.supervisor_state);
    }
}
