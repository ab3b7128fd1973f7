//! The fetch/decode/execute core.

use emu_bus::Memory16;

use crate::bus;
use crate::decode::decode;
use crate::error::CpuError;
use crate::execute::executor_for;
use crate::instruction::DecodeResult;
use crate::registers::Registers;

/// A 68000 core bound to a bus.
pub struct Cpu<B: Memory16> {
    registers: Registers,
    bus: B,
}

impl<B: Memory16> Cpu<B> {
    /// Create a core over `bus` with registers in reset state.
    ///
    /// No vectors are fetched until [`reset`](Self::reset) runs.
    pub fn new(bus: B) -> Self {
        Self {
            registers: Registers::new(),
            bus,
        }
    }

    /// The register file.
    #[must_use]
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Mutable access to the register file (test setup, debuggers).
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    /// The bus this core drives.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Run the power-on reset sequence.
    ///
    /// Forces supervisor state and interrupt mask 7, then loads SSP from
    /// the long word at address 0 and PC from the long word at address 4.
    pub fn reset(&mut self) -> Result<(), CpuError> {
        self.registers.sr.supervisor_state = true;
        self.registers.sr.interrupt_mask = 7;

        let ssp = bus::read::<u32, _>(&mut self.bus, 0).map_err(CpuError::ResetVectorRead)?;
        let pc = bus::read::<u32, _>(&mut self.bus, 4).map_err(CpuError::ResetVectorRead)?;

        self.registers.ssp = ssp.data;
        self.registers.pc = pc.data;
        Ok(())
    }

    /// Execute one instruction at PC.
    ///
    /// PC advances past the instruction only after its executor
    /// succeeds, so executors observe PC at the instruction start. Any
    /// failure leaves PC unchanged and is fatal to this step; the caller
    /// decides whether to halt or reset.
    pub fn step(&mut self) -> Result<DecodeResult, CpuError> {
        let pc = self.registers.pc;
        let decoded = decode(&mut self.bus, pc).map_err(|e| {
            tracing::error!(pc, "decode failed: {e}");
            e
        })?;

        let kind = decoded.instruction.kind();
        let execute_fn = executor_for(kind).ok_or(CpuError::UnimplementedInstruction(kind))?;
        execute_fn(&mut self.registers, &mut self.bus, &decoded.instruction).map_err(|e| {
            tracing::error!(pc, ?kind, "execute failed: {e}");
            CpuError::from(e)
        })?;

        self.registers.pc = pc.wrapping_add(decoded.bytes_read);
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::Cpu;
    use crate::error::{CpuError, DecodeError};
    use crate::opcodes::InstructionType;
    use emu_bus::{MemoryAccessError, Ram};

    fn machine(program: &[u16]) -> Cpu<Ram> {
        let mut ram = Ram::new(0x1000);
        ram.poke_long(0, 0x0000_0F00); // initial SSP
        ram.poke_long(4, 0x0000_0400); // initial PC
        for (i, &word) in program.iter().enumerate() {
            ram.poke_word(0x400 + i as u32 * 2, word);
        }
        Cpu::new(ram)
    }

    #[test]
    fn reset_loads_the_vectors_and_forces_supervisor() {
        let mut cpu = machine(&[]);
        cpu.registers_mut().sr.supervisor_state = false;
        cpu.registers_mut().sr.interrupt_mask = 0;

        cpu.reset().unwrap();

        assert_eq!(cpu.registers().ssp, 0x0000_0F00);
        assert_eq!(cpu.registers().pc, 0x0000_0400);
        assert!(cpu.registers().sr.supervisor_state);
        assert_eq!(cpu.registers().sr.interrupt_mask, 7);
        assert_eq!(cpu.registers().a(7), 0x0000_0F00);
    }

    #[test]
    fn reset_fails_without_readable_vectors() {
        let mut cpu = Cpu::new(Ram::new(0));

        assert_eq!(
            cpu.reset(),
            Err(CpuError::ResetVectorRead(
                MemoryAccessError::ReadFromUnmappedAddress
            ))
        );
    }

    #[test]
    fn step_advances_pc_by_the_instruction_length() {
        // TST.W D0 (2 bytes), then ORI #5,CCR (4 bytes)
        let mut cpu = machine(&[0x4A40, 0x003C, 0x0005]);
        cpu.reset().unwrap();

        let first = cpu.step().unwrap();
        assert_eq!(first.bytes_read, 2);
        assert_eq!(cpu.registers().pc, 0x402);
        assert!(cpu.registers().sr.zero);

        let second = cpu.step().unwrap();
        assert_eq!(second.bytes_read, 4);
        assert_eq!(cpu.registers().pc, 0x406);
        assert!(cpu.registers().sr.carry);
        assert!(cpu.registers().sr.zero);
    }

    #[test]
    fn step_leaves_pc_alone_on_failure() {
        let mut cpu = machine(&[0x4E71]); // NOP: classified, no executor
        cpu.reset().unwrap();

        assert_eq!(
            cpu.step(),
            Err(CpuError::UnimplementedInstruction(InstructionType::Nop))
        );
        assert_eq!(cpu.registers().pc, 0x400);
    }

    #[test]
    fn step_reports_malformed_opcodes() {
        let mut cpu = machine(&[0xFFFF]);
        cpu.reset().unwrap();

        assert_eq!(
            cpu.step(),
            Err(CpuError::Decode(DecodeError::InvalidInstruction))
        );
    }
}
