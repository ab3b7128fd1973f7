//! Instruction execution.
//!
//! Executors consume a decoded [`Instruction`] value and apply it to
//! the register file and bus. Like decoding, dispatch is an `Option`
//! per instruction type so the step loop can tell an unimplemented
//! executor from a failing one.
//!
//! Effective-address arithmetic lives here, not in decode: decode
//! captures the mode payload, execution turns it into a register slot,
//! a bus address, or an immediate value. PC-relative modes use the PC
//! of the instruction being executed; the step loop advances PC only
//! after the executor returns.

use emu_bus::Memory16;

use crate::addressing::{
    AddressingModeData, BriefExtensionWord, ImmediateData, IndexRegisterType, IndexSize,
    OperationSize,
};
use crate::bus;
use crate::error::ExecuteError;
use crate::instruction::Instruction;
use crate::opcodes::InstructionType;
use crate::registers::{Registers, StatusRegister};

/// A per-type executor.
pub type ExecuteFn =
    fn(&mut Registers, &mut dyn Memory16, &Instruction) -> Result<(), ExecuteError>;

/// Look up the executor for an instruction type.
#[must_use]
pub fn executor_for(kind: InstructionType) -> Option<ExecuteFn> {
    match kind {
        InstructionType::Tst => Some(execute_tst),
        InstructionType::Ori => Some(execute_ori),
        InstructionType::OriToCcr => Some(execute_ori_to_ccr),
        InstructionType::OriToSr => Some(execute_ori_to_sr),
        _ => None,
    }
}

const fn size_mask(size: OperationSize) -> u32 {
    match size {
        OperationSize::Byte => 0x0000_00FF,
        OperationSize::Word => 0x0000_FFFF,
        OperationSize::Long => 0xFFFF_FFFF,
    }
}

const fn sign_mask(size: OperationSize) -> u32 {
    match size {
        OperationSize::Byte => 0x0000_0080,
        OperationSize::Word => 0x0000_8000,
        OperationSize::Long => 0x8000_0000,
    }
}

/// Where a resolved operand lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    DataRegister(u8),
    AddressRegister(u8),
    Memory(u32),
    Value(u32),
}

fn index_value(regs: &Registers, extension: BriefExtensionWord) -> u32 {
    let raw = match extension.register_type {
        IndexRegisterType::DataRegister => regs.d(extension.register_num),
        IndexRegisterType::AddressRegister => regs.a(extension.register_num),
    };

    match extension.index_size {
        // Low word of the index register, sign-extended.
        IndexSize::Word => (raw as u16) as i16 as u32,
        IndexSize::Long => raw,
    }
}

const fn immediate_value(data: ImmediateData) -> u32 {
    match data {
        ImmediateData::Byte(b) => b as u32,
        ImmediateData::Word(w) => w as u32,
        ImmediateData::Long(l) => l,
    }
}

/// Byte accesses through A7 keep the stack pointer word-aligned: the
/// post/pre adjustment is 2 even for byte-sized operations.
const fn stride(size: OperationSize, register: u8) -> u32 {
    if register == 7 && matches!(size, OperationSize::Byte) {
        2
    } else {
        size.bytes()
    }
}

/// Turn a mode payload into an operand location, applying any
/// register side effects (postincrement/predecrement) exactly once.
fn resolve(regs: &mut Registers, data: AddressingModeData, size: OperationSize) -> Location {
    match data {
        AddressingModeData::DataRegister { register } => Location::DataRegister(register),
        AddressingModeData::AddressRegister { register } => Location::AddressRegister(register),
        AddressingModeData::Address { register } => Location::Memory(regs.a(register)),
        AddressingModeData::AddressWithPostincrement { register } => {
            let address = regs.a(register);
            regs.set_a(register, address.wrapping_add(stride(size, register)));
            Location::Memory(address)
        }
        AddressingModeData::AddressWithPredecrement { register } => {
            let address = regs.a(register).wrapping_sub(stride(size, register));
            regs.set_a(register, address);
            Location::Memory(address)
        }
        AddressingModeData::AddressWithDisplacement {
            register,
            displacement,
        } => Location::Memory(regs.a(register).wrapping_add(displacement as u32)),
        AddressingModeData::AddressWithIndex {
            register,
            extension,
        } => Location::Memory(
            regs.a(register)
                .wrapping_add(extension.displacement as u32)
                .wrapping_add(index_value(regs, extension)),
        ),
        AddressingModeData::ProgramCounterWithDisplacement { displacement } => {
            Location::Memory(regs.pc.wrapping_add(displacement as u32))
        }
        AddressingModeData::ProgramCounterWithIndex { extension } => Location::Memory(
            regs.pc
                .wrapping_add(extension.displacement as u32)
                .wrapping_add(index_value(regs, extension)),
        ),
        // Short absolute addresses sign-extend into the full range.
        AddressingModeData::AbsoluteShort { address } => {
            Location::Memory((address as i16) as u32)
        }
        AddressingModeData::AbsoluteLong { address } => Location::Memory(address),
        AddressingModeData::Immediate { data } => Location::Value(immediate_value(data)),
    }
}

fn read_operand(
    regs: &Registers,
    mem: &mut dyn Memory16,
    location: Location,
    size: OperationSize,
) -> Result<u32, ExecuteError> {
    let value = match location {
        Location::DataRegister(register) => regs.d(register),
        Location::AddressRegister(register) => regs.a(register),
        Location::Value(value) => value,
        Location::Memory(address) => match size {
            OperationSize::Byte => u32::from(
                bus::read::<u8, _>(mem, address)
                    .map_err(|_| ExecuteError::MemoryReadFailure)?
                    .data,
            ),
            OperationSize::Word => u32::from(
                bus::read::<u16, _>(mem, address)
                    .map_err(|_| ExecuteError::MemoryReadFailure)?
                    .data,
            ),
            OperationSize::Long => {
                bus::read::<u32, _>(mem, address)
                    .map_err(|_| ExecuteError::MemoryReadFailure)?
                    .data
            }
        },
    };

    Ok(value & size_mask(size))
}

fn write_operand(
    regs: &mut Registers,
    mem: &mut dyn Memory16,
    location: Location,
    size: OperationSize,
    value: u32,
) -> Result<(), ExecuteError> {
    match location {
        Location::DataRegister(register) => {
            let mask = size_mask(size);
            let merged = (regs.d(register) & !mask) | (value & mask);
            regs.set_d(register, merged);
            Ok(())
        }
        // Decoders only produce writable destinations; anything else
        // reaching here is an instruction/executor mismatch.
        Location::AddressRegister(_) | Location::Value(_) => Err(ExecuteError::InvalidInstruction),
        Location::Memory(address) => {
            let result = match size {
                OperationSize::Byte => bus::write::<u8, _>(mem, address, (value & 0xFF) as u8),
                OperationSize::Word => bus::write::<u16, _>(mem, address, (value & 0xFFFF) as u16),
                OperationSize::Long => bus::write::<u32, _>(mem, address, value),
            };

            result.map_err(|_| ExecuteError::MemoryWriteFailure)
        }
    }
}

/// Move-style condition codes: N and Z from the result, C and V
/// cleared, X untouched.
fn set_condition_codes(sr: &mut StatusRegister, value: u32, size: OperationSize) {
    sr.negative = value & sign_mask(size) != 0;
    sr.zero = value & size_mask(size) == 0;
    sr.carry = false;
    sr.overflow = false;
}

fn execute_tst(
    regs: &mut Registers,
    mem: &mut dyn Memory16,
    instruction: &Instruction,
) -> Result<(), ExecuteError> {
    let Instruction::Tst(data) = instruction else {
        tracing::error!(?instruction, "TST executor given a different instruction");
        return Err(ExecuteError::InvalidInstruction);
    };

    let location = resolve(regs, data.operand, data.size);
    let value = read_operand(regs, mem, location, data.size)?;

    set_condition_codes(&mut regs.sr, value, data.size);
    Ok(())
}

fn execute_ori(
    regs: &mut Registers,
    mem: &mut dyn Memory16,
    instruction: &Instruction,
) -> Result<(), ExecuteError> {
    let Instruction::Ori(data) = instruction else {
        tracing::error!(?instruction, "ORI executor given a different instruction");
        return Err(ExecuteError::InvalidInstruction);
    };

    // Read-modify-write against one resolved location, so the
    // postincrement/predecrement adjustment happens exactly once.
    let location = resolve(regs, data.destination, data.size);
    let value = read_operand(regs, mem, location, data.size)? | immediate_value(data.data);
    write_operand(regs, mem, location, data.size, value)?;

    set_condition_codes(&mut regs.sr, value, data.size);
    Ok(())
}

fn execute_ori_to_ccr(
    regs: &mut Registers,
    _mem: &mut dyn Memory16,
    instruction: &Instruction,
) -> Result<(), ExecuteError> {
    let Instruction::OriToCcr(data) = instruction else {
        tracing::error!(?instruction, "ORI-to-CCR executor given a different instruction");
        return Err(ExecuteError::InvalidInstruction);
    };

    let ccr = regs.sr.ccr() | data.data;
    regs.sr.set_ccr(ccr);
    Ok(())
}

fn execute_ori_to_sr(
    regs: &mut Registers,
    _mem: &mut dyn Memory16,
    instruction: &Instruction,
) -> Result<(), ExecuteError> {
    let Instruction::OriToSr(data) = instruction else {
        tracing::error!(?instruction, "ORI-to-SR executor given a different instruction");
        return Err(ExecuteError::InvalidInstruction);
    };

    let word = regs.sr.to_word() | data.data;
    regs.sr = StatusRegister::from_word(word);
    Ok(())
}
