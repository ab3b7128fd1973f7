//! Instruction decoding.
//!
//! Decoding is two-phase: [`classify`](crate::opcodes::classify) maps
//! the opcode word to an [`InstructionType`], then a per-type decoder
//! extracts the fields, resolves addressing modes and reads extension
//! words. The dispatch table holds an `Option` per type; a `None` entry
//! is a classified instruction this core does not decode yet, reported
//! distinctly from a malformed one.

use emu_bus::Memory16;

use crate::addressing::{
    AddressingMode, AddressingModeData, AddressingModeDataParams, OperationSize, addressing_mode,
    addressing_mode_data,
};
use crate::bus;
use crate::error::{CpuError, DecodeError};
use crate::instruction::{DecodeResult, Instruction, OriData, OriToCcrData, OriToSrData, TstData};
use crate::opcodes::{InstructionType, classify};

/// Raw inputs to a per-type decoder.
#[derive(Debug, Clone, Copy)]
pub struct DecodeParams {
    /// The already-fetched opcode word.
    pub opcode: u16,
    /// Address the opcode word was fetched from.
    pub address: u32,
}

/// A per-type decoder.
pub type DecodeFn = fn(&mut dyn Memory16, DecodeParams) -> Result<DecodeResult, DecodeError>;

/// Look up the decoder for an instruction type.
#[must_use]
pub fn decoder_for(kind: InstructionType) -> Option<DecodeFn> {
    match kind {
        InstructionType::Tst => Some(decode_tst),
        InstructionType::Ori => Some(decode_ori),
        InstructionType::OriToCcr => Some(decode_ori_to_ccr),
        InstructionType::OriToSr => Some(decode_ori_to_sr),
        _ => None,
    }
}

/// Fetch, classify and decode the instruction at `address`.
pub fn decode<B: Memory16>(bus: &mut B, address: u32) -> Result<DecodeResult, CpuError> {
    let opcode = bus::read::<u16, _>(bus, address).map_err(|_| DecodeError::MemoryReadFailure)?;

    let kind = classify(opcode.data).map_err(|e| {
        tracing::error!(opcode = opcode.data, address, "opcode matches no pattern");
        e
    })?;

    let decode_fn = decoder_for(kind).ok_or(CpuError::UnimplementedInstruction(kind))?;
    let params = DecodeParams {
        opcode: opcode.data,
        address,
    };

    Ok(decode_fn(bus, params)?)
}

/// Shared layout of single-EA opcodes: size in bits 7-6, mode in bits
/// 5-3, register in bits 2-0.
fn size_and_ea(opcode: u16) -> Result<(OperationSize, AddressingMode, u8), DecodeError> {
    let size = OperationSize::from_field(((opcode >> 6) & 0x03) as u8)?;
    let register = (opcode & 0x07) as u8;
    let mode = addressing_mode(((opcode >> 3) & 0x07) as u8, register)?;

    Ok((size, mode, register))
}

fn is_data_alterable(data: AddressingModeData) -> bool {
    !matches!(
        data,
        AddressingModeData::AddressRegister { .. }
            | AddressingModeData::ProgramCounterWithDisplacement { .. }
            | AddressingModeData::ProgramCounterWithIndex { .. }
            | AddressingModeData::Immediate { .. }
    )
}

fn decode_tst(mem: &mut dyn Memory16, params: DecodeParams) -> Result<DecodeResult, DecodeError> {
    let (size, mode, register) = size_and_ea(params.opcode)?;

    let operand = addressing_mode_data(
        mem,
        AddressingModeDataParams {
            op_size: size,
            addressing_mode: mode,
            register_value: register,
            instruction_start_addr: params.address,
        },
    )?;

    Ok(DecodeResult {
        instruction: Instruction::Tst(TstData {
            size,
            operand: operand.data,
        }),
        bytes_read: 2 + operand.bytes_read,
    })
}

fn decode_ori(mem: &mut dyn Memory16, params: DecodeParams) -> Result<DecodeResult, DecodeError> {
    let (size, mode, register) = size_and_ea(params.opcode)?;

    // The destination's extension words sit directly after the opcode
    // word; the immediate source follows them.
    let destination = addressing_mode_data(
        mem,
        AddressingModeDataParams {
            op_size: size,
            addressing_mode: mode,
            register_value: register,
            instruction_start_addr: params.address,
        },
    )?;

    if !is_data_alterable(destination.data) {
        tracing::error!(
            opcode = params.opcode,
            address = params.address,
            "ORI destination is not data-alterable"
        );
        return Err(DecodeError::InvalidAddressingMode);
    }

    let immediate = addressing_mode_data(
        mem,
        AddressingModeDataParams {
            op_size: size,
            addressing_mode: AddressingMode::Immediate,
            register_value: register,
            instruction_start_addr: params.address.wrapping_add(destination.bytes_read),
        },
    )?;
    let AddressingModeData::Immediate { data } = immediate.data else {
        return Err(DecodeError::InvalidInstruction);
    };

    Ok(DecodeResult {
        instruction: Instruction::Ori(OriData {
            size,
            data,
            destination: destination.data,
        }),
        bytes_read: 2 + destination.bytes_read + immediate.bytes_read,
    })
}

fn decode_ori_to_ccr(
    mem: &mut dyn Memory16,
    params: DecodeParams,
) -> Result<DecodeResult, DecodeError> {
    let word = bus::read::<u16, _>(mem, params.address.wrapping_add(2))
        .map_err(|_| DecodeError::MemoryReadFailure)?;

    Ok(DecodeResult {
        instruction: Instruction::OriToCcr(OriToCcrData {
            data: (word.data & 0xFF) as u8,
        }),
        bytes_read: 4,
    })
}

fn decode_ori_to_sr(
    mem: &mut dyn Memory16,
    params: DecodeParams,
) -> Result<DecodeResult, DecodeError> {
    let word = bus::read::<u16, _>(mem, params.address.wrapping_add(2))
        .map_err(|_| DecodeError::MemoryReadFailure)?;

    Ok(DecodeResult {
        instruction: Instruction::OriToSr(OriToSrData { data: word.data }),
        bytes_read: 4,
    })
}

#[cfg(test)]
mod tests {
    use super::decode;
    use crate::addressing::{AddressingModeData, ImmediateData, OperationSize};
    use crate::error::{CpuError, DecodeError};
    use crate::instruction::{Instruction, OriData, OriToCcrData, OriToSrData, TstData};
    use crate::opcodes::InstructionType;
    use emu_bus::Ram;

    fn ram_with_words(words: &[u16]) -> Ram {
        let mut ram = Ram::new(0x100);
        for (i, &word) in words.iter().enumerate() {
            ram.poke_word(i as u32 * 2, word);
        }
        ram
    }

    #[test]
    fn tst_data_register_is_two_bytes() {
        let mut ram = ram_with_words(&[0x4A43]); // TST.W D3

        let result = decode(&mut ram, 0).unwrap();
        assert_eq!(
            result.instruction,
            Instruction::Tst(TstData {
                size: OperationSize::Word,
                operand: AddressingModeData::DataRegister { register: 3 },
            })
        );
        assert_eq!(result.bytes_read, 2);
    }

    #[test]
    fn tst_absolute_long_is_six_bytes() {
        // TST.L (0x00FF8000).L
        let mut ram = ram_with_words(&[0x4AB9, 0x00FF, 0x8000]);

        let result = decode(&mut ram, 0).unwrap();
        assert_eq!(
            result.instruction,
            Instruction::Tst(TstData {
                size: OperationSize::Long,
                operand: AddressingModeData::AbsoluteLong {
                    address: 0x00FF_8000,
                },
            })
        );
        assert_eq!(result.bytes_read, 6);
    }

    #[test]
    fn tst_rejects_invalid_mode_7_registers() {
        let mut ram = ram_with_words(&[0x4A7D]); // TST.W with mode 7, reg 5

        assert_eq!(
            decode(&mut ram, 0),
            Err(CpuError::Decode(DecodeError::InvalidAddressingMode))
        );
    }

    #[test]
    fn ori_to_ccr_reads_the_low_immediate_byte() {
        let mut ram = ram_with_words(&[0x003C, 0x0005]);

        let result = decode(&mut ram, 0).unwrap();
        assert_eq!(
            result.instruction,
            Instruction::OriToCcr(OriToCcrData { data: 0x05 })
        );
        assert_eq!(result.bytes_read, 4);
    }

    #[test]
    fn ori_to_sr_reads_a_full_word() {
        let mut ram = ram_with_words(&[0x007C, 0x0700]);

        let result = decode(&mut ram, 0).unwrap();
        assert_eq!(
            result.instruction,
            Instruction::OriToSr(OriToSrData { data: 0x0700 })
        );
        assert_eq!(result.bytes_read, 4);
    }

    #[test]
    fn ori_word_to_register_is_four_bytes() {
        let mut ram = ram_with_words(&[0x0041, 0x00F0]); // ORI.W #0xF0,D1

        let result = decode(&mut ram, 0).unwrap();
        assert_eq!(
            result.instruction,
            Instruction::Ori(OriData {
                size: OperationSize::Word,
                data: ImmediateData::Word(0x00F0),
                destination: AddressingModeData::DataRegister { register: 1 },
            })
        );
        assert_eq!(result.bytes_read, 4);
    }

    #[test]
    fn ori_long_to_displacement_reads_extension_then_immediate() {
        // ORI.L #0x01020304,(0x0010,A2)
        let mut ram = ram_with_words(&[0x00AA, 0x0010, 0x0102, 0x0304]);

        let result = decode(&mut ram, 0).unwrap();
        assert_eq!(
            result.instruction,
            Instruction::Ori(OriData {
                size: OperationSize::Long,
                data: ImmediateData::Long(0x0102_0304),
                destination: AddressingModeData::AddressWithDisplacement {
                    register: 2,
                    displacement: 0x10,
                },
            })
        );
        assert_eq!(result.bytes_read, 8);
    }

    #[test]
    fn ori_word_to_displacement_takes_the_first_word_as_displacement() {
        // ORI.W #0x2222,(0x1111,A2): the word after the opcode belongs
        // to the destination, the immediate comes after it.
        let mut ram = ram_with_words(&[0x006A, 0x1111, 0x2222]);

        let result = decode(&mut ram, 0).unwrap();
        assert_eq!(
            result.instruction,
            Instruction::Ori(OriData {
                size: OperationSize::Word,
                data: ImmediateData::Word(0x2222),
                destination: AddressingModeData::AddressWithDisplacement {
                    register: 2,
                    displacement: 0x1111,
                },
            })
        );
        assert_eq!(result.bytes_read, 6);
    }

    #[test]
    fn ori_rejects_destinations_that_are_not_data_alterable() {
        // ORI.W #imm,A0 and ORI.W #imm,(d16,PC)
        for opcode in [0x0048u16, 0x007A] {
            let mut ram = ram_with_words(&[opcode, 0x0001, 0x0000]);
            assert_eq!(
                decode(&mut ram, 0),
                Err(CpuError::Decode(DecodeError::InvalidAddressingMode)),
                "opcode {opcode:#06X} accepted"
            );
        }
    }

    #[test]
    fn classified_but_undecoded_types_report_as_unimplemented() {
        let mut ram = ram_with_words(&[0x4E71]); // NOP

        assert_eq!(
            decode(&mut ram, 0),
            Err(CpuError::UnimplementedInstruction(InstructionType::Nop))
        );
    }

    #[test]
    fn unclassifiable_words_report_as_invalid() {
        let mut ram = ram_with_words(&[0xAFFF]);

        assert_eq!(
            decode(&mut ram, 0),
            Err(CpuError::Decode(DecodeError::InvalidInstruction))
        );
    }

    #[test]
    fn fetch_failures_report_as_memory_read() {
        let mut ram = Ram::new(0x4);

        assert_eq!(
            decode(&mut ram, 0x80),
            Err(CpuError::Decode(DecodeError::MemoryReadFailure))
        );
    }
}
