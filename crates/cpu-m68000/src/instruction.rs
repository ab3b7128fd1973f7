//! Decoded instruction values.
//!
//! A decoded instruction is a plain value: the tag identifies the
//! instruction type and the payload carries everything its executor
//! needs, so execution never re-reads the instruction stream.

use crate::addressing::{AddressingModeData, ImmediateData, OperationSize};
use crate::opcodes::InstructionType;

/// Payload of a decoded TST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TstData {
    /// Operand size.
    pub size: OperationSize,
    /// Where the tested operand lives.
    pub operand: AddressingModeData,
}

/// Payload of a decoded ORI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriData {
    /// Operand size.
    pub size: OperationSize,
    /// Immediate source operand.
    pub data: ImmediateData,
    /// Data-alterable destination.
    pub destination: AddressingModeData,
}

/// Payload of a decoded ORI to CCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriToCcrData {
    /// Byte ORed into the condition codes.
    pub data: u8,
}

/// Payload of a decoded ORI to SR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriToSrData {
    /// Word ORed into the full status register.
    pub data: u16,
}

/// A fully decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// TST <ea>
    Tst(TstData),
    /// ORI #imm,<ea>
    Ori(OriData),
    /// ORI #imm,CCR
    OriToCcr(OriToCcrData),
    /// ORI #imm,SR
    OriToSr(OriToSrData),
}

impl Instruction {
    /// The instruction type this value decodes.
    #[must_use]
    pub const fn kind(&self) -> InstructionType {
        match self {
            Self::Tst(_) => InstructionType::Tst,
            Self::Ori(_) => InstructionType::Ori,
            Self::OriToCcr(_) => InstructionType::OriToCcr,
            Self::OriToSr(_) => InstructionType::OriToSr,
        }
    }
}

/// A decoded instruction plus its total encoded length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeResult {
    /// The decoded instruction.
    pub instruction: Instruction,
    /// Total length in bytes, opcode word included. Always even.
    pub bytes_read: u32,
}
