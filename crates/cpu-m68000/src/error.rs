//! Error taxonomy for decode and execute.
//!
//! Nothing here is retried or recovered inside the core: every fallible
//! operation returns a `Result`, and each caller either forwards the
//! error or maps it to the broader kind at its layer. The instruction
//! fetch loop treats any of these as fatal to the current step; a
//! future illegal-instruction trap path can reuse the same kinds.

use std::fmt;

use emu_bus::MemoryAccessError;

use crate::opcodes::InstructionType;

/// Failures during classification, field extraction, or addressing-mode
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A register field held a value outside 0-7.
    InvalidRegisterValue,
    /// A mode field held a value outside the encodable range.
    InvalidModeValue,
    /// The mode/register pair selects no defined addressing mode.
    InvalidAddressingMode,
    /// The opcode word matches no table entry, or a field combination
    /// the matched instruction cannot encode.
    InvalidInstruction,
    /// A bus read failed while fetching opcode or extension words.
    MemoryReadFailure,
    /// The index extension word is not a valid brief extension word.
    InvalidBriefExtensionWord,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::InvalidRegisterValue => "invalid register value",
            Self::InvalidModeValue => "invalid mode value",
            Self::InvalidAddressingMode => "invalid addressing mode",
            Self::InvalidInstruction => "invalid instruction",
            Self::MemoryReadFailure => "memory read failure during decode",
            Self::InvalidBriefExtensionWord => "invalid brief extension word",
        };
        f.write_str(text)
    }
}

impl std::error::Error for DecodeError {}

/// Failures while executing a decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteError {
    /// A bus read failed while fetching an operand.
    MemoryReadFailure,
    /// A bus write failed while storing a result.
    MemoryWriteFailure,
    /// The instruction handed to an executor is not its type.
    InvalidInstruction,
    /// The operation size is not valid for this instruction.
    InvalidOperationSize,
}

impl fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MemoryReadFailure => "memory read failure during execute",
            Self::MemoryWriteFailure => "memory write failure during execute",
            Self::InvalidInstruction => "instruction/executor type mismatch",
            Self::InvalidOperationSize => "invalid operation size",
        };
        f.write_str(text)
    }
}

impl std::error::Error for ExecuteError {}

/// Fatal failure of one fetch/decode/execute step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// Decoding the instruction at PC failed.
    Decode(DecodeError),
    /// The decoded instruction's executor failed.
    Execute(ExecuteError),
    /// The instruction decoded to a type with no registered executor.
    UnimplementedInstruction(InstructionType),
    /// The reset vector read at address 0/4 failed.
    ResetVectorRead(MemoryAccessError),
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "decode failed: {e}"),
            Self::Execute(e) => write!(f, "execute failed: {e}"),
            Self::UnimplementedInstruction(kind) => {
                write!(f, "no executor registered for {kind:?}")
            }
            Self::ResetVectorRead(e) => write!(f, "reset vector read failed: {e}"),
        }
    }
}

impl std::error::Error for CpuError {}

impl From<DecodeError> for CpuError {
    fn from(error: DecodeError) -> Self {
        Self::Decode(error)
    }
}

impl From<ExecuteError> for CpuError {
    fn from(error: ExecuteError) -> Self {
        Self::Execute(error)
    }
}
