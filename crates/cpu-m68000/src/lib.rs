//! Motorola 68000 CPU core.
//!
//! Decode-to-value pipeline over a word-granular bus:
//!
//! - [`opcodes`] — ordered mask/pattern table classifying opcode words
//! - [`addressing`] — effective-address field resolution and extension
//!   word reads
//! - [`decode`] — per-type decoders producing [`Instruction`] values
//!   plus their encoded length
//! - [`execute`] — per-type executors applying instructions to the
//!   register file and bus
//! - [`cpu`] — reset vectors and the step loop tying it together
//!
//! Decoding and execution are table-driven with one optional slot per
//! instruction type; unimplemented types are classified and reported,
//! never silently skipped.

pub mod addressing;
pub mod bus;
pub mod cpu;
pub mod decode;
pub mod error;
pub mod execute;
pub mod instruction;
pub mod opcodes;
pub mod registers;

pub use addressing::{
    AddressingMode, AddressingModeData, BriefExtensionWord, ImmediateData, IndexRegisterType,
    IndexSize, OperationSize,
};
pub use cpu::Cpu;
pub use error::{CpuError, DecodeError, ExecuteError};
pub use instruction::{DecodeResult, Instruction};
pub use opcodes::InstructionType;
pub use registers::{Registers, StatusRegister};
