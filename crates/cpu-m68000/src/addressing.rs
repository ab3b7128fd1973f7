//! Addressing-mode resolution.
//!
//! An effective-address field is 6 bits: a 3-bit mode and a 3-bit
//! register. Modes 0-6 map directly; mode 7 re-purposes the register
//! field as a sub-selector for the extended modes (absolute, PC-relative
//! and immediate). Resolution is two steps:
//!
//! 1. [`addressing_mode`] — pure mapping of the bit fields to a mode,
//!    no bus access
//! 2. [`addressing_mode_data`] — reads whatever extension words the mode
//!    needs (displacement, index extension word, absolute address,
//!    immediate) and returns the mode's payload plus the bytes consumed

use emu_bus::Memory16;

use crate::bus;
use crate::error::DecodeError;

/// Operand size of a sized instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationSize {
    /// 8-bit operation.
    Byte,
    /// 16-bit operation.
    Word,
    /// 32-bit operation.
    Long,
}

impl OperationSize {
    /// Decode the shared 2-bit size field (0=byte, 1=word, 2=long).
    pub fn from_field(value: u8) -> Result<Self, DecodeError> {
        match value {
            0 => Ok(Self::Byte),
            1 => Ok(Self::Word),
            2 => Ok(Self::Long),
            _ => Err(DecodeError::InvalidInstruction),
        }
    }

    /// Operand width in bytes.
    #[must_use]
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Word => 2,
            Self::Long => 4,
        }
    }
}

/// The twelve 68000 addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// Dn — operand lives in a data register.
    DataRegister,
    /// An — operand lives in an address register.
    AddressRegister,
    /// (An) — memory at the address register.
    Address,
    /// (An)+ — memory at An, then An += size.
    AddressWithPostincrement,
    /// -(An) — An -= size, then memory at An.
    AddressWithPredecrement,
    /// (d16,An) — memory at An plus a signed 16-bit displacement.
    AddressWithDisplacement,
    /// (d8,An,Xn) — memory at An plus brief-extension displacement and index.
    AddressWithIndex,
    /// (d16,PC) — PC-relative with a signed 16-bit displacement.
    ProgramCounterWithDisplacement,
    /// (d8,PC,Xn) — PC-relative with displacement and index.
    ProgramCounterWithIndex,
    /// (xxx).W — absolute 16-bit address, sign behavior per instruction.
    AbsoluteShort,
    /// (xxx).L — absolute 32-bit address.
    AbsoluteLong,
    /// #imm — operand follows the opcode in the instruction stream.
    Immediate,
}

/// Which register file an index register selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRegisterType {
    /// Index is Dn.
    DataRegister,
    /// Index is An.
    AddressRegister,
}

/// How much of the index register participates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSize {
    /// Sign-extended low word of the index register.
    Word,
    /// Full 32-bit index register.
    Long,
}

/// Decoded brief extension word for the indexed modes.
///
/// Bit layout:
/// - Bits 0-7: signed 8-bit displacement
/// - Bit 8: full-extension-word indicator (68020+; invalid here)
/// - Bits 9-10: reserved, must be zero in the brief format
/// - Bit 11: index size (0 = word, 1 = long)
/// - Bits 12-14: index register number
/// - Bit 15: index register type (0 = data, 1 = address)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BriefExtensionWord {
    /// Signed 8-bit displacement.
    pub displacement: i8,
    /// Index register number, 0-7.
    pub register_num: u8,
    /// Data or address register file.
    pub register_type: IndexRegisterType,
    /// Word (sign-extended) or long index.
    pub index_size: IndexSize,
}

impl BriefExtensionWord {
    /// Decode an extension word fetched from the instruction stream.
    ///
    /// The 68000 only knows the brief format; a set scale/full indicator
    /// or reserved bit marks the word as malformed for this CPU.
    pub fn decode(word: u16) -> Result<Self, DecodeError> {
        if word & 0x0700 != 0 {
            return Err(DecodeError::InvalidBriefExtensionWord);
        }

        Ok(Self {
            displacement: (word & 0x00FF) as i8,
            register_num: ((word >> 12) & 0x07) as u8,
            register_type: if word & 0x8000 != 0 {
                IndexRegisterType::AddressRegister
            } else {
                IndexRegisterType::DataRegister
            },
            index_size: if word & 0x0800 != 0 {
                IndexSize::Long
            } else {
                IndexSize::Word
            },
        })
    }

    /// Re-assemble the 16-bit encoding.
    #[must_use]
    pub fn encode(self) -> u16 {
        let mut word = u16::from(self.displacement as u8);
        if self.index_size == IndexSize::Long {
            word |= 0x0800;
        }
        word |= u16::from(self.register_num & 0x07) << 12;
        if self.register_type == IndexRegisterType::AddressRegister {
            word |= 0x8000;
        }
        word
    }
}

/// Immediate operand, tagged by operation size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmediateData {
    /// 8-bit immediate (occupies a full word slot in the stream).
    Byte(u8),
    /// 16-bit immediate.
    Word(u16),
    /// 32-bit immediate.
    Long(u32),
}

/// Payload of a resolved addressing mode.
///
/// One closed union shared by value across every instruction that
/// carries an operand location; each variant holds only what its mode
/// needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingModeData {
    /// Dn.
    DataRegister {
        /// Register number, 0-7.
        register: u8,
    },
    /// An.
    AddressRegister {
        /// Register number, 0-7.
        register: u8,
    },
    /// (An).
    Address {
        /// Register number, 0-7.
        register: u8,
    },
    /// (An)+.
    AddressWithPostincrement {
        /// Register number, 0-7.
        register: u8,
    },
    /// -(An).
    AddressWithPredecrement {
        /// Register number, 0-7.
        register: u8,
    },
    /// (d16,An).
    AddressWithDisplacement {
        /// Register number, 0-7.
        register: u8,
        /// Signed 16-bit displacement.
        displacement: i16,
    },
    /// (d8,An,Xn).
    AddressWithIndex {
        /// Register number, 0-7.
        register: u8,
        /// Decoded brief extension word.
        extension: BriefExtensionWord,
    },
    /// (d16,PC).
    ProgramCounterWithDisplacement {
        /// Signed 16-bit displacement.
        displacement: i16,
    },
    /// (d8,PC,Xn).
    ProgramCounterWithIndex {
        /// Decoded brief extension word.
        extension: BriefExtensionWord,
    },
    /// (xxx).W.
    AbsoluteShort {
        /// 16-bit absolute address.
        address: u16,
    },
    /// (xxx).L.
    AbsoluteLong {
        /// 32-bit absolute address.
        address: u32,
    },
    /// #imm.
    Immediate {
        /// Size-tagged immediate value.
        data: ImmediateData,
    },
}

/// Result of resolving a mode's extension words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressingModeDataResult {
    /// The mode payload.
    pub data: AddressingModeData,
    /// Extension bytes consumed after the opcode word (0, 2 or 4).
    pub bytes_read: u32,
}

/// Inputs to [`addressing_mode_data`].
#[derive(Debug, Clone, Copy)]
pub struct AddressingModeDataParams {
    /// Operand size (selects immediate width).
    pub op_size: OperationSize,
    /// The resolved addressing mode.
    pub addressing_mode: AddressingMode,
    /// The raw 3-bit register field value.
    pub register_value: u8,
    /// Address of the opcode word; extension words start at +2.
    pub instruction_start_addr: u32,
}

/// Map the 3-bit mode and register fields to an addressing mode.
///
/// No bus access. Mode 7 sub-selects on the register field; register
/// values 5-7 under mode 7 are undefined on the 68000.
pub fn addressing_mode(mode_value: u8, register_value: u8) -> Result<AddressingMode, DecodeError> {
    if mode_value > 7 || register_value > 7 {
        return Err(DecodeError::InvalidAddressingMode);
    }

    match mode_value {
        0 => Ok(AddressingMode::DataRegister),
        1 => Ok(AddressingMode::AddressRegister),
        2 => Ok(AddressingMode::Address),
        3 => Ok(AddressingMode::AddressWithPostincrement),
        4 => Ok(AddressingMode::AddressWithPredecrement),
        5 => Ok(AddressingMode::AddressWithDisplacement),
        6 => Ok(AddressingMode::AddressWithIndex),
        7 => match register_value {
            0 => Ok(AddressingMode::AbsoluteShort),
            1 => Ok(AddressingMode::AbsoluteLong),
            2 => Ok(AddressingMode::ProgramCounterWithDisplacement),
            3 => Ok(AddressingMode::ProgramCounterWithIndex),
            4 => Ok(AddressingMode::Immediate),
            _ => Err(DecodeError::InvalidAddressingMode),
        },
        _ => Err(DecodeError::InvalidAddressingMode),
    }
}

fn validated_register(register_value: u8) -> Result<u8, DecodeError> {
    if register_value > 7 {
        return Err(DecodeError::InvalidRegisterValue);
    }

    Ok(register_value)
}

/// Read a mode's extension words and build its payload.
///
/// Register-direct and plain indirect modes consume nothing; the
/// displacement/index/absolute/immediate modes read their extension
/// words starting at the word after the opcode. Bus failures remap to
/// [`DecodeError::MemoryReadFailure`].
pub fn addressing_mode_data<B: Memory16 + ?Sized>(
    mem: &mut B,
    params: AddressingModeDataParams,
) -> Result<AddressingModeDataResult, DecodeError> {
    let ext_addr = params.instruction_start_addr.wrapping_add(2);

    match params.addressing_mode {
        AddressingMode::DataRegister => Ok(AddressingModeDataResult {
            data: AddressingModeData::DataRegister {
                register: validated_register(params.register_value)?,
            },
            bytes_read: 0,
        }),

        AddressingMode::AddressRegister => Ok(AddressingModeDataResult {
            data: AddressingModeData::AddressRegister {
                register: validated_register(params.register_value)?,
            },
            bytes_read: 0,
        }),

        AddressingMode::Address => Ok(AddressingModeDataResult {
            data: AddressingModeData::Address {
                register: validated_register(params.register_value)?,
            },
            bytes_read: 0,
        }),

        AddressingMode::AddressWithPostincrement => Ok(AddressingModeDataResult {
            data: AddressingModeData::AddressWithPostincrement {
                register: validated_register(params.register_value)?,
            },
            bytes_read: 0,
        }),

        AddressingMode::AddressWithPredecrement => Ok(AddressingModeDataResult {
            data: AddressingModeData::AddressWithPredecrement {
                register: validated_register(params.register_value)?,
            },
            bytes_read: 0,
        }),

        AddressingMode::AddressWithDisplacement => {
            let register = validated_register(params.register_value)?;
            let displacement = bus::read::<i16, _>(mem, ext_addr)
                .map_err(|_| DecodeError::MemoryReadFailure)?;

            Ok(AddressingModeDataResult {
                data: AddressingModeData::AddressWithDisplacement {
                    register,
                    displacement: displacement.data,
                },
                bytes_read: 2,
            })
        }

        AddressingMode::AddressWithIndex => {
            let register = validated_register(params.register_value)?;
            let word = bus::read::<u16, _>(mem, ext_addr)
                .map_err(|_| DecodeError::MemoryReadFailure)?;

            Ok(AddressingModeDataResult {
                data: AddressingModeData::AddressWithIndex {
                    register,
                    extension: BriefExtensionWord::decode(word.data)?,
                },
                bytes_read: 2,
            })
        }

        AddressingMode::ProgramCounterWithDisplacement => {
            let displacement = bus::read::<i16, _>(mem, ext_addr)
                .map_err(|_| DecodeError::MemoryReadFailure)?;

            Ok(AddressingModeDataResult {
                data: AddressingModeData::ProgramCounterWithDisplacement {
                    displacement: displacement.data,
                },
                bytes_read: 2,
            })
        }

        AddressingMode::ProgramCounterWithIndex => {
            let word = bus::read::<u16, _>(mem, ext_addr)
                .map_err(|_| DecodeError::MemoryReadFailure)?;

            Ok(AddressingModeDataResult {
                data: AddressingModeData::ProgramCounterWithIndex {
                    extension: BriefExtensionWord::decode(word.data)?,
                },
                bytes_read: 2,
            })
        }

        AddressingMode::AbsoluteShort => {
            let word = bus::read::<u16, _>(mem, ext_addr)
                .map_err(|_| DecodeError::MemoryReadFailure)?;

            Ok(AddressingModeDataResult {
                data: AddressingModeData::AbsoluteShort { address: word.data },
                bytes_read: 2,
            })
        }

        AddressingMode::AbsoluteLong => {
            let long = bus::read::<u32, _>(mem, ext_addr)
                .map_err(|_| DecodeError::MemoryReadFailure)?;

            Ok(AddressingModeDataResult {
                data: AddressingModeData::AbsoluteLong { address: long.data },
                bytes_read: 4,
            })
        }

        AddressingMode::Immediate => match params.op_size {
            OperationSize::Byte => {
                // Byte immediates still occupy a full word slot; the
                // value is the low byte.
                let word = bus::read::<u16, _>(mem, ext_addr)
                    .map_err(|_| DecodeError::MemoryReadFailure)?;

                Ok(AddressingModeDataResult {
                    data: AddressingModeData::Immediate {
                        data: ImmediateData::Byte((word.data & 0xFF) as u8),
                    },
                    bytes_read: 2,
                })
            }
            OperationSize::Word => {
                let word = bus::read::<u16, _>(mem, ext_addr)
                    .map_err(|_| DecodeError::MemoryReadFailure)?;

                Ok(AddressingModeDataResult {
                    data: AddressingModeData::Immediate {
                        data: ImmediateData::Word(word.data),
                    },
                    bytes_read: 2,
                })
            }
            OperationSize::Long => {
                let long = bus::read::<u32, _>(mem, ext_addr)
                    .map_err(|_| DecodeError::MemoryReadFailure)?;

                Ok(AddressingModeDataResult {
                    data: AddressingModeData::Immediate {
                        data: ImmediateData::Long(long.data),
                    },
                    bytes_read: 4,
                })
            }
        },
    }
}
