//! Opcode classification.
//!
//! A flat ordered table of (mask, pattern) pairs maps a 16-bit opcode
//! word to its instruction type: the first entry where
//! `(opcode & mask) == pattern` wins. Ordering encodes specificity —
//! exact encodings (ORI to CCR, ILLEGAL, NOP) sit before the families
//! that would otherwise shadow them (ORI, TAS/TST, the 0x4E70 block),
//! memory-form shifts before the register forms whose looser masks
//! overlap them, and the address/extended variants (SUBA/SUBX, CMPA/
//! CMPM) before their general arithmetic families.
//!
//! Linear first-match scanning is a deliberate simplicity tradeoff; the
//! table is 102 entries and classification happens once per decode.

use crate::error::DecodeError;

/// Every instruction type of the 68000 base ISA.
///
/// One tag per mnemonic; encoding variants that share a mnemonic
/// (static/dynamic bit ops, register/memory shifts, the three EXG
/// forms) share a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum InstructionType {
    OriToCcr,
    OriToSr,
    Ori,
    AndiToCcr,
    AndiToSr,
    Andi,
    Subi,
    Addi,
    EoriToCcr,
    EoriToSr,
    Eori,
    Cmpi,
    Btst,
    Bchg,
    Bclr,
    Bset,
    Movep,
    Movea,
    Move,
    MoveFromSr,
    MoveToCcr,
    MoveToSr,
    Negx,
    Clr,
    Neg,
    Not,
    Ext,
    Nbcd,
    Swap,
    Pea,
    Illegal,
    Tas,
    Tst,
    Trap,
    Link,
    Unlk,
    MoveUsp,
    Reset,
    Nop,
    Stop,
    Rte,
    Rts,
    Trapv,
    Rtr,
    Jsr,
    Jmp,
    Movem,
    Lea,
    Chk,
    Addq,
    Subq,
    Scc,
    Dbcc,
    Bra,
    Bsr,
    Bcc,
    Moveq,
    Divu,
    Divs,
    Sbcd,
    Or,
    Sub,
    Subx,
    Suba,
    Eor,
    Cmpm,
    Cmp,
    Cmpa,
    Mulu,
    Muls,
    Abcd,
    Exg,
    And,
    Add,
    Addx,
    Adda,
    Asl,
    Asr,
    Lsl,
    Lsr,
    Roxl,
    Roxr,
    Rol,
    Ror,
}

/// One classification rule: `(opcode & mask) == pattern` selects `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    /// Bits that participate in the match.
    pub mask: u16,
    /// Required value of the masked bits.
    pub pattern: u16,
    /// Instruction type this entry selects.
    pub kind: InstructionType,
}

const fn entry(mask: u16, pattern: u16, kind: InstructionType) -> OpcodeEntry {
    OpcodeEntry {
        mask,
        pattern,
        kind,
    }
}

/// The classification table, ordered most-specific-first.
pub static OPCODE_TABLE: &[OpcodeEntry] = &[
    // Line 0: immediates, bit operations, MOVEP
    entry(0xFFFF, 0x003C, InstructionType::OriToCcr),
    entry(0xFFFF, 0x007C, InstructionType::OriToSr),
    entry(0xFF00, 0x0000, InstructionType::Ori),
    entry(0xFFFF, 0x023C, InstructionType::AndiToCcr),
    entry(0xFFFF, 0x027C, InstructionType::AndiToSr),
    entry(0xFF00, 0x0200, InstructionType::Andi),
    entry(0xFF00, 0x0400, InstructionType::Subi),
    entry(0xFF00, 0x0600, InstructionType::Addi),
    entry(0xFFFF, 0x0A3C, InstructionType::EoriToCcr),
    entry(0xFFFF, 0x0A7C, InstructionType::EoriToSr),
    entry(0xFF00, 0x0A00, InstructionType::Eori),
    entry(0xFF00, 0x0C00, InstructionType::Cmpi),
    // Static (bit number immediate) forms
    entry(0xFFC0, 0x0800, InstructionType::Btst),
    entry(0xFFC0, 0x0840, InstructionType::Bchg),
    entry(0xFFC0, 0x0880, InstructionType::Bclr),
    entry(0xFFC0, 0x08C0, InstructionType::Bset),
    // MOVEP occupies the An-direct hole in the dynamic bit-op space,
    // so it must be tested before them
    entry(0xF138, 0x0108, InstructionType::Movep),
    // Dynamic (bit number in Dn) forms
    entry(0xF1C0, 0x0100, InstructionType::Btst),
    entry(0xF1C0, 0x0140, InstructionType::Bchg),
    entry(0xF1C0, 0x0180, InstructionType::Bclr),
    entry(0xF1C0, 0x01C0, InstructionType::Bset),
    // Lines 1-3: MOVE/MOVEA (destination An selects MOVEA), one entry
    // per size line so unassigned line-0 words stay unmatched
    entry(0xF1C0, 0x1040, InstructionType::Movea),
    entry(0xF1C0, 0x2040, InstructionType::Movea),
    entry(0xF1C0, 0x3040, InstructionType::Movea),
    entry(0xF000, 0x1000, InstructionType::Move),
    entry(0xF000, 0x2000, InstructionType::Move),
    entry(0xF000, 0x3000, InstructionType::Move),
    // Line 4: miscellaneous
    entry(0xFFC0, 0x40C0, InstructionType::MoveFromSr),
    entry(0xFFC0, 0x44C0, InstructionType::MoveToCcr),
    entry(0xFFC0, 0x46C0, InstructionType::MoveToSr),
    entry(0xFF00, 0x4000, InstructionType::Negx),
    entry(0xFF00, 0x4200, InstructionType::Clr),
    entry(0xFF00, 0x4400, InstructionType::Neg),
    entry(0xFF00, 0x4600, InstructionType::Not),
    entry(0xFFB8, 0x4880, InstructionType::Ext),
    entry(0xFFC0, 0x4800, InstructionType::Nbcd),
    entry(0xFFF8, 0x4840, InstructionType::Swap),
    entry(0xFFC0, 0x4840, InstructionType::Pea),
    entry(0xFFFF, 0x4AFC, InstructionType::Illegal),
    entry(0xFFC0, 0x4AC0, InstructionType::Tas),
    entry(0xFF00, 0x4A00, InstructionType::Tst),
    entry(0xFFF0, 0x4E40, InstructionType::Trap),
    entry(0xFFF8, 0x4E50, InstructionType::Link),
    entry(0xFFF8, 0x4E58, InstructionType::Unlk),
    entry(0xFFF0, 0x4E60, InstructionType::MoveUsp),
    entry(0xFFFF, 0x4E70, InstructionType::Reset),
    entry(0xFFFF, 0x4E71, InstructionType::Nop),
    entry(0xFFFF, 0x4E72, InstructionType::Stop),
    entry(0xFFFF, 0x4E73, InstructionType::Rte),
    entry(0xFFFF, 0x4E75, InstructionType::Rts),
    entry(0xFFFF, 0x4E76, InstructionType::Trapv),
    entry(0xFFFF, 0x4E77, InstructionType::Rtr),
    entry(0xFFC0, 0x4E80, InstructionType::Jsr),
    entry(0xFFC0, 0x4EC0, InstructionType::Jmp),
    entry(0xFB80, 0x4880, InstructionType::Movem),
    entry(0xF1C0, 0x41C0, InstructionType::Lea),
    entry(0xF1C0, 0x4180, InstructionType::Chk),
    // Line 5: DBcc/Scc claim the size-field-11 encodings, so they are
    // tested before ADDQ/SUBQ
    entry(0xF0F8, 0x50C8, InstructionType::Dbcc),
    entry(0xF0C0, 0x50C0, InstructionType::Scc),
    entry(0xF100, 0x5000, InstructionType::Addq),
    entry(0xF100, 0x5100, InstructionType::Subq),
    // Line 6: branches
    entry(0xFF00, 0x6000, InstructionType::Bra),
    entry(0xFF00, 0x6100, InstructionType::Bsr),
    entry(0xF000, 0x6000, InstructionType::Bcc),
    // Line 7
    entry(0xF100, 0x7000, InstructionType::Moveq),
    // Line 8: OR family
    entry(0xF1C0, 0x80C0, InstructionType::Divu),
    entry(0xF1C0, 0x81C0, InstructionType::Divs),
    entry(0xF1F0, 0x8100, InstructionType::Sbcd),
    entry(0xF000, 0x8000, InstructionType::Or),
    // Line 9: SUB family (address and extended forms first)
    entry(0xF0C0, 0x90C0, InstructionType::Suba),
    entry(0xF130, 0x9100, InstructionType::Subx),
    entry(0xF000, 0x9000, InstructionType::Sub),
    // Line B: CMP family
    entry(0xF0C0, 0xB0C0, InstructionType::Cmpa),
    entry(0xF138, 0xB108, InstructionType::Cmpm),
    entry(0xF100, 0xB100, InstructionType::Eor),
    entry(0xF100, 0xB000, InstructionType::Cmp),
    // Line C: AND family
    entry(0xF1C0, 0xC0C0, InstructionType::Mulu),
    entry(0xF1C0, 0xC1C0, InstructionType::Muls),
    entry(0xF1F0, 0xC100, InstructionType::Abcd),
    entry(0xF1F8, 0xC140, InstructionType::Exg),
    entry(0xF1F8, 0xC148, InstructionType::Exg),
    entry(0xF1F8, 0xC188, InstructionType::Exg),
    entry(0xF000, 0xC000, InstructionType::And),
    // Line D: ADD family
    entry(0xF0C0, 0xD0C0, InstructionType::Adda),
    entry(0xF130, 0xD100, InstructionType::Addx),
    entry(0xF000, 0xD000, InstructionType::Add),
    // Line E: shifts and rotates. Memory forms use the size-field-11
    // encodings the register-form masks also match, so they go first.
    entry(0xFFC0, 0xE0C0, InstructionType::Asr),
    entry(0xFFC0, 0xE1C0, InstructionType::Asl),
    entry(0xFFC0, 0xE2C0, InstructionType::Lsr),
    entry(0xFFC0, 0xE3C0, InstructionType::Lsl),
    entry(0xFFC0, 0xE4C0, InstructionType::Roxr),
    entry(0xFFC0, 0xE5C0, InstructionType::Roxl),
    entry(0xFFC0, 0xE6C0, InstructionType::Ror),
    entry(0xFFC0, 0xE7C0, InstructionType::Rol),
    entry(0xF118, 0xE000, InstructionType::Asr),
    entry(0xF118, 0xE100, InstructionType::Asl),
    entry(0xF118, 0xE008, InstructionType::Lsr),
    entry(0xF118, 0xE108, InstructionType::Lsl),
    entry(0xF118, 0xE010, InstructionType::Roxr),
    entry(0xF118, 0xE110, InstructionType::Roxl),
    entry(0xF118, 0xE018, InstructionType::Ror),
    entry(0xF118, 0xE118, InstructionType::Rol),
];

/// Classify an opcode word.
///
/// First matching table entry wins; no match means the word encodes no
/// 68000 instruction.
pub fn classify(opcode: u16) -> Result<InstructionType, DecodeError> {
    OPCODE_TABLE
        .iter()
        .find(|entry| opcode & entry.mask == entry.pattern)
        .map(|entry| entry.kind)
        .ok_or(DecodeError::InvalidInstruction)
}
