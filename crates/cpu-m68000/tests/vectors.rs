//! Classifier vectors kept as data, not code, so new cases can be
//! appended without touching the harness.

use cpu_m68000::{InstructionType, opcodes::classify};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Vector {
    opcode: String,
    kind: String,
}

fn kind_by_name(name: &str) -> InstructionType {
    match name {
        "ORI_to_CCR" => InstructionType::OriToCcr,
        "ORI_to_SR" => InstructionType::OriToSr,
        "ORI" => InstructionType::Ori,
        "ANDI_to_CCR" => InstructionType::AndiToCcr,
        "ANDI_to_SR" => InstructionType::AndiToSr,
        "ANDI" => InstructionType::Andi,
        "SUBI" => InstructionType::Subi,
        "ADDI" => InstructionType::Addi,
        "EORI_to_CCR" => InstructionType::EoriToCcr,
        "CMPI" => InstructionType::Cmpi,
        "BTST" => InstructionType::Btst,
        "BSET" => InstructionType::Bset,
        "MOVEP" => InstructionType::Movep,
        "MOVEA" => InstructionType::Movea,
        "MOVE" => InstructionType::Move,
        "MOVE_from_SR" => InstructionType::MoveFromSr,
        "CLR" => InstructionType::Clr,
        "EXT" => InstructionType::Ext,
        "SWAP" => InstructionType::Swap,
        "PEA" => InstructionType::Pea,
        "ILLEGAL" => InstructionType::Illegal,
        "TAS" => InstructionType::Tas,
        "TST" => InstructionType::Tst,
        "TRAP" => InstructionType::Trap,
        "NOP" => InstructionType::Nop,
        "RTS" => InstructionType::Rts,
        "JSR" => InstructionType::Jsr,
        "JMP" => InstructionType::Jmp,
        "MOVEM" => InstructionType::Movem,
        "LEA" => InstructionType::Lea,
        "ADDQ" => InstructionType::Addq,
        "SUBQ" => InstructionType::Subq,
        "Scc" => InstructionType::Scc,
        "DBcc" => InstructionType::Dbcc,
        "BRA" => InstructionType::Bra,
        "BSR" => InstructionType::Bsr,
        "Bcc" => InstructionType::Bcc,
        "MOVEQ" => InstructionType::Moveq,
        "DIVU" => InstructionType::Divu,
        "OR" => InstructionType::Or,
        "SUB" => InstructionType::Sub,
        "SUBA" => InstructionType::Suba,
        "CMP" => InstructionType::Cmp,
        "CMPA" => InstructionType::Cmpa,
        "CMPM" => InstructionType::Cmpm,
        "EOR" => InstructionType::Eor,
        "MULU" => InstructionType::Mulu,
        "EXG" => InstructionType::Exg,
        "AND" => InstructionType::And,
        "ADD" => InstructionType::Add,
        "ADDA" => InstructionType::Adda,
        "ASL" => InstructionType::Asl,
        "LSR" => InstructionType::Lsr,
        "ROXL" => InstructionType::Roxl,
        "ROR" => InstructionType::Ror,
        other => panic!("unknown instruction name in vector: {other}"),
    }
}

const VECTORS: &str = r#"[
    { "opcode": "003C", "kind": "ORI_to_CCR" },
    { "opcode": "007C", "kind": "ORI_to_SR" },
    { "opcode": "0040", "kind": "ORI" },
    { "opcode": "023C", "kind": "ANDI_to_CCR" },
    { "opcode": "027C", "kind": "ANDI_to_SR" },
    { "opcode": "0240", "kind": "ANDI" },
    { "opcode": "0450", "kind": "SUBI" },
    { "opcode": "0690", "kind": "ADDI" },
    { "opcode": "0A3C", "kind": "EORI_to_CCR" },
    { "opcode": "0C80", "kind": "CMPI" },
    { "opcode": "0800", "kind": "BTST" },
    { "opcode": "01D0", "kind": "BSET" },
    { "opcode": "0188", "kind": "MOVEP" },
    { "opcode": "3040", "kind": "MOVEA" },
    { "opcode": "13C0", "kind": "MOVE" },
    { "opcode": "40C0", "kind": "MOVE_from_SR" },
    { "opcode": "4280", "kind": "CLR" },
    { "opcode": "48C0", "kind": "EXT" },
    { "opcode": "4840", "kind": "SWAP" },
    { "opcode": "4850", "kind": "PEA" },
    { "opcode": "4AFC", "kind": "ILLEGAL" },
    { "opcode": "4AD0", "kind": "TAS" },
    { "opcode": "4A80", "kind": "TST" },
    { "opcode": "4E4F", "kind": "TRAP" },
    { "opcode": "4E71", "kind": "NOP" },
    { "opcode": "4E75", "kind": "RTS" },
    { "opcode": "4E90", "kind": "JSR" },
    { "opcode": "4ED0", "kind": "JMP" },
    { "opcode": "48E7", "kind": "MOVEM" },
    { "opcode": "41F8", "kind": "LEA" },
    { "opcode": "5280", "kind": "ADDQ" },
    { "opcode": "5380", "kind": "SUBQ" },
    { "opcode": "57C0", "kind": "Scc" },
    { "opcode": "51C8", "kind": "DBcc" },
    { "opcode": "6004", "kind": "BRA" },
    { "opcode": "6102", "kind": "BSR" },
    { "opcode": "66F8", "kind": "Bcc" },
    { "opcode": "7001", "kind": "MOVEQ" },
    { "opcode": "80C0", "kind": "DIVU" },
    { "opcode": "8080", "kind": "OR" },
    { "opcode": "9080", "kind": "SUB" },
    { "opcode": "91C0", "kind": "SUBA" },
    { "opcode": "B080", "kind": "CMP" },
    { "opcode": "B1C0", "kind": "CMPA" },
    { "opcode": "B348", "kind": "CMPM" },
    { "opcode": "B180", "kind": "EOR" },
    { "opcode": "C0C0", "kind": "MULU" },
    { "opcode": "C188", "kind": "EXG" },
    { "opcode": "C080", "kind": "AND" },
    { "opcode": "D080", "kind": "ADD" },
    { "opcode": "D1C0", "kind": "ADDA" },
    { "opcode": "E180", "kind": "ASL" },
    { "opcode": "E048", "kind": "LSR" },
    { "opcode": "E590", "kind": "ROXL" },
    { "opcode": "E6D8", "kind": "ROR" }
]"#;

#[test]
fn classifier_matches_the_vector_set() {
    let vectors: Vec<Vector> = serde_json::from_str(VECTORS).unwrap();
    assert!(!vectors.is_empty());

    for vector in vectors {
        let opcode = u16::from_str_radix(&vector.opcode, 16).unwrap();
        let expected = kind_by_name(&vector.kind);
        assert_eq!(
            classify(opcode),
            Ok(expected),
            "opcode {opcode:#06X} should classify as {expected:?}"
        );
    }
}
