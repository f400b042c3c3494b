//! Tests for opcode and instruction definitions.

use pipeline_sim::isa::{Instruction, Opcode};

/// Tests case-insensitive mnemonic lookup.
#[test]
fn test_opcode_from_mnemonic() {
    assert_eq!(Opcode::from_mnemonic("add"), Some(Opcode::Add));
    assert_eq!(Opcode::from_mnemonic("Beq"), Some(Opcode::Beq));
    assert_eq!(Opcode::from_mnemonic("NOP"), Some(Opcode::Nop));
    assert_eq!(Opcode::from_mnemonic("ADDI"), None);
    assert_eq!(Opcode::from_mnemonic(""), None);
}

/// Tests that every opcode round-trips through its mnemonic.
#[test]
fn test_opcode_mnemonics() {
    for op in Opcode::ALL {
        assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(op));
        assert_eq!(op.to_string(), op.mnemonic());
    }
}

/// Tests source register enumeration.
#[test]
fn test_instruction_sources() {
    let add = Instruction::new(Opcode::Add, 0)
        .with_dest(1)
        .with_sources(Some(2), Some(3));
    assert_eq!(add.sources().collect::<Vec<_>>(), vec![2, 3]);
    assert!(add.reads(3));
    assert!(!add.reads(1), "destination is not a source");

    let lw = Instruction::new(Opcode::Lw, 4)
        .with_dest(5)
        .with_sources(Some(6), Some(5))
        .with_imm(8);
    assert_eq!(lw.sources().collect::<Vec<_>>(), vec![6]);
    assert!(!lw.reads(5), "load target is not a hazard source");

    assert_eq!(Instruction::new(Opcode::Nop, 8).sources().count(), 0);
}

/// Tests display text.
#[test]
fn test_instruction_display() {
    let inst = Instruction::new(Opcode::Beq, 0)
        .with_branch_target(12)
        .with_text("BEQ R1, R2, END");
    assert_eq!(inst.to_string(), "BEQ R1, R2, END");
    assert_eq!(Instruction::new(Opcode::Sub, 0).to_string(), "SUB");
}
