//! Tests for the register file and data memory.

use pipeline_sim::core::arch::Gpr;
use pipeline_sim::core::cpu::DataMemory;

/// Tests that R0 discards writes.
#[test]
fn test_gpr_zero_register() {
    let mut regs = Gpr::new();
    regs.write(0, 1234);
    assert_eq!(regs.read(0), 0, "R0 must stay zero");
}

/// Tests writing and reading every register.
#[test]
fn test_gpr_all_registers() {
    let mut regs = Gpr::new();
    for i in 0..32u8 {
        regs.write(i, i32::from(i) * 1000 - 7);
    }
    for i in 1..32u8 {
        assert_eq!(regs.read(i), i32::from(i) * 1000 - 7);
    }
    assert_eq!(regs.read(0), 0);
    assert_eq!(regs.as_slice().len(), 32);
}

/// Tests that out-of-range register indices are ignored.
#[test]
fn test_gpr_out_of_range() {
    let mut regs = Gpr::new();
    regs.write(40, 9);
    assert_eq!(regs.read(40), 0);
    assert_eq!(regs, Gpr::new());
}

/// Tests that a clone is unaffected by writes to the original.
#[test]
fn test_gpr_copy_on_write() {
    let mut regs = Gpr::new();
    regs.write(3, 30);
    let saved = regs.clone();
    assert!(saved.shares_storage(&regs), "clone should share until written");

    regs.write(3, 31);
    assert!(!saved.shares_storage(&regs));
    assert_eq!(saved.read(3), 30);
    assert_eq!(regs.read(3), 31);
}

/// Tests that the dump lists every register.
#[test]
fn test_gpr_dump() {
    let mut regs = Gpr::new();
    regs.write(31, -1);
    let dump = regs.dump();
    assert_eq!(dump.lines().count(), 8);
    assert!(dump.contains("R31"));
    assert!(dump.contains("-1"));
}

/// Tests word addressing: the low two address bits are ignored.
#[test]
fn test_memory_word_addressing() {
    let mut mem = DataMemory::new(16);
    mem.write(8, 42);
    assert_eq!(mem.read(8), 42);
    assert_eq!(mem.read(9), 42);
    assert_eq!(mem.read(11), 42);
    assert_eq!(mem.read(12), 0);
    assert_eq!(mem.as_slice()[2], 42);
}

/// Tests that out-of-range accesses read zero and drop writes.
#[test]
fn test_memory_out_of_range() {
    let mut mem = DataMemory::new(4);
    assert!(!mem.contains(16));
    assert_eq!(mem.read(16), 0);
    mem.write(16, 5);
    mem.write(-4i32 as u32, 5);
    assert_eq!(mem.as_slice(), &[0, 0, 0, 0]);
    assert_eq!(mem.len(), 4);
}

/// Tests that a clone is unaffected by writes to the original.
#[test]
fn test_memory_copy_on_write() {
    let mut mem = DataMemory::new(8);
    let saved = mem.clone();
    mem.write(0, 1);
    assert_eq!(saved.read(0), 0);
    assert_eq!(mem.read(0), 1);
    assert!(!saved.shares_storage(&mem));
}
