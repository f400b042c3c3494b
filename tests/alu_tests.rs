//! Unit tests for ALU operations.

use pipeline_sim::core::pipeline::signals::AluOp;
use pipeline_sim::core::units::alu::Alu;
use rstest::rstest;

/// Tests each operation on ordinary operands.
#[rstest]
#[case(AluOp::Add, 10, 20, 30)]
#[case(AluOp::Add, -5, 3, -2)]
#[case(AluOp::Sub, 30, 10, 20)]
#[case(AluOp::Sub, 0, 1, -1)]
#[case(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case(AluOp::Or, 0b1100, 0b1010, 0b1110)]
fn test_alu_ops(#[case] op: AluOp, #[case] a: i32, #[case] b: i32, #[case] expected: i32) {
    assert_eq!(Alu::execute(op, a, b), expected);
}

/// Tests that addition wraps instead of panicking on overflow.
#[test]
fn test_alu_add_wraps() {
    assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), i32::MIN);
    assert_eq!(Alu::execute(AluOp::Add, -1, -1), -2);
}

/// Tests that subtraction wraps instead of panicking on overflow.
#[test]
fn test_alu_sub_wraps() {
    assert_eq!(Alu::execute(AluOp::Sub, i32::MIN, 1), i32::MAX);
}

/// Tests logical operations on negative operands.
#[test]
fn test_alu_logic_negative() {
    assert_eq!(Alu::execute(AluOp::And, -1, 0x0F0F), 0x0F0F);
    assert_eq!(Alu::execute(AluOp::Or, i32::MIN, 1), i32::MIN + 1);
}
