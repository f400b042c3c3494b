//! Two-pass assembler.
//!
//! The first pass strips comments, records labels against the address of the
//! next instruction and splits each remaining line into a mnemonic and its
//! comma-separated operands. The second pass decodes every line, resolving
//! branch labels against the table built in the first pass.
//!
//! Errors never stop assembly: every bad line contributes one [`ParseError`]
//! and parsing continues, so the caller sees every problem at once.

/// Operand tokenizer.
pub mod lex;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::common::{ParseError, ParseErrorKind, WORD_BYTES};
use crate::isa::{Instruction, Opcode};
use lex::{tokenize, Token};

/// Outcome of assembling a source text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// Successfully decoded instructions, in program order.
    pub instructions: Vec<Instruction>,
    /// One entry per rejected line.
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Whether the source assembled without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A source line that holds an instruction, after label handling.
struct SourceLine<'a> {
    line: usize,
    text: &'a str,
    mnemonic: &'a str,
    operands: Vec<&'a str>,
    pc: u32,
}

/// Assembles a program.
///
/// # Arguments
///
/// * `source` - Assembly text, one instruction per line. `#` starts a
///   comment and `label:` may prefix an instruction or stand alone.
///
/// # Returns
///
/// The decoded instructions together with every error found.
pub fn parse(source: &str) -> ParseResult {
    let mut errors = Vec::new();
    let mut labels: HashMap<&str, u32> = HashMap::new();
    let mut lines = Vec::new();
    let mut pc: u32 = 0;

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }

        let mut rest = text;
        if let Some((label, after)) = text.split_once(':') {
            let label = label.trim();
            if !is_label(label) {
                errors.push(ParseError::new(
                    line,
                    ParseErrorKind::InvalidLabel(label.to_string()),
                ));
            } else if labels.contains_key(label) {
                errors.push(ParseError::new(
                    line,
                    ParseErrorKind::DuplicateLabel(label.to_string()),
                ));
            } else {
                labels.insert(label, pc);
            }
            rest = after.trim();
            if rest.is_empty() {
                continue;
            }
        }

        let (mnemonic, operand_text) = match rest.split_once(char::is_whitespace) {
            Some((mnemonic, tail)) => (mnemonic, tail.trim()),
            None => (rest, ""),
        };
        let operands = operand_text
            .split(',')
            .map(str::trim)
            .filter(|op| !op.is_empty())
            .collect();

        lines.push(SourceLine {
            line,
            text,
            mnemonic,
            operands,
            pc,
        });
        pc += WORD_BYTES;
    }

    let mut instructions = Vec::with_capacity(lines.len());
    for src in &lines {
        match decode_line(src, &labels) {
            Ok(inst) => instructions.push(inst),
            Err(kind) => errors.push(ParseError::new(src.line, kind)),
        }
    }
    errors.sort_by_key(|e| e.line);

    debug!(
        instructions = instructions.len(),
        labels = labels.len(),
        errors = errors.len(),
        "assembled program"
    );
    ParseResult {
        instructions,
        errors,
    }
}

fn decode_line(
    src: &SourceLine<'_>,
    labels: &HashMap<&str, u32>,
) -> Result<Instruction, ParseErrorKind> {
    let opcode = Opcode::from_mnemonic(src.mnemonic)
        .ok_or_else(|| ParseErrorKind::UnknownOpcode(src.mnemonic.to_uppercase()))?;
    let ops = &src.operands;
    let mut inst = Instruction::new(opcode, src.pc);
    inst.text = Arc::from(src.text);

    match opcode {
        Opcode::Add | Opcode::Sub | Opcode::And | Opcode::Or => {
            expect_operands(opcode, ops, 3, "rd, rs, rt")?;
            let rd = register(ops[0], 1)?;
            let rs = register(ops[1], 2)?;
            let rt = register(ops[2], 3)?;
            Ok(inst.with_dest(rd).with_sources(Some(rs), Some(rt)))
        }
        Opcode::Lw => {
            expect_operands(opcode, ops, 2, "rt, offset(base)")?;
            let rt = register(ops[0], 1)?;
            let (offset, base) = address(ops[1])?;
            Ok(inst
                .with_dest(rt)
                .with_sources(Some(base), Some(rt))
                .with_imm(offset))
        }
        Opcode::Sw => {
            expect_operands(opcode, ops, 2, "rt, offset(base)")?;
            let rt = register(ops[0], 1)?;
            let (offset, base) = address(ops[1])?;
            Ok(inst.with_sources(Some(base), Some(rt)).with_imm(offset))
        }
        Opcode::Beq => {
            expect_operands(opcode, ops, 3, "rs, rt, label|offset")?;
            let rs = register(ops[0], 1)?;
            let rt = register(ops[1], 2)?;
            let (imm, target) = branch_target(ops[2], labels, src.pc)?;
            Ok(inst
                .with_sources(Some(rs), Some(rt))
                .with_imm(imm)
                .with_branch_target(target))
        }
        Opcode::Nop => {
            if ops.is_empty() {
                Ok(inst)
            } else {
                Err(ParseErrorKind::UnexpectedOperands(opcode.mnemonic()))
            }
        }
    }
}

fn expect_operands(
    opcode: Opcode,
    ops: &[&str],
    expected: usize,
    usage: &'static str,
) -> Result<(), ParseErrorKind> {
    if ops.len() == expected {
        Ok(())
    } else {
        Err(ParseErrorKind::OperandCount {
            mnemonic: opcode.mnemonic(),
            expected,
            usage,
        })
    }
}

fn register(token: &str, position: usize) -> Result<u8, ParseErrorKind> {
    match tokenize(token).as_deref() {
        Ok([Token::Reg(r)]) => Ok(*r),
        _ => Err(ParseErrorKind::InvalidRegister {
            position,
            token: token.to_string(),
        }),
    }
}

/// Parses `offset(Rx)` into the byte offset and base register.
fn address(token: &str) -> Result<(i32, u8), ParseErrorKind> {
    match tokenize(token).as_deref() {
        Ok([Token::Int(offset), Token::LParen, Token::Reg(base), Token::RParen]) => {
            Ok((*offset, *base))
        }
        _ => Err(ParseErrorKind::InvalidAddress(token.to_string())),
    }
}

/// Resolves a branch operand into a word displacement and absolute target.
///
/// Displacements are relative to the instruction after the branch.
fn branch_target(
    token: &str,
    labels: &HashMap<&str, u32>,
    pc: u32,
) -> Result<(i32, u32), ParseErrorKind> {
    let next_pc = i64::from(pc) + i64::from(WORD_BYTES);
    if is_label(token) {
        let target = labels
            .get(token)
            .or_else(|| labels.get(token.to_uppercase().as_str()))
            .copied()
            .ok_or_else(|| ParseErrorKind::UnresolvedLabel(token.to_string()))?;
        let imm = (i64::from(target) - next_pc) / i64::from(WORD_BYTES);
        return Ok((imm as i32, target));
    }

    let invalid = || ParseErrorKind::InvalidBranchTarget(token.to_string());
    match tokenize(token).as_deref() {
        Ok([Token::Int(imm)]) => {
            let target = next_pc + i64::from(*imm) * i64::from(WORD_BYTES);
            let target = u32::try_from(target).map_err(|_| invalid())?;
            Ok((*imm, target))
        }
        _ => Err(invalid()),
    }
}

fn is_label(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
