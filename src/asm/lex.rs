//! Operand tokenizer.
//!
//! Each comma-separated operand is tokenized on its own and then matched
//! against the operand shapes the assembler accepts: a register (`R4`), a
//! memory reference (`-8(R2)`), an integer (`+2`, `0x10`) or a label name.

use std::fmt;

use logos::{Lexer, Logos};

/// A unit of an assembly operand.
#[derive(Debug, Logos, PartialEq, Eq, Clone)]
#[logos(skip r"[ \t]+", error = LexErr)]
pub enum Token {
    /// A register (`R0`-`R31`, either case).
    #[regex(r"[Rr][0-9]+", lex_reg)]
    Reg(u8),

    /// A signed decimal or hexadecimal integer.
    #[regex(r"[+-]?[0-9]+", lex_dec)]
    #[regex(r"[+-]?0[xX][0-9A-Fa-f]+", lex_hex)]
    Int(i32),

    /// A label name.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lx| lx.slice().to_string())]
    Ident(String),

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

/// Errors raised while tokenizing an operand.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum LexErr {
    /// `R` followed by a number outside 0-31.
    InvalidReg,
    /// Integer literal does not fit in 32 bits.
    IntOverflow,
    /// A character that starts no token.
    #[default]
    InvalidSymbol,
}

impl fmt::Display for LexErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErr::InvalidReg => f.write_str("register must be R0-R31"),
            LexErr::IntOverflow => f.write_str("integer literal does not fit in 32 bits"),
            LexErr::InvalidSymbol => f.write_str("unrecognized symbol"),
        }
    }
}

impl std::error::Error for LexErr {}

fn lex_reg(lx: &mut Lexer<'_, Token>) -> Result<u8, LexErr> {
    let digits = &lx.slice()[1..];
    if digits.len() > 2 {
        return Err(LexErr::InvalidReg);
    }
    digits
        .parse::<u8>()
        .ok()
        .filter(|&r| (r as usize) < crate::common::NUM_REGISTERS)
        .ok_or(LexErr::InvalidReg)
}

fn lex_dec(lx: &mut Lexer<'_, Token>) -> Result<i32, LexErr> {
    lx.slice().parse::<i32>().map_err(|_| LexErr::IntOverflow)
}

fn lex_hex(lx: &mut Lexer<'_, Token>) -> Result<i32, LexErr> {
    let slice = lx.slice();
    let (negative, unsigned) = match slice.as_bytes()[0] {
        b'-' => (true, &slice[1..]),
        b'+' => (false, &slice[1..]),
        _ => (false, slice),
    };
    let magnitude =
        u32::from_str_radix(&unsigned[2..], 16).map_err(|_| LexErr::IntOverflow)?;
    if negative {
        i32::try_from(-i64::from(magnitude)).map_err(|_| LexErr::IntOverflow)
    } else {
        Ok(magnitude as i32)
    }
}

/// Tokenizes one operand.
///
/// # Arguments
///
/// * `operand` - Operand text with surrounding whitespace already trimmed.
///
/// # Returns
///
/// The token sequence, or the first lexing error.
pub fn tokenize(operand: &str) -> Result<Vec<Token>, LexErr> {
    Token::lexer(operand).collect()
}
