//! Opcode mnemonics.

use std::fmt;

use serde::Serialize;

/// Operation selected by an instruction's mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Opcode {
    /// `ADD rd, rs, rt`
    Add,
    /// `SUB rd, rs, rt`
    Sub,
    /// `AND rd, rs, rt`
    And,
    /// `OR rd, rs, rt`
    Or,
    /// `LW rt, offset(base)`
    Lw,
    /// `SW rt, offset(base)`
    Sw,
    /// `BEQ rs, rt, label|offset`
    Beq,
    /// `NOP`
    Nop,
}

impl Opcode {
    /// Every opcode, in encoding order.
    pub const ALL: [Opcode; 8] = [
        Opcode::Add,
        Opcode::Sub,
        Opcode::And,
        Opcode::Or,
        Opcode::Lw,
        Opcode::Sw,
        Opcode::Beq,
        Opcode::Nop,
    ];

    /// Looks up an opcode by mnemonic, ignoring ASCII case.
    ///
    /// # Arguments
    ///
    /// * `text` - Mnemonic as written in the source.
    ///
    /// # Returns
    ///
    /// The matching opcode, or `None` for an unknown mnemonic.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(text))
    }

    /// Canonical upper-case mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Lw => "LW",
            Opcode::Sw => "SW",
            Opcode::Beq => "BEQ",
            Opcode::Nop => "NOP",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
