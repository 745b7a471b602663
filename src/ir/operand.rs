//! Operands: the tagged union an instruction's operand list is built from.

use crate::ids::BlockId;
use crate::ir::variable::Variable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal value. Only variables participate in renaming; literals pass
/// through the pass untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// An instruction operand: a variable reference, a block label, or a
/// literal constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// A reference to a variable. Only these participate in renaming.
    Variable(Variable),
    /// A reference to a block, used as a terminator target or as a
    /// φ-predecessor marker.
    Label(BlockId),
    /// A constant value.
    Literal(Literal),
}

impl Operand {
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Operand::Variable(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_variable_mut(&mut self) -> Option<&mut Variable> {
        match self {
            Operand::Variable(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<BlockId> {
        match self {
            Operand::Label(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<Variable> for Operand {
    fn from(v: Variable) -> Self {
        Operand::Variable(v)
    }
}

impl From<BlockId> for Operand {
    fn from(b: BlockId) -> Self {
        Operand::Label(b)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Variable(v) => write!(f, "{v}"),
            Operand::Label(b) => write!(f, "{b}"),
            Operand::Literal(l) => write!(f, "{l}"),
        }
    }
}
