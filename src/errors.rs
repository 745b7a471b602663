//! Internal error types for the analyses and the SSA construction pass.
//!
//! Hand-written `Display`/`Error` impls, matching the error-enum style used
//! throughout this codebase's semantic-graph analyses rather than a derive
//! macro crate. Per the pass's error handling design, every variant here is
//! a precondition violation or an internal inconsistency: callers are not
//! expected to recover from them, only to report them.

use crate::ids::BlockId;
use std::fmt;

/// Failure building or querying the dominator-tree analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DominanceError {
    /// The CFG has no entry block, or the entry block is not present in
    /// the block map.
    InvalidEntry,
    /// A block is unreachable from the entry and therefore has no
    /// well-defined immediate dominator.
    UnreachableBlock(BlockId),
}

impl fmt::Display for DominanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DominanceError::InvalidEntry => {
                write!(f, "control-flow graph has no valid entry block")
            }
            DominanceError::UnreachableBlock(b) => {
                write!(f, "block {b} is unreachable from the entry block")
            }
        }
    }
}

impl std::error::Error for DominanceError {}

/// Failure validating CFG structure (terminator operands referencing
/// nonexistent blocks, missing terminators, etc).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CfgError {
    /// A block's terminator instruction references a block id that does
    /// not exist in the function.
    DanglingSuccessor { from: BlockId, to: BlockId },
    /// A non-empty block has no instructions at all, so no terminator can
    /// be inspected for successors.
    EmptyBlock(BlockId),
}

impl fmt::Display for CfgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CfgError::DanglingSuccessor { from, to } => {
                write!(f, "block {from} has a terminator referencing nonexistent block {to}")
            }
            CfgError::EmptyBlock(b) => write!(f, "block {b} has no instructions"),
        }
    }
}

impl std::error::Error for CfgError {}

/// Precondition violations and internal inconsistencies the SSA
/// construction pass can encounter, per the pass's error handling design:
/// these are always fatal and always indicate a bug upstream of this pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassError {
    /// An analysis the pass depends on was requested but never computed.
    MissingAnalysis(&'static str),
    /// A `phi` instruction does not have the interleaved
    /// `[label, value, label, value, ...]` operand shape, or has no output.
    MalformedPhi(BlockId),
    /// A use of a variable was reached with an empty version stack for its
    /// name: a use without a dominating definition.
    EmptyRenameStack { block: BlockId },
    /// Propagated dominance failure.
    Dominance(DominanceError),
    /// Propagated CFG failure.
    Cfg(CfgError),
}

impl fmt::Display for PassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassError::MissingAnalysis(name) => {
                write!(f, "internal error: analysis '{name}' was not computed before use")
            }
            PassError::MalformedPhi(b) => {
                write!(f, "internal error: malformed phi instruction in block {b}")
            }
            PassError::EmptyRenameStack { block } => write!(
                f,
                "internal error: use of a variable without a dominating definition in block {block}"
            ),
            PassError::Dominance(e) => write!(f, "{e}"),
            PassError::Cfg(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PassError {}

impl From<DominanceError> for PassError {
    fn from(e: DominanceError) -> Self {
        PassError::Dominance(e)
    }
}

impl From<CfgError> for PassError {
    fn from(e: CfgError) -> Self {
        PassError::Cfg(e)
    }
}
