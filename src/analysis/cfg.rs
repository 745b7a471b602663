//! CFG analysis: populates each block's predecessor (`cfg_in`) and
//! successor (`cfg_out`) sets from terminator instructions' `Label`
//! operands.
//!
//! Grounded on this codebase's control-flow-graph construction (predecessor
//! derivation from terminator successors, `CfgValidationError` style
//! reporting for dangling edges), adapted down from a typed terminator enum
//! to this crate's generic instruction shape: a block's terminator is
//! simply its last instruction, and its successors are whichever of that
//! instruction's operands are `Label`s.

use crate::errors::CfgError;
use crate::ids::BlockId;
use crate::ir::Function;
use indexmap::{IndexMap, IndexSet};

/// Successors of every block, derived from terminator `Label` operands, in
/// the order those labels appear in the terminator's operand list.
fn successors_of(function: &Function) -> IndexMap<BlockId, Vec<BlockId>> {
    let mut result = IndexMap::new();
    for block in function.blocks() {
        let succs = match block.instructions.last() {
            Some(terminator) => terminator
                .operands
                .iter()
                .filter_map(|op| op.as_label())
                .collect(),
            None => Vec::new(),
        };
        result.insert(block.id, succs);
    }
    result
}

/// Compute and write `cfg_in`/`cfg_out` onto every block in `function`.
///
/// Returns an error if a terminator references a block id that does not
/// exist in the function — a dangling successor, which is a precondition
/// violation this analysis cannot silently paper over.
pub fn build(function: &mut Function) -> Result<(), CfgError> {
    let successors = successors_of(function);

    for (from, succs) in &successors {
        for to in succs {
            if !successors.contains_key(to) {
                return Err(CfgError::DanglingSuccessor { from: *from, to: *to });
            }
        }
    }

    let mut predecessors: IndexMap<BlockId, IndexSet<BlockId>> = IndexMap::new();
    for id in successors.keys() {
        predecessors.insert(*id, IndexSet::new());
    }
    for (from, succs) in &successors {
        for to in succs {
            predecessors.entry(*to).or_default().insert(*from);
        }
    }

    for (id, succs) in &successors {
        if let Some(block) = function.get_block_mut(*id) {
            block.cfg_out = succs.iter().copied().collect();
        }
    }
    for (id, preds) in predecessors {
        if let Some(block) = function.get_block_mut(id) {
            block.cfg_in = preds;
        }
    }

    Ok(())
}
