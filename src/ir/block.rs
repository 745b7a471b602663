//! Basic blocks.

use crate::ids::BlockId;
use crate::interner::Name;
use crate::ir::instruction::Instruction;
use crate::ir::variable::Variable;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A basic block: an identifier, an ordered instruction list, predecessor
/// and successor sets, and a live-in variable set.
///
/// `cfg_in`/`cfg_out` are populated by CFG analysis and `live_in` by
/// liveness analysis; this type only owns the storage and the mutations
/// the SSA pass performs directly on the instruction list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: BlockId,
    pub instructions: Vec<Instruction>,
    #[serde(skip, default)]
    pub cfg_in: IndexSet<BlockId>,
    #[serde(skip, default)]
    pub cfg_out: IndexSet<BlockId>,
    #[serde(skip, default)]
    pub live_in: IndexSet<Name>,
}

impl BasicBlock {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            instructions: Vec::new(),
            cfg_in: IndexSet::new(),
            cfg_out: IndexSet::new(),
            live_in: IndexSet::new(),
        }
    }

    /// The block's own identifier, usable as a `Label` operand referencing
    /// it.
    pub fn label(&self) -> BlockId {
        self.id
    }

    /// Insert an instruction at the given position in this block's
    /// instruction list. Index `0` is used by φ-placement so new φs land
    /// at the head of the block.
    pub fn insert_instruction(&mut self, index: usize, inst: Instruction) {
        self.instructions.insert(index, inst);
    }

    /// The distinct output variables assigned by this block's
    /// instructions, in first-definition order, with no duplicates.
    pub fn get_assignments(&self) -> IndexSet<Variable> {
        let mut out = IndexSet::new();
        for inst in &self.instructions {
            if let Some(v) = inst.output {
                out.insert(v);
            }
        }
        out
    }

    /// Number of `phi` instructions currently at the head of this block.
    pub fn phi_count(&self) -> usize {
        self.instructions.iter().take_while(|i| i.is_phi()).count()
    }

    /// Whether every `phi` in this block precedes every non-`phi`
    /// instruction — one of the pass's post-condition invariants.
    pub fn phis_are_leading(&self) -> bool {
        let mut seen_non_phi = false;
        for inst in &self.instructions {
            if inst.is_phi() {
                if seen_non_phi {
                    return false;
                }
            } else {
                seen_non_phi = true;
            }
        }
        true
    }
}
