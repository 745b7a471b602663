//! Liveness analysis: per-block live-in variable name sets, via a backward
//! fixed-point dataflow over the CFG.
//!
//! Field naming (`live_in`) follows this codebase's existing liveness
//! tracking. A φ operand's incoming value is attributed to the liveness of
//! the predecessor edge it names, not to the block the φ sits in — the
//! conventional treatment, since a φ never "reads" its operands at its own
//! position, only selects one depending on which predecessor was taken.
//! Without this, re-running φ-placement over already-SSA'd IR would see
//! a φ's own operands as an ordinary use inside its own block and treat
//! the block as live-in for that name, which is enough to reintroduce a
//! phi that placement had already subsumed — breaking the pass's
//! idempotence on a second run.

use crate::interner::Name;
use crate::ir::Function;
use indexmap::IndexMap;
use indexmap::IndexSet;

#[derive(Debug, Default)]
pub struct LivenessAnalysis {
    live_in: IndexMap<crate::ids::BlockId, IndexSet<Name>>,
}

impl LivenessAnalysis {
    pub fn live_in_vars(&self, b: crate::ids::BlockId) -> &IndexSet<Name> {
        static EMPTY: std::sync::OnceLock<IndexSet<Name>> = std::sync::OnceLock::new();
        self.live_in.get(&b).unwrap_or_else(|| EMPTY.get_or_init(IndexSet::new))
    }
}

/// Per-block local `use`/`def` sets: `uses` are variables read before any
/// definition of the same name within the block, excluding φ operands
/// (those are attributed to their predecessor via [`phi_edge_requirements`]
/// instead); `defs` are every name assigned in the block, φ outputs
/// included.
fn local_use_def(function: &Function) -> IndexMap<crate::ids::BlockId, (IndexSet<Name>, IndexSet<Name>)> {
    let mut result = IndexMap::new();
    for block in function.blocks() {
        let mut uses = IndexSet::new();
        let mut defs: IndexSet<Name> = IndexSet::new();
        for inst in &block.instructions {
            if !inst.is_phi() {
                for used in inst.uses() {
                    if !defs.contains(&used.name()) {
                        uses.insert(used.name());
                    }
                }
            }
            if let Some(out) = inst.output {
                defs.insert(out.name());
            }
        }
        result.insert(block.id, (uses, defs));
    }
    result
}

/// For every φ in the function, the names its predecessor edges carry:
/// `p -> {names}` such that some φ has an incoming `(p, v)` pair naming
/// `v`. These are forced into `p`'s live-out set regardless of whether
/// they are otherwise live into the φ's own block.
fn phi_edge_requirements(function: &Function) -> IndexMap<crate::ids::BlockId, IndexSet<Name>> {
    let mut requirements: IndexMap<crate::ids::BlockId, IndexSet<Name>> = IndexMap::new();
    for block in function.blocks() {
        for inst in &block.instructions {
            if !inst.is_phi() {
                continue;
            }
            for (pred, var) in inst.phi_operands() {
                requirements.entry(pred).or_default().insert(var.name());
            }
        }
    }
    requirements
}

/// Build live-in sets for every block via the standard backward fixed
/// point: `live_in(b) = uses(b) ∪ (live_out(b) \ defs(b))`,
/// `live_out(b) = (⋃_{s ∈ cfg_out(b)} live_in(s)) ∪ phi_edge_requirements(b)`.
pub fn build(function: &Function) -> LivenessAnalysis {
    let use_def = local_use_def(function);
    let edge_requirements = phi_edge_requirements(function);
    let mut live_in: IndexMap<crate::ids::BlockId, IndexSet<Name>> =
        use_def.keys().map(|&b| (b, IndexSet::new())).collect();

    let mut changed = true;
    while changed {
        changed = false;
        for block in function.blocks() {
            let (uses, defs) = &use_def[&block.id];

            let mut live_out: IndexSet<Name> = IndexSet::new();
            for &succ in &block.cfg_out {
                if let Some(succ_in) = live_in.get(&succ) {
                    live_out.extend(succ_in.iter().copied());
                }
            }
            if let Some(extra) = edge_requirements.get(&block.id) {
                live_out.extend(extra.iter().copied());
            }

            let mut new_in = uses.clone();
            for name in &live_out {
                if !defs.contains(name) {
                    new_in.insert(*name);
                }
            }

            let current = &live_in[&block.id];
            if *current != new_in {
                live_in.insert(block.id, new_in);
                changed = true;
            }
        }
    }

    LivenessAnalysis { live_in }
}
