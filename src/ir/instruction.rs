//! Instructions: `(opcode, ordered operand list, optional output)`.

use crate::ids::BlockId;
use crate::ir::operand::Operand;
use crate::ir::variable::Variable;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The opcode naming a `phi` instruction. Distinguished from every other
/// opcode: only `phi` instructions are subject to φ-placement, renaming's
/// predecessor-rewrite step, and degenerate-φ removal.
pub const PHI_OPCODE: &str = "phi";

/// Most instructions in this IR (binary ops, calls with a couple of
/// arguments, two-way phis) carry three or four operands; inlining that
/// many avoids a heap allocation per instruction for the common case,
/// matching this codebase's use of `SmallVec` for short argument lists.
pub type OperandList = SmallVec<[Operand; 4]>;

/// A single instruction: an opcode, an ordered operand list, and an
/// optional output variable. Operand order is semantically significant —
/// for `phi` it encodes the interleaved `[label, value, label, value, ...]`
/// shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: String,
    pub operands: OperandList,
    pub output: Option<Variable>,
}

impl Instruction {
    pub fn new(opcode: impl Into<String>, operands: Vec<Operand>, output: Option<Variable>) -> Self {
        Self {
            opcode: opcode.into(),
            operands: OperandList::from_vec(operands),
            output,
        }
    }

    /// Construct a `phi` instruction from interleaved `(label, value)`
    /// pairs and an output variable.
    pub fn new_phi(incoming: Vec<(BlockId, Variable)>, output: Variable) -> Self {
        let mut operands = OperandList::with_capacity(incoming.len() * 2);
        for (label, value) in incoming {
            operands.push(Operand::Label(label));
            operands.push(Operand::Variable(value));
        }
        Self {
            opcode: PHI_OPCODE.to_string(),
            operands,
            output: Some(output),
        }
    }

    pub fn is_phi(&self) -> bool {
        self.opcode == PHI_OPCODE
    }

    /// View a `phi`'s operands as `(label, value)` pairs. Panics if called
    /// on a non-`phi` instruction or if the operand list is not the
    /// interleaved shape — both are precondition violations upstream of
    /// this pass.
    pub fn phi_operands(&self) -> Vec<(BlockId, &Variable)> {
        assert!(self.is_phi(), "phi_operands called on a non-phi instruction");
        assert_eq!(
            self.operands.len() % 2,
            0,
            "phi instruction has an odd-length operand list"
        );
        self.operands
            .chunks_exact(2)
            .map(|pair| {
                let label = pair[0].as_label().expect("phi predecessor slot is not a label");
                let value = pair[1]
                    .as_variable()
                    .expect("phi value slot is not a variable");
                (label, value)
            })
            .collect()
    }

    /// Rewrite the value slot paired with `label` to `new_value`. Panics if
    /// `label` is not one of this φ's predecessor markers.
    pub fn set_phi_value_for_label(&mut self, label: BlockId, new_value: Variable) {
        assert!(self.is_phi(), "set_phi_value_for_label called on a non-phi instruction");
        for pair in self.operands.chunks_exact_mut(2) {
            if pair[0].as_label() == Some(label) {
                pair[1] = Operand::Variable(new_value);
                return;
            }
        }
        panic!("phi instruction has no predecessor slot for {label}");
    }

    /// All variables read by this instruction (excludes the output).
    ///
    /// For a `phi`, this is the value half of every interleaved pair; for
    /// any other instruction, every `Operand::Variable` in `operands`.
    pub fn uses(&self) -> Vec<&Variable> {
        if self.is_phi() {
            self.phi_operands().into_iter().map(|(_, v)| v).collect()
        } else {
            self.operands.iter().filter_map(Operand::as_variable).collect()
        }
    }

    pub fn dest(&self) -> Option<&Variable> {
        self.output.as_ref()
    }
}
