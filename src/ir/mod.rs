//! The minimal three-address IR this pass reads and mutates.
//!
//! Exposes blocks, instructions, operands, and variables. The IR is
//! intentionally generic (one `Instruction` shape covering every opcode,
//! including `phi`) rather than a typed enum per opcode kind, since the
//! SSA construction pass only ever needs to inspect operand lists and
//! outputs uniformly.

pub mod block;
pub mod function;
pub mod instruction;
pub mod operand;
pub mod variable;

pub use block::BasicBlock;
pub use function::Function;
pub use instruction::{Instruction, OperandList, PHI_OPCODE};
pub use operand::{Literal, Operand};
pub use variable::Variable;
