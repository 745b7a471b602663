//! SSA construction pass for a linear, three-address IR of a
//! function-level control-flow graph.
//!
//! This crate owns the minimal IR model the pass reads and mutates, the
//! CFG/dominator/liveness analyses it consumes, and the pass itself. AST
//! parsing, diagnostics, a driver, and a CLI are out of scope — see
//! `SPEC_FULL.md` and `DESIGN.md` in the repository root for the full
//! requirements and the grounding ledger.
//!
//! The entry point most callers want is [`passes::make_ssa::run`].

pub mod analysis;
pub mod errors;
pub mod ids;
pub mod interner;
pub mod ir;
pub mod logging;
pub mod passes;

pub use analysis::AnalysisCache;
pub use errors::PassError;
pub use ir::Function;
pub use passes::make_ssa::{self, SsaOptions};
