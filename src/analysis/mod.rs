//! The analysis layer: CFG, dominator-tree, and liveness analyses, plus the
//! cache the SSA pass drives them through.

pub mod cache;
pub mod cfg;
pub mod dominator;
pub mod liveness;

pub use cache::AnalysisCache;
pub use dominator::DominatorTree;
pub use liveness::LivenessAnalysis;
