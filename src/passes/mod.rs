//! Optimization/transformation passes over the IR. Currently home to only
//! the SSA construction pass; named as a module (rather than folding
//! `make_ssa` into the crate root) to match this codebase's convention of
//! grouping passes under a `passes` namespace even when only one pass
//! exists yet.

pub mod make_ssa;
