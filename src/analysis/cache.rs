//! Analysis cache: `request`/`invalidate` of the named analyses the SSA
//! pass depends on.
//!
//! There is no single `AnalysisCache` type in this codebase to borrow
//! verbatim — each analysis (dominance, DFG) is computed then held by its
//! own call site until a later pass invalidates it. This type formalizes
//! that same contract (spec §4.2) behind one small struct with a slot per
//! analysis kind, rather than a type-erased registry, since this crate only
//! ever has three analyses to track.

use crate::analysis::dominator::{self, DominatorTree};
use crate::analysis::liveness::{self, LivenessAnalysis};
use crate::errors::{CfgError, DominanceError};
use crate::ir::Function;

#[derive(Debug, Default)]
pub struct AnalysisCache {
    cfg_built: bool,
    dominator: Option<DominatorTree>,
    liveness: Option<LivenessAnalysis>,
    def_use_valid: bool,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self {
            cfg_built: false,
            dominator: None,
            liveness: None,
            def_use_valid: true,
        }
    }

    /// Ensure `function`'s blocks have `cfg_in`/`cfg_out` populated.
    /// Recomputes only if never built or invalidated since.
    pub fn request_cfg(&mut self, function: &mut Function) -> Result<(), CfgError> {
        if !self.cfg_built {
            log::debug!("analysis cache: (re)computing CFG for '{}'", function.name);
            super::cfg::build(function)?;
            self.cfg_built = true;
        }
        Ok(())
    }

    /// Returns the cached dominator tree, computing it if necessary.
    /// Requires `request_cfg` to have been called first.
    pub fn request_dominator(&mut self, function: &Function) -> Result<&DominatorTree, DominanceError> {
        if self.dominator.is_none() {
            log::debug!("analysis cache: (re)computing dominator tree for '{}'", function.name);
            self.dominator = Some(dominator::build(function)?);
        }
        Ok(self.dominator.as_ref().expect("just inserted"))
    }

    /// Returns the cached liveness analysis, computing it if necessary.
    /// Requires `request_cfg` to have been called first.
    pub fn request_liveness(&mut self, function: &Function) -> &LivenessAnalysis {
        if self.liveness.is_none() {
            log::debug!("analysis cache: (re)computing liveness for '{}'", function.name);
            self.liveness = Some(liveness::build(function));
        }
        self.liveness.as_ref().expect("just inserted")
    }

    pub fn invalidate_liveness(&mut self) {
        self.liveness = None;
    }

    pub fn invalidate_dominator(&mut self) {
        self.dominator = None;
    }

    /// Invalidating the CFG invalidates the dominator tree too, since it is
    /// computed from `cfg_in`/`cfg_out`.
    pub fn invalidate_cfg(&mut self) {
        self.cfg_built = false;
        self.dominator = None;
    }

    pub fn invalidate_def_use(&mut self) {
        self.def_use_valid = false;
    }

    pub fn def_use_valid(&self) -> bool {
        self.def_use_valid
    }
}
