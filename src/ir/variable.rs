//! Versioned variables.

use crate::interner::Name;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A symbolic name plus an integer version.
///
/// Identity for equality and hashing is `(name, version)`. Version `0`
/// denotes "unversioned", the state of every variable before renaming;
/// after renaming, versions are unique per `(function, name)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    name: Name,
    version: u32,
}

impl Variable {
    /// Construct an unversioned variable (version 0).
    pub fn new(name: Name) -> Self {
        Self { name, version: 0 }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns a new variable sharing this one's name, at the given
    /// version. Does not mutate `self`.
    pub fn with_version(&self, version: u32) -> Self {
        Self {
            name: self.name,
            version,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}.{}", self.name.as_raw(), self.version)
    }
}
