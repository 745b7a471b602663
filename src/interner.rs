//! Interning for variable names.
//!
//! Grounded on the string-interning pattern used elsewhere in this codebase
//! (arena-backed `StringInterner` keyed by a fast hash of the string
//! content), simplified for a single-threaded pass: no mutex, no arena, no
//! atomic counter. Construction of SSA form happens on one function on one
//! thread, so the extra machinery buys nothing here.

use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};

/// A small, fast hasher tuned for short string keys, same rotate-and-add
/// construction used by this codebase's other string interner.
#[derive(Default)]
struct FxHasher {
    hash: usize,
}

impl Hasher for FxHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.hash = self.hash.rotate_left(5).wrapping_add(byte as usize);
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.hash as u64
    }
}

#[derive(Default)]
struct FxBuildHasher;

impl BuildHasher for FxBuildHasher {
    type Hasher = FxHasher;

    fn build_hasher(&self) -> Self::Hasher {
        FxHasher::default()
    }
}

/// An interned variable name. Equality and hashing are O(1) id comparisons;
/// the backing string is only needed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(u32);

impl Name {
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

/// Interns variable names for one function's worth of SSA construction.
#[derive(Debug, Default)]
pub struct Interner {
    ids: HashMap<String, Name, FxBuildHasher>,
    strings: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self {
            ids: HashMap::with_hasher(FxBuildHasher),
            strings: Vec::new(),
        }
    }

    /// Intern `s`, returning its existing id if already interned.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&id) = self.ids.get(s) {
            return id;
        }
        let id = Name(self.strings.len() as u32);
        self.strings.push(s.to_string());
        self.ids.insert(s.to_string(), id);
        id
    }

    /// Resolve an id back to its string content.
    ///
    /// # Panics
    /// Panics if `name` was not produced by this interner.
    pub fn resolve(&self, name: Name) -> &str {
        &self.strings[name.as_raw() as usize]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
