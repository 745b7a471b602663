//! Lightweight identifier newtypes for blocks and instructions.
//!
//! Mirrors the `define_id_type!` pattern used throughout this codebase's
//! symbol/type/scope identifiers: a `Copy` wrapper around `u32` with a
//! reserved sentinel for "invalid", so different kinds of identifiers can
//! never be mixed up at the type level.

use std::fmt;

macro_rules! define_id_type {
    (
        $(#[$meta:meta])*
        $name:ident, $prefix:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Create a new id from a raw value.
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Raw value of this id.
            pub const fn as_raw(self) -> u32 {
                self.0
            }

            /// Sentinel value used before an id has been assigned.
            pub const fn invalid() -> Self {
                Self(u32::MAX)
            }

            /// Whether this id is something other than the sentinel.
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self::from_raw(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}{}", $prefix, self.0)
                } else {
                    write!(f, "{}<invalid>", $prefix)
                }
            }
        }
    };
}

define_id_type! {
    /// Identifies a basic block within a function. Also the `Label` operand
    /// referencing that block.
    BlockId, "bb"
}

define_id_type! {
    /// Identifies an instruction within a function, independent of its
    /// position in a block's instruction list.
    InstId, "inst"
}
