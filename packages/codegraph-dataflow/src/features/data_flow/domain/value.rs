//! Constant propagation lattice
//!
//! ```text
//!            NAC
//!      /   /  |  \   \
//!   ... -1   0   1  2 ...     Constant(n)
//!      \   \  |  /   /
//!           UNDEF
//! ```
//!
//! `meet` moves up: `meet(Undef, x) = x`, `meet(NAC, x) = NAC`, and two
//! constants meet to themselves when equal, NAC otherwise.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// No value seen yet
    Undef,
    /// Known 32-bit integer
    Constant(i32),
    /// Not a constant
    Nac,
}

impl Value {
    pub fn meet(self, other: Value) -> Value {
        match (self, other) {
            (Value::Nac, _) | (_, Value::Nac) => Value::Nac,
            (Value::Undef, v) | (v, Value::Undef) => v,
            (Value::Constant(a), Value::Constant(b)) => {
                if a == b {
                    Value::Constant(a)
                } else {
                    Value::Nac
                }
            }
        }
    }

    pub fn is_undef(self) -> bool {
        self == Value::Undef
    }

    pub fn is_nac(self) -> bool {
        self == Value::Nac
    }

    pub fn is_constant(self) -> bool {
        matches!(self, Value::Constant(_))
    }

    pub fn as_constant(self) -> Option<i32> {
        match self {
            Value::Constant(c) => Some(c),
            _ => None,
        }
    }

    /// Lattice order: `self ⊑ other`
    pub fn is_below_or_equal(self, other: Value) -> bool {
        self.meet(other) == other
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Undef
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undef => f.write_str("UNDEF"),
            Value::Constant(c) => write!(f, "{}", c),
            Value::Nac => f.write_str("NAC"),
        }
    }
}
