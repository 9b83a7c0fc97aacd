//! Dataflow facts
//!
//! - [`CpFact`]: variable → [`Value`] map where an absent key means UNDEF
//! - [`SetFact`]: plain set with union as meet (liveness)

use super::value::Value;
use crate::shared::models::VarId;
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

/// Constant propagation fact
///
/// UNDEF entries are never stored, so two facts are equal iff they agree
/// on every variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpFact {
    values: FxHashMap<VarId, Value>,
}

impl CpFact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `var` (UNDEF when absent)
    pub fn get(&self, var: VarId) -> Value {
        self.values.get(&var).copied().unwrap_or(Value::Undef)
    }

    /// Set `var` to `value`; returns whether the fact changed
    pub fn update(&mut self, var: VarId, value: Value) -> bool {
        if value.is_undef() {
            self.values.remove(&var).is_some()
        } else {
            self.values.insert(var, value) != Some(value)
        }
    }

    pub fn remove(&mut self, var: VarId) -> Option<Value> {
        self.values.remove(&var)
    }

    /// Overwrite with `other`; returns whether anything changed
    pub fn copy_from(&mut self, other: &CpFact) -> bool {
        if self == other {
            return false;
        }
        self.values.clone_from(&other.values);
        true
    }

    /// Pointwise meet of `other` into `self`
    pub fn meet_with(&mut self, other: &CpFact) {
        for (&var, &value) in &other.values {
            let merged = self.get(var).meet(value);
            self.update(var, merged);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarId, Value)> + '_ {
        self.values.iter().map(|(&k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pointwise lattice order
    pub fn is_below_or_equal(&self, other: &CpFact) -> bool {
        self.values
            .iter()
            .all(|(&var, &value)| value.is_below_or_equal(other.get(var)))
    }
}

impl FromIterator<(VarId, Value)> for CpFact {
    fn from_iter<I: IntoIterator<Item = (VarId, Value)>>(iter: I) -> Self {
        let mut fact = CpFact::new();
        for (var, value) in iter {
            fact.update(var, value);
        }
        fact
    }
}

/// Set-valued fact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetFact<T: Eq + Hash> {
    set: FxHashSet<T>,
}

impl<T: Eq + Hash> Default for SetFact<T> {
    fn default() -> Self {
        Self {
            set: FxHashSet::default(),
        }
    }
}

impl<T: Eq + Hash + Copy> SetFact<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.set.contains(item)
    }

    pub fn add(&mut self, item: T) -> bool {
        self.set.insert(item)
    }

    pub fn remove(&mut self, item: &T) -> bool {
        self.set.remove(item)
    }

    /// Union `other` into `self`; returns whether `self` grew
    pub fn union_with(&mut self, other: &SetFact<T>) -> bool {
        let before = self.set.len();
        self.set.extend(other.set.iter().copied());
        self.set.len() != before
    }

    pub fn set_to(&mut self, other: &SetFact<T>) {
        self.set.clone_from(&other.set);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.set.iter()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn is_subset(&self, other: &SetFact<T>) -> bool {
        self.set.is_subset(&other.set)
    }
}

impl<T: Eq + Hash + Copy> FromIterator<T> for SetFact<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            set: iter.into_iter().collect(),
        }
    }
}
