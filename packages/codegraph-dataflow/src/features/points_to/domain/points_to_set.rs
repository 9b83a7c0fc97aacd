//! Points-to sets
//!
//! Sorted, deduplicated vector of ids. Sets only grow during a run, and the
//! solver mostly asks for "what is new" (difference) and merges deltas in
//! (union), both linear merges over sorted input.
//!
//! # Performance Characteristics
//! - Insert: O(n) (shift), O(log n) search
//! - Contains: O(log n)
//! - Union / difference / intersects: O(n + m) merge

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointsToSet<T> {
    elements: Vec<T>,
}

impl<T> Default for PointsToSet<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl<T: Copy + Ord> PointsToSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(element: T) -> Self {
        Self {
            elements: vec![element],
        }
    }

    /// Insert; returns whether the element was new
    pub fn insert(&mut self, element: T) -> bool {
        match self.elements.binary_search(&element) {
            Ok(_) => false,
            Err(pos) => {
                self.elements.insert(pos, element);
                true
            }
        }
    }

    pub fn contains(&self, element: &T) -> bool {
        self.elements.binary_search(element).is_ok()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.elements.iter().copied()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Elements of `self` missing from `other`
    pub fn difference(&self, other: &PointsToSet<T>) -> PointsToSet<T> {
        let mut out = Vec::new();
        let (a, b) = (&self.elements, &other.elements);
        let (mut i, mut j) = (0, 0);
        while i < a.len() {
            if j >= b.len() {
                out.extend_from_slice(&a[i..]);
                break;
            }
            match a[i].cmp(&b[j]) {
                Ordering::Less => {
                    out.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }
        PointsToSet { elements: out }
    }

    /// Merge `other` into `self`; returns whether `self` grew
    pub fn union_with(&mut self, other: &PointsToSet<T>) -> bool {
        if other.is_empty() {
            return false;
        }
        if self.is_empty() {
            self.elements.clone_from(&other.elements);
            return true;
        }

        let (a, b) = (&self.elements, &other.elements);
        let mut merged = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => {
                    merged.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push(b[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    merged.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);

        let grew = merged.len() != self.elements.len();
        self.elements = merged;
        grew
    }

    pub fn intersects(&self, other: &PointsToSet<T>) -> bool {
        let (a, b) = (&self.elements, &other.elements);
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => return true,
            }
        }
        false
    }

    pub fn is_subset(&self, other: &PointsToSet<T>) -> bool {
        self.len() <= other.len() && self.difference(other).is_empty()
    }
}

impl<T: Copy + Ord> FromIterator<T> for PointsToSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut elements: Vec<T> = iter.into_iter().collect();
        elements.sort_unstable();
        elements.dedup();
        Self { elements }
    }
}
