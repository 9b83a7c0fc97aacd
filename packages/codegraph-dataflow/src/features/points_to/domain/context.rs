//! Calling contexts
//!
//! A context is a k-limited string of elements: call sites (k-CFA),
//! receiver allocation sites (object sensitivity) or classes containing
//! those allocation sites (type sensitivity). Equality is structural;
//! [`CsManager`](super::cs_element::CsManager) interns them.

use super::abstract_location::ObjId;
use crate::shared::models::{ClassId, StmtId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextElement {
    CallSite(StmtId),
    Object(ObjId),
    Type(ClassId),
}

impl fmt::Display for ContextElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextElement::CallSite(s) => write!(f, "{}", s),
            ContextElement::Object(o) => write!(f, "{}", o),
            ContextElement::Type(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    elements: Vec<ContextElement>,
}

impl Context {
    /// The empty (default) context
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[ContextElement] {
        &self.elements
    }

    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// `self + element`, keeping only the last `k` elements
    pub fn append(&self, element: ContextElement, k: usize) -> Context {
        if k == 0 {
            return Context::empty();
        }
        let mut elements = self.elements.clone();
        elements.push(element);
        if elements.len() > k {
            elements.drain(..elements.len() - k);
        }
        Context { elements }
    }

    /// Last `k` elements
    pub fn truncate(&self, k: usize) -> Context {
        let start = self.elements.len().saturating_sub(k);
        Context {
            elements: self.elements[start..].to_vec(),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", e)?;
        }
        f.write_str("]")
    }
}
