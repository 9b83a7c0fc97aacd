//! Abstract Heap Objects
//!
//! Concrete heap addresses are abstracted to allocation sites: every
//! `x = new T` statement denotes one abstract object, whatever the number of
//! times it executes.

use crate::shared::models::{ClassId, MethodId, StmtId, Type};
use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id!(
    /// Abstract heap object
    ObjId,
    "o"
);

/// Abstract representation of a heap allocation site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obj {
    pub id: ObjId,

    /// The `New` statement
    pub alloc_site: StmtId,

    /// Allocated type
    pub ty: Type,

    /// Method containing the allocation site
    pub container: MethodId,

    /// Class declaring `container`; the element type sensitivity uses
    pub container_class: ClassId,
}

impl Obj {
    /// Runtime class for virtual dispatch; `None` for arrays
    pub fn class(&self) -> Option<ClassId> {
        match self.ty {
            Type::Class(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.alloc_site)
    }
}
