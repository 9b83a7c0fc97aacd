//! Static types of program variables and fields

use super::ids::ClassId;
use serde::{Deserialize, Serialize};

/// Declared type of a variable, field or allocation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Int,
    Boolean,
    Byte,
    Short,
    Char,
    Long,
    Float,
    Double,
    Class(ClassId),
    Array(Box<Type>),
    Null,
    Void,
}

impl Type {
    /// Whether values of this type are tracked by constant propagation.
    ///
    /// `byte`, `short`, `int`, `char` and `boolean` all share the 32-bit
    /// integer domain.
    pub fn can_hold_int(&self) -> bool {
        matches!(
            self,
            Type::Int | Type::Boolean | Type::Byte | Type::Short | Type::Char
        )
    }

    /// Reference types flow through the pointer analysis
    pub fn is_reference(&self) -> bool {
        matches!(self, Type::Class(_) | Type::Array(_) | Type::Null)
    }

    /// Array of `self`
    pub fn array_of(self) -> Type {
        Type::Array(Box::new(self))
    }
}
