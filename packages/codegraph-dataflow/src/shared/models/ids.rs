//! Program entity identifiers
//!
//! All program entities live in arenas owned by [`Program`](super::Program);
//! these ids index into them.

crate::define_id!(
    /// Class or interface
    ClassId,
    "class#"
);
crate::define_id!(
    /// Field declaration (static or instance)
    FieldId,
    "field#"
);
crate::define_id!(
    /// Method declaration
    MethodId,
    "method#"
);
crate::define_id!(
    /// Local variable, parameter, `this` or temporary
    VarId,
    "v"
);
crate::define_id!(
    /// Statement (program point) in the global statement arena
    StmtId,
    "s"
);
