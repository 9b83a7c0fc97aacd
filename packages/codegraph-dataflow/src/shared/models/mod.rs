//! Program model shared by every analysis
//!
//! The analyses consume this model read-only. It is deliberately small:
//! only what constant propagation, liveness, dead-code detection and the
//! pointer analysis query is represented.

pub mod builder;
pub mod ids;
pub mod program;
pub mod stmt;
pub mod types;

pub use builder::{MethodBuilder, ProgramBuilder};
pub use ids::{ClassId, FieldId, MethodId, StmtId, VarId};
pub use program::{Class, Field, Method, Program, Var, VarRelations};
pub use stmt::{
    ArrayAccess, BinaryExp, BinaryOp, CallKind, FieldAccess, Invoke, Literal, MethodRef, Stmt,
    StmtKind, SYNTHETIC_INDEX,
};
pub use types::Type;
