//! Whole-program model
//!
//! Read-only view of the analysed program: classes, fields, methods,
//! variables and the global statement arena. Built once by
//! [`ProgramBuilder`](super::ProgramBuilder) and then shared behind an
//! `Arc` by every analysis of a session.

use super::ids::{ClassId, FieldId, MethodId, StmtId, VarId};
use super::stmt::{CallKind, Invoke, Stmt};
use super::types::Type;
use crate::errors::{AnalysisError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub superclass: Option<ClassId>,
    pub is_interface: bool,
    /// Declared methods by name
    pub methods: FxHashMap<String, MethodId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub class: ClassId,
    pub ty: Type,
    pub is_static: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Var {
    pub id: VarId,
    pub name: String,
    pub ty: Type,
    pub method: MethodId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Method {
    pub id: MethodId,
    pub name: String,
    pub class: ClassId,
    pub is_static: bool,
    pub is_abstract: bool,
    pub params: Vec<VarId>,
    /// `this` of instance methods
    pub this: Option<VarId>,
    /// Variables returned by `return v` statements
    pub return_vars: Vec<VarId>,
    /// Synthetic entry node
    pub entry: StmtId,
    /// Synthetic exit node
    pub exit: StmtId,
    /// Body statements in index order
    pub body: Vec<StmtId>,
}

/// Statements that use a variable as base of a heap access or as receiver
///
/// The pointer analysis revisits exactly these when a new object reaches
/// the variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VarRelations {
    pub store_fields: Vec<StmtId>,
    pub load_fields: Vec<StmtId>,
    pub store_arrays: Vec<StmtId>,
    pub load_arrays: Vec<StmtId>,
    pub invokes: Vec<StmtId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub(crate) classes: Vec<Class>,
    pub(crate) fields: Vec<Field>,
    pub(crate) methods: Vec<Method>,
    pub(crate) vars: Vec<Var>,
    pub(crate) stmts: Vec<Stmt>,
    pub(crate) relations: Vec<VarRelations>,
    pub(crate) main: Option<MethodId>,
}

impl Program {
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.index()]
    }

    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.index()]
    }

    pub fn method(&self, id: MethodId) -> &Method {
        &self.methods[id.index()]
    }

    pub fn var(&self, id: VarId) -> &Var {
        &self.vars[id.index()]
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter()
    }

    pub fn stmts(&self) -> impl Iterator<Item = &Stmt> {
        self.stmts.iter()
    }

    pub fn num_stmts(&self) -> usize {
        self.stmts.len()
    }

    pub fn var_relations(&self, var: VarId) -> &VarRelations {
        &self.relations[var.index()]
    }

    /// Whether constant propagation tracks `var`
    pub fn is_int_var(&self, var: VarId) -> bool {
        self.var(var).ty.can_hold_int()
    }

    /// Entry method of the whole program
    pub fn main_method(&self) -> Result<MethodId> {
        self.main
            .ok_or_else(|| AnalysisError::InvalidProgram("no entry method set".to_string()))
    }

    /// Body statement of `method` at `index`
    pub fn body_stmt(&self, method: MethodId, index: usize) -> Option<StmtId> {
        self.method(method).body.get(index).copied()
    }

    /// Find a declared class by name
    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        self.classes.iter().find(|c| c.name == name).map(|c| c.id)
    }

    /// Find a declared method by `Class.method` name
    pub fn method_by_name(&self, class: &str, name: &str) -> Option<MethodId> {
        let class = self.class_by_name(class)?;
        self.class(class).methods.get(name).copied()
    }

    /// Find a variable of `method` by name
    pub fn var_by_name(&self, method: MethodId, name: &str) -> Option<VarId> {
        self.vars
            .iter()
            .find(|v| v.method == method && v.name == name)
            .map(|v| v.id)
    }

    /// Walk the superclass chain of `class` for a concrete method `name`
    pub fn dispatch(&self, class: ClassId, name: &str) -> Option<MethodId> {
        let mut current = Some(class);
        while let Some(c) = current {
            let class = self.class(c);
            if let Some(&m) = class.methods.get(name) {
                if !self.method(m).is_abstract {
                    return Some(m);
                }
            }
            current = class.superclass;
        }
        None
    }

    /// Resolve the target of `invoke` given the receiver's runtime class.
    ///
    /// Static and special calls resolve against the declared class;
    /// virtual and interface calls dispatch on `receiver_class`, and are
    /// unresolvable without one.
    pub fn resolve_callee(&self, receiver_class: Option<ClassId>, invoke: &Invoke) -> Option<MethodId> {
        match invoke.kind {
            CallKind::Static | CallKind::Special => {
                self.dispatch(invoke.method_ref.class, &invoke.method_ref.name)
            }
            CallKind::Virtual | CallKind::Interface => {
                self.dispatch(receiver_class?, &invoke.method_ref.name)
            }
        }
    }
}
