//! Program construction
//!
//! Front ends (and tests) assemble a [`Program`] through [`ProgramBuilder`].
//! Method bodies are pushed statement by statement; branch targets are
//! body indices and are validated by [`ProgramBuilder::build`].

use super::ids::{ClassId, FieldId, MethodId, StmtId, VarId};
use super::program::{Class, Field, Method, Program, Var, VarRelations};
use super::stmt::{FieldAccess, Stmt, StmtKind, SYNTHETIC_INDEX};
use super::types::Type;
use crate::errors::{AnalysisError, Result};
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct ProgramBuilder {
    classes: Vec<Class>,
    fields: Vec<Field>,
    methods: Vec<Method>,
    vars: Vec<Var>,
    stmts: Vec<Stmt>,
    finished: Vec<bool>,
    main: Option<MethodId>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(&mut self, name: impl Into<String>, superclass: Option<ClassId>) -> ClassId {
        self.add_class(name.into(), superclass, false)
    }

    pub fn interface(&mut self, name: impl Into<String>) -> ClassId {
        self.add_class(name.into(), None, true)
    }

    fn add_class(&mut self, name: String, superclass: Option<ClassId>, is_interface: bool) -> ClassId {
        let id = ClassId::new(self.classes.len());
        self.classes.push(Class {
            id,
            name,
            superclass,
            is_interface,
            methods: FxHashMap::default(),
        });
        id
    }

    pub fn field(&mut self, class: ClassId, name: impl Into<String>, ty: Type, is_static: bool) -> FieldId {
        let id = FieldId::new(self.fields.len());
        self.fields.push(Field {
            id,
            name: name.into(),
            class,
            ty,
            is_static,
        });
        id
    }

    /// Start a method body. Instance methods get a `this` variable.
    pub fn method(&mut self, class: ClassId, name: impl Into<String>, is_static: bool) -> MethodBuilder<'_> {
        let id = self.declare_method(class, name.into(), is_static, false);
        if !is_static {
            let this = self.add_var(id, "this".to_string(), Type::Class(class));
            self.methods[id.index()].this = Some(this);
        }
        MethodBuilder {
            program: self,
            id,
            body: Vec::new(),
        }
    }

    /// Declare a body-less method (interface or abstract class member)
    pub fn abstract_method(&mut self, class: ClassId, name: impl Into<String>) -> MethodId {
        let id = self.declare_method(class, name.into(), false, true);
        let this = self.add_var(id, "this".to_string(), Type::Class(class));
        self.methods[id.index()].this = Some(this);
        self.finish_method(id, Vec::new());
        id
    }

    pub fn set_main(&mut self, method: MethodId) {
        self.main = Some(method);
    }

    fn declare_method(&mut self, class: ClassId, name: String, is_static: bool, is_abstract: bool) -> MethodId {
        let id = MethodId::new(self.methods.len());
        self.classes[class.index()].methods.insert(name.clone(), id);
        self.methods.push(Method {
            id,
            name,
            class,
            is_static,
            is_abstract,
            params: Vec::new(),
            this: None,
            return_vars: Vec::new(),
            entry: StmtId(0),
            exit: StmtId(0),
            body: Vec::new(),
        });
        self.finished.push(false);
        id
    }

    fn add_var(&mut self, method: MethodId, name: String, ty: Type) -> VarId {
        let id = VarId::new(self.vars.len());
        self.vars.push(Var { id, name, ty, method });
        id
    }

    fn push_stmt(&mut self, method: MethodId, index: usize, kind: StmtKind) -> StmtId {
        let id = StmtId::new(self.stmts.len());
        self.stmts.push(Stmt {
            id,
            method,
            index,
            kind,
        });
        id
    }

    fn finish_method(&mut self, id: MethodId, body: Vec<StmtKind>) {
        let entry = self.push_stmt(id, SYNTHETIC_INDEX, StmtKind::Entry);
        let mut return_vars = Vec::new();
        let mut stmt_ids = Vec::with_capacity(body.len());
        for (index, kind) in body.into_iter().enumerate() {
            if let StmtKind::Return { value: Some(v) } = &kind {
                if !return_vars.contains(v) {
                    return_vars.push(*v);
                }
            }
            stmt_ids.push(self.push_stmt(id, index, kind));
        }
        let exit = self.push_stmt(id, SYNTHETIC_INDEX, StmtKind::Exit);

        let method = &mut self.methods[id.index()];
        method.entry = entry;
        method.exit = exit;
        method.body = stmt_ids;
        method.return_vars = return_vars;
        self.finished[id.index()] = true;
    }

    /// Validate and freeze the program
    pub fn build(self) -> Result<Program> {
        for method in &self.methods {
            if !self.finished[method.id.index()] {
                return Err(AnalysisError::InvalidProgram(format!(
                    "method '{}' was declared but never finished",
                    method.name
                )));
            }
            let len = method.body.len();
            for &sid in &method.body {
                let stmt = &self.stmts[sid.index()];
                let targets: Vec<usize> = match &stmt.kind {
                    StmtKind::If { cond, target } => {
                        if !cond.op.is_condition() {
                            return Err(AnalysisError::InvalidProgram(format!(
                                "'{}' is not a condition operator (method '{}', index {})",
                                cond.op.symbol(),
                                method.name,
                                stmt.index
                            )));
                        }
                        vec![*target]
                    }
                    StmtKind::Goto { target } => vec![*target],
                    StmtKind::Switch { cases, default, .. } => cases
                        .iter()
                        .map(|(_, t)| *t)
                        .chain(std::iter::once(*default))
                        .collect(),
                    _ => continue,
                };
                if let Some(bad) = targets.into_iter().find(|&t| t >= len) {
                    return Err(AnalysisError::InvalidProgram(format!(
                        "branch target {} out of bounds in method '{}' (body has {} statements)",
                        bad, method.name, len
                    )));
                }
            }
        }

        let mut relations = vec![VarRelations::default(); self.vars.len()];
        for stmt in &self.stmts {
            match &stmt.kind {
                StmtKind::StoreField {
                    access: FieldAccess::Instance { base, .. },
                    ..
                } => relations[base.index()].store_fields.push(stmt.id),
                StmtKind::LoadField {
                    access: FieldAccess::Instance { base, .. },
                    ..
                } => relations[base.index()].load_fields.push(stmt.id),
                StmtKind::StoreArray { access, .. } => {
                    relations[access.base.index()].store_arrays.push(stmt.id)
                }
                StmtKind::LoadArray { access, .. } => {
                    relations[access.base.index()].load_arrays.push(stmt.id)
                }
                StmtKind::Invoke(invoke) => {
                    if let Some(recv) = invoke.receiver {
                        relations[recv.index()].invokes.push(stmt.id);
                    }
                }
                _ => {}
            }
        }

        Ok(Program {
            classes: self.classes,
            fields: self.fields,
            methods: self.methods,
            vars: self.vars,
            stmts: self.stmts,
            relations,
            main: self.main,
        })
    }
}

/// Body under construction; dropped without [`finish`](Self::finish) the
/// method stays unfinished and `build` rejects the program.
pub struct MethodBuilder<'a> {
    program: &'a mut ProgramBuilder,
    id: MethodId,
    body: Vec<StmtKind>,
}

impl<'a> MethodBuilder<'a> {
    pub fn id(&self) -> MethodId {
        self.id
    }

    pub fn this(&self) -> Option<VarId> {
        self.program.methods[self.id.index()].this
    }

    pub fn param(&mut self, name: impl Into<String>, ty: Type) -> VarId {
        let var = self.program.add_var(self.id, name.into(), ty);
        self.program.methods[self.id.index()].params.push(var);
        var
    }

    pub fn var(&mut self, name: impl Into<String>, ty: Type) -> VarId {
        self.program.add_var(self.id, name.into(), ty)
    }

    /// Append a statement, returning its body index
    pub fn push(&mut self, kind: StmtKind) -> usize {
        self.body.push(kind);
        self.body.len() - 1
    }

    /// Index the next pushed statement will get
    pub fn next_index(&self) -> usize {
        self.body.len()
    }

    /// Re-point the branch at `index` (forward jumps are pushed before
    /// their target exists)
    pub fn set_target(&mut self, index: usize, new_target: usize) {
        match self.body.get_mut(index) {
            Some(StmtKind::If { target, .. }) | Some(StmtKind::Goto { target }) => {
                *target = new_target
            }
            _ => {}
        }
    }

    pub fn finish(self) -> MethodId {
        let id = self.id;
        self.program.finish_method(id, self.body);
        id
    }
}
