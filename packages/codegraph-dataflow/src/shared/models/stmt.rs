//! Statement model
//!
//! Three-address statements over local variables. Every statement kind is a
//! variant of the closed [`StmtKind`] enum so analyses match exhaustively
//! instead of dispatching through visitors.

use super::ids::{ClassId, FieldId, MethodId, StmtId, VarId};
use super::types::Type;
use serde::{Deserialize, Serialize};

/// Index carried by the synthetic entry/exit nodes of a method
pub const SYNTHETIC_INDEX: usize = usize::MAX;

/// A program point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub id: StmtId,
    /// Owning method
    pub method: MethodId,
    /// Position in the method body ([`SYNTHETIC_INDEX`] for entry/exit)
    pub index: usize,
    pub kind: StmtKind,
}

/// Literal operand of an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i32),
    Long(i64),
    Null,
    /// String, class or floating literal; opaque to the analyses
    Other(String),
}

/// Binary operator
///
/// Arithmetic (`Add..Rem`), relational (`Eq..Ge`), shift (`Shl..Ushr`) and
/// bitwise (`And..Xor`) groups, with Java `int` semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Shl,
    Shr,
    Ushr,
    And,
    Or,
    Xor,
}

impl BinaryOp {
    pub fn is_condition(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge
        )
    }

    /// Division and remainder may trap, so they are never removable
    pub fn is_div_or_rem(self) -> bool {
        matches!(self, BinaryOp::Div | BinaryOp::Rem)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Ushr => ">>>",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
        }
    }
}

/// `left op right`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryExp {
    pub op: BinaryOp,
    pub left: VarId,
    pub right: VarId,
}

impl BinaryExp {
    pub fn new(op: BinaryOp, left: VarId, right: VarId) -> Self {
        Self { op, left, right }
    }
}

/// Field access: `C.f` or `base.f`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldAccess {
    Static(FieldId),
    Instance { base: VarId, field: FieldId },
}

impl FieldAccess {
    pub fn field(&self) -> FieldId {
        match self {
            FieldAccess::Static(field) => *field,
            FieldAccess::Instance { field, .. } => *field,
        }
    }

    pub fn base(&self) -> Option<VarId> {
        match self {
            FieldAccess::Static(_) => None,
            FieldAccess::Instance { base, .. } => Some(*base),
        }
    }
}

/// Array access: `base[index]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrayAccess {
    pub base: VarId,
    pub index: VarId,
}

/// Dispatch kind of a call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CallKind {
    Static,
    Special,
    Virtual,
    Interface,
}

/// Declared target of a call: declaring class plus method name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    pub class: ClassId,
    pub name: String,
}

impl MethodRef {
    pub fn new(class: ClassId, name: impl Into<String>) -> Self {
        Self {
            class,
            name: name.into(),
        }
    }
}

/// Call site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoke {
    /// Result variable (`None` for `foo();`)
    pub lhs: Option<VarId>,
    pub kind: CallKind,
    pub method_ref: MethodRef,
    /// Receiver for instance calls
    pub receiver: Option<VarId>,
    pub args: Vec<VarId>,
}

impl Invoke {
    pub fn is_static(&self) -> bool {
        self.kind == CallKind::Static
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    /// Synthetic method entry
    Entry,
    /// Synthetic method exit
    Exit,
    Nop,
    /// `lhs = new T`
    New { lhs: VarId, ty: Type },
    /// `lhs = literal`
    AssignLiteral { lhs: VarId, literal: Literal },
    /// `lhs = rhs`
    Copy { lhs: VarId, rhs: VarId },
    /// `lhs = left op right`
    Binary { lhs: VarId, exp: BinaryExp },
    /// `lhs = -operand`
    Neg { lhs: VarId, operand: VarId },
    /// `lhs = array.length`
    ArrayLength { lhs: VarId, array: VarId },
    /// `lhs = (T) operand`
    Cast { lhs: VarId, operand: VarId, ty: Type },
    /// `lhs = C.f` / `lhs = base.f`
    LoadField { lhs: VarId, access: FieldAccess },
    /// `C.f = rhs` / `base.f = rhs`
    StoreField { access: FieldAccess, rhs: VarId },
    /// `lhs = base[index]`
    LoadArray { lhs: VarId, access: ArrayAccess },
    /// `base[index] = rhs`
    StoreArray { access: ArrayAccess, rhs: VarId },
    Invoke(Invoke),
    /// `if (cond) goto target`; falls through otherwise
    If { cond: BinaryExp, target: usize },
    /// `switch (var)` with `(case value, target)` pairs
    Switch {
        var: VarId,
        cases: Vec<(i32, usize)>,
        default: usize,
    },
    Goto { target: usize },
    Return { value: Option<VarId> },
    /// Construct the front end could not classify (`instanceof`, monitors, ...)
    Unknown {
        tag: String,
        def: Option<VarId>,
        uses: Vec<VarId>,
    },
}

impl Stmt {
    /// Variable defined by this statement, if any
    pub fn def(&self) -> Option<VarId> {
        match &self.kind {
            StmtKind::New { lhs, .. }
            | StmtKind::AssignLiteral { lhs, .. }
            | StmtKind::Copy { lhs, .. }
            | StmtKind::Binary { lhs, .. }
            | StmtKind::Neg { lhs, .. }
            | StmtKind::ArrayLength { lhs, .. }
            | StmtKind::Cast { lhs, .. }
            | StmtKind::LoadField { lhs, .. }
            | StmtKind::LoadArray { lhs, .. } => Some(*lhs),
            StmtKind::Invoke(invoke) => invoke.lhs,
            StmtKind::Unknown { def, .. } => *def,
            StmtKind::Entry
            | StmtKind::Exit
            | StmtKind::Nop
            | StmtKind::StoreField { .. }
            | StmtKind::StoreArray { .. }
            | StmtKind::If { .. }
            | StmtKind::Switch { .. }
            | StmtKind::Goto { .. }
            | StmtKind::Return { .. } => None,
        }
    }

    /// Variables read by this statement
    pub fn uses(&self) -> Vec<VarId> {
        match &self.kind {
            StmtKind::Entry
            | StmtKind::Exit
            | StmtKind::Nop
            | StmtKind::New { .. }
            | StmtKind::AssignLiteral { .. }
            | StmtKind::Goto { .. } => Vec::new(),
            StmtKind::Copy { rhs, .. } => vec![*rhs],
            StmtKind::Binary { exp, .. } | StmtKind::If { cond: exp, .. } => {
                vec![exp.left, exp.right]
            }
            StmtKind::Neg { operand, .. } | StmtKind::Cast { operand, .. } => vec![*operand],
            StmtKind::ArrayLength { array, .. } => vec![*array],
            StmtKind::LoadField { access, .. } => access.base().into_iter().collect(),
            StmtKind::StoreField { access, rhs } => {
                let mut uses: Vec<VarId> = access.base().into_iter().collect();
                uses.push(*rhs);
                uses
            }
            StmtKind::LoadArray { access, .. } => vec![access.base, access.index],
            StmtKind::StoreArray { access, rhs } => vec![access.base, access.index, *rhs],
            StmtKind::Invoke(invoke) => invoke
                .receiver
                .into_iter()
                .chain(invoke.args.iter().copied())
                .collect(),
            StmtKind::Switch { var, .. } => vec![*var],
            StmtKind::Return { value } => value.iter().copied().collect(),
            StmtKind::Unknown { uses, .. } => uses.clone(),
        }
    }

    /// Variable assigned by a statement whose right-hand side has no
    /// observable effect.
    ///
    /// Allocation, cast, field/array access, array length and
    /// division/remainder all count as effects. Calls and unclassified
    /// statements are never candidates.
    pub fn effect_free_def(&self) -> Option<VarId> {
        match &self.kind {
            StmtKind::AssignLiteral { lhs, .. }
            | StmtKind::Copy { lhs, .. }
            | StmtKind::Neg { lhs, .. } => Some(*lhs),
            StmtKind::Binary { lhs, exp } if !exp.op.is_div_or_rem() => Some(*lhs),
            _ => None,
        }
    }

    pub fn as_invoke(&self) -> Option<&Invoke> {
        match &self.kind {
            StmtKind::Invoke(invoke) => Some(invoke),
            _ => None,
        }
    }

    pub fn is_invoke(&self) -> bool {
        matches!(self.kind, StmtKind::Invoke(_))
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self.kind, StmtKind::Entry | StmtKind::Exit)
    }

    /// Short tag used in diagnostics
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            StmtKind::Entry => "entry",
            StmtKind::Exit => "exit",
            StmtKind::Nop => "nop",
            StmtKind::New { .. } => "new",
            StmtKind::AssignLiteral { .. } => "literal",
            StmtKind::Copy { .. } => "copy",
            StmtKind::Binary { .. } => "binary",
            StmtKind::Neg { .. } => "neg",
            StmtKind::ArrayLength { .. } => "array-length",
            StmtKind::Cast { .. } => "cast",
            StmtKind::LoadField { .. } => "load-field",
            StmtKind::StoreField { .. } => "store-field",
            StmtKind::LoadArray { .. } => "load-array",
            StmtKind::StoreArray { .. } => "store-array",
            StmtKind::Invoke(_) => "invoke",
            StmtKind::If { .. } => "if",
            StmtKind::Switch { .. } => "switch",
            StmtKind::Goto { .. } => "goto",
            StmtKind::Return { .. } => "return",
            StmtKind::Unknown { tag, .. } => tag.as_str(),
        }
    }
}
