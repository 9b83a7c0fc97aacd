//! Intraprocedural constant propagation
//!
//! Forward analysis over [`CpFact`]. Only variables of int-like type are
//! tracked; heap loads, calls and casts yield NAC.
//!
//! Binary expressions follow Java `int` semantics: wrapping arithmetic,
//! shift distances masked to five bits, relational operators produce 1/0.
//! Division or remainder by a constant zero evaluates to UNDEF whatever the
//! left operand is. A divisor that is still UNDEF also yields UNDEF, so the
//! result cannot drop from NAC back to UNDEF once the divisor becomes zero.

use crate::errors::{AnalysisError, Result};
use crate::features::data_flow::domain::{CpFact, Value};
use crate::features::data_flow::ports::DataflowAnalysis;
use crate::features::flow_graph::CFG;
use crate::shared::models::{BinaryExp, BinaryOp, Literal, Program, Stmt, StmtKind};

pub const CONSTANT_PROPAGATION: &str = "constprop";

pub struct ConstantPropagation<'a> {
    program: &'a Program,
}

impl<'a> ConstantPropagation<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self { program }
    }

    /// Value `stmt` assigns to its int-typed def, given the IN fact.
    ///
    /// Returns `None` when the statement defines nothing constant
    /// propagation tracks.
    pub fn gen_value(program: &Program, stmt: &Stmt, in_fact: &CpFact) -> Result<Option<Value>> {
        let Some(def) = stmt.def() else {
            return Ok(None);
        };
        if !program.is_int_var(def) {
            return Ok(None);
        }

        let value = match &stmt.kind {
            StmtKind::AssignLiteral { literal, .. } => match literal {
                Literal::Int(i) => Value::Constant(*i),
                _ => Value::Nac,
            },
            StmtKind::Copy { rhs, .. } => in_fact.get(*rhs),
            StmtKind::Binary { exp, .. } => evaluate(exp, in_fact),
            StmtKind::Neg { operand, .. } => match in_fact.get(*operand) {
                Value::Constant(c) => Value::Constant(c.wrapping_neg()),
                other => other,
            },
            StmtKind::Invoke(_)
            | StmtKind::Cast { .. }
            | StmtKind::ArrayLength { .. }
            | StmtKind::LoadField { .. }
            | StmtKind::LoadArray { .. }
            | StmtKind::New { .. } => Value::Nac,
            StmtKind::Unknown { tag, .. } => {
                return Err(AnalysisError::unsupported(CONSTANT_PROPAGATION, stmt.id, tag.clone()));
            }
            StmtKind::Entry
            | StmtKind::Exit
            | StmtKind::Nop
            | StmtKind::StoreField { .. }
            | StmtKind::StoreArray { .. }
            | StmtKind::If { .. }
            | StmtKind::Switch { .. }
            | StmtKind::Goto { .. }
            | StmtKind::Return { .. } => return Ok(None),
        };
        Ok(Some(value))
    }
}

/// Evaluate `exp` under `fact`
pub fn evaluate(exp: &BinaryExp, fact: &CpFact) -> Value {
    let left = fact.get(exp.left);
    let right = fact.get(exp.right);

    if exp.op.is_div_or_rem() && matches!(right, Value::Undef | Value::Constant(0)) {
        return Value::Undef;
    }

    match (left, right) {
        (Value::Constant(a), Value::Constant(b)) => Value::Constant(apply(exp.op, a, b)),
        (Value::Nac, _) | (_, Value::Nac) => Value::Nac,
        _ => Value::Undef,
    }
}

/// Concrete `int` semantics of `op`. Callers rule out division by zero.
fn apply(op: BinaryOp, a: i32, b: i32) -> i32 {
    match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div => a.wrapping_div(b),
        BinaryOp::Rem => a.wrapping_rem(b),
        BinaryOp::Eq => (a == b) as i32,
        BinaryOp::Ne => (a != b) as i32,
        BinaryOp::Lt => (a < b) as i32,
        BinaryOp::Gt => (a > b) as i32,
        BinaryOp::Le => (a <= b) as i32,
        BinaryOp::Ge => (a >= b) as i32,
        BinaryOp::Shl => a.wrapping_shl(b as u32),
        BinaryOp::Shr => a.wrapping_shr(b as u32),
        BinaryOp::Ushr => (a as u32).wrapping_shr(b as u32) as i32,
        BinaryOp::And => a & b,
        BinaryOp::Or => a | b,
        BinaryOp::Xor => a ^ b,
    }
}

impl<'a> DataflowAnalysis for ConstantPropagation<'a> {
    type Fact = CpFact;

    fn name(&self) -> &'static str {
        CONSTANT_PROPAGATION
    }

    fn is_forward(&self) -> bool {
        true
    }

    /// Int-like parameters are unknown on entry
    fn new_boundary_fact(&self, cfg: &CFG) -> CpFact {
        self.program
            .method(cfg.method())
            .params
            .iter()
            .filter(|&&p| self.program.is_int_var(p))
            .map(|&p| (p, Value::Nac))
            .collect()
    }

    fn new_initial_fact(&self) -> CpFact {
        CpFact::new()
    }

    fn meet_into(&self, fact: &CpFact, target: &mut CpFact) {
        target.meet_with(fact);
    }

    fn transfer_node(&self, stmt: &Stmt, in_fact: &mut CpFact, out_fact: &mut CpFact) -> Result<bool> {
        let mut new_out = in_fact.clone();
        if let Some(value) = Self::gen_value(self.program, stmt, in_fact)? {
            if let Some(def) = stmt.def() {
                new_out.update(def, value);
            }
        }
        Ok(out_fact.copy_from(&new_out))
    }
}
