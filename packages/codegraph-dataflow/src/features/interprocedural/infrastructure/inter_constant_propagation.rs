//! Interprocedural constant propagation
//!
//! Statement transfer is the intraprocedural one; values cross method
//! boundaries only along ICFG edges:
//! - **Call**: argument values become parameter values, nothing else flows
//! - **Return**: the meet of all returned values is bound to the result
//! - **CallToReturn**: caller facts minus the call's result variable
//!
//! With alias awareness on, an int-valued heap load takes the meet of the
//! values stored by every may-aliasing store (read from the IN fact of the
//! store), and a store schedules its may-aliasing loads when its fact
//! changes. Without it, heap loads are NAC.

use super::alias::{may_alias_indices, AliasIndex};
use crate::config::InterConstPropConfig;
use crate::errors::{AnalysisError, Result};
use crate::features::data_flow::domain::{CpFact, Value};
use crate::features::data_flow::infrastructure::constant_propagation::ConstantPropagation;
use crate::features::flow_graph::{ICFGEdge, ICFGEdgeKind, ICFG};
use crate::features::interprocedural::ports::{InterContext, InterDataflowAnalysis};
use crate::features::points_to::PointerAnalysisResult;
use crate::shared::models::{MethodId, Program, Stmt, StmtKind};

pub const INTER_CONSTANT_PROPAGATION: &str = "inter-constprop";

pub struct InterConstantPropagation<'a> {
    program: &'a Program,
    aliases: Option<AliasIndex>,
}

impl<'a> InterConstantPropagation<'a> {
    /// Heap loads yield NAC
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            aliases: None,
        }
    }

    /// Resolve heap loads through stores that may alias them
    pub fn with_aliases(program: &'a Program, icfg: &ICFG, pta: Option<&PointerAnalysisResult>) -> Result<Self> {
        let pta = pta.ok_or_else(|| {
            AnalysisError::missing_precondition(INTER_CONSTANT_PROPAGATION, "pointer analysis result")
        })?;
        Ok(Self {
            program,
            aliases: Some(AliasIndex::build(program, icfg, pta)),
        })
    }

    pub fn from_config(
        program: &'a Program,
        icfg: &ICFG,
        config: &InterConstPropConfig,
        pta: Option<&PointerAnalysisResult>,
    ) -> Result<Self> {
        if config.alias_aware {
            Self::with_aliases(program, icfg, pta)
        } else {
            Ok(Self::new(program))
        }
    }

    pub fn is_alias_aware(&self) -> bool {
        self.aliases.is_some()
    }

    /// Meet of the values written by stores that may alias `load`
    fn load_value(&self, aliases: &AliasIndex, load: &Stmt, in_fact: &CpFact, ctx: &InterContext<'_, CpFact>) -> Value {
        let load_index = match &load.kind {
            StmtKind::LoadArray { access, .. } => Some(in_fact.get(access.index)),
            _ => None,
        };

        let mut value = Value::Undef;
        for &store in aliases.stores_for(load.id) {
            let Some(store_in) = ctx.in_fact(store) else {
                continue;
            };
            let (rhs, store_index) = match &self.program.stmt(store).kind {
                StmtKind::StoreField { rhs, .. } => (*rhs, None),
                StmtKind::StoreArray { access, rhs } => (*rhs, Some(store_in.get(access.index))),
                _ => continue,
            };
            if let (Some(a), Some(b)) = (load_index, store_index) {
                if !may_alias_indices(a, b) {
                    continue;
                }
            }
            value = value.meet(store_in.get(rhs));
        }
        value
    }
}

impl<'a> InterDataflowAnalysis for InterConstantPropagation<'a> {
    type Fact = CpFact;

    fn name(&self) -> &'static str {
        INTER_CONSTANT_PROPAGATION
    }

    fn is_forward(&self) -> bool {
        true
    }

    fn new_boundary_fact(&self, method: MethodId) -> CpFact {
        self.program
            .method(method)
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

    fn transfer_call_node(&self, _stmt: &Stmt, in_fact: &CpFact, out_fact: &mut CpFact) -> Result<bool> {
        Ok(out_fact.copy_from(in_fact))
    }

    fn transfer_non_call_node(
        &self,
        stmt: &Stmt,
        in_fact: &CpFact,
        out_fact: &mut CpFact,
        ctx: &mut InterContext<'_, CpFact>,
    ) -> Result<bool> {
        let mut new_out = in_fact.clone();

        match (&stmt.kind, &self.aliases) {
            (StmtKind::LoadField { lhs, .. } | StmtKind::LoadArray { lhs, .. }, Some(aliases))
                if self.program.is_int_var(*lhs) =>
            {
                new_out.update(*lhs, self.load_value(aliases, stmt, in_fact, ctx));
            }
            _ => {
                if let Some(value) = ConstantPropagation::gen_value(self.program, stmt, in_fact)? {
                    if let Some(def) = stmt.def() {
                        new_out.update(def, value);
                    }
                }
            }
        }

        let changed = out_fact.copy_from(&new_out);
        if changed {
            if let (StmtKind::StoreField { .. } | StmtKind::StoreArray { .. }, Some(aliases)) =
                (&stmt.kind, &self.aliases)
            {
                for &load in aliases.loads_for(stmt.id) {
                    ctx.enqueue(load);
                }
            }
        }
        Ok(changed)
    }

    fn transfer_normal_edge(&self, _edge: &ICFGEdge, out: &CpFact) -> CpFact {
        out.clone()
    }

    fn transfer_call_to_return_edge(&self, edge: &ICFGEdge, out: &CpFact) -> CpFact {
        let mut fact = out.clone();
        if let Some(lhs) = self.program.stmt(edge.source).def() {
            fact.remove(lhs);
        }
        fact
    }

    fn transfer_call_edge(&self, edge: &ICFGEdge, call_site_out: &CpFact) -> CpFact {
        let mut fact = CpFact::new();
        if let ICFGEdgeKind::Call { args, params, .. } = &edge.kind {
            for (&arg, &param) in args.iter().zip(params) {
                if self.program.is_int_var(param) {
                    fact.update(param, call_site_out.get(arg));
                }
            }
        }
        fact
    }

    fn transfer_return_edge(&self, edge: &ICFGEdge, return_out: &CpFact) -> CpFact {
        let mut fact = CpFact::new();
        if let ICFGEdgeKind::Return {
            return_vars,
            result: Some(result),
            ..
        } = &edge.kind
        {
            if self.program.is_int_var(*result) {
                let value = return_vars
                    .iter()
                    .fold(Value::Undef, |acc, &v| acc.meet(return_out.get(v)));
                fact.update(*result, value);
            }
        }
        fact
    }
}
