//! Live variable analysis
//!
//! Backward, may analysis: `IN = uses ∪ (OUT − def)`.

use crate::errors::Result;
use crate::features::data_flow::domain::SetFact;
use crate::features::data_flow::ports::DataflowAnalysis;
use crate::features::flow_graph::CFG;
use crate::shared::models::{Stmt, VarId};

pub const LIVE_VARIABLES: &str = "livevar";

pub type LiveVars = SetFact<VarId>;

#[derive(Debug, Default)]
pub struct LiveVariableAnalysis;

impl LiveVariableAnalysis {
    pub fn new() -> Self {
        Self
    }
}

impl DataflowAnalysis for LiveVariableAnalysis {
    type Fact = LiveVars;

    fn name(&self) -> &'static str {
        LIVE_VARIABLES
    }

    fn is_forward(&self) -> bool {
        false
    }

    fn new_boundary_fact(&self, _cfg: &CFG) -> LiveVars {
        SetFact::new()
    }

    fn new_initial_fact(&self) -> LiveVars {
        SetFact::new()
    }

    fn meet_into(&self, fact: &LiveVars, target: &mut LiveVars) {
        target.union_with(fact);
    }

    fn transfer_node(&self, stmt: &Stmt, in_fact: &mut LiveVars, out_fact: &mut LiveVars) -> Result<bool> {
        let mut new_in = out_fact.clone();
        if let Some(def) = stmt.def() {
            new_in.remove(&def);
        }
        for used in stmt.uses() {
            new_in.add(used);
        }
        if *in_fact == new_in {
            return Ok(false);
        }
        in_fact.set_to(&new_in);
        Ok(true)
    }
}
