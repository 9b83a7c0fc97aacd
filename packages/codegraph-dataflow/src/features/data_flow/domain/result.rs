//! Fixpoint solution: IN and OUT fact per node

use crate::shared::models::StmtId;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct DataflowResult<F> {
    in_facts: FxHashMap<StmtId, F>,
    out_facts: FxHashMap<StmtId, F>,
}

impl<F> Default for DataflowResult<F> {
    fn default() -> Self {
        Self {
            in_facts: FxHashMap::default(),
            out_facts: FxHashMap::default(),
        }
    }
}

impl<F> DataflowResult<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_fact(&self, node: StmtId) -> Option<&F> {
        self.in_facts.get(&node)
    }

    pub fn out_fact(&self, node: StmtId) -> Option<&F> {
        self.out_facts.get(&node)
    }

    pub fn set_in_fact(&mut self, node: StmtId, fact: F) {
        self.in_facts.insert(node, fact);
    }

    pub fn set_out_fact(&mut self, node: StmtId, fact: F) {
        self.out_facts.insert(node, fact);
    }

    /// IN and OUT of `node`, both mutable
    pub fn facts_mut(&mut self, node: StmtId) -> Option<(&mut F, &mut F)> {
        let in_fact = self.in_facts.get_mut(&node)?;
        let out_fact = self.out_facts.get_mut(&node)?;
        Some((in_fact, out_fact))
    }

    /// Nodes that carry a fact
    pub fn nodes(&self) -> impl Iterator<Item = StmtId> + '_ {
        self.out_facts.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.out_facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out_facts.is_empty()
    }
}
