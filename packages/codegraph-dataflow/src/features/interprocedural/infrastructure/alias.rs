//! Heap access alias index
//!
//! Pairs every int-valued heap load with the stores that may write the
//! location it reads, using pointer analysis results for the bases:
//! - static fields alias when they are the same field
//! - instance fields alias when the field matches and the base variables
//!   may point to a common object
//! - array elements alias when the bases may point to a common object;
//!   the index check needs dataflow facts and happens at transfer time
//!
//! Built once per run, so transfers never scan the whole ICFG.

use crate::features::data_flow::domain::Value;
use crate::features::flow_graph::ICFG;
use crate::features::points_to::PointerAnalysisResult;
use crate::shared::models::{FieldAccess, FieldId, Program, StmtId, StmtKind, VarId};
use rustc_hash::FxHashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct AliasIndex {
    /// load → stores that may write what it reads
    sources: FxHashMap<StmtId, Vec<StmtId>>,
    /// store → loads that may read what it writes
    readers: FxHashMap<StmtId, Vec<StmtId>>,
}

/// Heap location of one access, keyed for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LocationKey {
    Static(FieldId),
    Instance(FieldId),
    Array,
}

#[derive(Debug, Clone, Copy)]
struct Access {
    stmt: StmtId,
    base: Option<VarId>,
}

impl AliasIndex {
    pub fn build(program: &Program, icfg: &ICFG, pta: &PointerAnalysisResult) -> Self {
        let mut loads: FxHashMap<LocationKey, Vec<Access>> = FxHashMap::default();
        let mut stores: FxHashMap<LocationKey, Vec<Access>> = FxHashMap::default();

        for &node in icfg.nodes() {
            let stmt = program.stmt(node);
            let (key, base, is_load, value) = match &stmt.kind {
                StmtKind::LoadField { lhs, access } => (field_key(access), access.base(), true, *lhs),
                StmtKind::StoreField { access, rhs } => (field_key(access), access.base(), false, *rhs),
                StmtKind::LoadArray { lhs, access } => (LocationKey::Array, Some(access.base), true, *lhs),
                StmtKind::StoreArray { access, rhs } => (LocationKey::Array, Some(access.base), false, *rhs),
                _ => continue,
            };
            if !program.is_int_var(value) {
                continue;
            }
            let access = Access { stmt: node, base };
            if is_load {
                loads.entry(key).or_default().push(access);
            } else {
                stores.entry(key).or_default().push(access);
            }
        }

        let mut index = AliasIndex::default();
        let mut pairs = 0usize;
        for (key, key_loads) in &loads {
            let Some(key_stores) = stores.get(key) else {
                continue;
            };
            for load in key_loads {
                for store in key_stores {
                    if may_alias_bases(pta, load.base, store.base) {
                        index.sources.entry(load.stmt).or_default().push(store.stmt);
                        index.readers.entry(store.stmt).or_default().push(load.stmt);
                        pairs += 1;
                    }
                }
            }
        }
        debug!(alias_pairs = pairs, "heap alias index built");
        index
    }

    /// Stores that may write the location `load` reads
    pub fn stores_for(&self, load: StmtId) -> &[StmtId] {
        self.sources.get(&load).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Loads that may read the location `store` writes
    pub fn loads_for(&self, store: StmtId) -> &[StmtId] {
        self.readers.get(&store).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn field_key(access: &FieldAccess) -> LocationKey {
    match access {
        FieldAccess::Static(field) => LocationKey::Static(*field),
        FieldAccess::Instance { field, .. } => LocationKey::Instance(*field),
    }
}

fn may_alias_bases(pta: &PointerAnalysisResult, a: Option<VarId>, b: Option<VarId>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => pta.may_alias(a, b),
        // Static field accesses have no base
        (None, None) => true,
        _ => false,
    }
}

/// Whether array indices with values `a` (load) and `b` (store) may be equal
pub fn may_alias_indices(a: Value, b: Value) -> bool {
    match (a, b) {
        (Value::Undef, _) | (_, Value::Undef) => false,
        (Value::Constant(x), Value::Constant(y)) => x == y,
        _ => true,
    }
}
