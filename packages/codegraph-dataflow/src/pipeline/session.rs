//! Analysis session
//!
//! Holds the program and every result published during one whole-program
//! run. Results are keyed by [`AnalysisId`], published once, and shared
//! behind `Arc` with any later stage that depends on them.

use crate::errors::{AnalysisError, Result};
use crate::shared::models::{MethodId, Program};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Key of a published result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnalysisId {
    PointerAnalysis,
    Cfg(MethodId),
    ConstantPropagation(MethodId),
    LiveVariables(MethodId),
    DeadCode(MethodId),
    Icfg,
    InterConstantPropagation,
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisId::PointerAnalysis => f.write_str("pta"),
            AnalysisId::Cfg(m) => write!(f, "cfg({})", m),
            AnalysisId::ConstantPropagation(m) => write!(f, "constprop({})", m),
            AnalysisId::LiveVariables(m) => write!(f, "livevar({})", m),
            AnalysisId::DeadCode(m) => write!(f, "deadcode({})", m),
            AnalysisId::Icfg => f.write_str("icfg"),
            AnalysisId::InterConstantPropagation => f.write_str("inter-constprop"),
        }
    }
}

type SharedResult = Arc<dyn Any + Send + Sync>;

pub struct AnalysisSession {
    program: Arc<Program>,
    results: FxHashMap<AnalysisId, SharedResult>,
    /// Publication order
    order: Vec<AnalysisId>,
}

impl AnalysisSession {
    pub fn new(program: Arc<Program>) -> Self {
        Self {
            program,
            results: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    pub fn program(&self) -> &Arc<Program> {
        &self.program
    }

    /// Publish `value` under `id`; a second publication is an error
    pub fn publish<T: Any + Send + Sync>(&mut self, id: AnalysisId, value: T) -> Result<Arc<T>> {
        if self.results.contains_key(&id) {
            return Err(AnalysisError::ResultAlreadyPublished(id));
        }
        let shared = Arc::new(value);
        let erased: SharedResult = shared.clone();
        self.results.insert(id, erased);
        self.order.push(id);
        debug!(result = %id, "result published");
        Ok(shared)
    }

    /// Result published under `id`
    ///
    /// Fails with `MissingResult` when nothing of type `T` was published
    /// under that key.
    pub fn result<T: Any + Send + Sync>(&self, id: AnalysisId) -> Result<Arc<T>> {
        self.get(id).ok_or(AnalysisError::MissingResult(id))
    }

    pub fn get<T: Any + Send + Sync>(&self, id: AnalysisId) -> Option<Arc<T>> {
        self.results.get(&id).cloned()?.downcast::<T>().ok()
    }

    pub fn contains(&self, id: AnalysisId) -> bool {
        self.results.contains_key(&id)
    }

    pub fn published(&self) -> &[AnalysisId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl fmt::Debug for AnalysisSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisSession")
            .field("published", &self.order)
            .finish()
    }
}
