//! Context selectors
//!
//! - **Insensitive**: every context is empty
//! - **k-call-site (k-CFA)**: k most recent call sites
//! - **k-object**: allocation sites of the receiver chain
//! - **k-type**: classes declaring the methods that allocated the receiver chain
//!
//! Static calls keep the caller's context under object and type
//! sensitivity, since there is no receiver to select on.
//!
//! # References
//! - Milanova et al. "Parameterized Object Sensitivity" (TOSEM 2005)
//! - Smaragdakis et al. "Pick Your Contexts Well" (POPL 2011)

use crate::config::ContextStrategy;
use crate::features::points_to::domain::{Context, ContextElement, Obj};
use crate::features::points_to::ports::ContextSelector;
use crate::shared::models::{MethodId, StmtId};

/// Build the selector for `strategy`
pub fn make_selector(strategy: ContextStrategy) -> Box<dyn ContextSelector> {
    match strategy {
        ContextStrategy::Insensitive => Box::new(InsensitiveSelector),
        ContextStrategy::CallSite { k } => Box::new(CallSiteSelector { k }),
        ContextStrategy::Object { k } => Box::new(ObjectSelector { k }),
        ContextStrategy::Type { k } => Box::new(TypeSelector { k }),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InsensitiveSelector;

impl ContextSelector for InsensitiveSelector {
    fn name(&self) -> String {
        "ci".to_string()
    }

    fn select_static_context(&self, _caller: &Context, _call_site: StmtId, _callee: MethodId) -> Context {
        Context::empty()
    }

    fn select_instance_context(
        &self,
        _caller: &Context,
        _call_site: StmtId,
        _receiver_context: &Context,
        _receiver: &Obj,
        _callee: MethodId,
    ) -> Context {
        Context::empty()
    }

    fn select_heap_context(&self, _method_context: &Context, _obj: &Obj) -> Context {
        Context::empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CallSiteSelector {
    pub k: usize,
}

impl ContextSelector for CallSiteSelector {
    fn name(&self) -> String {
        format!("{}-call", self.k)
    }

    fn select_static_context(&self, caller: &Context, call_site: StmtId, _callee: MethodId) -> Context {
        caller.append(ContextElement::CallSite(call_site), self.k)
    }

    fn select_instance_context(
        &self,
        caller: &Context,
        call_site: StmtId,
        _receiver_context: &Context,
        _receiver: &Obj,
        _callee: MethodId,
    ) -> Context {
        caller.append(ContextElement::CallSite(call_site), self.k)
    }

    fn select_heap_context(&self, method_context: &Context, _obj: &Obj) -> Context {
        method_context.truncate(self.k.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectSelector {
    pub k: usize,
}

impl ContextSelector for ObjectSelector {
    fn name(&self) -> String {
        format!("{}-obj", self.k)
    }

    fn select_static_context(&self, caller: &Context, _call_site: StmtId, _callee: MethodId) -> Context {
        caller.clone()
    }

    fn select_instance_context(
        &self,
        _caller: &Context,
        _call_site: StmtId,
        receiver_context: &Context,
        receiver: &Obj,
        _callee: MethodId,
    ) -> Context {
        receiver_context.append(ContextElement::Object(receiver.id), self.k)
    }

    fn select_heap_context(&self, method_context: &Context, _obj: &Obj) -> Context {
        method_context.truncate(self.k.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TypeSelector {
    pub k: usize,
}

impl ContextSelector for TypeSelector {
    fn name(&self) -> String {
        format!("{}-type", self.k)
    }

    fn select_static_context(&self, caller: &Context, _call_site: StmtId, _callee: MethodId) -> Context {
        caller.clone()
    }

    fn select_instance_context(
        &self,
        _caller: &Context,
        _call_site: StmtId,
        receiver_context: &Context,
        receiver: &Obj,
        _callee: MethodId,
    ) -> Context {
        receiver_context.append(ContextElement::Type(receiver.container_class), self.k)
    }

    fn select_heap_context(&self, method_context: &Context, _obj: &Obj) -> Context {
        method_context.truncate(self.k.saturating_sub(1))
    }
}
