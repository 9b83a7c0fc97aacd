//! Context-Sensitive Points-to Solver
//!
//! Inclusion-based (Andersen-style) analysis with on-the-fly call graph
//! construction:
//! - methods are processed when they first become reachable in a context
//! - allocation, copy and static field statements create pointer-flow edges
//!   immediately
//! - instance field, array and virtual call statements are revisited each
//!   time a new object reaches their base or receiver variable
//! - only the difference between incoming and known objects is propagated
//!
//! # References
//! - Andersen, L. O. "Program Analysis and Specialization for C" (PhD 1994)
//! - Lhoták & Hendren "Context-Sensitive Points-to Analysis: Is It Worth It?" (CC 2006)
//! - Smaragdakis et al. "Pick Your Contexts Well" (POPL 2011)

use super::context_selector::make_selector;
use super::heap_model::AllocationSiteHeapModel;
use super::pointer_flow_graph::PointerFlowGraph;
use crate::config::ContextStrategy;
use crate::errors::{AnalysisError, Result};
use crate::features::points_to::domain::{
    CallEdge, ContextId, CsCallGraph, CsManager, CsMethodId, CsObjId, Obj, Pointer, PointerId, PointsToSet,
};
use crate::features::points_to::ports::{ContextSelector, HeapModel};
use crate::shared::models::{FieldAccess, Invoke, MethodId, Program, StmtId, StmtKind, VarId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Analysis name carried by pointer analysis errors
pub const POINTER_ANALYSIS: &str = "pta";

/// Statistics for one pointer analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PtaStats {
    pub reachable_methods: usize,
    pub call_edges: usize,
    pub pointers: usize,
    pub pfg_edges: usize,
    pub objects: usize,
    pub cs_objects: usize,
    pub contexts: usize,
    /// Worklist entries processed
    pub propagations: usize,
    /// Call sites for which dispatch found no target
    pub unresolved_calls: usize,
    pub duration_ms: f64,
}

/// Everything the solver built, handed to the result view
pub struct SolverOutput {
    pub selector: String,
    pub cs: CsManager,
    pub call_graph: CsCallGraph,
    pub objects: Vec<Obj>,
    pub stats: PtaStats,
}

/// Context-sensitive pointer analysis solver
pub struct PointerAnalysisSolver<'a> {
    program: &'a Program,
    selector: Box<dyn ContextSelector>,
    heap_model: Box<dyn HeapModel>,
    cs: CsManager,
    pfg: PointerFlowGraph,
    call_graph: CsCallGraph,
    work_list: VecDeque<(PointerId, PointsToSet<CsObjId>)>,
    stats: PtaStats,
    initialized: bool,
}

impl<'a> PointerAnalysisSolver<'a> {
    pub fn new(program: &'a Program, strategy: ContextStrategy) -> Self {
        Self::with_selector(program, make_selector(strategy))
    }

    pub fn with_selector(program: &'a Program, selector: Box<dyn ContextSelector>) -> Self {
        Self {
            program,
            selector,
            heap_model: Box::new(AllocationSiteHeapModel::new()),
            cs: CsManager::new(),
            pfg: PointerFlowGraph::new(),
            call_graph: CsCallGraph::new(),
            work_list: VecDeque::new(),
            stats: PtaStats::default(),
            initialized: false,
        }
    }

    /// Make the entry method reachable in the empty context
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        let main = self.program.main_method()?;
        let context = self.cs.intern_context(self.selector.empty_context());
        let cs_main = self.cs.cs_method(context, main);
        self.call_graph.add_entry(cs_main);
        self.add_reachable(cs_main)?;
        self.initialized = true;
        debug!(selector = %self.selector.name(), entry = %main, "pointer analysis initialized");
        Ok(())
    }

    /// Run to fixpoint
    pub fn solve(&mut self) -> Result<()> {
        let start = Instant::now();
        self.initialize()?;
        while self.step()? {}
        self.stats.duration_ms += start.elapsed().as_secs_f64() * 1000.0;
        Ok(())
    }

    /// Process one work-list entry; `false` once the work list is empty
    pub fn step(&mut self) -> Result<bool> {
        let Some((pointer, pts)) = self.work_list.pop_front() else {
            return Ok(false);
        };
        self.stats.propagations += 1;

        let delta = self.propagate(pointer, &pts);
        if delta.is_empty() {
            return Ok(true);
        }
        if let Pointer::Var { context, var } = self.cs.pointer_of(pointer) {
            trace!(%var, new = delta.len(), "new objects reach variable");
            for obj in delta.iter() {
                self.process_heap_accesses(context, var, obj);
                self.process_call(context, var, obj)?;
            }
        }
        Ok(true)
    }

    pub fn is_done(&self) -> bool {
        self.initialized && self.work_list.is_empty()
    }

    pub fn cs_manager(&self) -> &CsManager {
        &self.cs
    }

    pub fn call_graph(&self) -> &CsCallGraph {
        &self.call_graph
    }

    pub fn pointer_flow_graph(&self) -> &PointerFlowGraph {
        &self.pfg
    }

    pub fn stats(&self) -> &PtaStats {
        &self.stats
    }

    pub fn into_output(mut self) -> SolverOutput {
        self.stats.reachable_methods = self.call_graph.num_reachable();
        self.stats.call_edges = self.call_graph.num_edges();
        self.stats.pointers = self.cs.num_pointers();
        self.stats.pfg_edges = self.pfg.num_edges();
        self.stats.objects = self.heap_model.objects().len();
        self.stats.cs_objects = self.cs.num_objs();
        self.stats.contexts = self.cs.num_contexts();
        SolverOutput {
            selector: self.selector.name(),
            objects: self.heap_model.objects().to_vec(),
            cs: self.cs,
            call_graph: self.call_graph,
            stats: self.stats,
        }
    }

    // ------------------------------------------------------------------
    // Reachability
    // ------------------------------------------------------------------

    /// Mark `method` reachable and process its context-independent
    /// statements. Static calls pull their callees in the same pass.
    ///
    /// An unclassified statement defining a reference variable would leave
    /// that variable without objects, so it fails the run.
    fn add_reachable(&mut self, method: CsMethodId) -> Result<()> {
        let program = self.program;
        let mut pending = vec![method];

        while let Some(cs_method) = pending.pop() {
            if !self.call_graph.add_reachable(cs_method) {
                continue;
            }
            let entry = self.cs.method(cs_method);
            let context = entry.context;
            let method = program.method(entry.method);
            trace!(method = %method.name, context = %self.cs.context(context), "method reachable");

            for &sid in &method.body {
                let stmt = program.stmt(sid);
                match &stmt.kind {
                    StmtKind::New { lhs, ty } => {
                        let obj_id = self.heap_model.get_obj(sid, ty, method.id, method.class);
                        let heap_context = {
                            let obj = self.heap_model.obj(obj_id);
                            self.selector.select_heap_context(self.cs.context(context), obj)
                        };
                        let heap_context = self.cs.intern_context(heap_context);
                        let cs_obj = self.cs.cs_obj(heap_context, obj_id);
                        let target = self.cs.var_ptr(context, *lhs);
                        self.work_list.push_back((target, PointsToSet::singleton(cs_obj)));
                    }
                    StmtKind::Copy { lhs, rhs } => {
                        let source = self.cs.var_ptr(context, *rhs);
                        let target = self.cs.var_ptr(context, *lhs);
                        self.add_pfg_edge(source, target);
                    }
                    StmtKind::Cast { lhs, operand, .. } => {
                        let source = self.cs.var_ptr(context, *operand);
                        let target = self.cs.var_ptr(context, *lhs);
                        self.add_pfg_edge(source, target);
                    }
                    StmtKind::LoadField {
                        lhs,
                        access: FieldAccess::Static(field),
                    } => {
                        let source = self.cs.static_field_ptr(*field);
                        let target = self.cs.var_ptr(context, *lhs);
                        self.add_pfg_edge(source, target);
                    }
                    StmtKind::StoreField {
                        access: FieldAccess::Static(field),
                        rhs,
                    } => {
                        let source = self.cs.var_ptr(context, *rhs);
                        let target = self.cs.static_field_ptr(*field);
                        self.add_pfg_edge(source, target);
                    }
                    StmtKind::Invoke(invoke) if invoke.is_static() => {
                        let Some(callee) = program.resolve_callee(None, invoke) else {
                            warn!(call_site = %sid, method = %invoke.method_ref.name, "unresolved static call");
                            self.stats.unresolved_calls += 1;
                            continue;
                        };
                        let callee_context =
                            self.selector
                                .select_static_context(self.cs.context(context), sid, callee);
                        let callee_context = self.cs.intern_context(callee_context);
                        if let Some(cs_callee) =
                            self.add_call_edge(context, cs_method, sid, invoke, callee_context, callee)
                        {
                            pending.push(cs_callee);
                        }
                    }
                    StmtKind::Unknown { tag, def: Some(def), .. } if program.var(*def).ty.is_reference() => {
                        return Err(AnalysisError::unsupported(POINTER_ANALYSIS, sid, tag.clone()));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Add the call edge and, when it is new, the argument and return
    /// flows. Returns the context-sensitive callee for a new edge.
    fn add_call_edge(
        &mut self,
        caller_context: ContextId,
        caller: CsMethodId,
        call_site: StmtId,
        invoke: &Invoke,
        callee_context: ContextId,
        callee: MethodId,
    ) -> Option<CsMethodId> {
        let cs_call_site = self.cs.cs_call_site(caller_context, call_site, caller);
        let cs_callee = self.cs.cs_method(callee_context, callee);
        let edge = CallEdge {
            kind: invoke.kind,
            call_site: cs_call_site,
            callee: cs_callee,
        };
        if !self.call_graph.add_edge(edge) {
            return None;
        }

        let callee_method = self.program.method(callee);
        for (&arg, &param) in invoke.args.iter().zip(&callee_method.params) {
            let source = self.cs.var_ptr(caller_context, arg);
            let target = self.cs.var_ptr(callee_context, param);
            self.add_pfg_edge(source, target);
        }
        if let Some(lhs) = invoke.lhs {
            let target = self.cs.var_ptr(caller_context, lhs);
            for &ret in &callee_method.return_vars {
                let source = self.cs.var_ptr(callee_context, ret);
                self.add_pfg_edge(source, target);
            }
        }
        Some(cs_callee)
    }

    // ------------------------------------------------------------------
    // Propagation
    // ------------------------------------------------------------------

    fn add_pfg_edge(&mut self, source: PointerId, target: PointerId) {
        if self.pfg.add_edge(source, target) {
            let pts = self.cs.points_to(source);
            if !pts.is_empty() {
                self.work_list.push_back((target, pts.clone()));
            }
        }
    }

    /// Merge `pts` into `pointer`, forwarding the new part along PFG edges
    fn propagate(&mut self, pointer: PointerId, pts: &PointsToSet<CsObjId>) -> PointsToSet<CsObjId> {
        let delta = pts.difference(self.cs.points_to(pointer));
        if !delta.is_empty() {
            self.cs.points_to_mut(pointer).union_with(&delta);
            for succ in self.pfg.succs(pointer) {
                self.work_list.push_back((succ, delta.clone()));
            }
        }
        delta
    }

    /// Connect instance field and array accesses based on `var` to `obj`
    fn process_heap_accesses(&mut self, context: ContextId, var: VarId, obj: CsObjId) {
        let program = self.program;
        let relations = program.var_relations(var);

        for &sid in &relations.store_fields {
            if let StmtKind::StoreField {
                access: FieldAccess::Instance { field, .. },
                rhs,
            } = &program.stmt(sid).kind
            {
                let source = self.cs.var_ptr(context, *rhs);
                let target = self.cs.instance_field_ptr(obj, *field);
                self.add_pfg_edge(source, target);
            }
        }
        for &sid in &relations.load_fields {
            if let StmtKind::LoadField {
                lhs,
                access: FieldAccess::Instance { field, .. },
            } = &program.stmt(sid).kind
            {
                let source = self.cs.instance_field_ptr(obj, *field);
                let target = self.cs.var_ptr(context, *lhs);
                self.add_pfg_edge(source, target);
            }
        }
        for &sid in &relations.store_arrays {
            if let StmtKind::StoreArray { rhs, .. } = &program.stmt(sid).kind {
                let source = self.cs.var_ptr(context, *rhs);
                let target = self.cs.array_index_ptr(obj);
                self.add_pfg_edge(source, target);
            }
        }
        for &sid in &relations.load_arrays {
            if let StmtKind::LoadArray { lhs, .. } = &program.stmt(sid).kind {
                let source = self.cs.array_index_ptr(obj);
                let target = self.cs.var_ptr(context, *lhs);
                self.add_pfg_edge(source, target);
            }
        }
    }

    /// Dispatch every call with receiver `var` on the new receiver `recv`
    fn process_call(&mut self, context: ContextId, var: VarId, recv: CsObjId) -> Result<()> {
        let program = self.program;
        let receiver = self.cs.obj(recv);

        for &sid in &program.var_relations(var).invokes {
            let stmt = program.stmt(sid);
            let Some(invoke) = stmt.as_invoke() else {
                continue;
            };
            let runtime_class = self.heap_model.obj(receiver.obj).class();
            let Some(callee) = program.resolve_callee(runtime_class, invoke) else {
                warn!(
                    call_site = %sid,
                    method = %invoke.method_ref.name,
                    receiver = %receiver.obj,
                    "no dispatch target for receiver"
                );
                self.stats.unresolved_calls += 1;
                continue;
            };

            let callee_context = {
                let obj = self.heap_model.obj(receiver.obj);
                self.selector.select_instance_context(
                    self.cs.context(context),
                    sid,
                    self.cs.context(receiver.context),
                    obj,
                    callee,
                )
            };
            let callee_context = self.cs.intern_context(callee_context);

            if let Some(this) = program.method(callee).this {
                let this_ptr = self.cs.var_ptr(callee_context, this);
                self.work_list.push_back((this_ptr, PointsToSet::singleton(recv)));
            }

            let caller = self.cs.cs_method(context, stmt.method);
            if let Some(cs_callee) = self.add_call_edge(context, caller, sid, invoke, callee_context, callee) {
                self.add_reachable(cs_callee)?;
            }
        }
        Ok(())
    }
}
