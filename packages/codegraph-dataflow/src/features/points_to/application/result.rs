//! Pointer analysis result
//!
//! Read-only view over the solver's final state. Context-insensitive
//! queries project out all contexts: a variable points to an object if
//! some context of the variable points to some context of the object.

use crate::features::points_to::domain::{
    CallEdge, Context, ContextId, CsCallGraph, CsManager, Obj, ObjId, Pointer, PointsToSet,
};
use crate::features::points_to::infrastructure::cs_solver::{PtaStats, SolverOutput};
use crate::shared::models::{CallKind, FieldId, MethodId, StmtId, VarId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One call edge with contexts resolved
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedCallEdge {
    pub kind: CallKind,
    pub call_site: StmtId,
    pub caller: MethodId,
    pub caller_context: Context,
    pub callee: MethodId,
    pub callee_context: Context,
}

#[derive(Debug)]
pub struct PointerAnalysisResult {
    selector: String,
    cs: CsManager,
    call_graph: CsCallGraph,
    objects: Vec<Obj>,
    stats: PtaStats,
    vars: FxHashMap<VarId, PointsToSet<ObjId>>,
    static_fields: FxHashMap<FieldId, PointsToSet<ObjId>>,
    instance_fields: FxHashMap<(ObjId, FieldId), PointsToSet<ObjId>>,
    arrays: FxHashMap<ObjId, PointsToSet<ObjId>>,
    empty: PointsToSet<ObjId>,
}

impl PointerAnalysisResult {
    pub fn new(output: SolverOutput) -> Self {
        let SolverOutput {
            selector,
            cs,
            call_graph,
            objects,
            stats,
        } = output;

        let mut vars: FxHashMap<VarId, PointsToSet<ObjId>> = FxHashMap::default();
        let mut static_fields: FxHashMap<FieldId, PointsToSet<ObjId>> = FxHashMap::default();
        let mut instance_fields: FxHashMap<(ObjId, FieldId), PointsToSet<ObjId>> = FxHashMap::default();
        let mut arrays: FxHashMap<ObjId, PointsToSet<ObjId>> = FxHashMap::default();

        for (_, pointer, pts) in cs.pointers() {
            if pts.is_empty() {
                continue;
            }
            let objs: PointsToSet<ObjId> = pts.iter().map(|o| cs.obj(o).obj).collect();
            let slot = match pointer {
                Pointer::Var { var, .. } => vars.entry(var).or_default(),
                Pointer::StaticField(field) => static_fields.entry(field).or_default(),
                Pointer::InstanceField { base, field } => {
                    instance_fields.entry((cs.obj(base).obj, field)).or_default()
                }
                Pointer::ArrayIndex(base) => arrays.entry(cs.obj(base).obj).or_default(),
            };
            slot.union_with(&objs);
        }

        Self {
            selector,
            cs,
            call_graph,
            objects,
            stats,
            vars,
            static_fields,
            instance_fields,
            arrays,
            empty: PointsToSet::new(),
        }
    }

    /// Name of the context selector the result was computed with
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Objects `var` may point to, in any context
    pub fn points_to(&self, var: VarId) -> &PointsToSet<ObjId> {
        self.vars.get(&var).unwrap_or(&self.empty)
    }

    /// Objects `var` may point to under `context`, with their heap contexts
    pub fn cs_points_to(&self, context: &Context, var: VarId) -> Vec<(Context, ObjId)> {
        let Some(ctx) = self.cs.find_context(context) else {
            return Vec::new();
        };
        self.cs_points_to_id(ctx, var)
    }

    fn cs_points_to_id(&self, context: ContextId, var: VarId) -> Vec<(Context, ObjId)> {
        let Some(ptr) = self.cs.find_pointer(&Pointer::Var { context, var }) else {
            return Vec::new();
        };
        self.cs
            .points_to(ptr)
            .iter()
            .map(|o| {
                let cs_obj = self.cs.obj(o);
                (self.cs.context(cs_obj.context).clone(), cs_obj.obj)
            })
            .collect()
    }

    /// Contexts `var` was analysed under
    pub fn contexts_of(&self, var: VarId) -> Vec<Context> {
        self.cs
            .pointers()
            .filter_map(|(_, p, _)| match p {
                Pointer::Var { context, var: v } if v == var => Some(self.cs.context(context).clone()),
                _ => None,
            })
            .collect()
    }

    pub fn static_field_points_to(&self, field: FieldId) -> &PointsToSet<ObjId> {
        self.static_fields.get(&field).unwrap_or(&self.empty)
    }

    /// Objects stored in `field` of `base`, over all heap contexts of `base`
    pub fn instance_field_points_to(&self, base: ObjId, field: FieldId) -> &PointsToSet<ObjId> {
        self.instance_fields.get(&(base, field)).unwrap_or(&self.empty)
    }

    pub fn array_points_to(&self, base: ObjId) -> &PointsToSet<ObjId> {
        self.arrays.get(&base).unwrap_or(&self.empty)
    }

    pub fn may_alias(&self, a: VarId, b: VarId) -> bool {
        self.points_to(a).intersects(self.points_to(b))
    }

    pub fn obj(&self, id: ObjId) -> &Obj {
        &self.objects[id.index()]
    }

    pub fn objects(&self) -> &[Obj] {
        &self.objects
    }

    pub fn call_graph(&self) -> &CsCallGraph {
        &self.call_graph
    }

    pub fn cs_manager(&self) -> &CsManager {
        &self.cs
    }

    /// Context-sensitive call edges in discovery order
    pub fn call_edges(&self) -> Vec<ResolvedCallEdge> {
        self.call_graph
            .edges()
            .iter()
            .map(|edge| self.resolve(edge))
            .collect()
    }

    fn resolve(&self, edge: &CallEdge) -> ResolvedCallEdge {
        let site = self.cs.call_site(edge.call_site);
        let caller = self.cs.method(site.container);
        let callee = self.cs.method(edge.callee);
        ResolvedCallEdge {
            kind: edge.kind,
            call_site: site.call_site,
            caller: caller.method,
            caller_context: self.cs.context(site.context).clone(),
            callee: callee.method,
            callee_context: self.cs.context(callee.context).clone(),
        }
    }

    /// Call edges with contexts projected out, sorted and deduplicated
    pub fn ci_call_edges(&self) -> Vec<(StmtId, MethodId)> {
        let mut edges: Vec<(StmtId, MethodId)> = self
            .call_graph
            .edges()
            .iter()
            .map(|edge| {
                (
                    self.cs.call_site(edge.call_site).call_site,
                    self.cs.method(edge.callee).method,
                )
            })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    /// Callees of `call_site` in any context
    pub fn callees_of(&self, call_site: StmtId) -> Vec<MethodId> {
        self.ci_call_edges()
            .into_iter()
            .filter(|&(s, _)| s == call_site)
            .map(|(_, m)| m)
            .collect()
    }

    /// Methods reachable in some context, sorted
    pub fn reachable_methods(&self) -> Vec<MethodId> {
        let mut methods: Vec<MethodId> = self
            .call_graph
            .reachable_methods()
            .iter()
            .map(|&m| self.cs.method(m).method)
            .collect();
        methods.sort_unstable();
        methods.dedup();
        methods
    }

    pub fn entry_methods(&self) -> Vec<MethodId> {
        self.call_graph
            .entries()
            .iter()
            .map(|&m| self.cs.method(m).method)
            .collect()
    }

    pub fn stats(&self) -> &PtaStats {
        &self.stats
    }
}
