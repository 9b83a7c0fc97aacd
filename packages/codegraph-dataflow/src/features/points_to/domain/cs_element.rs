//! Context-sensitive program elements
//!
//! Every (context, element) pair the solver touches is interned exactly
//! once and referred to by a dense id afterwards. Pointer nodes double as
//! pointer-flow-graph vertices, so their points-to sets live here too,
//! indexed by [`PointerId`].

use super::abstract_location::ObjId;
use super::context::Context;
use super::points_to_set::PointsToSet;
use crate::shared::models::{FieldId, MethodId, StmtId, VarId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

crate::define_id!(ContextId, "ctx");
crate::define_id!(CsObjId, "cso");
crate::define_id!(CsMethodId, "csm");
crate::define_id!(CsCallSiteId, "cscs");
crate::define_id!(
    /// Vertex of the pointer flow graph
    PointerId,
    "ptr"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CsObj {
    /// Heap context
    pub context: ContextId,
    pub obj: ObjId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CsMethod {
    pub context: ContextId,
    pub method: MethodId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CsCallSite {
    pub context: ContextId,
    pub call_site: StmtId,
    /// Context-sensitive method containing the call
    pub container: CsMethodId,
}

/// Anything that can point to objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pointer {
    Var { context: ContextId, var: VarId },
    StaticField(FieldId),
    InstanceField { base: CsObjId, field: FieldId },
    /// All elements of an array object collapse into one pointer
    ArrayIndex(CsObjId),
}

/// Append-only interner: `Vec` for id → value, map for value → id
#[derive(Debug, Clone)]
struct Interner<K, I> {
    values: Vec<K>,
    ids: FxHashMap<K, I>,
}

impl<K, I> Default for Interner<K, I> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            ids: FxHashMap::default(),
        }
    }
}

impl<K: Clone + Eq + Hash, I: Copy> Interner<K, I> {
    fn intern(&mut self, key: K, make_id: impl FnOnce(usize) -> I) -> I {
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = make_id(self.values.len());
        self.values.push(key.clone());
        self.ids.insert(key, id);
        id
    }

    fn find(&self, key: &K) -> Option<I> {
        self.ids.get(key).copied()
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

/// Interns contexts and context-sensitive elements
#[derive(Debug, Clone)]
pub struct CsManager {
    contexts: Interner<Context, ContextId>,
    objs: Interner<CsObj, CsObjId>,
    methods: Interner<CsMethod, CsMethodId>,
    call_sites: Interner<CsCallSite, CsCallSiteId>,
    pointers: Interner<Pointer, PointerId>,
    points_to: Vec<PointsToSet<CsObjId>>,
}

impl Default for CsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CsManager {
    /// The empty context is always [`ContextId(0)`](ContextId)
    pub fn new() -> Self {
        let mut manager = Self {
            contexts: Interner::default(),
            objs: Interner::default(),
            methods: Interner::default(),
            call_sites: Interner::default(),
            pointers: Interner::default(),
            points_to: Vec::new(),
        };
        manager.intern_context(Context::empty());
        manager
    }

    pub fn empty_context(&self) -> ContextId {
        ContextId(0)
    }

    pub fn intern_context(&mut self, context: Context) -> ContextId {
        self.contexts.intern(context, ContextId::new)
    }

    pub fn context(&self, id: ContextId) -> &Context {
        &self.contexts.values[id.index()]
    }

    pub fn find_context(&self, context: &Context) -> Option<ContextId> {
        self.contexts.find(context)
    }

    pub fn cs_obj(&mut self, context: ContextId, obj: ObjId) -> CsObjId {
        self.objs.intern(CsObj { context, obj }, CsObjId::new)
    }

    pub fn obj(&self, id: CsObjId) -> CsObj {
        self.objs.values[id.index()]
    }

    pub fn cs_method(&mut self, context: ContextId, method: MethodId) -> CsMethodId {
        self.methods.intern(CsMethod { context, method }, CsMethodId::new)
    }

    pub fn method(&self, id: CsMethodId) -> CsMethod {
        self.methods.values[id.index()]
    }

    pub fn cs_call_site(&mut self, context: ContextId, call_site: StmtId, container: CsMethodId) -> CsCallSiteId {
        self.call_sites.intern(
            CsCallSite {
                context,
                call_site,
                container,
            },
            CsCallSiteId::new,
        )
    }

    pub fn call_site(&self, id: CsCallSiteId) -> CsCallSite {
        self.call_sites.values[id.index()]
    }

    pub fn var_ptr(&mut self, context: ContextId, var: VarId) -> PointerId {
        self.pointer(Pointer::Var { context, var })
    }

    pub fn static_field_ptr(&mut self, field: FieldId) -> PointerId {
        self.pointer(Pointer::StaticField(field))
    }

    pub fn instance_field_ptr(&mut self, base: CsObjId, field: FieldId) -> PointerId {
        self.pointer(Pointer::InstanceField { base, field })
    }

    pub fn array_index_ptr(&mut self, base: CsObjId) -> PointerId {
        self.pointer(Pointer::ArrayIndex(base))
    }

    fn pointer(&mut self, pointer: Pointer) -> PointerId {
        let id = self.pointers.intern(pointer, PointerId::new);
        if self.points_to.len() <= id.index() {
            self.points_to.push(PointsToSet::new());
        }
        id
    }

    /// Lookup without interning
    pub fn find_pointer(&self, pointer: &Pointer) -> Option<PointerId> {
        self.pointers.find(pointer)
    }

    pub fn pointer_of(&self, id: PointerId) -> Pointer {
        self.pointers.values[id.index()]
    }

    pub fn points_to(&self, id: PointerId) -> &PointsToSet<CsObjId> {
        &self.points_to[id.index()]
    }

    pub fn points_to_mut(&mut self, id: PointerId) -> &mut PointsToSet<CsObjId> {
        &mut self.points_to[id.index()]
    }

    /// All pointers with their points-to sets
    pub fn pointers(&self) -> impl Iterator<Item = (PointerId, Pointer, &PointsToSet<CsObjId>)> {
        self.pointers
            .values
            .iter()
            .zip(&self.points_to)
            .enumerate()
            .map(|(i, (p, pts))| (PointerId::new(i), *p, pts))
    }

    pub fn num_contexts(&self) -> usize {
        self.contexts.len()
    }

    pub fn num_objs(&self) -> usize {
        self.objs.len()
    }

    pub fn num_methods(&self) -> usize {
        self.methods.len()
    }

    pub fn num_pointers(&self) -> usize {
        self.pointers.len()
    }
}
