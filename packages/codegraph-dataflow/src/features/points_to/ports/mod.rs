//! Ports (Interfaces) for Points-to Analysis
//!
//! The solver is parameterised over two policies:
//! - [`ContextSelector`]: which context a callee or a new object gets
//! - [`HeapModel`]: how allocation sites map to abstract objects

use crate::features::points_to::domain::{Context, Obj, ObjId};
use crate::shared::models::{ClassId, MethodId, StmtId, Type};

// ============================================================================
// Context Selection
// ============================================================================

/// Context policy of a context-sensitive pointer analysis
///
/// Heap contexts are always one element shorter than method contexts.
pub trait ContextSelector: Send + Sync {
    /// Short name used in logs (`ci`, `2-call`, ...)
    fn name(&self) -> String;

    /// Context of the entry methods
    fn empty_context(&self) -> Context {
        Context::empty()
    }

    /// Callee context of a static call
    fn select_static_context(&self, caller: &Context, call_site: StmtId, callee: MethodId) -> Context;

    /// Callee context of an instance call dispatched on `receiver`
    fn select_instance_context(
        &self,
        caller: &Context,
        call_site: StmtId,
        receiver_context: &Context,
        receiver: &Obj,
        callee: MethodId,
    ) -> Context;

    /// Heap context of an object allocated in a method analysed under `method_context`
    fn select_heap_context(&self, method_context: &Context, obj: &Obj) -> Context;
}

// ============================================================================
// Heap Abstraction
// ============================================================================

pub trait HeapModel: Send + Sync {
    /// Abstract object for the allocation at `alloc_site`; stable per site
    fn get_obj(&mut self, alloc_site: StmtId, ty: &Type, container: MethodId, container_class: ClassId) -> ObjId;

    fn obj(&self, id: ObjId) -> &Obj;

    fn objects(&self) -> &[Obj];
}
