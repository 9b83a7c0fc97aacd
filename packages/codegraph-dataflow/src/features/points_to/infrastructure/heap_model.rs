//! Allocation-site heap model: one abstract object per `New` statement

use crate::features::points_to::domain::{Obj, ObjId};
use crate::features::points_to::ports::HeapModel;
use crate::shared::models::{ClassId, MethodId, StmtId, Type};
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct AllocationSiteHeapModel {
    objects: Vec<Obj>,
    by_site: FxHashMap<StmtId, ObjId>,
}

impl AllocationSiteHeapModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HeapModel for AllocationSiteHeapModel {
    fn get_obj(&mut self, alloc_site: StmtId, ty: &Type, container: MethodId, container_class: ClassId) -> ObjId {
        if let Some(&id) = self.by_site.get(&alloc_site) {
            return id;
        }
        let id = ObjId::new(self.objects.len());
        self.objects.push(Obj {
            id,
            alloc_site,
            ty: ty.clone(),
            container,
            container_class,
        });
        self.by_site.insert(alloc_site, id);
        id
    }

    fn obj(&self, id: ObjId) -> &Obj {
        &self.objects[id.index()]
    }

    fn objects(&self) -> &[Obj] {
        &self.objects
    }
}
