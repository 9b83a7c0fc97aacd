//! Test fixtures
//!
//! Small programs built through `ProgramBuilder`. Each doc comment shows
//! the source the fixture models.

use codegraph_dataflow::shared::models::{
    ArrayAccess, BinaryExp, BinaryOp, CallKind, ClassId, FieldAccess, Invoke, Literal, MethodBuilder, MethodId,
    MethodRef, Program, ProgramBuilder, StmtKind, Type, VarId,
};

pub fn literal(m: &mut MethodBuilder<'_>, lhs: VarId, value: i32) -> usize {
    m.push(StmtKind::AssignLiteral {
        lhs,
        literal: Literal::Int(value),
    })
}

pub fn static_call(class: ClassId, name: &str, lhs: Option<VarId>, args: Vec<VarId>) -> StmtKind {
    StmtKind::Invoke(Invoke {
        lhs,
        kind: CallKind::Static,
        method_ref: MethodRef::new(class, name),
        receiver: None,
        args,
    })
}

pub fn virtual_call(class: ClassId, name: &str, receiver: VarId, lhs: Option<VarId>, args: Vec<VarId>) -> StmtKind {
    StmtKind::Invoke(Invoke {
        lhs,
        kind: CallKind::Virtual,
        method_ref: MethodRef::new(class, name),
        receiver: Some(receiver),
        args,
    })
}

/// Static `use(int v)` sink with an empty body
fn sink(pb: &mut ProgramBuilder, class: ClassId) -> MethodId {
    let mut m = pb.method(class, "use", true);
    m.param("v", Type::Int);
    m.push(StmtKind::Return { value: None });
    m.finish()
}

/// ```text
/// x = 1; y = 2;
/// if (x < y) { z = 3; } else { z = 4; }
/// use(z);
/// ```
///
/// Body indices: `0 x=1, 1 y=2, 2 if x<y goto 5, 3 z=4, 4 goto 6,
/// 5 z=3, 6 use(z), 7 return`.
pub fn branch_program() -> (Program, MethodId) {
    let mut pb = ProgramBuilder::new();
    let c = pb.class("Main", None);
    sink(&mut pb, c);

    let mut m = pb.method(c, "main", true);
    let x = m.var("x", Type::Int);
    let y = m.var("y", Type::Int);
    let z = m.var("z", Type::Int);
    literal(&mut m, x, 1);
    literal(&mut m, y, 2);
    let branch = m.push(StmtKind::If {
        cond: BinaryExp::new(BinaryOp::Lt, x, y),
        target: 0,
    });
    literal(&mut m, z, 4);
    let skip = m.push(StmtKind::Goto { target: 0 });
    let then = literal(&mut m, z, 3);
    let join = m.push(static_call(c, "use", None, vec![z]));
    m.push(StmtKind::Return { value: None });
    m.set_target(branch, then);
    m.set_target(skip, join);
    let main = m.finish();
    pb.set_main(main);
    (pb.build().expect("branch program"), main)
}

/// `a = 10; b = 0; c = a / b; d = a % b; return c;`
pub fn division_program() -> (Program, MethodId) {
    let mut pb = ProgramBuilder::new();
    let cls = pb.class("Main", None);
    let mut m = pb.method(cls, "main", true);
    let a = m.var("a", Type::Int);
    let b = m.var("b", Type::Int);
    let c = m.var("c", Type::Int);
    let d = m.var("d", Type::Int);
    literal(&mut m, a, 10);
    literal(&mut m, b, 0);
    m.push(StmtKind::Binary {
        lhs: c,
        exp: BinaryExp::new(BinaryOp::Div, a, b),
    });
    m.push(StmtKind::Binary {
        lhs: d,
        exp: BinaryExp::new(BinaryOp::Rem, a, b),
    });
    m.push(StmtKind::Return { value: Some(c) });
    let main = m.finish();
    pb.set_main(main);
    (pb.build().expect("division program"), main)
}

/// `t = 5; t = 7; use(t);`
pub fn overwritten_program() -> (Program, MethodId) {
    let mut pb = ProgramBuilder::new();
    let c = pb.class("Main", None);
    sink(&mut pb, c);

    let mut m = pb.method(c, "main", true);
    let t = m.var("t", Type::Int);
    literal(&mut m, t, 5);
    literal(&mut m, t, 7);
    m.push(static_call(c, "use", None, vec![t]));
    m.push(StmtKind::Return { value: None });
    let main = m.finish();
    pb.set_main(main);
    (pb.build().expect("overwritten program"), main)
}

/// ```text
/// class A { int f; }
/// p = new A();
/// q = new A();        // or `q = p;` when aliased
/// one = 1; two = 2;
/// p.f = one; q.f = two;
/// x = p.f;
/// ```
pub fn field_store_program(aliased: bool) -> (Program, MethodId) {
    let mut pb = ProgramBuilder::new();
    let main_class = pb.class("Main", None);
    let a = pb.class("A", None);
    let f = pb.field(a, "f", Type::Int, false);

    let mut m = pb.method(main_class, "main", true);
    let p = m.var("p", Type::Class(a));
    let q = m.var("q", Type::Class(a));
    let one = m.var("one", Type::Int);
    let two = m.var("two", Type::Int);
    let x = m.var("x", Type::Int);
    m.push(StmtKind::New {
        lhs: p,
        ty: Type::Class(a),
    });
    if aliased {
        m.push(StmtKind::Copy { lhs: q, rhs: p });
    } else {
        m.push(StmtKind::New {
            lhs: q,
            ty: Type::Class(a),
        });
    }
    literal(&mut m, one, 1);
    literal(&mut m, two, 2);
    m.push(StmtKind::StoreField {
        access: FieldAccess::Instance { base: p, field: f },
        rhs: one,
    });
    m.push(StmtKind::StoreField {
        access: FieldAccess::Instance { base: q, field: f },
        rhs: two,
    });
    m.push(StmtKind::LoadField {
        lhs: x,
        access: FieldAccess::Instance { base: p, field: f },
    });
    m.push(StmtKind::Return { value: None });
    let main = m.finish();
    pb.set_main(main);
    (pb.build().expect("field store program"), main)
}

/// ```text
/// arr = new int[]; i0 = 0; i1 = 1; k = param;
/// ten = 10; twenty = 20;
/// arr[i0] = ten; arr[i1] = twenty;
/// x = arr[i0];   // 10: index 1 never aliases index 0
/// y = arr[k];    // NAC: unknown index aliases both stores
/// ```
pub fn array_program() -> (Program, MethodId) {
    let mut pb = ProgramBuilder::new();
    let c = pb.class("Main", None);
    let mut m = pb.method(c, "main", true);
    let k = m.param("k", Type::Int);
    let arr = m.var("arr", Type::Int.array_of());
    let i0 = m.var("i0", Type::Int);
    let i1 = m.var("i1", Type::Int);
    let ten = m.var("ten", Type::Int);
    let twenty = m.var("twenty", Type::Int);
    let x = m.var("x", Type::Int);
    let y = m.var("y", Type::Int);
    m.push(StmtKind::New {
        lhs: arr,
        ty: Type::Int.array_of(),
    });
    literal(&mut m, i0, 0);
    literal(&mut m, i1, 1);
    literal(&mut m, ten, 10);
    literal(&mut m, twenty, 20);
    m.push(StmtKind::StoreArray {
        access: ArrayAccess { base: arr, index: i0 },
        rhs: ten,
    });
    m.push(StmtKind::StoreArray {
        access: ArrayAccess { base: arr, index: i1 },
        rhs: twenty,
    });
    m.push(StmtKind::LoadArray {
        lhs: x,
        access: ArrayAccess { base: arr, index: i0 },
    });
    m.push(StmtKind::LoadArray {
        lhs: y,
        access: ArrayAccess { base: arr, index: k },
    });
    m.push(StmtKind::Return { value: None });
    let main = m.finish();
    pb.set_main(main);
    (pb.build().expect("array program"), main)
}

/// ```text
/// static int mul(int x, int y) { r = x * y; return r; }
/// static int id(int v) { return v; }
/// main: a = 6; b = 7; c = mul(a, b);
///       one = 1; two = 2; p = id(one); q = id(two);
/// ```
pub fn call_program() -> (Program, MethodId) {
    let mut pb = ProgramBuilder::new();
    let c = pb.class("Main", None);

    let mut mul = pb.method(c, "mul", true);
    let x = mul.param("x", Type::Int);
    let y = mul.param("y", Type::Int);
    let r = mul.var("r", Type::Int);
    mul.push(StmtKind::Binary {
        lhs: r,
        exp: BinaryExp::new(BinaryOp::Mul, x, y),
    });
    mul.push(StmtKind::Return { value: Some(r) });
    mul.finish();

    let mut id = pb.method(c, "id", true);
    let v = id.param("v", Type::Int);
    id.push(StmtKind::Return { value: Some(v) });
    id.finish();

    let mut m = pb.method(c, "main", true);
    let a = m.var("a", Type::Int);
    let b = m.var("b", Type::Int);
    let product = m.var("c", Type::Int);
    let one = m.var("one", Type::Int);
    let two = m.var("two", Type::Int);
    let p = m.var("p", Type::Int);
    let q = m.var("q", Type::Int);
    literal(&mut m, a, 6);
    literal(&mut m, b, 7);
    m.push(static_call(c, "mul", Some(product), vec![a, b]));
    literal(&mut m, one, 1);
    literal(&mut m, two, 2);
    m.push(static_call(c, "id", Some(p), vec![one]));
    m.push(static_call(c, "id", Some(q), vec![two]));
    m.push(StmtKind::Return { value: None });
    let main = m.finish();
    pb.set_main(main);
    (pb.build().expect("call program"), main)
}

/// ```text
/// abstract class Animal { abstract int legs(); }
/// class Dog extends Animal { int legs() { n = 4; return n; } }
/// class Bird extends Animal { int legs() { n = 2; return n; } }
/// main: a = new Dog(); n = a.legs();
/// ```
pub fn dispatch_program() -> (Program, MethodId) {
    let mut pb = ProgramBuilder::new();
    let c = pb.class("Main", None);
    let animal = pb.class("Animal", None);
    let dog = pb.class("Dog", Some(animal));
    let bird = pb.class("Bird", Some(animal));
    pb.abstract_method(animal, "legs");

    for (class, legs) in [(dog, 4), (bird, 2)] {
        let mut m = pb.method(class, "legs", false);
        let n = m.var("n", Type::Int);
        literal(&mut m, n, legs);
        m.push(StmtKind::Return { value: Some(n) });
        m.finish();
    }

    let mut m = pb.method(c, "main", true);
    let a = m.var("a", Type::Class(animal));
    let n = m.var("n", Type::Int);
    m.push(StmtKind::New {
        lhs: a,
        ty: Type::Class(dog),
    });
    m.push(virtual_call(animal, "legs", a, Some(n), vec![]));
    m.push(StmtKind::Return { value: None });
    let main = m.finish();
    pb.set_main(main);
    (pb.build().expect("dispatch program"), main)
}

/// ```text
/// class Box { Object v;
///   void set(Object x) { this.v = x; }
///   Object get() { r = this.v; return r; } }
/// main: b1 = new Box(); b2 = new Box(); a1 = new A(); a2 = new A();
///       b1.set(a1); b2.set(a2); r1 = b1.get(); r2 = b2.get();
/// ```
pub fn box_program() -> (Program, MethodId) {
    let mut pb = ProgramBuilder::new();
    let c = pb.class("Main", None);
    let a = pb.class("A", None);
    let bx = pb.class("Box", None);
    let v = pb.field(bx, "v", Type::Class(a), false);

    let mut set = pb.method(bx, "set", false);
    let this = set.this().expect("instance method");
    let x = set.param("x", Type::Class(a));
    set.push(StmtKind::StoreField {
        access: FieldAccess::Instance { base: this, field: v },
        rhs: x,
    });
    set.push(StmtKind::Return { value: None });
    set.finish();

    let mut get = pb.method(bx, "get", false);
    let this = get.this().expect("instance method");
    let r = get.var("r", Type::Class(a));
    get.push(StmtKind::LoadField {
        lhs: r,
        access: FieldAccess::Instance { base: this, field: v },
    });
    get.push(StmtKind::Return { value: Some(r) });
    get.finish();

    let mut m = pb.method(c, "main", true);
    let b1 = m.var("b1", Type::Class(bx));
    let b2 = m.var("b2", Type::Class(bx));
    let a1 = m.var("a1", Type::Class(a));
    let a2 = m.var("a2", Type::Class(a));
    let r1 = m.var("r1", Type::Class(a));
    let r2 = m.var("r2", Type::Class(a));
    for (lhs, ty) in [(b1, bx), (b2, bx), (a1, a), (a2, a)] {
        m.push(StmtKind::New {
            lhs,
            ty: Type::Class(ty),
        });
    }
    m.push(virtual_call(bx, "set", b1, None, vec![a1]));
    m.push(virtual_call(bx, "set", b2, None, vec![a2]));
    m.push(virtual_call(bx, "get", b1, Some(r1), vec![]));
    m.push(virtual_call(bx, "get", b2, Some(r2), vec![]));
    m.push(StmtKind::Return { value: None });
    let main = m.finish();
    pb.set_main(main);
    (pb.build().expect("box program"), main)
}
