//! Context-sensitive pointer analysis and on-the-fly call graph

#[path = "../common/mod.rs"]
mod common;
use common::*;

use codegraph_dataflow::config::{ContextStrategy, PTAConfig};
use codegraph_dataflow::errors::AnalysisError;
use codegraph_dataflow::features::points_to::{
    CsManager, PointerAnalysis, PointerAnalysisResult, PointerAnalysisSolver, PointerId,
};
use codegraph_dataflow::features::points_to::domain::CsObjId;
use codegraph_dataflow::shared::models::{MethodId, Program, ProgramBuilder, StmtKind, Type, VarId};
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

fn analyze(program: &Program, context: ContextStrategy) -> PointerAnalysisResult {
    PointerAnalysis::new(PTAConfig::default().context(context))
        .run(program)
        .unwrap()
}

fn var(program: &Program, method: MethodId, name: &str) -> VarId {
    program.var_by_name(method, name).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// Call graph
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_virtual_call_dispatches_on_allocated_type() {
    let (program, main) = dispatch_program();
    let result = analyze(&program, ContextStrategy::Insensitive);

    let call_site = program.body_stmt(main, 1).unwrap();
    let dog_legs = program.method_by_name("Dog", "legs").unwrap();
    let bird_legs = program.method_by_name("Bird", "legs").unwrap();

    assert_eq!(result.callees_of(call_site), vec![dog_legs]);
    assert_eq!(result.ci_call_edges(), vec![(call_site, dog_legs)]);
    let reachable = result.reachable_methods();
    assert!(reachable.contains(&main));
    assert!(reachable.contains(&dog_legs));
    assert!(!reachable.contains(&bird_legs), "Bird is never allocated");
    assert_eq!(result.entry_methods(), vec![main]);
}

#[test]
fn test_call_graph_is_idempotent() {
    let (program, _) = box_program();
    for context in [
        ContextStrategy::Insensitive,
        ContextStrategy::CallSite { k: 2 },
        ContextStrategy::Object { k: 2 },
    ] {
        let first = analyze(&program, context);
        let second = analyze(&program, context);
        assert_eq!(first.ci_call_edges(), second.ci_call_edges());
        assert_eq!(first.call_edges(), second.call_edges());
        assert_eq!(first.reachable_methods(), second.reachable_methods());
        assert_eq!(first.stats().propagations, second.stats().propagations);
    }
}

#[test]
fn test_unresolved_call_is_counted_not_fatal() {
    let mut pb = ProgramBuilder::new();
    let c = pb.class("Main", None);
    let mut m = pb.method(c, "main", true);
    m.push(static_call(c, "missing", None, vec![]));
    m.push(StmtKind::Return { value: None });
    let main = m.finish();
    pb.set_main(main);
    let program = pb.build().unwrap();

    let result = analyze(&program, ContextStrategy::Insensitive);
    assert_eq!(result.stats().unresolved_calls, 1);
    assert_eq!(result.stats().call_edges, 0);
    assert_eq!(result.reachable_methods(), vec![main]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Context sensitivity
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_insensitive_analysis_merges_containers() {
    let (program, main) = box_program();
    let result = analyze(&program, ContextStrategy::Insensitive);

    let r1 = var(&program, main, "r1");
    let r2 = var(&program, main, "r2");
    assert_eq!(result.selector(), "ci");
    assert_eq!(result.points_to(r1).len(), 2);
    assert!(result.may_alias(r1, r2));
}

#[test]
fn test_object_and_call_site_sensitivity_separate_containers() {
    let (program, main) = box_program();
    let a1 = var(&program, main, "a1");
    let a2 = var(&program, main, "a2");
    let r1 = var(&program, main, "r1");
    let r2 = var(&program, main, "r2");

    for context in [ContextStrategy::Object { k: 1 }, ContextStrategy::CallSite { k: 1 }] {
        let result = analyze(&program, context);
        assert_eq!(result.points_to(r1), result.points_to(a1), "{}", result.selector());
        assert_eq!(result.points_to(r2), result.points_to(a2), "{}", result.selector());
        assert!(!result.may_alias(r1, r2));
    }
}

#[test]
fn test_type_sensitivity_merges_same_allocating_class() {
    let (program, main) = box_program();
    let result = analyze(&program, ContextStrategy::Type { k: 1 });

    // Both boxes are allocated in Main, so they share a type context
    let r1 = var(&program, main, "r1");
    assert_eq!(result.selector(), "1-type");
    assert_eq!(result.points_to(r1).len(), 2);
}

#[test]
fn test_method_contexts_follow_receivers() {
    let (program, _) = box_program();
    let result = analyze(&program, ContextStrategy::Object { k: 1 });

    let get = program.method_by_name("Box", "get").unwrap();
    let this = program.method(get).this.unwrap();
    let contexts = result.contexts_of(this);
    assert_eq!(contexts.len(), 2, "one context per Box object");
    for context in &contexts {
        assert_eq!(context.depth(), 1);
        assert_eq!(result.cs_points_to(context, this).len(), 1);
    }
}

#[test]
fn test_field_points_to_is_per_base_object() {
    let (program, main) = box_program();
    let result = analyze(&program, ContextStrategy::Object { k: 1 });

    let b1 = var(&program, main, "b1");
    let a1 = var(&program, main, "a1");
    let box1 = result.points_to(b1).iter().next().unwrap();
    let field = program
        .fields()
        .find(|f| f.name == "v")
        .map(|f| f.id)
        .unwrap();
    assert_eq!(result.instance_field_points_to(box1, field), result.points_to(a1));
}

#[test]
fn test_zero_depth_is_a_config_error() {
    let (program, _) = box_program();
    let err = PointerAnalysis::new(PTAConfig::default().context(ContextStrategy::CallSite { k: 0 }))
        .run(&program)
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Config(_)), "{err}");
}

// ═══════════════════════════════════════════════════════════════════════════
// Solver
// ═══════════════════════════════════════════════════════════════════════════

fn snapshot(cs: &CsManager) -> FxHashMap<PointerId, Vec<CsObjId>> {
    cs.pointers()
        .map(|(id, _, pts)| (id, pts.iter().collect()))
        .collect()
}

#[test]
fn test_points_to_sets_only_grow() {
    let (program, _) = box_program();
    let mut solver = PointerAnalysisSolver::new(&program, ContextStrategy::Object { k: 2 });
    solver.initialize().unwrap();

    let mut before = snapshot(solver.cs_manager());
    let mut steps = 0;
    while solver.step().unwrap() {
        steps += 1;
        let after = snapshot(solver.cs_manager());
        for (pointer, objs) in &before {
            let now = &after[pointer];
            assert!(
                objs.iter().all(|o| now.contains(o)),
                "points-to set of {pointer} shrank at step {steps}"
            );
        }
        before = after;
    }
    assert!(solver.is_done());
    assert!(steps > 0);
}

#[test]
fn test_missing_entry_is_an_error() {
    let mut pb = ProgramBuilder::new();
    let c = pb.class("Main", None);
    let mut m = pb.method(c, "helper", true);
    let x = m.var("x", Type::Int);
    literal(&mut m, x, 1);
    m.push(StmtKind::Return { value: None });
    m.finish();
    let program = pb.build().unwrap();

    let err = PointerAnalysis::default().run(&program).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidProgram(_)), "{err}");
}

#[test]
fn test_unclassified_reference_definition_fails_the_run() {
    let mut pb = ProgramBuilder::new();
    let c = pb.class("A", None);
    let mut m = pb.method(c, "main", true);
    let a = m.var("a", Type::Class(c));
    let b = m.var("b", Type::Class(c));
    m.push(StmtKind::New {
        lhs: a,
        ty: Type::Class(c),
    });
    m.push(StmtKind::Unknown {
        tag: "monitor-copy".to_string(),
        def: Some(b),
        uses: vec![a],
    });
    m.push(StmtKind::Return { value: None });
    let main = m.finish();
    pb.set_main(main);
    let program = pb.build().unwrap();

    let err = PointerAnalysis::default().run(&program).unwrap_err();
    assert!(
        matches!(
            &err,
            AnalysisError::UnsupportedConstruct { analysis: "pta", construct, .. } if construct == "monitor-copy"
        ),
        "{err}"
    );
}
