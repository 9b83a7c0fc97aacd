//! Intraprocedural constant propagation and liveness over whole methods

#[path = "../common/mod.rs"]
mod common;
use common::*;

use codegraph_dataflow::config::SolverKind;
use codegraph_dataflow::features::data_flow::{
    evaluate, ConstantPropagation, CpFact, DataflowSolver, LiveVariableAnalysis, Value,
};
use codegraph_dataflow::features::flow_graph::CFGBuilder;
use codegraph_dataflow::shared::models::{BinaryExp, BinaryOp, StmtKind};
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════════
// Branches
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_branch_condition_is_decided() {
    let (program, main) = branch_program();
    let cfg = CFGBuilder::build(&program, main).unwrap();
    let cp = ConstantPropagation::new(&program);
    let result = DataflowSolver::new(&cp, &program).solve(&cfg).unwrap();

    let branch = program.body_stmt(main, 2).unwrap();
    let StmtKind::If { cond, .. } = &program.stmt(branch).kind else {
        panic!("index 2 should be the branch");
    };
    let in_fact = result.in_fact(branch).unwrap();
    assert_eq!(evaluate(cond, in_fact), Value::Constant(1));

    let then_assign = program.body_stmt(main, 5).unwrap();
    let z = program.var_by_name(main, "z").unwrap();
    assert_eq!(result.out_fact(then_assign).unwrap().get(z), Value::Constant(3));
}

#[test]
fn test_facts_meet_at_join() {
    let (program, main) = branch_program();
    let cfg = CFGBuilder::build(&program, main).unwrap();
    let cp = ConstantPropagation::new(&program);
    let result = DataflowSolver::new(&cp, &program).solve(&cfg).unwrap();

    // Both assignments reach the join; pruning is dead code detection's job
    let join = program.body_stmt(main, 6).unwrap();
    assert_eq!(in_value(&program, &result, main, join, "z"), Value::Nac);
    assert_eq!(in_value(&program, &result, main, join, "x"), Value::Constant(1));
    assert_eq!(in_value(&program, &result, main, join, "y"), Value::Constant(2));
}

// ═══════════════════════════════════════════════════════════════════════════
// Division
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_division_by_zero_is_undef_and_deterministic() {
    let (program, main) = division_program();
    let cfg = CFGBuilder::build(&program, main).unwrap();
    let cp = ConstantPropagation::new(&program);

    let first = DataflowSolver::new(&cp, &program).solve(&cfg).unwrap();
    let second = DataflowSolver::new(&cp, &program).solve(&cfg).unwrap();

    assert_eq!(exit_value(&program, &first, main, "c"), Value::Undef);
    assert_eq!(exit_value(&program, &first, main, "d"), Value::Undef);
    assert_eq!(exit_value(&program, &first, main, "a"), Value::Constant(10));
    assert_eq!(first, second);

    let a = program.var_by_name(main, "a").unwrap();
    let b = program.var_by_name(main, "b").unwrap();
    let mut fact = CpFact::new();
    fact.update(a, Value::Constant(10));
    fact.update(b, Value::Constant(0));
    let exp = BinaryExp::new(BinaryOp::Div, a, b);
    assert_eq!(evaluate(&exp, &fact), evaluate(&exp, &fact));
    assert_eq!(evaluate(&exp, &fact), Value::Undef);
}

// ═══════════════════════════════════════════════════════════════════════════
// Liveness
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_overwritten_variable_is_not_live() {
    let (program, main) = overwritten_program();
    let cfg = CFGBuilder::build(&program, main).unwrap();
    let live = DataflowSolver::new(&LiveVariableAnalysis, &program).solve(&cfg).unwrap();

    let t = program.var_by_name(main, "t").unwrap();
    let first = program.body_stmt(main, 0).unwrap();
    let second = program.body_stmt(main, 1).unwrap();
    assert!(!live.in_fact(first).unwrap().contains(&t));
    assert!(!live.out_fact(first).unwrap().contains(&t));
    assert!(live.out_fact(second).unwrap().contains(&t));
}

#[test]
fn test_solver_kinds_agree_on_fixtures() {
    for (program, main) in [branch_program(), division_program(), overwritten_program()] {
        let cfg = CFGBuilder::build(&program, main).unwrap();
        let cp = ConstantPropagation::new(&program);
        let worklist = DataflowSolver::new(&cp, &program)
            .with_kind(SolverKind::WorkList)
            .solve(&cfg)
            .unwrap();
        let iterative = DataflowSolver::new(&cp, &program)
            .with_kind(SolverKind::Iterative)
            .solve(&cfg)
            .unwrap();
        assert_eq!(worklist, iterative);

        let live_worklist = DataflowSolver::new(&LiveVariableAnalysis, &program)
            .solve(&cfg)
            .unwrap();
        let live_iterative = DataflowSolver::new(&LiveVariableAnalysis, &program)
            .with_kind(SolverKind::Iterative)
            .solve(&cfg)
            .unwrap();
        assert_eq!(live_worklist, live_iterative);
    }
}

#[test]
fn test_resuming_from_fixpoint_changes_nothing() {
    let (program, main) = branch_program();
    let cfg = CFGBuilder::build(&program, main).unwrap();
    let cp = ConstantPropagation::new(&program);
    let solver = DataflowSolver::new(&cp, &program);

    let fixpoint = solver.solve(&cfg).unwrap();
    let resumed = solver.resume(&cfg, fixpoint.clone()).unwrap();
    assert_eq!(fixpoint, resumed);
}
