//! Dead code detection over whole methods

#[path = "../common/mod.rs"]
mod common;
use common::*;

use codegraph_dataflow::config::SolverKind;
use codegraph_dataflow::features::data_flow::{
    ConstantPropagation, DataflowSolver, DeadCodeDetection, LiveVariableAnalysis,
};
use codegraph_dataflow::features::flow_graph::CFGBuilder;
use pretty_assertions::assert_eq;

#[test]
fn test_untaken_branch_is_dead() {
    let (program, main) = branch_program();
    let report = DeadCodeDetection::new(&program).analyze_method(main).unwrap();

    // z = 4 and the goto after it
    assert_dead_indices(&program, &report, &[3, 4]);
    assert_eq!(report.unreachable, 2);
    assert_eq!(report.useless, 0);

    let sink_call = program.body_stmt(main, 6).unwrap();
    assert!(!report.contains(sink_call), "use(z) is reachable and has a side effect");
}

#[test]
fn test_overwritten_assignment_is_dead() {
    let (program, main) = overwritten_program();
    let report = DeadCodeDetection::new(&program).analyze_method(main).unwrap();

    assert_dead_indices(&program, &report, &[0]);
    assert_eq!(report.unreachable, 0);
    assert_eq!(report.useless, 1);
}

#[test]
fn test_trapping_division_is_kept() {
    let (program, main) = division_program();
    let report = DeadCodeDetection::new(&program).analyze_method(main).unwrap();

    // d = a % b is never read, but may throw
    assert!(report.dead.is_empty(), "unexpected dead code: {:?}", report);
}

#[test]
fn test_detect_matches_analyze_method() {
    for (program, main) in [branch_program(), overwritten_program()] {
        let detection = DeadCodeDetection::new(&program);
        let cfg = CFGBuilder::build(&program, main).unwrap();
        let cp = ConstantPropagation::new(&program);
        let constants = DataflowSolver::new(&cp, &program).solve(&cfg).unwrap();
        let live = DataflowSolver::new(&LiveVariableAnalysis, &program).solve(&cfg).unwrap();

        assert_eq!(
            detection.detect(&cfg, &constants, &live),
            detection.analyze_method(main).unwrap()
        );
    }
}

#[test]
fn test_iterative_solver_finds_same_dead_code() {
    let (program, main) = branch_program();
    let worklist = DeadCodeDetection::new(&program).analyze_method(main).unwrap();
    let iterative = DeadCodeDetection::new(&program)
        .with_solver(SolverKind::Iterative)
        .analyze_method(main)
        .unwrap();
    assert_eq!(worklist, iterative);
}
