//! Interprocedural constant propagation across calls and heap accesses

#[path = "../common/mod.rs"]
mod common;
use common::*;

use codegraph_dataflow::config::{ContextStrategy, InterConstPropConfig, PTAConfig};
use codegraph_dataflow::errors::{AnalysisError, Result};
use codegraph_dataflow::features::data_flow::{CpFact, DataflowResult, Value};
use codegraph_dataflow::features::flow_graph::{ICFGBuilder, ICFGEdge, ICFG};
use codegraph_dataflow::features::interprocedural::{
    InterConstantPropagation, InterContext, InterDataflowAnalysis, InterSolver,
};
use codegraph_dataflow::features::points_to::{PointerAnalysis, PointerAnalysisResult};
use codegraph_dataflow::shared::models::{MethodId, Program, Stmt};
use pretty_assertions::assert_eq;

fn points_to(program: &Program, context: ContextStrategy) -> PointerAnalysisResult {
    PointerAnalysis::new(PTAConfig::default().context(context))
        .run(program)
        .unwrap()
}

fn icfg_of(program: &Program, pta: &PointerAnalysisResult) -> ICFG {
    ICFGBuilder::build(program, &pta.entry_methods(), pta.ci_call_edges()).unwrap()
}

fn solve(program: &Program, alias_aware: bool) -> DataflowResult<CpFact> {
    let pta = points_to(program, ContextStrategy::Insensitive);
    let icfg = icfg_of(program, &pta);
    let config = InterConstPropConfig::default().alias_aware(alias_aware);
    let analysis = InterConstantPropagation::from_config(program, &icfg, &config, Some(&pta)).unwrap();
    assert_eq!(analysis.is_alias_aware(), alias_aware);
    InterSolver::new(&analysis, program, &icfg).solve().unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// Calls
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_constants_flow_through_call_and_return() {
    let (program, main) = call_program();
    let result = solve(&program, false);

    assert_eq!(exit_value(&program, &result, main, "c"), Value::Constant(42));
    // caller facts survive the call on the call-to-return edge
    assert_eq!(exit_value(&program, &result, main, "a"), Value::Constant(6));
    assert_eq!(exit_value(&program, &result, main, "b"), Value::Constant(7));

    let mul = program.method_by_name("Main", "mul").unwrap();
    assert_eq!(exit_value(&program, &result, mul, "r"), Value::Constant(42));
    assert_eq!(exit_value(&program, &result, mul, "x"), Value::Constant(6));
}

#[test]
fn test_conflicting_call_sites_meet_to_nac() {
    let (program, main) = call_program();
    let result = solve(&program, false);

    let id = program.method_by_name("Main", "id").unwrap();
    assert_eq!(exit_value(&program, &result, id, "v"), Value::Nac);
    assert_eq!(exit_value(&program, &result, main, "p"), Value::Nac);
    assert_eq!(exit_value(&program, &result, main, "q"), Value::Nac);
}

#[test]
fn test_virtual_call_returns_dispatched_constant() {
    let (program, main) = dispatch_program();
    let result = solve(&program, false);
    assert_eq!(exit_value(&program, &result, main, "n"), Value::Constant(4));
}

#[test]
fn test_entry_parameters_are_nac() {
    let (program, main) = array_program();
    let result = solve(&program, false);
    assert_eq!(exit_value(&program, &result, main, "k"), Value::Nac);
}

// ═══════════════════════════════════════════════════════════════════════════
// Heap accesses
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_disjoint_bases_keep_store_value() {
    let (program, main) = field_store_program(false);
    let result = solve(&program, true);
    assert_eq!(exit_value(&program, &result, main, "x"), Value::Constant(1));
}

#[test]
fn test_aliased_bases_meet_store_values() {
    let (program, main) = field_store_program(true);
    let result = solve(&program, true);
    assert_eq!(exit_value(&program, &result, main, "x"), Value::Nac);
}

#[test]
fn test_heap_loads_without_alias_awareness_are_nac() {
    let (program, main) = field_store_program(false);
    let result = solve(&program, false);
    assert_eq!(exit_value(&program, &result, main, "x"), Value::Nac);
}

#[test]
fn test_array_index_rule() {
    let (program, main) = array_program();
    let result = solve(&program, true);

    // arr[1] = 20 cannot alias arr[0]
    assert_eq!(exit_value(&program, &result, main, "x"), Value::Constant(10));
    // unknown index aliases both stores
    assert_eq!(exit_value(&program, &result, main, "y"), Value::Nac);
}

#[test]
fn test_alias_awareness_needs_points_to() {
    let (program, _) = field_store_program(false);
    let pta = points_to(&program, ContextStrategy::Insensitive);
    let icfg = icfg_of(&program, &pta);

    let err = InterConstantPropagation::with_aliases(&program, &icfg, None)
        .err()
        .expect("missing points-to result must fail");
    assert!(matches!(err, AnalysisError::MissingPrecondition { .. }), "{err}");
}

#[test]
fn test_solution_is_deterministic() {
    let (program, _) = field_store_program(true);
    assert_eq!(solve(&program, true), solve(&program, true));
}

// ═══════════════════════════════════════════════════════════════════════════
// Solver contract
// ═══════════════════════════════════════════════════════════════════════════

/// Backward analysis the interprocedural solver must refuse
struct Backward;

impl InterDataflowAnalysis for Backward {
    type Fact = ();

    fn name(&self) -> &'static str {
        "backward"
    }

    fn is_forward(&self) -> bool {
        false
    }

    fn new_boundary_fact(&self, _method: MethodId) {}

    fn new_initial_fact(&self) {}

    fn meet_into(&self, _fact: &(), _target: &mut ()) {}

    fn transfer_call_node(&self, _stmt: &Stmt, _in: &(), _out: &mut ()) -> Result<bool> {
        Ok(false)
    }

    fn transfer_non_call_node(
        &self,
        _stmt: &Stmt,
        _in: &(),
        _out: &mut (),
        _ctx: &mut InterContext<'_, ()>,
    ) -> Result<bool> {
        Ok(false)
    }

    fn transfer_normal_edge(&self, _edge: &ICFGEdge, _out: &()) {}

    fn transfer_call_to_return_edge(&self, _edge: &ICFGEdge, _out: &()) {}

    fn transfer_call_edge(&self, _edge: &ICFGEdge, _out: &()) {}

    fn transfer_return_edge(&self, _edge: &ICFGEdge, _out: &()) {}
}

#[test]
fn test_backward_analysis_is_unsupported() {
    let (program, main) = call_program();
    let icfg = ICFGBuilder::build(&program, &[main], Vec::new()).unwrap();
    let err = InterSolver::new(&Backward, &program, &icfg).solve().unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::UnsupportedMode {
            mode: "backward",
            ..
        }
    ));
}
