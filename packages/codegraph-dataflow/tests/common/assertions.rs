//! Custom assertions for test verification

use codegraph_dataflow::features::data_flow::{CpFact, DataflowResult, DeadCodeReport, Value};
use codegraph_dataflow::shared::models::{MethodId, Program, StmtId};

/// Value of `var` (by name) in the IN fact of `stmt`
pub fn in_value(program: &Program, result: &DataflowResult<CpFact>, method: MethodId, stmt: StmtId, var: &str) -> Value {
    let var = program
        .var_by_name(method, var)
        .unwrap_or_else(|| panic!("no variable named {var}"));
    result
        .in_fact(stmt)
        .unwrap_or_else(|| panic!("no IN fact for {stmt}"))
        .get(var)
}

/// Value of `var` (by name) on entry to the exit node of `method`
pub fn exit_value(program: &Program, result: &DataflowResult<CpFact>, method: MethodId, var: &str) -> Value {
    in_value(program, result, method, program.method(method).exit, var)
}

/// Assert the dead statements of a report by body index
pub fn assert_dead_indices(program: &Program, report: &DeadCodeReport, expected: &[usize]) {
    let mut actual = report.indices(program);
    actual.sort_unstable();
    assert_eq!(
        actual, expected,
        "dead statement indices differ; report: {:?}",
        report
    );
}
