//! Whole-program pipeline: stage order, session contents, configuration

#[path = "../common/mod.rs"]
mod common;
use common::*;

use codegraph_dataflow::config::{ContextStrategy, PipelineConfig, Preset, SolverKind};
use codegraph_dataflow::errors::AnalysisError;
use codegraph_dataflow::features::data_flow::{CpFact, DataflowResult, DeadCodeReport, LiveVars, Value};
use codegraph_dataflow::features::flow_graph::{CFG, ICFG};
use codegraph_dataflow::features::points_to::PointerAnalysisResult;
use codegraph_dataflow::pipeline::{AnalysisId, AnalysisPipeline};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_balanced_run_publishes_every_stage() {
    let (program, main) = call_program();
    let program = Arc::new(program);
    let (session, summary) = AnalysisPipeline::new(PipelineConfig::default())
        .run_with_summary(program.clone())
        .unwrap();

    assert_eq!(summary.preset, Preset::Balanced);
    assert_eq!(summary.context, "1-obj");
    assert_eq!(summary.reachable_methods, 3);
    assert_eq!(summary.methods_analyzed, 3);
    assert_eq!(summary.call_edges, 3);
    assert!(summary.inter_constprop);
    assert!(summary.alias_aware);

    let pta = session.result::<PointerAnalysisResult>(AnalysisId::PointerAnalysis).unwrap();
    assert_eq!(pta.reachable_methods().len(), 3);
    let icfg = session.result::<ICFG>(AnalysisId::Icfg).unwrap();
    assert_eq!(icfg.methods().len(), 3);
    assert_eq!(summary.icfg_nodes, icfg.nodes().len());

    for method in pta.reachable_methods() {
        assert!(session.result::<CFG>(AnalysisId::Cfg(method)).is_ok());
        assert!(session
            .result::<DataflowResult<CpFact>>(AnalysisId::ConstantPropagation(method))
            .is_ok());
        assert!(session
            .result::<DataflowResult<LiveVars>>(AnalysisId::LiveVariables(method))
            .is_ok());
        assert!(session.result::<DeadCodeReport>(AnalysisId::DeadCode(method)).is_ok());
    }

    let facts = session
        .result::<DataflowResult<CpFact>>(AnalysisId::InterConstantPropagation)
        .unwrap();
    assert_eq!(exit_value(&program, &facts, main, "c"), Value::Constant(42));

    // the pointer analysis runs first and the interprocedural stage last
    assert_eq!(session.published().first(), Some(&AnalysisId::PointerAnalysis));
    assert_eq!(session.published().last(), Some(&AnalysisId::InterConstantPropagation));
}

#[test]
fn test_intraprocedural_facts_stay_local() {
    let (program, main) = call_program();
    let session = AnalysisPipeline::new(PipelineConfig::default())
        .run(Arc::new(program))
        .unwrap();

    // Without the ICFG the call result is unknown
    let local = session
        .result::<DataflowResult<CpFact>>(AnalysisId::ConstantPropagation(main))
        .unwrap();
    assert_eq!(exit_value(session.program(), &local, main, "c"), Value::Nac);
}

#[test]
fn test_presets_differ_on_heap_loads() {
    let (program, main) = field_store_program(false);
    let program = Arc::new(program);

    let x_under = |preset: Preset| {
        let session = AnalysisPipeline::new(PipelineConfig::preset(preset))
            .run(program.clone())
            .unwrap();
        let facts = session
            .result::<DataflowResult<CpFact>>(AnalysisId::InterConstantPropagation)
            .unwrap();
        exit_value(&program, &facts, main, "x")
    };

    assert_eq!(x_under(Preset::Fast), Value::Nac);
    assert_eq!(x_under(Preset::Balanced), Value::Constant(1));
    assert_eq!(x_under(Preset::Precise), Value::Constant(1));
}

#[test]
fn test_disabled_stages_publish_nothing() {
    let (program, main) = branch_program();
    let config = PipelineConfig::preset(Preset::Balanced)
        .dead_code(|c| c.enabled(false))
        .inter_constprop(|c| c.enabled(false).alias_aware(false));
    let (session, summary) = AnalysisPipeline::new(config)
        .run_with_summary(Arc::new(program))
        .unwrap();

    assert!(!session.contains(AnalysisId::DeadCode(main)));
    assert!(!session.contains(AnalysisId::InterConstantPropagation));
    assert!(session.contains(AnalysisId::Icfg));
    assert!(!summary.inter_constprop);
    assert_eq!(summary.dead_statements, 0);

    let err = session
        .result::<DeadCodeReport>(AnalysisId::DeadCode(main))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::MissingResult(AnalysisId::DeadCode(_))));
}

#[test]
fn test_dead_code_is_summarized() {
    let (program, main) = branch_program();
    let (session, summary) = AnalysisPipeline::new(PipelineConfig::default())
        .run_with_summary(Arc::new(program))
        .unwrap();

    let report = session.result::<DeadCodeReport>(AnalysisId::DeadCode(main)).unwrap();
    assert_dead_indices(session.program(), &report, &[3, 4]);
    assert_eq!(summary.dead_statements, 2);
}

#[test]
fn test_invalid_config_fails_before_any_stage() {
    let (program, _) = call_program();
    let config = PipelineConfig::preset(Preset::Balanced).inter_constprop(|c| c.enabled(false));
    let err = AnalysisPipeline::new(config).run(Arc::new(program)).unwrap_err();
    assert!(matches!(err, AnalysisError::Config(_)), "{err}");
}

#[test]
fn test_yaml_config_drives_pipeline() {
    let yaml = r#"
version: 1
preset: fast
overrides:
  solver:
    kind: iterative
  pta:
    context:
      kind: call_site
      k: 2
"#;
    let config = PipelineConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.solver.kind, SolverKind::Iterative);
    assert_eq!(config.pta.context, ContextStrategy::CallSite { k: 2 });
    assert_eq!(PipelineConfig::from_yaml_str(&config.to_yaml().unwrap()).unwrap(), config);

    let (program, main) = call_program();
    let (session, summary) = AnalysisPipeline::new(config)
        .run_with_summary(Arc::new(program))
        .unwrap();
    assert_eq!(summary.preset, Preset::Fast);
    assert_eq!(summary.context, "2-call");
    assert!(!summary.alias_aware);

    let facts = session
        .result::<DataflowResult<CpFact>>(AnalysisId::InterConstantPropagation)
        .unwrap();
    assert_eq!(exit_value(session.program(), &facts, main, "c"), Value::Constant(42));
}
