//! ICFG construction from resolved call edges
//!
//! The call edges normally come from the pointer analysis call graph
//! (projected onto call site and method). Only methods reachable from the
//! entry methods through those edges are included.

use super::cfg_builder::CFGBuilder;
use crate::errors::{AnalysisError, Result};
use crate::features::flow_graph::domain::{ICFGEdge, ICFGEdgeKind, ICFG};
use crate::shared::models::{MethodId, Program, StmtId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::debug;

pub struct ICFGBuilder;

impl ICFGBuilder {
    pub fn build(
        program: &Program,
        entry_methods: &[MethodId],
        call_edges: impl IntoIterator<Item = (StmtId, MethodId)>,
    ) -> Result<ICFG> {
        if entry_methods.is_empty() {
            return Err(AnalysisError::InvalidProgram(
                "ICFG needs at least one entry method".to_string(),
            ));
        }

        let mut callees: FxHashMap<StmtId, Vec<MethodId>> = FxHashMap::default();
        for (call_site, callee) in call_edges {
            let targets = callees.entry(call_site).or_default();
            if !targets.contains(&callee) {
                targets.push(callee);
            }
        }

        // Reachable methods, breadth first from the entries
        let mut methods = Vec::new();
        let mut seen: FxHashSet<MethodId> = FxHashSet::default();
        let mut queue: VecDeque<MethodId> = entry_methods.iter().copied().collect();
        while let Some(m) = queue.pop_front() {
            if !seen.insert(m) {
                continue;
            }
            methods.push(m);
            for sid in &program.method(m).body {
                if let Some(targets) = callees.get(sid) {
                    queue.extend(targets.iter().copied());
                }
            }
        }

        let mut icfg = ICFG {
            entry_methods: entry_methods.to_vec(),
            cfgs: FxHashMap::default(),
            methods: methods.clone(),
            nodes: Vec::new(),
            edges: Vec::new(),
            out_edges: FxHashMap::default(),
            in_edges: FxHashMap::default(),
            callees: FxHashMap::default(),
            node_method: FxHashMap::default(),
        };

        for &m in &methods {
            let cfg = CFGBuilder::build(program, m)?;
            for &node in cfg.nodes() {
                icfg.nodes.push(node);
                icfg.node_method.insert(node, m);
            }
            icfg.cfgs.insert(m, cfg);
        }

        let mut edges = Vec::new();
        for &m in &methods {
            let Some(cfg) = icfg.cfgs.get(&m) else {
                continue;
            };
            for &node in cfg.nodes() {
                let invoke = program.stmt(node).as_invoke();
                for edge in cfg.out_edges(node) {
                    let kind = if invoke.is_some() {
                        ICFGEdgeKind::CallToReturn
                    } else {
                        ICFGEdgeKind::Normal
                    };
                    edges.push(ICFGEdge {
                        kind,
                        source: edge.source,
                        target: edge.target,
                    });
                }

                let Some(invoke) = invoke else {
                    continue;
                };
                let Some(targets) = callees.get(&node) else {
                    continue;
                };
                for &callee in targets {
                    let callee_method = program.method(callee);
                    edges.push(ICFGEdge {
                        kind: ICFGEdgeKind::Call {
                            callee,
                            args: invoke.args.clone(),
                            params: callee_method.params.clone(),
                        },
                        source: node,
                        target: callee_method.entry,
                    });
                    for return_site in cfg.succs(node) {
                        edges.push(ICFGEdge {
                            kind: ICFGEdgeKind::Return {
                                call_site: node,
                                callee,
                                return_vars: callee_method.return_vars.clone(),
                                result: invoke.lhs,
                            },
                            source: callee_method.exit,
                            target: return_site,
                        });
                    }
                }
                icfg.callees.insert(node, targets.clone());
            }
        }

        for (i, edge) in edges.iter().enumerate() {
            icfg.out_edges.entry(edge.source).or_default().push(i);
            icfg.in_edges.entry(edge.target).or_default().push(i);
        }
        icfg.edges = edges;

        debug!(
            methods = icfg.methods.len(),
            nodes = icfg.nodes.len(),
            edges = icfg.edges.len(),
            "ICFG built"
        );
        Ok(icfg)
    }
}
