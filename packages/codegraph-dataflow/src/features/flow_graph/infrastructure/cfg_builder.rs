/*
 * CFG Builder
 *
 * Derives statement-level control flow edges from statement kinds:
 * - entry → first statement (or exit for an empty body)
 * - goto: one edge to the target
 * - if: true edge to the target, false edge to the next statement
 * - switch: one edge per case plus the default edge
 * - return and the last statement: edge to exit
 * - everything else: fall-through to the next statement
 */

use crate::errors::{AnalysisError, Result};
use crate::features::flow_graph::domain::{CFGEdgeKind, CFG};
use crate::shared::models::{MethodId, Program, StmtId, StmtKind};

pub struct CFGBuilder;

impl CFGBuilder {
    pub fn build(program: &Program, method_id: MethodId) -> Result<CFG> {
        let method = program.method(method_id);
        let body = &method.body;

        let mut nodes = Vec::with_capacity(body.len() + 2);
        nodes.push(method.entry);
        nodes.extend(body.iter().copied());
        nodes.push(method.exit);
        let mut cfg = CFG::new(method_id, method.entry, method.exit, nodes);

        let target_of = |index: usize| -> Result<StmtId> {
            body.get(index).copied().ok_or_else(|| {
                AnalysisError::InvalidProgram(format!(
                    "branch target {} out of bounds in method '{}'",
                    index, method.name
                ))
            })
        };
        let next_of = |index: usize| body.get(index + 1).copied();

        cfg.add_edge(
            CFGEdgeKind::Entry,
            method.entry,
            body.first().copied().unwrap_or(method.exit),
        );

        for (i, &sid) in body.iter().enumerate() {
            match &program.stmt(sid).kind {
                StmtKind::Goto { target } => {
                    cfg.add_edge(CFGEdgeKind::Goto, sid, target_of(*target)?);
                }
                StmtKind::If { target, .. } => {
                    cfg.add_edge(CFGEdgeKind::IfTrue, sid, target_of(*target)?);
                    cfg.add_edge(
                        CFGEdgeKind::IfFalse,
                        sid,
                        next_of(i).unwrap_or(method.exit),
                    );
                }
                StmtKind::Switch { cases, default, .. } => {
                    for &(value, target) in cases {
                        cfg.add_edge(CFGEdgeKind::SwitchCase(value), sid, target_of(target)?);
                    }
                    cfg.add_edge(CFGEdgeKind::SwitchDefault, sid, target_of(*default)?);
                }
                StmtKind::Return { .. } => {
                    cfg.add_edge(CFGEdgeKind::Return, sid, method.exit);
                }
                _ => match next_of(i) {
                    Some(next) => cfg.add_edge(CFGEdgeKind::FallThrough, sid, next),
                    None => cfg.add_edge(CFGEdgeKind::Return, sid, method.exit),
                },
            }
        }

        Ok(cfg)
    }
}
