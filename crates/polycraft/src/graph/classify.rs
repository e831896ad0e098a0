//! Classifier: degrees from the edge pool, roles and budgets into a registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::pool::EdgePool;
use super::registry::{Role, VertexRegistry};
use crate::geom::Point;

/// How Branch vertices take part in a decomposition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassifyMode {
    /// Every vertex, Branch included, participates directly.
    #[default]
    IncludeBranches,
    /// Drop every edge touching a Branch, reclassify what is left, and
    /// decompose only that. Branch coordinates never appear in the output.
    ExcludeThenReclassify,
}

/// Degree of every coordinate, in order of first appearance (edge order, then
/// `a` before `b`).
///
/// Each endpoint occurrence counts once for its coordinate and never against
/// itself, so a self-loop contributes 2 to its only coordinate.
pub fn degrees(pool: &EdgePool) -> Vec<(Point, u32)> {
    let mut order: Vec<(Point, u32)> = Vec::new();
    let mut slot: HashMap<Point, usize> = HashMap::new();
    for rec in pool.records() {
        for p in [rec.a, rec.b] {
            let idx = *slot.entry(p).or_insert_with(|| {
                order.push((p, 0));
                order.len() - 1
            });
            order[idx].1 += 1;
        }
    }
    order
}

/// Builds a fresh registry from the pool. Pure: classifying the same pool twice
/// yields equal registries.
pub fn classify(pool: &EdgePool) -> VertexRegistry {
    let mut reg = VertexRegistry::default();
    for (p, d) in degrees(pool) {
        let inserted = reg.insert(p, d);
        debug_assert!(inserted.is_some(), "{p} has degree {d}");
    }
    tracing::debug!(
        vertices = reg.len(),
        leaves = reg.count_role(Role::Leaf),
        connectors = reg.count_role(Role::Connector),
        branches = reg.count_role(Role::Branch),
        "classified"
    );
    reg
}

/// The sub-pool of edges with no Branch endpoint under `registry`.
pub fn strip_branches(pool: &EdgePool, registry: &VertexRegistry) -> EdgePool {
    let is_branch = |p: Point| {
        registry
            .record_at(p)
            .is_some_and(|v| v.role == Role::Branch)
    };
    pool.filtered(|e| !is_branch(e.a) && !is_branch(e.b))
}

/// Classifies `pool` under `mode` and returns the pool and registry the engine
/// should run on.
pub fn prepare(pool: EdgePool, mode: ClassifyMode) -> (EdgePool, VertexRegistry) {
    let registry = classify(&pool);
    match mode {
        ClassifyMode::IncludeBranches => (pool, registry),
        ClassifyMode::ExcludeThenReclassify => {
            let stripped = strip_branches(&pool, &registry);
            tracing::debug!(
                dropped = pool.len() - stripped.len(),
                kept = stripped.len(),
                "stripped branch edges"
            );
            let registry = classify(&stripped);
            (stripped, registry)
        }
    }
}
