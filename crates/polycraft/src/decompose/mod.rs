//! Decomposition Engine: drains a classified edge pool into polylines.
//!
//! Purpose
//! - Walk the graph one edge at a time, consuming each input edge exactly once
//!   and spending both endpoint budgets per step, until every budget in the
//!   registry is 0.
//!
//! Why this design
//! - Starts prefer Branch, then Leaf, then Connector, so open walks are
//!   anchored at their natural ends and a Connector start only happens on a
//!   pure cycle.
//! - Continuations prefer Connector, then Leaf, then Branch, which keeps a
//!   walk going through pass-through vertices as long as possible.
//! - A walk closes on reaching a Leaf or Branch, or on reaching a Connector
//!   whose budget hits 0 on arrival. The latter is the cycle's start vertex,
//!   so each disjoint cycle becomes its own closed polyline.
//!
//! Layout
//! - `types.rs` (config, polyline, walk state), `engine.rs` (the loop).

mod engine;
mod types;

pub use engine::{decompose, decompose_with_defaults, Engine};
pub use types::{DecomposeCfg, Polyline, Step, WalkState, CONTINUE_PRIORITY, START_PRIORITY};
