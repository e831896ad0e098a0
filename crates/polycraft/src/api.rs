//! Curated internal API (UNSTABLE).
//!
//! A flat convenience surface for the CLI, benches and examples. Breaking
//! changes are allowed.

// Geometry and input
pub use crate::geom::{distance, Point, Segment};
pub use crate::input::{format_segments, parse_segments, read_segments};
// Graph bookkeeping
pub use crate::graph::{
    classify, prepare, strip_branches, ClassifyMode, EdgePool, Role, VertexRegistry,
};
// Engine and ranking
pub use crate::decompose::{decompose, decompose_with_defaults, DecomposeCfg, Engine, Polyline};
pub use crate::rank::{rank, RankedPolyline, ResultSet};
pub use crate::{craft, kept_segments};
// Checks and samples
pub use crate::audit::{audit, Audit};
pub use crate::soup::{random_walk_soup, SoupCfg};
