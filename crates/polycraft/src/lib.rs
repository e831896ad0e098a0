//! Reassemble unordered lattice segments into polylines, ranked by length.
//!
//! Pipeline
//! - `input`: read `x1 y1 x2 y2` records into `Segment`s.
//! - `graph`: edge pool, degree classification, vertex registry with budgets.
//! - `decompose`: the walk engine that consumes every edge exactly once.
//! - `rank`: lengths and the descending, stable ordering.
//! - `audit`: recheck a result against its input.
//!
//! API Policy
//! - The CLI is the only consumer. There is no stable public API; prefer the
//!   `prelude` or `api` re-exports over deep paths.

pub mod api;
pub mod audit;
pub mod decompose;
pub mod error;
pub mod geom;
pub mod graph;
pub mod input;
pub mod rank;
pub mod soup;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use decompose::DecomposeCfg;
pub use error::{DecomposeError, InputError};
pub use geom::{Point, Segment};
pub use rank::ResultSet;

/// Common exports for callers.
pub mod prelude {
    pub use crate::audit::{audit, Audit};
    pub use crate::decompose::{decompose, DecomposeCfg, Engine, Polyline};
    pub use crate::error::{DecomposeError, InputError};
    pub use crate::geom::{Point, Segment};
    pub use crate::graph::ClassifyMode;
    pub use crate::rank::{rank, RankedPolyline, ResultSet};
    pub use crate::{craft, kept_segments};
}

/// Decompose and rank in one call.
pub fn craft(segments: &[Segment], cfg: DecomposeCfg) -> Result<ResultSet, DecomposeError> {
    decompose::decompose(segments, cfg).map(rank::rank)
}

/// The segments a run under `cfg` actually consumes: all of them when
/// branches are included, the branch-free remainder otherwise.
pub fn kept_segments(segments: &[Segment], cfg: DecomposeCfg) -> Vec<Segment> {
    let (pool, _) = graph::prepare(graph::EdgePool::from_segments(segments), cfg.mode);
    pool.segments().collect()
}
