//! Coordinate-keyed multigraph bookkeeping: edge pool, vertex registry, classifier.
//!
//! Purpose
//! - Hold the input segments as independently consumable records (`EdgePool`).
//! - Track, per distinct coordinate, a role derived from degree and a
//!   remaining-use countdown (`VertexRegistry`).
//! - Derive the registry from the pool (`classify`), optionally after stripping
//!   Branch edges (`ClassifyMode::ExcludeThenReclassify`).
//!
//! Points are plain values everywhere; all identity goes through coordinate
//! lookups into the registry arena.

mod classify;
mod pool;
mod registry;

pub use classify::{classify, degrees, prepare, strip_branches, ClassifyMode};
pub use pool::{EdgeId, EdgePool, EdgeRecord};
pub use registry::{Role, VertexId, VertexRecord, VertexRegistry};
