//! Data types for the decomposition engine: config, walk state, polylines.

use serde::{Deserialize, Serialize};

use crate::geom::{distance, Point};
use crate::graph::{ClassifyMode, EdgeId, Role, VertexId};

/// Start-vertex priority when no walk is active.
pub const START_PRIORITY: [Role; 3] = [Role::Branch, Role::Leaf, Role::Connector];

/// Candidate priority while extending: pass-through vertices before walk ends.
pub const CONTINUE_PRIORITY: [Role; 3] = [Role::Connector, Role::Leaf, Role::Branch];

/// Decomposition configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecomposeCfg {
    pub mode: ClassifyMode,
}

impl DecomposeCfg {
    pub fn with_mode(mode: ClassifyMode) -> Self {
        Self { mode }
    }
}

/// An ordered walk through consumed edges (≥ 2 points once emitted).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of input edges this walk consumed.
    pub fn edge_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn is_closed(&self) -> bool {
        self.points.len() >= 2 && self.first() == self.last()
    }

    /// Consecutive point pairs, one per consumed edge.
    pub fn steps(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Sum of Euclidean step lengths.
    pub fn length(&self) -> f64 {
        self.steps().map(|(p, q)| distance(p, q)).sum()
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Engine state. The active walk is `head` followed by `current`, so an
/// extending walk always has a last point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WalkState {
    #[default]
    Idle,
    Extending {
        head: Vec<VertexId>,
        current: VertexId,
    },
}

impl WalkState {
    pub fn is_idle(&self) -> bool {
        matches!(self, WalkState::Idle)
    }
}

/// What a single engine step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A new walk was anchored at this vertex.
    Started(VertexId),
    /// The walk consumed `edge` and continues from `to`.
    Extended { edge: EdgeId, to: VertexId },
    /// The walk ended; `index` is its position in emission order.
    Closed { index: usize },
    /// Every budget is spent.
    Finished,
}
