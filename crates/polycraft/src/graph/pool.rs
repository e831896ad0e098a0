//! Edge Pool: the multiset of input segments with per-record consumption.

use crate::geom::{Point, Segment};

/// An index into the edge pool.
///
/// Edges get identities so that parallel segments with identical endpoints are
/// still distinct records, each consumed on its own. Ids follow input order and
/// double as the tie-break order during continuation search.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

impl std::fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e_{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeRecord {
    pub a: Point,
    pub b: Point,
    pub consumed: bool,
}

impl EdgeRecord {
    pub fn new(seg: Segment) -> Self {
        Self {
            a: seg.a,
            b: seg.b,
            consumed: false,
        }
    }

    #[inline]
    pub fn touches(&self, p: Point) -> bool {
        self.a == p || self.b == p
    }

    /// The endpoint across from `p`; `p` itself for a self-loop.
    #[inline]
    pub fn other(&self, p: Point) -> Option<Point> {
        if self.a == p {
            Some(self.b)
        } else if self.b == p {
            Some(self.a)
        } else {
            None
        }
    }

    #[inline]
    pub fn segment(&self) -> Segment {
        Segment::new(self.a, self.b)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgePool {
    edges: Vec<EdgeRecord>,
}

impl EdgePool {
    pub fn from_segments(segments: &[Segment]) -> Self {
        Self {
            edges: segments.iter().copied().map(EdgeRecord::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn get(&self, id: EdgeId) -> &EdgeRecord {
        &self.edges[id.0]
    }

    pub fn indices(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edges.len()).map(EdgeId)
    }

    pub fn records(&self) -> impl Iterator<Item = &EdgeRecord> {
        self.edges.iter()
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.edges.iter().map(EdgeRecord::segment)
    }

    /// Marks an edge consumed. Returns `false` if it already was.
    pub fn consume(&mut self, id: EdgeId) -> bool {
        let rec = &mut self.edges[id.0];
        let fresh = !rec.consumed;
        rec.consumed = true;
        fresh
    }

    pub fn unconsumed(&self) -> usize {
        self.edges.iter().filter(|e| !e.consumed).count()
    }

    /// A fresh pool holding the records that pass `keep`, in their original
    /// order, with consumption reset.
    pub fn filtered(&self, mut keep: impl FnMut(&EdgeRecord) -> bool) -> Self {
        Self {
            edges: self
                .edges
                .iter()
                .filter(|e| keep(e))
                .map(|e| EdgeRecord::new(e.segment()))
                .collect(),
        }
    }
}
