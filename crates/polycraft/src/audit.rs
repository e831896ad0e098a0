//! Audit: recheck a result set against the segments it was built from.
//!
//! Checks
//! - Every consecutive point pair in the result matches one input segment
//!   (either orientation), and every input segment is matched exactly once.
//! - Per coordinate, incidence in the result (endpoint occurrence 1, interior
//!   occurrence 2) equals the degree in the input.
//! - Every Leaf coordinate ends exactly one polyline.

use std::collections::HashMap;

use crate::geom::{Point, Segment};
use crate::graph::{degrees, EdgePool};
use crate::rank::ResultSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DegreeMismatch {
    pub point: Point,
    pub degree: u32,
    pub incidence: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Audit {
    pub segments: usize,
    /// Σ (points − 1) over the result.
    pub steps: usize,
    /// Result steps with no input segment left to match.
    pub unmatched_steps: usize,
    /// Input segments no result step matched.
    pub unused_segments: usize,
    pub degree_mismatches: Vec<DegreeMismatch>,
    /// Degree-1 coordinates whose endpoint count is not 1.
    pub leaf_endpoint_errors: Vec<(Point, u32)>,
}

impl Audit {
    pub fn is_consistent(&self) -> bool {
        self.steps == self.segments
            && self.unmatched_steps == 0
            && self.unused_segments == 0
            && self.degree_mismatches.is_empty()
            && self.leaf_endpoint_errors.is_empty()
    }
}

fn unordered(p: Point, q: Point) -> (Point, Point) {
    if p <= q {
        (p, q)
    } else {
        (q, p)
    }
}

/// Audits `result` against `segments`. In exclude mode pass the stripped set.
pub fn audit(segments: &[Segment], result: &ResultSet) -> Audit {
    let mut out = Audit {
        segments: segments.len(),
        ..Audit::default()
    };

    let mut pending: HashMap<(Point, Point), usize> = HashMap::new();
    for s in segments {
        *pending.entry(unordered(s.a, s.b)).or_default() += 1;
    }

    let mut incidence: HashMap<Point, u32> = HashMap::new();
    let mut endpoints: HashMap<Point, u32> = HashMap::new();
    for line in result {
        let n = line.points.len();
        for (i, &p) in line.points.iter().enumerate() {
            let end = i == 0 || i + 1 == n;
            *incidence.entry(p).or_default() += if end { 1 } else { 2 };
            if end {
                *endpoints.entry(p).or_default() += 1;
            }
        }
        for w in line.points.windows(2) {
            out.steps += 1;
            match pending.get_mut(&unordered(w[0], w[1])) {
                Some(left) if *left > 0 => *left -= 1,
                _ => out.unmatched_steps += 1,
            }
        }
    }
    out.unused_segments = pending.values().sum();

    let degree: Vec<(Point, u32)> = degrees(&EdgePool::from_segments(segments));
    for &(point, d) in &degree {
        let seen = incidence.remove(&point).unwrap_or(0);
        if seen != d {
            out.degree_mismatches.push(DegreeMismatch {
                point,
                degree: d,
                incidence: seen,
            });
        }
        if d == 1 {
            let ends = endpoints.get(&point).copied().unwrap_or(0);
            if ends != 1 {
                out.leaf_endpoint_errors.push((point, ends));
            }
        }
    }
    // Coordinates that appear in the result but not in the input.
    let mut strays: Vec<DegreeMismatch> = incidence
        .into_iter()
        .map(|(point, seen)| DegreeMismatch {
            point,
            degree: 0,
            incidence: seen,
        })
        .collect();
    strays.sort_by_key(|m| m.point);
    out.degree_mismatches.extend(strays);

    tracing::debug!(
        segments = out.segments,
        steps = out.steps,
        mismatches = out.degree_mismatches.len(),
        consistent = out.is_consistent(),
        "audit"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::Polyline;
    use crate::rank::rank;

    fn segs(raw: &[(i64, i64, i64, i64)]) -> Vec<Segment> {
        raw.iter().copied().map(Segment::from).collect()
    }

    fn line(pts: &[(i64, i64)]) -> Polyline {
        pts.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn hand_built_chain_is_consistent() {
        let s = segs(&[(0, 0, 1, 0), (2, 0, 1, 0)]);
        let a = audit(&s, &rank(vec![line(&[(0, 0), (1, 0), (2, 0)])]));
        assert!(a.is_consistent(), "{a:?}");
    }

    #[test]
    fn detects_missing_and_invented_edges() {
        let s = segs(&[(0, 0, 1, 0), (1, 0, 2, 0)]);
        let a = audit(&s, &rank(vec![line(&[(0, 0), (1, 0)]), line(&[(1, 0), (5, 5)])]));
        assert!(!a.is_consistent());
        assert_eq!(a.unmatched_steps, 1);
        assert_eq!(a.unused_segments, 1);
        assert!(a
            .degree_mismatches
            .iter()
            .any(|m| m.point == Point::new(5, 5) && m.degree == 0));
        assert_eq!(a.leaf_endpoint_errors, vec![(Point::new(2, 0), 0)]);
    }

    #[test]
    fn closed_loop_counts_start_twice() {
        let s = segs(&[(0, 0, 1, 0), (1, 0, 0, 1), (0, 1, 0, 0)]);
        let a = audit(&s, &rank(vec![line(&[(0, 0), (1, 0), (0, 1), (0, 0)])]));
        assert!(a.is_consistent(), "{a:?}");
    }
}
