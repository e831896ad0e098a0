//! Ranker: annotate polylines with their length and order longest first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decompose::Polyline;
use crate::geom::Point;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedPolyline {
    pub length: f64,
    pub closed: bool,
    pub points: Vec<Point>,
}

impl RankedPolyline {
    pub fn from_polyline(line: Polyline) -> Self {
        Self {
            length: line.length(),
            closed: line.is_closed(),
            points: line.points,
        }
    }

    pub fn as_polyline(&self) -> Polyline {
        Polyline::new(self.points.clone())
    }
}

/// `length; (x, y) (x, y) …`
impl fmt::Display for RankedPolyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6};", self.length)?;
        for p in &self.points {
            write!(f, " {p}")?;
        }
        Ok(())
    }
}

/// Polylines ordered by length, descending; equal lengths keep emission order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub polylines: Vec<RankedPolyline>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedPolyline> {
        self.polylines.iter()
    }

    pub fn total_length(&self) -> f64 {
        self.polylines.iter().map(|p| p.length).sum()
    }

    pub fn closed_count(&self) -> usize {
        self.polylines.iter().filter(|p| p.closed).count()
    }

    /// Number of input edges covered by the set.
    pub fn edge_count(&self) -> usize {
        self.polylines
            .iter()
            .map(|p| p.points.len().saturating_sub(1))
            .sum()
    }

    pub fn longest(&self) -> Option<&RankedPolyline> {
        self.polylines.first()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a RankedPolyline;
    type IntoIter = std::slice::Iter<'a, RankedPolyline>;

    fn into_iter(self) -> Self::IntoIter {
        self.polylines.iter()
    }
}

/// Stable descending sort by length.
pub fn rank(polylines: Vec<Polyline>) -> ResultSet {
    let mut ranked: Vec<RankedPolyline> = polylines
        .into_iter()
        .map(RankedPolyline::from_polyline)
        .collect();
    ranked.sort_by(|a, b| b.length.total_cmp(&a.length));
    ResultSet { polylines: ranked }
}
