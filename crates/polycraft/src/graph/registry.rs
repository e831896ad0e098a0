//! Vertex Registry: per coordinate, a role and a remaining-use countdown.
//!
//! Budget encoding
//! - Role and `remaining` share disjoint numeric ranges:
//!   Leaf {0,1}, Connector {0,2,3}, Branch {0} ∪ [4, degree+3].
//! - A fresh Connector sits at 3, drops to 2 on first use and to 0 on the second.
//! - A Branch of degree d starts at d+3 and walks d+3 → … → 4 → 0, which is
//!   exactly d uses.
//! - `remaining > 0` holds iff the vertex still has an unconsumed incident edge
//!   (as long as every consumption spends both endpoints once).

use std::collections::HashMap;

use crate::error::DecomposeError;
use crate::geom::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Degree 1: a walk endpoint, used once.
    Leaf,
    /// Degree 2: pass-through, used twice.
    Connector,
    /// Degree ≥ 3: used `degree` times, always ends the walk that reaches it.
    Branch,
}

impl Role {
    /// `None` for degree 0; such coordinates never enter the registry.
    pub fn from_degree(degree: u32) -> Option<Self> {
        match degree {
            0 => None,
            1 => Some(Role::Leaf),
            2 => Some(Role::Connector),
            _ => Some(Role::Branch),
        }
    }

    pub fn initial_budget(self, degree: u32) -> u32 {
        match self {
            Role::Leaf => 1,
            Role::Connector => 3,
            Role::Branch => degree + 3,
        }
    }

    /// One countdown step. Callers check `remaining > 0` first.
    pub fn step(self, remaining: u32) -> u32 {
        match (self, remaining) {
            (_, 0) => 0,
            (Role::Leaf, _) => 0,
            (Role::Connector, 3) => 2,
            (Role::Connector, _) => 0,
            (Role::Branch, 4) => 0,
            (Role::Branch, n) => n - 1,
        }
    }

    /// Decodes a budget into the number of consumptions it still allows.
    pub fn uses_left(self, remaining: u32) -> u32 {
        match (self, remaining) {
            (_, 0) => 0,
            (Role::Leaf, n) => n,
            (Role::Connector, n) => n - 1,
            (Role::Branch, n) => n - 3,
        }
    }
}

/// An index into the registry arena. Ids follow first appearance of the
/// coordinate in the edge pool, which is the enumeration order for start
/// selection.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct VertexId(pub usize);

impl std::fmt::Debug for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v_{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexRecord {
    pub point: Point,
    /// Degree in the edge set the registry was classified from.
    pub degree: u32,
    pub role: Role,
    pub remaining: u32,
}

impl VertexRecord {
    pub fn new(point: Point, degree: u32) -> Option<Self> {
        let role = Role::from_degree(degree)?;
        Some(Self {
            point,
            degree,
            role,
            remaining: role.initial_budget(degree),
        })
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.remaining > 0
    }

    #[inline]
    pub fn uses_left(&self) -> u32 {
        self.role.uses_left(self.remaining)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VertexRegistry {
    vertices: Vec<VertexRecord>,
    by_point: HashMap<Point, VertexId>,
    /// Number of records with `remaining > 0`.
    live: usize,
}

impl VertexRegistry {
    /// Appends a record; a coordinate already present keeps its first id.
    pub(crate) fn insert(&mut self, point: Point, degree: u32) -> Option<VertexId> {
        if let Some(&id) = self.by_point.get(&point) {
            return Some(id);
        }
        let rec = VertexRecord::new(point, degree)?;
        let id = VertexId(self.vertices.len());
        self.vertices.push(rec);
        self.by_point.insert(point, id);
        self.live += 1;
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn lookup(&self, point: Point) -> Option<VertexId> {
        self.by_point.get(&point).copied()
    }

    pub fn get(&self, id: VertexId) -> &VertexRecord {
        &self.vertices[id.0]
    }

    pub fn record_at(&self, point: Point) -> Option<&VertexRecord> {
        self.lookup(point).map(|id| self.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn records(&self) -> impl Iterator<Item = &VertexRecord> {
        self.vertices.iter()
    }

    pub fn live(&self) -> usize {
        self.live
    }

    /// True once every record's budget is 0.
    pub fn is_exhausted(&self) -> bool {
        self.live == 0
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.vertices.iter().filter(|v| v.role == role).count()
    }

    /// Advances the vertex one countdown step and returns the new budget.
    pub fn spend(&mut self, id: VertexId) -> Result<u32, DecomposeError> {
        let rec = &mut self.vertices[id.0];
        if rec.remaining == 0 {
            return Err(DecomposeError::Overspent { point: rec.point });
        }
        rec.remaining = rec.role.step(rec.remaining);
        if rec.remaining == 0 {
            self.live -= 1;
        }
        Ok(rec.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countdown(role: Role, degree: u32) -> Vec<u32> {
        let mut out = vec![role.initial_budget(degree)];
        while *out.last().unwrap() > 0 {
            out.push(role.step(*out.last().unwrap()));
        }
        out
    }

    #[test]
    fn countdowns_match_degree() {
        assert_eq!(countdown(Role::Leaf, 1), vec![1, 0]);
        assert_eq!(countdown(Role::Connector, 2), vec![3, 2, 0]);
        assert_eq!(countdown(Role::Branch, 3), vec![6, 5, 4, 0]);
        assert_eq!(countdown(Role::Branch, 5), vec![8, 7, 6, 5, 4, 0]);
        for d in 1..12 {
            let role = Role::from_degree(d).unwrap();
            assert_eq!(countdown(role, d).len() as u32 - 1, d);
            assert_eq!(role.uses_left(role.initial_budget(d)), d);
        }
    }

    #[test]
    fn budget_ranges_are_disjoint() {
        let leaf: Vec<u32> = countdown(Role::Leaf, 1);
        let conn: Vec<u32> = countdown(Role::Connector, 2);
        let branch: Vec<u32> = countdown(Role::Branch, 7);
        for v in leaf.iter().filter(|&&v| v > 0) {
            assert!(!conn.contains(v) && !branch.contains(v));
        }
        for v in conn.iter().filter(|&&v| v > 0) {
            assert!(!branch.contains(v));
        }
    }

    #[test]
    fn spend_tracks_live_count_and_rejects_overspend() {
        let mut reg = VertexRegistry::default();
        let a = reg.insert(Point::new(0, 0), 1).unwrap();
        let b = reg.insert(Point::new(1, 0), 2).unwrap();
        assert_eq!(reg.insert(Point::new(0, 0), 1), Some(a));
        assert!(reg.insert(Point::new(9, 9), 0).is_none());
        assert_eq!(reg.live(), 2);

        assert_eq!(reg.spend(a).unwrap(), 0);
        assert_eq!(reg.spend(b).unwrap(), 2);
        assert_eq!(reg.get(b).uses_left(), 1);
        assert_eq!(reg.spend(b).unwrap(), 0);
        assert!(reg.is_exhausted());
        assert_eq!(
            reg.spend(a),
            Err(DecomposeError::Overspent {
                point: Point::new(0, 0)
            })
        );
    }
}
