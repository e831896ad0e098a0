//! Seeded random segment soups for benches, property checks and the CLI.
//!
//! Model
//! - Draw `walks` lattice walks inside `[-extent, extent]²`. Each walk starts
//!   at a uniform lattice point and takes up to `max_len` unit steps along an
//!   axis or diagonal, staying inside the box.
//! - Explode every walk into its segments, flip each segment's orientation with
//!   probability 1/2 and shuffle the whole list.
//! - The same `(cfg, seed)` always yields the same soup.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::geom::{Point, Segment};

const STEPS: [(i64, i64); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SoupCfg {
    pub walks: usize,
    /// Upper bound on steps per walk; each walk draws its length from `1..=max_len`.
    pub max_len: usize,
    /// Half-width of the coordinate box.
    pub extent: i64,
}

impl Default for SoupCfg {
    fn default() -> Self {
        Self {
            walks: 8,
            max_len: 12,
            extent: 10,
        }
    }
}

fn draw_walk(rng: &mut StdRng, cfg: SoupCfg) -> Vec<Point> {
    let e = cfg.extent.max(1);
    let mut at = Point::new(rng.gen_range(-e..=e), rng.gen_range(-e..=e));
    let len = rng.gen_range(1..=cfg.max_len.max(1));
    let mut pts = vec![at];
    for _ in 0..len {
        let (dx, dy) = STEPS[rng.gen_range(0..STEPS.len())];
        let next = Point::new(at.x + dx, at.y + dy);
        if next.x.abs() > e || next.y.abs() > e {
            continue;
        }
        pts.push(next);
        at = next;
    }
    pts
}

/// Random segment soup, deterministic per `seed`.
pub fn random_walk_soup(cfg: SoupCfg, seed: u64) -> Vec<Segment> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::new();
    for _ in 0..cfg.walks {
        let walk = draw_walk(&mut rng, cfg);
        for w in walk.windows(2) {
            let s = if rng.gen_bool(0.5) {
                Segment::new(w[0], w[1])
            } else {
                Segment::new(w[1], w[0])
            };
            out.push(s);
        }
    }
    out.shuffle(&mut rng);
    tracing::debug!(seed, walks = cfg.walks, segments = out.len(), "drew soup");
    out
}
