//! Iterative edge-decomposition loop over the pool and registry.

use crate::error::DecomposeError;
use crate::geom::Segment;
use crate::graph::{prepare, EdgeId, EdgePool, Role, VertexId, VertexRegistry};

use super::types::{DecomposeCfg, Polyline, Step, WalkState, CONTINUE_PRIORITY, START_PRIORITY};

/// Decompose `segments` into polylines (emission order, unranked).
pub fn decompose(segments: &[Segment], cfg: DecomposeCfg) -> Result<Vec<Polyline>, DecomposeError> {
    let mut engine = Engine::from_segments(segments, cfg)?;
    engine.run()?;
    Ok(engine.into_polylines())
}

/// Convenience: include-branches mode.
pub fn decompose_with_defaults(segments: &[Segment]) -> Result<Vec<Polyline>, DecomposeError> {
    decompose(segments, DecomposeCfg::default())
}

/// Per vertex: incident edges in pool order, paired with the endpoint across.
/// A self-loop appears once, paired with its own vertex.
type Incidence = Vec<Vec<(EdgeId, VertexId)>>;

fn incidence(pool: &EdgePool, registry: &VertexRegistry) -> Result<Incidence, DecomposeError> {
    let mut inc: Incidence = vec![Vec::new(); registry.len()];
    for id in pool.indices() {
        let e = pool.get(id);
        let lookup = |point| {
            registry
                .lookup(point)
                .ok_or(DecomposeError::UnregisteredEndpoint { edge: id.0, point })
        };
        let a = lookup(e.a)?;
        let b = lookup(e.b)?;
        inc[a.0].push((id, b));
        if a != b {
            inc[b.0].push((id, a));
        }
    }
    Ok(inc)
}

/// Owns the pool and registry for one run and drains them walk by walk.
///
/// Budgets only decrease, so each role's start cursor only moves forward.
#[derive(Debug)]
pub struct Engine {
    pool: EdgePool,
    registry: VertexRegistry,
    incident: Incidence,
    /// Next registry index to inspect, per entry of `START_PRIORITY`.
    start_cursor: [usize; 3],
    state: WalkState,
    done: Vec<Polyline>,
}

impl Engine {
    /// Runs on a pool and registry as given; they must describe the same graph.
    pub fn new(pool: EdgePool, registry: VertexRegistry) -> Result<Self, DecomposeError> {
        let incident = incidence(&pool, &registry)?;
        Ok(Self {
            pool,
            registry,
            incident,
            start_cursor: [0; 3],
            state: WalkState::Idle,
            done: Vec::new(),
        })
    }

    pub fn from_segments(segments: &[Segment], cfg: DecomposeCfg) -> Result<Self, DecomposeError> {
        let (pool, registry) = prepare(EdgePool::from_segments(segments), cfg.mode);
        Self::new(pool, registry)
    }

    pub fn pool(&self) -> &EdgePool {
        &self.pool
    }

    pub fn registry(&self) -> &VertexRegistry {
        &self.registry
    }

    pub fn state(&self) -> &WalkState {
        &self.state
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.done
    }

    pub fn into_polylines(self) -> Vec<Polyline> {
        self.done
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_idle() && self.registry.is_exhausted()
    }

    /// Steps until every budget is spent.
    pub fn run(&mut self) -> Result<&[Polyline], DecomposeError> {
        while self.step()? != Step::Finished {}
        tracing::debug!(
            edges = self.pool.len(),
            polylines = self.done.len(),
            "decomposition finished"
        );
        Ok(&self.done)
    }

    /// Advances the state machine by one transition.
    pub fn step(&mut self) -> Result<Step, DecomposeError> {
        match std::mem::take(&mut self.state) {
            WalkState::Idle => match self.next_start() {
                Some(start) => {
                    self.state = WalkState::Extending {
                        head: Vec::new(),
                        current: start,
                    };
                    Ok(Step::Started(start))
                }
                None => Ok(Step::Finished),
            },
            WalkState::Extending { head, current } => self.extend(head, current),
        }
    }

    /// `current` is always live here: walks start on a live vertex and only
    /// continue through a Connector left with budget 2, so every walk is
    /// emitted by the step that ends it.
    fn extend(&mut self, mut head: Vec<VertexId>, current: VertexId) -> Result<Step, DecomposeError> {
        let Some((edge, next)) = self.continuation(current) else {
            let rec = self.registry.get(current);
            return Err(DecomposeError::Stuck {
                point: rec.point,
                remaining: rec.remaining,
            });
        };

        self.pool.consume(edge);
        self.registry.spend(current)?;
        let left = self.registry.spend(next)?;
        head.push(current);
        tracing::trace!(?edge, from = ?current, to = ?next, left, "consumed");

        let closes = match self.registry.get(next).role {
            Role::Leaf | Role::Branch => true,
            // A Connector spent to 0 on arrival is the anchor of this walk.
            Role::Connector => left == 0,
        };
        if closes {
            head.push(next);
            let index = self.emit(head);
            return Ok(Step::Closed { index });
        }
        self.state = WalkState::Extending {
            head,
            current: next,
        };
        Ok(Step::Extended { edge, to: next })
    }

    /// First live vertex by Branch > Leaf > Connector, then registry order.
    fn next_start(&mut self) -> Option<VertexId> {
        let n = self.registry.len();
        for (slot, role) in START_PRIORITY.iter().enumerate() {
            let cursor = &mut self.start_cursor[slot];
            while *cursor < n {
                let id = VertexId(*cursor);
                let rec = self.registry.get(id);
                if rec.role == *role && rec.is_live() {
                    return Some(id);
                }
                *cursor += 1;
            }
        }
        None
    }

    /// First unconsumed incident edge whose far end is live, by
    /// Connector > Leaf > Branch, then edge order.
    fn continuation(&self, current: VertexId) -> Option<(EdgeId, VertexId)> {
        let edges = &self.incident[current.0];
        CONTINUE_PRIORITY.iter().find_map(|role| {
            edges.iter().copied().find(|&(edge, other)| {
                let far = self.registry.get(other);
                !self.pool.get(edge).consumed && far.role == *role && far.is_live()
            })
        })
    }

    fn emit(&mut self, walk: Vec<VertexId>) -> usize {
        let line: Polyline = walk.iter().map(|&id| self.registry.get(id).point).collect();
        tracing::debug!(
            points = line.len(),
            closed = line.is_closed(),
            start = %line.points[0],
            "walk emitted"
        );
        self.done.push(line);
        self.done.len() - 1
    }
}
