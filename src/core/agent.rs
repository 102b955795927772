//! Shot selection for the scripted opponent.
//!
//! [`HuntTargetAgent`] hunts at random until it scores a hit, then works
//! through the orthogonal neighbours of every hit before returning to the hunt.
//! Once a ship is confirmed sunk, the cells around it are dropped from the
//! search. Nothing is learned across games: [`TargetingStrategy::reset`]
//! restores the initial state.

use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::Rng;

use super::board::Board;
use super::common::Coord;

/// Orthogonal neighbours in enqueue order: up, down, left, right.
const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Interface implemented by shot-selection strategies.
pub trait TargetingStrategy: Send {
    /// Forget everything and start over on a `size`×`size` grid.
    fn reset(&mut self, size: usize);

    /// Choose the next cell to fire at on `opponent`. Returns `None` only when
    /// every cell of the board is already resolved.
    fn choose_target(&mut self, rng: &mut SmallRng, opponent: &Board) -> Option<Coord>;

    /// Inform the strategy of the outcome of a shot at `target`.
    fn observe_result(&mut self, target: Coord, hit: bool, sunk: Option<&[Coord]>);
}

/// Pick uniformly among the unresolved cells of `board`.
fn random_unresolved(rng: &mut SmallRng, board: &Board) -> Option<Coord> {
    let open = board.unresolved().count();
    if open == 0 {
        return None;
    }
    board.unresolved().nth(rng.random_range(0..open))
}

/// Hunt/target heuristic.
#[derive(Debug, Clone)]
pub struct HuntTargetAgent {
    size: usize,
    untried: BTreeSet<Coord>,
    priority: VecDeque<Coord>,
    active_hits: Vec<Coord>,
}

impl HuntTargetAgent {
    pub fn new(size: usize) -> Self {
        let mut agent = HuntTargetAgent {
            size,
            untried: BTreeSet::new(),
            priority: VecDeque::new(),
            active_hits: Vec::new(),
        };
        agent.reset(size);
        agent
    }

    /// Whether `coord` is still a candidate for selection.
    pub fn is_untried(&self, coord: Coord) -> bool {
        self.untried.contains(&coord)
    }

    pub fn untried_count(&self) -> usize {
        self.untried.len()
    }

    /// Queued follow-up targets, front first. May contain stale entries.
    pub fn pending_targets(&self) -> impl Iterator<Item = Coord> + '_ {
        self.priority.iter().copied()
    }

    /// Hits on the ship currently being pursued.
    pub fn active_hits(&self) -> &[Coord] {
        &self.active_hits
    }
}

impl TargetingStrategy for HuntTargetAgent {
    fn reset(&mut self, size: usize) {
        self.size = size;
        self.untried = (0..size)
            .flat_map(|x| (0..size).map(move |y| Coord::new(x, y)))
            .collect();
        self.priority.clear();
        self.active_hits.clear();
    }

    fn choose_target(&mut self, rng: &mut SmallRng, opponent: &Board) -> Option<Coord> {
        while let Some(c) = self.priority.pop_front() {
            if self.untried.contains(&c) && !opponent.is_resolved(c.x, c.y) {
                self.untried.remove(&c);
                return Some(c);
            }
        }

        if !self.untried.is_empty() {
            let pick = rng.random_range(0..self.untried.len());
            if let Some(c) = self.untried.iter().nth(pick).copied() {
                self.untried.remove(&c);
                return Some(c);
            }
        }

        // Sink pruning can empty `untried` while a ship touching a sunk one
        // is still afloat.
        let fallback = random_unresolved(rng, opponent);
        if let Some(c) = fallback {
            log::debug!("untried cells exhausted, falling back to {}", c);
        }
        fallback
    }

    fn observe_result(&mut self, target: Coord, hit: bool, sunk: Option<&[Coord]>) {
        self.untried.remove(&target);

        if hit {
            for (dx, dy) in ORTHOGONAL {
                if let Some(n) = target.offset(dx, dy, self.size) {
                    if self.untried.contains(&n) {
                        self.priority.push_back(n);
                    }
                }
            }
            self.active_hits.push(target);
        }

        if let Some(cells) = sunk.filter(|cells| !cells.is_empty()) {
            for &c in cells {
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        if let Some(n) = c.offset(dx, dy, self.size) {
                            self.untried.remove(&n);
                        }
                    }
                }
            }
            self.active_hits.clear();
        }
    }
}

/// Baseline strategy: uniform over unresolved cells, no memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAgent;

impl RandomAgent {
    pub fn new() -> Self {
        Self
    }
}

impl TargetingStrategy for RandomAgent {
    fn reset(&mut self, _size: usize) {}

    fn choose_target(&mut self, rng: &mut SmallRng, opponent: &Board) -> Option<Coord> {
        random_unresolved(rng, opponent)
    }

    fn observe_result(&mut self, _target: Coord, _hit: bool, _sunk: Option<&[Coord]>) {}
}
