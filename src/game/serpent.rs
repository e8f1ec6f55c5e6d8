use std::collections::VecDeque;

use super::action::Direction;
use super::state::{Cell, Grid, SerpentId};

/// One of the two serpents in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Serpent {
    id: SerpentId,
    spawn: Cell,
    spawn_direction: Direction,
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
    /// Direction used on the next advance
    direction: Direction,
    /// Direction actually travelled on the last advance
    heading: Direction,
    pending_growth: bool,
    alive: bool,
}

impl Serpent {
    /// Create a single-cell serpent at its spawn cell
    pub fn new(id: SerpentId, spawn: Cell, direction: Direction) -> Self {
        Self {
            id,
            spawn,
            spawn_direction: direction,
            body: VecDeque::from([spawn]),
            direction,
            heading: direction,
            pending_growth: false,
            alive: true,
        }
    }

    pub fn id(&self) -> SerpentId {
        self.id
    }

    pub fn head(&self) -> Cell {
        // The body is never empty: it starts with one cell and advance keeps the length.
        self.body.front().copied().unwrap_or(self.spawn)
    }

    /// Cells after the head
    pub fn tail(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter().skip(1)
    }

    pub fn body(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn has_pending_growth(&self) -> bool {
        self.pending_growth
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Prepend the next head; keep the tail only if growth was pending
    pub fn advance(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);
        self.heading = self.direction;

        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop_back();
        }
    }

    pub fn check_bounds_collision(&mut self, grid: &Grid) {
        if !grid.contains(self.head()) {
            self.alive = false;
        }
    }

    /// Kill self on contact with its own tail or any cell of `other`.
    /// Heads meeting on the same cell kill both.
    pub fn check_collision_with(&mut self, other: &mut Serpent) {
        let head = self.head();

        if head == other.head() {
            self.alive = false;
            other.alive = false;
        }

        if self.tail().any(|&c| c == head) || other.occupies(head) {
            self.alive = false;
        }
    }

    /// Turn, unless the request would reverse the serpent onto itself.
    /// Returns whether the direction was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.direction) || direction.is_opposite(self.heading) {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn request_growth(&mut self) {
        self.pending_growth = true;
    }

    /// Back to the start-of-round state
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.push_back(self.spawn);
        self.direction = self.spawn_direction;
        self.heading = self.spawn_direction;
        self.pending_growth = false;
        self.alive = true;
    }

    #[cfg(test)]
    pub(crate) fn with_body(
        id: SerpentId,
        body: impl IntoIterator<Item = Cell>,
        direction: Direction,
    ) -> Self {
        let body: VecDeque<Cell> = body.into_iter().collect();
        let spawn = body.front().copied().unwrap_or(Cell::new(0, 0));
        Self {
            id,
            spawn,
            spawn_direction: direction,
            body,
            direction,
            heading: direction,
            pending_growth: false,
            alive: true,
        }
    }
}
