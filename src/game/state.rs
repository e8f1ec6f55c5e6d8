use rand::Rng;
use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell on the arena grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Square N x N arena geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: i32,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size: i32::try_from(size).unwrap_or(i32::MAX),
        }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Check if a cell is within `[0, N-1]` on both axes
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.size && cell.y >= 0 && cell.y < self.size
    }

    /// Centre cell, where the first food item of every round sits
    pub fn center(&self) -> Cell {
        Cell::new(self.size / 2, self.size / 2)
    }

    /// Uniformly random cell inside the grid
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0..self.size), rng.gen_range(0..self.size))
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Cell::new(x, y)))
    }
}

/// Identity of one of the two serpents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SerpentId {
    One,
    Two,
}

impl SerpentId {
    pub const BOTH: [SerpentId; 2] = [SerpentId::One, SerpentId::Two];

    pub fn index(&self) -> usize {
        match self {
            SerpentId::One => 0,
            SerpentId::Two => 1,
        }
    }

    pub fn opponent(&self) -> SerpentId {
        match self {
            SerpentId::One => SerpentId::Two,
            SerpentId::Two => SerpentId::One,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SerpentId::One => "Serpent 1",
            SerpentId::Two => "Serpent 2",
        }
    }
}

impl std::fmt::Display for SerpentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
