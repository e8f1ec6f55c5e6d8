use super::state::Cell;

/// Food items currently on the board.
///
/// Duplicate cells are allowed; the spawner only guarantees that a new item
/// does not land on a serpent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodRegistry {
    items: Vec<Cell>,
}

impl FoodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a food item. Overlap with serpents is the caller's concern.
    pub fn spawn(&mut self, cell: Cell) {
        self.items.push(cell);
    }

    /// Remove one item under `head`, if any
    pub fn consume(&mut self, head: Cell) -> bool {
        match self.items.iter().position(|&c| c == head) {
            Some(index) => {
                self.items.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop everything and place a single item at `center`
    pub fn reseed(&mut self, center: Cell) {
        self.items.clear();
        self.items.push(center);
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.items.contains(&cell)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_removes_exactly_one() {
        let mut food = FoodRegistry::new();
        food.spawn(Cell::new(3, 3));
        food.spawn(Cell::new(3, 3));
        food.spawn(Cell::new(7, 1));

        assert!(food.consume(Cell::new(3, 3)));
        assert_eq!(food.len(), 2);
        assert!(food.contains(Cell::new(3, 3)));
        assert!(food.contains(Cell::new(7, 1)));
    }

    #[test]
    fn test_consume_miss_is_noop() {
        let mut food = FoodRegistry::new();
        food.spawn(Cell::new(1, 1));

        assert!(!food.consume(Cell::new(2, 2)));
        assert_eq!(food.cells(), &[Cell::new(1, 1)]);
    }

    #[test]
    fn test_reseed() {
        let mut food = FoodRegistry::new();
        food.spawn(Cell::new(1, 1));
        food.spawn(Cell::new(2, 2));

        food.reseed(Cell::new(12, 12));
        assert_eq!(food.cells(), &[Cell::new(12, 12)]);
    }
}
