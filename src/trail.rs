use crate::geometry::{Cell, TRAIL_CAPACITY};

/// Rolling window over the most recent cells a cycle has occupied.
///
/// Backed by a flat buffer that is allocated once; when full, each push
/// overwrites the oldest slot and advances the cursor instead of shifting.
#[derive(Clone, Debug)]
pub struct Trail {
    cells: Vec<Cell>,
    start: usize,
    capacity: usize,
}

impl Trail {
    pub fn new(origin: Cell) -> Self {
        Self::with_capacity(origin, TRAIL_CAPACITY)
    }

    pub fn with_capacity(origin: Cell, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut cells = Vec::with_capacity(capacity);
        cells.push(origin);
        Trail {
            cells,
            start: 0,
            capacity,
        }
    }

    pub fn push(&mut self, cell: Cell) {
        if self.cells.len() < self.capacity {
            self.cells.push(cell);
        } else {
            self.cells[self.start] = cell;
            self.start = (self.start + 1) % self.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest cell, i.e. the owner's live position.
    pub fn head(&self) -> Cell {
        let len = self.cells.len();
        self.cells[(self.start + len - 1) % len]
    }

    /// Oldest first, head last.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> + '_ {
        let (newer, older) = self.cells.split_at(self.start);
        older.iter().chain(newer.iter())
    }

    /// Every cell except the head.
    pub fn iter_body(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.iter().take(self.len() - 1)
    }
}
