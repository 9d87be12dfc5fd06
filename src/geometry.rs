/// Base unit distance. Sets both the overlap tolerance and the AI lookahead step.
pub const GRID_SIZE: f32 = 20.0;
/// Distance covered per tick. Not grid aligned on purpose: 1.5 cells per frame.
pub const STEP_DISTANCE: f32 = GRID_SIZE * 1.5;
/// Most recent cells kept per trail.
pub const TRAIL_CAPACITY: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub x: f32,
    pub y: f32,
}

impl Cell {
    pub const fn new(x: f32, y: f32) -> Self {
        Cell { x, y }
    }

    /// Approximate occupancy: closer than one grid edge on both axes.
    pub fn overlaps(&self, other: &Cell) -> bool {
        (self.x - other.x).abs() < GRID_SIZE && (self.y - other.y).abs() < GRID_SIZE
    }

    pub fn stepped(&self, heading: Heading, distance: f32) -> Cell {
        let (dx, dy) = heading.delta();
        Cell {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    Right,
    Left,
    Down,
    Up,
}

impl Heading {
    /// Fixed enumeration order, also the AI's tie-break order.
    pub const ALL: [Heading; 4] = [Heading::Right, Heading::Left, Heading::Down, Heading::Up];

    /// Unit vector in screen space (y grows downwards).
    pub fn delta(&self) -> (f32, f32) {
        match self {
            Heading::Right => (1.0, 0.0),
            Heading::Left => (-1.0, 0.0),
            Heading::Down => (0.0, 1.0),
            Heading::Up => (0.0, -1.0),
        }
    }

    pub fn opposite(&self) -> Heading {
        match self {
            Heading::Right => Heading::Left,
            Heading::Left => Heading::Right,
            Heading::Down => Heading::Up,
            Heading::Up => Heading::Down,
        }
    }

    pub fn is_opposite(&self, other: &Heading) -> bool {
        self.opposite() == *other
    }
}

/// Playfield size in screen units. Read from the drawable area, so it may
/// change between ticks when the display mode is toggled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Bounds { width, height }
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        cell.x >= 0.0 && cell.x < self.width && cell.y >= 0.0 && cell.y < self.height
    }

    /// Grid-aligned start cell at `numerator/4` of the width, vertically centred.
    pub fn start_cell(&self, numerator: u32) -> Cell {
        let cols = (self.width / GRID_SIZE).max(0.0) as u32;
        let rows = (self.height / GRID_SIZE).max(0.0) as u32;
        Cell {
            x: (numerator * cols / 4) as f32 * GRID_SIZE,
            y: (rows / 2) as f32 * GRID_SIZE,
        }
    }
}
