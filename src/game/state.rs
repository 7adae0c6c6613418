use serde::Deserialize;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold each axis back onto `[0, grid_size)`.
    ///
    /// Only single-cell overshoots occur during play: below zero becomes the
    /// last cell, at or past the edge becomes zero.
    pub fn wrapped(&self, grid_size: usize) -> Self {
        let size = grid_size as i32;
        let wrap = |c: i32| {
            if c < 0 {
                size - 1
            } else if c >= size {
                0
            } else {
                c
            }
        };

        Self {
            x: wrap(self.x),
            y: wrap(self.y),
        }
    }

    /// Check if the position lies on a `grid_size` x `grid_size` grid
    pub fn is_within(&self, grid_size: usize) -> bool {
        let size = grid_size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Build a snake from explicit segments, head first. Returns `None` for an
    /// empty body.
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { body: segments })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Check if position is occupied by any segment, head through tail
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front. When `grow` is false the tail is dropped so
    /// the length stays the same.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Coarse mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Menu,
    Playing,
    Paused,
    GameOver,
}

impl LifecycleState {
    /// Whether the board should be drawn in this state
    pub fn shows_board(&self) -> bool {
        matches!(self, LifecycleState::Playing | LifecycleState::Paused)
    }
}

/// Read-only copy of everything the presentation layer draws
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// Segments, head first
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub lifecycle: LifecycleState,
    pub direction: Direction,
    pub grid_size: usize,
}

impl GameSnapshot {
    pub fn head(&self) -> Position {
        self.snake[0]
    }
}
