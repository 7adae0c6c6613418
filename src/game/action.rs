use serde::Deserialize;

/// Direction the snake can move. The y axis grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the unit vector (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A command accepted by the engine.
///
/// The presentation layer turns raw input and timer wake-ups into these and
/// hands them to [`GameEngine::apply`](super::GameEngine::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a fresh round (hard reset)
    Start,
    /// Playing <-> Paused
    TogglePause,
    /// Leave a finished or paused round for the menu
    ReturnToMenu,
    /// Steer the snake; reversals are ignored
    SetDirection(Direction),
    /// Advance the simulation one step
    Tick,
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::SetDirection(direction)
    }
}
