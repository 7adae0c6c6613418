use super::{
    action::{Command, Direction},
    config::{ConfigError, GameConfig},
    state::{GameSnapshot, LifecycleState, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine was not playing; nothing moved
    Idle,
    /// The snake moved one cell at constant length
    Moved,
    /// The snake moved onto the food and grew by one segment
    AteFood,
    /// The new head hit the body; the round is over
    Collided,
}

/// The game engine. Owns the board and the lifecycle state machine.
///
/// Starts in [`LifecycleState::Menu`]. Snake, direction, food and score only
/// change while [`LifecycleState::Playing`].
pub struct GameEngine {
    config: GameConfig,
    snake: Snake,
    direction: Direction,
    food: Position,
    score: u32,
    lifecycle: LifecycleState,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with food rolls seeded from OS entropy
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food rolls are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            snake: Snake::new(config.initial_head),
            direction: config.initial_direction,
            food: config.initial_food,
            score: 0,
            lifecycle: LifecycleState::Menu,
            rng,
            config,
        })
    }

    /// Dispatch a command. Returns the tick outcome for [`Command::Tick`].
    pub fn apply(&mut self, command: Command) -> Option<TickOutcome> {
        match command {
            Command::Start => self.start(),
            Command::TogglePause => self.toggle_pause(),
            Command::ReturnToMenu => self.return_to_menu(),
            Command::SetDirection(direction) => self.set_direction(direction),
            Command::Tick => return Some(self.tick()),
        }
        None
    }

    /// Begin a fresh round from any state
    pub fn start(&mut self) {
        self.snake = Snake::new(self.config.initial_head);
        self.direction = self.config.initial_direction;
        self.food = self.config.initial_food;
        self.score = 0;
        self.transition(LifecycleState::Playing);
    }

    /// Playing -> Paused, Paused -> Playing, otherwise nothing
    pub fn toggle_pause(&mut self) {
        match self.lifecycle {
            LifecycleState::Playing => self.transition(LifecycleState::Paused),
            LifecycleState::Paused => self.transition(LifecycleState::Playing),
            LifecycleState::Menu | LifecycleState::GameOver => {}
        }
    }

    /// Back to the menu from GameOver or Paused. Board state is left as is.
    pub fn return_to_menu(&mut self) {
        if matches!(
            self.lifecycle,
            LifecycleState::GameOver | LifecycleState::Paused
        ) {
            self.transition(LifecycleState::Menu);
        }
    }

    /// Steer the snake. Ignored outside Playing and for 180-degree turns.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.lifecycle != LifecycleState::Playing {
            return;
        }

        if self.direction.is_opposite(requested) {
            debug!(current = ?self.direction, ?requested, "reversal ignored");
            return;
        }

        self.direction = requested;
    }

    /// Execute one step of the game
    pub fn tick(&mut self) -> TickOutcome {
        if self.lifecycle != LifecycleState::Playing {
            return TickOutcome::Idle;
        }

        let new_head = self
            .snake
            .head()
            .moved_in_direction(self.direction)
            .wrapped(self.config.grid_size);

        // Checked against the whole pre-move body, tail included
        if self.snake.occupies(new_head) {
            info!(?new_head, score = self.score, "self collision");
            self.transition(LifecycleState::GameOver);
            return TickOutcome::Collided;
        }

        let ate_food = new_head == self.food;
        self.snake.advance(new_head, ate_food);

        if ate_food {
            self.score += 1;
            // May land on the snake; overlap is allowed
            self.food = self.roll_food();
            info!(score = self.score, food = ?self.food, "food eaten");
            TickOutcome::AteFood
        } else {
            debug!(head = ?new_head, "moved");
            TickOutcome::Moved
        }
    }

    /// Whether the driver should be running its tick timer
    pub fn is_ticking(&self) -> bool {
        self.lifecycle == LifecycleState::Playing
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Owned copy of the drawable state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.segments().to_vec(),
            food: self.food,
            score: self.score,
            lifecycle: self.lifecycle,
            direction: self.direction,
            grid_size: self.config.grid_size,
        }
    }

    /// Uniform draw over the whole grid, each axis independent
    fn roll_food(&mut self) -> Position {
        let x = self.rng.gen_range(0..self.config.grid_size) as i32;
        let y = self.rng.gen_range(0..self.config.grid_size) as i32;
        Position::new(x, y)
    }

    fn transition(&mut self, to: LifecycleState) {
        info!(from = ?self.lifecycle, ?to, "lifecycle transition");
        self.lifecycle = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_engine() -> GameEngine {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 7).unwrap();
        engine.start();
        engine
    }

    /// Put the engine mid-round with a hand-built board
    fn place(engine: &mut GameEngine, segments: &[(i32, i32)], direction: Direction) {
        let segments = segments.iter().map(|&(x, y)| Position::new(x, y)).collect();
        engine.snake = Snake::from_segments(segments).unwrap();
        engine.direction = direction;
    }

    #[test]
    fn test_initial_state_is_menu() {
        let engine = GameEngine::new(GameConfig::default()).unwrap();
        assert_eq!(engine.lifecycle(), LifecycleState::Menu);
        assert!(!engine.is_ticking());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.snake().segments(), &[Position::new(10, 10)]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(GameEngine::new(GameConfig::new(0)).is_err());
        assert!(GameEngine::new(GameConfig::new(1)).is_err());
        assert!(GameEngine::new(GameConfig::new(129)).is_err());
    }

    #[test]
    fn test_single_segment_never_collides_on_smallest_grid() {
        let mut engine = GameEngine::with_seed(GameConfig::new(2), 3).unwrap();
        engine.start();
        engine.food = Position::new(-1, -1);

        for direction in [Direction::Right, Direction::Down, Direction::Left, Direction::Up] {
            engine.set_direction(direction);
            for _ in 0..4 {
                assert_eq!(engine.tick(), TickOutcome::Moved);
                assert!(engine.snake().head().is_within(2));
            }
        }
        assert_eq!(engine.lifecycle(), LifecycleState::Playing);
    }

    #[test]
    fn test_start_resets_round() {
        let engine = playing_engine();
        assert_eq!(engine.lifecycle(), LifecycleState::Playing);
        assert!(engine.is_ticking());
        assert_eq!(engine.snake().segments(), &[Position::new(10, 10)]);
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.food(), Position::new(15, 15));
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_five_ticks_end_to_end() {
        let mut engine = playing_engine();

        for _ in 0..5 {
            assert_eq!(engine.tick(), TickOutcome::Moved);
        }

        assert_eq!(engine.snake().head(), Position::new(15, 10));
        assert_eq!(engine.snake().len(), 1);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.food(), Position::new(15, 15));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = playing_engine();
        engine.food = Position::new(11, 10);

        let result = engine.tick();

        assert_eq!(result, TickOutcome::AteFood);
        assert_eq!(engine.score(), 1);
        assert_eq!(
            engine.snake().segments(),
            &[Position::new(11, 10), Position::new(10, 10)]
        );
        assert!(engine.food().is_within(engine.grid_size()));

        // Next move keeps the new length
        engine.food = Position::new(0, 0);
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.snake().len(), 2);
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn test_length_and_score_change_together() {
        let mut engine = playing_engine();
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

        for step in 0..200 {
            if step % 7 == 0 {
                engine.set_direction(turns[(step / 7) % turns.len()]);
            }
            let (len, score) = (engine.snake().len(), engine.score());

            match engine.tick() {
                TickOutcome::Moved => {
                    assert_eq!(engine.snake().len(), len);
                    assert_eq!(engine.score(), score);
                }
                TickOutcome::AteFood => {
                    assert_eq!(engine.snake().len(), len + 1);
                    assert_eq!(engine.score(), score + 1);
                }
                TickOutcome::Collided => {
                    assert_eq!(engine.snake().len(), len);
                    break;
                }
                TickOutcome::Idle => unreachable!("engine was playing"),
            }
        }
    }

    #[test]
    fn test_wrap_around_each_edge() {
        let mut engine = playing_engine();
        engine.food = Position::new(0, 0);

        place(&mut engine, &[(19, 4)], Direction::Right);
        engine.tick();
        assert_eq!(engine.snake().head(), Position::new(0, 4));

        place(&mut engine, &[(0, 4)], Direction::Left);
        engine.tick();
        assert_eq!(engine.snake().head(), Position::new(19, 4));

        place(&mut engine, &[(4, 0)], Direction::Up);
        engine.tick();
        assert_eq!(engine.snake().head(), Position::new(4, 19));

        place(&mut engine, &[(4, 19)], Direction::Down);
        engine.tick();
        assert_eq!(engine.snake().head(), Position::new(4, 0));

        assert_eq!(engine.lifecycle(), LifecycleState::Playing);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = playing_engine();
        assert_eq!(engine.direction(), Direction::Right);

        engine.set_direction(Direction::Left);
        assert_eq!(engine.direction(), Direction::Right);

        engine.set_direction(Direction::Down);
        assert_eq!(engine.direction(), Direction::Down);

        engine.set_direction(Direction::Right);
        engine.set_direction(Direction::Up);
        assert_eq!(engine.direction(), Direction::Up);
    }

    #[test]
    fn test_last_direction_wins_between_ticks() {
        let mut engine = playing_engine();
        engine.set_direction(Direction::Up);
        engine.set_direction(Direction::Left);
        engine.tick();
        // Each request is checked against the direction it replaces
        assert_eq!(engine.direction(), Direction::Left);
        assert_eq!(engine.snake().head(), Position::new(9, 10));
    }

    #[test]
    fn test_direction_ignored_unless_playing() {
        let mut engine = GameEngine::new(GameConfig::default()).unwrap();
        engine.set_direction(Direction::Up);
        assert_eq!(engine.direction(), Direction::Right);

        engine.start();
        engine.toggle_pause();
        engine.set_direction(Direction::Up);
        assert_eq!(engine.direction(), Direction::Right);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = playing_engine();
        // Head at (5,5) turning up into its own loop at (5,4)
        place(
            &mut engine,
            &[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)],
            Direction::Up,
        );
        let before = engine.snake().clone();

        let result = engine.tick();

        assert_eq!(result, TickOutcome::Collided);
        assert_eq!(engine.lifecycle(), LifecycleState::GameOver);
        assert_eq!(engine.snake(), &before);
        assert!(!engine.is_ticking());
    }

    #[test]
    fn test_straight_snake_moving_forward_survives() {
        let mut engine = playing_engine();
        place(&mut engine, &[(5, 5), (5, 6), (5, 7)], Direction::Up);

        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(
            engine.snake().segments(),
            &[Position::new(5, 4), Position::new(5, 5), Position::new(5, 6)]
        );
    }

    #[test]
    fn test_moving_into_vacating_tail_collides() {
        let mut engine = playing_engine();
        place(&mut engine, &[(5, 5), (6, 5), (6, 4), (5, 4)], Direction::Up);

        assert_eq!(engine.tick(), TickOutcome::Collided);
        assert_eq!(engine.lifecycle(), LifecycleState::GameOver);
    }

    #[test]
    fn test_tick_is_idle_outside_playing() {
        let mut engine = GameEngine::new(GameConfig::default()).unwrap();
        assert_eq!(engine.tick(), TickOutcome::Idle);

        engine.start();
        engine.toggle_pause();
        let before = engine.snapshot();
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_start_after_game_over_resets() {
        let mut engine = playing_engine();
        place(
            &mut engine,
            &[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)],
            Direction::Up,
        );
        engine.score = 42;
        engine.tick();
        assert_eq!(engine.lifecycle(), LifecycleState::GameOver);

        engine.start();

        assert_eq!(engine.lifecycle(), LifecycleState::Playing);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.snake().segments(), &[Position::new(10, 10)]);
        assert_eq!(engine.direction(), Direction::Right);
    }

    #[test]
    fn test_toggle_pause_is_own_inverse() {
        let mut engine = playing_engine();
        engine.tick();
        let before = engine.snapshot();

        engine.toggle_pause();
        assert_eq!(engine.lifecycle(), LifecycleState::Paused);
        engine.toggle_pause();

        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_toggle_pause_ignored_in_menu_and_game_over() {
        let mut engine = GameEngine::new(GameConfig::default()).unwrap();
        engine.toggle_pause();
        assert_eq!(engine.lifecycle(), LifecycleState::Menu);

        engine.start();
        engine.lifecycle = LifecycleState::GameOver;
        engine.toggle_pause();
        assert_eq!(engine.lifecycle(), LifecycleState::GameOver);
    }

    #[test]
    fn test_return_to_menu() {
        let mut engine = playing_engine();

        // Not from Playing
        engine.return_to_menu();
        assert_eq!(engine.lifecycle(), LifecycleState::Playing);

        engine.toggle_pause();
        engine.return_to_menu();
        assert_eq!(engine.lifecycle(), LifecycleState::Menu);

        engine.start();
        engine.score = 3;
        engine.lifecycle = LifecycleState::GameOver;
        engine.return_to_menu();
        assert_eq!(engine.lifecycle(), LifecycleState::Menu);
        // Board is kept, just not shown
        assert_eq!(engine.score(), 3);
    }

    #[test]
    fn test_apply_dispatches_commands() {
        let mut engine = GameEngine::new(GameConfig::default()).unwrap();

        assert_eq!(engine.apply(Command::Start), None);
        assert_eq!(engine.lifecycle(), LifecycleState::Playing);

        assert_eq!(engine.apply(Direction::Down.into()), None);
        assert_eq!(engine.apply(Command::Tick), Some(TickOutcome::Moved));
        assert_eq!(engine.snake().head(), Position::new(10, 11));

        engine.apply(Command::TogglePause);
        assert_eq!(engine.apply(Command::Tick), Some(TickOutcome::Idle));
        engine.apply(Command::ReturnToMenu);
        assert_eq!(engine.lifecycle(), LifecycleState::Menu);
    }

    #[test]
    fn test_seeded_food_is_reproducible() {
        let eat_three = |seed| {
            let mut engine = GameEngine::with_seed(GameConfig::default(), seed).unwrap();
            engine.start();
            let mut foods = Vec::new();
            for _ in 0..3 {
                engine.food = engine.snake().head().moved_in_direction(Direction::Right);
                engine.tick();
                foods.push(engine.food());
            }
            foods
        };

        assert_eq!(eat_three(99), eat_three(99));
    }

    #[test]
    fn test_snapshot_matches_accessors() {
        let engine = playing_engine();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.snake, engine.snake().segments());
        assert_eq!(snapshot.head(), Position::new(10, 10));
        assert_eq!(snapshot.food, engine.food());
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.lifecycle, LifecycleState::Playing);
        assert_eq!(snapshot.direction, Direction::Right);
        assert_eq!(snapshot.grid_size, 20);
    }
}
