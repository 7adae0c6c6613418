use std::time::{Duration, Instant};

use crate::game::LifecycleState;

/// In-memory stats for the current terminal session.
///
/// The round clock only runs while the engine is playing.
pub struct GameMetrics {
    accumulated: Duration,
    running_since: Option<Instant>,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            accumulated: Duration::ZERO,
            running_since: None,
            games_played: 0,
        }
    }

    /// Feed a lifecycle transition observed on the engine
    pub fn observe(&mut self, from: LifecycleState, to: LifecycleState) {
        match (from, to) {
            (LifecycleState::Paused, LifecycleState::Playing) => self.on_resume(),
            (_, LifecycleState::Playing) => self.on_game_start(),
            (LifecycleState::Playing, LifecycleState::Paused) => self.on_pause(),
            (LifecycleState::Playing, LifecycleState::GameOver) => self.on_game_over(),
            _ => {}
        }
    }

    pub fn on_game_start(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    pub fn on_pause(&mut self) {
        self.stop_clock();
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_game_over(&mut self) {
        self.stop_clock();
        self.games_played += 1;
    }

    /// Play time of the current round, pauses excluded
    pub fn elapsed(&self) -> Duration {
        self.accumulated
            + self
                .running_since
                .map(|since| since.elapsed())
                .unwrap_or(Duration::ZERO)
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed().as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    fn stop_clock(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed();
        }
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
