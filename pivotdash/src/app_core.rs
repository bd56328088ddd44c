use std::time::Instant;

use crate::commands::handlers;
use crate::events::{AppCommand, DataEvent};
use crate::input::{KeyEvent, MouseClick};
use crate::state::{reducer, AppState};

/// Side-effecting half of command execution. The terminal app spawns
/// background tasks; tests run everything inline.
pub trait CommandRunner {
    fn run(&mut self, command: AppCommand, state: &mut AppState);
}

/// Input handling and state, without a terminal
pub struct AppCore<R: CommandRunner> {
    state: AppState,
    runner: R,
}

impl<R: CommandRunner> AppCore<R> {
    pub fn new(runner: R) -> Self {
        Self::with_state(runner, AppState::new())
    }

    pub fn with_state(runner: R, state: AppState) -> Self {
        Self { state, runner }
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.state) {
            self.execute(command);
        }
    }

    pub fn handle_click(&mut self, click: MouseClick) {
        if let Some(command) = handlers::handle_mouse_input(click, &self.state) {
            self.execute(command);
        }
    }

    pub fn execute(&mut self, command: AppCommand) {
        self.runner.run(command, &mut self.state);
    }

    /// Apply a background task result
    pub fn handle_data_event(&mut self, event: DataEvent) {
        reducer::reduce_data_event(&mut self.state, event);
    }

    /// Advance timers (tooltip hide delay)
    pub fn tick(&mut self, now: Instant) {
        self.state.dashboard.tooltip.expire(now);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }
}

impl<R: CommandRunner + Default> Default for AppCore<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}
