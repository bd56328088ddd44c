//! Headless driver for integration tests. Commands run through the
//! synchronous executor, so every key press has fully settled by the time
//! the call returns.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use pivotdash_core::detail::{DetailMode, DetailView};
use pivotdash_core::DataModel;

use crate::app_core::{AppCore, CommandRunner};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent};
use crate::input::{Key, KeyEvent, MouseClick};
use crate::state::{AppState, Tab};

/// Runs file IO inline instead of on background tasks
#[derive(Default)]
pub struct InlineHandler;

impl CommandRunner for InlineHandler {
    fn run(&mut self, command: AppCommand, state: &mut AppState) {
        executor::execute_command_sync(command, state);
    }
}

#[derive(Default)]
pub struct TestApp {
    core: AppCore<InlineHandler>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            core: AppCore::with_state(InlineHandler, state),
        }
    }

    /// App that has just received `json` as a loaded payload.
    ///
    /// Panics when `json` is not a valid payload.
    pub fn with_payload(json: &str) -> Self {
        let model = DataModel::from_json(json)
            .unwrap_or_else(|e| panic!("test payload does not parse: {}", e));

        let mut app = Self::new();
        app.send_data_event(DataEvent::PayloadLoaded {
            model: Arc::new(model),
            path: PathBuf::from("test-payload.json"),
        });
        app
    }

    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    pub fn send_keys(&mut self, keys: &[Key]) {
        keys.iter().for_each(|key| self.send_key(*key));
    }

    /// Type each character of `text` as a key press
    pub fn type_chars(&mut self, text: &str) {
        text.chars().for_each(|c| self.send_key(Key::Char(c)));
    }

    pub fn click(&mut self, column: u16, row: u16) {
        self.core.handle_click(MouseClick::new(column, row));
    }

    pub fn send_command(&mut self, command: AppCommand) {
        self.core.execute(command);
    }

    /// Inject a background task result
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    pub fn tick(&mut self, now: Instant) {
        self.core.tick(now);
    }

    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    /// View of the open detail modal, if any
    pub fn detail_view(&self) -> Option<&DetailView> {
        self.state().dashboard.detail.as_ref().map(|modal| &modal.view)
    }

    pub fn assert_tab(&self, expected: Tab) {
        assert_eq!(self.state().active_tab, expected, "wrong active tab");
    }

    pub fn assert_detail_open(&self, mode: DetailMode) {
        let modal = self
            .state()
            .dashboard
            .detail
            .as_ref()
            .unwrap_or_else(|| panic!("expected {:?} detail to be open", mode));
        assert_eq!(modal.mode, mode);
    }

    pub fn assert_detail_closed(&self) {
        assert!(
            self.state().dashboard.detail.is_none(),
            "detail should be closed"
        );
    }

    pub fn assert_status_starts_with(&self, prefix: &str) {
        let status = self.state().dashboard.status.as_deref().unwrap_or("");
        assert!(
            status.starts_with(prefix),
            "status {:?} does not start with {:?}",
            status,
            prefix
        );
    }

    pub fn assert_should_quit(&self) {
        assert!(self.core.should_quit(), "app should be quitting");
    }

    pub fn assert_not_quit(&self) {
        assert!(!self.core.should_quit(), "app should still be running");
    }
}
