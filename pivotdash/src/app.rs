use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::time::Instant;

use crate::background::{loader::DataLoader, BackgroundTaskManager};
use crate::commands::{executor, handlers, AppCommand};
use crate::config::Settings;
use crate::input::{KeyEvent, MouseClick};
use crate::log_buffer::LogBuffer;
use crate::logging::init_logging_with_buffer;
use crate::state::{AppState, Tab};

const LOG_BUFFER_SIZE: usize = 5000;
const TICK_MS: u64 = 100;

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<()> {
        // Create log buffer before initializing logging
        let log_buffer = LogBuffer::new(LOG_BUFFER_SIZE);
        let log_path = init_logging_with_buffer(log_buffer.clone(), &self.settings.log_level)?;

        tracing::info!("pivotdash starting, logging to {}", log_path.display());
        tracing::debug!("Settings: {:?}", self.settings);

        let mut terminal = self.init()?;

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();

        let mut ui_state = AppState::with_settings(&self.settings);
        let mut task_manager = BackgroundTaskManager::new();
        let data_loader = DataLoader::new(data_tx);

        let mut event_stream = EventStream::new();

        self.init_data(&mut ui_state, &mut task_manager, &data_loader);

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(std::time::Duration::from_millis(TICK_MS));
        loop {
            ui_state.logs.total_entries = log_buffer.len();

            terminal.draw(|f| {
                crate::ui::render_app(f, &ui_state, &log_buffer);
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    if let Some(throbber_state) = ui_state.loading_state() {
                        throbber_state.calc_next();
                    }
                    ui_state.dashboard.tooltip.expire(Instant::now());
                }
                Some(Ok(event)) = event_stream.next() => {
                    // Don't log when on logs tab to avoid feedback loop
                    let on_logs_tab = ui_state.active_tab == Tab::Logs;
                    let command = match event {
                        Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => {
                            if !on_logs_tab {
                                tracing::debug!("Key press: {:?}", key);
                            }
                            KeyEvent::from_crossterm(key)
                                .and_then(|key| handlers::handle_key_input(key, &ui_state))
                        }
                        Event::Mouse(mouse) => MouseClick::from_crossterm(mouse)
                            .and_then(|click| handlers::handle_mouse_input(click, &ui_state)),
                        // Next draw picks up the new size
                        _ => None,
                    };

                    if let Some(command) = command {
                        if !on_logs_tab {
                            tracing::info!("Executing command: {:?}", command);
                        }
                        executor::execute_command(
                            command,
                            &mut ui_state,
                            &mut task_manager,
                            &data_loader,
                        );
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    crate::state::reducer::reduce_data_event(&mut ui_state, data_event);
                }
            }

            if ui_state.should_quit {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");

        task_manager.cancel_all();

        self.exit(terminal)?;

        Ok(())
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn init_data(
        &self,
        ui_state: &mut AppState,
        task_manager: &mut BackgroundTaskManager,
        data_loader: &DataLoader,
    ) {
        match &self.settings.payload_path {
            Some(path) => {
                tracing::info!("Loading payload {}", path.display());
                executor::execute_command(
                    AppCommand::LoadPayload { path: path.clone() },
                    ui_state,
                    task_manager,
                    data_loader,
                );
            }
            None => {
                tracing::warn!("No payload configured");
                ui_state.dashboard.status =
                    Some("No payload file configured (use --payload)".to_string());
            }
        }
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}
