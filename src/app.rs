use crate::config::Config;
use crate::error::AppError;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{CustomLogger, LogBuffer};
use crate::state::{Notifications, State};
use crate::tracker::Tracker;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

pub type NetworkEventSender = mpsc::UnboundedSender<NetworkEvent>;
type NetworkEventReceiver = mpsc::UnboundedReceiver<NetworkEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    tracker: Tracker,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let (tx, rx) = mpsc::unbounded_channel::<NetworkEvent>();
        let notifications = Notifications::new(
            Duration::from_millis(config.success_toast_ms),
            Duration::from_millis(config.error_toast_ms),
        );
        let app = App {
            state: Arc::new(Mutex::new(State::new(tx, notifications))),
            tracker: Tracker::new(&config.base_url)?,
        };
        app.start_logger().await?;

        info!("Starting application against {}...", config.base_url);
        app.start_network(rx)?;
        app.start_ui().await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Install the global logger, forwarding every line to the log panel.
    ///
    async fn start_logger(&self) -> Result<()> {
        let logger = panel_logger(self.state.lock().await.log_buffer());
        log::set_boxed_logger(Box::new(logger))
            .map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(LevelFilter::Debug);
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_network(&self, mut net_receiver: NetworkEventReceiver) -> Result<()> {
        debug!("Creating new thread for asynchronous networking...");
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let handler = NetworkEventHandler::new(Arc::clone(&self.state), self.tracker.clone());
        std::thread::spawn(move || {
            runtime.block_on(async {
                while let Some(network_event) = net_receiver.recv().await {
                    handler.spawn(network_event);
                }
            })
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode().map_err(|e| AppError::Terminal(e.to_string()))?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        self.state.lock().await.load_entries();

        let terminal_event_handler = TerminalEventHandler::new();
        let result = loop {
            let mut state = self.state.lock().await;
            if let Err(e) = terminal.draw(|frame| crate::ui::render(frame, &mut state)) {
                break Err(e.into());
            }
            match terminal_event_handler.handle_next(&mut state) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("Received application exit request.");
                    break Ok(());
                }
                Err(e) => break Err(e),
            }
        };

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

/// Build a logger that writes into the given log panel buffer.
///
fn panel_logger(buffer: LogBuffer) -> CustomLogger {
    let logger = CustomLogger::new();
    logger.set_log_callback(Box::new(move |line| buffer.push(line)));
    logger
}
