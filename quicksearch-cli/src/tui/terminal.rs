//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quicksearch_core::{DataSource, PipelineHandle, SearchConfig, SearchPipeline};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use super::app::App;
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

/// Input poll interval; also bounds how stale a redraw can be
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the interactive search screen against `source`
pub async fn run(config: &SearchConfig, source: Arc<dyn DataSource>) -> Result<()> {
    info!(source = source.name(), debounce_ms = config.debounce_ms, "starting TUI");
    let pipeline = SearchPipeline::spawn(config, source)?;
    let handle = pipeline.handle();

    // crossterm polling blocks, so the UI thread stays off the runtime
    let result = tokio::task::spawn_blocking(move || -> Result<()> {
        let mut terminal = init_terminal()?;
        let result = run_loop(&mut terminal, &handle);
        // Restore terminal (even if loop failed)
        restore_terminal(&mut terminal)?;
        result
    })
    .await
    .context("TUI thread panicked")?;

    pipeline.shutdown().await;
    result
}

/// Main event loop
fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, pipeline: &PipelineHandle) -> Result<()> {
    let mut app = App::new();
    let mut views = pipeline.subscribe();

    loop {
        if views.has_changed().unwrap_or(false) {
            app.set_view(views.borrow_and_update().clone());
        }

        terminal.draw(|frame| ui::render(frame, &app))?;

        if let Some(Event::Key(key)) = poll_event(POLL_INTERVAL)? {
            match handle_key(&mut app, key) {
                HandleResult::Quit => app.should_quit = true,
                HandleResult::Continue => {}
                HandleResult::InputChanged(value) => pipeline.on_input_change(value),
                HandleResult::GoToPage(page) => pipeline.on_page_request(page),
                HandleResult::NextPage => pipeline.next_page(),
                HandleResult::PrevPage => pipeline.prev_page(),
            }
        }

        if app.should_quit || pipeline.is_closed() {
            break;
        }
    }

    Ok(())
}
