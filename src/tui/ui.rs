use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use serde_json::Value;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::constants::{
    LOOKUP_CHANNEL_CAPACITY, UI_PAGE_SCROLL_LINES, UI_REFRESH_INTERVAL_MS, UI_SCROLL_LINES,
};
use crate::conversation::{LookupRequest, Ticket};
use crate::directions::DirectionsService;
use crate::tui::app::{App, AppState};
use crate::tui::input::{InputAction, InputHandler};
use crate::tui::render::{max_scroll, render_ui};
use crate::utils::BusChatError;

type LookupMessage = (Ticket, Result<Value, BusChatError>);

/// Run the terminal UI
pub async fn run_ui(mut app: App, service: Arc<dyn DirectionsService>) -> Result<()> {
    // Check if we have an interactive terminal
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        eprintln!("❌ BusChat requires an interactive terminal.");
        eprintln!("   Use `buschat route <FROM> <TO>` for scripted lookups.");
        return Err(BusChatError::UIError("No interactive terminal available".to_string()).into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear terminal
    terminal.clear()?;

    let mut app_state = AppState::Insert;

    // Lookup results come back to the UI loop over this channel
    let (tx, mut rx) = mpsc::channel::<LookupMessage>(LOOKUP_CHANNEL_CAPACITY);

    // Run the UI loop
    let res = run_app(&mut terminal, &mut app, &mut app_state, &service, tx, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        eprintln!("Error: {:?}", err);
    }

    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    app_state: &mut AppState,
    service: &Arc<dyn DirectionsService>,
    tx: mpsc::Sender<LookupMessage>,
    rx: &mut mpsc::Receiver<LookupMessage>,
) -> Result<()> {
    let input_handler = InputHandler::new();

    while app.running {
        // Draw UI
        terminal.draw(|f| render_ui(f, app, *app_state))?;

        // Handle input events
        if event::poll(Duration::from_millis(UI_REFRESH_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let size = terminal.size()?;
                    let max = max_scroll(app, Rect::new(0, 0, size.width, size.height));
                    for request in handle_key(app, app_state, &input_handler, key, max) {
                        spawn_lookup(Arc::clone(service), request, tx.clone());
                    }
                }
            }
        }

        // Apply finished lookups
        while let Ok((ticket, result)) = rx.try_recv() {
            app.apply_lookup(ticket, result);
        }
    }

    Ok(())
}

/// Apply one key press; returns lookups the submission started
fn handle_key(
    app: &mut App,
    app_state: &mut AppState,
    input_handler: &InputHandler,
    key: KeyEvent,
    max_scroll: u16,
) -> Vec<LookupRequest> {
    // Ctrl+C quits from any state
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Vec::new();
    }

    match app_state {
        AppState::Normal => {
            match key.code {
                KeyCode::Char('q') => app.quit(),
                KeyCode::Char('i') | KeyCode::Enter => *app_state = AppState::Insert,
                KeyCode::Up => app.scroll_up(1, max_scroll),
                KeyCode::Down => app.scroll_down(1),
                KeyCode::PageUp => app.scroll_up(UI_PAGE_SCROLL_LINES, max_scroll),
                KeyCode::PageDown => app.scroll_down(UI_PAGE_SCROLL_LINES),
                _ => {}
            }
            Vec::new()
        }
        AppState::Insert => {
            match input_handler.handle_key(key) {
                InputAction::Submit => return app.submit(),
                InputAction::Cancel => *app_state = AppState::Normal,
                InputAction::Insert(c) => app.input.push(c),
                InputAction::Delete => {
                    app.input.pop();
                }
                InputAction::ScrollUp => app.scroll_up(UI_SCROLL_LINES, max_scroll),
                InputAction::ScrollDown => app.scroll_down(UI_SCROLL_LINES),
                InputAction::PageUp => app.scroll_up(UI_PAGE_SCROLL_LINES, max_scroll),
                InputAction::PageDown => app.scroll_down(UI_PAGE_SCROLL_LINES),
                InputAction::None => {}
            }
            Vec::new()
        }
    }
}

/// Run a lookup off the UI loop and post the result back
fn spawn_lookup(
    service: Arc<dyn DirectionsService>,
    request: LookupRequest,
    tx: mpsc::Sender<LookupMessage>,
) {
    tokio::spawn(async move {
        let result = service.directions(&request.query).await;
        if tx.send((request.ticket, result)).await.is_err() {
            debug!(ticket = request.ticket.0, "UI closed before the lookup finished");
        }
    });
}
