//! # rawg-explorer
//!
//! Terminal client for browsing the RAWG video game database through the
//! companion proxy server.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

use rawg_explorer::api::ApiClient;
use rawg_explorer::app_core::reducer;
use rawg_explorer::app_core::state::{AppAction, AppState, SEED_SEARCH_TERM};
use rawg_explorer::{theme, ui};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "rawg-explorer: a terminal client for searching the RAWG video game database.\n\
                  Talks to the companion proxy server (rawg-explorer-server), which holds the API key."
)]
struct Args {
    /// Base URL of the proxy server
    #[arg(short, long, default_value = "http://localhost:3000")]
    server: String,

    /// UI theme (dracula, solarized)
    #[arg(short, long, default_value = "dracula")]
    theme: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let theme = theme::by_name(&args.theme)?;
    let api = ApiClient::new(&args.server)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(theme, args.server.clone());

    let res = (|| -> Result<()> {
        // Seed search fired automatically at startup.
        perform_action(
            &mut terminal,
            &mut app,
            &api,
            AppAction::Search(SEED_SEARCH_TERM.to_string()),
        )?;
        run_app(&mut terminal, &mut app, &api)
    })();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    api: &ApiClient,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    terminal.draw(|f| ui::ui(f, app))?;

    loop {
        if app.should_quit {
            break;
        }

        match event::read()? {
            Event::Key(key) => {
                reducer::handle_key_event(app, key);
                if let Some(action) = app.pending_action.take() {
                    perform_action(terminal, app, api, action)?;
                }
                terminal.draw(|f| ui::ui(f, app))?;
            }
            Event::Mouse(mouse) => {
                let transitioned = reducer::handle_mouse_event(app, mouse);
                if transitioned || app.pending_action.is_some() {
                    if let Some(action) = app.pending_action.take() {
                        perform_action(terminal, app, api, action)?;
                    }
                    terminal.draw(|f| ui::ui(f, app))?;
                }
            }
            Event::Resize(_, _) => {
                terminal.draw(|f| ui::ui(f, app))?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Executes a queued fetch. A loading frame is drawn before the blocking
/// call so the in-flight state is visible while the request runs; one
/// request at a time, nothing to supersede or cancel.
fn perform_action<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    api: &ApiClient,
    action: AppAction,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    app.begin_loading();
    terminal.draw(|f| ui::ui(f, app))?;

    match action {
        AppAction::Search(term) => match api.search_games(&term) {
            Ok(games) => app.apply_search_results(games),
            Err(_) => app.apply_load_failure(),
        },
        AppAction::FetchDetail(id) => match api.game_detail(id) {
            Ok(detail) => app.open_modal(detail),
            Err(_) => app.apply_load_failure(),
        },
    }

    Ok(())
}
