//! Shared application state, types, and state-mutation methods.
//!
//! The state machine itself is runtime-agnostic: reducers queue
//! [`AppAction`]s here, and the runtime in `main.rs` performs the actual
//! network calls and feeds the outcome back through the `apply_*` methods.

use ratatui::layout::Rect;
use ratatui::widgets::ListState;

use crate::model::{GameDetail, GameSummary};
use crate::theme::ThemeConfig;

/// Fixed search fired automatically at startup.
pub const SEED_SEARCH_TERM: &str = "elden ring";

/// Shown when a search succeeds with zero results.
pub const NO_RESULTS_MESSAGE: &str = "No games found. Try another search.";
/// Shown when a search or detail fetch fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load games. Try again.";
/// Validation prompt for submitting an empty search.
pub const EMPTY_SEARCH_PROMPT: &str = "Type a game name to search.";

/// Current input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal list navigation
    Normal,
    /// Mode for editing the search box
    Editing,
}

/// What the main area is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Startup, before the seed search has fired.
    Idle,
    /// A request is in flight.
    Loading,
    /// The result list, possibly overlaid by the detail modal.
    Results,
    /// Load failure or zero results: same surface, distinguished by message.
    Error { message: String },
}

/// A fetch the runtime must perform after input handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Search(String),
    FetchDetail(i64),
}

/// The open detail modal, overlaying the result list.
#[derive(Debug, Clone)]
pub struct DetailModal {
    pub detail: GameDetail,
    /// Vertical scroll offset of the modal body.
    pub scroll: u16,
}

/// Application state for the Ratatui app.
pub struct AppState {
    pub view: View,
    /// Last successful search results. Preserved beneath the modal; replaced
    /// only by the next completed search.
    pub games: Vec<GameSummary>,
    /// List selection state managed by ratatui
    pub list_state: ListState,
    /// Search input text
    pub search_text: String,
    /// Cursor position in the search input, as a char index
    pub search_cursor: usize,
    pub input_mode: InputMode,
    pub modal: Option<DetailModal>,
    /// Blocking validation prompt; the next key press or click dismisses it.
    pub notice: Option<String>,
    /// Pending fetch to execute after input handling
    pub pending_action: Option<AppAction>,
    /// Flag to quit app
    pub should_quit: bool,
    /// Theme configuration
    pub theme: ThemeConfig,
    /// Proxy server address, shown in the status bar
    pub server_label: String,

    // Screen regions captured during render, used for mouse hit-testing.
    /// Result list pane (including borders)
    pub list_area: Option<Rect>,
    /// Result list content (inside borders)
    pub list_content_area: Option<Rect>,
    /// Search box (including borders)
    pub search_area: Option<Rect>,
    /// Search text area (inside borders)
    pub search_input_area: Option<Rect>,
    /// Content area of the open modal
    pub modal_area: Option<Rect>,
}

impl AppState {
    pub fn new(theme: ThemeConfig, server_label: String) -> Self {
        Self {
            view: View::Idle,
            games: Vec::new(),
            list_state: ListState::default(),
            search_text: String::new(),
            search_cursor: 0,
            input_mode: InputMode::Normal,
            modal: None,
            notice: None,
            pending_action: None,
            should_quit: false,
            theme,
            server_label,
            list_area: None,
            list_content_area: None,
            search_area: None,
            search_input_area: None,
            modal_area: None,
        }
    }

    // -----------------------------------------------------------------
    // View transitions (driven by the runtime around each fetch)
    // -----------------------------------------------------------------

    pub fn begin_loading(&mut self) {
        self.view = View::Loading;
    }

    /// Applies a finished search. Zero results land in the error surface
    /// with the no-results message; the old list is replaced either way.
    pub fn apply_search_results(&mut self, games: Vec<GameSummary>) {
        if games.is_empty() {
            self.games.clear();
            self.list_state.select(None);
            self.view = View::Error {
                message: NO_RESULTS_MESSAGE.to_string(),
            };
            return;
        }
        self.games = games;
        self.list_state.select(Some(0));
        self.view = View::Results;
    }

    pub fn apply_load_failure(&mut self) {
        self.view = View::Error {
            message: LOAD_FAILED_MESSAGE.to_string(),
        };
    }

    /// Opens the modal over the untouched result list.
    pub fn open_modal(&mut self, detail: GameDetail) {
        self.modal = Some(DetailModal { detail, scroll: 0 });
        self.view = View::Results;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.modal_area = None;
    }

    /// Id of the currently selected result, if any.
    pub fn selected_game_id(&self) -> Option<i64> {
        self.list_state
            .selected()
            .and_then(|idx| self.games.get(idx))
            .map(|game| game.id)
    }

    // -----------------------------------------------------------------
    // Result list selection
    // -----------------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.games.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let previous = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(previous));
    }

    pub fn select_first(&mut self) {
        if !self.games.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.games.is_empty() {
            self.list_state.select(Some(self.games.len() - 1));
        }
    }

    // -----------------------------------------------------------------
    // Search input
    // -----------------------------------------------------------------

    pub fn focus_search(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    pub fn leave_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Submits the trimmed search input. An empty term raises the blocking
    /// validation prompt and issues nothing; no state transition happens.
    pub fn submit_search(&mut self) {
        let term = self.search_text.trim().to_string();
        if term.is_empty() {
            self.notice = Some(EMPTY_SEARCH_PROMPT.to_string());
            return;
        }
        self.pending_action = Some(AppAction::Search(term));
    }

    pub fn search_add_char(&mut self, c: char) {
        let byte_idx = self
            .search_text
            .char_indices()
            .nth(self.search_cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(self.search_text.len());
        self.search_text.insert(byte_idx, c);
        self.search_cursor += 1;
    }

    pub fn search_backspace(&mut self) {
        if self.search_cursor > 0 {
            self.search_cursor -= 1;
            if let Some((byte_idx, _)) = self.search_text.char_indices().nth(self.search_cursor) {
                self.search_text.remove(byte_idx);
            }
        }
    }

    pub fn search_delete(&mut self) {
        let char_count = self.search_text.chars().count();
        if self.search_cursor < char_count
            && let Some((byte_idx, _)) = self.search_text.char_indices().nth(self.search_cursor)
        {
            self.search_text.remove(byte_idx);
        }
    }

    pub fn search_move_cursor_left(&mut self) {
        if self.search_cursor > 0 {
            self.search_cursor -= 1;
        }
    }

    pub fn search_move_cursor_right(&mut self) {
        let char_count = self.search_text.chars().count();
        if self.search_cursor < char_count {
            self.search_cursor += 1;
        }
    }

    pub fn search_move_to_start(&mut self) {
        self.search_cursor = 0;
    }

    pub fn search_move_to_end(&mut self) {
        self.search_cursor = self.search_text.chars().count();
    }

    pub fn search_clear(&mut self) {
        self.search_text.clear();
        self.search_cursor = 0;
    }

    pub fn search_delete_word(&mut self) {
        if self.search_cursor == 0 {
            return;
        }

        let chars: Vec<char> = self.search_text.chars().collect();
        let mut i = self.search_cursor;

        // Skip trailing whitespace
        while i > 0 && chars[i - 1].is_whitespace() {
            i -= 1;
        }

        // Skip non-whitespace (the word)
        while i > 0 && !chars[i - 1].is_whitespace() {
            i -= 1;
        }

        let new_cursor = i;
        let byte_start = self
            .search_text
            .char_indices()
            .nth(new_cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        let byte_end = self
            .search_text
            .char_indices()
            .nth(self.search_cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(self.search_text.len());

        self.search_text.replace_range(byte_start..byte_end, "");
        self.search_cursor = new_cursor;
    }
}
