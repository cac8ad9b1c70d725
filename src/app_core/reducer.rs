//! Event reducer: key and mouse handlers over [`AppState`].
//!
//! Handlers only mutate state and queue [`AppAction`]s; the runtime performs
//! the queued network calls after each reducer pass. Listener wiring happens
//! here against the screen regions captured during the last render; nothing
//! is ever attached to rendered content itself.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use crate::app_core::state::{AppAction, AppState, InputMode, View};
use crate::ui;

/// Lines scrolled per mouse-wheel tick.
pub const SCROLL_LINES: u16 = 1;

/// Handle a key event, mutating `app` in place.
///
/// May set `app.pending_action`; the runtime is responsible for acting on it
/// after this function returns.
pub fn handle_key_event(app: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // An active validation prompt swallows the next key press.
    if app.notice.take().is_some() {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // The modal owns input while open.
    if app.modal.is_some() {
        handle_modal_key(app, key.code);
        return;
    }

    if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
        match app.input_mode {
            InputMode::Normal => app.focus_search(),
            InputMode::Editing => app.leave_search(),
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('/') => app.focus_search(),
            KeyCode::Enter => {
                if app.view == View::Results
                    && let Some(id) = app.selected_game_id()
                {
                    app.pending_action = Some(AppAction::FetchDetail(id));
                }
            }
            KeyCode::Up => app.select_previous(),
            KeyCode::Down => app.select_next(),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            KeyCode::Char(c) if c.is_alphanumeric() && !ctrl => {
                // Typing anywhere starts a new search.
                app.focus_search();
                app.search_move_to_end();
                app.search_add_char(c);
            }
            _ => {}
        },
        InputMode::Editing => match key.code {
            KeyCode::Enter => {
                app.submit_search();
                // Stay in the search box when validation rejected the input.
                if app.pending_action.is_some() {
                    app.leave_search();
                }
            }
            KeyCode::Esc => app.leave_search(),
            KeyCode::Char('u') if ctrl => app.search_clear(),
            KeyCode::Char('w') if ctrl => app.search_delete_word(),
            KeyCode::Char('a') if ctrl => app.search_move_to_start(),
            KeyCode::Char('e') if ctrl => app.search_move_to_end(),
            KeyCode::Char(c) if !ctrl => app.search_add_char(c),
            KeyCode::Backspace => app.search_backspace(),
            KeyCode::Delete => app.search_delete(),
            KeyCode::Left => app.search_move_cursor_left(),
            KeyCode::Right => app.search_move_cursor_right(),
            KeyCode::Home => app.search_move_to_start(),
            KeyCode::End => app.search_move_to_end(),
            _ => {}
        },
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_modal(),
        KeyCode::Up => scroll_modal(app, -1),
        KeyCode::Down => scroll_modal(app, 1),
        KeyCode::PageUp => scroll_modal(app, -5),
        KeyCode::PageDown => scroll_modal(app, 5),
        _ => {}
    }
}

fn scroll_modal(app: &mut AppState, lines: i16) {
    if let Some(modal) = app.modal.as_mut() {
        modal.scroll = if lines < 0 {
            modal.scroll.saturating_sub(lines.unsigned_abs())
        } else {
            modal.scroll.saturating_add(lines as u16)
        };
    }
}

/// Handle a mouse event. Returns `true` if the UI needs to be redrawn.
pub fn handle_mouse_event(app: &mut AppState, mouse: MouseEvent) -> bool {
    let position = Position::new(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.notice.take().is_some() {
                return true;
            }

            // Clicks inside the modal content must not dismiss it; clicks on
            // the dimmed backdrop close it and leave the list untouched.
            if app.modal.is_some() {
                let inside = app
                    .modal_area
                    .is_some_and(|area| area.contains(position));
                if !inside {
                    app.close_modal();
                    return true;
                }
                return false;
            }

            if let Some(area) = app.search_area
                && area.contains(position)
            {
                app.focus_search();
                if let Some(input_area) = app.search_input_area
                    && input_area.contains(position)
                {
                    let scroll = ui::search_horizontal_scroll(
                        &app.search_text,
                        app.search_cursor,
                        input_area.width,
                    );
                    let local_x = mouse.column.saturating_sub(input_area.x);
                    app.search_cursor =
                        ui::search_cursor_for_column(&app.search_text, scroll + local_x);
                }
                return true;
            }

            if app.view == View::Results
                && let Some(content_area) = app.list_content_area
                && content_area.contains(position)
                && !app.games.is_empty()
            {
                app.leave_search();
                let list_row = mouse.row.saturating_sub(content_area.y);
                let clicked = app.list_state.offset() + (list_row / ui::CARD_HEIGHT) as usize;
                if clicked < app.games.len() {
                    app.list_state.select(Some(clicked));
                    app.pending_action = Some(AppAction::FetchDetail(app.games[clicked].id));
                }
                return true;
            }

            false
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let down = mouse.kind == MouseEventKind::ScrollDown;

            if app.modal.is_some() {
                scroll_modal(app, if down { SCROLL_LINES as i16 } else { -(SCROLL_LINES as i16) });
                return true;
            }

            if app.view == View::Results
                && let Some(area) = app.list_area
                && area.contains(position)
                && !app.games.is_empty()
            {
                for _ in 0..SCROLL_LINES {
                    if down {
                        app.select_next();
                    } else {
                        app.select_previous();
                    }
                }
                return true;
            }

            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_core::state::{
        AppState, DetailModal, EMPTY_SEARCH_PROMPT, LOAD_FAILED_MESSAGE, NO_RESULTS_MESSAGE,
    };
    use crate::model::{GameDetail, GameSummary};
    use crate::theme;
    use ratatui::layout::Rect;

    fn make_key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn make_key_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn make_mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn make_summary(id: i64, name: &str) -> GameSummary {
        GameSummary {
            id,
            name: name.to_string(),
            released: None,
            background_image: None,
            platforms: vec![],
        }
    }

    fn make_detail(id: i64, name: &str) -> GameDetail {
        GameDetail {
            id,
            name: name.to_string(),
            released: None,
            background_image: None,
            description: String::new(),
            platforms: vec![],
            genres: vec![],
            rating: None,
            ratings_count: 0,
        }
    }

    fn make_test_app(games: usize) -> AppState {
        let mut app = AppState::new(theme::dracula_theme(), "http://localhost:3000".to_string());
        if games > 0 {
            let list = (0..games)
                .map(|i| make_summary(i as i64 + 1, &format!("Game {}", i + 1)))
                .collect();
            app.apply_search_results(list);
        }
        app
    }

    #[test]
    fn test_navigation_moves_selection() {
        let mut app = make_test_app(3);
        assert_eq!(app.list_state.selected(), Some(0));

        handle_key_event(&mut app, make_key(KeyCode::Down));
        assert_eq!(app.list_state.selected(), Some(1));

        handle_key_event(&mut app, make_key(KeyCode::Up));
        assert_eq!(app.list_state.selected(), Some(0));

        handle_key_event(&mut app, make_key(KeyCode::End));
        assert_eq!(app.list_state.selected(), Some(2));

        handle_key_event(&mut app, make_key(KeyCode::Home));
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_typing_autofocuses_search() {
        let mut app = make_test_app(1);
        handle_key_event(&mut app, make_key(KeyCode::Char('z')));

        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.search_text, "z");
    }

    #[test]
    fn test_submit_with_text_queues_search() {
        let mut app = make_test_app(0);
        app.focus_search();
        app.search_text = "  elden ring  ".to_string();
        app.search_cursor = app.search_text.chars().count();

        handle_key_event(&mut app, make_key(KeyCode::Enter));

        assert_eq!(
            app.pending_action,
            Some(AppAction::Search("elden ring".to_string()))
        );
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_empty_submit_shows_prompt_and_issues_nothing() {
        let mut app = make_test_app(3);
        app.focus_search();
        app.search_text = "   ".to_string();
        let view_before = app.view.clone();

        handle_key_event(&mut app, make_key(KeyCode::Enter));

        assert_eq!(app.notice.as_deref(), Some(EMPTY_SEARCH_PROMPT));
        assert!(app.pending_action.is_none());
        assert_eq!(app.view, view_before);
        // Focus stays in the search box, like the original prompt flow.
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[test]
    fn test_notice_swallows_next_key() {
        let mut app = make_test_app(1);
        app.notice = Some(EMPTY_SEARCH_PROMPT.to_string());

        handle_key_event(&mut app, make_key(KeyCode::Char('q')));

        assert!(app.notice.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_enter_on_selection_queues_detail_fetch() {
        let mut app = make_test_app(2);
        handle_key_event(&mut app, make_key(KeyCode::Down));
        handle_key_event(&mut app, make_key(KeyCode::Enter));

        assert_eq!(app.pending_action, Some(AppAction::FetchDetail(2)));
    }

    #[test]
    fn test_enter_without_results_queues_nothing() {
        let mut app = make_test_app(0);
        app.apply_load_failure();

        handle_key_event(&mut app, make_key(KeyCode::Enter));

        assert!(app.pending_action.is_none());
    }

    #[test]
    fn test_zero_results_uses_no_results_message() {
        let mut app = make_test_app(0);
        app.apply_search_results(vec![]);

        assert_eq!(
            app.view,
            View::Error {
                message: NO_RESULTS_MESSAGE.to_string()
            }
        );

        app.apply_load_failure();
        assert_eq!(
            app.view,
            View::Error {
                message: LOAD_FAILED_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_modal_esc_restores_untouched_results() {
        let mut app = make_test_app(3);
        handle_key_event(&mut app, make_key(KeyCode::Down));
        app.open_modal(make_detail(2, "Game 2"));

        handle_key_event(&mut app, make_key(KeyCode::Esc));

        assert!(app.modal.is_none());
        assert_eq!(app.view, View::Results);
        assert_eq!(app.games.len(), 3);
        assert_eq!(app.list_state.selected(), Some(1));
    }

    #[test]
    fn test_modal_swallows_list_keys() {
        let mut app = make_test_app(3);
        app.open_modal(make_detail(1, "Game 1"));

        handle_key_event(&mut app, make_key(KeyCode::Down));

        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.modal.as_ref().unwrap().scroll, 1);
    }

    #[test]
    fn test_modal_click_outside_closes_inside_does_not() {
        let mut app = make_test_app(1);
        app.open_modal(make_detail(1, "Game 1"));
        app.modal_area = Some(Rect::new(10, 5, 40, 20));

        let transitioned =
            handle_mouse_event(&mut app, make_mouse(MouseEventKind::Down(MouseButton::Left), 20, 10));
        assert!(!transitioned);
        assert!(app.modal.is_some());

        let transitioned =
            handle_mouse_event(&mut app, make_mouse(MouseEventKind::Down(MouseButton::Left), 2, 2));
        assert!(transitioned);
        assert!(app.modal.is_none());
        assert_eq!(app.view, View::Results);
    }

    #[test]
    fn test_mouse_click_card_selects_and_opens_it() {
        let mut app = make_test_app(4);
        app.list_area = Some(Rect::new(0, 0, 40, 20));
        app.list_content_area = Some(Rect::new(1, 1, 38, 18));

        let row = 1 + ui::CARD_HEIGHT * 2; // third card
        let transitioned = handle_mouse_event(
            &mut app,
            make_mouse(MouseEventKind::Down(MouseButton::Left), 5, row),
        );

        assert!(transitioned);
        assert_eq!(app.list_state.selected(), Some(2));
        assert_eq!(app.pending_action, Some(AppAction::FetchDetail(3)));
    }

    #[test]
    fn test_mouse_scroll_moves_selection() {
        let mut app = make_test_app(5);
        app.list_area = Some(Rect::new(0, 0, 40, 20));

        let transitioned =
            handle_mouse_event(&mut app, make_mouse(MouseEventKind::ScrollDown, 5, 5));

        assert!(transitioned);
        assert_eq!(app.list_state.selected(), Some(SCROLL_LINES as usize));
    }

    #[test]
    fn test_modal_scroll_saturates_at_top() {
        let mut app = make_test_app(1);
        app.modal = Some(DetailModal {
            detail: make_detail(1, "Game 1"),
            scroll: 0,
        });

        handle_key_event(&mut app, make_key(KeyCode::Up));
        assert_eq!(app.modal.as_ref().unwrap().scroll, 0);

        handle_key_event(&mut app, make_key(KeyCode::PageDown));
        assert_eq!(app.modal.as_ref().unwrap().scroll, 5);
    }

    #[test]
    fn test_quit_only_from_normal_mode() {
        let mut app = make_test_app(1);

        handle_key_event(&mut app, make_key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = make_test_app(1);
        app.focus_search();
        handle_key_event(&mut app, make_key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.search_text, "q");
    }

    #[test]
    fn test_search_editing_shortcuts() {
        let mut app = make_test_app(0);
        app.focus_search();
        app.search_text = "hello world".to_string();
        app.search_cursor = 11;

        handle_key_event(&mut app, make_key_ctrl(KeyCode::Char('a')));
        assert_eq!(app.search_cursor, 0);

        handle_key_event(&mut app, make_key_ctrl(KeyCode::Char('e')));
        assert_eq!(app.search_cursor, 11);

        handle_key_event(&mut app, make_key_ctrl(KeyCode::Char('w')));
        assert_eq!(app.search_text, "hello ");

        handle_key_event(&mut app, make_key_ctrl(KeyCode::Char('u')));
        assert_eq!(app.search_text, "");
    }
}
