//! Rendering for the game explorer TUI.
//!
//! All formatting rules live here as pure helpers so the reducer and tests
//! never need a terminal: platform tag capping, release-date display,
//! rating display, and description truncation.

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};
use unicode_width::UnicodeWidthChar;

use crate::app_core::state::{AppState, DetailModal, InputMode, View};
use crate::model::GameSummary;

/// Lines each result card occupies in the list. The mouse hit-testing in the
/// reducer relies on every card having exactly this height.
pub const CARD_HEIGHT: u16 = 4;

/// Platform tags shown on a card before collapsing into a `+N more` tag.
pub const MAX_VISIBLE_PLATFORM_TAGS: usize = 3;

/// Character cap for the modal description.
pub const DESCRIPTION_LIMIT: usize = 400;

/// Label for absent dates and empty platform/genre lists.
pub const NOT_INFORMED_LABEL: &str = "Not informed";

/// Shown in the modal when the upstream has no cover image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";

/// Main UI entry point that renders the entire application layout.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Main area
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    app.search_area = Some(chunks[0]);
    app.list_area = Some(chunks[1]);

    render_search_box(f, app, chunks[0]);

    match app.view.clone() {
        View::Idle | View::Loading => render_centered_message(
            f,
            app,
            chunks[1],
            "Loading games...",
            false,
        ),
        View::Error { message } => render_centered_message(f, app, chunks[1], &message, true),
        View::Results => render_results(f, app, chunks[1]),
    }

    render_status_bar(f, app, chunks[2]);

    if app.modal.is_some() {
        render_modal(f, app);
    }
    if app.notice.is_some() {
        render_notice(f, app);
    }
}

/// Renders the interactive search input box.
fn render_search_box(f: &mut Frame, app: &mut AppState, area: Rect) {
    let is_editing = app.input_mode == InputMode::Editing;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_editing {
            app.theme.border_selected
        } else {
            app.theme.border
        })
        .title(" Search (/) ")
        .title_style(app.theme.title)
        .title_bottom(if is_editing {
            Line::from(" Enter search • Esc cancel ").right_aligned()
        } else {
            Line::from("")
        });

    let inner = block.inner(area);
    app.search_input_area = Some(inner);
    let horizontal_scroll =
        search_horizontal_scroll(&app.search_text, app.search_cursor, inner.width);

    let content = if app.search_text.is_empty() && !is_editing {
        Text::from(Line::from(Span::styled(
            "elden ring",
            app.theme.text.add_modifier(Modifier::DIM | Modifier::ITALIC),
        )))
    } else {
        Text::from(app.search_text.as_str())
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .style(app.theme.text)
        .scroll((0, horizontal_scroll));

    f.render_widget(paragraph, area);

    if is_editing && inner.width > 0 && inner.height > 0 {
        let cursor_offset = search_cursor_offset(&app.search_text, app.search_cursor);
        let max_x = inner.width.saturating_sub(1);
        let visible_cursor_offset = cursor_offset.saturating_sub(horizontal_scroll);
        f.set_cursor_position((inner.x + visible_cursor_offset.min(max_x), inner.y));
    }
}

/// Renders the scrollable list of result cards.
fn render_results(f: &mut Frame, app: &mut AppState, area: Rect) {
    let is_focused = app.input_mode == InputMode::Normal;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_focused {
            app.theme.border_selected
        } else {
            app.theme.border
        })
        .title_style(app.theme.title)
        .title(format!(" Games ({}) ", app.games.len()))
        .title_bottom(if is_focused {
            Line::from(" ↑/↓ move • Enter details ").right_aligned()
        } else {
            Line::from("").right_aligned()
        })
        .style(app.theme.list_normal);

    app.list_content_area = Some(block.inner(area));

    let items: Vec<ListItem> = app
        .games
        .iter()
        .map(|game| ListItem::new(card_lines(game, &app.theme)))
        .collect();

    let list = List::new(items)
        .block(block)
        .style(app.theme.list_normal)
        .highlight_style(app.theme.list_selected);

    f.render_stateful_widget(list, area, &mut app.list_state);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
    let mut scrollbar_state =
        ScrollbarState::new(app.games.len()).position(app.list_state.selected().unwrap_or(0));

    f.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

/// One card: name, release date, platform tags, and a separator line.
fn card_lines(game: &GameSummary, theme: &crate::theme::ThemeConfig) -> Text<'static> {
    let mut tag_spans: Vec<Span<'static>> = Vec::new();
    for tag in platform_tags(&game.platforms) {
        tag_spans.push(Span::styled(format!("[{}]", tag), theme.tag));
        tag_spans.push(Span::raw(" "));
    }

    Text::from(vec![
        Line::from(Span::styled(game.name.clone(), theme.title)),
        Line::from(vec![
            Span::styled("Released: ", theme.hint),
            Span::styled(format_release_date(game.released.as_deref()), theme.text),
        ]),
        Line::from(tag_spans),
        Line::from(""),
    ])
}

/// Loading, error, and no-results surfaces share this centered layout.
fn render_centered_message(f: &mut Frame, app: &AppState, area: Rect, message: &str, error: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .title(" Games ")
        .title_style(app.theme.title)
        .style(app.theme.list_normal);

    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let style = if error { app.theme.error } else { app.theme.hint };
    let vertical_offset = inner.height / 2;
    let text_area = Rect::new(
        inner.x,
        inner.y + vertical_offset,
        inner.width,
        inner.height - vertical_offset,
    );
    f.render_widget(
        Paragraph::new(Span::styled(message.to_string(), style)).alignment(Alignment::Center),
        text_area,
    );
}

/// Renders the detail modal over the dimmed result list.
fn render_modal(f: &mut Frame, app: &mut AppState) {
    let Some(modal) = app.modal.as_ref() else {
        return;
    };

    let area = f.area();
    let popup_width = area.width.min(72).saturating_sub(4);
    let popup_height = area.height.saturating_sub(4).min(24);
    if popup_width == 0 || popup_height == 0 {
        return;
    }
    let popup_rect = Rect::new(
        area.x + (area.width.saturating_sub(popup_width)) / 2,
        area.y + (area.height.saturating_sub(popup_height)) / 2,
        popup_width,
        popup_height,
    );

    // The reducer treats clicks inside this rect as handled by the modal.
    app.modal_area = Some(popup_rect);

    f.render_widget(Clear, popup_rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_selected)
        .style(app.theme.text)
        .title(format!(" {} ", modal.detail.name))
        .title_style(app.theme.title)
        .title_bottom(Line::from(" ↑/↓ scroll • Esc close ").right_aligned());

    let inner_area = block.inner(popup_rect);
    f.render_widget(block, popup_rect);

    f.render_widget(
        Paragraph::new(modal_lines(modal, &app.theme))
            .wrap(Wrap { trim: false })
            .scroll((modal.scroll, 0)),
        inner_area.inner(Margin {
            vertical: 0,
            horizontal: 1,
        }),
    );
}

fn modal_lines(modal: &DetailModal, theme: &crate::theme::ThemeConfig) -> Text<'static> {
    let detail = &modal.detail;
    let label = theme.hint;
    let text = theme.text;

    let image = detail
        .background_image
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Released:  ", label),
            Span::styled(format_release_date(detail.released.as_deref()), text),
        ]),
        Line::from(vec![
            Span::styled("Rating:    ", label),
            Span::styled(format_rating(detail.rating, detail.ratings_count), text),
        ]),
        Line::from(vec![
            Span::styled("Platforms: ", label),
            Span::styled(join_or_not_informed(&detail.platforms), text),
        ]),
        Line::from(vec![
            Span::styled("Genres:    ", label),
            Span::styled(join_or_not_informed(&detail.genres), text),
        ]),
        Line::from(vec![
            Span::styled("Image:     ", label),
            Span::styled(image, text.add_modifier(Modifier::DIM)),
        ]),
    ];

    if !detail.description.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Description",
            theme.title,
        )));
        for paragraph in truncate_description(&detail.description, DESCRIPTION_LIMIT).lines() {
            lines.push(Line::from(Span::styled(paragraph.to_string(), text)));
        }
    }

    Text::from(lines)
}

/// Renders the blocking validation prompt.
fn render_notice(f: &mut Frame, app: &AppState) {
    let Some(notice) = app.notice.as_ref() else {
        return;
    };

    let area = f.area();
    let popup_width = area.width.min((notice.len() as u16).saturating_add(6)).max(20);
    let popup_height = 3;
    if area.height < popup_height {
        return;
    }
    let popup_rect = Rect::new(
        area.x + (area.width.saturating_sub(popup_width)) / 2,
        area.y + (area.height.saturating_sub(popup_height)) / 2,
        popup_width.min(area.width),
        popup_height,
    );

    f.render_widget(Clear, popup_rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_selected)
        .style(app.theme.text)
        .title(" Notice ")
        .title_style(app.theme.title);

    let inner = block.inner(popup_rect);
    f.render_widget(block, popup_rect);
    f.render_widget(
        Paragraph::new(notice.as_str()).alignment(Alignment::Center),
        inner,
    );
}

/// Renders the multisection status bar at the bottom.
fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let area = Rect::new(
        area.x + 1,
        area.y,
        area.width.saturating_sub(2),
        area.height,
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ])
        .split(area);

    let key_style = app.theme.title;
    let bar_style = app.theme.text.add_modifier(Modifier::DIM);

    let shortcuts = Line::from(vec![
        Span::styled("/ ", key_style),
        Span::raw("search  "),
        Span::styled("Enter ", key_style),
        Span::raw("details  "),
        Span::styled("q ", key_style),
        Span::raw("quit"),
    ]);
    f.render_widget(
        Paragraph::new(shortcuts)
            .style(bar_style)
            .alignment(Alignment::Left),
        chunks[0],
    );

    f.render_widget(
        Paragraph::new(format!("Games: {}", app.games.len()))
            .style(bar_style)
            .alignment(Alignment::Center),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new(format!("Server: {}", app.server_label))
            .style(bar_style)
            .alignment(Alignment::Right),
        chunks[2],
    );
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Tags shown for a card: at most [`MAX_VISIBLE_PLATFORM_TAGS`] platform
/// names plus a `+N more` tag when more exist, or a single
/// [`NOT_INFORMED_LABEL`] tag for an empty list.
pub fn platform_tags(platforms: &[String]) -> Vec<String> {
    if platforms.is_empty() {
        return vec![NOT_INFORMED_LABEL.to_string()];
    }

    let mut tags: Vec<String> = platforms
        .iter()
        .take(MAX_VISIBLE_PLATFORM_TAGS)
        .cloned()
        .collect();
    if platforms.len() > MAX_VISIBLE_PLATFORM_TAGS {
        tags.push(format!("+{} more", platforms.len() - MAX_VISIBLE_PLATFORM_TAGS));
    }
    tags
}

/// Fixed `DD/MM/YYYY` date display. Absent dates render the fixed label;
/// a date the upstream sent in an unexpected shape is shown verbatim.
pub fn format_release_date(released: Option<&str>) -> String {
    match released {
        None => NOT_INFORMED_LABEL.to_string(),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|date| date.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|_| raw.to_string()),
    }
}

/// `X.X/5 (N votes)` rating display. An absent or zero rating renders as
/// unrated, matching the list/detail contract.
pub fn format_rating(rating: Option<f64>, count: i64) -> String {
    match rating {
        Some(value) if value > 0.0 => format!("{:.1}/5 ({} votes)", value, count),
        _ => "Not rated".to_string(),
    }
}

pub fn join_or_not_informed(values: &[String]) -> String {
    if values.is_empty() {
        NOT_INFORMED_LABEL.to_string()
    } else {
        values.join(", ")
    }
}

/// First `limit` characters plus an ellipsis for longer text; shorter text
/// is returned verbatim.
pub fn truncate_description(text: &str, limit: usize) -> String {
    let mut chars = text.chars();
    let truncated: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{}…", truncated)
    } else {
        truncated
    }
}

// ---------------------------------------------------------------------------
// Search input cursor math
// ---------------------------------------------------------------------------

pub fn search_cursor_offset(text: &str, cursor: usize) -> u16 {
    text.chars()
        .take(cursor)
        .filter_map(|c| c.width())
        .map(|w| w as u16)
        .sum::<u16>()
}

/// Horizontal viewport offset keeping the cursor visible in the input.
pub fn search_horizontal_scroll(text: &str, cursor: usize, visible_width: u16) -> u16 {
    if visible_width == 0 {
        return 0;
    }

    let cursor_offset = search_cursor_offset(text, cursor);
    cursor_offset.saturating_sub(visible_width.saturating_sub(1))
}

pub fn search_cursor_for_column(text: &str, target_column: u16) -> usize {
    let mut width = 0u16;
    for (idx, ch) in text.chars().enumerate() {
        let char_width = ch.width().unwrap_or(0) as u16;
        if width + char_width > target_column {
            return idx;
        }
        width += char_width;
    }
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Platform {}", i + 1)).collect()
    }

    #[test]
    fn test_platform_tags_cap_at_three_plus_overflow() {
        for n in 0..=6 {
            let tags = platform_tags(&names(n));
            match n {
                0 => assert_eq!(tags, vec![NOT_INFORMED_LABEL.to_string()]),
                1..=3 => {
                    assert_eq!(tags.len(), n);
                    assert!(!tags.last().unwrap().starts_with('+'));
                }
                _ => {
                    assert_eq!(tags.len(), MAX_VISIBLE_PLATFORM_TAGS + 1);
                    assert_eq!(tags[3], format!("+{} more", n - 3));
                }
            }
        }
    }

    #[test]
    fn test_truncate_description_boundary() {
        let exactly = "a".repeat(DESCRIPTION_LIMIT);
        assert_eq!(truncate_description(&exactly, DESCRIPTION_LIMIT), exactly);

        let longer = "a".repeat(DESCRIPTION_LIMIT + 1);
        let truncated = truncate_description(&longer, DESCRIPTION_LIMIT);
        assert_eq!(truncated.chars().count(), DESCRIPTION_LIMIT + 1);
        assert!(truncated.ends_with('…'));

        assert_eq!(truncate_description("short", DESCRIPTION_LIMIT), "short");
    }

    #[test]
    fn test_truncate_description_respects_char_boundaries() {
        let accented = "é".repeat(DESCRIPTION_LIMIT + 10);
        let truncated = truncate_description(&accented, DESCRIPTION_LIMIT);
        assert_eq!(truncated.chars().count(), DESCRIPTION_LIMIT + 1);
    }

    #[test]
    fn test_format_release_date() {
        assert_eq!(format_release_date(Some("2022-02-25")), "25/02/2022");
        assert_eq!(format_release_date(None), NOT_INFORMED_LABEL);
        // Unexpected upstream shape is displayed verbatim, not dropped.
        assert_eq!(format_release_date(Some("soon")), "soon");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(Some(4.41), 5959), "4.4/5 (5959 votes)");
        assert_eq!(format_rating(None, 12), "Not rated");
        assert_eq!(format_rating(Some(0.0), 0), "Not rated");
    }

    #[test]
    fn test_join_or_not_informed() {
        assert_eq!(join_or_not_informed(&[]), NOT_INFORMED_LABEL);
        assert_eq!(
            join_or_not_informed(&["Action".to_string(), "RPG".to_string()]),
            "Action, RPG"
        );
    }

    #[test]
    fn test_search_cursor_for_column_clamps_to_end() {
        assert_eq!(search_cursor_for_column("abc", 1), 1);
        assert_eq!(search_cursor_for_column("abc", 50), 3);
    }
}
