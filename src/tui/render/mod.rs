pub mod help_overlay;
pub mod repository_view;
pub mod status_row;
pub mod watchlist_view;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;

use super::app::{App, View};

const SPINNER: [&str; 10] = [
    "\u{280B}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283C}", "\u{2834}", "\u{2826}", "\u{2827}",
    "\u{2807}", "\u{280F}",
];

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    match app.view() {
        View::Watchlist => watchlist_view::render_watchlist_view(frame, app, chunks[0]),
        View::Repository => repository_view::render_repository_view(frame, app, chunks[0]),
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[1]);
}

/// Current spinner frame for a loading indicator
pub(super) fn spinner(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

/// Scroll offset that keeps `cursor` inside a window of `visible` rows
pub(super) fn adjust_scroll(cursor: usize, offset: usize, visible: usize) -> usize {
    if visible == 0 {
        return cursor;
    }
    if cursor < offset {
        cursor
    } else if cursor >= offset + visible {
        cursor + 1 - visible
    } else {
        offset
    }
}

/// Pad a cursor row with background-colored spaces to the full width
pub(super) fn pad_to_width(spans: &mut Vec<Span<'_>>, width: u16, bg: ratatui::style::Color) {
    let content_width: usize = spans
        .iter()
        .map(|s| crate::util::unicode::display_width(&s.content))
        .sum();
    let w = width as usize;
    if content_width < w {
        spans.push(Span::styled(" ".repeat(w - content_width), Style::default().bg(bg)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_follows_cursor() {
        assert_eq!(adjust_scroll(0, 0, 5), 0);
        assert_eq!(adjust_scroll(4, 0, 5), 0);
        assert_eq!(adjust_scroll(5, 0, 5), 1);
        assert_eq!(adjust_scroll(9, 2, 5), 5);
        assert_eq!(adjust_scroll(1, 3, 5), 1);
        assert_eq!(adjust_scroll(3, 0, 0), 3);
    }

    #[test]
    fn spinner_wraps() {
        assert_eq!(spinner(0), spinner(SPINNER.len()));
    }
}
