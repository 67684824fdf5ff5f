use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

use super::{adjust_scroll, pad_to_width, spinner};

/// Rows above the list: title, blank, input, message, count, blank
const HEADER_ROWS: u16 = 6;

/// Render the watchlist: add field, repository count and the tracked names
pub fn render_watchlist_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let visible = area.height.saturating_sub(HEADER_ROWS) as usize;
    app.watchlist.scroll_offset =
        adjust_scroll(app.watchlist.cursor, app.watchlist.scroll_offset, visible);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        " My repositories",
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(input_line(app, area.width));

    match &app.watchlist.error {
        Some(msg) => lines.push(Line::from(Span::styled(
            format!("   {}", msg),
            Style::default().fg(app.theme.red).bg(bg),
        ))),
        None => lines.push(Line::from("")),
    }

    lines.push(Line::from(Span::styled(
        format!(" Repositories: {}", app.store.len()),
        Style::default().fg(app.theme.dim).bg(bg),
    )));
    lines.push(Line::from(""));

    if app.store.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No repositories yet. Press a to add one.",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    let in_list = app.mode == Mode::Navigate;
    for (i, repo) in app
        .store
        .list()
        .iter()
        .enumerate()
        .skip(app.watchlist.scroll_offset)
        .take(visible)
    {
        let is_cursor = in_list && i == app.watchlist.cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };
        let marker = if is_cursor { "\u{25B8} " } else { "  " };
        let name_width = (area.width as usize).saturating_sub(4);
        let mut spans = vec![
            Span::styled(
                format!(" {}", marker),
                Style::default().fg(app.theme.selection_border).bg(row_bg),
            ),
            Span::styled(
                truncate_to_width(&repo.name, name_width),
                Style::default().fg(app.theme.text_bright).bg(row_bg),
            ),
        ];
        if is_cursor {
            pad_to_width(&mut spans, area.width, row_bg);
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn input_line(app: &App, width: u16) -> Line<'static> {
    let bg = app.theme.background;
    let editing = app.mode == Mode::Input;
    let label_color = if editing {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let mut spans = vec![Span::styled(
        " Add: ",
        Style::default().fg(label_color).bg(bg),
    )];

    let text_width = (width as usize).saturating_sub(10);
    if app.watchlist.input.is_empty() && !editing {
        spans.push(Span::styled(
            "owner/name",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        spans.push(Span::styled(
            truncate_to_width(&app.watchlist.input, text_width),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }

    if app.watchlist.pending_add.is_some() {
        spans.push(Span::styled(
            format!(" {}", spinner(app.tick)),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    } else if editing {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }
    Line::from(spans)
}
