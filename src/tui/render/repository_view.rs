use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Issue, IssueFilter, RepositoryInfo};
use crate::ops::issue_feed::FeedStatus;
use crate::tui::app::{App, InfoState, RepositoryScreen};
use crate::tui::theme::Theme;
use crate::util::format::{DateStyle, format_date, format_number};
use crate::util::unicode::{display_width, truncate_to_width};

use super::{adjust_scroll, pad_to_width, spinner};

/// Lines taken by one issue: author/title/date, then URL and labels
const ISSUE_ROWS: usize = 2;

/// Render the detail screen: summary, filter control and the issue feed
pub fn render_repository_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let tick = app.tick;
    let Some(screen) = app.repository.as_mut() else {
        return;
    };
    let bg = theme.background;

    if matches!(screen.info, InfoState::Loading) {
        let mut lines: Vec<Line> = vec![Line::from(""); area.height as usize / 2];
        lines.push(Line::from(Span::styled(
            format!("{} Loading\u{2026}", spinner(tick)),
            Style::default().fg(theme.text).bg(bg),
        )));
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(bg));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    match &screen.info {
        InfoState::Loaded(info) => summary_lines(&mut lines, info, &theme, area.width),
        InfoState::Failed(msg) => {
            lines.push(Line::from(Span::styled(
                format!(" {}", screen.name),
                Style::default()
                    .fg(theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!(" could not load repository: {}", msg),
                Style::default().fg(theme.red).bg(bg),
            )));
        }
        InfoState::Loading => {}
    }
    lines.push(Line::from(""));
    lines.push(filter_line(screen, &theme));
    lines.push(Line::from(""));

    // Everything below the header scrolls; keep the error line pinned
    let footer = usize::from(screen.error.is_some());
    let available = (area.height as usize).saturating_sub(lines.len() + footer + 1);
    let visible_rows = (available / ISSUE_ROWS).max(1);
    screen.scroll_offset = adjust_scroll(screen.cursor, screen.scroll_offset, visible_rows);

    match screen.feed.status() {
        FeedStatus::Idle | FeedStatus::LoadingFirstPage => {
            lines.push(Line::from(Span::styled(
                format!("  {} Loading issues\u{2026}", spinner(tick)),
                Style::default().fg(theme.dim).bg(bg),
            )));
        }
        FeedStatus::Ready | FeedStatus::LoadingNextPage => {
            if screen.feed.items().is_empty() && screen.error.is_none() {
                lines.push(Line::from(Span::styled(
                    "  No issues",
                    Style::default().fg(theme.dim).bg(bg),
                )));
            }
            for (i, issue) in screen
                .feed
                .items()
                .iter()
                .enumerate()
                .skip(screen.scroll_offset)
                .take(visible_rows)
            {
                issue_lines(&mut lines, issue, i == screen.cursor, &theme, area.width);
            }
            let load_more_row = screen.feed.items().len();
            let on_screen = load_more_row < screen.scroll_offset + visible_rows;
            if screen.shows_load_more() && on_screen {
                lines.push(load_more_line(screen, screen.cursor == load_more_row, &theme, tick, area.width));
            } else if !screen.feed.has_more() && !screen.feed.items().is_empty() && on_screen {
                lines.push(Line::from(Span::styled(
                    "  No more issues",
                    Style::default().fg(theme.dim).bg(bg),
                )));
            }
        }
    }

    if let Some(msg) = &screen.error {
        lines.push(Line::from(Span::styled(
            format!(" {}", msg),
            Style::default().fg(theme.red).bg(bg),
        )));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn summary_lines(lines: &mut Vec<Line<'static>>, info: &RepositoryInfo, theme: &Theme, width: u16) {
    let bg = theme.background;
    let w = width as usize;
    lines.push(Line::from(Span::styled(
        format!(" {}", truncate_to_width(&info.full_name, w.saturating_sub(1))),
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::styled(" by ", Style::default().fg(theme.dim).bg(bg)),
        Span::styled(info.owner.login.clone(), Style::default().fg(theme.cyan).bg(bg)),
        Span::styled(
            format!(" \u{00B7} created {}", format_date(&info.created_at.with_timezone(&Local), DateStyle::Long)),
            Style::default().fg(theme.dim).bg(bg),
        ),
    ]));
    if let Some(description) = info.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Line::from(Span::styled(
            format!(" {}", truncate_to_width(description, w.saturating_sub(1))),
            Style::default().fg(theme.text).bg(bg),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled(
            format!(" \u{2605} {} stars", format_number(info.stargazers_count)),
            Style::default().fg(theme.yellow).bg(bg),
        ),
        Span::styled(
            format!("  \u{2442} {} forks", format_number(info.forks)),
            Style::default().fg(theme.purple).bg(bg),
        ),
        Span::styled(
            format!("  \u{25CF} {} open issues", format_number(info.open_issues)),
            Style::default().fg(theme.green).bg(bg),
        ),
    ]));
}

fn filter_line(screen: &RepositoryScreen, theme: &Theme) -> Line<'static> {
    let bg = theme.background;
    let enabled = screen.filter_enabled();
    let mut spans = vec![Span::styled(
        " Issues ",
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    for (n, filter) in IssueFilter::ALL.iter().enumerate() {
        let selected = *filter == screen.feed.filter();
        let mark = if selected { "\u{25C9}" } else { "\u{25CB}" };
        let color = match (enabled, selected) {
            (false, _) => theme.dim,
            (true, true) => theme.highlight,
            (true, false) => theme.text,
        };
        spans.push(Span::styled(
            format!(" {} {} {}", n + 1, mark, filter.label()),
            Style::default().fg(color).bg(bg),
        ));
    }
    if !enabled {
        spans.push(Span::styled(
            "  (no open issues)",
            Style::default().fg(theme.dim).bg(bg),
        ));
    }
    Line::from(spans)
}

fn issue_lines(lines: &mut Vec<Line<'static>>, issue: &Issue, is_cursor: bool, theme: &Theme, width: u16) {
    let row_bg = if is_cursor { theme.selection_bg } else { theme.background };
    let marker = if is_cursor { " \u{25B8} " } else { "   " };
    let date = format_date(&issue.created_at.with_timezone(&Local), DateStyle::Short);
    let author = truncate_to_width(&issue.author.login, 16);

    let fixed = display_width(marker) + display_width(&author) + 2 + 2 + display_width(&date);
    let title = truncate_to_width(&issue.title, (width as usize).saturating_sub(fixed));

    let mut first = vec![
        Span::styled(marker, Style::default().fg(theme.selection_border).bg(row_bg)),
        Span::styled(author, Style::default().fg(theme.cyan).bg(row_bg)),
        Span::styled("  ", Style::default().bg(row_bg)),
        Span::styled(title, Style::default().fg(theme.text_bright).bg(row_bg)),
        Span::styled("  ", Style::default().bg(row_bg)),
        Span::styled(date, Style::default().fg(theme.dim).bg(row_bg)),
    ];

    let mut second = vec![
        Span::styled("   ", Style::default().bg(row_bg)),
        Span::styled(issue.url.clone(), Style::default().fg(theme.dim).bg(row_bg)),
    ];
    for label in &issue.labels {
        let (fg, bg) = theme.label_colors(&label.color);
        second.push(Span::styled(" ", Style::default().bg(row_bg)));
        second.push(Span::styled(format!(" {} ", label.name), Style::default().fg(fg).bg(bg)));
    }

    if is_cursor {
        pad_to_width(&mut first, width, row_bg);
        pad_to_width(&mut second, width, row_bg);
    }
    lines.push(Line::from(first));
    lines.push(Line::from(second));
}

fn load_more_line(screen: &RepositoryScreen, is_cursor: bool, theme: &Theme, tick: usize, width: u16) -> Line<'static> {
    let row_bg = if is_cursor { theme.selection_bg } else { theme.background };
    let marker = if is_cursor { " \u{25B8} " } else { "   " };
    let (text, color) = if screen.feed.status() == FeedStatus::LoadingNextPage {
        (format!("{} Loading\u{2026}", spinner(tick)), theme.dim)
    } else {
        ("Load more issues".to_string(), theme.highlight)
    };
    let mut spans = vec![
        Span::styled(marker, Style::default().fg(theme.selection_border).bg(row_bg)),
        Span::styled(text, Style::default().fg(color).bg(row_bg)),
    ];
    if is_cursor {
        pad_to_width(&mut spans, width, row_bg);
    }
    Line::from(spans)
}
