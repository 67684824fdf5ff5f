use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen): current path, then key hints
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![Span::styled(
        format!(" {}", app.route.path()),
        Style::default().fg(app.theme.dim).bg(bg),
    )];

    if app.show_key_hints {
        let hint = match (app.mode, app.view()) {
            (Mode::Input, _) => "Enter add  Esc done",
            (Mode::Navigate, View::Watchlist) => "a add  d remove  Enter open  ? help",
            (Mode::Navigate, View::Repository) => "Tab filter  m more  Esc back  ? help",
        };
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let hint_width = display_width(hint) + 1;
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(
                format!("{} ", hint),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fake::FakeApi;
    use crate::tui::render::test_helpers::*;
    use crate::tui::route::Route;

    fn render_row(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn shows_path_and_hints() {
        let mut app = app_with_repos(FakeApi::new(), &[]);
        let output = render_row(&app);
        assert!(output.starts_with(" /"));
        assert!(output.ends_with("? help"));

        app.navigate(Route::Repository("facebook/react".into()));
        let output = render_row(&app);
        assert!(output.starts_with(" /repositorio/facebook%2Freact"));
        assert!(output.contains("Esc back"));
    }

    #[test]
    fn input_mode_hint() {
        let mut app = app_with_repos(FakeApi::new(), &[]);
        app.mode = Mode::Input;
        assert!(render_row(&app).ends_with("Esc done"));
    }

    #[test]
    fn hints_can_be_hidden() {
        let mut app = app_with_repos(FakeApi::new(), &[]);
        app.show_key_hints = false;
        assert_eq!(render_row(&app), " /");
    }
}
