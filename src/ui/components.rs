//! Reusable UI components for the TUI.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, HomeFocus};
use crate::session::View;

/// Render the Home / Analyse / About navigation menu.
pub fn render_menu(f: &mut Frame, area: Rect, active: View) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .map(|v| {
            let icon = match v {
                View::Home => "🏠",
                View::Analyse => "📊",
                View::About => "ℹ️",
            };
            Line::from(format!("{} {} [{}]", icon, v.title(), v.index() + 1))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(active.index())
        .block(Block::default().borders(Borders::ALL).title(" jhove-tui "))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");

    f.render_widget(tabs, area);
}

/// Render the help bar with context-sensitive key bindings.
pub fn render_help_bar(f: &mut Frame, area: Rect, app: &App) {
    let help_text = build_help_text(app);

    let help = Paragraph::new(Line::from(help_text))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    f.render_widget(help, area);
}

/// Build help text based on current view.
fn build_help_text(app: &App) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let sep_style = Style::default().fg(Color::DarkGray);
    let text_style = Style::default().fg(Color::White);

    let mut push = |key: &'static str, text: &'static str, last: bool| {
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(text, text_style));
        if !last {
            spans.push(Span::styled("│ ", sep_style));
        }
    };

    match (app.session.view(), app.focus) {
        (View::Home, HomeFocus::Modules) => {
            push("↑↓", ":Module ", false);
            push("←→", ":Files ", false);
        }
        (View::Home, HomeFocus::Files) => {
            push("↑↓", ":Navigate ", false);
            push("Enter", ":Validate ", false);
            push("Bksp", ":Up ", false);
            push("←→", ":Modules ", false);
        }
        (View::Analyse, _) => {
            push("↑↓", ":Scroll ", false);
            push("PgUp/PgDn", ":Page ", false);
        }
        (View::About, _) => {}
    }
    push("1-3/Tab", ":Menu ", false);
    push("q", ":Quit", true);

    spans
}

/// Render the status bar with the last message and the service URL.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let busy = if app.session.in_flight() { " ⏳" } else { "" };
    let text = format!("{}{} │ {}", app.message, busy, app.base_url);

    let bg = if app.session.last_fault().is_some() && !app.session.in_flight() {
        Color::Red
    } else {
        Color::Blue
    };

    let status = Paragraph::new(text).style(Style::default().bg(bg).fg(Color::White));

    f.render_widget(status, area);
}
