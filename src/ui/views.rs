//! The three panels behind the navigation menu.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, HomeFocus};
use crate::module::ValidationModule;
use crate::pipeline::ValidationOutcome;
use crate::report::{report_rows, RowTone, EMPTY_REPORT};

pub fn render_home(f: &mut Frame, area: Rect, app: &mut App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[1]);

    render_module_selector(f, columns[0], app.session.selected_module(), app.focus == HomeFocus::Modules);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Drop a file here", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" (drag onto the terminal) or pick one below"),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(hint, right[0]);

    app.picker.render(f, right[1]);
}

fn render_module_selector(f: &mut Frame, area: Rect, selected: ValidationModule, active: bool) {
    let items: Vec<ListItem> = ValidationModule::ALL
        .iter()
        .map(|m| ListItem::new(m.as_str()))
        .collect();

    let mut state = ListState::default();
    state.select(ValidationModule::ALL.iter().position(|m| *m == selected));

    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Module ")
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    f.render_stateful_widget(list, area, &mut state);
}

/// Validation result table, or the empty state when nothing has been validated.
pub fn render_analyse(f: &mut Frame, area: Rect, outcome: Option<&ValidationOutcome>, scroll: u16) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Validation Result ");

    let Some(outcome) = outcome else {
        let empty = Paragraph::new(EMPTY_REPORT)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    };

    let rows = report_rows(outcome);
    let label_width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    let label_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for row in rows {
        let label = Span::styled(format!("{:<w$}  ", row.label, w = label_width), label_style);
        match row.tone {
            RowTone::Preformatted => {
                lines.push(Line::from(label));
                for text in row.value.lines() {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", text),
                        Style::default().fg(Color::Gray),
                    )));
                }
            }
            tone => {
                let style = match tone {
                    RowTone::Good => Style::default().fg(Color::White).bg(Color::Green),
                    RowTone::Bad => Style::default().fg(Color::White).bg(Color::Red),
                    _ => Style::default(),
                };
                lines.push(Line::from(vec![label, Span::styled(row.value, style)]));
            }
        }
    }

    let table = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(table, area);
}

pub fn render_about(f: &mut Frame, area: Rect, base_url: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "jhove-tui",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Submit one file to a JHOVE validation service and view the normalized report."),
        Line::from("The SHA-1 checksum is computed locally while the service validates the file."),
        Line::from(""),
        Line::from(vec![Span::raw("Service: "), Span::styled(base_url.to_string(), Style::default().fg(Color::Cyan))]),
        Line::from(format!("Version: {}", env!("CARGO_PKG_VERSION"))),
    ];

    let about = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" About "))
        .wrap(Wrap { trim: true });
    f.render_widget(about, area);
}
