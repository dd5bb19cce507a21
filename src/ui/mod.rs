pub mod components;
pub mod picker;
pub mod views;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;
use crate::session::View;

pub use components::{render_help_bar, render_menu, render_status_bar};
pub use picker::{FilePicker, PickerAction, PickerEntry};

/// Draw one frame: menu, the active view, status and help bars.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Menu
            Constraint::Min(0),    // Active view
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Help bar
        ])
        .split(f.area());

    render_menu(f, chunks[0], app.session.view());

    match app.session.view() {
        View::Home => views::render_home(f, chunks[1], app),
        View::Analyse => views::render_analyse(f, chunks[1], app.session.outcome(), app.report_scroll),
        View::About => views::render_about(f, chunks[1], &app.base_url),
    }

    render_status_bar(f, chunks[2], app);
    render_help_bar(f, chunks[3], app);
}
