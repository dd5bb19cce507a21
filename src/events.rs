use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, HomeFocus};
use crate::session::View;
use crate::ui::PickerAction;

pub async fn handle_events(app: &mut App) -> Result<()> {
    // Apply any finished intake runs before reading input
    app.poll_results();

    if event::poll(std::time::Duration::from_millis(100))? {
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
            // Dragging a file onto the terminal pastes its path
            Event::Paste(text) => {
                if !app.handle_drop(&text) {
                    log::debug!("Ignoring empty paste");
                }
            }
            _ => {}
        }
    }
    Ok(())
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Global handlers - work in ALL views
    if key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::F(1) | KeyCode::Char('1') => return app.navigate(View::Home),
        KeyCode::F(2) | KeyCode::Char('2') => return app.navigate(View::Analyse),
        KeyCode::F(3) | KeyCode::Char('3') => return app.navigate(View::About),
        KeyCode::Tab => return app.cycle_view(),
        _ => {}
    }

    match app.session.view() {
        View::Home => handle_home(app, key),
        View::Analyse => handle_analyse(app, key),
        View::About => {}
    }
}

fn handle_home(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Char('m') => app.toggle_focus(),
        KeyCode::Char('r') => {
            app.picker.refresh();
            app.message = format!("Refreshed {}", app.picker.dir.display());
        }
        _ => match app.focus {
            HomeFocus::Modules => handle_module_select(app, key),
            HomeFocus::Files => handle_file_select(app, key),
        },
    }
}

fn handle_module_select(app: &mut App, key: KeyEvent) {
    let current = app.session.selected_module();
    match key.code {
        KeyCode::Up => app.select_module(current.previous()),
        KeyCode::Down => app.select_module(current.next()),
        KeyCode::Enter => {
            app.set_focus(HomeFocus::Files);
            app.message = format!("Module {} selected - now choose a file", current);
        }
        _ => {}
    }
}

fn handle_file_select(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.picker.select_previous(),
        KeyCode::Down => app.picker.select_next(),
        KeyCode::Backspace => app.picker.navigate_up(),
        KeyCode::Esc => app.set_focus(HomeFocus::Modules),
        KeyCode::Enter => match app.picker.activate() {
            PickerAction::Chosen(path) => app.start_intake(&path),
            PickerAction::Opened => {
                if let Some(err) = app.picker.error.clone() {
                    app.message = format!("✗ Cannot list {}: {}", app.picker.dir.display(), err);
                }
            }
            PickerAction::None => {}
        },
        _ => {}
    }
}

fn handle_analyse(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.scroll_report(-1),
        KeyCode::Down => app.scroll_report(1),
        KeyCode::PageUp => app.scroll_report(-10),
        KeyCode::PageDown => app.scroll_report(10),
        KeyCode::Home => app.report_scroll = 0,
        _ => {}
    }
}
