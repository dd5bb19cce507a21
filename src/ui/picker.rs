use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
}

impl PickerEntry {
    pub fn format_size(&self) -> String {
        if self.is_dir {
            return "<DIR>".to_string();
        }
        humansize::format_size(self.size, humansize::BINARY)
    }
}

/// Result of pressing Enter on the selected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    /// Moved into a directory
    Opened,
    /// A file was chosen for validation
    Chosen(PathBuf),
    None,
}

/// Directory browser used as the file picker on the Home view.
pub struct FilePicker {
    pub dir: PathBuf,
    pub entries: Vec<PickerEntry>,
    pub state: ListState,
    pub is_active: bool,
    pub error: Option<String>,
}

impl FilePicker {
    pub fn new(dir: PathBuf) -> Self {
        let mut state = ListState::default();
        state.select(Some(0));

        let mut picker = Self {
            dir: absolute_dir(dir),
            entries: Vec::new(),
            state,
            is_active: true,
            error: None,
        };
        picker.refresh();
        picker
    }

    /// Re-list the current directory: `..` first, then directories, then files.
    pub fn refresh(&mut self) {
        self.entries.clear();
        self.error = None;

        if self.parent_dir().is_some() {
            self.entries.push(PickerEntry { name: "..".to_string(), size: 0, is_dir: true });
        }

        match std::fs::read_dir(&self.dir) {
            Ok(read) => {
                let mut listed: Vec<PickerEntry> = read
                    .filter_map(|e| e.ok())
                    .map(|e| {
                        let metadata = e.metadata().ok();
                        PickerEntry {
                            name: e.file_name().to_string_lossy().to_string(),
                            size: metadata.as_ref().map(|m| m.len()).unwrap_or(0),
                            is_dir: metadata.map(|m| m.is_dir()).unwrap_or(false),
                        }
                    })
                    .collect();
                listed.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
                self.entries.extend(listed);
            }
            Err(e) => {
                log::warn!("Cannot list {}: {}", self.dir.display(), e);
                self.error = Some(e.to_string());
            }
        }

        let selected = self.state.selected().unwrap_or(0);
        if self.entries.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(selected.min(self.entries.len() - 1)));
        }
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.entries.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.entries.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn selected_entry(&self) -> Option<&PickerEntry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    pub fn activate(&mut self) -> PickerAction {
        let Some(entry) = self.selected_entry().cloned() else {
            return PickerAction::None;
        };

        if entry.name == ".." {
            self.navigate_up();
            return PickerAction::Opened;
        }

        let target = self.dir.join(&entry.name);
        if entry.is_dir {
            self.change_dir(target);
            PickerAction::Opened
        } else {
            PickerAction::Chosen(target)
        }
    }

    pub fn navigate_up(&mut self) {
        if let Some(parent) = self.parent_dir() {
            self.change_dir(parent);
        }
    }

    // A relative path's last parent is "", which is not a directory
    fn parent_dir(&self) -> Option<PathBuf> {
        self.dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }

    fn change_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.state.select(Some(0));
        self.refresh();
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2) as usize;
        let icon_width = 3;
        let size_width = 10;
        let name_width = inner_width.saturating_sub(icon_width + size_width + 1);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let icon = if entry.is_dir { "📁" } else { "📄" };

                let name = if entry.name.chars().count() > name_width && name_width > 3 {
                    let kept: String = entry.name.chars().take(name_width - 3).collect();
                    format!("{}...", kept)
                } else {
                    entry.name.clone()
                };

                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", icon)),
                    Span::raw(format!("{:<width$}", name, width = name_width)),
                    Span::styled(
                        format!("{:>10}", entry.format_size()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let border_style = if self.is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let display_path = self.dir.display().to_string();
        let max_title_len = inner_width.saturating_sub(4);
        let title = if display_path.chars().count() > max_title_len && max_title_len > 3 {
            let skip = display_path.chars().count() - (max_title_len - 3);
            format!(" ...{} ", display_path.chars().skip(skip).collect::<String>())
        } else {
            format!(" {} ", display_path)
        };

        let mut list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        );
        if self.is_active {
            list = list.highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
        }

        f.render_stateful_widget(list, area, &mut self.state);
    }
}

/// Relative start directories are resolved against the working directory.
fn absolute_dir(dir: PathBuf) -> PathBuf {
    if dir.is_absolute() {
        return dir;
    }
    std::fs::canonicalize(&dir)
        .or_else(|_| std::env::current_dir().map(|cwd| cwd.join(&dir)))
        .unwrap_or(dir)
}
