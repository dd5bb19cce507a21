use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use crate::config::Config;
use crate::error::Fault;
use crate::file::{first_dropped, FileDescriptor};
use crate::module::ValidationModule;
use crate::pipeline::{IntakePipeline, ValidationOutcome};
use crate::session::{RunDisposition, RunToken, Session, View};
use crate::ui::FilePicker;

/// Which Home widget receives arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    Modules,
    Files,
}

type RunResult = (RunToken, Result<ValidationOutcome, Fault>);

pub struct App {
    pub session: Session,
    pub picker: FilePicker,
    pub focus: HomeFocus,
    pub message: String,
    pub should_quit: bool,
    pub base_url: String,
    /// File of the run currently in flight, for the status bar
    pub pending: Option<FileDescriptor>,
    pub report_scroll: u16,
    pipeline: IntakePipeline,
    results_tx: mpsc::UnboundedSender<RunResult>,
    results_rx: mpsc::UnboundedReceiver<RunResult>,
}

impl App {
    pub fn new(config: &Config, pipeline: IntakePipeline, start_dir: PathBuf) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        let mut picker = FilePicker::new(start_dir);
        picker.is_active = false;

        Self {
            session: Session::new(config.default_module),
            picker,
            focus: HomeFocus::Modules,
            message: "Select a module, then choose a file or drop one onto the terminal".to_string(),
            should_quit: false,
            base_url: config.base_url.clone(),
            pending: None,
            report_scroll: 0,
            pipeline,
            results_tx,
            results_rx,
        }
    }

    pub fn navigate(&mut self, view: View) {
        self.session.navigate(view);
        if view == View::Analyse {
            self.report_scroll = 0;
        }
    }

    pub fn cycle_view(&mut self) {
        let next = View::ALL[(self.session.view().index() + 1) % View::ALL.len()];
        self.navigate(next);
    }

    pub fn set_focus(&mut self, focus: HomeFocus) {
        self.focus = focus;
        self.picker.is_active = focus == HomeFocus::Files;
    }

    pub fn toggle_focus(&mut self) {
        match self.focus {
            HomeFocus::Modules => self.set_focus(HomeFocus::Files),
            HomeFocus::Files => self.set_focus(HomeFocus::Modules),
        }
    }

    pub fn select_module(&mut self, module: ValidationModule) {
        self.session.select_module(module);
        self.message = format!("Module: {}", module);
    }

    /// Handle pasted text as a drop. Returns false when nothing was dropped.
    pub fn handle_drop(&mut self, text: &str) -> bool {
        match first_dropped(text) {
            Some(path) => {
                self.start_intake(&path);
                true
            }
            None => false,
        }
    }

    /// Start an intake run for `path` with the module selected right now.
    pub fn start_intake(&mut self, path: &Path) {
        let file = match FileDescriptor::from_path(path) {
            Ok(file) => file,
            Err(e) => {
                log::error!("Cannot use {}: {}", path.display(), e);
                self.message = format!("✗ {}", e.to_string().lines().next().unwrap_or_default());
                return;
            }
        };

        let module = self.session.selected_module();
        let token = self.session.begin_run();
        self.message = format!(
            "Processing {} ({}) with {}...",
            file.name,
            humansize::format_size(file.size, humansize::BINARY),
            module
        );
        self.pending = Some(file.clone());

        let pipeline = self.pipeline.clone();
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let result = pipeline.process(&file, module).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send((token, result));
        });
    }

    /// Apply finished runs (non-blocking).
    pub fn poll_results(&mut self) {
        while let Ok((token, result)) = self.results_rx.try_recv() {
            let name = result.as_ref().ok().map(|o| o.file.name.clone());
            match self.session.complete_run(token, result) {
                RunDisposition::Applied => {
                    self.pending = None;
                    self.report_scroll = 0;
                    self.message = format!("✓ Validated {}", name.unwrap_or_default());
                }
                RunDisposition::Failed => {
                    self.pending = None;
                    let summary = self.session.last_fault().unwrap_or("run failed").to_string();
                    self.message = format!("✗ {}", summary);
                }
                RunDisposition::Stale => {}
            }
        }
    }

    pub fn scroll_report(&mut self, delta: i32) {
        let next = self.report_scroll as i32 + delta;
        self.report_scroll = next.clamp(0, u16::MAX as i32) as u16;
    }
}
