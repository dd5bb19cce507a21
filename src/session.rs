//! Navigation state and the single displayed outcome.
//!
//! Runs are tagged with strictly increasing tokens. Only the most recently
//! started run may change what is displayed; late replies from superseded
//! runs are dropped.

use crate::error::Fault;
use crate::module::ValidationModule;
use crate::pipeline::ValidationOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Analyse,
    About,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::Analyse, View::About];

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Analyse => "Analyse",
            View::About => "About",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Home => 0,
            View::Analyse => 1,
            View::About => 2,
        }
    }
}

/// Identifies one intake run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunToken(u64);

impl RunToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// What `complete_run` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunDisposition {
    /// Latest run succeeded; outcome stored and Analyse shown
    Applied,
    /// Latest run faulted; nothing displayed changed
    Failed,
    /// A newer run was started meanwhile; result discarded
    Stale,
}

#[derive(Debug, Default)]
pub struct Session {
    view: View,
    selected_module: ValidationModule,
    outcome: Option<ValidationOutcome>,
    issued: u64,
    latest: Option<RunToken>,
    latest_done: bool,
    last_fault: Option<String>,
}

impl Session {
    pub fn new(selected_module: ValidationModule) -> Self {
        Self {
            selected_module,
            ..Self::default()
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// User navigation; always allowed.
    pub fn navigate(&mut self, view: View) {
        self.view = view;
    }

    pub fn selected_module(&self) -> ValidationModule {
        self.selected_module
    }

    pub fn select_module(&mut self, module: ValidationModule) {
        self.selected_module = module;
    }

    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        self.outcome.as_ref()
    }

    /// Summary of the most recent fault, cleared when a new run starts.
    pub fn last_fault(&self) -> Option<&str> {
        self.last_fault.as_deref()
    }

    /// True while the most recently started run has not reported back.
    pub fn in_flight(&self) -> bool {
        self.latest.is_some() && !self.latest_done
    }

    /// Start a run; any earlier run still in flight is superseded.
    pub fn begin_run(&mut self) -> RunToken {
        self.issued += 1;
        let token = RunToken(self.issued);
        if self.in_flight() {
            log::info!("Run {} supersedes run {}", token.0, self.issued - 1);
        }
        self.latest = Some(token);
        self.latest_done = false;
        self.last_fault = None;
        token
    }

    pub fn complete_run(
        &mut self,
        token: RunToken,
        result: Result<ValidationOutcome, Fault>,
    ) -> RunDisposition {
        if self.latest != Some(token) || self.latest_done {
            log::debug!("Discarding result of superseded run {}", token.0);
            return RunDisposition::Stale;
        }
        self.latest_done = true;

        match result {
            Ok(outcome) => {
                self.outcome = Some(outcome);
                self.view = View::Analyse;
                RunDisposition::Applied
            }
            Err(fault) => {
                log::error!("Error processing file (run {}): {}", token.0, fault);
                self.last_fault = Some(fault.summary());
                RunDisposition::Failed
            }
        }
    }
}
