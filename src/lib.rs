// Library module for jhove-tui
// Re-exports modules for use in integration tests and the binary

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod file;
pub mod hash;
pub mod logging;
pub mod module;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod session;
pub mod ui;

pub use client::{ValidationClient, ValidationService};
pub use error::{Fault, FaultKind, InputError};
pub use file::FileDescriptor;
pub use module::ValidationModule;
pub use normalize::{normalize, NormalizedResult, Verdict};
pub use pipeline::{IntakePipeline, ValidationOutcome};
pub use session::{RunDisposition, RunToken, Session, View};
