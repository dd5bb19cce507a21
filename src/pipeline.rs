//! One file in, one validation outcome out.

use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

use crate::client::ValidationService;
use crate::error::Fault;
use crate::file::FileDescriptor;
use crate::hash::HashEngine;
use crate::module::ValidationModule;
use crate::normalize::{normalize, NormalizedResult};

/// Result of one fully successful intake run. Never built from partial results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub file: FileDescriptor,
    pub checksum: String,
    pub module_used: ValidationModule,
    /// Response exactly as the service returned it
    pub raw_response: Value,
    pub normalized: NormalizedResult,
    pub completed_at: DateTime<Local>,
}

impl ValidationOutcome {
    pub fn new(
        file: FileDescriptor,
        checksum: String,
        module_used: ValidationModule,
        raw_response: Value,
    ) -> Self {
        let normalized = normalize(&raw_response);
        Self {
            file,
            checksum,
            module_used,
            raw_response,
            normalized,
            completed_at: Local::now(),
        }
    }
}

#[derive(Clone)]
pub struct IntakePipeline {
    hasher: HashEngine,
    service: Arc<dyn ValidationService>,
}

impl IntakePipeline {
    pub fn new(hasher: HashEngine, service: Arc<dyn ValidationService>) -> Self {
        Self { hasher, service }
    }

    /// Hash and submit `file` with `module`.
    ///
    /// Hashing and submission run concurrently; the first fault from either
    /// aborts the run.
    pub async fn process(
        &self,
        file: &FileDescriptor,
        module: ValidationModule,
    ) -> Result<ValidationOutcome, Fault> {
        log::info!("Processing {} ({} bytes) with {}", file.name, file.size, module);

        let contents = HashEngine::read_contents(&file.path).await?;

        let digest = self.hasher.digest(contents.clone());
        let submission = self.service.submit(file, contents, module);
        let (checksum, raw_response) = futures::future::try_join(digest, submission).await?;

        log::debug!("API result for {}: {}", file.name, raw_response);

        let outcome = ValidationOutcome::new(file.clone(), checksum, module, raw_response);
        log::info!(
            "Validated {}: valid={}, well-formed={}, sha1={}",
            file.name,
            outcome.normalized.valid,
            outcome.normalized.well_formed,
            outcome.checksum
        );
        Ok(outcome)
    }
}
