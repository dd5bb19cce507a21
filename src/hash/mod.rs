//! Content digests computed off the interactive thread.
//!
//! The file is read fully into memory, then hashed on a dedicated worker
//! thread. Callers await a single reply keyed by request id.

pub mod worker;

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;

use crate::error::Fault;

pub use worker::{sha1_hex, DigestFn, HashReply, HashWorker};

/// Length of a SHA-1 digest rendered as hex.
pub const DIGEST_HEX_LEN: usize = 40;

/// Front end to the hash worker. Cheap to clone; all clones share one worker.
#[derive(Clone)]
pub struct HashEngine {
    worker: Arc<HashWorker>,
}

impl HashEngine {
    pub fn new() -> Result<Self, Fault> {
        let worker = HashWorker::spawn().map_err(|e| Fault::HashCompute {
            reason: format!("cannot start hash worker: {}", e),
        })?;
        Ok(Self::with_worker(worker))
    }

    pub fn with_worker(worker: HashWorker) -> Self {
        Self { worker: Arc::new(worker) }
    }

    /// Read the whole file into one shared buffer.
    pub async fn read_contents(path: &Path) -> Result<Bytes, Fault> {
        let data = tokio::fs::read(path).await.map_err(|source| Fault::HashRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Bytes::from(data))
    }

    /// Hash bytes already in memory. Exactly one worker request per call.
    pub async fn digest(&self, data: Bytes) -> Result<String, Fault> {
        self.worker.request(data).await
    }

    pub async fn compute_digest(&self, path: &Path) -> Result<String, Fault> {
        let data = Self::read_contents(path).await?;
        self.digest(data).await
    }
}
