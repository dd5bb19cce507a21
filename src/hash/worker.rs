// Hash worker thread
// Receives jobs over a channel, replies on a per-job oneshot

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use bytes::Bytes;
use crossbeam_channel::{unbounded, Receiver, Sender};
use sha1::{Digest, Sha1};
use tokio::sync::oneshot;

use crate::error::Fault;

/// SHA-1 of `data` as lowercase hex.
pub fn sha1_hex(data: &[u8]) -> String {
    format!("{:x}", Sha1::digest(data))
}

/// Digest function run on the worker thread.
pub type DigestFn = fn(&[u8]) -> Result<String, String>;

fn sha1_digest(data: &[u8]) -> Result<String, String> {
    Ok(sha1_hex(data))
}

struct HashJob {
    id: u64,
    data: Bytes,
    reply: oneshot::Sender<HashReply>,
}

/// Worker answer: the digest, or the error payload it reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashReply {
    pub id: u64,
    pub result: Result<String, String>,
}

pub struct HashWorker {
    jobs: Option<Sender<HashJob>>,
    handle: Option<JoinHandle<()>>,
    next_id: AtomicU64,
}

impl HashWorker {
    pub fn spawn() -> std::io::Result<Self> {
        Self::spawn_with(sha1_digest)
    }

    /// Start a worker that answers every job with `digest`.
    pub fn spawn_with(digest: DigestFn) -> std::io::Result<Self> {
        let (tx, rx) = unbounded::<HashJob>();
        let handle = thread::Builder::new()
            .name("hash-worker".to_string())
            .spawn(move || run(rx, digest))?;

        Ok(Self {
            jobs: Some(tx),
            handle: Some(handle),
            next_id: AtomicU64::new(1),
        })
    }

    /// Submit bytes and suspend until the matching reply arrives.
    pub async fn request(&self, data: Bytes) -> Result<String, Fault> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply_tx, reply_rx) = oneshot::channel();

        let jobs = self.jobs.as_ref().ok_or_else(|| Fault::HashCompute {
            reason: "hash worker is shut down".to_string(),
        })?;
        jobs.send(HashJob { id, data, reply: reply_tx })
            .map_err(|_| Fault::HashCompute {
                reason: "hash worker is not running".to_string(),
            })?;

        let reply = reply_rx.await.map_err(|_| Fault::HashCompute {
            reason: format!("hash worker dropped request {}", id),
        })?;

        if reply.id != id {
            return Err(Fault::HashCompute {
                reason: format!("reply for request {} answered request {}", reply.id, id),
            });
        }
        reply.result.map_err(|reason| Fault::HashCompute { reason })
    }
}

impl Drop for HashWorker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run(jobs: Receiver<HashJob>, digest: DigestFn) {
    for job in jobs {
        let result = panic::catch_unwind(AssertUnwindSafe(|| digest(&job.data)))
            .unwrap_or_else(|payload| {
                Err(payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "hash computation panicked".to_string()))
            });

        log::debug!("hash-worker: request {} done ({} bytes)", job.id, job.data.len());
        // The requester may have given up; nothing to do then
        let _ = job.reply.send(HashReply { id: job.id, result });
    }
}
