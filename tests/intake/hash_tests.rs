// Tests for the hash engine: digests of files on disk, read faults

use bytes::Bytes;
use jhove_tui::hash::{sha1_hex, HashEngine, HashWorker, DIGEST_HEX_LEN};
use jhove_tui::FaultKind;
use std::io::Write;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_digest_is_deterministic_lowercase_hex() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"The quick brown fox jumps over the lazy dog").unwrap();

    let engine = HashEngine::new().unwrap();
    let first = engine.compute_digest(file.path()).await.unwrap();
    let second = engine.compute_digest(file.path()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first, "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12");
    assert_eq!(first.len(), DIGEST_HEX_LEN);
    assert!(first.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[tokio::test]
async fn test_identical_bytes_in_different_files_match() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("renamed.tif");
    std::fs::write(&a, b"same bytes").unwrap();
    std::fs::write(&b, b"same bytes").unwrap();

    let engine = HashEngine::new().unwrap();
    assert_eq!(
        engine.compute_digest(&a).await.unwrap(),
        engine.compute_digest(&b).await.unwrap()
    );
}

#[tokio::test]
async fn test_empty_file() {
    let file = NamedTempFile::new().unwrap();
    let engine = HashEngine::new().unwrap();
    assert_eq!(
        engine.compute_digest(file.path()).await.unwrap(),
        "da39a3ee5e6b4b0d3255bfef95601890afd80709"
    );
}

#[tokio::test]
async fn test_large_file_read_whole() {
    let data: Vec<u8> = (0..8 * 1024 * 1024u32).map(|i| (i % 251) as u8).collect();
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&data).unwrap();

    let engine = HashEngine::new().unwrap();
    assert_eq!(engine.compute_digest(file.path()).await.unwrap(), sha1_hex(&data));
}

#[tokio::test]
async fn test_missing_file_is_read_fault() {
    let dir = tempfile::tempdir().unwrap();
    let engine = HashEngine::new().unwrap();

    let fault = engine
        .compute_digest(&dir.path().join("vanished.pdf"))
        .await
        .unwrap_err();
    assert_eq!(fault.kind(), FaultKind::HashRead);
    assert!(fault.to_string().contains("vanished.pdf"));
}

#[tokio::test]
async fn test_engine_clones_share_worker() {
    let engine = HashEngine::new().unwrap();
    let clone = engine.clone();
    let data = Bytes::from_static(b"abc");

    let (a, b) = tokio::join!(engine.digest(data.clone()), clone.digest(data));
    assert_eq!(a.unwrap(), b.unwrap());
}

#[tokio::test]
async fn test_worker_error_is_compute_fault() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"abc").unwrap();

    let worker = HashWorker::spawn_with(|_| Err("digest unavailable".to_string())).unwrap();
    let engine = HashEngine::with_worker(worker);

    let fault = engine.digest(Bytes::from_static(b"abc")).await.unwrap_err();
    assert_eq!(fault.kind(), FaultKind::HashCompute);

    let fault = engine.compute_digest(file.path()).await.unwrap_err();
    assert_eq!(fault.kind(), FaultKind::HashCompute);
    assert!(fault.to_string().contains("digest unavailable"));
}
