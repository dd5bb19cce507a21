// Tests for the intake pipeline and its interaction with the session

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use jhove_tui::hash::{sha1_hex, HashEngine, HashWorker};
use jhove_tui::{
    Fault, FaultKind, FileDescriptor, IntakePipeline, RunDisposition, Session, ValidationClient,
    ValidationModule, ValidationService, Verdict, View,
};
use serde_json::{json, Value};

use crate::support::{serve_once, write_file};

/// Canned service that records what it was asked to validate.
struct FakeService {
    reply: fn() -> Result<Value, Fault>,
    delay: Duration,
    calls: Mutex<Vec<(String, usize, ValidationModule)>>,
}

impl FakeService {
    fn new(reply: fn() -> Result<Value, Fault>) -> Self {
        Self { reply, delay: Duration::ZERO, calls: Mutex::new(Vec::new()) }
    }

    fn slow(reply: fn() -> Result<Value, Fault>, delay: Duration) -> Self {
        Self { delay, ..Self::new(reply) }
    }
}

#[async_trait]
impl ValidationService for FakeService {
    async fn submit(
        &self,
        file: &FileDescriptor,
        contents: Bytes,
        module: ValidationModule,
    ) -> Result<Value, Fault> {
        self.calls.lock().unwrap().push((file.name.clone(), contents.len(), module));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.reply)()
    }
}

fn jhove_reply() -> Result<Value, Fault> {
    Ok(json!({
        "mimeType": "application/pdf",
        "format": "PDF",
        "size": 10,
        "valid": 1,
        "wellFormed": 1,
        "validMessage": "",
        "messages": [{"message": "a"}, {"message": "b"}],
        "version": "1.4",
        "checksums": [{"type": "MD5", "value": "x"}]
    }))
}

fn server_error() -> Result<Value, Fault> {
    Err(Fault::HttpStatus { status: 500, reason: "Internal Server Error".to_string() })
}

fn pipeline(service: Arc<dyn ValidationService>) -> IntakePipeline {
    IntakePipeline::new(HashEngine::new().unwrap(), service)
}

#[tokio::test]
async fn test_success_builds_complete_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let (_, file) = write_file(&dir, "doc.pdf", b"0123456789");
    let service = Arc::new(FakeService::new(jhove_reply));

    let outcome = pipeline(service.clone())
        .process(&file, ValidationModule::Pdf)
        .await
        .unwrap();

    assert_eq!(outcome.checksum, sha1_hex(b"0123456789"));
    assert_eq!(outcome.module_used, ValidationModule::Pdf);
    assert_eq!(outcome.file, file);
    // Extra fields survive untouched
    assert_eq!(outcome.raw_response["version"], "1.4");
    assert_eq!(outcome.raw_response, jhove_reply().unwrap());

    assert_eq!(outcome.normalized.valid, Verdict::Yes);
    assert_eq!(outcome.normalized.size_text, "10 bytes");
    assert_eq!(outcome.normalized.messages_text, "a; b");
    assert_eq!(outcome.normalized.valid_message, "N/A");
    assert_eq!(outcome.normalized, jhove_tui::normalize(&outcome.raw_response));

    let calls = service.calls.lock().unwrap();
    assert_eq!(calls.as_slice(), &[("doc.pdf".to_string(), 10, ValidationModule::Pdf)]);
}

#[tokio::test]
async fn test_service_fault_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let (_, file) = write_file(&dir, "doc.pdf", b"0123456789");

    let fault = pipeline(Arc::new(FakeService::new(server_error)))
        .process(&file, ValidationModule::Pdf)
        .await
        .unwrap_err();
    assert_eq!(fault.kind(), FaultKind::Transport);
}

#[tokio::test]
async fn test_hash_fault_aborts_run_even_when_service_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let (_, file) = write_file(&dir, "doc.pdf", b"0123456789");
    let worker = HashWorker::spawn_with(|_| Err("digest unavailable".to_string())).unwrap();
    let service = Arc::new(FakeService::new(jhove_reply));
    let pipeline = IntakePipeline::new(HashEngine::with_worker(worker), service.clone());

    let mut session = Session::default();
    session.navigate(View::About);
    let token = session.begin_run();
    let result = pipeline.process(&file, ValidationModule::Pdf).await;

    let fault = result.as_ref().unwrap_err();
    assert_eq!(fault.kind(), FaultKind::HashCompute);
    assert_eq!(session.complete_run(token, result), RunDisposition::Failed);
    assert!(session.outcome().is_none());
    assert_eq!(session.view(), View::About);
    assert!(session.last_fault().unwrap().contains("digest unavailable"));
}

#[tokio::test]
async fn test_unreadable_file_never_reaches_service() {
    let dir = tempfile::tempdir().unwrap();
    let (path, file) = write_file(&dir, "doc.pdf", b"0123456789");
    std::fs::remove_file(&path).unwrap();
    let service = Arc::new(FakeService::new(jhove_reply));

    let fault = pipeline(service.clone())
        .process(&file, ValidationModule::Pdf)
        .await
        .unwrap_err();

    assert_eq!(fault.kind(), FaultKind::HashRead);
    assert!(service.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_http_500_leaves_session_untouched() {
    let (base_url, _captured) = serve_once("500 Internal Server Error", "{}").await;
    let dir = tempfile::tempdir().unwrap();
    let (_, file) = write_file(&dir, "doc.pdf", b"0123456789");
    let client = ValidationClient::new(&base_url, None).unwrap();

    let mut session = Session::default();
    session.navigate(View::About);
    let token = session.begin_run();
    let result = pipeline(Arc::new(client)).process(&file, ValidationModule::Pdf).await;

    assert_eq!(session.complete_run(token, result), RunDisposition::Failed);
    assert_eq!(session.view(), View::About);
    assert!(session.outcome().is_none());
}

#[tokio::test]
async fn test_end_to_end_against_http_responder() {
    let body = r#"{"mimeType":"application/pdf","format":"PDF","size":10,"valid":1,"wellFormed":1,"messages":[]}"#;
    let (base_url, captured) = serve_once("200 OK", body).await;
    let dir = tempfile::tempdir().unwrap();
    let (_, file) = write_file(&dir, "doc.pdf", b"0123456789");
    let client = ValidationClient::new(&base_url, None).unwrap();

    let mut session = Session::new(ValidationModule::Pdf);
    let token = session.begin_run();
    let result = pipeline(Arc::new(client))
        .process(&file, session.selected_module())
        .await;

    assert_eq!(session.complete_run(token, result), RunDisposition::Applied);
    assert_eq!(session.view(), View::Analyse);
    let outcome = session.outcome().unwrap();
    assert_eq!(outcome.normalized.mime_type, "application/pdf");
    assert_eq!(outcome.normalized.messages_text, "None");

    let request = captured.await.unwrap();
    assert_eq!(request.field("module").unwrap(), b"PDF-hul");
    assert_eq!(request.field("file").unwrap(), b"0123456789");
    assert_eq!(outcome.checksum, sha1_hex(b"0123456789"));
}

#[tokio::test]
async fn test_module_is_captured_at_call_time() {
    let dir = tempfile::tempdir().unwrap();
    let (_, file) = write_file(&dir, "a.tif", b"II*\0");
    let service = Arc::new(FakeService::slow(jhove_reply, Duration::from_millis(50)));

    let mut session = Session::new(ValidationModule::Tiff);
    let token = session.begin_run();
    let run = {
        let pipeline = pipeline(service.clone());
        let file = file.clone();
        let module = session.selected_module();
        tokio::spawn(async move { pipeline.process(&file, module).await })
    };
    session.select_module(ValidationModule::Jpeg);

    let outcome = run.await.unwrap().unwrap();
    assert_eq!(outcome.module_used, ValidationModule::Tiff);
    assert_eq!(service.calls.lock().unwrap()[0].2, ValidationModule::Tiff);
    assert_eq!(session.complete_run(token, Ok(outcome)), RunDisposition::Applied);
}

#[tokio::test]
async fn test_superseded_run_result_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let (_, first) = write_file(&dir, "first.pdf", b"first");
    let (_, second) = write_file(&dir, "second.pdf", b"second");
    let slow = pipeline(Arc::new(FakeService::slow(jhove_reply, Duration::from_millis(200))));
    let fast = pipeline(Arc::new(FakeService::new(jhove_reply)));

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut session = Session::default();

    let token1 = session.begin_run();
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send((token1, slow.process(&first, ValidationModule::Pdf).await));
        });
    }
    let token2 = session.begin_run();
    tokio::spawn(async move {
        let _ = tx.send((token2, fast.process(&second, ValidationModule::Pdf).await));
    });

    let mut dispositions = Vec::new();
    while let Some((token, result)) = rx.recv().await {
        dispositions.push((token, session.complete_run(token, result)));
        if dispositions.len() == 2 {
            break;
        }
    }

    assert_eq!(
        dispositions,
        vec![(token2, RunDisposition::Applied), (token1, RunDisposition::Stale)]
    );
    assert_eq!(session.outcome().unwrap().file.name, "second.pdf");
}
