// Tests for the HTTP client against a local responder

use bytes::Bytes;
use crate::support::{dead_base_url, serve_once, write_file};
use jhove_tui::{Fault, FaultKind, ValidationClient, ValidationModule, ValidationService};
use serde_json::json;

#[tokio::test]
async fn test_form_carries_module_and_file_bytes() {
    let (base_url, captured) = serve_once("200 OK", r#"{"valid": 1}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let (_, file) = write_file(&dir, "doc.pdf", b"%PDF-1.4\n%");

    let client = ValidationClient::new(&base_url, None).unwrap();
    client
        .submit(&file, Bytes::from_static(b"%PDF-1.4\n%"), ValidationModule::Pdf)
        .await
        .unwrap();

    let request = captured.await.unwrap();
    assert_eq!(request.request_line(), "POST /api/jhove/validate HTTP/1.1");
    assert!(request
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));
    // The shared buffer is sent with a known length, not chunked
    assert!(request.header("content-length").is_some());

    assert_eq!(request.parts().len(), 2);
    assert_eq!(request.field("module").unwrap(), b"PDF-hul");
    let file_part = request.field("file").unwrap();
    assert_eq!(file_part.len(), 10);
    assert_eq!(file_part, b"%PDF-1.4\n%");

    let file_headers = request.part_headers("file").unwrap();
    assert!(file_headers.contains("filename=\"doc.pdf\""));
    assert!(file_headers.contains("application/pdf"));
}

#[tokio::test]
async fn test_response_returned_unmodified() {
    let body = r#"{"zeta": [1, 2], "valid": 0, "mimeType": "image/gif", "release": {"date": "2024-01-01"}}"#;
    let (base_url, _captured) = serve_once("200 OK", body).await;
    let dir = tempfile::tempdir().unwrap();
    let (_, file) = write_file(&dir, "a.gif", b"GIF89a");

    let client = ValidationClient::new(&base_url, None).unwrap();
    let raw = client.submit(&file, Bytes::from_static(b"GIF89a"), ValidationModule::Gif).await.unwrap();

    assert_eq!(raw, serde_json::from_str::<serde_json::Value>(body).unwrap());
    assert_eq!(raw["release"], json!({"date": "2024-01-01"}));
    // Key order is kept for display
    let keys: Vec<&String> = raw.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["zeta", "valid", "mimeType", "release"]);
}

#[tokio::test]
async fn test_non_2xx_is_transport_fault_with_status() {
    let (base_url, _captured) = serve_once("500 Internal Server Error", "{}").await;
    let dir = tempfile::tempdir().unwrap();
    let (_, file) = write_file(&dir, "doc.pdf", b"0123456789");

    let client = ValidationClient::new(&base_url, None).unwrap();
    let fault = client
        .submit(&file, Bytes::from_static(b"0123456789"), ValidationModule::Pdf)
        .await
        .unwrap_err();

    assert_eq!(fault.kind(), FaultKind::Transport);
    match fault {
        Fault::HttpStatus { status, reason } => {
            assert_eq!(status, 500);
            assert_eq!(reason, "Internal Server Error");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_body_is_decode_fault() {
    let (base_url, _captured) = serve_once("200 OK", "<html>not json</html>").await;
    let dir = tempfile::tempdir().unwrap();
    let (_, file) = write_file(&dir, "doc.xml", b"<a/>");

    let client = ValidationClient::new(&base_url, None).unwrap();
    let fault = client
        .submit(&file, Bytes::from_static(b"<a/>"), ValidationModule::Xml)
        .await
        .unwrap_err();
    assert_eq!(fault.kind(), FaultKind::Decode);
}

#[tokio::test]
async fn test_unreachable_service_is_transport_fault() {
    let base_url = dead_base_url().await;
    let dir = tempfile::tempdir().unwrap();
    let (_, file) = write_file(&dir, "doc.pdf", b"x");

    let client = ValidationClient::new(&base_url, None).unwrap();
    let fault = client.submit(&file, Bytes::from_static(b"x"), ValidationModule::Pdf).await.unwrap_err();

    assert!(matches!(fault, Fault::Transport { .. }));
    assert_eq!(fault.kind(), FaultKind::Transport);
}
