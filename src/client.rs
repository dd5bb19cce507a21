//! HTTP client for the remote validation service.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::{Fault, InputError};
use crate::file::FileDescriptor;
use crate::module::ValidationModule;

/// Path of the validation endpoint, relative to the base URL.
pub const VALIDATE_PATH: &str = "/api/jhove/validate";

/// Something that validates a file remotely and returns the decoded response.
#[async_trait]
pub trait ValidationService: Send + Sync {
    async fn submit(
        &self,
        file: &FileDescriptor,
        contents: Bytes,
        module: ValidationModule,
    ) -> Result<Value, Fault>;
}

/// `{base}/api/jhove/validate`, tolerating a trailing slash on the base.
pub fn endpoint_url(base_url: &str) -> Result<Url, InputError> {
    let joined = format!("{}{}", base_url.trim_end_matches('/'), VALIDATE_PATH);
    let url = Url::parse(&joined).map_err(|e| InputError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(InputError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

pub struct ValidationClient {
    client: Client,
    endpoint: Url,
}

impl ValidationClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, InputError> {
        let endpoint = endpoint_url(base_url)?;

        let mut builder = Client::builder()
            .user_agent(concat!("jhove-tui/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| InputError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: format!("cannot build HTTP client: {}", e),
        })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_form(
        &self,
        file: &FileDescriptor,
        contents: Bytes,
        module: ValidationModule,
    ) -> Result<Form, Fault> {
        let length = contents.len() as u64;
        let mut part = Part::stream_with_length(contents, length).file_name(file.name.clone());

        let hint = file.media_type_hint.as_str();
        if hint.parse::<mime_guess::mime::Mime>().is_ok() {
            part = part.mime_str(hint).map_err(|e| Fault::Transport {
                url: self.endpoint.to_string(),
                reason: format!("bad media type '{}': {}", hint, e),
            })?;
        } else if !hint.is_empty() {
            log::warn!("Ignoring unparseable media type hint '{}' for {}", hint, file.name);
        }

        Ok(Form::new()
            .part("file", part)
            .text("module", module.as_str()))
    }
}

#[async_trait]
impl ValidationService for ValidationClient {
    async fn submit(
        &self,
        file: &FileDescriptor,
        contents: Bytes,
        module: ValidationModule,
    ) -> Result<Value, Fault> {
        let form = self.build_form(file, contents, module)?;

        log::info!("POST {} (file={}, module={})", self.endpoint, file.name, module);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| Fault::Transport {
                url: self.endpoint.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Fault::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| Fault::Transport {
            url: self.endpoint.to_string(),
            reason: format!("reading response body: {}", e),
        })?;

        serde_json::from_slice(&body).map_err(|e| Fault::Decode { reason: e.to_string() })
    }
}
