//! reqwest による Transport 実装

use crate::error::{LegalEaseError, Result};
use legalease_common::{
    check_status, parse_body, ClientConfig, Endpoint, FileUpload, Transport, TransportError,
    FILE_FIELD,
};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LegalEaseError::HttpClient(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> std::result::Result<Value, TransportError> {
        let response = request.send().await.map_err(|e| self.send_error(e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        debug!(status, bytes = body.len(), "response received");

        let body = check_status(status, body)?;
        parse_body(&body)
    }

    fn send_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_connect() {
            TransportError::BackendUnreachable {
                base_url: self.config.base_url().to_string(),
            }
        } else if error.is_timeout() {
            TransportError::Network("request timed out".to_string())
        } else {
            TransportError::Network(error.to_string())
        }
    }
}

impl Transport for HttpTransport {
    async fn post_json(
        &self,
        endpoint: Endpoint,
        body: &Value,
    ) -> std::result::Result<Value, TransportError> {
        let url = self.config.endpoint_url(endpoint);
        debug!(%url, "POST json");
        self.send(self.client.post(url).json(body)).await
    }

    async fn post_multipart(
        &self,
        endpoint: Endpoint,
        upload: &FileUpload,
    ) -> std::result::Result<Value, TransportError> {
        let url = self.config.endpoint_url(endpoint);
        debug!(%url, file = %upload.filename, bytes = upload.bytes.len(), "POST multipart");

        let mut part = Part::bytes(upload.bytes.clone()).file_name(upload.filename.clone());
        if let Some(mime) = upload.mime_hint.as_deref() {
            part = part
                .mime_str(mime)
                .map_err(|e| TransportError::Network(e.to_string()))?;
        }
        let form = Form::new().part(FILE_FIELD, part);
        self.send(self.client.post(url).multipart(form)).await
    }

    async fn get_json(&self, endpoint: Endpoint) -> std::result::Result<Value, TransportError> {
        let url = self.config.endpoint_url(endpoint);
        debug!(%url, "GET");
        self.send(self.client.get(url)).await
    }
}
