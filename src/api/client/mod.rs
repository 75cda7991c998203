//! GraphQL client for the Jolt API.
//!
//! One request per call and no retries: a transport failure is returned to
//! the caller as [`JoltError::Request`], while any completed exchange is
//! classified into a [`QueryOutcome`].

mod transcript;

use log::debug;
use reqwest::header::HeaderMap;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use super::helpers::{build_headers, operation_name, payload_snippet};
use super::response::{HttpResponse, QueryOutcome, classify};
use super::types::{AuthToken, CompanyId, Endpoint, LocationScope, RequestEnvelope};
use crate::JoltError;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to build a [`JoltClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Endpoint,
    pub auth_token: AuthToken,
    pub company_id: CompanyId,
    /// Timeout covering connect, send and body read of the single request.
    pub request_timeout: Duration,
    /// Write a JSON-lines transcript of each exchange to this file.
    pub transcript: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            auth_token: AuthToken::default(),
            company_id: CompanyId::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            transcript: None,
        }
    }
}

/// Client for communicating with the Jolt GraphQL API.
///
/// The client carries the credential headers and optional request
/// transcription for debugging.
pub struct JoltClient {
    client: reqwest::Client,
    headers: HeaderMap,
    endpoint: Endpoint,
    request_timeout: Duration,
    transcript: Option<Mutex<BufWriter<std::fs::File>>>,
}

impl JoltClient {
    /// Create a client from a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns a [`JoltError`] if the transcript file cannot be created or a
    /// credential is not a valid header value.
    pub fn new(config: ClientConfig) -> Result<Self, JoltError> {
        let transcript = config
            .transcript
            .map(|p| std::fs::File::create(p).map(|file| Mutex::new(BufWriter::new(file))))
            .transpose()?;
        let headers = build_headers(&config.auth_token, &config.company_id)?;
        Ok(Self {
            client: reqwest::Client::new(),
            headers,
            endpoint: config.endpoint,
            request_timeout: config.request_timeout,
            transcript,
        })
    }

    /// Create a client targeting a custom endpoint with default options.
    ///
    /// This is primarily used in tests to point the client at a mock
    /// server.
    ///
    /// # Errors
    ///
    /// Returns a [`JoltError`] if a credential is not a valid header value.
    pub fn with_endpoint(
        token: impl Into<AuthToken>,
        company: impl Into<CompanyId>,
        endpoint: impl Into<Endpoint>,
    ) -> Result<Self, JoltError> {
        Self::new(ClientConfig {
            endpoint: endpoint.into(),
            auth_token: token.into(),
            company_id: company.into(),
            ..ClientConfig::default()
        })
    }

    /// POST `envelope` once and return the status code and body.
    ///
    /// Any status is returned as-is; only transport failures are errors.
    ///
    /// # Errors
    ///
    /// Returns [`JoltError::Request`] if the request cannot be sent or the
    /// response body cannot be read.
    pub async fn send(&self, envelope: &RequestEnvelope) -> Result<HttpResponse, JoltError> {
        let operation = operation_name(envelope.query.as_str()).unwrap_or("anonymous query");
        let make_ctx = |status: Option<u16>| {
            let base = format!("operation {operation} at {}", self.endpoint.as_str());
            match status {
                Some(s) => format!("{base}; status {s}"),
                None => base,
            }
            .into_boxed_str()
        };
        let payload = serde_json::to_value(envelope).map_err(|e| JoltError::Request {
            context: make_ctx(None),
            source: Box::new(e),
        })?;
        debug!("sending {operation}: {}", payload_snippet(&payload));

        let response = self
            .client
            .post(self.endpoint.as_str())
            .headers(self.headers.clone())
            .json(&payload)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| JoltError::Request {
                context: make_ctx(None),
                source: Box::new(e),
            })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| JoltError::Request {
            context: make_ctx(Some(status)),
            source: Box::new(e),
        })?;
        let resp = HttpResponse { status, body };
        debug!("{operation} returned status {status}");
        self.log_transcript(&payload, operation, &resp);
        Ok(resp)
    }

    /// Fetch the locations for `scope` and classify the reply.
    ///
    /// # Errors
    ///
    /// Returns [`JoltError::Request`] on transport failure, and
    /// [`JoltError::BadResponseSerde`] or [`JoltError::EmptyResponse`] when a
    /// `200` reply cannot be read as a location list.
    pub async fn fetch_locations(&self, scope: &LocationScope) -> Result<QueryOutcome, JoltError> {
        let envelope = RequestEnvelope::for_scope(scope);
        let operation = operation_name(envelope.query.as_str()).unwrap_or("anonymous query");
        let resp = self.send(&envelope).await?;
        classify(resp, scope, operation)
    }
}
