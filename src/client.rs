use std::env;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, Response};
use url::Url;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{
    CLIENT_CONNECTION_ERRORS, CLIENT_PROBE_FAILURES, CLIENT_PROBES, CLIENT_REQUEST_DURATION,
    CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS, CLIENT_TIMEOUTS,
};
use crate::transport::ChatTransport;
use crate::types::{ChatRequest, ChatResponse};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment variable consulted for the base URL.
pub const BASE_URL_ENV: &str = "ADVISOR_CHAT_BASE_URL";

/// Per-request deadline for chat exchanges.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const CHAT_PATH: &str = "api/chat";

/// HTTP client for the advisor chat service.
#[derive(Clone)]
pub struct ChatClient {
    client: ReqwestClient,
    endpoint: Url,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl ChatClient {
    /// Create a new client.
    ///
    /// The base URL can be provided directly or read from the
    /// `ADVISOR_CHAT_BASE_URL` environment variable, falling back to
    /// `http://localhost:5000`.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };
        let endpoint = chat_endpoint(&base_url)?;

        let client = ReqwestClient::builder().build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            endpoint,
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
            logger: None,
        })
    }

    /// Attach a logger that sees every request, response, and failure.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The full URL of the chat endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The per-request deadline for [`ChatTransport::send`].
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            CLIENT_TIMEOUTS.click();
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            CLIENT_CONNECTION_ERRORS.click();
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    fn log_error(&self, err: &Error) {
        if let Some(logger) = &self.logger {
            logger.log_error(err);
        }
    }

    async fn exchange(&self, request: ChatRequest) -> Result<ChatResponse> {
        let mut form = Form::new();
        for (name, value) in request.text_fields() {
            form = form.text(name, value);
        }
        for file in &request.files {
            let part = Part::stream(file.data().clone()).file_name(file.name().to_string());
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(self.endpoint.clone())
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status().is_success() {
            return Err(process_error_response(response).await);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

#[async_trait::async_trait]
impl ChatTransport for ChatClient {
    async fn probe(&self) -> Result<()> {
        CLIENT_PROBES.click();
        let result = self
            .client
            .post(self.endpoint.clone())
            .json(&serde_json::json!({ "message": "test" }))
            .send()
            .await;
        let outcome = match result {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(Error::api(response.status().as_u16(), None)),
            Err(e) => Err(self.map_transport_error(e)),
        };
        if let Err(err) = &outcome {
            CLIENT_PROBE_FAILURES.click();
            self.log_error(err);
        }
        outcome
    }

    async fn send(&self, request: ChatRequest) -> Result<ChatResponse> {
        CLIENT_REQUESTS.click();
        if let Some(logger) = &self.logger {
            logger.log_request(&request);
        }
        let start = Instant::now();
        let outcome = self.exchange(request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        match &outcome {
            Ok(response) => {
                if let Some(logger) = &self.logger {
                    logger.log_response(response);
                }
            }
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                self.log_error(err);
            }
        }
        outcome
    }
}

/// Resolve `{base_url}/api/chat`, keeping any path prefix on the base.
fn chat_endpoint(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(CHAT_PATH)?)
}

/// Convert a non-success response into an error.  The body is kept for
/// diagnostics but not interpreted.
async fn process_error_response(response: Response) -> Error {
    let status_code = response.status().as_u16();
    let body = response.text().await.ok().filter(|body| !body.is_empty());
    Error::api(status_code, body)
}
