//! Logging trait for chat client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! and log every exchange passing through the [`ChatClient`](crate::ChatClient).

use crate::{ChatRequest, ChatResponse, Error};

/// A trait for logging chat client operations.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use advisor_chat::{ChatClient, ChatRequest, ChatResponse, ClientLogger, Error};
///
/// struct StderrLogger;
///
/// impl ClientLogger for StderrLogger {
///     fn log_request(&self, request: &ChatRequest) {
///         eprintln!("-> mode={} files={}", request.mode, request.files.len());
///     }
///
///     fn log_response(&self, response: &ChatResponse) {
///         eprintln!("<- conversation={:?}", response.conversation_id());
///     }
///
///     fn log_error(&self, error: &Error) {
///         eprintln!("!! {error}");
///     }
/// }
///
/// let client = ChatClient::new(Some("http://localhost:5000".to_string()))?
///     .with_logger(Arc::new(StderrLogger));
/// assert_eq!(client.endpoint().as_str(), "http://localhost:5000/api/chat");
/// # Ok::<(), Error>(())
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log an outgoing exchange, before it is sent.
    fn log_request(&self, request: &ChatRequest);

    /// Log the decoded body of a successful exchange.
    fn log_response(&self, response: &ChatResponse);

    /// Log a failed exchange or probe.
    fn log_error(&self, error: &Error);
}
