//! The network capability a chat session depends on.
//!
//! [`ChatSession`](crate::chat::ChatSession) never talks HTTP directly; it is
//! handed a [`ChatTransport`].  [`ChatClient`](crate::ChatClient) is the real
//! implementation, and tests substitute fakes that record requests.

use std::sync::Arc;

use crate::error::Result;
use crate::types::{ChatRequest, ChatResponse};

/// Sends chat exchanges to the service.
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    /// Check that the service is reachable.
    ///
    /// Succeeds when the service answered with a success status.
    async fn probe(&self) -> Result<()>;

    /// Post one exchange and decode the service's answer.
    ///
    /// A non-success status is reported as [`Error::Api`](crate::Error::Api).
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse>;
}

#[async_trait::async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn probe(&self) -> Result<()> {
        (**self).probe().await
    }

    async fn send(&self, request: ChatRequest) -> Result<ChatResponse> {
        (**self).send(request).await
    }
}

#[async_trait::async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Box<T> {
    async fn probe(&self) -> Result<()> {
        (**self).probe().await
    }

    async fn send(&self, request: ChatRequest) -> Result<ChatResponse> {
        (**self).send(request).await
    }
}
