//! The remote chat endpoint, seen from the dispatcher.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::api::{ChatMessage, ChatReply, ChatRequest, ErrorBody};
use crate::core::errors::ExchangeError;
use crate::core::settings::ClientSettings;

/// Something that turns an outbound context into a reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, context: Vec<ChatMessage>) -> Result<String, ExchangeError>;
}

/// `POST {api_base}/api/chat` over HTTP with a JSON body.
#[derive(Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpChatBackend {
    pub fn new(settings: &ClientSettings) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, settings))
    }

    /// Use a prebuilt client; its own timeout configuration is left as is.
    pub fn with_client(client: reqwest::Client, settings: &ClientSettings) -> Self {
        Self {
            client,
            endpoint: settings.chat_url(),
            timeout: settings.request_timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> ExchangeError {
        if err.is_timeout() {
            let secs = self.timeout.map(|t| t.as_secs()).unwrap_or_default();
            return ExchangeError::unknown(format!("Request timed out after {secs}s"));
        }
        ExchangeError::network(err.to_string())
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn complete(&self, context: Vec<ChatMessage>) -> Result<String, ExchangeError> {
        let request = ChatRequest { messages: context };
        debug!(
            endpoint = %self.endpoint,
            messages = request.messages.len(),
            "sending chat request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.detail);
            debug!(status = status.as_u16(), ?detail, "chat request rejected");
            return Err(ExchangeError::application(status.as_u16(), detail));
        }

        let reply: ChatReply = serde_json::from_str(&body)
            .map_err(|err| ExchangeError::unknown(format!("Malformed reply from server: {err}")))?;
        if reply.reply.is_empty() {
            return Err(ExchangeError::unknown("Empty reply from server"));
        }
        Ok(reply.reply)
    }
}
