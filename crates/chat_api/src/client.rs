use std::future::Future;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::config::ChatApiConfig;
use crate::error::{ChatApiError, TransportError, TransportErrorKind};
use crate::headers::build_headers;
use crate::payload::ChatRequest;
use crate::transport::{ChatTransport, HttpReply};
use crate::url::{chat_endpoint, health_endpoint, validate_origin};

/// `reqwest`-backed [`ChatTransport`]. Each call is a single HTTP exchange; the
/// retry loop lives in [`crate::Dispatcher`].
#[derive(Debug, Clone)]
pub struct ChatApiClient {
    http: Client,
    config: ChatApiConfig,
}

impl ChatApiClient {
    pub fn new(config: ChatApiConfig) -> Result<Self, ChatApiError> {
        validate_origin(&config.origin)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ChatApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ChatApiConfig {
        &self.config
    }

    pub fn chat_endpoint(&self) -> String {
        chat_endpoint(&self.config.origin)
    }

    pub fn health_endpoint(&self) -> String {
        health_endpoint(&self.config.origin)
    }

    pub fn build_headers(&self, session_id: Option<&str>) -> Result<HeaderMap, ChatApiError> {
        let headers = build_headers(&self.config, session_id)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| ChatApiError::InvalidHeader(format!("invalid header key: {key}")))?,
                HeaderValue::from_str(&value).map_err(|_| {
                    ChatApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_chat_request(
        &self,
        request: &ChatRequest,
        session_id: &str,
    ) -> Result<reqwest::RequestBuilder, ChatApiError> {
        let headers = self.build_headers(Some(session_id))?;
        Ok(self
            .http
            .post(self.chat_endpoint())
            .headers(headers)
            .json(request))
    }

    pub fn build_health_request(&self) -> Result<reqwest::RequestBuilder, ChatApiError> {
        let headers = self.build_headers(None)?;
        Ok(self.http.get(self.health_endpoint()).headers(headers))
    }
}

impl ChatTransport for ChatApiClient {
    fn post_chat(
        &self,
        request: &ChatRequest,
        session_id: &str,
    ) -> impl Future<Output = Result<HttpReply, TransportError>> {
        let built = self.build_chat_request(request, session_id);
        async move {
            match built {
                Ok(request) => execute(request).await,
                Err(error) => Err(TransportError::from(error)),
            }
        }
    }

    fn get_health(&self) -> impl Future<Output = Result<HttpReply, TransportError>> {
        let built = self.build_health_request();
        async move {
            match built {
                Ok(request) => execute(request).await,
                Err(error) => Err(TransportError::from(error)),
            }
        }
    }
}

impl From<ChatApiError> for TransportError {
    fn from(error: ChatApiError) -> Self {
        TransportError::new(TransportErrorKind::Other, error.to_string())
    }
}

async fn execute(request: reqwest::RequestBuilder) -> Result<HttpReply, TransportError> {
    let response = request.send().await.map_err(TransportError::from)?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(TransportError::from)?;
    tracing::debug!(status, bytes = body.len(), "chat backend replied");
    Ok(HttpReply { status, body })
}
