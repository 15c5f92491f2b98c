//! Protocol client: one JSON envelope in, one decoded reply out.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use super::EgoSmsError;
use crate::domain::ApiResponse;
use crate::transport::{Envelope, decode_response, encode_envelope};

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    pub(crate) client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// Sends envelopes to the gateway. One call is one HTTP attempt; nothing is retried.
#[derive(Clone)]
pub(crate) struct Gateway {
    http: Arc<dyn HttpTransport>,
}

impl Gateway {
    pub(crate) fn new(http: Arc<dyn HttpTransport>) -> Self {
        Self { http }
    }

    /// POST `envelope` to `base_url` and decode the reply.
    ///
    /// Network failures are returned as [`EgoSmsError::Transport`]. Non-2xx replies
    /// and malformed bodies are not errors; they decode to a failed [`ApiResponse`].
    pub(crate) async fn send(
        &self,
        base_url: &str,
        envelope: &Envelope<'_>,
    ) -> Result<ApiResponse, EgoSmsError> {
        let body = encode_envelope(envelope).map_err(|err| EgoSmsError::Encode(Box::new(err)))?;
        debug!(method = envelope.method(), url = base_url, "dispatching gateway request");

        let response = self
            .http
            .post_json(base_url, body)
            .await
            .map_err(EgoSmsError::Transport)?;
        debug!(
            method = envelope.method(),
            status = response.status,
            "gateway replied"
        );

        Ok(decode_response(response.status, &response.body))
    }
}
