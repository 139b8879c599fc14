//! HTTP/JSON [`HistoryClient`] for a history gateway that holds the platform user session.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::{ChannelHandle, HistoryClient, HistoryError, HistoryItem, HistoryQuery};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct AuthorizedReply {
    authorized: bool,
}

/// Gateway-backed history client.
#[derive(Debug, Clone)]
pub struct GatewayHistoryClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl GatewayHistoryClient {
    /// Builds a client for `base_url` with an optional bearer token.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Self::with_client(http, base_url, token)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str, token: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid HISTORY_GATEWAY_URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("HISTORY_GATEWAY_URL cannot be a base URL: {}", base_url);
        }
        Ok(Self {
            http,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, subject: &str) -> Result<Response, HistoryError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| HistoryError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(map_status(status, subject, &body))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, subject: &str) -> Result<T, HistoryError> {
        let response = self.send(self.http.get(url), subject).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| HistoryError::Transport(format!("malformed gateway reply: {}", e)))
    }
}

fn map_status(status: StatusCode, subject: &str, body: &str) -> HistoryError {
    let detail = if body.trim().is_empty() {
        format!("{} ({})", subject, status)
    } else {
        format!("{} ({}): {}", subject, status, body.trim())
    };
    match status {
        StatusCode::NOT_FOUND => HistoryError::NotFound(subject.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => HistoryError::Unauthorized(detail),
        _ => HistoryError::Transport(detail),
    }
}

#[async_trait]
impl HistoryClient for GatewayHistoryClient {
    async fn connect(&self) -> Result<(), HistoryError> {
        let url = self.endpoint(&["session", "connect"]);
        self.send(self.http.post(url), "session connect").await?;
        info!(gateway = %self.base_url, "step: history session connected");
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), HistoryError> {
        let url = self.endpoint(&["session", "disconnect"]);
        self.send(self.http.post(url), "session disconnect").await?;
        info!(gateway = %self.base_url, "step: history session disconnected");
        Ok(())
    }

    async fn is_authorized(&self) -> Result<bool, HistoryError> {
        let url = self.endpoint(&["session", "authorized"]);
        let reply: AuthorizedReply = self.get_json(url, "session status").await?;
        Ok(reply.authorized)
    }

    #[instrument(skip(self))]
    async fn resolve_entity(&self, username: &str) -> Result<ChannelHandle, HistoryError> {
        let url = self.endpoint(&["channels", username]);
        self.get_json(url, username).await
    }

    #[instrument(skip(self, channel), fields(channel_id = channel.id))]
    async fn get_history(
        &self,
        channel: &ChannelHandle,
        query: HistoryQuery,
    ) -> Result<Vec<HistoryItem>, HistoryError> {
        let id = channel.id.to_string();
        let mut url = self.endpoint(&["channels", &id, "messages"]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("limit", &query.limit.to_string())
                .append_pair("offset_id", &query.offset_id.to_string());
            if let Some(before) = query.before_date {
                pairs.append_pair("before", &before.to_rfc3339());
            }
        }
        debug!(url = %url, "Requesting history page");
        self.get_json(url, &channel.username).await
    }
}
