//! History gateway configuration from environment variables.

use anyhow::{Context, Result};
use std::env;

use crate::{DEFAULT_MAX_PAGES, MAX_PAGE_SIZE};

/// History client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvHistoryConfig {
    pub gateway_url: String,
    pub gateway_token: Option<String>,
    pub page_size: usize,
    /// `None` disables the per-fetch page ceiling.
    pub max_pages: Option<usize>,
}

impl EnvHistoryConfig {
    /// Loads HISTORY_GATEWAY_URL (required), HISTORY_GATEWAY_TOKEN, HISTORY_PAGE_SIZE
    /// (capped at 100) and HISTORY_MAX_PAGES (0 disables the ceiling).
    pub fn from_env() -> Result<Self> {
        let gateway_url =
            env::var("HISTORY_GATEWAY_URL").context("HISTORY_GATEWAY_URL not set")?;
        let gateway_token = env::var("HISTORY_GATEWAY_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let page_size = match env::var("HISTORY_PAGE_SIZE") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid HISTORY_PAGE_SIZE: {}", raw))?
                .clamp(1, MAX_PAGE_SIZE),
            Err(_) => MAX_PAGE_SIZE,
        };
        let max_pages = match env::var("HISTORY_MAX_PAGES") {
            Ok(raw) => {
                let n = raw
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("Invalid HISTORY_MAX_PAGES: {}", raw))?;
                (n > 0).then_some(n)
            }
            Err(_) => Some(DEFAULT_MAX_PAGES),
        };
        Ok(Self {
            gateway_url,
            gateway_token,
            page_size,
            max_pages,
        })
    }
}
