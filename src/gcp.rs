use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use gcp_auth::TokenProvider;
use serde::de::DeserializeOwned;

const CONNECT_TIMEOUT: u64 = 5;
const READ_TIMEOUT: u64 = 60;

// 읽기 전용 스코프만 요청
const SCOPES: &[&str] = &["https://www.googleapis.com/auth/cloud-platform.read-only"];

/// Shared handle for the googleapis.com REST surfaces: one HTTP client plus
/// the credential source. Cheap to clone, one per process in practice.
#[derive(Clone)]
pub struct GcpApi {
    http: reqwest::Client,
    auth: Arc<dyn TokenProvider>,
}

impl GcpApi {
    /// Ambient credential chain (ADC, metadata server, gcloud, ...).
    pub async fn from_env() -> Result<Self> {
        let auth = gcp_auth::provider()
            .await
            .context("no usable Google Cloud credentials found")?;
        Self::with_provider(auth)
    }

    /// Explicit credential source, so callers control where tokens come from.
    pub fn with_provider(auth: Arc<dyn TokenProvider>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT))
            .timeout(Duration::from_secs(READ_TIMEOUT))
            .build()?;
        Ok(Self { http, auth })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let token = self.auth.token(SCOPES).await?;
        let resp = self
            .http
            .get(url)
            .bearer_auth(token.as_str())
            .query(query)
            .send()
            .await
            .map_err(|e| anyhow!("GET {url} send error: {e}"))?;

        if !resp.status().is_success() {
            let code = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("GET {url} failed: {code} - {body}"));
        }

        Ok(resp.json::<T>().await?)
    }
}
