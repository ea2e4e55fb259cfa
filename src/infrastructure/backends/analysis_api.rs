#[cfg(test)]
#[path = "analysis_api_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart;
use tokio::fs;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;

/// HTTP client for the log analysis service.
pub struct AnalysisApi {
    url: String,
    timeout: String,
}

impl Default for AnalysisApi {
    fn default() -> AnalysisApi {
        return AnalysisApi::new(
            &Config::get(ConfigKey::ApiUrl),
            &Config::get(ConfigKey::BackendHealthCheckTimeout),
        );
    }
}

impl AnalysisApi {
    pub fn new(url: &str, timeout: &str) -> AnalysisApi {
        return AnalysisApi {
            url: url.trim_end_matches('/').to_string(),
            timeout: timeout.to_string(),
        };
    }

    async fn form(request: ChatRequest) -> Result<multipart::Form> {
        let mut form = multipart::Form::new()
            .text("message", request.message)
            .text("chat_history", serde_json::to_string(&request.chat_history)?);

        if let Some(file) = request.file {
            let bytes = fs::read(&file.path).await?;
            let part = multipart::Part::bytes(bytes)
                .file_name(file.name)
                .mime_str(&file.mime_type)?;
            form = form.part("file", part);
        }

        return Ok(form);
    }
}

#[async_trait]
impl Backend for AnalysisApi {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Analysis API URL is not defined");
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Analysis API is not reachable");
                bail!("Analysis API is not reachable");
            }
        };

        if res.status().is_server_error() {
            tracing::error!(status = res.status().as_u16(), "Analysis API health check failed");
            bail!("Analysis API health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn submit(&self, request: ChatRequest) -> Result<ChatResponse> {
        let form = AnalysisApi::form(request).await?;

        let res = reqwest::Client::new()
            .post(format!("{url}/chat", url = self.url))
            .multipart(form)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Chat request failed");

            let reason = serde_json::from_str::<ChatResponse>(&body)
                .ok()
                .and_then(|parsed| return parsed.error_reason().map(|e| return e.to_string()));
            if let Some(reason) = reason {
                bail!(format!("Analysis API returned {status}: {reason}"));
            }
            bail!(format!("Analysis API returned {status}"));
        }

        let body = res.json::<ChatResponse>().await?;
        tracing::debug!(body = ?body, "Chat response");

        return Ok(body);
    }
}
