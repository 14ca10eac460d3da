use crate::config::credentials::Credentials;
use crate::config::RunConfig;
use crate::domain::ports::ExportSource;
use crate::utils::error::{ExportError, Result};
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Downloads a filter's search-request XML export from Jira.
pub struct JiraFetcher {
    client: Client,
    export_url: String,
    credentials: Credentials,
}

impl JiraFetcher {
    pub fn new(config: &RunConfig) -> Result<Self> {
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for the Jira server");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            export_url: Self::export_url(
                &config.jira_base_url,
                &config.jira_filter,
                config.max_results,
            ),
            credentials: config.credentials.clone(),
        })
    }

    pub fn export_url(base_url: &str, filter: &str, max_results: Option<u32>) -> String {
        let mut url = format!(
            "{}/sr/jira.issueviews:searchrequest-xml/{}/SearchRequest-{}.xml",
            base_url.trim_end_matches('/'),
            filter,
            filter
        );
        if let Some(max_results) = max_results {
            url.push_str(&format!("?tempMax={}", max_results));
        }
        url
    }

    fn fetch_error(&self, message: impl std::fmt::Display) -> ExportError {
        ExportError::FetchError {
            url: self.export_url.clone(),
            message: message.to_string(),
        }
    }
}

impl ExportSource for JiraFetcher {
    async fn fetch_into(&self, destination: &Path) -> Result<u64> {
        tracing::debug!("Making export request to: {}", self.export_url);

        let mut response = self
            .client
            .get(&self.export_url)
            .basic_auth(self.credentials.username(), Some(self.credentials.password()))
            .send()
            .await
            .map_err(|e| self.fetch_error(e))?;

        let status = response.status();
        tracing::debug!("Export response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ExportError::CredentialsRejected {
                url: self.export_url.clone(),
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(self.fetch_error(format!("unexpected HTTP status {}", status)));
        }

        // 直接串流寫入暫存檔
        let mut file = tokio::fs::File::create(destination).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(|e| self.fetch_error(e))? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }

    fn describe(&self) -> String {
        self.export_url.clone()
    }
}
