use serde::Deserialize;
use serde_json::json;

use super::{JobPhase, ProviderError, StatusReport, StatusSource};

const PROVIDER: &str = "n8n";

/// Client for the external n8n text-to-video workflow.
///
/// The workflow exposes two webhooks under one base URL: a trigger that
/// returns a job id and a `/status` probe keyed by that id.
#[derive(Clone)]
pub struct N8nClient {
    client: reqwest::Client,
    webhook_url: String,
}

#[derive(Debug, Deserialize)]
struct TriggerResponse {
    #[serde(alias = "executionId")]
    job_id: String,
}

#[derive(Debug, Deserialize)]
struct WorkflowStatus {
    status: String,
    video_url: Option<String>,
    thumbnail_url: Option<String>,
    error: Option<String>,
}

impl N8nClient {
    pub fn new(client: reqwest::Client, webhook_url: String) -> Self {
        Self {
            client,
            webhook_url,
        }
    }

    /// Kick off the workflow for a video description. Returns the
    /// workflow-assigned job id.
    pub async fn trigger(&self, title: &str, description: &str) -> Result<String, ProviderError> {
        let body = json!({
            "title": title,
            "description": description,
        });

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TriggerResponse = response.json().await?;
        Ok(parsed.job_id)
    }

    pub async fn job_status(&self, job_id: &str) -> Result<StatusReport, ProviderError> {
        let response = self
            .client
            .get(format!("{}/status", self.webhook_url))
            .query(&[("job_id", job_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: WorkflowStatus = response.json().await?;
        let phase = match parsed.status.as_str() {
            "completed" | "success" => JobPhase::Completed,
            "failed" | "error" => JobPhase::Failed,
            "running" | "processing" => JobPhase::Processing,
            _ => JobPhase::Pending,
        };

        Ok(StatusReport {
            phase,
            result_url: parsed.video_url,
            thumbnail_url: parsed.thumbnail_url,
            error: parsed.error,
        })
    }
}

impl StatusSource for N8nClient {
    async fn fetch_status(&self, job_id: &str) -> Result<StatusReport, ProviderError> {
        self.job_status(job_id).await
    }
}
