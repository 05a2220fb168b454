use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::error::GradeError;
use crate::domain::report::ScoringReport;

#[async_trait]
pub trait GradeBackend {
    /// Requests a grade for `url`. One call sends exactly one request.
    async fn grade(&self, url: &str) -> Result<ScoringReport, GradeError>;
}

#[derive(Debug, Serialize)]
struct GradeRequest<'a> {
    url: &'a str,
}

/// Scoring service client over HTTP. No retries and no client-side timeout:
/// a call resolves whenever the transport does.
pub struct HttpGradeClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGradeClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GradeBackend for HttpGradeClient {
    async fn grade(&self, url: &str) -> Result<ScoringReport, GradeError> {
        debug!(endpoint = %self.endpoint, url = %url, "Sending grade request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&GradeRequest { url })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Grade request failed");
                GradeError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Backend rejected grade request");
            return Err(GradeError::BackendError {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| GradeError::RequestFailed(format!("Failed to read body: {}", e)))?;
        let json: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "Grade response is not JSON");
            GradeError::MalformedResponse(format!("Failed to parse JSON: {}", e))
        })?;

        ScoringReport::from_value(&json).ok_or_else(|| {
            warn!("Grade response is not a JSON object");
            GradeError::MalformedResponse("Invalid response format".to_string())
        })
    }
}
