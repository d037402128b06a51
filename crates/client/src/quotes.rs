//! Quote submission and status lookup over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use atelier_core::domain::quote::QuoteDraft;
use atelier_core::gateway::{QuoteReceipt, SubmissionError, SubmissionGateway};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::http::BoundedClient;

#[derive(Debug, Deserialize)]
struct SubmitEnvelope {
    status: u16,
    #[serde(default)]
    message: String,
    data: SubmitData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitData {
    quote_id: String,
    #[serde(default)]
    estimated_response: String,
}

/// The status endpoint returns the stored quote document directly, without
/// the catalog-style envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusDocument {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    status: QuoteStage,
    #[serde(default)]
    estimated_response: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// Lifecycle stage of a submitted quote, as reported by the remote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStage {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
    Completed,
}

impl QuoteStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Terminal stages will never change on a later poll.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteStatusReport {
    pub quote_id: String,
    pub stage: QuoteStage,
    pub estimated_response: Option<String>,
    pub message: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// HTTP implementation of the wizard's submission seam. One attempt per
/// call; the caller decides whether to retry.
#[derive(Clone, Debug)]
pub struct QuoteGateway {
    http: BoundedClient,
    submit_timeout: Duration,
    fetch_timeout: Duration,
}

impl QuoteGateway {
    pub fn new(http: BoundedClient, submit_timeout: Duration, fetch_timeout: Duration) -> Self {
        Self { http, submit_timeout, fetch_timeout }
    }

    fn map_send_error(&self, error: reqwest::Error, limit: Duration) -> SubmissionError {
        if error.is_timeout() {
            SubmissionError::Timeout { limit_secs: limit.as_secs() }
        } else {
            SubmissionError::Transport(error.to_string())
        }
    }

    /// Polls the lifecycle stage of an already-submitted quote.
    pub async fn quote_status(
        &self,
        quote_id: &str,
    ) -> Result<QuoteStatusReport, SubmissionError> {
        let path = format!("/quotes/{quote_id}/status");
        let response = self
            .http
            .get(&path, self.fetch_timeout)
            .send()
            .await
            .map_err(|error| self.map_send_error(error, self.fetch_timeout))?;

        if !response.status().is_success() {
            return Err(SubmissionError::RejectedStatus { status: response.status().as_u16() });
        }

        let document: StatusDocument = response
            .json()
            .await
            .map_err(|error| SubmissionError::MalformedResponse(error.to_string()))?;

        Ok(QuoteStatusReport {
            quote_id: document.id.unwrap_or_else(|| quote_id.to_string()),
            stage: document.status,
            estimated_response: document.estimated_response,
            message: document.message,
            last_updated: document.updated_at,
        })
    }
}

#[async_trait]
impl SubmissionGateway for QuoteGateway {
    async fn submit_quote(&self, draft: &QuoteDraft) -> Result<QuoteReceipt, SubmissionError> {
        let response = self
            .http
            .post("/quotes/request", self.submit_timeout)
            .json(draft)
            .send()
            .await
            .map_err(|error| self.map_send_error(error, self.submit_timeout))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!(status, "quote endpoint rejected submission");
            return Err(SubmissionError::RejectedStatus { status });
        }

        let envelope: SubmitEnvelope = response
            .json()
            .await
            .map_err(|error| SubmissionError::MalformedResponse(error.to_string()))?;

        if envelope.status != 201 {
            return Err(SubmissionError::EnvelopeStatus {
                status: envelope.status,
                message: envelope.message,
            });
        }

        info!(quote_id = %envelope.data.quote_id, "quote request accepted");
        Ok(QuoteReceipt {
            quote_id: envelope.data.quote_id,
            estimated_response: envelope.data.estimated_response,
        })
    }
}
