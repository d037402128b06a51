use async_trait::async_trait;
use thiserror::Error;

use crate::domain::quote::QuoteDraft;

/// What the quote endpoint returns on acceptance: an opaque identifier and
/// a human-readable estimate of when the customer will hear back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteReceipt {
    pub quote_id: String,
    pub estimated_response: String,
}

/// Why a single submission attempt failed. Validation never reaches this
/// layer; all variants are submission-level and retryable by the user.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("quote submission timed out after {limit_secs}s")]
    Timeout { limit_secs: u64 },
    #[error("transport failure during quote submission: {0}")]
    Transport(String),
    #[error("quote endpoint rejected the request with HTTP status {status}")]
    RejectedStatus { status: u16 },
    #[error("quote endpoint answered with envelope status {status}: {message}")]
    EnvelopeStatus { status: u16, message: String },
    #[error("quote endpoint returned a malformed response: {0}")]
    MalformedResponse(String),
}

impl SubmissionError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Displayable cause, safe to show verbatim in any front-end.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => {
                "The quote service did not respond in time. Please try submitting again."
            }
            Self::Transport(_)
            | Self::RejectedStatus { .. }
            | Self::EnvelopeStatus { .. }
            | Self::MalformedResponse(_) => {
                "Your quote request could not be submitted. Please try again."
            }
        }
    }
}

/// The only network-facing seam of the wizard: one bounded attempt per
/// call, no implicit retries. Implemented over HTTP by `atelier-client`
/// and by fixed stubs in tests.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit_quote(&self, draft: &QuoteDraft) -> Result<QuoteReceipt, SubmissionError>;
}
