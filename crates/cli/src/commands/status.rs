//! Quote status lookup.

use atelier_client::QuoteGateway;
use atelier_core::gateway::SubmissionError;
use serde_json::json;

use super::CommandResult;

pub async fn run(gateway: &QuoteGateway, quote_id: &str) -> CommandResult {
    match gateway.quote_status(quote_id).await {
        Ok(report) => {
            let message = match &report.message {
                Some(message) => format!("{}: {}", report.stage.as_str(), message),
                None => report.stage.as_str().to_string(),
            };
            CommandResult::success_with_data(
                "status",
                message,
                Some(json!({
                    "quote_id": report.quote_id,
                    "stage": report.stage.as_str(),
                    "terminal": report.stage.is_terminal(),
                    "estimated_response": report.estimated_response,
                    "last_updated": report.last_updated,
                })),
            )
        }
        Err(SubmissionError::RejectedStatus { status: 404 }) => CommandResult::failure(
            "status",
            "not_found",
            format!("no quote with id `{quote_id}`"),
            1,
        ),
        Err(error) => {
            let error_class = if error.is_timeout() { "timeout" } else { "submission" };
            CommandResult::failure("status", error_class, error.to_string(), 4)
        }
    }
}
