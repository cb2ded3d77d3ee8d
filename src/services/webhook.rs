//! Automation-webhook trigger and response interpretation.

use crate::repository::{FlowResponse, FlowTrigger};
use crate::services::{ServiceError, ServiceResult};

/// Acknowledgment body the automation service sends when the flow starts.
pub const FLOW_STARTED_MESSAGE: &str = "Workflow was started";

/// The three payload outcomes of a relayed trigger. Transport and
/// configuration failures surface as errors instead.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowOutcome {
    /// Explicit acknowledgment from the automation service.
    Started(String),
    /// The relay answered with an HTML document — the deployment is serving
    /// a page where the webhook route should be.
    Misconfigured,
    /// Anything else; echoed to the user verbatim.
    Other(String),
}

/// Triggers the automation flow through the relay and classifies the reply.
pub async fn trigger_flow<R>(repo: &R) -> ServiceResult<FlowOutcome>
where
    R: FlowTrigger + ?Sized,
{
    let response = repo.trigger_flow().await.map_err(|err| {
        log::error!("Error triggering webhook: {err}");
        ServiceError::from(err)
    })?;
    Ok(interpret_flow_response(&response))
}

/// Pure classification of a relayed webhook reply.
pub fn interpret_flow_response(response: &FlowResponse) -> FlowOutcome {
    if looks_like_html(response) {
        return FlowOutcome::Misconfigured;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&response.body) {
        if value.get("message").and_then(|m| m.as_str()) == Some(FLOW_STARTED_MESSAGE) {
            return FlowOutcome::Started(FLOW_STARTED_MESSAGE.to_string());
        }
        return FlowOutcome::Other(value.to_string());
    }

    FlowOutcome::Other(response.body.trim().to_string())
}

fn looks_like_html(response: &FlowResponse) -> bool {
    if let Some(content_type) = response.content_type.as_deref() {
        if content_type.to_ascii_lowercase().contains("text/html") {
            return true;
        }
    }
    response.body.contains("<!DOCTYPE html>")
}
