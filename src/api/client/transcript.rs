//! Transcript logging for GraphQL requests.

use log::warn;
use serde_json::json;

use super::JoltClient;
use crate::api::helpers::{BODY_SNIPPET_LEN, redact_sensitive, snippet};
use crate::api::response::HttpResponse;

impl JoltClient {
    /// Append the redacted request and truncated response to the transcript, if enabled.
    pub(super) fn log_transcript(
        &self,
        payload: &serde_json::Value,
        operation: &str,
        resp: &HttpResponse,
    ) {
        let Some(t) = &self.transcript else {
            return;
        };
        use std::io::Write as _;
        let mut request = payload.clone();
        redact_sensitive(&mut request);
        let line = json!({
            "operation": operation,
            "status": resp.status,
            "request": request,
            "response": snippet(&resp.body, BODY_SNIPPET_LEN)
        });
        match t.lock() {
            Ok(mut f) => {
                if let Err(e) = writeln!(f, "{line}") {
                    warn!("failed to write transcript for op={operation}: {e}");
                    return;
                }
                if let Err(e) = f.flush() {
                    warn!("failed to flush transcript for op={operation}: {e}");
                }
            }
            Err(e) => {
                warn!("failed to lock transcript for op={operation}: {e}");
            }
        }
    }
}
