//! Command execution for `jolt`.
//!
//! This module owns the runtime flow of a single invocation: settings
//! resolution, API client setup, the one request, and rendering the outcome
//! to the terminal.

use log::{error, warn};
use std::io::{ErrorKind, Write};

use crate::JoltError;
use crate::api::{ClientConfig, JoltClient, QueryOutcome};
use crate::cli_args::Cli;
use crate::config::{Settings, load_settings};
use crate::printer::{write_outcome, write_progress, write_script_error};

/// How a run ended, for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Locations were listed (possibly none).
    Success,
    /// A transport, HTTP, GraphQL or response-shape failure was reported.
    Failed,
}

fn caused_by_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|c| {
        c.downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == ErrorKind::BrokenPipe)
    })
}

/// Report a rendering failure; a closed stdout is not worth a log line.
fn handle_write(result: anyhow::Result<()>, label: &str) {
    if let Err(e) = result {
        if !caused_by_broken_pipe(&e) {
            error!("error printing {label}: {e}");
        }
    }
}

/// Create a [`JoltClient`], falling back to no transcript on failure.
fn build_client(config: ClientConfig) -> Result<JoltClient, JoltError> {
    let fallback = ClientConfig {
        transcript: None,
        ..config.clone()
    };
    match JoltClient::new(config) {
        Ok(c) => Ok(c),
        Err(JoltError::Io(e)) => {
            warn!("failed to create transcript: {e}");
            JoltClient::new(fallback)
        }
        Err(e) => Err(e),
    }
}

/// Run the query described by `settings` and render the result to `out`.
///
/// Failures that happen after the progress line (transport errors and
/// unreadable `200` bodies) are rendered as `Script Error` lines rather than
/// returned.
///
/// # Errors
///
/// Returns a [`JoltError`] when the settings are incomplete or invalid, or
/// the client cannot be built; nothing is printed in that case.
pub async fn execute<W: Write>(settings: &Settings, mut out: W) -> Result<RunStatus, JoltError> {
    let scope = settings.scope()?;
    let client = build_client(settings.client_config()?)?;

    handle_write(write_progress(&mut out), "progress line");
    let status = match client.fetch_locations(&scope).await {
        Ok(outcome) => {
            handle_write(write_outcome(&mut out, &outcome), "outcome");
            status_for(&outcome)
        }
        Err(e) => {
            handle_write(write_script_error(&mut out, &e), "script error");
            RunStatus::Failed
        }
    };
    handle_write(out.flush().map_err(anyhow::Error::from), "output");
    Ok(status)
}

/// Resolve configuration for `cli` and run against stdout.
///
/// # Errors
///
/// Returns a [`JoltError`] when configuration cannot be loaded or is
/// incomplete.
pub async fn run(cli: &Cli) -> Result<RunStatus, JoltError> {
    let settings = load_settings(cli)?;
    execute(&settings, std::io::stdout().lock()).await
}

/// Exit status for a completed outcome.
#[must_use]
pub fn status_for(outcome: &QueryOutcome) -> RunStatus {
    if outcome.is_success() {
        RunStatus::Success
    } else {
        RunStatus::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Location;
    use serde_json::json;

    #[test]
    fn broken_pipe_is_detected_through_context() {
        let io = std::io::Error::new(ErrorKind::BrokenPipe, "closed");
        let err = anyhow::Error::from(io).context("writing outcome");
        assert!(caused_by_broken_pipe(&err));
        assert!(!caused_by_broken_pipe(&anyhow::anyhow!("other")));
    }

    #[test]
    fn only_locations_count_as_success() {
        assert_eq!(
            status_for(&QueryOutcome::Locations(vec![Location {
                id: "L1".into(),
                name: "Downtown".into()
            }])),
            RunStatus::Success
        );
        assert_eq!(
            status_for(&QueryOutcome::GraphQlErrors(json!([]))),
            RunStatus::Failed
        );
        assert_eq!(
            status_for(&QueryOutcome::HttpFailure {
                status: 404,
                body: String::new()
            }),
            RunStatus::Failed
        );
    }

    #[tokio::test]
    async fn incomplete_settings_print_nothing() {
        let mut buf = Vec::new();
        let err = execute(&Settings::default(), &mut buf)
            .await
            .expect_err("mode id missing");
        assert!(matches!(err, JoltError::MissingConfig("mode_id")));
        assert!(buf.is_empty());
    }

    #[test]
    fn transcript_failure_falls_back_to_no_transcript() {
        let config = ClientConfig {
            transcript: Some("/definitely/not/here/transcript.jsonl".into()),
            ..ClientConfig::default()
        };
        assert!(build_client(config).is_ok());
    }
}
