//! Console rendering of query outcomes.
//!
//! Every function writes to a caller-supplied [`std::io::Write`] so output
//! can be unit tested without capturing stdout.
use std::io::Write;

use crate::JoltError;
use crate::api::{Location, QueryOutcome};

/// Line printed before the request is sent.
pub const PROGRESS_LINE: &str = "Fetching data from Jolt...";

/// Write the progress line.
pub fn write_progress<W: Write>(mut out: W) -> anyhow::Result<()> {
    writeln!(out, "{PROGRESS_LINE}")?;
    Ok(())
}

fn write_location<W: Write>(out: &mut W, location: &Location) -> std::io::Result<()> {
    writeln!(out, "- {} (ID: {})", location.name, location.id)
}

/// Write the success header followed by one line per location, in order.
///
/// # Examples
///
/// ```
/// use jolt::api::Location;
/// use jolt::printer::write_locations;
///
/// let mut buf = Vec::new();
/// let locations = [Location { id: "L1".into(), name: "Downtown".into() }];
/// write_locations(&mut buf, &locations).expect("write locations");
/// let out = String::from_utf8(buf).expect("utf8");
/// assert!(out.contains("- Downtown (ID: L1)"));
/// ```
pub fn write_locations<W: Write>(mut out: W, locations: &[Location]) -> anyhow::Result<()> {
    writeln!(out, "\nSuccess! Found {} locations:\n", locations.len())?;
    for location in locations {
        write_location(&mut out, location)?;
    }
    Ok(())
}

/// Pretty-print a GraphQL `errors` value with two-space indentation.
pub fn write_graphql_errors<W: Write>(
    mut out: W,
    errors: &serde_json::Value,
) -> anyhow::Result<()> {
    let pretty = serde_json::to_string_pretty(errors)?;
    writeln!(out, "API Error: {pretty}")?;
    Ok(())
}

/// Write the status code and the raw, unparsed body of a non-200 reply.
pub fn write_http_failure<W: Write>(mut out: W, status: u16, body: &str) -> anyhow::Result<()> {
    writeln!(out, "Server Error: {status}")?;
    writeln!(out, "{body}")?;
    Ok(())
}

/// Render whichever branch `outcome` holds.
pub fn write_outcome<W: Write>(out: W, outcome: &QueryOutcome) -> anyhow::Result<()> {
    match outcome {
        QueryOutcome::HttpFailure { status, body } => write_http_failure(out, *status, body),
        QueryOutcome::GraphQlErrors(errors) => write_graphql_errors(out, errors),
        QueryOutcome::Locations(locations) => write_locations(out, locations),
    }
}

/// Report a failure that stopped the run before an outcome was produced.
pub fn write_script_error<W: Write>(mut out: W, err: &JoltError) -> anyhow::Result<()> {
    writeln!(out, "Script Error: {err}")?;
    Ok(())
}
