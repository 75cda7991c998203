//! Classification of a raw HTTP reply into a [`QueryOutcome`].
//!
//! The HTTP status is checked before anything else: only a `200` body is
//! parsed as JSON. Within a `200` reply an `errors` field wins over `data`,
//! which is then never inspected.

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::helpers::{BODY_SNIPPET_LEN, VALUE_SNIPPET_LEN, snippet};
use super::types::{CompanyData, Location, LocationScope, LocationsData};
use crate::JoltError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The three mutually exclusive results of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Any status other than 200; the body is kept verbatim.
    HttpFailure { status: u16, body: String },
    /// Status 200 with an `errors` field, kept as received.
    GraphQlErrors(Value),
    /// Status 200 without errors.
    Locations(Vec<Location>),
}

impl QueryOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Locations(_))
    }
}

fn deserialize_data<T>(value: Value, status: u16) -> Result<T, JoltError>
where
    T: DeserializeOwned,
{
    serde_path_to_error::deserialize::<_, T>(value.clone()).map_err(|e| {
        let snippet = match serde_json::to_string_pretty(&value) {
            Ok(json) => snippet(&json, VALUE_SNIPPET_LEN),
            Err(e) => {
                warn!("Failed to serialise error snippet: {e}");
                "<failed to serialise error snippet>".to_string()
            }
        };
        let path = match e.path().to_string().as_str() {
            "." => "data".to_string(),
            p => format!("data.{p}"),
        };
        let inner = e.into_inner();
        JoltError::BadResponseSerde {
            status,
            message: format!("{inner} at {path}").into(),
            snippet: snippet.into(),
        }
    })
}

/// Read the location list for `scope` out of a GraphQL `data` value.
///
/// # Errors
///
/// Returns [`JoltError::BadResponseSerde`] naming the offending path when the
/// expected list is missing or malformed.
pub fn extract_locations(
    scope: &LocationScope,
    data: Value,
    status: u16,
) -> Result<Vec<Location>, JoltError> {
    match scope {
        LocationScope::Mode(_) => {
            deserialize_data::<LocationsData>(data, status).map(|d| d.locations)
        }
        LocationScope::Company => {
            deserialize_data::<CompanyData>(data, status).map(|d| d.company.locations)
        }
    }
}

/// Turn an HTTP reply into an outcome for `scope`.
///
/// # Errors
///
/// Returns [`JoltError::BadResponseSerde`] when a `200` body is not a JSON
/// object or the location list is malformed, and
/// [`JoltError::EmptyResponse`] when it carries neither `errors` nor `data`.
pub fn classify(
    resp: HttpResponse,
    scope: &LocationScope,
    operation: &str,
) -> Result<QueryOutcome, JoltError> {
    let HttpResponse { status, body } = resp;
    if status != 200 {
        return Ok(QueryOutcome::HttpFailure { status, body });
    }
    let mut parsed: Map<String, Value> =
        serde_json::from_str(&body).map_err(|e| JoltError::BadResponseSerde {
            status,
            message: e.to_string().into(),
            snippet: snippet(&body, BODY_SNIPPET_LEN).into(),
        })?;
    if let Some(errors) = parsed.remove("errors") {
        return Ok(QueryOutcome::GraphQlErrors(errors));
    }
    let Some(data) = parsed.remove("data").filter(|d| !d.is_null()) else {
        return Err(JoltError::EmptyResponse {
            status,
            operation: operation.into(),
            snippet: snippet(&body, BODY_SNIPPET_LEN).into(),
        });
    };
    extract_locations(scope, data, status).map(QueryOutcome::Locations)
}
