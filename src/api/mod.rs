//! Jolt GraphQL API access.
//!
//! [`JoltClient`] sends the location query and [`classify`] sorts the reply
//! into one of the [`QueryOutcome`] branches the printer renders.

pub mod client;
pub mod helpers;
pub mod response;
pub mod types;

pub use client::{ClientConfig, DEFAULT_REQUEST_TIMEOUT, JoltClient};
pub use helpers::{AUTH_TOKEN_HEADER, COMPANY_ID_HEADER, build_headers};
pub use response::{HttpResponse, QueryOutcome, classify, extract_locations};
pub use types::{
    AuthToken, CompanyId, Endpoint, JOLT_GRAPHQL_URL, Location, LocationScope, ModeInput,
    ModeKind, Query, RequestEnvelope, Variables,
};
