//! Types used by the Jolt GraphQL client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::queries::{COMPANY_LOCATIONS_QUERY, LOCATIONS_QUERY};

/// A GraphQL query string with type safety.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Value sent in the `jolt_auth_token` header.
#[derive(Clone, Default)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keeps the secret out of debug logs.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl From<&str> for AuthToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Value sent in the `jolt_companyid` header.
#[derive(Debug, Clone, Default)]
pub struct CompanyId(String);

impl CompanyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CompanyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The Jolt GraphQL endpoint URL.
#[derive(Debug, Clone)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Endpoint {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self(JOLT_GRAPHQL_URL.to_string())
    }
}

/// Public Jolt GraphQL endpoint.
pub const JOLT_GRAPHQL_URL: &str = "https://api.jolt.com/graphql";

/// Kind of scope named by a [`ModeInput`].
///
/// Serialises as the wire name. Deserialising goes through [`FromStr`], so
/// config files and the environment accept the same spellings as the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum ModeKind {
    #[default]
    ContentGroup,
    Location,
    Company,
}

impl ModeKind {
    /// Wire name of the kind, e.g. `CONTENT_GROUP`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContentGroup => "CONTENT_GROUP",
            Self::Location => "LOCATION",
            Self::Company => "COMPANY",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeKind {
    type Err = String;

    /// Accepts wire names case-insensitively, with `-` or `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "CONTENT_GROUP" => Ok(Self::ContentGroup),
            "LOCATION" => Ok(Self::Location),
            "COMPANY" => Ok(Self::Company),
            other => Err(format!(
                "unknown mode kind '{other}' (expected CONTENT_GROUP, LOCATION or COMPANY)"
            )),
        }
    }
}

impl TryFrom<String> for ModeKind {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Mode descriptor passed as the `$mode` variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeInput {
    pub mode: ModeKind,
    pub id: String,
}

impl ModeInput {
    pub fn new(mode: ModeKind, id: impl Into<String>) -> Self {
        Self {
            mode,
            id: id.into(),
        }
    }

    /// Descriptor for a content group, the kind the location query expects by default.
    pub fn content_group(id: impl Into<String>) -> Self {
        Self::new(ModeKind::ContentGroup, id)
    }
}

/// GraphQL variables object. Serialises to `{}` when no mode is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Variables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ModeInput>,
}

/// Which set of locations to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationScope {
    /// Locations selected by a mode descriptor; read from `data.locations`.
    Mode(ModeInput),
    /// All company locations; read from `data.company.locations`.
    Company,
}

/// JSON body of the single POST: exactly `query` and `variables`.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    pub query: Query,
    pub variables: Variables,
}

impl RequestEnvelope {
    /// Build the envelope for `scope`.
    #[must_use]
    pub fn for_scope(scope: &LocationScope) -> Self {
        match scope {
            LocationScope::Mode(mode) => Self {
                query: Query::from(LOCATIONS_QUERY),
                variables: Variables {
                    mode: Some(mode.clone()),
                },
            },
            LocationScope::Company => Self {
                query: Query::from(COMPANY_LOCATIONS_QUERY),
                variables: Variables::default(),
            },
        }
    }
}

/// A location as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct LocationsData {
    pub(super) locations: Vec<Location>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CompanyData {
    pub(super) company: Company,
}

#[derive(Debug, Deserialize)]
pub(super) struct Company {
    pub(super) locations: Vec<Location>,
}
