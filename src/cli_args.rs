//! Command-line argument structures.
//!
//! Every flag is optional so that unset flags leave configuration file and
//! `JOLT_*` environment values in place. The struct serialises only the flags
//! that were given, which is what the config layer merges on top.

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use crate::api::ModeKind;

// A false CLI default must not override a `true` from env or config.
#[allow(clippy::trivially_copy_pass_by_ref, reason = "serde predicate signature")]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Fetch the locations of a Jolt content group.
#[derive(Parser, Serialize, Default, Debug, Clone)]
#[command(
    name = "jolt",
    version,
    about = "List Jolt locations for a content group"
)]
pub struct Cli {
    /// GraphQL endpoint URL
    #[arg(long, value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Value for the `jolt_auth_token` header
    #[arg(long, value_name = "TOKEN")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Value for the `jolt_companyid` header
    #[arg(long, value_name = "ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    /// Opaque identifier of the content group to list
    #[arg(long, value_name = "ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_id: Option<String>,
    /// Mode kind sent with the identifier (default `CONTENT_GROUP`)
    #[arg(long, value_name = "KIND")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_kind: Option<ModeKind>,
    /// List every company location instead of one content group
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub company_wide: bool,
    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_timeout: Option<u64>,
    /// Write HTTP transcript to this file for debugging
    #[arg(long, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<PathBuf>,
    /// Read settings from this TOML file
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub config: Option<PathBuf>,
}
