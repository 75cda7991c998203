//! Configuration loading.
//!
//! Settings are layered with `figment`; later layers win:
//! defaults < TOML file < `JOLT_*` environment < command-line flags.
//!
//! The file is the first of: `--config`, `JOLT_CONFIG_PATH`, `.jolt.toml` in
//! the working directory, `$XDG_CONFIG_HOME/jolt/config.toml`. An explicitly
//! named file must exist; discovered files are optional.
//!
//! Figment's `Env` provider guesses value types, which would turn an all-digit
//! company id into a number. Free-text keys are therefore read verbatim and
//! only the typed keys go through `Env`.

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::value::{Dict, Value};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::JoltError;
use crate::api::{
    AuthToken, ClientConfig, CompanyId, Endpoint, JOLT_GRAPHQL_URL, LocationScope, ModeInput,
    ModeKind,
};
use crate::cli_args::Cli;

/// Prefix of every environment variable read as configuration.
pub const ENV_PREFIX: &str = "JOLT_";
/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "JOLT_CONFIG_PATH";
/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".jolt.toml";

/// Keys whose environment values are taken as plain strings.
const VERBATIM_ENV_KEYS: &[&str] = &[
    "endpoint",
    "auth_token",
    "company_id",
    "mode_id",
    "transcript",
];

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub auth_token: String,
    pub company_id: String,
    pub mode_kind: ModeKind,
    pub mode_id: Option<String>,
    pub company_wide: bool,
    /// Request timeout in seconds.
    pub http_timeout: u64,
    pub transcript: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: JOLT_GRAPHQL_URL.to_string(),
            auth_token: String::new(),
            company_id: String::new(),
            mode_kind: ModeKind::default(),
            mode_id: None,
            company_wide: false,
            http_timeout: 30,
            transcript: None,
        }
    }
}

impl Settings {
    /// The location set these settings ask for.
    ///
    /// # Errors
    ///
    /// Returns [`JoltError::MissingConfig`] when no mode id is configured
    /// outside company-wide scope.
    pub fn scope(&self) -> Result<LocationScope, JoltError> {
        if self.company_wide {
            return Ok(LocationScope::Company);
        }
        let id = self
            .mode_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(JoltError::MissingConfig("mode_id"))?;
        Ok(LocationScope::Mode(ModeInput::new(self.mode_kind, id)))
    }

    /// Client options derived from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`JoltError::InvalidEndpoint`] when the endpoint is not an
    /// absolute URL and [`JoltError::InvalidTimeout`] when the timeout is zero.
    pub fn client_config(&self) -> Result<ClientConfig, JoltError> {
        if self.http_timeout == 0 {
            return Err(JoltError::InvalidTimeout);
        }
        url::Url::parse(&self.endpoint).map_err(|source| JoltError::InvalidEndpoint {
            endpoint: self.endpoint.as_str().into(),
            source,
        })?;
        Ok(ClientConfig {
            endpoint: Endpoint::new(self.endpoint.as_str()),
            auth_token: AuthToken::new(self.auth_token.as_str()),
            company_id: CompanyId::new(self.company_id.as_str()),
            request_timeout: Duration::from_secs(self.http_timeout),
            transcript: self.transcript.clone(),
        })
    }
}

fn xdg_config_file() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("jolt").find_config_file("config.toml")
}

/// Pick the config file and whether it must exist.
fn config_file(cli: &Cli) -> Option<(PathBuf, bool)> {
    if let Some(path) = &cli.config {
        return Some((path.clone(), true));
    }
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Some((PathBuf::from(path), true));
    }
    let local = Path::new(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some((local.to_path_buf(), false));
    }
    xdg_config_file().map(|p| (p, false))
}

/// `JOLT_*` values for [`VERBATIM_ENV_KEYS`], untouched by type guessing.
fn verbatim_env() -> Dict {
    VERBATIM_ENV_KEYS
        .iter()
        .filter_map(|key| {
            let name = format!("{ENV_PREFIX}{}", key.to_ascii_uppercase());
            std::env::var(name)
                .ok()
                .map(|value| ((*key).to_string(), Value::from(value)))
        })
        .collect()
}

/// Build the layered figment for `cli`, reading `file` when given.
#[must_use]
pub fn figment(cli: &Cli, file: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));
    if let Some(path) = file {
        figment = figment.merge(Toml::file(path));
    }
    let ignored = [&["config_path"][..], VERBATIM_ENV_KEYS].concat();
    figment
        .merge(Env::prefixed(ENV_PREFIX).ignore(&ignored))
        .merge(Serialized::defaults(verbatim_env()))
        .merge(Serialized::defaults(cli))
}

/// Resolve settings from all configuration sources.
///
/// # Errors
///
/// Returns [`JoltError::Config`] when the file cannot be parsed, a value has
/// the wrong type, or an explicitly named file is missing.
pub fn load_settings(cli: &Cli) -> Result<Settings, JoltError> {
    let file = config_file(cli);
    if let Some((path, true)) = &file {
        if !path.is_file() {
            return Err(
                figment::Error::from(format!("config file {} not found", path.display())).into(),
            );
        }
    }
    let path = file.as_ref().map(|(p, _)| p.as_path());
    Ok(figment(cli, path).extract()?)
}
