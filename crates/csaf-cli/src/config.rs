//! # Configuration — File and Environment Toggles
//!
//! The configuration surface only tunes logging verbosity and early-exit
//! behavior; it never changes rule semantics. Sources, in increasing
//! precedence: the JSON configuration file, `CSAF_*` environment variables,
//! command-line flags.
//!
//! The `remote` section is parsed and carried for forward compatibility but
//! never acted upon: this tool does not fetch advisories.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Short application alias, also the binary name.
pub const APP_ALIAS: &str = "csaf";

/// Prefix for environment variable overrides.
pub const APP_ENV: &str = "CSAF";

/// Default configuration file name, looked up in the working directory or
/// the user's home folder.
pub const DEFAULT_CONFIG_NAME: &str = ".csaf.json";

/// Remote endpoint credentials (carried, never used).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSection {
    pub user: String,
    pub token: String,
    pub base_url: String,
}

/// Local behavior toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSection {
    pub bail_out: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub strict: bool,
}

/// A parsed `.csaf.json` configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub remote: RemoteSection,
    pub local: LocalSection,
}

/// Return a template of a well-formed JSON configuration.
pub fn generate_template() -> String {
    let template = Configuration::default();
    // Defaults serialize to a complete, fillable skeleton.
    let mut text = serde_json::to_string_pretty(&template)
        .unwrap_or_else(|_| "{}".to_string());
    text.push('\n');
    text
}

/// Read a configuration file.
///
/// # Errors
///
/// Fails when the path is not a `.json` file, cannot be read, or does not
/// parse as a configuration document.
pub fn read_configuration(path: &Path) -> anyhow::Result<Configuration> {
    if !path.is_file() {
        anyhow::bail!("config ({}) is no file", path.display());
    }
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if !is_json {
        anyhow::bail!("config has no .json extension");
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config ({})", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("config ({}) is no valid JSON configuration", path.display()))
}

/// Truthiness of a `CSAF_*` environment variable: any non-empty value.
fn env_flag(suffix: &str) -> bool {
    std::env::var(format!("{APP_ENV}_{suffix}"))
        .map(|v| !v.is_empty())
        .unwrap_or(false)
}

/// Boolean toggles read from the process environment once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub bail_out: bool,
    pub debug: bool,
    pub dry_run: bool,
    pub quiet: bool,
    pub strict: bool,
    pub verbose: bool,
}

impl EnvOverrides {
    /// Snapshot the `CSAF_*` toggles.
    pub fn from_env() -> Self {
        Self {
            bail_out: env_flag("BAIL_OUT"),
            debug: env_flag("DEBUG"),
            dry_run: env_flag("DRY_RUN"),
            quiet: env_flag("QUIET"),
            strict: env_flag("STRICT"),
            verbose: env_flag("VERBOSE"),
        }
    }
}
