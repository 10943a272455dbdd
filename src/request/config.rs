//! Request configuration file loading.
//!
//! ```toml
//! source_path = "functions/listener-count.js"
//! secrets_location = "remote"
//! expected_return_type = "int256"
//! args = ["ca22091a-3c00-11e9-974f-549f35141000", "Tones&I", "1000", "${ARTIST_EMAIL}"]
//!
//! [secrets]
//! soundchartAppId = "${SOUNDCHART_APP_ID}"
//! ```
//!
//! `${NAME}` placeholders are expanded from the captured [`Environment`].

use alloy::primitives::Bytes;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::env::Environment;
use crate::error::{FunctionsError, FunctionsResult};
use crate::request::types::{CodeLanguage, Location, ReturnType};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestConfigFile {
    source_path: PathBuf,
    #[serde(default)]
    code_language: CodeLanguage,
    #[serde(default)]
    secrets: BTreeMap<String, String>,
    #[serde(default = "default_secrets_location")]
    secrets_location: Location,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    bytes_args: Vec<Bytes>,
    expected_return_type: ReturnType,
}

fn default_secrets_location() -> Location {
    Location::Remote
}

/// Static description of a computation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    /// Source code executed by the DON.
    pub source: String,
    pub code_language: CodeLanguage,
    /// Secret name to value. Only used to decide whether secrets travel with
    /// the request; the encrypted bundle is produced separately.
    pub secrets: BTreeMap<String, String>,
    pub secrets_location: Location,
    pub args: Vec<String>,
    pub bytes_args: Vec<Bytes>,
    pub expected_return_type: ReturnType,
}

impl RequestConfig {
    /// Load a request config file. `source_path` resolves relative to it.
    pub fn load(path: &Path, env: &Environment) -> FunctionsResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            FunctionsError::Config(format!("cannot read request config {}: {}", path.display(), e))
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml_str(&text, base, env)
    }

    /// Parse request config text, reading the source relative to `base_dir`.
    pub fn from_toml_str(text: &str, base_dir: &Path, env: &Environment) -> FunctionsResult<Self> {
        let file: RequestConfigFile = toml::from_str(text)
            .map_err(|e| FunctionsError::Config(format!("invalid request config: {}", e)))?;

        let source_path = base_dir.join(&file.source_path);
        let source = std::fs::read_to_string(&source_path).map_err(|e| {
            FunctionsError::Config(format!(
                "cannot read request source {}: {}",
                source_path.display(),
                e
            ))
        })?;

        let secrets = file
            .secrets
            .into_iter()
            .map(|(name, value)| {
                let value = interpolate(&value, env)
                    .map_err(|var| FunctionsError::Config(format!("secret '{}' references unset variable {}", name, var)))?;
                Ok((name, value))
            })
            .collect::<FunctionsResult<BTreeMap<_, _>>>()?;

        let args = file
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                interpolate(arg, env)
                    .map_err(|var| FunctionsError::Config(format!("args[{}] references unset variable {}", i, var)))
            })
            .collect::<FunctionsResult<Vec<_>>>()?;

        tracing::debug!(
            source = %source_path.display(),
            secrets = secrets.len(),
            args = args.len(),
            expected_return_type = %file.expected_return_type,
            "Request config loaded"
        );

        Ok(Self {
            source,
            code_language: file.code_language,
            secrets,
            secrets_location: file.secrets_location,
            args,
            bytes_args: file.bytes_args,
            expected_return_type: file.expected_return_type,
        })
    }

    /// Whether the request carries any secrets.
    pub fn has_secrets(&self) -> bool {
        !self.secrets.is_empty()
    }
}

/// Expand `$NAME` / `${NAME}` from the captured environment. Returns the
/// first unset variable name on failure.
fn interpolate(value: &str, env: &Environment) -> Result<String, String> {
    shellexpand::env_with_context(value, |name| env.get(name).map(Some).ok_or(()))
        .map(|expanded| expanded.into_owned())
        .map_err(|e| e.var_name)
}
