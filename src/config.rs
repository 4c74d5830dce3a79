//! Resolves the per-run upload configuration from the environment.
//!
//! The environment is read exactly once, at the top of the run; every
//! other component receives the resulting [`UploadRequest`] by value and
//! never touches `std::env` itself.

use std::path::PathBuf;

use thiserror::Error;

pub const ENV_ACCESS_KEY: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_SECRET_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_BUCKET: &str = "AWS_BUCKET";
pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_PREFIX: &str = "AWS_PREFIX";
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const ENV_ENDPOINT: &str = "AWS_ENDPOINT";

/// Required variables with the descriptions shown to the operator when
/// one of them is missing.
const REQUIRED_VARS: [(&str, &str); 4] = [
    (ENV_ACCESS_KEY, "Access key ID for AWS"),
    (ENV_SECRET_KEY, "Secret access key ID for AWS"),
    (ENV_BUCKET, "Name of the S3 bucket"),
    (ENV_REGION, "AWS region for the bucket"),
];

/// Everything one upload run needs, assembled before any I/O happens.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: Option<String>,
    pub region: String,
    pub bucket: String,
    /// Key prefix inside the bucket. May be empty.
    pub prefix: String,
    /// Optional S3-compatible endpoint override (MinIO, R2, ...).
    pub endpoint: Option<String>,
    pub archive_file: PathBuf,
    pub host_name: String,
    pub detected_os: &'static str,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "One or more required environment variables are not set;\n\
         please ensure that the following environment variables are set:\n\n{}",
        render_missing(.missing)
    )]
    MissingConfiguration {
        missing: Vec<(&'static str, &'static str)>,
    },
}

impl ConfigError {
    /// Names of the variables this error reports as missing.
    pub fn missing_names(&self) -> Vec<&'static str> {
        match self {
            ConfigError::MissingConfiguration { missing } => {
                missing.iter().map(|(name, _)| *name).collect()
            }
        }
    }
}

/// Two-column table of variable name and description, aligned on the
/// widest name.
fn render_missing(missing: &[(&'static str, &'static str)]) -> String {
    let width = missing.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    missing
        .iter()
        .map(|(name, descr)| format!("  {name:<width$}  {descr}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl UploadRequest {
    /// Builds the request from the process environment. The single
    /// `std::env` read site of the whole run.
    pub fn from_env(archive_file: PathBuf, host_name: String) -> Result<Self, ConfigError> {
        Self::resolve(archive_file, host_name, |name| std::env::var(name).ok())
    }

    /// Builds the request through an injected variable lookup. A variable
    /// that is unset or set to the empty string counts as missing; the
    /// error names every missing required variable and only those.
    pub fn resolve(
        archive_file: PathBuf,
        host_name: String,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let [access_key, secret_key, bucket, region] = REQUIRED_VARS.map(|(name, descr)| {
            match lookup(name) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    missing.push((name, descr));
                    String::new()
                }
            }
        });
        if !missing.is_empty() {
            return Err(ConfigError::MissingConfiguration { missing });
        }

        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        Ok(UploadRequest {
            access_key,
            secret_key,
            session_token: non_empty(ENV_SESSION_TOKEN),
            region,
            bucket,
            prefix: lookup(ENV_PREFIX).unwrap_or_default(),
            endpoint: non_empty(ENV_ENDPOINT),
            archive_file,
            host_name,
            detected_os: std::env::consts::OS,
        })
    }
}
