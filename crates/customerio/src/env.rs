// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Environment variable configuration.
//!
//! Credentials follow the `VAR` / `VAR_FILE` convention used by Docker and
//! Kubernetes secrets: when `{VAR}_FILE` is set the value is read from that
//! path (one trailing newline stripped), otherwise `{VAR}` is used directly.
//!
//! | Variable | Used by |
//! |----------|---------|
//! | `CUSTOMERIO_SITE_ID` | [`TrackClient::from_env`](crate::TrackClient::from_env) |
//! | `CUSTOMERIO_API_KEY` | [`TrackClient::from_env`](crate::TrackClient::from_env) |
//! | `CUSTOMERIO_APP_API_KEY` | [`ApiClient::from_env`](crate::ApiClient::from_env) |
//! | `CUSTOMERIO_REGION` | both, optional, `us` or `eu` |
//! | `CUSTOMERIO_ID_TYPE` | track client, optional |

use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;

use crate::credentials::Credential;
use crate::error::Result;
use crate::region::Region;

pub(crate) const DEFAULT_PREFIX: &str = "CUSTOMERIO";

/// Failure to read a Customer.io credential that was configured through
/// the environment.
#[derive(Debug, Error)]
pub enum SecretEnvError {
	/// `{VAR}_FILE` named a file that could not be read.
	#[error("cannot read credential file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// `{VAR}_FILE` is set but empty. Treated as a misconfiguration rather
	/// than falling back to `{VAR}`.
	#[error("{var} is set but names no file")]
	EmptyPath { var: String },
}

/// Failure to produce a credential a client cannot be built without.
#[derive(Debug, Error)]
pub enum RequiredSecretError {
	/// Neither `{VAR}` nor `{VAR}_FILE` is set.
	#[error("required secret not found: set either {var} or {file_var}")]
	Missing { var: String, file_var: String },

	/// `{VAR}_FILE` was set but could not be used.
	#[error(transparent)]
	Load(#[from] SecretEnvError),
}

fn file_var(var: &str) -> String {
	format!("{var}_FILE")
}

/// Reads a mounted secret, dropping a single trailing newline.
fn read_secret_file(path: PathBuf) -> std::result::Result<Credential, SecretEnvError> {
	match fs::read_to_string(&path) {
		Ok(mut content) => {
			if content.ends_with('\n') {
				content.pop();
			}
			Ok(Credential::new(content))
		}
		Err(source) => Err(SecretEnvError::Io { path, source }),
	}
}

/// Loads a site id or API key from the environment.
///
/// `{var}_FILE` is consulted first and, when present, must name a readable
/// file; `{var}` is only used when no file variable exists. `Ok(None)` means
/// neither variable is set.
///
/// ```no_run
/// let key = customerio::load_secret_env("CUSTOMERIO_APP_API_KEY")?;
/// # Ok::<(), customerio::SecretEnvError>(())
/// ```
pub fn load_secret_env(var: &str) -> std::result::Result<Option<Credential>, SecretEnvError> {
	let file_var = file_var(var);
	match env::var_os(&file_var) {
		Some(path) if path.is_empty() => Err(SecretEnvError::EmptyPath { var: file_var }),
		Some(path) => read_secret_file(PathBuf::from(path)).map(Some),
		None => Ok(env::var(var).ok().map(Credential::new)),
	}
}

/// Loads a credential the caller cannot proceed without.
///
/// Same lookup as [`load_secret_env`]; an absent value becomes
/// [`RequiredSecretError::Missing`] naming both variables.
pub fn require_secret_env(var: &str) -> std::result::Result<Credential, RequiredSecretError> {
	load_secret_env(var)?.ok_or_else(|| RequiredSecretError::Missing {
		var: var.to_string(),
		file_var: file_var(var),
	})
}

/// Reads `{prefix}_REGION`. Unset or empty means the default region.
pub(crate) fn region_from_env(prefix: &str) -> Result<Region> {
	match env::var(format!("{prefix}_REGION")) {
		Ok(tag) if !tag.trim().is_empty() => tag.parse(),
		_ => Ok(Region::default()),
	}
}

pub(crate) fn optional_env(prefix: &str, name: &str) -> Option<String> {
	env::var(format!("{prefix}_{name}"))
		.ok()
		.filter(|v| !v.is_empty())
}
