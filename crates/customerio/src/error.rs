// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Customer.io SDK.

use thiserror::Error;

use crate::env::RequiredSecretError;

/// Customer.io SDK errors.
#[derive(Debug, Error)]
pub enum CustomerIoError {
	/// A required parameter was missing or invalid. Raised before any request is sent.
	#[error("{param}: missing")]
	Param { param: &'static str },

	/// The API answered with a non-2xx status.
	#[error("{status}: {url} {body}")]
	Api {
		status: u16,
		url: String,
		body: String,
	},

	/// HTTP request failed before a response was received.
	#[error(transparent)]
	Transport(#[from] reqwest::Error),

	/// Base URL could not be used to build request URLs.
	#[error("invalid base URL: {0}")]
	InvalidBaseUrl(String),

	/// Region tag is not one of `us` or `eu`.
	#[error("unknown region: {0}")]
	UnknownRegion(String),

	/// Required configuration was not found in the environment.
	#[error(transparent)]
	Env(#[from] RequiredSecretError),
}

impl CustomerIoError {
	pub(crate) fn param(param: &'static str) -> Self {
		CustomerIoError::Param { param }
	}

	/// Returns the HTTP status for API errors.
	pub fn status(&self) -> Option<u16> {
		match self {
			CustomerIoError::Api { status, .. } => Some(*status),
			CustomerIoError::Transport(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}

	/// Whether a caller-side retry could succeed. The SDK itself never retries.
	pub fn is_retryable(&self) -> bool {
		match self {
			CustomerIoError::Api { status, .. } => {
				matches!(*status, 429 | 408 | 500 | 502 | 503 | 504)
			}
			CustomerIoError::Transport(e) => e.is_timeout() || e.is_connect(),
			_ => false,
		}
	}
}

/// Result type alias for Customer.io operations.
pub type Result<T> = std::result::Result<T, CustomerIoError>;

#[cfg(test)]
mod tests {
	use super::*;

	fn api_error(status: u16) -> CustomerIoError {
		CustomerIoError::Api {
			status,
			url: "https://track.customer.io/api/v1/segments/1/add_customers".to_string(),
			body: "nope".to_string(),
		}
	}

	#[test]
	fn test_param_error_display_names_param() {
		let err = CustomerIoError::param("segmentID");
		assert_eq!(err.to_string(), "segmentID: missing");
	}

	#[test]
	fn test_api_error_display_includes_status_url_and_body() {
		let err = api_error(404);
		assert_eq!(
			err.to_string(),
			"404: https://track.customer.io/api/v1/segments/1/add_customers nope"
		);
		assert_eq!(err.status(), Some(404));
	}

	#[test]
	fn test_api_error_retryable_statuses() {
		for status in [429, 408, 500, 502, 503, 504] {
			assert!(api_error(status).is_retryable(), "status {status} should be retryable");
		}
	}

	#[test]
	fn test_api_error_non_retryable_statuses() {
		for status in [400, 401, 403, 404, 422] {
			assert!(
				!api_error(status).is_retryable(),
				"status {status} should not be retryable"
			);
		}
	}

	#[test]
	fn test_param_error_not_retryable() {
		assert!(!CustomerIoError::param("ids").is_retryable());
		assert_eq!(CustomerIoError::param("ids").status(), None);
	}
}
