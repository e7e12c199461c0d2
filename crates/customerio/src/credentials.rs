// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacted wrapper for site ids and API keys.
//!
//! [`Credential`] never prints its value through `Debug` or `Display`, so a
//! client can be logged with `?client` or `%key` safely. The value is zeroed
//! when dropped and must be read with [`Credential::expose`].
//!
//! ```
//! use customerio::Credential;
//!
//! let key = Credential::new("sk-secret-key");
//! assert_eq!(format!("{key:?}"), "Credential(\"[REDACTED]\")");
//! assert_eq!(format!("{key}"), "[REDACTED]");
//! assert_eq!(key.expose(), "sk-secret-key");
//! ```

use std::fmt;

use zeroize::Zeroize;

/// The placeholder printed in place of a credential.
pub const REDACTED: &str = "[REDACTED]";

/// A secret string such as an API key or site id.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct Credential {
	inner: String,
}

impl Credential {
	pub fn new(inner: impl Into<String>) -> Self {
		Self {
			inner: inner.into(),
		}
	}

	/// Explicitly access the value. Keeps every read visible in review.
	pub fn expose(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl From<String> for Credential {
	fn from(inner: String) -> Self {
		Self::new(inner)
	}
}

impl From<&str> for Credential {
	fn from(inner: &str) -> Self {
		Self::new(inner)
	}
}

impl fmt::Debug for Credential {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Credential").field(&REDACTED).finish()
	}
}

impl fmt::Display for Credential {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn debug_is_redacted() {
		let key = Credential::new("super-secret-api-key");
		let debug_output = format!("{key:?}");

		assert!(!debug_output.contains("super-secret-api-key"));
		assert!(debug_output.contains(REDACTED));
	}

	#[test]
	fn display_is_redacted() {
		let key = Credential::new("super-secret-api-key");
		assert_eq!(format!("{key}"), REDACTED);
	}

	#[test]
	fn expose_returns_inner_value() {
		let key = Credential::from("my-api-key".to_string());
		assert_eq!(key.expose(), "my-api-key");
		assert!(!key.is_empty());
		assert!(Credential::from("").is_empty());
	}

	/// Config structs usually hold `Option<Credential>`.
	#[test]
	fn option_credential_debug_is_redacted() {
		let key = Some(Credential::new("super-secret-value"));
		let debug = format!("{key:?}");
		assert!(debug.contains(REDACTED));
		assert!(!debug.contains("super-secret-value"));
	}

	proptest! {
		#[test]
		fn debug_never_contains_value(inner in "[a-zA-Z0-9!@#$%^&*_+=;:,.<>?/-]{3,50}") {
			prop_assume!(!inner.contains("REDACTED"));
			prop_assume!(!inner.contains("Credential"));

			let key = Credential::new(inner.clone());
			let debug = format!("{key:?}");
			prop_assert!(!debug.contains(&inner));
		}

		#[test]
		fn display_never_contains_value(inner in "[a-zA-Z0-9!@#$%^&*_+=;:,.<>?/-]{3,50}") {
			prop_assume!(!inner.contains("REDACTED"));

			let key = Credential::new(inner.clone());
			let display = format!("{key}");
			prop_assert!(!display.contains(&inner));
		}
	}
}
