// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Construction-time settings shared by both client builders.

use reqwest::Client;

use crate::region::Region;

/// Settings collected by a builder. Each setter overwrites the previous value.
#[derive(Debug, Clone, Default)]
pub(crate) struct ClientOptions {
	pub(crate) region: Region,
	pub(crate) base_url: Option<String>,
	pub(crate) http_client: Option<Client>,
	pub(crate) user_agent: Option<String>,
}

impl ClientOptions {
	/// Explicit base URL if one was set, else the region's URL picked by `by_region`.
	pub(crate) fn resolve_base_url(&self, by_region: fn(&Region) -> &'static str) -> String {
		self
			.base_url
			.clone()
			.unwrap_or_else(|| by_region(&self.region).to_string())
	}
}
