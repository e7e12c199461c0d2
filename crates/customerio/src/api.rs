// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! App API client, authenticated with a bearer token.

use reqwest::Client;
use tracing::info;

use crate::credentials::Credential;
use crate::env::{self, DEFAULT_PREFIX};
use crate::error::Result;
use crate::options::ClientOptions;
use crate::region::Region;
use crate::transport::{Auth, Transport};

/// Builder for constructing an [`ApiClient`].
pub struct ApiClientBuilder {
	app_key: Credential,
	options: ClientOptions,
}

impl ApiClientBuilder {
	pub fn new(app_key: impl Into<Credential>) -> Self {
		Self {
			app_key: app_key.into(),
			options: ClientOptions::default(),
		}
	}

	/// Selects the data-residency region. Ignored when a base URL is set.
	pub fn region(mut self, region: Region) -> Self {
		self.options.region = region;
		self
	}

	/// Overrides the base URL (useful for testing).
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.options.base_url = Some(url.into());
		self
	}

	/// Uses the given HTTP client for all requests.
	pub fn http_client(mut self, client: Client) -> Self {
		self.options.http_client = Some(client);
		self
	}

	/// Sets the User-Agent sent with every request.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.options.user_agent = Some(user_agent.into());
		self
	}

	pub fn build(self) -> Result<ApiClient> {
		let transport = Transport::new(
			self.options,
			Region::api_url,
			Auth::Bearer(self.app_key),
		)?;

		info!(base_url = %transport.base_url(), "Customer.io app client initialized");

		Ok(ApiClient { transport })
	}
}

/// Client for the app API.
///
/// Segment calls take the identifier namespace per call, see
/// [`ApiClient::add_people_to_segment`].
#[derive(Debug, Clone)]
pub struct ApiClient {
	transport: Transport,
}

impl ApiClient {
	pub fn builder(app_key: impl Into<Credential>) -> ApiClientBuilder {
		ApiClientBuilder::new(app_key)
	}

	/// Creates a client for the US region with default settings.
	pub fn new(app_key: impl Into<Credential>) -> Result<Self> {
		Self::builder(app_key).build()
	}

	/// Creates a client from `CUSTOMERIO_APP_API_KEY` and `CUSTOMERIO_REGION`.
	pub fn from_env() -> Result<Self> {
		Self::from_env_with_prefix(DEFAULT_PREFIX)
	}

	pub(crate) fn from_env_with_prefix(prefix: &str) -> Result<Self> {
		let app_key = env::require_secret_env(&format!("{prefix}_APP_API_KEY"))?;
		let region = env::region_from_env(prefix)?;

		Self::builder(app_key).region(region).build()
	}

	pub fn base_url(&self) -> &str {
		self.transport.base_url()
	}

	pub fn user_agent(&self) -> &str {
		self.transport.user_agent()
	}

	pub fn http_client(&self) -> &Client {
		self.transport.http_client()
	}

	pub(crate) fn transport(&self) -> &Transport {
		&self.transport
	}
}
