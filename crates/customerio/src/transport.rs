// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request execution shared by the track and app clients.
//!
//! Every request carries the configured User-Agent and credentials and is
//! sent exactly once. Non-2xx responses become [`CustomerIoError::Api`].

use reqwest::header::USER_AGENT;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Url};
use serde::Serialize;
use tracing::{debug, error};

use crate::credentials::Credential;
use crate::error::{CustomerIoError, Result};
use crate::options::ClientOptions;
use crate::region::Region;

const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the User-Agent sent when none is configured.
///
/// Format: `Customer.io Rust Client/{version}`
pub fn default_user_agent() -> String {
	format!("Customer.io Rust Client/{SDK_VERSION}")
}

/// HTTP client builder preloaded with the default User-Agent.
///
/// Use this to customise a transport (timeouts, proxies) before handing it
/// to a client builder's `http_client`.
pub fn http_client_builder() -> ClientBuilder {
	Client::builder().user_agent(default_user_agent())
}

#[derive(Debug, Clone)]
pub(crate) enum Auth {
	Basic {
		site_id: Credential,
		api_key: Credential,
	},
	Bearer(Credential),
}

#[derive(Debug, Clone)]
pub(crate) struct Transport {
	http_client: Client,
	base_url: Url,
	user_agent: String,
	auth: Auth,
}

impl Transport {
	pub(crate) fn new(
		options: ClientOptions,
		by_region: fn(&Region) -> &'static str,
		auth: Auth,
	) -> Result<Self> {
		let raw = options.resolve_base_url(by_region);
		let mut base_url = Url::parse(&raw)
			.map_err(|e| CustomerIoError::InvalidBaseUrl(format!("{raw}: {e}")))?;
		if base_url.cannot_be_a_base() {
			return Err(CustomerIoError::InvalidBaseUrl(raw));
		}
		// Only `id_type` may appear in the query of a request URL.
		base_url.set_query(None);
		base_url.set_fragment(None);

		let http_client = match options.http_client {
			Some(client) => client,
			None => http_client_builder().build()?,
		};

		Ok(Self {
			http_client,
			base_url,
			user_agent: options.user_agent.unwrap_or_else(default_user_agent),
			auth,
		})
	}

	/// Base URL without a trailing slash.
	pub(crate) fn base_url(&self) -> &str {
		self.base_url.as_str().trim_end_matches('/')
	}

	pub(crate) fn user_agent(&self) -> &str {
		&self.user_agent
	}

	pub(crate) fn http_client(&self) -> &Client {
		&self.http_client
	}

	/// Appends percent-encoded path segments to the base URL.
	pub(crate) fn endpoint<I>(&self, segments: I) -> Url
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		let mut url = self.base_url.clone();
		// Checked in `new`: the base URL is hierarchical.
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().extend(segments);
		}
		url
	}

	pub(crate) async fn send_json<B>(&self, method: Method, url: Url, body: &B) -> Result<()>
	where
		B: Serialize + ?Sized,
	{
		let request = self.request(method, &url).json(body);
		self.execute(request, url).await
	}

	pub(crate) async fn send_empty(&self, method: Method, url: Url) -> Result<()> {
		let request = self.request(method, &url);
		self.execute(request, url).await
	}

	fn request(&self, method: Method, url: &Url) -> RequestBuilder {
		let request = self
			.http_client
			.request(method, url.clone())
			.header(USER_AGENT, &self.user_agent);

		match &self.auth {
			Auth::Basic { site_id, api_key } => {
				request.basic_auth(site_id.expose(), Some(api_key.expose()))
			}
			Auth::Bearer(token) => request.bearer_auth(token.expose()),
		}
	}

	async fn execute(&self, request: RequestBuilder, url: Url) -> Result<()> {
		debug!(url = %url, "Sending request to Customer.io");

		let response = request.send().await.map_err(|e| {
			error!(error = %e, url = %url, "Network error during Customer.io request");
			CustomerIoError::Transport(e)
		})?;

		let status = response.status();
		debug!(status = %status, "Received response from Customer.io");

		if !status.is_success() {
			let body = match response.text().await {
				Ok(body) => body,
				Err(e) => {
					error!(
						error = %e,
						status = status.as_u16(),
						"Failed to read Customer.io error response body"
					);
					String::new()
				}
			};
			error!(status = status.as_u16(), body = %body, "Customer.io API error");
			return Err(CustomerIoError::Api {
				status: status.as_u16(),
				url: url.to_string(),
				body,
			});
		}

		Ok(())
	}
}
