// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Track API client.
//!
//! Authenticates with a site id and API key (HTTP basic auth) against the
//! regional track endpoint.

use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::credentials::Credential;
use crate::env::{self, DEFAULT_PREFIX};
use crate::error::{CustomerIoError, Result};
use crate::id_type::{IdType, Identifier};
use crate::options::ClientOptions;
use crate::region::Region;
use crate::transport::{Auth, Transport};

/// Free-form customer attributes or event data.
pub type Attributes = serde_json::Map<String, Value>;

/// Builder for constructing a [`TrackClient`].
///
/// Setters may be called in any order; the last call for a setting wins.
pub struct TrackClientBuilder {
	site_id: Credential,
	api_key: Credential,
	id_type: IdType,
	options: ClientOptions,
}

impl TrackClientBuilder {
	pub fn new(site_id: impl Into<Credential>, api_key: impl Into<Credential>) -> Self {
		Self {
			site_id: site_id.into(),
			api_key: api_key.into(),
			id_type: IdType::default(),
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

	/// Namespace used by segment membership calls. Unknown values become `id`.
	pub fn id_type(mut self, id_type: impl Into<IdType>) -> Self {
		self.id_type = id_type.into();
		self
	}

	pub fn build(self) -> Result<TrackClient> {
		let auth = Auth::Basic {
			site_id: self.site_id,
			api_key: self.api_key,
		};
		let transport = Transport::new(self.options, Region::track_url, auth)?;

		info!(
			base_url = %transport.base_url(),
			id_type = %self.id_type,
			"Customer.io track client initialized"
		);

		Ok(TrackClient {
			transport,
			id_type: self.id_type,
		})
	}
}

/// Client for the track API.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use customerio::{Region, TrackClient};
///
/// let client = TrackClient::builder("site_id", "api_key")
///     .region(Region::Eu)
///     .id_type("email")
///     .build()?;
///
/// client.identify("5", &attributes).await?;
/// client.add_people_to_segment(7, &["a@example.com"]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct TrackClient {
	transport: Transport,
	id_type: IdType,
}

#[derive(Debug, Serialize)]
struct EventRequest<'a> {
	name: &'a str,
	data: &'a Attributes,
	#[serde(skip_serializing_if = "Option::is_none")]
	anonymous_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DeviceRequest {
	device: Attributes,
}

#[derive(Debug, Serialize)]
struct MergeRequest<'a> {
	primary: &'a Identifier,
	secondary: &'a Identifier,
}

impl TrackClient {
	pub fn builder(
		site_id: impl Into<Credential>,
		api_key: impl Into<Credential>,
	) -> TrackClientBuilder {
		TrackClientBuilder::new(site_id, api_key)
	}

	/// Creates a client for the US region with default settings.
	pub fn new(site_id: impl Into<Credential>, api_key: impl Into<Credential>) -> Result<Self> {
		Self::builder(site_id, api_key).build()
	}

	/// Creates a client from `CUSTOMERIO_*` environment variables.
	///
	/// See [`crate::env`] for the variables read.
	pub fn from_env() -> Result<Self> {
		Self::from_env_with_prefix(DEFAULT_PREFIX)
	}

	pub(crate) fn from_env_with_prefix(prefix: &str) -> Result<Self> {
		let site_id = env::require_secret_env(&format!("{prefix}_SITE_ID"))?;
		let api_key = env::require_secret_env(&format!("{prefix}_API_KEY"))?;

		let region = env::region_from_env(prefix)?;

		let mut builder = Self::builder(site_id, api_key).region(region);
		if let Some(id_type) = env::optional_env(prefix, "ID_TYPE") {
			builder = builder.id_type(id_type);
		}
		builder.build()
	}

	/// Base URL requests are sent to, without a trailing slash.
	pub fn base_url(&self) -> &str {
		self.transport.base_url()
	}

	pub fn user_agent(&self) -> &str {
		self.transport.user_agent()
	}

	pub fn http_client(&self) -> &Client {
		self.transport.http_client()
	}

	/// Namespace applied to segment membership calls.
	pub fn id_type(&self) -> IdType {
		self.id_type
	}

	pub(crate) fn transport(&self) -> &Transport {
		&self.transport
	}

	/// Creates or updates a customer.
	#[instrument(skip(self, attributes))]
	pub async fn identify(&self, customer_id: &str, attributes: &Attributes) -> Result<()> {
		if customer_id.is_empty() {
			return Err(CustomerIoError::param("customerID"));
		}

		let url = self.transport.endpoint(["api", "v1", "customers", customer_id]);
		self.transport.send_json(Method::PUT, url, attributes).await
	}

	/// Records an event for a known customer.
	#[instrument(skip(self, data))]
	pub async fn track(&self, customer_id: &str, name: &str, data: &Attributes) -> Result<()> {
		if customer_id.is_empty() {
			return Err(CustomerIoError::param("customerID"));
		}
		if name.is_empty() {
			return Err(CustomerIoError::param("eventName"));
		}

		let url = self
			.transport
			.endpoint(["api", "v1", "customers", customer_id, "events"]);
		let body = EventRequest {
			name,
			data,
			anonymous_id: None,
		};
		self.transport.send_json(Method::POST, url, &body).await
	}

	/// Records an event that is not tied to a known customer.
	///
	/// An empty `anonymous_id` is left out of the request.
	#[instrument(skip(self, data))]
	pub async fn track_anonymous(
		&self,
		anonymous_id: &str,
		name: &str,
		data: &Attributes,
	) -> Result<()> {
		if name.is_empty() {
			return Err(CustomerIoError::param("eventName"));
		}

		let url = self.transport.endpoint(["api", "v1", "events"]);
		let body = EventRequest {
			name,
			data,
			anonymous_id: Some(anonymous_id).filter(|id| !id.is_empty()),
		};
		self.transport.send_json(Method::POST, url, &body).await
	}

	/// Deletes a customer and all of their data.
	#[instrument(skip(self))]
	pub async fn delete(&self, customer_id: &str) -> Result<()> {
		if customer_id.is_empty() {
			return Err(CustomerIoError::param("customerID"));
		}

		let url = self.transport.endpoint(["api", "v1", "customers", customer_id]);
		self.transport.send_empty(Method::DELETE, url).await
	}

	/// Registers or updates a push device for a customer.
	///
	/// `data` is merged into the device object; `id` and `platform` always
	/// take the explicit arguments.
	#[instrument(skip(self, data))]
	pub async fn add_device(
		&self,
		customer_id: &str,
		device_id: &str,
		platform: &str,
		data: &Attributes,
	) -> Result<()> {
		if customer_id.is_empty() {
			return Err(CustomerIoError::param("customerID"));
		}
		if device_id.is_empty() {
			return Err(CustomerIoError::param("deviceID"));
		}
		if platform.is_empty() {
			return Err(CustomerIoError::param("platform"));
		}

		let mut device = data.clone();
		device.insert("id".to_string(), Value::from(device_id));
		device.insert("platform".to_string(), Value::from(platform));

		let url = self
			.transport
			.endpoint(["api", "v1", "customers", customer_id, "devices"]);
		self
			.transport
			.send_json(Method::PUT, url, &DeviceRequest { device })
			.await
	}

	/// Removes a push device from a customer.
	#[instrument(skip(self))]
	pub async fn delete_device(&self, customer_id: &str, device_id: &str) -> Result<()> {
		if customer_id.is_empty() {
			return Err(CustomerIoError::param("customerID"));
		}
		if device_id.is_empty() {
			return Err(CustomerIoError::param("deviceID"));
		}

		let url = self.transport.endpoint([
			"api",
			"v1",
			"customers",
			customer_id,
			"devices",
			device_id,
		]);
		self.transport.send_empty(Method::DELETE, url).await
	}

	/// Merges `secondary` into `primary`; the secondary profile is deleted.
	#[instrument(
		skip(self, primary, secondary),
		fields(primary_type = %primary.id_type, secondary_type = %secondary.id_type)
	)]
	pub async fn merge_customers(
		&self,
		primary: &Identifier,
		secondary: &Identifier,
	) -> Result<()> {
		if primary.is_empty() {
			return Err(CustomerIoError::param("primary"));
		}
		if secondary.is_empty() {
			return Err(CustomerIoError::param("secondary"));
		}

		let url = self.transport.endpoint(["api", "v1", "merge_customers"]);
		let body = MergeRequest { primary, secondary };
		self.transport.send_json(Method::POST, url, &body).await
	}
}
