// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust SDK for the Customer.io track and app APIs.
//!
//! Two clients are provided:
//!
//! | Client | Auth | Default base URL |
//! |--------|------|------------------|
//! | [`TrackClient`] | site id + API key (basic) | `https://track.customer.io` |
//! | [`ApiClient`] | app API key (bearer) | `https://api.customer.io` |
//!
//! # Quick Start
//!
//! ```ignore
//! use customerio::{ApiClient, IdType, Region, TrackClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), customerio::CustomerIoError> {
//!     let track = TrackClient::builder("site_id", "api_key")
//!         .region(Region::Eu)
//!         .id_type(IdType::Email)
//!         .build()?;
//!
//!     track.add_people_to_segment(7, &["a@example.com", "b@example.com"]).await?;
//!
//!     let app = ApiClient::new("app_api_key")?;
//!     app.remove_people_from_segment(7, "cio_id", &["c0ffee"]).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Identifier Namespaces
//!
//! Segment calls interpret ids as `id`, `email` or `cio_id`. Anything else,
//! including an empty string, is sent as `id`; it is never an error.
//!
//! # Error Handling
//!
//! Every call makes at most one HTTP request and never retries.
//!
//! ```ignore
//! use customerio::CustomerIoError;
//!
//! match client.add_people_to_segment(0, &["1"]).await {
//!     Err(CustomerIoError::Param { param }) => eprintln!("bad argument: {param}"),
//!     Err(CustomerIoError::Api { status, body, .. }) => eprintln!("{status}: {body}"),
//!     Err(e) => eprintln!("transport: {e}"),
//!     Ok(()) => {}
//! }
//! ```

pub mod api;
pub mod credentials;
pub mod env;
pub mod error;
pub mod id_type;
mod options;
pub mod region;
mod segments;
pub mod track;
mod transport;

pub use api::{ApiClient, ApiClientBuilder};
pub use credentials::{Credential, REDACTED};
pub use env::{load_secret_env, require_secret_env, RequiredSecretError, SecretEnvError};
pub use error::{CustomerIoError, Result};
pub use id_type::{IdType, Identifier};
pub use region::Region;
pub use track::{Attributes, TrackClient, TrackClientBuilder};
pub use transport::{default_user_agent, http_client_builder};
