// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Manual segment membership.
//!
//! Both clients expose `add_people_to_segment` and `remove_people_from_segment`.
//! The track client uses its configured [`IdType`]; the app client takes one
//! per call. Either way the whole id list goes out in a single request:
//!
//! ```text
//! POST {base}/api/v1/segments/{segment_id}/add_customers?id_type={id_type}
//! {"ids": ["1", "2", "3"]}
//! ```

use reqwest::{Method, Url};
use serde::Serialize;
use tracing::{instrument, Span};

use crate::api::ApiClient;
use crate::error::{CustomerIoError, Result};
use crate::id_type::IdType;
use crate::track::TrackClient;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Membership {
	Add,
	Remove,
}

impl Membership {
	fn action(&self) -> &'static str {
		match self {
			Membership::Add => "add_customers",
			Membership::Remove => "remove_customers",
		}
	}
}

#[derive(Debug, Serialize)]
struct MembershipRequest<'a> {
	ids: Vec<&'a str>,
}

fn validate<S: AsRef<str>>(segment_id: u64, ids: &[S]) -> Result<()> {
	if segment_id == 0 {
		return Err(CustomerIoError::param("segmentID"));
	}
	if ids.is_empty() {
		return Err(CustomerIoError::param("ids"));
	}
	Ok(())
}

fn membership_url(
	transport: &Transport,
	membership: Membership,
	segment_id: u64,
	id_type: IdType,
) -> Url {
	let segment = segment_id.to_string();
	let mut url = transport.endpoint([
		"api",
		"v1",
		"segments",
		segment.as_str(),
		membership.action(),
	]);
	url.query_pairs_mut().append_pair("id_type", id_type.as_str());
	url
}

async fn update_membership<S: AsRef<str>>(
	transport: &Transport,
	membership: Membership,
	segment_id: u64,
	id_type: IdType,
	ids: &[S],
) -> Result<()> {
	validate(segment_id, ids)?;

	let url = membership_url(transport, membership, segment_id, id_type);
	let body = MembershipRequest {
		ids: ids.iter().map(|id| id.as_ref()).collect(),
	};

	transport.send_json(Method::POST, url, &body).await
}

impl TrackClient {
	/// Adds people to a manual segment, interpreting `ids` in the client's [`IdType`].
	///
	/// # Example
	///
	/// ```ignore
	/// client.add_people_to_segment(7, &["1", "2", "3"]).await?;
	/// ```
	#[instrument(skip(self, ids), fields(id_type = %self.id_type(), count = ids.len()))]
	pub async fn add_people_to_segment<S: AsRef<str>>(
		&self,
		segment_id: u64,
		ids: &[S],
	) -> Result<()> {
		update_membership(
			self.transport(),
			Membership::Add,
			segment_id,
			self.id_type(),
			ids,
		)
		.await
	}

	/// Removes people from a manual segment, interpreting `ids` in the client's [`IdType`].
	#[instrument(skip(self, ids), fields(id_type = %self.id_type(), count = ids.len()))]
	pub async fn remove_people_from_segment<S: AsRef<str>>(
		&self,
		segment_id: u64,
		ids: &[S],
	) -> Result<()> {
		update_membership(
			self.transport(),
			Membership::Remove,
			segment_id,
			self.id_type(),
			ids,
		)
		.await
	}
}

impl ApiClient {
	/// Adds people to a manual segment.
	///
	/// `id_type` accepts an [`IdType`] or a raw string; unknown strings are sent as `id`.
	///
	/// # Example
	///
	/// ```ignore
	/// client.add_people_to_segment(7, IdType::Email, &["a@example.com"]).await?;
	/// client.add_people_to_segment(7, "cio_id", &["c0ffee"]).await?;
	/// ```
	#[instrument(
		skip(self, id_type, ids),
		fields(id_type = tracing::field::Empty, count = ids.len())
	)]
	pub async fn add_people_to_segment<S: AsRef<str>>(
		&self,
		segment_id: u64,
		id_type: impl Into<IdType>,
		ids: &[S],
	) -> Result<()> {
		let id_type = id_type.into();
		Span::current().record("id_type", id_type.as_str());
		update_membership(self.transport(), Membership::Add, segment_id, id_type, ids).await
	}

	/// Removes people from a manual segment.
	#[instrument(
		skip(self, id_type, ids),
		fields(id_type = tracing::field::Empty, count = ids.len())
	)]
	pub async fn remove_people_from_segment<S: AsRef<str>>(
		&self,
		segment_id: u64,
		id_type: impl Into<IdType>,
		ids: &[S],
	) -> Result<()> {
		let id_type = id_type.into();
		Span::current().record("id_type", id_type.as_str());
		update_membership(self.transport(), Membership::Remove, segment_id, id_type, ids).await
	}
}
