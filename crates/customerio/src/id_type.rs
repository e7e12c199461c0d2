// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identifier namespaces.
//!
//! Every id passed in a batch call must belong to the same namespace. Unknown
//! values fall back to [`IdType::Id`] instead of failing.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Which kind of value a customer identifier represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IdType {
	/// The customer id assigned by the account.
	#[default]
	Id,
	/// The customer's email address.
	Email,
	/// The platform-assigned `cio_id`.
	CioId,
}

impl IdType {
	/// Resolves a raw namespace string. Anything other than `email` or
	/// `cio_id` resolves to `id`.
	pub fn resolve(raw: &str) -> Self {
		match raw {
			"email" => IdType::Email,
			"cio_id" => IdType::CioId,
			_ => IdType::Id,
		}
	}

	/// Wire value used for the `id_type` query parameter.
	pub fn as_str(&self) -> &'static str {
		match self {
			IdType::Id => "id",
			IdType::Email => "email",
			IdType::CioId => "cio_id",
		}
	}
}

impl fmt::Display for IdType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for IdType {
	fn from(raw: &str) -> Self {
		IdType::resolve(raw)
	}
}

impl From<String> for IdType {
	fn from(raw: String) -> Self {
		IdType::resolve(&raw)
	}
}

impl From<&String> for IdType {
	fn from(raw: &String) -> Self {
		IdType::resolve(raw)
	}
}

impl Serialize for IdType {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.as_str())
	}
}

/// A customer reference in a specific namespace, e.g. `{"email": "a@example.com"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
	pub id_type: IdType,
	pub value: String,
}

impl Identifier {
	pub fn new(id_type: impl Into<IdType>, value: impl Into<String>) -> Self {
		Self {
			id_type: id_type.into(),
			value: value.into(),
		}
	}

	pub fn id(value: impl Into<String>) -> Self {
		Self::new(IdType::Id, value)
	}

	pub fn email(value: impl Into<String>) -> Self {
		Self::new(IdType::Email, value)
	}

	pub fn cio_id(value: impl Into<String>) -> Self {
		Self::new(IdType::CioId, value)
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.value.is_empty()
	}
}

impl Serialize for Identifier {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(1))?;
		map.serialize_entry(self.id_type.as_str(), &self.value)?;
		map.end()
	}
}
