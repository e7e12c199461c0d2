// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Data-residency regions and their base URLs.

use std::fmt;
use std::str::FromStr;

use crate::error::CustomerIoError;

/// Region an account's data lives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Region {
	#[default]
	Us,
	Eu,
}

impl Region {
	/// Base URL of the track API.
	pub fn track_url(&self) -> &'static str {
		match self {
			Region::Us => "https://track.customer.io",
			Region::Eu => "https://track-eu.customer.io",
		}
	}

	/// Base URL of the app API.
	pub fn api_url(&self) -> &'static str {
		match self {
			Region::Us => "https://api.customer.io",
			Region::Eu => "https://api-eu.customer.io",
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Region::Us => "us",
			Region::Eu => "eu",
		}
	}
}

impl fmt::Display for Region {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Region {
	type Err = CustomerIoError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"us" => Ok(Region::Us),
			"eu" => Ok(Region::Eu),
			_ => Err(CustomerIoError::UnknownRegion(s.to_string())),
		}
	}
}
