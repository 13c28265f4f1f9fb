// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the tracker client.

use pulse_wire::WireError;
use thiserror::Error;

/// Tracker client errors.
#[derive(Debug, Error)]
pub enum TrackerError {
	/// A field or builder invariant was violated.
	#[error(transparent)]
	Wire(#[from] WireError),

	/// The configured collect endpoint is not a valid URL.
	#[error("invalid collect endpoint: {0}")]
	InvalidEndpoint(#[from] url::ParseError),

	/// HTTP client construction or use failed.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),
}

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
