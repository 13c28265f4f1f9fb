// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the wire formatting engine.

use thiserror::Error;

use crate::schema::HitKind;
use crate::value::ValueType;

/// Formatting-engine errors.
///
/// Every validation failure is raised at the call that violated the
/// invariant, never deferred to `build()` or render time.
#[derive(Debug, Error)]
pub enum WireError {
	/// A template was given the wrong number of positional indexes.
	#[error("expected {expected} index(es), got {observed}")]
	IndexCountMismatch { expected: usize, observed: usize },

	/// A template carries more placeholders than any strategy supports.
	#[error("name templates support at most 3 indexes, got {observed}")]
	UnsupportedArity { observed: usize },

	/// A value's kind does not match the field's declared kind.
	#[error("field '{field}' expects a {expected} value, got {observed}")]
	IncompatibleValue {
		field: String,
		expected: ValueType,
		observed: ValueType,
	},

	/// A text value exceeds the field's maximum length.
	#[error("field '{field}' allows at most {max} bytes, got {len}")]
	TextTooLong { field: String, max: usize, len: usize },

	/// Tracking identifiers look like `UA-12345-6`.
	#[error("malformed tracking id: '{0}'")]
	InvalidTrackingId(String),

	/// Document paths must be non-empty and begin with `/`.
	#[error("malformed document path: '{0}'")]
	InvalidPath(String),

	/// Neither a valid IPv4 nor IPv6 textual form.
	#[error("malformed IP address: '{0}'")]
	InvalidIpAddress(String),

	/// A single-valued field was supplied twice.
	#[error("{0} may only be set once")]
	DuplicateField(&'static str),

	/// A field was added to a hit kind it does not apply to.
	#[error("field '{field}' does not apply to {kind} hits")]
	NotApplicable { field: String, kind: HitKind },

	/// A required string argument was empty.
	#[error("{0} must not be empty")]
	Empty(&'static str),

	/// A value that must be strictly positive was not.
	#[error("{what} must be positive, got {value}")]
	NotPositive { what: &'static str, value: f64 },
}

/// Result type alias for wire formatting operations.
pub type Result<T> = std::result::Result<T, WireError>;
