// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fail-fast validation helpers used across the builder layer.

use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, WireError};
use crate::schema::FieldSpec;
use crate::value::{Value, ValueType};

static TRACKING_ID_SHAPE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[A-Za-z]+-\d+-\d+$").expect("tracking id pattern"));

/// Highest index accepted for custom dimension/metric families.
pub const MAX_CUSTOM_INDEX: i32 = 200;

/// Checks that the observed number of indexes matches the template arity.
pub fn index_count(expected: usize, observed: usize) -> Result<()> {
	if expected == observed {
		Ok(())
	} else {
		Err(WireError::IndexCountMismatch { expected, observed })
	}
}

/// Checks value-kind compatibility against a specification.
///
/// A text value satisfies every declared kind; any other kind must match
/// the specification exactly.
pub fn value_compat(spec: &FieldSpec, value: &Value) -> Result<()> {
	let observed = value.value_type();
	if observed == ValueType::Text || observed == spec.value_type() {
		Ok(())
	} else {
		Err(WireError::IncompatibleValue {
			field: spec.formal_name().to_string(),
			expected: spec.value_type(),
			observed,
		})
	}
}

/// Checks a text value against the specification's maximum length.
///
/// Zero means unbounded; non-text values are never length-limited.
pub fn text_length(spec: &FieldSpec, value: &Value) -> Result<()> {
	if spec.max_length() == 0 {
		return Ok(());
	}
	if let Some(len) = value.text_len() {
		if len > spec.max_length() {
			return Err(WireError::TextTooLong {
				field: spec.formal_name().to_string(),
				max: spec.max_length(),
				len,
			});
		}
	}
	Ok(())
}

/// Whether `index` lies in the accepted custom dimension/metric range.
pub fn custom_index_in_range(index: i32) -> bool {
	(1..=MAX_CUSTOM_INDEX).contains(&index)
}

/// Tracking ids look like `UA-12345-6`: letters, then two numeric segments.
pub fn tracking_id(id: &str) -> Result<()> {
	if TRACKING_ID_SHAPE.is_match(id) {
		Ok(())
	} else {
		Err(WireError::InvalidTrackingId(id.to_string()))
	}
}

/// Document paths must be non-empty and begin with `/`.
pub fn document_path(path: &str) -> Result<()> {
	if path.starts_with('/') {
		Ok(())
	} else {
		Err(WireError::InvalidPath(path.to_string()))
	}
}

/// Accepts IPv4 and IPv6 textual forms, including `::` zero-run
/// compression, embedded IPv4-in-IPv6, and leading zeros in hextets.
pub fn ip_address(address: &str) -> Result<()> {
	address
		.parse::<IpAddr>()
		.map(|_| ())
		.map_err(|_| WireError::InvalidIpAddress(address.to_string()))
}

pub fn non_empty(value: &str, what: &'static str) -> Result<()> {
	if value.is_empty() {
		Err(WireError::Empty(what))
	} else {
		Ok(())
	}
}

pub fn positive(value: i64, what: &'static str) -> Result<()> {
	if value > 0 {
		Ok(())
	} else {
		Err(WireError::NotPositive {
			what,
			value: value as f64,
		})
	}
}

pub fn positive_f64(value: f64, what: &'static str) -> Result<()> {
	if value > 0.0 {
		Ok(())
	} else {
		Err(WireError::NotPositive { what, value })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	static INT_SPEC: FieldSpec = FieldSpec::new("event value", "ev", ValueType::Integer);
	static BOUNDED: FieldSpec =
		FieldSpec::new("event category", "ec", ValueType::Text).with_max_length(10);

	#[test]
	fn text_satisfies_any_declared_kind() {
		assert!(value_compat(&INT_SPEC, &Value::text("fallback")).is_ok());
	}

	#[test]
	fn exact_kind_match_is_ok() {
		assert!(value_compat(&INT_SPEC, &Value::Integer(3)).is_ok());
	}

	#[test]
	fn kind_mismatch_reports_spec_name() {
		let err = value_compat(&INT_SPEC, &Value::Bool(true)).unwrap_err();
		assert!(err.to_string().contains("event value"));
	}

	#[test]
	fn text_length_enforced_for_bounded_specs() {
		assert!(text_length(&BOUNDED, &Value::text("short")).is_ok());
		assert!(text_length(&BOUNDED, &Value::text("longer than ten")).is_err());
	}

	#[test]
	fn custom_index_range_is_closed() {
		assert!(!custom_index_in_range(0));
		assert!(custom_index_in_range(1));
		assert!(custom_index_in_range(200));
		assert!(!custom_index_in_range(201));
		assert!(!custom_index_in_range(-5));
	}

	#[test]
	fn tracking_id_shape() {
		assert!(tracking_id("UA-12345-6").is_ok());
		assert!(tracking_id("ua-1-1").is_ok());
		assert!(tracking_id("UA12345-6").is_err());
		assert!(tracking_id("UA-12345").is_err());
		assert!(tracking_id("UA-12a45-6").is_err());
		assert!(tracking_id("").is_err());
	}

	#[test]
	fn document_path_must_be_rooted() {
		assert!(document_path("/").is_ok());
		assert!(document_path("/cart/checkout").is_ok());
		assert!(document_path("").is_err());
		assert!(document_path("cart").is_err());
	}

	#[test]
	fn ip_address_accepts_standard_forms() {
		assert!(ip_address("127.0.0.1").is_ok());
		assert!(ip_address("::1").is_ok());
		assert!(ip_address("2001:db8::ff00:42:8329").is_ok());
		assert!(ip_address("::ffff:192.0.2.128").is_ok());
		assert!(ip_address("2001:0db8:0000:0000:0000:ff00:0042:8329").is_ok());
	}

	#[test]
	fn ip_address_rejects_malformed_input() {
		assert!(ip_address("").is_err());
		assert!(ip_address("256.1.1.1").is_err());
		assert!(ip_address("1.2.3").is_err());
		assert!(ip_address("2001::db8::1").is_err());
		assert!(ip_address("host.example.com").is_err());
	}

	#[test]
	fn guarded_preconditions_carry_labels() {
		let err = non_empty("", "event category").unwrap_err();
		assert!(err.to_string().contains("event category"));

		let err = positive(0, "item quantity").unwrap_err();
		assert!(err.to_string().contains("item quantity"));

		let err = positive_f64(-1.5, "item price").unwrap_err();
		assert!(err.to_string().contains("item price"));
	}

	proptest! {
		#[test]
		fn generated_tracking_ids_pass(letters in "[A-Za-z]{1,4}", a in 0u32..99999, b in 0u32..99) {
			let candidate = format!("{}-{}-{}", letters, a, b);
			prop_assert!(tracking_id(&candidate).is_ok());
		}

		#[test]
		fn index_count_rejects_all_mismatches(expected in 0usize..4, observed in 0usize..8) {
			prop_assert_eq!(index_count(expected, observed).is_ok(), expected == observed);
		}
	}
}
