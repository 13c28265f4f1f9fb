// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A single `name=value` rendering unit.

use std::sync::OnceLock;

use crate::error::Result;
use crate::schema::FieldSpec;
use crate::template;
use crate::validate;
use crate::value::{Value, ValueType};

/// One wire field: a resolved name bound to an immutable value.
///
/// Specification and value never change after construction, so the rendered
/// `name=value` text is computed once and reused. A concurrent first render
/// may compute the same string twice; the duplicate is discarded.
#[derive(Debug)]
pub struct Field {
	spec: Option<&'static FieldSpec>,
	name: String,
	value: Value,
	rendered: OnceLock<String>,
}

impl Field {
	/// Binds a zero-index specification to a value.
	pub fn new(spec: &'static FieldSpec, value: Value) -> Result<Self> {
		Self::with_indexes(spec, &[], value)
	}

	/// Binds an indexed specification to a value, resolving the concrete
	/// field name.
	///
	/// Arity mismatches and value-kind incompatibilities fail here, never
	/// at render time.
	pub fn with_indexes(spec: &'static FieldSpec, indexes: &[i32], value: Value) -> Result<Self> {
		validate::value_compat(spec, &value)?;
		validate::text_length(spec, &value)?;
		let name = template::for_spec(spec)?.replace(indexes)?;
		Ok(Self {
			spec: Some(spec),
			name,
			value,
			rendered: OnceLock::new(),
		})
	}

	/// An uncatalogued field with an explicit name.
	pub fn ad_hoc(name: impl Into<String>, value: Value) -> Result<Self> {
		let name = name.into();
		validate::non_empty(&name, "field name")?;
		Ok(Self {
			spec: None,
			name,
			value,
			rendered: OnceLock::new(),
		})
	}

	/// The specification this field was built from, if catalogued.
	pub fn spec(&self) -> Option<&'static FieldSpec> {
		self.spec
	}

	/// The resolved wire name.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn value_type(&self) -> ValueType {
		self.value.value_type()
	}

	/// The full `name=value` wire text, cached after the first call.
	pub fn format(&self) -> &str {
		self.rendered.get_or_init(|| {
			let mut text = String::with_capacity(self.name.len() + 16);
			text.push_str(&self.name);
			text.push('=');
			self.value.render_into(&mut text);
			text
		})
	}

	/// Appends the wire text; the caller owns separator placement.
	pub fn render_into(&self, buf: &mut String) {
		buf.push_str(self.format());
	}
}

impl Clone for Field {
	fn clone(&self) -> Self {
		let rendered = OnceLock::new();
		if let Some(text) = self.rendered.get() {
			let _ = rendered.set(text.clone());
		}
		Self {
			spec: self.spec,
			name: self.name.clone(),
			value: self.value.clone(),
			rendered,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog;
	use crate::error::WireError;

	#[test]
	fn renders_name_equals_value() {
		let field = Field::new(&catalog::DOCUMENT_PATH, Value::text("/home")).unwrap();
		assert_eq!(field.format(), "dp=%2Fhome");
	}

	#[test]
	fn custom_dimension_renders_with_index() {
		let field =
			Field::with_indexes(&catalog::CUSTOM_DIMENSION, &[3], Value::text("x y")).unwrap();
		assert_eq!(field.format(), "cd3=x+y");
	}

	#[test]
	fn format_is_idempotent() {
		let field = Field::new(&catalog::EVENT_VALUE, Value::Integer(12)).unwrap();
		let first = field.format().to_string();
		let second = field.format().to_string();
		assert_eq!(first, second);
		assert_eq!(first, "ev=12");
	}

	#[test]
	fn clone_preserves_rendering() {
		let field = Field::new(&catalog::DOCUMENT_TITLE, Value::text("a b")).unwrap();
		let _ = field.format();
		let copy = field.clone();
		assert_eq!(copy.format(), "dt=a+b");
	}

	#[test]
	fn arity_mismatch_fails_at_construction() {
		let err =
			Field::with_indexes(&catalog::CUSTOM_DIMENSION, &[1, 2], Value::text("v")).unwrap_err();
		assert!(matches!(
			err,
			WireError::IndexCountMismatch {
				expected: 1,
				observed: 2
			}
		));
	}

	#[test]
	fn kind_mismatch_fails_at_construction() {
		let err = Field::new(&catalog::EVENT_VALUE, Value::Bool(true)).unwrap_err();
		assert!(matches!(err, WireError::IncompatibleValue { .. }));
	}

	#[test]
	fn text_override_is_always_accepted() {
		let field = Field::new(&catalog::EVENT_VALUE, Value::text("7")).unwrap();
		assert_eq!(field.format(), "ev=7");
	}

	#[test]
	fn overlong_text_fails_at_construction() {
		let oversized = "x".repeat(2049);
		let err = Field::new(&catalog::DOCUMENT_PATH, Value::text(oversized)).unwrap_err();
		assert!(matches!(err, WireError::TextTooLong { .. }));
	}

	#[test]
	fn three_index_field_renders_fully_substituted_name() {
		static THREE: crate::schema::FieldSpec =
			crate::schema::FieldSpec::new("three index text", "one_two_three_", ValueType::Text);
		let field = Field::with_indexes(&THREE, &[5, 88, 114], Value::text("v")).unwrap();
		assert_eq!(field.format(), "one5two88three114=v");
	}

	#[test]
	fn ad_hoc_fields_render_like_catalogued_ones() {
		let field = Field::ad_hoc("plt", Value::Integer(250)).unwrap();
		assert_eq!(field.format(), "plt=250");
	}

	#[test]
	fn ad_hoc_name_must_not_be_empty() {
		assert!(Field::ad_hoc("", Value::text("v")).is_err());
	}
}
