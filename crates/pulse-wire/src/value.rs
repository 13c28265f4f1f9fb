// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire value kinds and their textual rendering.

use std::borrow::Cow;

use crate::encode::encode;

/// The kind of value a wire field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
	Boolean,
	Integer,
	Number,
	Currency,
	Text,
}

impl ValueType {
	pub fn as_str(&self) -> &'static str {
		match self {
			ValueType::Boolean => "boolean",
			ValueType::Integer => "integer",
			ValueType::Number => "number",
			ValueType::Currency => "currency",
			ValueType::Text => "text",
		}
	}
}

impl std::fmt::Display for ValueType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Number formatting conventions for a locale: the decimal separator plus
/// an optional grouping separator.
///
/// Currency is the one value kind whose textual form is locale-sensitive;
/// every other kind renders identically everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberStyle {
	pub decimal: char,
	pub grouping: Option<char>,
}

impl NumberStyle {
	/// Anglophone default: `1,234.56`.
	pub const EN: NumberStyle = NumberStyle {
		decimal: '.',
		grouping: Some(','),
	};

	/// Resolves a style from a locale tag such as `de-DE` or `fr_FR`.
	///
	/// Only the language code is inspected; unknown languages fall back to
	/// the anglophone default.
	pub fn for_locale(tag: &str) -> NumberStyle {
		let lang = tag
			.split(['-', '_'])
			.next()
			.unwrap_or(tag)
			.to_ascii_lowercase();
		match lang.as_str() {
			"de" | "es" | "it" | "pt" | "nl" | "da" | "tr" | "id" => NumberStyle {
				decimal: ',',
				grouping: Some('.'),
			},
			"fr" | "ru" | "pl" | "cs" | "sv" | "fi" | "nb" | "uk" => NumberStyle {
				decimal: ',',
				grouping: Some(' '),
			},
			_ => NumberStyle::EN,
		}
	}
}

impl Default for NumberStyle {
	fn default() -> Self {
		NumberStyle::EN
	}
}

/// A concrete field value, matched against a [`ValueType`] when a field is
/// constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Bool(bool),
	Integer(i64),
	Number(f64),
	Currency { amount: f64, style: NumberStyle },
	Text(String),
}

impl Value {
	pub fn text(value: impl Into<String>) -> Self {
		Value::Text(value.into())
	}

	/// A currency amount rendered in the anglophone style.
	pub fn currency(amount: f64) -> Self {
		Value::Currency {
			amount,
			style: NumberStyle::EN,
		}
	}

	/// A currency amount rendered per the given locale style.
	pub fn currency_in(amount: f64, style: NumberStyle) -> Self {
		Value::Currency { amount, style }
	}

	/// The declared kind this value satisfies exactly.
	pub fn value_type(&self) -> ValueType {
		match self {
			Value::Bool(_) => ValueType::Boolean,
			Value::Integer(_) => ValueType::Integer,
			Value::Number(_) => ValueType::Number,
			Value::Currency { .. } => ValueType::Currency,
			Value::Text(_) => ValueType::Text,
		}
	}

	/// Byte length of a text value; `None` for every other kind.
	pub(crate) fn text_len(&self) -> Option<usize> {
		match self {
			Value::Text(text) => Some(text.len()),
			_ => None,
		}
	}

	/// Plain textual form, before percent-encoding.
	fn text_form(&self) -> Cow<'_, str> {
		match self {
			Value::Bool(true) => Cow::Borrowed("1"),
			Value::Bool(false) => Cow::Borrowed("0"),
			Value::Integer(value) => Cow::Owned(value.to_string()),
			Value::Number(value) => Cow::Owned(value.to_string()),
			Value::Currency { amount, style } => Cow::Owned(format_currency(*amount, *style)),
			Value::Text(text) => Cow::Borrowed(text),
		}
	}

	/// Appends the percent-encoded wire form of this value.
	pub fn render_into(&self, buf: &mut String) {
		buf.push_str(&encode(&self.text_form()));
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Integer(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Number(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Text(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Text(value)
	}
}

/// Two-decimal currency form with grouping per `style`.
fn format_currency(amount: f64, style: NumberStyle) -> String {
	let fixed = format!("{amount:.2}");
	let (sign, digits) = match fixed.strip_prefix('-') {
		Some(rest) => ("-", rest),
		None => ("", fixed.as_str()),
	};
	let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

	let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
	out.push_str(sign);
	for (i, digit) in int_part.chars().enumerate() {
		if i > 0 && (int_part.len() - i) % 3 == 0 {
			if let Some(sep) = style.grouping {
				out.push(sep);
			}
		}
		out.push(digit);
	}
	out.push(style.decimal);
	out.push_str(frac_part);
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn rendered(value: &Value) -> String {
		let mut text = String::new();
		value.render_into(&mut text);
		text
	}

	#[test]
	fn booleans_render_as_digits() {
		assert_eq!(rendered(&Value::Bool(true)), "1");
		assert_eq!(rendered(&Value::Bool(false)), "0");
	}

	#[test]
	fn integers_render_as_plain_decimal() {
		assert_eq!(rendered(&Value::Integer(42)), "42");
		assert_eq!(rendered(&Value::Integer(-7)), "-7");
	}

	#[test]
	fn text_is_percent_encoded() {
		assert_eq!(rendered(&Value::text("x y")), "x+y");
		assert_eq!(rendered(&Value::text("a&b")), "a%26b");
	}

	#[test]
	fn currency_groups_in_en_style() {
		assert_eq!(format_currency(1234567.891, NumberStyle::EN), "1,234,567.89");
		assert_eq!(format_currency(99.9, NumberStyle::EN), "99.90");
		assert_eq!(format_currency(-1234.5, NumberStyle::EN), "-1,234.50");
	}

	#[test]
	fn currency_respects_locale_style() {
		let de = NumberStyle::for_locale("de-DE");
		assert_eq!(format_currency(1234.5, de), "1.234,50");

		let fr = NumberStyle::for_locale("fr_FR");
		assert_eq!(format_currency(1234.5, fr), "1 234,50");
	}

	#[test]
	fn currency_renders_encoded() {
		assert_eq!(rendered(&Value::currency(1234.5)), "1%2C234.50");
	}

	#[test]
	fn unknown_locale_falls_back_to_en() {
		assert_eq!(NumberStyle::for_locale("tlh"), NumberStyle::EN);
		assert_eq!(NumberStyle::for_locale(""), NumberStyle::EN);
	}

	#[test]
	fn value_types_match_variants() {
		assert_eq!(Value::Bool(true).value_type(), ValueType::Boolean);
		assert_eq!(Value::Integer(1).value_type(), ValueType::Integer);
		assert_eq!(Value::Number(1.0).value_type(), ValueType::Number);
		assert_eq!(Value::currency(1.0).value_type(), ValueType::Currency);
		assert_eq!(Value::text("a").value_type(), ValueType::Text);
	}

	proptest! {
		#[test]
		fn currency_always_has_two_fraction_digits(amount in -1e12f64..1e12f64) {
			let text = format_currency(amount, NumberStyle::EN);
			let (_, frac) = text.rsplit_once('.').unwrap();
			prop_assert_eq!(frac.len(), 2);
		}

		#[test]
		fn integer_rendering_is_reversible(value: i64) {
			let text = rendered(&Value::Integer(value));
			prop_assert_eq!(text.parse::<i64>().unwrap(), value);
		}
	}
}
