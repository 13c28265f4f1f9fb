// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! URL-safe encoding of wire values.

use url::form_urlencoded;

/// Percent-encodes `text` for the wire.
///
/// `[A-Za-z0-9*\-._]` pass through unchanged, space becomes `+`, and
/// everything else is escaped byte-by-byte from its UTF-8 representation.
pub fn encode(text: &str) -> String {
	form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn decode(encoded: &str) -> String {
		let pair = format!("v={encoded}");
		form_urlencoded::parse(pair.as_bytes())
			.next()
			.map(|(_, value)| value.into_owned())
			.unwrap_or_default()
	}

	#[test]
	fn space_becomes_plus() {
		assert_eq!(encode("a b"), "a+b");
	}

	#[test]
	fn safe_characters_pass_through() {
		assert_eq!(encode("AZaz09*-._"), "AZaz09*-._");
	}

	#[test]
	fn multibyte_uses_utf8_escapes() {
		assert_eq!(encode("\u{1f00}"), "%E1%BC%80");
	}

	#[test]
	fn reserved_characters_are_escaped() {
		assert_eq!(encode("a&b=c"), "a%26b%3Dc");
	}

	proptest! {
		#[test]
		fn round_trips_any_text(text in "\\PC{0,64}") {
			prop_assert_eq!(decode(&encode(&text)), text);
		}

		#[test]
		fn output_is_ascii(text in "\\PC{0,64}") {
			prop_assert!(encode(&text).is_ascii());
		}
	}
}
