// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Positional index substitution for templated field names.
//!
//! Name templates mark index positions with `_` runs: `cd_` becomes `cd7`,
//! `il_pi_cd_` becomes `il1pi2cd3`. Four strategies cover the supported
//! arities; [`for_spec`] picks the right one from a specification's marker
//! count and caches it so repeated lookups return the same instance.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::{Arc, LazyLock, RwLock};

use crate::error::{Result, WireError};
use crate::schema::FieldSpec;
use crate::validate::index_count;

/// A field-name template bound to a fixed number of positional indexes.
pub trait IndexedName: Send + Sync {
	/// Number of indexes [`IndexedName::replace`] expects.
	fn arity(&self) -> usize;

	/// Builds the concrete field name by substituting `indexes`
	/// left-to-right into the template's markers.
	///
	/// Indexes render as plain decimal, negative values included.
	fn replace(&self, indexes: &[i32]) -> Result<String>;
}

/// Splits a template into the literal runs around its markers, in one
/// forward pass. `n` markers yield `n + 1` literals (possibly empty).
fn literal_runs(template: &'static str) -> Vec<&'static str> {
	let bytes = template.as_bytes();
	let mut runs = Vec::new();
	let mut start = 0;
	let mut i = 0;
	while i < bytes.len() {
		if bytes[i] == b'_' {
			runs.push(&template[start..i]);
			while i < bytes.len() && bytes[i] == b'_' {
				i += 1;
			}
			start = i;
		} else {
			i += 1;
		}
	}
	runs.push(&template[start..]);
	runs
}

fn push_index(buf: &mut String, index: i32) {
	// write! to a String cannot fail
	let _ = write!(buf, "{index}");
}

/// Zero-index template: the name is the template verbatim.
#[derive(Debug)]
pub struct Verbatim {
	name: &'static str,
}

impl Verbatim {
	pub fn new(template: &'static str) -> Result<Self> {
		index_count(0, literal_runs(template).len() - 1)?;
		Ok(Self { name: template })
	}
}

impl IndexedName for Verbatim {
	fn arity(&self) -> usize {
		0
	}

	fn replace(&self, indexes: &[i32]) -> Result<String> {
		index_count(0, indexes.len())?;
		Ok(self.name.to_string())
	}
}

/// One-index template, e.g. `cd_`.
#[derive(Debug)]
pub struct OneIndex {
	head: &'static str,
	tail: &'static str,
}

impl OneIndex {
	pub fn new(template: &'static str) -> Result<Self> {
		let runs = literal_runs(template);
		index_count(1, runs.len() - 1)?;
		Ok(Self {
			head: runs[0],
			tail: runs[1],
		})
	}
}

impl IndexedName for OneIndex {
	fn arity(&self) -> usize {
		1
	}

	fn replace(&self, indexes: &[i32]) -> Result<String> {
		index_count(1, indexes.len())?;
		let mut name = String::with_capacity(self.head.len() + self.tail.len() + 4);
		name.push_str(self.head);
		push_index(&mut name, indexes[0]);
		name.push_str(self.tail);
		Ok(name)
	}
}

/// Two-index template, e.g. `pr_cd_`.
#[derive(Debug)]
pub struct TwoIndex {
	runs: [&'static str; 3],
}

impl TwoIndex {
	pub fn new(template: &'static str) -> Result<Self> {
		let runs = literal_runs(template);
		index_count(2, runs.len() - 1)?;
		Ok(Self {
			runs: [runs[0], runs[1], runs[2]],
		})
	}
}

impl IndexedName for TwoIndex {
	fn arity(&self) -> usize {
		2
	}

	fn replace(&self, indexes: &[i32]) -> Result<String> {
		index_count(2, indexes.len())?;
		let literals: usize = self.runs.iter().map(|run| run.len()).sum();
		let mut name = String::with_capacity(literals + 8);
		name.push_str(self.runs[0]);
		push_index(&mut name, indexes[0]);
		name.push_str(self.runs[1]);
		push_index(&mut name, indexes[1]);
		name.push_str(self.runs[2]);
		Ok(name)
	}
}

/// Three-index template, e.g. `il_pi_cd_`.
#[derive(Debug)]
pub struct ThreeIndex {
	runs: [&'static str; 4],
}

impl ThreeIndex {
	pub fn new(template: &'static str) -> Result<Self> {
		let runs = literal_runs(template);
		index_count(3, runs.len() - 1)?;
		Ok(Self {
			runs: [runs[0], runs[1], runs[2], runs[3]],
		})
	}
}

impl IndexedName for ThreeIndex {
	fn arity(&self) -> usize {
		3
	}

	fn replace(&self, indexes: &[i32]) -> Result<String> {
		index_count(3, indexes.len())?;
		let literals: usize = self.runs.iter().map(|run| run.len()).sum();
		let mut name = String::with_capacity(literals + 12);
		name.push_str(self.runs[0]);
		push_index(&mut name, indexes[0]);
		name.push_str(self.runs[1]);
		push_index(&mut name, indexes[1]);
		name.push_str(self.runs[2]);
		push_index(&mut name, indexes[2]);
		name.push_str(self.runs[3]);
		Ok(name)
	}
}

static RESOLVED: LazyLock<RwLock<HashMap<&'static str, Arc<dyn IndexedName>>>> =
	LazyLock::new(|| RwLock::new(HashMap::new()));

/// Returns the substitution strategy for `spec`'s template, building it on
/// first use.
///
/// Repeated calls for the same template return the same instance; a racing
/// first lookup keeps whichever entry landed first.
pub fn for_spec(spec: &FieldSpec) -> Result<Arc<dyn IndexedName>> {
	let template = spec.template();
	if let Some(found) = RESOLVED.read().expect("template cache lock").get(template) {
		return Ok(found.clone());
	}

	let built: Arc<dyn IndexedName> = match spec.arity() {
		0 => Arc::new(Verbatim::new(template)?),
		1 => Arc::new(OneIndex::new(template)?),
		2 => Arc::new(TwoIndex::new(template)?),
		3 => Arc::new(ThreeIndex::new(template)?),
		observed => return Err(WireError::UnsupportedArity { observed }),
	};

	let mut cache = RESOLVED.write().expect("template cache lock");
	Ok(cache.entry(template).or_insert(built).clone())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::ValueType;
	use proptest::prelude::*;

	#[test]
	fn verbatim_keeps_the_template() {
		let name = Verbatim::new("tid").unwrap();
		assert_eq!(name.replace(&[]).unwrap(), "tid");
	}

	#[test]
	fn one_index_substitutes() {
		let name = OneIndex::new("cd_").unwrap();
		assert_eq!(name.replace(&[3]).unwrap(), "cd3");
		assert_eq!(name.replace(&[-4]).unwrap(), "cd-4");
	}

	#[test]
	fn two_index_substitutes_in_order() {
		let name = TwoIndex::new("pr_cd_").unwrap();
		assert_eq!(name.replace(&[2, 7]).unwrap(), "pr2cd7");
	}

	#[test]
	fn three_index_substitutes_in_order() {
		let name = ThreeIndex::new("one_two_three_").unwrap();
		assert_eq!(name.replace(&[5, 88, 114]).unwrap(), "one5two88three114");
	}

	#[test]
	fn construction_rejects_wrong_marker_count() {
		match OneIndex::new("pr_cd_") {
			Err(WireError::IndexCountMismatch { expected, observed }) => {
				assert_eq!(expected, 1);
				assert_eq!(observed, 2);
			}
			other => panic!("expected count mismatch, got {other:?}"),
		}
	}

	#[test]
	fn replace_rejects_wrong_index_count() {
		let name = OneIndex::new("cd_").unwrap();
		match name.replace(&[1, 2]) {
			Err(WireError::IndexCountMismatch { expected, observed }) => {
				assert_eq!(expected, 1);
				assert_eq!(observed, 2);
			}
			other => panic!("expected count mismatch, got {other:?}"),
		}
	}

	#[test]
	fn factory_matches_spec_arity() {
		static SPECS: [FieldSpec; 4] = [
			FieldSpec::new("zero", "t", ValueType::Text),
			FieldSpec::new("one", "cm_", ValueType::Integer),
			FieldSpec::new("two", "pr_cm_", ValueType::Integer),
			FieldSpec::new("three", "il_pi_cm_", ValueType::Integer),
		];
		for spec in &SPECS {
			let name = for_spec(spec).unwrap();
			assert_eq!(name.arity(), spec.arity());
		}
	}

	#[test]
	fn factory_rejects_unsupported_arity() {
		static OVER: FieldSpec = FieldSpec::new("over", "a_b_c_d_", ValueType::Text);
		assert!(matches!(
			for_spec(&OVER),
			Err(WireError::UnsupportedArity { observed: 4 })
		));
	}

	#[test]
	fn factory_is_reference_stable() {
		static SPEC: FieldSpec = FieldSpec::new("stable", "xi_", ValueType::Text);
		let first = for_spec(&SPEC).unwrap();
		let second = for_spec(&SPEC).unwrap();
		assert!(Arc::ptr_eq(&first, &second));
	}

	proptest! {
		#[test]
		fn replace_is_pure(index in -9999i32..9999) {
			let name = OneIndex::new("cd_").unwrap();
			prop_assert_eq!(name.replace(&[index]).unwrap(), name.replace(&[index]).unwrap());
		}

		#[test]
		fn output_length_is_literals_plus_digits(
			head in "[a-z]{0,6}",
			mid in "[a-z]{1,6}",
			tail in "[a-z]{0,6}",
			a in 0i32..10_000,
			b in 0i32..10_000,
		) {
			let template: &'static str =
				Box::leak(format!("{head}_{mid}_{tail}").into_boxed_str());
			let name = TwoIndex::new(template).unwrap();
			let replaced = name.replace(&[a, b]).unwrap();
			let digits = a.to_string().len() + b.to_string().len();
			prop_assert_eq!(replaced.len(), head.len() + mid.len() + tail.len() + digits);
		}
	}
}
