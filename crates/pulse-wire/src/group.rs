// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ordered composite of renderable fields with freeze support.

use std::sync::Arc;

use crate::field::Field;

/// An ordered collection of wire fields and nested groups.
///
/// Rendering joins members with `&` in insertion order. [`freeze`] collapses
/// the group into one precomputed string so reuse across many hits costs a
/// single pointer read; a frozen group is immutable and safe to render from
/// any number of threads.
///
/// [`freeze`]: FormattedGroup::freeze
#[derive(Debug, Clone)]
pub struct FormattedGroup {
	repr: Repr,
}

#[derive(Debug, Clone)]
enum Repr {
	Members(Vec<Member>),
	Frozen(Arc<str>),
}

#[derive(Debug, Clone)]
enum Member {
	Field(Field),
	Group(FormattedGroup),
}

impl FormattedGroup {
	pub(crate) fn new() -> Self {
		Self {
			repr: Repr::Members(Vec::new()),
		}
	}

	/// A group that renders to nothing in every form.
	pub fn empty() -> Self {
		Self {
			repr: Repr::Frozen(Arc::from("")),
		}
	}

	pub(crate) fn push_field(&mut self, field: Field) {
		if let Repr::Members(members) = &mut self.repr {
			members.push(Member::Field(field));
		}
	}

	pub(crate) fn push_group(&mut self, group: FormattedGroup) {
		if let Repr::Members(members) = &mut self.repr {
			members.push(Member::Group(group));
		}
	}

	/// True when the group renders to an empty string.
	pub fn is_empty(&self) -> bool {
		match &self.repr {
			Repr::Frozen(text) => text.is_empty(),
			Repr::Members(members) => members.iter().all(|member| match member {
				Member::Field(_) => false,
				Member::Group(group) => group.is_empty(),
			}),
		}
	}

	/// True once the group has been collapsed to a single string.
	pub fn is_frozen(&self) -> bool {
		matches!(self.repr, Repr::Frozen(_))
	}

	/// Renders every member in insertion order.
	///
	/// A `&` separator precedes each piece of output except when the buffer
	/// is empty at that point, so concatenating groups never produces a
	/// leading or doubled separator.
	pub fn render_into(&self, buf: &mut String) {
		match &self.repr {
			Repr::Frozen(text) => {
				if text.is_empty() {
					return;
				}
				if !buf.is_empty() {
					buf.push('&');
				}
				buf.push_str(text);
			}
			Repr::Members(members) => {
				for member in members {
					match member {
						Member::Field(field) => {
							if !buf.is_empty() {
								buf.push('&');
							}
							field.render_into(buf);
						}
						Member::Group(group) => group.render_into(buf),
					}
				}
			}
		}
	}

	/// POST-body form: `a=b&c=d`, never with a leading separator.
	pub fn to_post_string(&self) -> String {
		let mut text = String::new();
		self.render_into(&mut text);
		text
	}

	/// GET form: `?` plus the POST form, or `""` for an empty group.
	pub fn to_get_string(&self) -> String {
		let post = self.to_post_string();
		if post.is_empty() {
			post
		} else {
			format!("?{post}")
		}
	}

	/// Collapses the group into an equivalent one whose render is a single
	/// precomputed string.
	///
	/// Freezing an already-frozen group returns it unchanged.
	pub fn freeze(self) -> Self {
		if self.is_frozen() {
			return self;
		}
		let text = self.to_post_string();
		Self {
			repr: Repr::Frozen(Arc::from(text.as_str())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog;
	use crate::value::Value;

	fn group_of(fields: &[(&'static crate::schema::FieldSpec, &str)]) -> FormattedGroup {
		let mut group = FormattedGroup::new();
		for &(spec, value) in fields {
			group.push_field(Field::new(spec, Value::text(value)).unwrap());
		}
		group
	}

	#[test]
	fn renders_members_in_insertion_order() {
		let group = group_of(&[
			(&catalog::EVENT_CATEGORY, "ui"),
			(&catalog::EVENT_ACTION, "click"),
			(&catalog::EVENT_LABEL, "save"),
		]);
		assert_eq!(group.to_post_string(), "ec=ui&ea=click&el=save");
	}

	#[test]
	fn get_form_prefixes_question_mark() {
		let group = group_of(&[(&catalog::DOCUMENT_HOSTNAME, "example.com")]);
		assert_eq!(group.to_get_string(), "?dh=example.com");
	}

	#[test]
	fn post_form_never_starts_with_separator() {
		let group = group_of(&[
			(&catalog::DOCUMENT_HOSTNAME, "example.com"),
			(&catalog::DOCUMENT_TITLE, "home"),
		]);
		assert!(!group.to_post_string().starts_with('&'));
	}

	#[test]
	fn empty_group_renders_nothing_in_all_forms() {
		let empty = FormattedGroup::empty();
		assert_eq!(empty.to_post_string(), "");
		assert_eq!(empty.to_get_string(), "");
		let mut buf = String::from("seed=1");
		empty.render_into(&mut buf);
		assert_eq!(buf, "seed=1");
	}

	#[test]
	fn nested_empty_group_adds_no_separator() {
		let mut group = FormattedGroup::new();
		group.push_field(Field::new(&catalog::DOCUMENT_TITLE, Value::text("a")).unwrap());
		group.push_group(FormattedGroup::empty());
		group.push_field(Field::new(&catalog::DOCUMENT_HOSTNAME, Value::text("b")).unwrap());
		assert_eq!(group.to_post_string(), "dt=a&dh=b");
	}

	#[test]
	fn continues_with_separator_into_seeded_buffer() {
		let group = group_of(&[(&catalog::DOCUMENT_TITLE, "home")]);
		let mut buf = String::from("v=1");
		group.render_into(&mut buf);
		assert_eq!(buf, "v=1&dt=home");
	}

	#[test]
	fn freeze_preserves_rendering() {
		let group = group_of(&[
			(&catalog::EVENT_CATEGORY, "ui"),
			(&catalog::EVENT_ACTION, "click"),
		]);
		let before = group.to_post_string();
		let frozen = group.freeze();
		assert!(frozen.is_frozen());
		assert_eq!(frozen.to_post_string(), before);
	}

	#[test]
	fn freeze_is_idempotent() {
		let frozen = group_of(&[(&catalog::DOCUMENT_TITLE, "home")]).freeze();
		let again = frozen.clone().freeze();
		assert_eq!(again.to_post_string(), frozen.to_post_string());
	}

	#[test]
	fn frozen_group_nests_like_the_original() {
		let session = group_of(&[(&catalog::USER_LANGUAGE, "en-us")]).freeze();
		let mut outer = FormattedGroup::new();
		outer.push_field(Field::new(&catalog::DOCUMENT_TITLE, Value::text("t")).unwrap());
		outer.push_group(session);
		assert_eq!(outer.to_post_string(), "dt=t&ul=en-us");
	}

	#[test]
	fn frozen_group_is_shareable_across_threads() {
		let frozen = group_of(&[(&catalog::DOCUMENT_TITLE, "home")]).freeze();
		let handles: Vec<_> = (0..4)
			.map(|_| {
				let shared = frozen.clone();
				std::thread::spawn(move || shared.to_post_string())
			})
			.collect();
		for handle in handles {
			assert_eq!(handle.join().unwrap(), "dt=home");
		}
	}

	#[test]
	fn empty_members_group_reports_empty() {
		assert!(FormattedGroup::new().is_empty());
		assert!(FormattedGroup::empty().is_empty());
		assert!(!group_of(&[(&catalog::DOCUMENT_TITLE, "t")]).is_empty());
	}
}
