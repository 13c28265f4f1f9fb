// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mutable accumulators that validate fields and materialize groups.
//!
//! Builders move empty → accumulating → built: every invariant is checked at
//! the `add` that introduces it, and `build()` only materializes the
//! accumulated members. Re-using a builder after `build()` is not guarded
//! against; builders are short-lived and thread-confined by design.

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::catalog;
use crate::error::{Result, WireError};
use crate::field::Field;
use crate::group::FormattedGroup;
use crate::schema::{FieldSpec, HitKind};
use crate::validate;
use crate::value::Value;

/// Wire names owned by the required layer; partial builders drop them.
const REQUIRED_LAYER: [&str; 4] = ["v", "tid", "cid", "uid"];

fn is_required_layer(name: &str) -> bool {
	REQUIRED_LAYER.contains(&name)
}

/// General-purpose accumulator for catalogued or ad hoc fields.
#[derive(Debug)]
pub struct Builder {
	group: FormattedGroup,
}

impl Builder {
	pub fn new() -> Self {
		Self {
			group: FormattedGroup::new(),
		}
	}

	/// Adds an already-constructed field.
	pub fn add(mut self, field: Field) -> Self {
		self.group.push_field(field);
		self
	}

	/// Adds a zero-index catalogued field.
	pub fn with(self, spec: &'static FieldSpec, value: Value) -> Result<Self> {
		Ok(self.add(Field::new(spec, value)?))
	}

	/// Adds an indexed catalogued field.
	pub fn with_indexed(
		self,
		spec: &'static FieldSpec,
		indexes: &[i32],
		value: Value,
	) -> Result<Self> {
		Ok(self.add(Field::with_indexes(spec, indexes, value)?))
	}

	/// Adds `cd<index>`. An out-of-range index drops the field silently.
	pub fn custom_dimension(self, index: i32, value: impl Into<String>) -> Result<Self> {
		if !validate::custom_index_in_range(index) {
			warn!(index, "dropping custom dimension with out-of-range index");
			return Ok(self);
		}
		self.with_indexed(&catalog::CUSTOM_DIMENSION, &[index], Value::text(value))
	}

	/// Adds `cm<index>`. An out-of-range index drops the field silently.
	pub fn custom_metric(self, index: i32, value: i64) -> Result<Self> {
		if !validate::custom_index_in_range(index) {
			warn!(index, "dropping custom metric with out-of-range index");
			return Ok(self);
		}
		self.with_indexed(&catalog::CUSTOM_METRIC, &[index], Value::Integer(value))
	}

	/// Escape hatch for fields outside the catalogue.
	pub fn add_custom(self, name: impl Into<String>, value: Value) -> Result<Self> {
		Ok(self.add(Field::ad_hoc(name, value)?))
	}

	/// Merges an already-built group, preserving its insertion order.
	pub fn add_group(mut self, group: FormattedGroup) -> Self {
		self.group.push_group(group);
		self
	}

	/// Materializes the accumulated fields.
	pub fn build(self) -> FormattedGroup {
		self.group
	}
}

impl Default for Builder {
	fn default() -> Self {
		Self::new()
	}
}

/// Builder for the mandatory client-identity fields.
///
/// Seeds the protocol version and a validated tracking id. The built group
/// always carries an identity: when neither a client id nor a user id was
/// supplied, a random client id is generated at build time.
#[derive(Debug)]
pub struct RequiredBuilder {
	group: FormattedGroup,
	has_client_id: bool,
	has_user_id: bool,
}

impl RequiredBuilder {
	pub fn new(tracking_id: &str) -> Result<Self> {
		validate::tracking_id(tracking_id)?;
		let mut group = FormattedGroup::new();
		group.push_field(Field::new(&catalog::PROTOCOL_VERSION, Value::text("1"))?);
		group.push_field(Field::new(&catalog::TRACKING_ID, Value::text(tracking_id))?);
		Ok(Self {
			group,
			has_client_id: false,
			has_user_id: false,
		})
	}

	/// Sets the client id. A second call is a hard failure.
	pub fn client_id(mut self, id: &str) -> Result<Self> {
		if self.has_client_id {
			return Err(WireError::DuplicateField("client id"));
		}
		validate::non_empty(id, "client id")?;
		self.group
			.push_field(Field::new(&catalog::CLIENT_ID, Value::text(id))?);
		self.has_client_id = true;
		Ok(self)
	}

	/// Sets the user id. A second call is a hard failure.
	pub fn user_id(mut self, id: &str) -> Result<Self> {
		if self.has_user_id {
			return Err(WireError::DuplicateField("user id"));
		}
		validate::non_empty(id, "user id")?;
		self.group
			.push_field(Field::new(&catalog::USER_ID, Value::text(id))?);
		self.has_user_id = true;
		Ok(self)
	}

	/// Materializes the group, generating a random client id when no
	/// identity field was supplied.
	pub fn build(mut self) -> FormattedGroup {
		if !self.has_client_id && !self.has_user_id {
			let generated = Uuid::new_v4().to_string();
			let field = Field::new(&catalog::CLIENT_ID, Value::text(generated))
				.expect("client id field is text");
			self.group.push_field(field);
		}
		self.group
	}
}

/// Accumulator bound to a parent; [`done`] pops back to it.
///
/// Required-layer fields (protocol version, tracking id, client id, user
/// id) are dropped here rather than rejected: they belong to
/// [`RequiredBuilder`].
///
/// [`done`]: PartialBuilder::done
pub struct PartialBuilder<P> {
	parent: P,
	commit: fn(P, FormattedGroup) -> P,
	inner: Builder,
}

impl<P> PartialBuilder<P> {
	pub fn new(parent: P, commit: fn(P, FormattedGroup) -> P) -> Self {
		Self {
			parent,
			commit,
			inner: Builder::new(),
		}
	}

	pub fn with(mut self, spec: &'static FieldSpec, value: Value) -> Result<Self> {
		if spec.arity() == 0 && is_required_layer(spec.template()) {
			warn!(
				field = spec.formal_name(),
				"ignoring required-layer field outside the required builder"
			);
			return Ok(self);
		}
		self.inner = self.inner.with(spec, value)?;
		Ok(self)
	}

	pub fn with_indexed(
		mut self,
		spec: &'static FieldSpec,
		indexes: &[i32],
		value: Value,
	) -> Result<Self> {
		self.inner = self.inner.with_indexed(spec, indexes, value)?;
		Ok(self)
	}

	pub fn custom_dimension(mut self, index: i32, value: impl Into<String>) -> Result<Self> {
		self.inner = self.inner.custom_dimension(index, value)?;
		Ok(self)
	}

	pub fn custom_metric(mut self, index: i32, value: i64) -> Result<Self> {
		self.inner = self.inner.custom_metric(index, value)?;
		Ok(self)
	}

	pub fn add_custom(mut self, name: impl Into<String>, value: Value) -> Result<Self> {
		let name = name.into();
		if is_required_layer(&name) {
			warn!(
				field = %name,
				"ignoring required-layer field outside the required builder"
			);
			return Ok(self);
		}
		self.inner = self.inner.add_custom(name, value)?;
		Ok(self)
	}

	/// Builds the accumulated group and returns control to the parent.
	pub fn done(self) -> P {
		(self.commit)(self.parent, self.inner.build())
	}
}

/// One-shot builder for a single reportable event.
///
/// Merges the frozen client-level group, the frozen session-level group
/// (only when the session is new), and the hit-specific fields into one
/// renderable unit. Completion (the actual send) belongs to the enclosing
/// client, which owns the dispatcher.
#[derive(Debug)]
pub struct HitBuilder {
	kind: HitKind,
	timestamp: DateTime<Utc>,
	client: FormattedGroup,
	session: Option<FormattedGroup>,
	new_session: bool,
	fields: Builder,
}

impl HitBuilder {
	/// Starts a hit of `kind` against a frozen client-level group.
	pub fn new(kind: HitKind, client: FormattedGroup, timestamp: DateTime<Utc>) -> Self {
		Self {
			kind,
			timestamp,
			client,
			session: None,
			new_session: false,
			fields: Builder::new(),
		}
	}

	/// Attaches the session-level group and whether this hit starts a new
	/// session. The start marker and the group render only for new sessions.
	pub fn with_session(mut self, session: Option<FormattedGroup>, new_session: bool) -> Self {
		self.session = session;
		self.new_session = new_session;
		self
	}

	pub fn kind(&self) -> HitKind {
		self.kind
	}

	/// The moment the event happened, handed through to the dispatcher.
	pub fn timestamp(&self) -> DateTime<Utc> {
		self.timestamp
	}

	/// Adds a catalogued field after checking it applies to this hit kind.
	pub fn with(mut self, spec: &'static FieldSpec, value: Value) -> Result<Self> {
		self.check_applicable(spec)?;
		self.fields = self.fields.with(spec, value)?;
		Ok(self)
	}

	pub fn with_indexed(
		mut self,
		spec: &'static FieldSpec,
		indexes: &[i32],
		value: Value,
	) -> Result<Self> {
		self.check_applicable(spec)?;
		self.fields = self.fields.with_indexed(spec, indexes, value)?;
		Ok(self)
	}

	pub fn custom_dimension(mut self, index: i32, value: impl Into<String>) -> Result<Self> {
		self.fields = self.fields.custom_dimension(index, value)?;
		Ok(self)
	}

	pub fn custom_metric(mut self, index: i32, value: i64) -> Result<Self> {
		self.fields = self.fields.custom_metric(index, value)?;
		Ok(self)
	}

	pub fn add_custom(mut self, name: impl Into<String>, value: Value) -> Result<Self> {
		self.fields = self.fields.add_custom(name, value)?;
		Ok(self)
	}

	fn check_applicable(&self, spec: &FieldSpec) -> Result<()> {
		if spec.is_applicable(Some(self.kind)) {
			Ok(())
		} else {
			Err(WireError::NotApplicable {
				field: spec.formal_name().to_string(),
				kind: self.kind,
			})
		}
	}

	/// Materializes the hit: hit-type marker, then the session-start marker
	/// and session group for new sessions, then the client group, then the
	/// hit-specific fields.
	pub fn build(self) -> FormattedGroup {
		let mut group = FormattedGroup::new();
		let hit_type = Field::new(&catalog::HIT_TYPE, Value::text(self.kind.as_str()))
			.expect("hit type field is text");
		group.push_field(hit_type);
		if self.new_session {
			let marker = Field::new(&catalog::SESSION_CONTROL, Value::text("start"))
				.expect("session control field is text");
			group.push_field(marker);
			if let Some(session) = self.session {
				group.push_group(session);
			}
		}
		group.push_group(self.client);
		group.push_group(self.fields.build());
		group
	}
}
