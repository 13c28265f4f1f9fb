// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The tracker facade: frozen field groups, session tracking, dispatch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use pulse_wire::{
	catalog, validate, Builder, FieldSpec, FormattedGroup, HitBuilder, HitKind, PartialBuilder,
	RequiredBuilder, Value,
};

use crate::config::TrackerConfig;
use crate::dispatch::{DispatchStatus, Dispatcher, HttpDispatcher};
use crate::error::Result;
use crate::mode::Dispatch;
use crate::session::Session;
use crate::system;

/// Builder for a [`Tracker`].
///
/// Extra client-level and session-level fields are added through
/// partial-builder scopes whose `done()` pops back here.
pub struct TrackerBuilder {
	config: TrackerConfig,
	client_extra: Option<FormattedGroup>,
	session_fields: Option<FormattedGroup>,
	dispatcher: Option<Arc<dyn Dispatcher>>,
}

impl TrackerBuilder {
	fn new(config: TrackerConfig) -> Self {
		Self {
			config,
			client_extra: None,
			session_fields: None,
			dispatcher: None,
		}
	}

	/// Opens a scope for additional client-level fields, rendered on every
	/// hit.
	pub fn client_fields(self) -> PartialBuilder<Self> {
		PartialBuilder::new(self, |mut parent, group| {
			parent.client_extra = Some(group);
			parent
		})
	}

	/// Opens a scope for session-level fields, rendered only on hits that
	/// start a new session.
	pub fn session_fields(self) -> PartialBuilder<Self> {
		PartialBuilder::new(self, |mut parent, group| {
			parent.session_fields = Some(group);
			parent
		})
	}

	/// Replaces the stock HTTP dispatcher, e.g. with a test double.
	pub fn dispatcher(mut self, dispatcher: Arc<dyn Dispatcher>) -> Self {
		self.dispatcher = Some(dispatcher);
		self
	}

	/// Validates the configuration, renders and freezes the client-level
	/// group, and wires up dispatch.
	///
	/// Queued dispatch spawns its worker here, so building must happen
	/// inside a runtime.
	pub fn build(self) -> Result<Tracker> {
		let config = self.config;

		let mut required = RequiredBuilder::new(&config.tracking_id)?;
		if let Some(client_id) = &config.client_id {
			required = required.client_id(client_id)?;
		}
		if let Some(user_id) = &config.user_id {
			required = required.user_id(user_id)?;
		}

		let locale = config
			.locale
			.as_deref()
			.map(str::to_lowercase)
			.unwrap_or_else(|| system::os_locale().to_string());
		let mut ambient = Builder::new().with(&catalog::USER_LANGUAGE, Value::text(locale))?;
		if config.anonymize_ip {
			ambient = ambient.with(&catalog::ANONYMIZE_IP, Value::Bool(true))?;
		}
		if let Some(resolution) = &config.screen_resolution {
			ambient = ambient.with(&catalog::SCREEN_RESOLUTION, Value::text(resolution))?;
		}
		if let Some(viewport) = &config.viewport_size {
			ambient = ambient.with(&catalog::VIEWPORT_SIZE, Value::text(viewport))?;
		}
		if let Some(hostname) = config.document_hostname.clone().or_else(system::host_name) {
			ambient = ambient.with(&catalog::DOCUMENT_HOSTNAME, Value::text(hostname))?;
		}
		if let Some(address) = &config.ip_override {
			validate::ip_address(address)?;
			ambient = ambient.with(&catalog::IP_OVERRIDE, Value::text(address))?;
		}
		if let Some(name) = &config.application_name {
			ambient = ambient.with(&catalog::APPLICATION_NAME, Value::text(name))?;
		}
		if let Some(version) = &config.application_version {
			ambient = ambient.with(&catalog::APPLICATION_VERSION, Value::text(version))?;
		}
		if let Some(id) = &config.application_id {
			ambient = ambient.with(&catalog::APPLICATION_ID, Value::text(id))?;
		}

		let mut client = Builder::new()
			.add_group(required.build())
			.add_group(ambient.build());
		if let Some(extra) = self.client_extra {
			client = client.add_group(extra);
		}
		let client_group = client.build().freeze();
		let session_group = self.session_fields.map(FormattedGroup::freeze);

		let dispatcher: Arc<dyn Dispatcher> = match self.dispatcher {
			Some(dispatcher) => dispatcher,
			None => Arc::new(HttpDispatcher::new(&config.endpoint)?),
		};
		let dispatch = Dispatch::new(dispatcher, config.dispatch_mode);

		Ok(Tracker {
			enabled: AtomicBool::new(config.enabled),
			session: Session::new(config.session_timeout),
			client_group,
			session_group,
			dispatch,
		})
	}
}

/// A configured telemetry client.
///
/// The client-level group is rendered once and frozen at construction, so
/// every hit reuses a single immutable string. Hits may be sent from any
/// number of tasks concurrently: frozen groups are pure reads and the
/// session clock is internally guarded.
#[derive(Debug)]
pub struct Tracker {
	enabled: AtomicBool,
	session: Session,
	client_group: FormattedGroup,
	session_group: Option<FormattedGroup>,
	dispatch: Dispatch,
}

impl Tracker {
	/// Starts building a tracker from its configuration.
	pub fn builder(config: TrackerConfig) -> TrackerBuilder {
		TrackerBuilder::new(config)
	}

	/// Builds a tracker with the stock HTTP dispatcher.
	pub fn new(config: TrackerConfig) -> Result<Self> {
		Self::builder(config).build()
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled.load(Ordering::SeqCst)
	}

	/// A disabled tracker drops every hit with [`DispatchStatus::Ignored`].
	pub fn set_enabled(&self, enabled: bool) {
		self.enabled.store(enabled, Ordering::SeqCst);
	}

	/// Forces the next hit to start a new session.
	pub fn reset_session(&self) {
		self.session.reset();
	}

	/// Stops the queued dispatch worker, if one is running.
	pub fn shutdown(&self) {
		self.dispatch.shutdown();
	}

	/// Starts a hit of an arbitrary kind.
	pub fn hit(&self, kind: HitKind) -> HitRequest<'_> {
		HitRequest {
			tracker: self,
			builder: HitBuilder::new(kind, self.client_group.clone(), Utc::now()),
		}
	}

	pub fn pageview(&self, path: &str) -> Result<HitRequest<'_>> {
		validate::document_path(path)?;
		self.hit(HitKind::Pageview)
			.with(&catalog::DOCUMENT_PATH, Value::text(path))
	}

	pub fn screenview(&self, name: &str) -> Result<HitRequest<'_>> {
		validate::non_empty(name, "screen name")?;
		self.hit(HitKind::Screenview)
			.with(&catalog::SCREEN_NAME, Value::text(name))
	}

	pub fn event(&self, category: &str, action: &str) -> Result<HitRequest<'_>> {
		validate::non_empty(category, "event category")?;
		validate::non_empty(action, "event action")?;
		self.hit(HitKind::Event)
			.with(&catalog::EVENT_CATEGORY, Value::text(category))?
			.with(&catalog::EVENT_ACTION, Value::text(action))
	}

	pub fn exception(&self, description: &str, fatal: bool) -> Result<HitRequest<'_>> {
		validate::non_empty(description, "exception description")?;
		self.hit(HitKind::Exception)
			.with(&catalog::EXCEPTION_DESCRIPTION, Value::text(description))?
			.with(&catalog::EXCEPTION_FATAL, Value::Bool(fatal))
	}

	pub fn timing(&self, category: &str, variable: &str, millis: i64) -> Result<HitRequest<'_>> {
		validate::non_empty(category, "timing category")?;
		validate::non_empty(variable, "timing variable")?;
		validate::positive(millis, "timing value")?;
		self.hit(HitKind::Timing)
			.with(&catalog::TIMING_CATEGORY, Value::text(category))?
			.with(&catalog::TIMING_VARIABLE, Value::text(variable))?
			.with(&catalog::TIMING_TIME, Value::Integer(millis))
	}

	pub fn social(&self, network: &str, action: &str, target: &str) -> Result<HitRequest<'_>> {
		validate::non_empty(network, "social network")?;
		validate::non_empty(action, "social action")?;
		validate::non_empty(target, "social action target")?;
		self.hit(HitKind::Social)
			.with(&catalog::SOCIAL_NETWORK, Value::text(network))?
			.with(&catalog::SOCIAL_ACTION, Value::text(action))?
			.with(&catalog::SOCIAL_TARGET, Value::text(target))
	}

	pub fn transaction(&self, id: &str) -> Result<HitRequest<'_>> {
		validate::non_empty(id, "transaction id")?;
		self.hit(HitKind::Transaction)
			.with(&catalog::TRANSACTION_ID, Value::text(id))
	}

	pub fn item(&self, transaction_id: &str, name: &str) -> Result<HitRequest<'_>> {
		validate::non_empty(transaction_id, "transaction id")?;
		validate::non_empty(name, "item name")?;
		self.hit(HitKind::Item)
			.with(&catalog::TRANSACTION_ID, Value::text(transaction_id))?
			.with(&catalog::ITEM_NAME, Value::text(name))
	}
}

/// A hit being assembled; [`send`] renders and dispatches it.
///
/// [`send`]: HitRequest::send
#[derive(Debug)]
pub struct HitRequest<'a> {
	tracker: &'a Tracker,
	builder: HitBuilder,
}

impl HitRequest<'_> {
	pub fn with(mut self, spec: &'static FieldSpec, value: Value) -> Result<Self> {
		self.builder = self.builder.with(spec, value)?;
		Ok(self)
	}

	pub fn with_indexed(
		mut self,
		spec: &'static FieldSpec,
		indexes: &[i32],
		value: Value,
	) -> Result<Self> {
		self.builder = self.builder.with_indexed(spec, indexes, value)?;
		Ok(self)
	}

	pub fn custom_dimension(mut self, index: i32, value: impl Into<String>) -> Result<Self> {
		self.builder = self.builder.custom_dimension(index, value)?;
		Ok(self)
	}

	pub fn custom_metric(mut self, index: i32, value: i64) -> Result<Self> {
		self.builder = self.builder.custom_metric(index, value)?;
		Ok(self)
	}

	pub fn add_custom(mut self, name: impl Into<String>, value: Value) -> Result<Self> {
		self.builder = self.builder.add_custom(name, value)?;
		Ok(self)
	}

	/// Marks the hit as non-interactive for bounce-rate purposes.
	pub fn non_interactive(self) -> Result<Self> {
		self.with(&catalog::NON_INTERACTION, Value::Bool(true))
	}

	/// Sets the item price. The price must be strictly positive.
	pub fn item_price(self, price: f64) -> Result<Self> {
		validate::positive_f64(price, "item price")?;
		self.with(&catalog::ITEM_PRICE, Value::currency(price))
	}

	/// Renders the hit and hands it to the dispatcher.
	///
	/// Refreshes the session: hits that begin a new one carry the start
	/// marker and the frozen session-level group. A disabled tracker drops
	/// the hit with [`DispatchStatus::Ignored`].
	pub async fn send(self) -> DispatchStatus {
		if !self.tracker.is_enabled() {
			debug!("tracker disabled, ignoring hit");
			return DispatchStatus::Ignored;
		}

		let timestamp = self.builder.timestamp();
		let new_session = self.tracker.session.refresh();
		let payload = self
			.builder
			.with_session(self.tracker.session_group.clone(), new_session)
			.build()
			.to_post_string();
		self.tracker.dispatch.send(payload, timestamp).await
	}
}
