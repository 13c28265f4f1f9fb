// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracker configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::mode::DispatchMode;

/// Configuration for a [`crate::tracker::Tracker`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
	/// Property this tracker reports to, e.g. `UA-12345-6`.
	pub tracking_id: String,
	/// Collect endpoint receiving POSTed hits.
	pub endpoint: String,
	/// Stable client identity. A random one is generated when neither this
	/// nor `user_id` is set.
	pub client_id: Option<String>,
	pub user_id: Option<String>,
	/// Locale tag reported as the user language; probed from the OS when
	/// absent.
	pub locale: Option<String>,
	/// `WIDTHxHEIGHT` override; the tracker never opens a display to probe
	/// this itself.
	pub screen_resolution: Option<String>,
	pub viewport_size: Option<String>,
	/// Hostname reported with every hit; probed from the OS when absent.
	pub document_hostname: Option<String>,
	/// Client IP reported instead of the connection address. Must parse as
	/// IPv4 or IPv6.
	pub ip_override: Option<String>,
	pub application_name: Option<String>,
	pub application_version: Option<String>,
	pub application_id: Option<String>,
	pub anonymize_ip: bool,
	pub dispatch_mode: DispatchMode,
	/// Inactivity gap after which the next hit starts a new session. Zero
	/// makes every hit start one.
	pub session_timeout: Duration,
	/// Disabled trackers drop every hit with `Ignored`.
	pub enabled: bool,
}

impl TrackerConfig {
	pub const DEFAULT_ENDPOINT: &'static str = "https://www.google-analytics.com/collect";

	const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

	pub fn new(tracking_id: impl Into<String>) -> Self {
		Self {
			tracking_id: tracking_id.into(),
			endpoint: Self::DEFAULT_ENDPOINT.to_string(),
			client_id: None,
			user_id: None,
			locale: None,
			screen_resolution: None,
			viewport_size: None,
			document_hostname: None,
			ip_override: None,
			application_name: None,
			application_version: None,
			application_id: None,
			anonymize_ip: false,
			dispatch_mode: DispatchMode::default(),
			session_timeout: Self::DEFAULT_SESSION_TIMEOUT,
			enabled: true,
		}
	}

	pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.endpoint = endpoint.into();
		self
	}

	pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());
		self
	}

	pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
		self.user_id = Some(user_id.into());
		self
	}

	pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = Some(locale.into());
		self
	}

	pub fn with_screen_resolution(mut self, resolution: impl Into<String>) -> Self {
		self.screen_resolution = Some(resolution.into());
		self
	}

	pub fn with_viewport_size(mut self, viewport: impl Into<String>) -> Self {
		self.viewport_size = Some(viewport.into());
		self
	}

	pub fn with_document_hostname(mut self, hostname: impl Into<String>) -> Self {
		self.document_hostname = Some(hostname.into());
		self
	}

	pub fn with_ip_override(mut self, address: impl Into<String>) -> Self {
		self.ip_override = Some(address.into());
		self
	}

	pub fn with_application(
		mut self,
		name: impl Into<String>,
		version: impl Into<String>,
	) -> Self {
		self.application_name = Some(name.into());
		self.application_version = Some(version.into());
		self
	}

	pub fn with_application_id(mut self, id: impl Into<String>) -> Self {
		self.application_id = Some(id.into());
		self
	}

	pub fn with_anonymize_ip(mut self, anonymize: bool) -> Self {
		self.anonymize_ip = anonymize;
		self
	}

	pub fn with_dispatch_mode(mut self, mode: DispatchMode) -> Self {
		self.dispatch_mode = mode;
		self
	}

	pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
		self.session_timeout = timeout;
		self
	}

	pub fn disabled(mut self) -> Self {
		self.enabled = false;
		self
	}
}
