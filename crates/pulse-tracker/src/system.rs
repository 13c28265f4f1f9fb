// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Probes for ambient host properties reported on hits.

use std::sync::OnceLock;

static OS_LOCALE: OnceLock<String> = OnceLock::new();
static USER_AGENT: OnceLock<String> = OnceLock::new();

/// The host locale as a lowercase tag ("en-us"), detected once.
///
/// Falls back to "en" when the platform exposes nothing.
pub fn os_locale() -> &'static str {
	OS_LOCALE.get_or_init(|| {
		sys_locale::get_locale()
			.map(|tag| tag.to_lowercase())
			.unwrap_or_else(|| "en".to_string())
	})
}

/// The local host name, when the platform exposes one.
pub fn host_name() -> Option<String> {
	hostname::get().ok().and_then(|name| name.into_string().ok())
}

/// User agent sent by the HTTP dispatcher: `pulse/{version} ({os}; {arch})`.
pub fn user_agent() -> &'static str {
	USER_AGENT.get_or_init(|| {
		format!(
			"pulse/{} ({}; {})",
			env!("CARGO_PKG_VERSION"),
			std::env::consts::OS,
			std::env::consts::ARCH
		)
	})
}
