// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dispatch of rendered hits to the collect endpoint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, error};
use url::Url;

use crate::error::Result;
use crate::system;

/// Outcome of handing one rendered hit to a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
	/// The hit was delivered, or accepted for background delivery.
	Complete,
	/// The transport failed. Hits are reported once and never retried.
	Error,
	/// The hit was dropped before transport (tracker disabled, queue full).
	Ignored,
	/// The dispatcher is switched off.
	Disabled,
	/// The dispatch worker has shut down.
	Shutdown,
}

/// Sends one rendered hit payload.
///
/// By the time a dispatcher runs, the formatting layer has already produced
/// a protocol-valid payload; transport failures surface as a status, never
/// as a formatting-layer error.
#[async_trait]
pub trait Dispatcher: Send + Sync {
	async fn send(&self, payload: &str, timestamp: DateTime<Utc>) -> DispatchStatus;
}

/// POSTs rendered hits to a collect endpoint.
pub struct HttpDispatcher {
	client: Client,
	endpoint: Url,
	enabled: AtomicBool,
}

impl HttpDispatcher {
	pub fn new(endpoint: &str) -> Result<Self> {
		let endpoint = Url::parse(endpoint)?;
		let client = Client::builder()
			.user_agent(system::user_agent())
			.timeout(Duration::from_secs(30))
			.build()?;
		Ok(Self {
			client,
			endpoint,
			enabled: AtomicBool::new(true),
		})
	}

	/// A disabled dispatcher reports [`DispatchStatus::Disabled`] without
	/// touching the network.
	pub fn set_enabled(&self, enabled: bool) {
		self.enabled.store(enabled, Ordering::SeqCst);
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
	async fn send(&self, payload: &str, timestamp: DateTime<Utc>) -> DispatchStatus {
		if !self.is_enabled() {
			return DispatchStatus::Disabled;
		}

		// How long the hit sat between the event and this send.
		let queued_for = (Utc::now() - timestamp).num_milliseconds().max(0);
		let body = if queued_for > 0 {
			format!("{payload}&qt={queued_for}")
		} else {
			payload.to_string()
		};

		match self
			.client
			.post(self.endpoint.clone())
			.header("content-type", "application/x-www-form-urlencoded")
			.body(body)
			.send()
			.await
		{
			Ok(response) if response.status().is_success() => {
				debug!(status = %response.status(), "hit delivered");
				DispatchStatus::Complete
			}
			Ok(response) => {
				error!(status = %response.status(), "collect endpoint rejected hit");
				DispatchStatus::Error
			}
			Err(err) => {
				error!(error = %err, "hit dispatch failed");
				DispatchStatus::Error
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use wiremock::matchers::{body_string_contains, header, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	#[tokio::test]
	async fn delivers_payload_as_form_post() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/collect"))
			.and(header("content-type", "application/x-www-form-urlencoded"))
			.and(body_string_contains("v=1&tid=UA-12345-6"))
			.respond_with(ResponseTemplate::new(200))
			.expect(1)
			.mount(&server)
			.await;

		let dispatcher = HttpDispatcher::new(&format!("{}/collect", server.uri())).unwrap();
		let status = dispatcher
			.send("v=1&tid=UA-12345-6&cid=abc&t=pageview", Utc::now())
			.await;
		assert_eq!(status, DispatchStatus::Complete);
	}

	#[tokio::test]
	async fn appends_queue_delay_for_stale_timestamps() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(body_string_contains("&qt="))
			.respond_with(ResponseTemplate::new(200))
			.expect(1)
			.mount(&server)
			.await;

		let dispatcher = HttpDispatcher::new(&server.uri()).unwrap();
		let stale = Utc::now() - chrono::Duration::seconds(2);
		let status = dispatcher.send("v=1&tid=UA-1-1&cid=abc", stale).await;
		assert_eq!(status, DispatchStatus::Complete);
	}

	#[tokio::test]
	async fn server_rejection_reports_error() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(500))
			.mount(&server)
			.await;

		let dispatcher = HttpDispatcher::new(&server.uri()).unwrap();
		let status = dispatcher.send("v=1", Utc::now()).await;
		assert_eq!(status, DispatchStatus::Error);
	}

	#[tokio::test]
	async fn unreachable_endpoint_reports_error() {
		let dispatcher = HttpDispatcher::new("http://127.0.0.1:9/collect").unwrap();
		let status = dispatcher.send("v=1", Utc::now()).await;
		assert_eq!(status, DispatchStatus::Error);
	}

	#[tokio::test]
	async fn disabled_dispatcher_skips_the_network() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(200))
			.expect(0)
			.mount(&server)
			.await;

		let dispatcher = HttpDispatcher::new(&server.uri()).unwrap();
		dispatcher.set_enabled(false);
		let status = dispatcher.send("v=1", Utc::now()).await;
		assert_eq!(status, DispatchStatus::Disabled);
	}

	#[test]
	fn malformed_endpoint_is_rejected() {
		assert!(HttpDispatcher::new("not a url").is_err());
	}
}
