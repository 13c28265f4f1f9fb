// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Strategies for when a hit send runs relative to the caller.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::dispatch::{DispatchStatus, Dispatcher};

/// How hit sends are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
	/// Await the dispatcher inline; the caller observes the real outcome.
	Synchronous,
	/// Feed one persistent worker through a bounded queue; a full queue
	/// drops the hit.
	Queued { capacity: usize },
	/// Spawn a detached task per hit; the caller observes acceptance only.
	Detached,
}

impl Default for DispatchMode {
	fn default() -> Self {
		DispatchMode::Synchronous
	}
}

struct QueuedHit {
	payload: String,
	timestamp: DateTime<Utc>,
}

/// A dispatcher wrapped in a scheduling strategy.
pub struct Dispatch {
	dispatcher: Arc<dyn Dispatcher>,
	mode: ModeState,
}

impl std::fmt::Debug for Dispatch {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Dispatch").finish_non_exhaustive()
	}
}

enum ModeState {
	Synchronous,
	Queued {
		tx: Mutex<Option<mpsc::Sender<QueuedHit>>>,
	},
	Detached,
}

impl Dispatch {
	/// Wraps `dispatcher` in `mode`.
	///
	/// The queued mode spawns its worker task immediately, so construction
	/// must happen inside a runtime.
	pub fn new(dispatcher: Arc<dyn Dispatcher>, mode: DispatchMode) -> Self {
		let mode = match mode {
			DispatchMode::Synchronous => ModeState::Synchronous,
			DispatchMode::Detached => ModeState::Detached,
			DispatchMode::Queued { capacity } => {
				let (tx, mut rx) = mpsc::channel::<QueuedHit>(capacity.max(1));
				let worker = dispatcher.clone();
				tokio::spawn(async move {
					info!("hit dispatch worker started");
					while let Some(hit) = rx.recv().await {
						worker.send(&hit.payload, hit.timestamp).await;
					}
					info!("hit dispatch worker stopped");
				});
				ModeState::Queued {
					tx: Mutex::new(Some(tx)),
				}
			}
		};
		Self { dispatcher, mode }
	}

	/// Sends one rendered hit per the configured strategy.
	pub async fn send(&self, payload: String, timestamp: DateTime<Utc>) -> DispatchStatus {
		match &self.mode {
			ModeState::Synchronous => self.dispatcher.send(&payload, timestamp).await,
			ModeState::Detached => {
				let dispatcher = self.dispatcher.clone();
				tokio::spawn(async move {
					dispatcher.send(&payload, timestamp).await;
				});
				DispatchStatus::Complete
			}
			ModeState::Queued { tx } => {
				let sender = tx.lock().expect("dispatch queue lock").clone();
				let Some(sender) = sender else {
					return DispatchStatus::Shutdown;
				};
				match sender.try_send(QueuedHit { payload, timestamp }) {
					Ok(()) => DispatchStatus::Complete,
					Err(mpsc::error::TrySendError::Full(hit)) => {
						warn!(
							len = hit.payload.len(),
							"dropping hit, dispatch queue is full"
						);
						DispatchStatus::Ignored
					}
					Err(mpsc::error::TrySendError::Closed(_)) => DispatchStatus::Shutdown,
				}
			}
		}
	}

	/// Stops accepting queued hits; hits already queued drain before the
	/// worker exits. Synchronous and detached modes have nothing to stop.
	pub fn shutdown(&self) {
		if let ModeState::Queued { tx } = &self.mode {
			let mut sender = tx.lock().expect("dispatch queue lock");
			if sender.take().is_some() {
				debug!("hit dispatch queue closed");
			}
		}
	}
}
