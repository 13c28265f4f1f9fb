// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Inactivity-window session tracking.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Tracks the time window grouping consecutive hits.
///
/// One session per logical client identity; the last-activity timestamp is
/// guarded so concurrent hits may refresh safely.
#[derive(Debug)]
pub struct Session {
	timeout: Duration,
	last_activity: Mutex<Option<Instant>>,
}

impl Session {
	/// A zero timeout makes every refresh report a new session.
	pub fn new(timeout: Duration) -> Self {
		Self {
			timeout,
			last_activity: Mutex::new(None),
		}
	}

	/// Updates last-activity and reports whether this call starts a new
	/// session.
	pub fn refresh(&self) -> bool {
		self.refresh_at(Instant::now())
	}

	fn refresh_at(&self, now: Instant) -> bool {
		let mut last = self.last_activity.lock().expect("session lock");
		let fresh = match *last {
			None => true,
			Some(previous) => {
				self.timeout.is_zero() || now.duration_since(previous) >= self.timeout
			}
		};
		*last = Some(now);
		fresh
	}

	/// Forces the next refresh to report a new session.
	pub fn reset(&self) {
		*self.last_activity.lock().expect("session lock") = None;
	}
}
