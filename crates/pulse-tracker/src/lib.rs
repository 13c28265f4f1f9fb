// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Telemetry tracker client for the pulse wire protocol.
//!
//! Wraps the `pulse-wire` formatting engine with everything a running
//! application needs to report hits: session tracking, an HTTP dispatcher,
//! dispatch-mode strategies (inline, queued worker, detached task), system
//! probes, and a fluent [`Tracker`] facade.
//!
//! # Example
//!
//! ```ignore
//! use pulse_tracker::{Tracker, TrackerConfig};
//!
//! let tracker = Tracker::new(TrackerConfig::new("UA-12345-6"))?;
//! tracker.pageview("/cart")?.send().await;
//! tracker.event("ui", "checkout")?.custom_dimension(3, "beta")?.send().await;
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod mode;
pub mod session;
pub mod system;
pub mod tracker;

pub use config::TrackerConfig;
pub use dispatch::{DispatchStatus, Dispatcher, HttpDispatcher};
pub use error::{Result, TrackerError};
pub use mode::{Dispatch, DispatchMode};
pub use session::Session;
pub use tracker::{HitRequest, Tracker, TrackerBuilder};

pub use pulse_wire as wire;
