// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire-format parameter schema and formatting engine for pulse telemetry.
//!
//! Builds query-string payloads (`name=value&...`) for a fixed telemetry
//! wire protocol: a declarative field catalogue, positional index
//! substitution for indexed field families, cached field rendering, and
//! composable builders that freeze accumulated fields into immutable,
//! shareable groups.
//!
//! The engine is purely synchronous, in-memory string construction; the
//! session tracking and network dispatch around it live in `pulse-tracker`.

pub mod builder;
pub mod catalog;
pub mod encode;
pub mod error;
pub mod field;
pub mod group;
pub mod schema;
pub mod template;
pub mod validate;
pub mod value;

pub use builder::{Builder, HitBuilder, PartialBuilder, RequiredBuilder};
pub use error::{Result, WireError};
pub use field::Field;
pub use group::FormattedGroup;
pub use schema::{FieldSpec, HitKind};
pub use value::{NumberStyle, Value, ValueType};
