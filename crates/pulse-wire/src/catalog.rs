// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Catalogue of supported wire protocol fields.
//!
//! A deliberately non-exhaustive subset of the protocol: the families the
//! tracker emits, plus the indexed custom dimension/metric families. Callers
//! reference these constants to construct [`crate::field::Field`]s; the
//! constants are immutable and live for the process lifetime.

use crate::schema::{FieldSpec, HitKind};
use crate::value::ValueType;

pub static PROTOCOL_VERSION: FieldSpec =
	FieldSpec::new("protocol version", "v", ValueType::Text);
pub static TRACKING_ID: FieldSpec = FieldSpec::new("tracking id", "tid", ValueType::Text);
pub static ANONYMIZE_IP: FieldSpec = FieldSpec::new("anonymize IP", "aip", ValueType::Boolean);
pub static QUEUE_TIME: FieldSpec = FieldSpec::new("queue time", "qt", ValueType::Integer);
pub static CACHE_BUSTER: FieldSpec = FieldSpec::new("cache buster", "z", ValueType::Text);

pub static CLIENT_ID: FieldSpec = FieldSpec::new("client id", "cid", ValueType::Text);
pub static USER_ID: FieldSpec = FieldSpec::new("user id", "uid", ValueType::Text);
pub static SESSION_CONTROL: FieldSpec =
	FieldSpec::new("session control", "sc", ValueType::Text);

pub static IP_OVERRIDE: FieldSpec = FieldSpec::new("IP override", "uip", ValueType::Text);
pub static USER_AGENT_OVERRIDE: FieldSpec =
	FieldSpec::new("user agent override", "ua", ValueType::Text);

pub static DOCUMENT_REFERRER: FieldSpec =
	FieldSpec::new("document referrer", "dr", ValueType::Text).with_max_length(2048);
pub static USER_LANGUAGE: FieldSpec =
	FieldSpec::new("user language", "ul", ValueType::Text).with_max_length(20);
pub static SCREEN_RESOLUTION: FieldSpec =
	FieldSpec::new("screen resolution", "sr", ValueType::Text).with_max_length(20);
pub static VIEWPORT_SIZE: FieldSpec =
	FieldSpec::new("viewport size", "vp", ValueType::Text).with_max_length(20);
pub static DOCUMENT_ENCODING: FieldSpec =
	FieldSpec::new("document encoding", "de", ValueType::Text).with_max_length(20);
pub static SCREEN_COLORS: FieldSpec =
	FieldSpec::new("screen colors", "sd", ValueType::Text).with_max_length(20);

pub static HIT_TYPE: FieldSpec = FieldSpec::new("hit type", "t", ValueType::Text);
pub static NON_INTERACTION: FieldSpec =
	FieldSpec::new("non-interaction hit", "ni", ValueType::Boolean);

pub static DOCUMENT_LOCATION: FieldSpec =
	FieldSpec::new("document location", "dl", ValueType::Text).with_max_length(2048);
pub static DOCUMENT_HOSTNAME: FieldSpec =
	FieldSpec::new("document hostname", "dh", ValueType::Text).with_max_length(100);
pub static DOCUMENT_PATH: FieldSpec =
	FieldSpec::new("document path", "dp", ValueType::Text).with_max_length(2048);
pub static DOCUMENT_TITLE: FieldSpec =
	FieldSpec::new("document title", "dt", ValueType::Text).with_max_length(1500);
pub static SCREEN_NAME: FieldSpec = FieldSpec::new("screen name", "cd", ValueType::Text)
	.with_max_length(2048)
	.with_hit_kinds(&[HitKind::Screenview]);

pub static APPLICATION_NAME: FieldSpec =
	FieldSpec::new("application name", "an", ValueType::Text).with_max_length(100);
pub static APPLICATION_VERSION: FieldSpec =
	FieldSpec::new("application version", "av", ValueType::Text).with_max_length(100);
pub static APPLICATION_ID: FieldSpec =
	FieldSpec::new("application id", "aid", ValueType::Text).with_max_length(150);
pub static APPLICATION_INSTALLER_ID: FieldSpec =
	FieldSpec::new("application installer id", "aiid", ValueType::Text).with_max_length(150);

pub static EVENT_CATEGORY: FieldSpec = FieldSpec::new("event category", "ec", ValueType::Text)
	.with_max_length(150)
	.with_hit_kinds(&[HitKind::Event]);
pub static EVENT_ACTION: FieldSpec = FieldSpec::new("event action", "ea", ValueType::Text)
	.with_max_length(500)
	.with_hit_kinds(&[HitKind::Event]);
pub static EVENT_LABEL: FieldSpec = FieldSpec::new("event label", "el", ValueType::Text)
	.with_max_length(500)
	.with_hit_kinds(&[HitKind::Event]);
pub static EVENT_VALUE: FieldSpec = FieldSpec::new("event value", "ev", ValueType::Integer)
	.with_hit_kinds(&[HitKind::Event]);

pub static TRANSACTION_ID: FieldSpec = FieldSpec::new("transaction id", "ti", ValueType::Text)
	.with_max_length(500)
	.with_hit_kinds(&[HitKind::Transaction, HitKind::Item]);
pub static TRANSACTION_AFFILIATION: FieldSpec =
	FieldSpec::new("transaction affiliation", "ta", ValueType::Text)
		.with_max_length(500)
		.with_hit_kinds(&[HitKind::Transaction]);
pub static TRANSACTION_REVENUE: FieldSpec =
	FieldSpec::new("transaction revenue", "tr", ValueType::Currency)
		.with_hit_kinds(&[HitKind::Transaction]);
pub static TRANSACTION_SHIPPING: FieldSpec =
	FieldSpec::new("transaction shipping", "ts", ValueType::Currency)
		.with_hit_kinds(&[HitKind::Transaction]);
pub static TRANSACTION_TAX: FieldSpec =
	FieldSpec::new("transaction tax", "tt", ValueType::Currency)
		.with_hit_kinds(&[HitKind::Transaction]);

pub static ITEM_NAME: FieldSpec = FieldSpec::new("item name", "in", ValueType::Text)
	.with_max_length(500)
	.with_hit_kinds(&[HitKind::Item]);
pub static ITEM_PRICE: FieldSpec =
	FieldSpec::new("item price", "ip", ValueType::Currency).with_hit_kinds(&[HitKind::Item]);
pub static ITEM_QUANTITY: FieldSpec =
	FieldSpec::new("item quantity", "iq", ValueType::Integer).with_hit_kinds(&[HitKind::Item]);
pub static ITEM_CODE: FieldSpec = FieldSpec::new("item code", "ic", ValueType::Text)
	.with_max_length(500)
	.with_hit_kinds(&[HitKind::Item]);
pub static ITEM_CATEGORY: FieldSpec = FieldSpec::new("item category", "iv", ValueType::Text)
	.with_max_length(500)
	.with_hit_kinds(&[HitKind::Item]);
pub static CURRENCY_CODE: FieldSpec = FieldSpec::new("currency code", "cu", ValueType::Text)
	.with_max_length(10)
	.with_hit_kinds(&[HitKind::Transaction, HitKind::Item]);

pub static SOCIAL_NETWORK: FieldSpec = FieldSpec::new("social network", "sn", ValueType::Text)
	.with_max_length(50)
	.with_hit_kinds(&[HitKind::Social]);
pub static SOCIAL_ACTION: FieldSpec = FieldSpec::new("social action", "sa", ValueType::Text)
	.with_max_length(50)
	.with_hit_kinds(&[HitKind::Social]);
pub static SOCIAL_TARGET: FieldSpec =
	FieldSpec::new("social action target", "st", ValueType::Text)
		.with_max_length(2048)
		.with_hit_kinds(&[HitKind::Social]);

pub static TIMING_CATEGORY: FieldSpec =
	FieldSpec::new("user timing category", "utc", ValueType::Text)
		.with_max_length(150)
		.with_hit_kinds(&[HitKind::Timing]);
pub static TIMING_VARIABLE: FieldSpec =
	FieldSpec::new("user timing variable", "utv", ValueType::Text)
		.with_max_length(500)
		.with_hit_kinds(&[HitKind::Timing]);
pub static TIMING_TIME: FieldSpec =
	FieldSpec::new("user timing time", "utt", ValueType::Integer)
		.with_hit_kinds(&[HitKind::Timing]);
pub static TIMING_LABEL: FieldSpec =
	FieldSpec::new("user timing label", "utl", ValueType::Text)
		.with_max_length(500)
		.with_hit_kinds(&[HitKind::Timing]);

pub static EXCEPTION_DESCRIPTION: FieldSpec =
	FieldSpec::new("exception description", "exd", ValueType::Text)
		.with_max_length(150)
		.with_hit_kinds(&[HitKind::Exception]);
pub static EXCEPTION_FATAL: FieldSpec =
	FieldSpec::new("exception fatal", "exf", ValueType::Boolean)
		.with_hit_kinds(&[HitKind::Exception]);

pub static EXPERIMENT_ID: FieldSpec =
	FieldSpec::new("experiment id", "xid", ValueType::Text).with_max_length(40);
pub static EXPERIMENT_VARIANT: FieldSpec =
	FieldSpec::new("experiment variant", "xvar", ValueType::Text);

pub static CUSTOM_DIMENSION: FieldSpec =
	FieldSpec::new("custom dimension", "cd_", ValueType::Text).with_max_length(150);
pub static CUSTOM_METRIC: FieldSpec =
	FieldSpec::new("custom metric", "cm_", ValueType::Integer);
pub static PRODUCT_CUSTOM_DIMENSION: FieldSpec =
	FieldSpec::new("product custom dimension", "pr_cd_", ValueType::Text);
pub static PRODUCT_CUSTOM_METRIC: FieldSpec =
	FieldSpec::new("product custom metric", "pr_cm_", ValueType::Integer);
pub static IMPRESSION_CUSTOM_DIMENSION: FieldSpec =
	FieldSpec::new("product impression custom dimension", "il_pi_cd_", ValueType::Text);
pub static IMPRESSION_CUSTOM_METRIC: FieldSpec =
	FieldSpec::new("product impression custom metric", "il_pi_cm_", ValueType::Integer);
