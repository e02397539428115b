// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

//! TweakNow backend: fictional universes of characters posting tweaks,
//! with retweets, quote-tweaks, a follow graph and a composed feed.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod models;
pub mod patch;
pub mod schema;
pub mod services;
pub mod store;

pub use error::{Error, Result};
