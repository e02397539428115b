// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

pub mod characters;
pub mod feed;
pub mod health;
pub mod metrics;
pub mod retweets;
pub mod social_graph;
pub mod templates;
pub mod trends;
pub mod tweaks;
pub mod universes;

use serde::{Deserialize, Serialize};

/// Body returned by delete endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

impl DeleteResponse {
    pub fn new(deleted: bool) -> Self {
        Self { deleted }
    }
}
