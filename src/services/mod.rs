// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

//! Domain operations on top of a [`Store`].
//!
//! Every universe-scoped call goes through [`TweakNowService::authorize_universe`]
//! before it touches the store.

pub mod catalog;
pub mod characters;
pub mod engagement;
pub mod feed;
pub mod follow_graph;
pub mod tweaks;
pub mod universes;

use std::sync::Arc;

use tracing::warn;

use crate::error::{Error, Result};
use crate::metrics::{EngagementEvent, Metrics};
use crate::models::universe::Universe;
use crate::store::Store;

#[derive(Clone)]
pub struct TweakNowService {
    store: Arc<dyn Store>,
    metrics: Arc<Metrics>,
}

impl TweakNowService {
    pub fn new(store: Arc<dyn Store>, metrics: Arc<Metrics>) -> Self {
        Self { store, metrics }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Ownership gate: the universe must exist and belong to the caller
    pub async fn authorize_universe(&self, caller: i32, universe_id: i32) -> Result<Universe> {
        match self.store.find_universe(universe_id).await? {
            Some(universe) if universe.user_id == caller => Ok(universe),
            Some(_) => {
                warn!(
                    "Caller {} rejected from universe {} owned by another user",
                    caller, universe_id
                );
                Err(Error::Forbidden("universe"))
            }
            None => Err(Error::NotFound("universe")),
        }
    }

    fn record(&self, event: EngagementEvent) {
        self.metrics.record(event);
    }
}

/// Turns a scoped delete's `false` into the uniform not-found error
pub(crate) fn deleted_or(deleted: bool, entity: &'static str) -> Result<()> {
    if deleted {
        Ok(())
    } else {
        Err(Error::NotFound(entity))
    }
}
