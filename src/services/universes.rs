// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::Utc;
use tracing::info;

use super::{deleted_or, TweakNowService};
use crate::error::{Error, Result};
use crate::models::universe::{CreateUniverse, Universe, UniversePatch};

impl TweakNowService {
    pub async fn list_universes(&self, caller: i32) -> Result<Vec<Universe>> {
        self.store.list_universes(caller).await
    }

    pub async fn create_universe(&self, caller: i32, body: CreateUniverse) -> Result<Universe> {
        let universe = self
            .store
            .create_universe(body.into_new(caller, Utc::now()))
            .await?;
        info!("User {} created universe {}", caller, universe.id);
        Ok(universe)
    }

    pub async fn get_universe(&self, caller: i32, universe_id: i32) -> Result<Universe> {
        self.authorize_universe(caller, universe_id).await
    }

    pub async fn update_universe(
        &self,
        caller: i32,
        universe_id: i32,
        patch: UniversePatch,
    ) -> Result<Universe> {
        self.authorize_universe(caller, universe_id).await?;
        self.store
            .update_universe(universe_id, patch.into_changes(Utc::now()))
            .await?
            .ok_or(Error::NotFound("universe"))
    }

    /// Removes the universe with its characters, tweaks, edges and trends
    pub async fn delete_universe(&self, caller: i32, universe_id: i32) -> Result<()> {
        self.authorize_universe(caller, universe_id).await?;
        deleted_or(self.store.delete_universe(universe_id).await?, "universe")
    }
}
