// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::Utc;
use tracing::{debug, info};

use super::{deleted_or, TweakNowService};
use crate::error::{Error, Result};
use crate::models::character::{Character, CharacterPatch, CreateCharacter};

impl TweakNowService {
    pub async fn list_characters(&self, caller: i32, universe_id: i32) -> Result<Vec<Character>> {
        self.authorize_universe(caller, universe_id).await?;
        self.store.list_characters(universe_id).await
    }

    pub async fn get_character(
        &self,
        caller: i32,
        universe_id: i32,
        character_id: i32,
    ) -> Result<Character> {
        self.authorize_universe(caller, universe_id).await?;
        self.store
            .find_character(universe_id, character_id)
            .await?
            .ok_or(Error::NotFound("character"))
    }

    pub async fn create_character(
        &self,
        caller: i32,
        universe_id: i32,
        body: CreateCharacter,
    ) -> Result<Character> {
        self.authorize_universe(caller, universe_id).await?;
        // Handles are not unique within a universe
        let character = self
            .store
            .create_character(body.into_new(universe_id, Utc::now()))
            .await?;
        info!(
            "Created character {} (@{}) in universe {}",
            character.id, character.username, universe_id
        );
        Ok(character)
    }

    pub async fn update_character(
        &self,
        caller: i32,
        universe_id: i32,
        character_id: i32,
        patch: CharacterPatch,
    ) -> Result<Character> {
        self.authorize_universe(caller, universe_id).await?;
        debug!("Updating character {} in universe {}", character_id, universe_id);
        self.store
            .update_character(universe_id, character_id, patch.into_changes(Utc::now()))
            .await?
            .ok_or(Error::NotFound("character"))
    }

    pub async fn delete_character(
        &self,
        caller: i32,
        universe_id: i32,
        character_id: i32,
    ) -> Result<()> {
        self.authorize_universe(caller, universe_id).await?;
        deleted_or(
            self.store.delete_character(universe_id, character_id).await?,
            "character",
        )
    }
}
