// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use tracing::{debug, info};

use super::TweakNowService;
use crate::error::Result;
use crate::metrics::EngagementEvent;
use crate::models::retweet::RetweetOutcome;

impl TweakNowService {
    /// Boosts a tweak. Repeating the call returns the existing retweet and
    /// leaves retweet_count alone.
    pub async fn retweet(
        &self,
        caller: i32,
        universe_id: i32,
        tweak_id: i32,
        character_id: i32,
    ) -> Result<RetweetOutcome> {
        self.authorize_universe(caller, universe_id).await?;

        let outcome = self
            .store
            .create_retweet(universe_id, character_id, tweak_id)
            .await?;
        if outcome.created {
            info!("Character {} retweeted tweak {}", character_id, tweak_id);
            self.record(EngagementEvent::RetweetCreated);
        } else {
            debug!(
                "Character {} already retweeted tweak {}",
                character_id, tweak_id
            );
            self.record(EngagementEvent::RetweetDuplicate);
        }
        Ok(outcome)
    }

    /// Returns whether a retweet was removed
    pub async fn undo_retweet(
        &self,
        caller: i32,
        universe_id: i32,
        tweak_id: i32,
        character_id: i32,
    ) -> Result<bool> {
        self.authorize_universe(caller, universe_id).await?;
        if !self.pair_in_universe(universe_id, tweak_id, character_id).await? {
            return Ok(false);
        }

        let removed = self.store.delete_retweet(character_id, tweak_id).await?;
        if removed {
            info!("Character {} undid retweet of tweak {}", character_id, tweak_id);
            self.record(EngagementEvent::RetweetRemoved);
        }
        Ok(removed)
    }

    pub async fn has_retweeted(
        &self,
        caller: i32,
        universe_id: i32,
        tweak_id: i32,
        character_id: i32,
    ) -> Result<bool> {
        self.authorize_universe(caller, universe_id).await?;
        if !self.pair_in_universe(universe_id, tweak_id, character_id).await? {
            return Ok(false);
        }
        Ok(self
            .store
            .find_retweet(character_id, tweak_id)
            .await?
            .is_some())
    }

    async fn pair_in_universe(
        &self,
        universe_id: i32,
        tweak_id: i32,
        character_id: i32,
    ) -> Result<bool> {
        Ok(self.store.find_tweak(universe_id, tweak_id).await?.is_some()
            && self
                .store
                .find_character(universe_id, character_id)
                .await?
                .is_some())
    }
}
