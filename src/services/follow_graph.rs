// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

//! Follow edges between characters. Counts here come from the edge table;
//! the display counters on `Character` are never touched.

use tracing::{debug, info, warn};

use super::TweakNowService;
use crate::error::{Error, Result};
use crate::metrics::EngagementEvent;
use crate::models::follow::{FollowOutcome, FollowStatus};

impl TweakNowService {
    pub async fn follow(
        &self,
        caller: i32,
        universe_id: i32,
        follower_id: i32,
        following_id: i32,
    ) -> Result<FollowOutcome> {
        if follower_id == following_id {
            warn!("Character {} tried to follow itself", follower_id);
            return Err(Error::InvalidOperation("cannot follow yourself".into()));
        }
        self.authorize_universe(caller, universe_id).await?;

        let outcome = self
            .store
            .create_follow(universe_id, follower_id, following_id)
            .await?;
        if outcome.created {
            info!("Character {} followed {}", follower_id, following_id);
            self.record(EngagementEvent::FollowCreated);
        } else {
            debug!("Character {} already follows {}", follower_id, following_id);
            self.record(EngagementEvent::FollowDuplicate);
        }
        Ok(outcome)
    }

    /// Returns whether an edge was removed
    pub async fn unfollow(
        &self,
        caller: i32,
        universe_id: i32,
        follower_id: i32,
        following_id: i32,
    ) -> Result<bool> {
        self.authorize_universe(caller, universe_id).await?;
        self.require_character(universe_id, follower_id).await?;
        self.require_character(universe_id, following_id).await?;

        let removed = self.store.delete_follow(follower_id, following_id).await?;
        if removed {
            info!("Character {} unfollowed {}", follower_id, following_id);
            self.record(EngagementEvent::Unfollowed);
        }
        Ok(removed)
    }

    /// Edge state plus the followed character's graph counts
    pub async fn follow_status(
        &self,
        caller: i32,
        universe_id: i32,
        follower_id: i32,
        following_id: i32,
    ) -> Result<FollowStatus> {
        self.authorize_universe(caller, universe_id).await?;
        self.require_character(universe_id, follower_id).await?;
        self.require_character(universe_id, following_id).await?;

        Ok(FollowStatus {
            is_following: self.store.is_following(follower_id, following_id).await?,
            followers_count: self.store.followers_count(following_id).await?,
            following_count: self.store.following_count(following_id).await?,
        })
    }

    async fn require_character(&self, universe_id: i32, character_id: i32) -> Result<()> {
        self.store
            .find_character(universe_id, character_id)
            .await?
            .map(|_| ())
            .ok_or(Error::NotFound("character"))
    }
}
