// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

//! Transactional data access.
//!
//! Every method is a single atomic unit: a relationship write and the
//! counter update it triggers commit together or not at all. Scoped reads
//! filter by both the entity id and its parent id, and report a missing or
//! out-of-scope row the same way (`None` / `false`).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::character::{Character, CharacterChanges, NewCharacter};
use crate::models::feed::FeedSnapshot;
use crate::models::follow::FollowOutcome;
use crate::models::retweet::{Retweet, RetweetOutcome};
use crate::models::template::{NewTweakTemplate, TweakTemplate};
use crate::models::trend::{NewTrend, Trend};
use crate::models::tweak::{CreatedTweak, NewTweak, Tweak, TweakChanges};
use crate::models::universe::{NewUniverse, Universe, UniverseChanges};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round-trip used by the health check
    async fn ping(&self) -> Result<()>;

    // Universes

    async fn list_universes(&self, user_id: i32) -> Result<Vec<Universe>>;

    /// Unscoped lookup for the ownership gate
    async fn find_universe(&self, universe_id: i32) -> Result<Option<Universe>>;

    async fn create_universe(&self, new: NewUniverse) -> Result<Universe>;

    async fn update_universe(
        &self,
        universe_id: i32,
        changes: UniverseChanges,
    ) -> Result<Option<Universe>>;

    /// Deletes the universe and everything under it, children first
    async fn delete_universe(&self, universe_id: i32) -> Result<bool>;

    // Characters

    async fn list_characters(&self, universe_id: i32) -> Result<Vec<Character>>;

    async fn find_character(&self, universe_id: i32, character_id: i32)
        -> Result<Option<Character>>;

    async fn create_character(&self, new: NewCharacter) -> Result<Character>;

    async fn update_character(
        &self,
        universe_id: i32,
        character_id: i32,
        changes: CharacterChanges,
    ) -> Result<Option<Character>>;

    /// Removes the character with its tweaks, its retweets (giving back the
    /// retweet counts) and its follow edges
    async fn delete_character(&self, universe_id: i32, character_id: i32) -> Result<bool>;

    // Tweaks

    /// All tweaks of the universe, replies included, newest display date first
    async fn list_tweaks(&self, universe_id: i32) -> Result<Vec<Tweak>>;

    async fn list_replies(&self, universe_id: i32, tweak_id: i32) -> Result<Vec<Tweak>>;

    async fn find_tweak(&self, universe_id: i32, tweak_id: i32) -> Result<Option<Tweak>>;

    /// Inserts the tweak; when it quotes an existing tweak of the same
    /// universe, that tweak's quote_count is bumped in the same transaction.
    /// Fails with `NotFound` if the author is not in the universe.
    async fn create_tweak(&self, new: NewTweak) -> Result<CreatedTweak>;

    async fn update_tweak(
        &self,
        universe_id: i32,
        tweak_id: i32,
        changes: TweakChanges,
    ) -> Result<Option<Tweak>>;

    /// Hard delete. Retweet rows of the tweak go with it; replies stay.
    async fn delete_tweak(&self, universe_id: i32, tweak_id: i32) -> Result<bool>;

    // Retweets

    /// Idempotent: an existing (character, tweak) pair is returned untouched.
    /// Otherwise inserts the row and bumps the tweak's retweet_count.
    async fn create_retweet(
        &self,
        universe_id: i32,
        character_id: i32,
        tweak_id: i32,
    ) -> Result<RetweetOutcome>;

    /// Deletes the pair if present and lowers retweet_count, floored at zero
    async fn delete_retweet(&self, character_id: i32, tweak_id: i32) -> Result<bool>;

    async fn find_retweet(&self, character_id: i32, tweak_id: i32) -> Result<Option<Retweet>>;

    /// Top-level tweaks, boosts of top-level tweaks and their quoted tweaks,
    /// read from a single snapshot
    async fn feed_snapshot(&self, universe_id: i32) -> Result<FeedSnapshot>;

    // Follow graph

    /// Idempotent edge creation; both characters must belong to the universe
    async fn create_follow(
        &self,
        universe_id: i32,
        follower_id: i32,
        following_id: i32,
    ) -> Result<FollowOutcome>;

    async fn delete_follow(&self, follower_id: i32, following_id: i32) -> Result<bool>;

    async fn is_following(&self, follower_id: i32, following_id: i32) -> Result<bool>;

    async fn followers_count(&self, character_id: i32) -> Result<i64>;

    async fn following_count(&self, character_id: i32) -> Result<i64>;

    // Trends

    async fn list_trends(&self, universe_id: i32) -> Result<Vec<Trend>>;

    async fn create_trend(&self, new: NewTrend) -> Result<Trend>;

    async fn delete_trend(&self, universe_id: i32, trend_id: i32) -> Result<bool>;

    // Templates

    async fn list_templates(&self, user_id: i32) -> Result<Vec<TweakTemplate>>;

    /// Unscoped so the caller can tell "missing" from "not yours"
    async fn find_template(&self, template_id: i32) -> Result<Option<TweakTemplate>>;

    async fn create_template(&self, new: NewTweakTemplate) -> Result<TweakTemplate>;

    async fn delete_template(&self, user_id: i32, template_id: i32) -> Result<bool>;
}
