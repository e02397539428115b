// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

//! PostgreSQL store on diesel-async.
//!
//! Multi-statement operations run inside `build_transaction().run(..)`; if
//! the request future is dropped mid-way the transaction never commits and
//! the pooled connection is rolled back before reuse.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, info};

use crate::db::{Database, DbConnection};
use crate::error::{Error, Result};
use crate::models::character::{Character, CharacterChanges, NewCharacter};
use crate::models::feed::FeedSnapshot;
use crate::models::follow::{CharacterFollow, FollowOutcome, NewCharacterFollow};
use crate::models::retweet::{NewRetweet, Retweet, RetweetOutcome};
use crate::models::template::{NewTweakTemplate, TweakTemplate};
use crate::models::trend::{NewTrend, Trend};
use crate::models::tweak::{CreatedTweak, NewTweak, Tweak, TweakChanges};
use crate::models::universe::{NewUniverse, Universe, UniverseChanges};
use crate::schema::{
    character_follows, retweets, trends, tweak_templates, tweaknow_characters, tweaks, universes,
};

use super::Store;

/// Store backed by the PostgreSQL connection pool
pub struct PgStore {
    db: Arc<Database>,
}

impl PgStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Get a database connection from the pool
    async fn get_connection(&self) -> Result<DbConnection> {
        Ok(self.db.get_connection().await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;
        diesel::sql_query("SELECT 1").execute(&mut conn).await?;
        Ok(())
    }

    async fn list_universes(&self, user_id: i32) -> Result<Vec<Universe>> {
        let mut conn = self.get_connection().await?;
        Ok(universes::table
            .filter(universes::user_id.eq(user_id))
            .order(universes::id.asc())
            .select(Universe::as_select())
            .load::<Universe>(&mut conn)
            .await?)
    }

    async fn find_universe(&self, universe_id: i32) -> Result<Option<Universe>> {
        let mut conn = self.get_connection().await?;
        Ok(universes::table
            .find(universe_id)
            .select(Universe::as_select())
            .first::<Universe>(&mut conn)
            .await
            .optional()?)
    }

    async fn create_universe(&self, new: NewUniverse) -> Result<Universe> {
        let mut conn = self.get_connection().await?;
        Ok(diesel::insert_into(universes::table)
            .values(&new)
            .returning(Universe::as_returning())
            .get_result::<Universe>(&mut conn)
            .await?)
    }

    async fn update_universe(
        &self,
        universe_id: i32,
        changes: UniverseChanges,
    ) -> Result<Option<Universe>> {
        let mut conn = self.get_connection().await?;
        Ok(diesel::update(universes::table.find(universe_id))
            .set(&changes)
            .returning(Universe::as_returning())
            .get_result::<Universe>(&mut conn)
            .await
            .optional()?)
    }

    async fn delete_universe(&self, universe_id: i32) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        conn.build_transaction()
            .run(move |conn| {
                Box::pin(async move {
                    let exists = universes::table
                        .find(universe_id)
                        .select(universes::id)
                        .first::<i32>(conn)
                        .await
                        .optional()?;
                    if exists.is_none() {
                        return Ok(false);
                    }

                    let character_ids = tweaknow_characters::table
                        .filter(tweaknow_characters::universe_id.eq(universe_id))
                        .select(tweaknow_characters::id)
                        .load::<i32>(conn)
                        .await?;
                    let tweak_ids = tweaks::table
                        .filter(tweaks::universe_id.eq(universe_id))
                        .select(tweaks::id)
                        .load::<i32>(conn)
                        .await?;

                    // Children first: edges, then tweaks, then characters
                    diesel::delete(
                        retweets::table.filter(
                            retweets::tweak_id
                                .eq_any(&tweak_ids)
                                .or(retweets::character_id.eq_any(&character_ids)),
                        ),
                    )
                    .execute(conn)
                    .await?;
                    diesel::delete(
                        character_follows::table.filter(
                            character_follows::follower_id
                                .eq_any(&character_ids)
                                .or(character_follows::following_id.eq_any(&character_ids)),
                        ),
                    )
                    .execute(conn)
                    .await?;
                    diesel::delete(tweaks::table.filter(tweaks::universe_id.eq(universe_id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(
                        tweaknow_characters::table
                            .filter(tweaknow_characters::universe_id.eq(universe_id)),
                    )
                    .execute(conn)
                    .await?;
                    diesel::delete(trends::table.filter(trends::universe_id.eq(universe_id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(universes::table.find(universe_id))
                        .execute(conn)
                        .await?;

                    info!(
                        "Deleted universe {} with {} characters and {} tweaks",
                        universe_id,
                        character_ids.len(),
                        tweak_ids.len()
                    );
                    Ok::<bool, Error>(true)
                })
            })
            .await
    }

    async fn list_characters(&self, universe_id: i32) -> Result<Vec<Character>> {
        let mut conn = self.get_connection().await?;
        Ok(tweaknow_characters::table
            .filter(tweaknow_characters::universe_id.eq(universe_id))
            .order(tweaknow_characters::id.asc())
            .select(Character::as_select())
            .load::<Character>(&mut conn)
            .await?)
    }

    async fn find_character(
        &self,
        universe_id: i32,
        character_id: i32,
    ) -> Result<Option<Character>> {
        let mut conn = self.get_connection().await?;
        Ok(tweaknow_characters::table
            .filter(tweaknow_characters::id.eq(character_id))
            .filter(tweaknow_characters::universe_id.eq(universe_id))
            .select(Character::as_select())
            .first::<Character>(&mut conn)
            .await
            .optional()?)
    }

    async fn create_character(&self, new: NewCharacter) -> Result<Character> {
        let mut conn = self.get_connection().await?;
        Ok(diesel::insert_into(tweaknow_characters::table)
            .values(&new)
            .returning(Character::as_returning())
            .get_result::<Character>(&mut conn)
            .await?)
    }

    async fn update_character(
        &self,
        universe_id: i32,
        character_id: i32,
        changes: CharacterChanges,
    ) -> Result<Option<Character>> {
        let mut conn = self.get_connection().await?;
        Ok(diesel::update(
            tweaknow_characters::table
                .filter(tweaknow_characters::id.eq(character_id))
                .filter(tweaknow_characters::universe_id.eq(universe_id)),
        )
        .set(&changes)
        .returning(Character::as_returning())
        .get_result::<Character>(&mut conn)
        .await
        .optional()?)
    }

    async fn delete_character(&self, universe_id: i32, character_id: i32) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        conn.build_transaction()
            .run(move |conn| {
                Box::pin(async move {
                    let exists = tweaknow_characters::table
                        .filter(tweaknow_characters::id.eq(character_id))
                        .filter(tweaknow_characters::universe_id.eq(universe_id))
                        .select(tweaknow_characters::id)
                        .first::<i32>(conn)
                        .await
                        .optional()?;
                    if exists.is_none() {
                        return Ok(false);
                    }

                    // Give back the retweet counts of everything this character boosted
                    let boosted = retweets::table
                        .filter(retweets::character_id.eq(character_id))
                        .select(retweets::tweak_id)
                        .load::<i32>(conn)
                        .await?;
                    diesel::delete(retweets::table.filter(retweets::character_id.eq(character_id)))
                        .execute(conn)
                        .await?;
                    diesel::update(
                        tweaks::table
                            .filter(tweaks::id.eq_any(&boosted))
                            .filter(tweaks::retweet_count.gt(0)),
                    )
                    .set(tweaks::retweet_count.eq(tweaks::retweet_count - 1))
                    .execute(conn)
                    .await?;

                    diesel::delete(
                        character_follows::table.filter(
                            character_follows::follower_id
                                .eq(character_id)
                                .or(character_follows::following_id.eq(character_id)),
                        ),
                    )
                    .execute(conn)
                    .await?;

                    let authored = tweaks::table
                        .filter(tweaks::character_id.eq(character_id))
                        .select(tweaks::id)
                        .load::<i32>(conn)
                        .await?;
                    diesel::delete(retweets::table.filter(retweets::tweak_id.eq_any(&authored)))
                        .execute(conn)
                        .await?;
                    diesel::delete(tweaks::table.filter(tweaks::character_id.eq(character_id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(tweaknow_characters::table.find(character_id))
                        .execute(conn)
                        .await?;

                    debug!(
                        "Deleted character {} and {} authored tweaks",
                        character_id,
                        authored.len()
                    );
                    Ok::<bool, Error>(true)
                })
            })
            .await
    }

    async fn list_tweaks(&self, universe_id: i32) -> Result<Vec<Tweak>> {
        let mut conn = self.get_connection().await?;
        let mut tweaks = tweaks::table
            .filter(tweaks::universe_id.eq(universe_id))
            .select(Tweak::as_select())
            .load::<Tweak>(&mut conn)
            .await?;
        tweaks.sort_by(|a, b| {
            b.display_date()
                .cmp(&a.display_date())
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(tweaks)
    }

    async fn list_replies(&self, universe_id: i32, tweak_id: i32) -> Result<Vec<Tweak>> {
        let mut conn = self.get_connection().await?;
        Ok(tweaks::table
            .filter(tweaks::universe_id.eq(universe_id))
            .filter(tweaks::reply_to_tweak_id.eq(tweak_id))
            .order((tweaks::created_at.asc(), tweaks::id.asc()))
            .select(Tweak::as_select())
            .load::<Tweak>(&mut conn)
            .await?)
    }

    async fn find_tweak(&self, universe_id: i32, tweak_id: i32) -> Result<Option<Tweak>> {
        let mut conn = self.get_connection().await?;
        Ok(tweaks::table
            .filter(tweaks::id.eq(tweak_id))
            .filter(tweaks::universe_id.eq(universe_id))
            .select(Tweak::as_select())
            .first::<Tweak>(&mut conn)
            .await
            .optional()?)
    }

    async fn create_tweak(&self, new: NewTweak) -> Result<CreatedTweak> {
        let mut conn = self.get_connection().await?;

        conn.build_transaction()
            .run(move |conn| {
                Box::pin(async move {
                    let author = tweaknow_characters::table
                        .filter(tweaknow_characters::id.eq(new.character_id))
                        .filter(tweaknow_characters::universe_id.eq(new.universe_id))
                        .select(tweaknow_characters::id)
                        .first::<i32>(conn)
                        .await
                        .optional()?;
                    if author.is_none() {
                        return Err(Error::NotFound("character"));
                    }

                    let tweak = diesel::insert_into(tweaks::table)
                        .values(&new)
                        .returning(Tweak::as_returning())
                        .get_result::<Tweak>(conn)
                        .await?;

                    let quote_counted = match new.quoted_tweak_id {
                        Some(quoted_id) => {
                            let updated = diesel::update(
                                tweaks::table
                                    .filter(tweaks::id.eq(quoted_id))
                                    .filter(tweaks::universe_id.eq(new.universe_id)),
                            )
                            .set(tweaks::quote_count.eq(tweaks::quote_count + 1))
                            .execute(conn)
                            .await?;
                            if updated == 0 {
                                debug!("Quoted tweak {} not found, quote count untouched", quoted_id);
                            }
                            updated > 0
                        }
                        None => false,
                    };

                    Ok::<CreatedTweak, Error>(CreatedTweak {
                        tweak,
                        quote_counted,
                    })
                })
            })
            .await
    }

    async fn update_tweak(
        &self,
        universe_id: i32,
        tweak_id: i32,
        changes: TweakChanges,
    ) -> Result<Option<Tweak>> {
        let mut conn = self.get_connection().await?;
        Ok(diesel::update(
            tweaks::table
                .filter(tweaks::id.eq(tweak_id))
                .filter(tweaks::universe_id.eq(universe_id)),
        )
        .set(&changes)
        .returning(Tweak::as_returning())
        .get_result::<Tweak>(&mut conn)
        .await
        .optional()?)
    }

    async fn delete_tweak(&self, universe_id: i32, tweak_id: i32) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        conn.build_transaction()
            .run(move |conn| {
                Box::pin(async move {
                    let exists = tweaks::table
                        .filter(tweaks::id.eq(tweak_id))
                        .filter(tweaks::universe_id.eq(universe_id))
                        .select(tweaks::id)
                        .first::<i32>(conn)
                        .await
                        .optional()?;
                    if exists.is_none() {
                        return Ok(false);
                    }

                    diesel::delete(retweets::table.filter(retweets::tweak_id.eq(tweak_id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(tweaks::table.find(tweak_id))
                        .execute(conn)
                        .await?;
                    Ok::<bool, Error>(true)
                })
            })
            .await
    }

    async fn create_retweet(
        &self,
        universe_id: i32,
        character_id: i32,
        tweak_id: i32,
    ) -> Result<RetweetOutcome> {
        let mut conn = self.get_connection().await?;

        conn.build_transaction()
            .run(move |conn| {
                Box::pin(async move {
                    let character_exists = tweaknow_characters::table
                        .filter(tweaknow_characters::id.eq(character_id))
                        .filter(tweaknow_characters::universe_id.eq(universe_id))
                        .count()
                        .get_result::<i64>(conn)
                        .await?
                        > 0;
                    if !character_exists {
                        return Err(Error::NotFound("character"));
                    }

                    let tweak_exists = tweaks::table
                        .filter(tweaks::id.eq(tweak_id))
                        .filter(tweaks::universe_id.eq(universe_id))
                        .count()
                        .get_result::<i64>(conn)
                        .await?
                        > 0;
                    if !tweak_exists {
                        return Err(Error::NotFound("tweak"));
                    }

                    // Check if the retweet already exists
                    let existing = retweets::table
                        .filter(retweets::character_id.eq(character_id))
                        .filter(retweets::tweak_id.eq(tweak_id))
                        .select(Retweet::as_select())
                        .first::<Retweet>(conn)
                        .await
                        .optional()?;
                    if let Some(retweet) = existing {
                        debug!(
                            "Retweet already exists for character {} on tweak {}",
                            character_id, tweak_id
                        );
                        return Ok(RetweetOutcome {
                            retweet,
                            created: false,
                        });
                    }

                    let inserted = diesel::insert_into(retweets::table)
                        .values(&NewRetweet {
                            character_id,
                            tweak_id,
                            created_at: Utc::now(),
                        })
                        .on_conflict((retweets::character_id, retweets::tweak_id))
                        .do_nothing()
                        .returning(Retweet::as_returning())
                        .get_result::<Retweet>(conn)
                        .await
                        .optional()?;

                    match inserted {
                        Some(retweet) => {
                            diesel::update(tweaks::table.find(tweak_id))
                                .set(tweaks::retweet_count.eq(tweaks::retweet_count + 1))
                                .execute(conn)
                                .await?;
                            Ok::<RetweetOutcome, Error>(RetweetOutcome {
                                retweet,
                                created: true,
                            })
                        }
                        None => {
                            // A concurrent request inserted the pair first
                            debug!("Retweet insert lost a race - returning the winner");
                            let retweet = retweets::table
                                .filter(retweets::character_id.eq(character_id))
                                .filter(retweets::tweak_id.eq(tweak_id))
                                .select(Retweet::as_select())
                                .first::<Retweet>(conn)
                                .await?;
                            Ok(RetweetOutcome {
                                retweet,
                                created: false,
                            })
                        }
                    }
                })
            })
            .await
    }

    async fn delete_retweet(&self, character_id: i32, tweak_id: i32) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        conn.build_transaction()
            .run(move |conn| {
                Box::pin(async move {
                    let deleted = diesel::delete(
                        retweets::table
                            .filter(retweets::character_id.eq(character_id))
                            .filter(retweets::tweak_id.eq(tweak_id)),
                    )
                    .execute(conn)
                    .await?;

                    if deleted > 0 {
                        diesel::update(
                            tweaks::table
                                .find(tweak_id)
                                .filter(tweaks::retweet_count.gt(0)),
                        )
                        .set(tweaks::retweet_count.eq(tweaks::retweet_count - 1))
                        .execute(conn)
                        .await?;
                    }
                    Ok::<bool, Error>(deleted > 0)
                })
            })
            .await
    }

    async fn find_retweet(&self, character_id: i32, tweak_id: i32) -> Result<Option<Retweet>> {
        let mut conn = self.get_connection().await?;
        Ok(retweets::table
            .filter(retweets::character_id.eq(character_id))
            .filter(retweets::tweak_id.eq(tweak_id))
            .select(Retweet::as_select())
            .first::<Retweet>(&mut conn)
            .await
            .optional()?)
    }

    async fn feed_snapshot(&self, universe_id: i32) -> Result<FeedSnapshot> {
        let mut conn = self.get_connection().await?;

        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run(move |conn| {
                Box::pin(async move {
                    let tweaks = tweaks::table
                        .filter(tweaks::universe_id.eq(universe_id))
                        .filter(tweaks::reply_to_tweak_id.is_null())
                        .select(Tweak::as_select())
                        .load::<Tweak>(conn)
                        .await?;

                    let boosts = retweets::table
                        .inner_join(tweaks::table)
                        .filter(tweaks::universe_id.eq(universe_id))
                        .filter(tweaks::reply_to_tweak_id.is_null())
                        .select((Retweet::as_select(), Tweak::as_select()))
                        .load::<(Retweet, Tweak)>(conn)
                        .await?;

                    let quoted_ids: Vec<i32> = tweaks
                        .iter()
                        .chain(boosts.iter().map(|(_, t)| t))
                        .filter_map(|t| t.quoted_tweak_id)
                        .collect::<BTreeSet<i32>>()
                        .into_iter()
                        .collect();

                    let quoted = if quoted_ids.is_empty() {
                        Vec::new()
                    } else {
                        tweaks::table
                            .filter(tweaks::id.eq_any(&quoted_ids))
                            .filter(tweaks::universe_id.eq(universe_id))
                            .select(Tweak::as_select())
                            .load::<Tweak>(conn)
                            .await?
                    };

                    Ok::<FeedSnapshot, Error>(FeedSnapshot {
                        tweaks,
                        boosts,
                        quoted,
                    })
                })
            })
            .await
    }

    async fn create_follow(
        &self,
        universe_id: i32,
        follower_id: i32,
        following_id: i32,
    ) -> Result<FollowOutcome> {
        if follower_id == following_id {
            return Err(Error::InvalidOperation("cannot follow yourself".into()));
        }
        let mut conn = self.get_connection().await?;

        conn.build_transaction()
            .run(move |conn| {
                Box::pin(async move {
                    // Both ends must live in this universe
                    let found = tweaknow_characters::table
                        .filter(tweaknow_characters::id.eq_any(vec![follower_id, following_id]))
                        .filter(tweaknow_characters::universe_id.eq(universe_id))
                        .count()
                        .get_result::<i64>(conn)
                        .await?;
                    if found != 2 {
                        return Err(Error::NotFound("character"));
                    }

                    // Check if relationship already exists
                    let existing = character_follows::table
                        .filter(character_follows::follower_id.eq(follower_id))
                        .filter(character_follows::following_id.eq(following_id))
                        .select(CharacterFollow::as_select())
                        .first::<CharacterFollow>(conn)
                        .await
                        .optional()?;
                    if let Some(follow) = existing {
                        debug!("Follow relationship already exists - ignoring");
                        return Ok(FollowOutcome {
                            follow,
                            created: false,
                        });
                    }

                    let inserted = diesel::insert_into(character_follows::table)
                        .values(&NewCharacterFollow {
                            follower_id,
                            following_id,
                            created_at: Utc::now(),
                        })
                        .on_conflict((
                            character_follows::follower_id,
                            character_follows::following_id,
                        ))
                        .do_nothing()
                        .returning(CharacterFollow::as_returning())
                        .get_result::<CharacterFollow>(conn)
                        .await
                        .optional()?;

                    match inserted {
                        Some(follow) => Ok::<FollowOutcome, Error>(FollowOutcome {
                            follow,
                            created: true,
                        }),
                        None => {
                            let follow = character_follows::table
                                .filter(character_follows::follower_id.eq(follower_id))
                                .filter(character_follows::following_id.eq(following_id))
                                .select(CharacterFollow::as_select())
                                .first::<CharacterFollow>(conn)
                                .await?;
                            Ok(FollowOutcome {
                                follow,
                                created: false,
                            })
                        }
                    }
                })
            })
            .await
    }

    async fn delete_follow(&self, follower_id: i32, following_id: i32) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let deleted = diesel::delete(
            character_follows::table
                .filter(character_follows::follower_id.eq(follower_id))
                .filter(character_follows::following_id.eq(following_id)),
        )
        .execute(&mut conn)
        .await?;
        Ok(deleted > 0)
    }

    async fn is_following(&self, follower_id: i32, following_id: i32) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let count = character_follows::table
            .filter(character_follows::follower_id.eq(follower_id))
            .filter(character_follows::following_id.eq(following_id))
            .count()
            .get_result::<i64>(&mut conn)
            .await?;
        Ok(count > 0)
    }

    async fn followers_count(&self, character_id: i32) -> Result<i64> {
        let mut conn = self.get_connection().await?;
        Ok(character_follows::table
            .filter(character_follows::following_id.eq(character_id))
            .count()
            .get_result::<i64>(&mut conn)
            .await?)
    }

    async fn following_count(&self, character_id: i32) -> Result<i64> {
        let mut conn = self.get_connection().await?;
        Ok(character_follows::table
            .filter(character_follows::follower_id.eq(character_id))
            .count()
            .get_result::<i64>(&mut conn)
            .await?)
    }

    async fn list_trends(&self, universe_id: i32) -> Result<Vec<Trend>> {
        let mut conn = self.get_connection().await?;
        Ok(trends::table
            .filter(trends::universe_id.eq(universe_id))
            .order((trends::tweet_count.desc(), trends::id.asc()))
            .select(Trend::as_select())
            .load::<Trend>(&mut conn)
            .await?)
    }

    async fn create_trend(&self, new: NewTrend) -> Result<Trend> {
        let mut conn = self.get_connection().await?;
        Ok(diesel::insert_into(trends::table)
            .values(&new)
            .returning(Trend::as_returning())
            .get_result::<Trend>(&mut conn)
            .await?)
    }

    async fn delete_trend(&self, universe_id: i32, trend_id: i32) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let deleted = diesel::delete(
            trends::table
                .filter(trends::id.eq(trend_id))
                .filter(trends::universe_id.eq(universe_id)),
        )
        .execute(&mut conn)
        .await?;
        Ok(deleted > 0)
    }

    async fn list_templates(&self, user_id: i32) -> Result<Vec<TweakTemplate>> {
        let mut conn = self.get_connection().await?;
        Ok(tweak_templates::table
            .filter(tweak_templates::user_id.eq(user_id))
            .order(tweak_templates::id.asc())
            .select(TweakTemplate::as_select())
            .load::<TweakTemplate>(&mut conn)
            .await?)
    }

    async fn find_template(&self, template_id: i32) -> Result<Option<TweakTemplate>> {
        let mut conn = self.get_connection().await?;
        Ok(tweak_templates::table
            .find(template_id)
            .select(TweakTemplate::as_select())
            .first::<TweakTemplate>(&mut conn)
            .await
            .optional()?)
    }

    async fn create_template(&self, new: NewTweakTemplate) -> Result<TweakTemplate> {
        let mut conn = self.get_connection().await?;
        Ok(diesel::insert_into(tweak_templates::table)
            .values(&new)
            .returning(TweakTemplate::as_returning())
            .get_result::<TweakTemplate>(&mut conn)
            .await?)
    }

    async fn delete_template(&self, user_id: i32, template_id: i32) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let deleted = diesel::delete(
            tweak_templates::table
                .filter(tweak_templates::id.eq(template_id))
                .filter(tweak_templates::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .await?;
        Ok(deleted > 0)
    }
}
