// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

//! In-process store for tests and local development.
//!
//! All tables sit behind one lock, so each trait method observes and
//! mutates a consistent state and is atomic with respect to the others.
//! Mutations validate before writing anything, which keeps a failed call
//! from leaving partial state behind.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::character::{Character, CharacterChanges, NewCharacter};
use crate::models::feed::FeedSnapshot;
use crate::models::follow::{CharacterFollow, FollowOutcome};
use crate::models::retweet::{Retweet, RetweetOutcome};
use crate::models::template::{NewTweakTemplate, TweakTemplate};
use crate::models::trend::{NewTrend, Trend};
use crate::models::tweak::{CreatedTweak, NewTweak, Tweak, TweakChanges};
use crate::models::universe::{NewUniverse, Universe, UniverseChanges};

use super::Store;

/// Per-table id sequences; ids are never reused, as with SERIAL columns
#[derive(Debug, Default)]
struct Sequences {
    universes: i32,
    characters: i32,
    tweaks: i32,
    retweets: i32,
    follows: i32,
    trends: i32,
    templates: i32,
}

fn next(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

#[derive(Debug, Default)]
struct Tables {
    seq: Sequences,
    last_timestamp: Option<DateTime<Utc>>,
    universes: BTreeMap<i32, Universe>,
    characters: BTreeMap<i32, Character>,
    tweaks: BTreeMap<i32, Tweak>,
    retweets: BTreeMap<i32, Retweet>,
    follows: BTreeMap<i32, CharacterFollow>,
    trends: BTreeMap<i32, Trend>,
    templates: BTreeMap<i32, TweakTemplate>,
}

impl Tables {
    /// Strictly increasing creation time
    fn stamp(&mut self, wanted: DateTime<Utc>) -> DateTime<Utc> {
        let stamp = match self.last_timestamp {
            Some(last) if wanted <= last => last + Duration::microseconds(1),
            _ => wanted,
        };
        self.last_timestamp = Some(stamp);
        stamp
    }

    fn character_in(&self, universe_id: i32, character_id: i32) -> Option<&Character> {
        self.characters
            .get(&character_id)
            .filter(|c| c.universe_id == universe_id)
    }

    fn tweak_in(&self, universe_id: i32, tweak_id: i32) -> Option<&Tweak> {
        self.tweaks
            .get(&tweak_id)
            .filter(|t| t.universe_id == universe_id)
    }

    fn retweet_for(&self, character_id: i32, tweak_id: i32) -> Option<&Retweet> {
        self.retweets
            .values()
            .find(|r| r.character_id == character_id && r.tweak_id == tweak_id)
    }

    fn follow_for(&self, follower_id: i32, following_id: i32) -> Option<&CharacterFollow> {
        self.follows
            .values()
            .find(|f| f.follower_id == follower_id && f.following_id == following_id)
    }

    /// Drops the tweaks and every retweet pointing at them
    fn remove_tweaks(&mut self, tweak_ids: &BTreeSet<i32>) {
        self.retweets.retain(|_, r| !tweak_ids.contains(&r.tweak_id));
        self.tweaks.retain(|id, _| !tweak_ids.contains(id));
    }

    /// Drops the characters' own retweets, giving the boosted tweaks their
    /// count back, and every follow edge touching them
    fn remove_character_edges(&mut self, character_ids: &BTreeSet<i32>) {
        let boosted: Vec<i32> = self
            .retweets
            .values()
            .filter(|r| character_ids.contains(&r.character_id))
            .map(|r| r.tweak_id)
            .collect();
        for tweak_id in boosted {
            if let Some(tweak) = self.tweaks.get_mut(&tweak_id) {
                tweak.record_unretweet();
            }
        }
        self.retweets
            .retain(|_, r| !character_ids.contains(&r.character_id));
        self.follows.retain(|_, f| {
            !character_ids.contains(&f.follower_id) && !character_ids.contains(&f.following_id)
        });
    }
}

/// Store keeping every table in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<()> {
        let _tables = self.tables.read().await;
        Ok(())
    }

    async fn list_universes(&self, user_id: i32) -> Result<Vec<Universe>> {
        let tables = self.tables.read().await;
        Ok(tables
            .universes
            .values()
            .filter(|u| u.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_universe(&self, universe_id: i32) -> Result<Option<Universe>> {
        let tables = self.tables.read().await;
        Ok(tables.universes.get(&universe_id).cloned())
    }

    async fn create_universe(&self, mut new: NewUniverse) -> Result<Universe> {
        let mut tables = self.tables.write().await;
        new.created_at = tables.stamp(new.created_at);
        let id = next(&mut tables.seq.universes);
        let universe = Universe::from_new(id, new);
        tables.universes.insert(id, universe.clone());
        Ok(universe)
    }

    async fn update_universe(
        &self,
        universe_id: i32,
        changes: UniverseChanges,
    ) -> Result<Option<Universe>> {
        let mut tables = self.tables.write().await;
        Ok(tables.universes.get_mut(&universe_id).map(|universe| {
            universe.apply(&changes);
            universe.clone()
        }))
    }

    async fn delete_universe(&self, universe_id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if !tables.universes.contains_key(&universe_id) {
            return Ok(false);
        }

        let character_ids: BTreeSet<i32> = tables
            .characters
            .values()
            .filter(|c| c.universe_id == universe_id)
            .map(|c| c.id)
            .collect();
        let tweak_ids: BTreeSet<i32> = tables
            .tweaks
            .values()
            .filter(|t| t.universe_id == universe_id)
            .map(|t| t.id)
            .collect();

        tables.remove_character_edges(&character_ids);
        tables.remove_tweaks(&tweak_ids);
        tables.characters.retain(|id, _| !character_ids.contains(id));
        tables.trends.retain(|_, t| t.universe_id != universe_id);
        tables.universes.remove(&universe_id);

        info!(
            "Deleted universe {} with {} characters and {} tweaks",
            universe_id,
            character_ids.len(),
            tweak_ids.len()
        );
        Ok(true)
    }

    async fn list_characters(&self, universe_id: i32) -> Result<Vec<Character>> {
        let tables = self.tables.read().await;
        Ok(tables
            .characters
            .values()
            .filter(|c| c.universe_id == universe_id)
            .cloned()
            .collect())
    }

    async fn find_character(
        &self,
        universe_id: i32,
        character_id: i32,
    ) -> Result<Option<Character>> {
        let tables = self.tables.read().await;
        Ok(tables.character_in(universe_id, character_id).cloned())
    }

    async fn create_character(&self, mut new: NewCharacter) -> Result<Character> {
        let mut tables = self.tables.write().await;
        if !tables.universes.contains_key(&new.universe_id) {
            return Err(Error::NotFound("universe"));
        }
        new.created_at = tables.stamp(new.created_at);
        let id = next(&mut tables.seq.characters);
        let character = Character::from_new(id, new);
        tables.characters.insert(id, character.clone());
        Ok(character)
    }

    async fn update_character(
        &self,
        universe_id: i32,
        character_id: i32,
        changes: CharacterChanges,
    ) -> Result<Option<Character>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .characters
            .get_mut(&character_id)
            .filter(|c| c.universe_id == universe_id)
            .map(|character| {
                character.apply(&changes);
                character.clone()
            }))
    }

    async fn delete_character(&self, universe_id: i32, character_id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.character_in(universe_id, character_id).is_none() {
            return Ok(false);
        }

        let authored: BTreeSet<i32> = tables
            .tweaks
            .values()
            .filter(|t| t.character_id == character_id)
            .map(|t| t.id)
            .collect();

        tables.remove_character_edges(&BTreeSet::from([character_id]));
        tables.remove_tweaks(&authored);
        tables.characters.remove(&character_id);

        debug!(
            "Deleted character {} and {} authored tweaks",
            character_id,
            authored.len()
        );
        Ok(true)
    }

    async fn list_tweaks(&self, universe_id: i32) -> Result<Vec<Tweak>> {
        let tables = self.tables.read().await;
        let mut tweaks: Vec<Tweak> = tables
            .tweaks
            .values()
            .filter(|t| t.universe_id == universe_id)
            .cloned()
            .collect();
        tweaks.sort_by(|a, b| {
            b.display_date()
                .cmp(&a.display_date())
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(tweaks)
    }

    async fn list_replies(&self, universe_id: i32, tweak_id: i32) -> Result<Vec<Tweak>> {
        let tables = self.tables.read().await;
        let mut replies: Vec<Tweak> = tables
            .tweaks
            .values()
            .filter(|t| t.universe_id == universe_id && t.reply_to_tweak_id == Some(tweak_id))
            .cloned()
            .collect();
        replies.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(replies)
    }

    async fn find_tweak(&self, universe_id: i32, tweak_id: i32) -> Result<Option<Tweak>> {
        let tables = self.tables.read().await;
        Ok(tables.tweak_in(universe_id, tweak_id).cloned())
    }

    async fn create_tweak(&self, mut new: NewTweak) -> Result<CreatedTweak> {
        let mut tables = self.tables.write().await;
        if tables
            .character_in(new.universe_id, new.character_id)
            .is_none()
        {
            return Err(Error::NotFound("character"));
        }

        new.created_at = tables.stamp(new.created_at);
        let universe_id = new.universe_id;
        let quoted_id = new.quoted_tweak_id;
        let id = next(&mut tables.seq.tweaks);
        let tweak = Tweak::from_new(id, new);
        tables.tweaks.insert(id, tweak.clone());

        let quote_counted = match quoted_id {
            Some(quoted_id) => match tables
                .tweaks
                .get_mut(&quoted_id)
                .filter(|q| q.universe_id == universe_id)
            {
                Some(quoted) => {
                    quoted.record_quote();
                    true
                }
                None => {
                    debug!("Quoted tweak {} not found, quote count untouched", quoted_id);
                    false
                }
            },
            None => false,
        };

        Ok(CreatedTweak {
            tweak,
            quote_counted,
        })
    }

    async fn update_tweak(
        &self,
        universe_id: i32,
        tweak_id: i32,
        changes: TweakChanges,
    ) -> Result<Option<Tweak>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .tweaks
            .get_mut(&tweak_id)
            .filter(|t| t.universe_id == universe_id)
            .map(|tweak| {
                tweak.apply(&changes);
                tweak.clone()
            }))
    }

    async fn delete_tweak(&self, universe_id: i32, tweak_id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.tweak_in(universe_id, tweak_id).is_none() {
            return Ok(false);
        }
        tables.remove_tweaks(&BTreeSet::from([tweak_id]));
        Ok(true)
    }

    async fn create_retweet(
        &self,
        universe_id: i32,
        character_id: i32,
        tweak_id: i32,
    ) -> Result<RetweetOutcome> {
        let mut tables = self.tables.write().await;
        if tables.character_in(universe_id, character_id).is_none() {
            return Err(Error::NotFound("character"));
        }
        if tables.tweak_in(universe_id, tweak_id).is_none() {
            return Err(Error::NotFound("tweak"));
        }

        if let Some(existing) = tables.retweet_for(character_id, tweak_id) {
            debug!(
                "Retweet already exists for character {} on tweak {}",
                character_id, tweak_id
            );
            return Ok(RetweetOutcome {
                retweet: existing.clone(),
                created: false,
            });
        }

        let created_at = tables.stamp(Utc::now());
        let id = next(&mut tables.seq.retweets);
        let retweet = Retweet {
            id,
            character_id,
            tweak_id,
            created_at,
        };
        tables.retweets.insert(id, retweet.clone());
        if let Some(tweak) = tables.tweaks.get_mut(&tweak_id) {
            tweak.record_retweet();
        }

        Ok(RetweetOutcome {
            retweet,
            created: true,
        })
    }

    async fn delete_retweet(&self, character_id: i32, tweak_id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let Some(id) = tables.retweet_for(character_id, tweak_id).map(|r| r.id) else {
            return Ok(false);
        };
        if let Some(tweak) = tables.tweaks.get_mut(&tweak_id) {
            tweak.record_unretweet();
        }
        tables.retweets.remove(&id);
        Ok(true)
    }

    async fn find_retweet(&self, character_id: i32, tweak_id: i32) -> Result<Option<Retweet>> {
        let tables = self.tables.read().await;
        Ok(tables.retweet_for(character_id, tweak_id).cloned())
    }

    async fn feed_snapshot(&self, universe_id: i32) -> Result<FeedSnapshot> {
        let tables = self.tables.read().await;

        let tweaks: Vec<Tweak> = tables
            .tweaks
            .values()
            .filter(|t| t.universe_id == universe_id && !t.is_reply())
            .cloned()
            .collect();

        let boosts: Vec<(Retweet, Tweak)> = tables
            .retweets
            .values()
            .filter_map(|r| {
                tables
                    .tweak_in(universe_id, r.tweak_id)
                    .filter(|t| !t.is_reply())
                    .map(|t| (r.clone(), t.clone()))
            })
            .collect();

        let quoted_ids: BTreeSet<i32> = tweaks
            .iter()
            .chain(boosts.iter().map(|(_, t)| t))
            .filter_map(|t| t.quoted_tweak_id)
            .collect();
        let quoted = quoted_ids
            .into_iter()
            .filter_map(|id| tables.tweak_in(universe_id, id).cloned())
            .collect();

        Ok(FeedSnapshot {
            tweaks,
            boosts,
            quoted,
        })
    }

    async fn create_follow(
        &self,
        universe_id: i32,
        follower_id: i32,
        following_id: i32,
    ) -> Result<FollowOutcome> {
        let mut tables = self.tables.write().await;
        if follower_id == following_id {
            return Err(Error::InvalidOperation("cannot follow yourself".into()));
        }
        if tables.character_in(universe_id, follower_id).is_none()
            || tables.character_in(universe_id, following_id).is_none()
        {
            return Err(Error::NotFound("character"));
        }

        if let Some(existing) = tables.follow_for(follower_id, following_id) {
            debug!("Follow relationship already exists - ignoring");
            return Ok(FollowOutcome {
                follow: existing.clone(),
                created: false,
            });
        }

        let created_at = tables.stamp(Utc::now());
        let id = next(&mut tables.seq.follows);
        let follow = CharacterFollow {
            id,
            follower_id,
            following_id,
            created_at,
        };
        tables.follows.insert(id, follow.clone());
        Ok(FollowOutcome {
            follow,
            created: true,
        })
    }

    async fn delete_follow(&self, follower_id: i32, following_id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let Some(id) = tables.follow_for(follower_id, following_id).map(|f| f.id) else {
            return Ok(false);
        };
        tables.follows.remove(&id);
        Ok(true)
    }

    async fn is_following(&self, follower_id: i32, following_id: i32) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.follow_for(follower_id, following_id).is_some())
    }

    async fn followers_count(&self, character_id: i32) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .values()
            .filter(|f| f.following_id == character_id)
            .count() as i64)
    }

    async fn following_count(&self, character_id: i32) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .values()
            .filter(|f| f.follower_id == character_id)
            .count() as i64)
    }

    async fn list_trends(&self, universe_id: i32) -> Result<Vec<Trend>> {
        let tables = self.tables.read().await;
        let mut trends: Vec<Trend> = tables
            .trends
            .values()
            .filter(|t| t.universe_id == universe_id)
            .cloned()
            .collect();
        trends.sort_by(|a, b| b.tweet_count.cmp(&a.tweet_count).then_with(|| a.id.cmp(&b.id)));
        Ok(trends)
    }

    async fn create_trend(&self, mut new: NewTrend) -> Result<Trend> {
        let mut tables = self.tables.write().await;
        if !tables.universes.contains_key(&new.universe_id) {
            return Err(Error::NotFound("universe"));
        }
        new.created_at = tables.stamp(new.created_at);
        let id = next(&mut tables.seq.trends);
        let trend = Trend::from_new(id, new);
        tables.trends.insert(id, trend.clone());
        Ok(trend)
    }

    async fn delete_trend(&self, universe_id: i32, trend_id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let in_scope = tables
            .trends
            .get(&trend_id)
            .is_some_and(|t| t.universe_id == universe_id);
        if in_scope {
            tables.trends.remove(&trend_id);
        }
        Ok(in_scope)
    }

    async fn list_templates(&self, user_id: i32) -> Result<Vec<TweakTemplate>> {
        let tables = self.tables.read().await;
        Ok(tables
            .templates
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_template(&self, template_id: i32) -> Result<Option<TweakTemplate>> {
        let tables = self.tables.read().await;
        Ok(tables.templates.get(&template_id).cloned())
    }

    async fn create_template(&self, mut new: NewTweakTemplate) -> Result<TweakTemplate> {
        let mut tables = self.tables.write().await;
        new.created_at = tables.stamp(new.created_at);
        let id = next(&mut tables.seq.templates);
        let template = TweakTemplate::from_new(id, new);
        tables.templates.insert(id, template.clone());
        Ok(template)
    }

    async fn delete_template(&self, user_id: i32, template_id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .templates
            .get(&template_id)
            .is_some_and(|t| t.user_id == user_id);
        if owned {
            tables.templates.remove(&template_id);
        }
        Ok(owned)
    }
}
