// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

//! `PgStore` against a live PostgreSQL. Every test returns early when
//! `DATABASE_URL` is not set.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tokio::sync::Mutex;

use tweaknow::config::DatabaseConfig;
use tweaknow::db::Database;
use tweaknow::error::Error;
use tweaknow::models::{
    Character, CreateCharacter, CreateTweak, CreateUniverse, FeedItemKind, Tweak,
};
use tweaknow::services::feed::compose;
use tweaknow::store::{PgStore, Store};

const OWNER: i32 = 9001;

// Embedded migrations must not be applied by two pools at once
static MIGRATION_LOCK: Mutex<()> = Mutex::const_new(());

async fn pg_store() -> Option<Arc<PgStore>> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("DATABASE_URL not set, skipping PgStore test");
            return None;
        }
    };
    let _guard = MIGRATION_LOCK.lock().await;
    let database = Database::new(&DatabaseConfig {
        url,
        max_connections: 8,
    })
    .await
    .unwrap();
    Some(Arc::new(PgStore::new(Arc::new(database))))
}

async fn universe(store: &PgStore, name: &str) -> i32 {
    store
        .create_universe(
            CreateUniverse {
                name: name.into(),
                description: None,
            }
            .into_new(OWNER, Utc::now()),
        )
        .await
        .unwrap()
        .id
}

async fn character(store: &PgStore, universe_id: i32, username: &str) -> Character {
    let body: CreateCharacter =
        serde_json::from_value(json!({ "name": username, "username": username })).unwrap();
    store
        .create_character(body.into_new(universe_id, Utc::now()))
        .await
        .unwrap()
}

async fn tweak(store: &PgStore, universe_id: i32, body: CreateTweak) -> Tweak {
    store
        .create_tweak(body.into_new(universe_id, None, Utc::now()))
        .await
        .unwrap()
        .tweak
}

fn post(character_id: i32, content: &str) -> CreateTweak {
    CreateTweak {
        character_id,
        content: content.into(),
        ..Default::default()
    }
}

async fn retweet_count(store: &PgStore, universe_id: i32, tweak_id: i32) -> i32 {
    store
        .find_tweak(universe_id, tweak_id)
        .await
        .unwrap()
        .unwrap()
        .retweet_count
}

#[test_log::test(tokio::test)]
async fn retweet_lifecycle_moves_the_counter_once() {
    let Some(store) = pg_store().await else { return };
    let u = universe(&store, "retweet lifecycle").await;
    let author = character(&store, u, "author").await;
    let fan = character(&store, u, "fan").await;
    let original = tweak(&store, u, post(author.id, "hello")).await;

    let first = store.create_retweet(u, fan.id, original.id).await.unwrap();
    assert!(first.created);
    assert_eq!(retweet_count(&store, u, original.id).await, 1);

    let again = store.create_retweet(u, fan.id, original.id).await.unwrap();
    assert!(!again.created);
    assert_eq!(again.retweet.id, first.retweet.id);
    assert_eq!(retweet_count(&store, u, original.id).await, 1);

    assert!(store.find_retweet(fan.id, original.id).await.unwrap().is_some());

    assert!(store.delete_retweet(fan.id, original.id).await.unwrap());
    assert_eq!(retweet_count(&store, u, original.id).await, 0);
    assert!(!store.delete_retweet(fan.id, original.id).await.unwrap());
    assert_eq!(retweet_count(&store, u, original.id).await, 0);
    assert!(store.find_retweet(fan.id, original.id).await.unwrap().is_none());

    let elsewhere = universe(&store, "retweet lifecycle, other").await;
    let outsider = character(&store, elsewhere, "outsider").await;
    let err = store
        .create_retweet(u, outsider.id, original.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    store.delete_universe(elsewhere).await.unwrap();
    store.delete_universe(u).await.unwrap();
}

#[test_log::test(tokio::test)]
async fn follow_lifecycle_and_counts() {
    let Some(store) = pg_store().await else { return };
    let u = universe(&store, "follow lifecycle").await;
    let a = character(&store, u, "a").await;
    let b = character(&store, u, "b").await;

    let err = store.create_follow(u, a.id, a.id).await.unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));

    let first = store.create_follow(u, a.id, b.id).await.unwrap();
    assert!(first.created);
    let again = store.create_follow(u, a.id, b.id).await.unwrap();
    assert!(!again.created);
    assert_eq!(again.follow.id, first.follow.id);

    assert!(store.is_following(a.id, b.id).await.unwrap());
    assert!(!store.is_following(b.id, a.id).await.unwrap());
    assert_eq!(store.followers_count(b.id).await.unwrap(), 1);
    assert_eq!(store.following_count(a.id).await.unwrap(), 1);

    assert!(store.delete_follow(a.id, b.id).await.unwrap());
    assert!(!store.delete_follow(a.id, b.id).await.unwrap());
    assert!(!store.is_following(a.id, b.id).await.unwrap());
    assert_eq!(store.followers_count(b.id).await.unwrap(), 0);

    store.delete_universe(u).await.unwrap();
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
async fn concurrent_duplicate_retweets_count_once() {
    let Some(store) = pg_store().await else { return };
    let u = universe(&store, "retweet race").await;
    let author = character(&store, u, "author").await;
    let fan = character(&store, u, "fan").await;
    let original = tweak(&store, u, post(author.id, "race me")).await;

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let store = store.clone();
            let (fan_id, tweak_id) = (fan.id, original.id);
            tokio::spawn(async move { store.create_retweet(u, fan_id, tweak_id).await })
        })
        .collect();

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(outcomes.iter().filter(|o| o.created).count(), 1);
    let winner = outcomes[0].retweet.id;
    assert!(outcomes.iter().all(|o| o.retweet.id == winner));
    assert_eq!(retweet_count(&store, u, original.id).await, 1);

    store.delete_universe(u).await.unwrap();
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
async fn concurrent_duplicate_follows_leave_one_edge() {
    let Some(store) = pg_store().await else { return };
    let u = universe(&store, "follow race").await;
    let a = character(&store, u, "a").await;
    let b = character(&store, u, "b").await;

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = store.clone();
            let (a_id, b_id) = (a.id, b.id);
            tokio::spawn(async move { store.create_follow(u, a_id, b_id).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().created {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    assert_eq!(store.followers_count(b.id).await.unwrap(), 1);

    store.delete_universe(u).await.unwrap();
}

#[test_log::test(tokio::test)]
async fn feed_snapshot_composes_boosts_and_quotes() {
    let Some(store) = pg_store().await else { return };
    let u = universe(&store, "feed").await;
    let a = character(&store, u, "a").await;
    let b = character(&store, u, "b").await;

    let original = tweak(&store, u, post(a.id, "original")).await;
    let reply = tweak(
        &store,
        u,
        CreateTweak {
            reply_to_tweak_id: Some(original.id),
            ..post(b.id, "reply")
        },
    )
    .await;
    let quote = tweak(
        &store,
        u,
        CreateTweak {
            quoted_tweak_id: Some(original.id),
            ..post(b.id, "quote")
        },
    )
    .await;
    store.create_retweet(u, b.id, original.id).await.unwrap();

    let quoted = store.find_tweak(u, original.id).await.unwrap().unwrap();
    assert_eq!(quoted.quote_count, 1);

    let items = compose(store.feed_snapshot(u).await.unwrap());
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|item| item.tweak.id != reply.id));

    let quoting = items.iter().find(|item| item.tweak.id == quote.id).unwrap();
    assert_eq!(quoting.quoted_tweak.as_ref().map(|t| t.id), Some(original.id));

    let boost = items
        .iter()
        .find(|item| item.kind == FeedItemKind::Boosted)
        .unwrap();
    assert_eq!(boost.tweak.id, original.id);
    assert_eq!(boost.boosted_by, Some(b.id));

    store.delete_universe(u).await.unwrap();
}

#[test_log::test(tokio::test)]
async fn character_delete_gives_back_retweets() {
    let Some(store) = pg_store().await else { return };
    let u = universe(&store, "character delete").await;
    let author = character(&store, u, "author").await;
    let fan = character(&store, u, "fan").await;
    let original = tweak(&store, u, post(author.id, "hello")).await;
    let own = tweak(&store, u, post(fan.id, "mine")).await;

    store.create_retweet(u, fan.id, original.id).await.unwrap();
    store.create_follow(u, fan.id, author.id).await.unwrap();
    assert_eq!(retweet_count(&store, u, original.id).await, 1);

    assert!(store.delete_character(u, fan.id).await.unwrap());
    assert_eq!(retweet_count(&store, u, original.id).await, 0);
    assert!(store.find_tweak(u, own.id).await.unwrap().is_none());
    assert_eq!(store.followers_count(author.id).await.unwrap(), 0);
    assert!(!store.delete_character(u, fan.id).await.unwrap());

    store.delete_universe(u).await.unwrap();
}

#[test_log::test(tokio::test)]
async fn universe_delete_cascades_to_everything_under_it() {
    let Some(store) = pg_store().await else { return };
    let u = universe(&store, "cascade").await;
    let a = character(&store, u, "a").await;
    let b = character(&store, u, "b").await;
    let original = tweak(&store, u, post(a.id, "doomed")).await;
    store.create_retweet(u, b.id, original.id).await.unwrap();
    store.create_follow(u, b.id, a.id).await.unwrap();

    assert!(store.delete_universe(u).await.unwrap());

    assert!(store.find_universe(u).await.unwrap().is_none());
    assert!(store.find_character(u, a.id).await.unwrap().is_none());
    assert!(store.find_character(u, b.id).await.unwrap().is_none());
    assert!(store.find_tweak(u, original.id).await.unwrap().is_none());
    assert!(store.find_retweet(b.id, original.id).await.unwrap().is_none());
    assert!(!store.is_following(b.id, a.id).await.unwrap());
    assert!(store.list_tweaks(u).await.unwrap().is_empty());

    assert!(!store.delete_universe(u).await.unwrap());
}
