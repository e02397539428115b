// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use tracing::debug;

use super::TweakNowService;
use crate::error::Result;
use crate::models::feed::{FeedItem, FeedItemKind, FeedSnapshot};
use crate::models::tweak::Tweak;

impl TweakNowService {
    /// Timeline of a universe: originals and boosts, newest first
    pub async fn feed(&self, caller: i32, universe_id: i32) -> Result<Vec<FeedItem>> {
        self.authorize_universe(caller, universe_id).await?;
        let snapshot = self.store.feed_snapshot(universe_id).await?;
        let items = compose(snapshot);
        debug!("Composed {} feed items for universe {}", items.len(), universe_id);
        Ok(items)
    }
}

/// Merges originals and boosts into one ordered timeline.
///
/// Originals sort by their display date, boosts by the time of the boost.
/// Ties fall back to tweak id (descending), then the original before its
/// boosts in retweet id order. Replies never appear, not even as boosts.
pub fn compose(snapshot: FeedSnapshot) -> Vec<FeedItem> {
    let FeedSnapshot {
        tweaks,
        boosts,
        quoted,
    } = snapshot;

    let quoted: HashMap<i32, Tweak> = quoted.into_iter().map(|t| (t.id, t)).collect();
    let resolve = |tweak: &Tweak| {
        tweak
            .quoted_tweak_id
            .and_then(|id| quoted.get(&id))
            .cloned()
    };

    let mut items: Vec<FeedItem> = Vec::with_capacity(tweaks.len() + boosts.len());

    for tweak in tweaks.into_iter().filter(|t| !t.is_reply()) {
        items.push(FeedItem {
            kind: FeedItemKind::Original,
            display_at: tweak.display_date(),
            quoted_tweak: resolve(&tweak),
            boosted_by: None,
            retweet_id: None,
            tweak,
        });
    }

    for (retweet, tweak) in boosts.into_iter().filter(|(_, t)| !t.is_reply()) {
        items.push(FeedItem {
            kind: FeedItemKind::Boosted,
            display_at: retweet.created_at,
            quoted_tweak: resolve(&tweak),
            boosted_by: Some(retweet.character_id),
            retweet_id: Some(retweet.id),
            tweak,
        });
    }

    items.sort_by(|a, b| {
        b.display_at
            .cmp(&a.display_at)
            .then_with(|| b.tweak.id.cmp(&a.tweak.id))
            .then_with(|| a.retweet_id.cmp(&b.retweet_id))
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::retweet::Retweet;
    use crate::models::tweak::CreateTweak;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn tweak(id: i32, created: i64) -> Tweak {
        Tweak::from_new(
            id,
            CreateTweak {
                character_id: 1,
                content: format!("tweak {}", id),
                ..Default::default()
            }
            .into_new(1, None, at(created)),
        )
    }

    fn retweet(id: i32, character_id: i32, tweak_id: i32, created: i64) -> Retweet {
        Retweet {
            id,
            character_id,
            tweak_id,
            created_at: at(created),
        }
    }

    #[test]
    fn boost_sorts_by_boost_time() {
        let mut a = tweak(1, 0);
        a.custom_date = Some(at(10));
        let b = tweak(2, -60);

        let items = compose(FeedSnapshot {
            tweaks: vec![a, b.clone()],
            boosts: vec![(retweet(1, 2, 2, 20), b)],
            quoted: vec![],
        });

        let order: Vec<(FeedItemKind, i32)> = items.iter().map(|i| (i.kind, i.tweak.id)).collect();
        assert_eq!(
            order,
            vec![
                (FeedItemKind::Boosted, 2),
                (FeedItemKind::Original, 1),
                (FeedItemKind::Original, 2),
            ]
        );
        assert_eq!(items[0].boosted_by, Some(2));
        assert_eq!(items[0].display_at, at(20));
        assert_eq!(items[1].display_at, at(10));
    }

    #[test]
    fn replies_are_dropped_even_when_boosted() {
        let root = tweak(1, 0);
        let mut reply = tweak(2, 5);
        reply.reply_to_tweak_id = Some(1);

        let items = compose(FeedSnapshot {
            tweaks: vec![root, reply.clone()],
            boosts: vec![(retweet(1, 3, 2, 10), reply)],
            quoted: vec![],
        });

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].tweak.id, 1);
    }

    #[test]
    fn quoted_tweak_is_attached_when_resolved() {
        let quoted = tweak(1, 0);
        let mut quoting = tweak(2, 5);
        quoting.quoted_tweak_id = Some(1);
        let mut dangling = tweak(3, 6);
        dangling.quoted_tweak_id = Some(99);

        let items = compose(FeedSnapshot {
            tweaks: vec![quoted.clone(), quoting, dangling],
            boosts: vec![],
            quoted: vec![quoted.clone()],
        });

        assert_eq!(items[0].tweak.id, 3);
        assert!(items[0].quoted_tweak.is_none());
        assert_eq!(items[1].quoted_tweak.as_ref(), Some(&quoted));
        assert!(items[2].quoted_tweak.is_none());
    }

    #[test]
    fn ties_break_deterministically() {
        let first = tweak(1, 0);
        let second = tweak(2, 0);

        let items = compose(FeedSnapshot {
            tweaks: vec![first.clone(), second],
            boosts: vec![
                (retweet(7, 4, 1, 0), first.clone()),
                (retweet(3, 5, 1, 0), first),
            ],
            quoted: vec![],
        });

        let keys: Vec<(i32, Option<i32>)> =
            items.iter().map(|i| (i.tweak.id, i.retweet_id)).collect();
        assert_eq!(keys, vec![(2, None), (1, None), (1, Some(3)), (1, Some(7))]);
    }

    #[test]
    fn empty_snapshot_yields_empty_feed() {
        assert!(compose(FeedSnapshot::default()).is_empty());
    }
}
