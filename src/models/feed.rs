// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::retweet::Retweet;
use crate::models::tweak::Tweak;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedItemKind {
    Original,
    Boosted,
}

/// One display-ready entry of a universe timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub kind: FeedItemKind,
    pub tweak: Tweak,
    /// Character who boosted the tweak; `None` for originals
    pub boosted_by: Option<i32>,
    pub retweet_id: Option<i32>,
    /// Sort key: the tweak's display date for originals, the boost time otherwise
    pub display_at: DateTime<Utc>,
    pub quoted_tweak: Option<Tweak>,
}

/// Rows read in one consistent pass for building a feed
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    /// Tweaks of the universe that are not replies
    pub tweaks: Vec<Tweak>,
    /// Retweets whose target is a non-reply tweak of the universe, with that target
    pub boosts: Vec<(Retweet, Tweak)>,
    /// Quoted tweaks referenced by any of the above, resolved within the universe
    pub quoted: Vec<Tweak>,
}
