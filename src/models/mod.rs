// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

pub mod character;
pub mod feed;
pub mod follow;
pub mod retweet;
pub mod template;
pub mod trend;
pub mod tweak;
pub mod universe;

pub use character::{Character, CharacterPatch, CreateCharacter, OfficialMark};
pub use feed::{FeedItem, FeedItemKind, FeedSnapshot};
pub use follow::{CharacterFollow, FollowOutcome, FollowStatus};
pub use retweet::{Retweet, RetweetOutcome, RetweetRequest};
pub use template::{CreateTemplate, TweakTemplate};
pub use trend::{CreateTrend, Trend};
pub use tweak::{CreateTweak, CreatedTweak, Tweak, TweakPatch};
pub use universe::{CreateUniverse, Universe, UniversePatch};
