// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::character_follows;

/// Follow edge between two characters of the same universe
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = character_follows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CharacterFollow {
    pub id: i32,
    pub follower_id: i32,
    pub following_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = character_follows)]
pub struct NewCharacterFollow {
    pub follower_id: i32,
    pub following_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowOutcome {
    pub follow: CharacterFollow,
    pub created: bool,
}

/// Follow state between two characters plus the graph-derived counts of
/// the followed character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowStatus {
    pub is_following: bool,
    pub followers_count: i64,
    pub following_count: i64,
}
