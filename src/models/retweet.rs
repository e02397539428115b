// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::retweets;

/// A character boosting a tweak without duplicating it.
/// At most one row exists per (character_id, tweak_id).
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = retweets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Retweet {
    pub id: i32,
    pub character_id: i32,
    pub tweak_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = retweets)]
pub struct NewRetweet {
    pub character_id: i32,
    pub tweak_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetweetRequest {
    pub character_id: i32,
}

/// Outcome of an idempotent retweet. `created` is false when the pair
/// already existed and nothing was written.
#[derive(Debug, Clone, Serialize)]
pub struct RetweetOutcome {
    pub retweet: Retweet,
    pub created: bool,
}
