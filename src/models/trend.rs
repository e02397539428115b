// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::trends;

/// Display-only trending topic. Not linked to tweaks.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = trends)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Trend {
    pub id: i32,
    pub universe_id: i32,
    pub name: String,
    pub tweet_count: i32,
    pub header_image: Option<String>,
    pub header_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trends)]
pub struct NewTrend {
    pub universe_id: i32,
    pub name: String,
    pub tweet_count: i32,
    pub header_image: Option<String>,
    pub header_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrend {
    pub name: String,
    #[serde(default)]
    pub tweet_count: i32,
    #[serde(default)]
    pub header_image: Option<String>,
    #[serde(default)]
    pub header_text: Option<String>,
}

impl CreateTrend {
    pub fn into_new(self, universe_id: i32, now: DateTime<Utc>) -> NewTrend {
        NewTrend {
            universe_id,
            name: self.name,
            tweet_count: self.tweet_count,
            header_image: self.header_image,
            header_text: self.header_text,
            created_at: now,
        }
    }
}

impl Trend {
    pub fn from_new(id: i32, new: NewTrend) -> Self {
        Self {
            id,
            universe_id: new.universe_id,
            name: new.name,
            tweet_count: new.tweet_count,
            header_image: new.header_image,
            header_text: new.header_text,
            created_at: new.created_at,
        }
    }
}
