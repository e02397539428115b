// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error;
use crate::models::tweak::{ensure_counter, DEFAULT_SOURCE_LABEL};
use crate::schema::tweak_templates;

/// Per-user preset of engagement counters used to pre-fill new tweaks
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = tweak_templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TweakTemplate {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub comment_count: i32,
    pub retweet_count: i32,
    pub quote_count: i32,
    pub like_count: i32,
    pub view_count: i32,
    pub source_label: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tweak_templates)]
pub struct NewTweakTemplate {
    pub user_id: i32,
    pub name: String,
    pub comment_count: i32,
    pub retweet_count: i32,
    pub quote_count: i32,
    pub like_count: i32,
    pub view_count: i32,
    pub source_label: String,
    pub created_at: DateTime<Utc>,
}

fn default_source_label() -> String {
    DEFAULT_SOURCE_LABEL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    #[serde(default)]
    pub comment_count: i32,
    #[serde(default)]
    pub retweet_count: i32,
    #[serde(default)]
    pub quote_count: i32,
    #[serde(default)]
    pub like_count: i32,
    #[serde(default)]
    pub view_count: i32,
    #[serde(default = "default_source_label")]
    pub source_label: String,
}

impl CreateTemplate {
    pub fn validate(&self) -> error::Result<()> {
        ensure_counter("comment_count", Some(self.comment_count))?;
        ensure_counter("retweet_count", Some(self.retweet_count))?;
        ensure_counter("quote_count", Some(self.quote_count))?;
        ensure_counter("like_count", Some(self.like_count))?;
        ensure_counter("view_count", Some(self.view_count))
    }

    pub fn into_new(self, user_id: i32, now: DateTime<Utc>) -> NewTweakTemplate {
        NewTweakTemplate {
            user_id,
            name: self.name,
            comment_count: self.comment_count,
            retweet_count: self.retweet_count,
            quote_count: self.quote_count,
            like_count: self.like_count,
            view_count: self.view_count,
            source_label: self.source_label,
            created_at: now,
        }
    }
}

impl TweakTemplate {
    pub fn from_new(id: i32, new: NewTweakTemplate) -> Self {
        Self {
            id,
            user_id: new.user_id,
            name: new.name,
            comment_count: new.comment_count,
            retweet_count: new.retweet_count,
            quote_count: new.quote_count,
            like_count: new.like_count,
            view_count: new.view_count,
            source_label: new.source_label,
            created_at: new.created_at,
        }
    }
}
