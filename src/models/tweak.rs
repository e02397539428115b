// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{self, Error};
use crate::models::template::TweakTemplate;
use crate::patch::{self, Patch};
use crate::schema::tweaks;

pub const DEFAULT_SOURCE_LABEL: &str = "Twitter for iPhone";

/// A simulated post.
///
/// `reply_to_tweak_id` and `quoted_tweak_id` are bare ids into the same
/// table; they are resolved by lookup and may dangle after the target is
/// deleted.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = tweaks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Tweak {
    pub id: i32,
    pub universe_id: i32,
    pub character_id: i32,
    pub content: String,
    pub images: Option<Vec<String>>,
    pub comment_count: i32,
    pub retweet_count: i32,
    pub quote_count: i32,
    pub like_count: i32,
    pub view_count: i32,
    pub source_label: String,
    pub custom_date: Option<DateTime<Utc>>,
    pub reply_to_tweak_id: Option<i32>,
    pub quoted_tweak_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tweaks)]
pub struct NewTweak {
    pub universe_id: i32,
    pub character_id: i32,
    pub content: String,
    pub images: Option<Vec<String>>,
    pub comment_count: i32,
    pub retweet_count: i32,
    pub quote_count: i32,
    pub like_count: i32,
    pub view_count: i32,
    pub source_label: String,
    pub custom_date: Option<DateTime<Utc>>,
    pub reply_to_tweak_id: Option<i32>,
    pub quoted_tweak_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Column changes for a tweak. Universe, author and reply pointer are fixed.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tweaks)]
pub struct TweakChanges {
    pub content: Option<String>,
    pub images: Option<Option<Vec<String>>>,
    pub comment_count: Option<i32>,
    pub retweet_count: Option<i32>,
    pub quote_count: Option<i32>,
    pub like_count: Option<i32>,
    pub view_count: Option<i32>,
    pub source_label: Option<String>,
    pub custom_date: Option<Option<DateTime<Utc>>>,
    pub quoted_tweak_id: Option<Option<i32>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating a tweak.
///
/// Counters and source label left out fall back to the referenced template,
/// then to zero and [`DEFAULT_SOURCE_LABEL`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTweak {
    pub character_id: i32,
    pub content: String,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub comment_count: Option<i32>,
    #[serde(default)]
    pub retweet_count: Option<i32>,
    #[serde(default)]
    pub quote_count: Option<i32>,
    #[serde(default)]
    pub like_count: Option<i32>,
    #[serde(default)]
    pub view_count: Option<i32>,
    #[serde(default)]
    pub source_label: Option<String>,
    #[serde(default)]
    pub custom_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reply_to_tweak_id: Option<i32>,
    #[serde(default)]
    pub quoted_tweak_id: Option<i32>,
    #[serde(default)]
    pub template_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TweakPatch {
    pub content: Patch<String>,
    pub images: Patch<Option<Vec<String>>>,
    pub comment_count: Patch<i32>,
    pub retweet_count: Patch<i32>,
    pub quote_count: Patch<i32>,
    pub like_count: Patch<i32>,
    pub view_count: Patch<i32>,
    pub source_label: Patch<String>,
    pub custom_date: Patch<Option<DateTime<Utc>>>,
    pub quoted_tweak_id: Patch<Option<i32>>,
}

/// Result of inserting a tweak. `quote_counted` tells whether the quoted
/// tweak existed and had its quote_count bumped.
#[derive(Debug, Clone)]
pub struct CreatedTweak {
    pub tweak: Tweak,
    pub quote_counted: bool,
}

/// Engagement counters are display figures and never negative
pub(crate) fn ensure_counter(field: &'static str, value: Option<i32>) -> error::Result<()> {
    match value {
        Some(v) if v < 0 => Err(Error::InvalidOperation(format!(
            "{} must not be negative",
            field
        ))),
        _ => Ok(()),
    }
}

impl CreateTweak {
    pub fn validate(&self) -> error::Result<()> {
        ensure_counter("comment_count", self.comment_count)?;
        ensure_counter("retweet_count", self.retweet_count)?;
        ensure_counter("quote_count", self.quote_count)?;
        ensure_counter("like_count", self.like_count)?;
        ensure_counter("view_count", self.view_count)
    }

    pub fn into_new(
        self,
        universe_id: i32,
        template: Option<&TweakTemplate>,
        now: DateTime<Utc>,
    ) -> NewTweak {
        let preset = |explicit: Option<i32>, from_template: fn(&TweakTemplate) -> i32| {
            explicit
                .or_else(|| template.map(from_template))
                .unwrap_or(0)
        };

        NewTweak {
            universe_id,
            character_id: self.character_id,
            content: self.content,
            images: self.images,
            comment_count: preset(self.comment_count, |t| t.comment_count),
            retweet_count: preset(self.retweet_count, |t| t.retweet_count),
            quote_count: preset(self.quote_count, |t| t.quote_count),
            like_count: preset(self.like_count, |t| t.like_count),
            view_count: preset(self.view_count, |t| t.view_count),
            source_label: self
                .source_label
                .or_else(|| template.map(|t| t.source_label.clone()))
                .unwrap_or_else(|| DEFAULT_SOURCE_LABEL.to_string()),
            custom_date: self.custom_date,
            reply_to_tweak_id: self.reply_to_tweak_id,
            quoted_tweak_id: self.quoted_tweak_id,
            created_at: now,
        }
    }
}

impl TweakPatch {
    pub fn validate(&self) -> error::Result<()> {
        let counters = [
            ("comment_count", &self.comment_count),
            ("retweet_count", &self.retweet_count),
            ("quote_count", &self.quote_count),
            ("like_count", &self.like_count),
            ("view_count", &self.view_count),
        ];
        for (field, change) in counters {
            if let Patch::Set(value) = change {
                ensure_counter(field, Some(*value))?;
            }
        }
        Ok(())
    }

    pub fn into_changes(self, now: DateTime<Utc>) -> TweakChanges {
        TweakChanges {
            content: self.content.into_option(),
            images: self.images.into_option(),
            comment_count: self.comment_count.into_option(),
            retweet_count: self.retweet_count.into_option(),
            quote_count: self.quote_count.into_option(),
            like_count: self.like_count.into_option(),
            view_count: self.view_count.into_option(),
            source_label: self.source_label.into_option(),
            custom_date: self.custom_date.into_option(),
            quoted_tweak_id: self.quoted_tweak_id.into_option(),
            updated_at: Some(now),
        }
    }
}

impl Tweak {
    pub fn from_new(id: i32, new: NewTweak) -> Self {
        Self {
            id,
            universe_id: new.universe_id,
            character_id: new.character_id,
            content: new.content,
            images: new.images,
            comment_count: new.comment_count,
            retweet_count: new.retweet_count,
            quote_count: new.quote_count,
            like_count: new.like_count,
            view_count: new.view_count,
            source_label: new.source_label,
            custom_date: new.custom_date,
            reply_to_tweak_id: new.reply_to_tweak_id,
            quoted_tweak_id: new.quoted_tweak_id,
            created_at: new.created_at,
            updated_at: None,
        }
    }

    pub fn apply(&mut self, changes: &TweakChanges) {
        patch::apply(&mut self.content, &changes.content);
        patch::apply(&mut self.images, &changes.images);
        patch::apply(&mut self.comment_count, &changes.comment_count);
        patch::apply(&mut self.retweet_count, &changes.retweet_count);
        patch::apply(&mut self.quote_count, &changes.quote_count);
        patch::apply(&mut self.like_count, &changes.like_count);
        patch::apply(&mut self.view_count, &changes.view_count);
        patch::apply(&mut self.source_label, &changes.source_label);
        patch::apply(&mut self.custom_date, &changes.custom_date);
        patch::apply(&mut self.quoted_tweak_id, &changes.quoted_tweak_id);
        if changes.updated_at.is_some() {
            self.updated_at = changes.updated_at;
        }
    }

    pub fn is_reply(&self) -> bool {
        self.reply_to_tweak_id.is_some()
    }

    /// Timestamp shown to readers: the author-chosen date if any.
    pub fn display_date(&self) -> DateTime<Utc> {
        self.custom_date.unwrap_or(self.created_at)
    }

    pub fn record_retweet(&mut self) {
        self.retweet_count = self.retweet_count.saturating_add(1);
    }

    /// Never drops below zero.
    pub fn record_unretweet(&mut self) {
        self.retweet_count = self.retweet_count.saturating_sub(1).max(0);
    }

    pub fn record_quote(&mut self) {
        self.quote_count = self.quote_count.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> TweakTemplate {
        TweakTemplate {
            id: 1,
            user_id: 1,
            name: "viral".into(),
            comment_count: 120,
            retweet_count: 40,
            quote_count: 3,
            like_count: 900,
            view_count: 10_000,
            source_label: "Twitter Web App".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn defaults_without_template() {
        let new = CreateTweak {
            character_id: 2,
            content: "hello".into(),
            ..Default::default()
        }
        .into_new(5, None, Utc::now());

        assert_eq!(new.universe_id, 5);
        assert_eq!(new.like_count, 0);
        assert_eq!(new.source_label, DEFAULT_SOURCE_LABEL);
    }

    #[test]
    fn template_fills_only_missing_fields() {
        let new = CreateTweak {
            character_id: 2,
            content: "hello".into(),
            like_count: Some(5),
            ..Default::default()
        }
        .into_new(5, Some(&template()), Utc::now());

        assert_eq!(new.like_count, 5);
        assert_eq!(new.comment_count, 120);
        assert_eq!(new.view_count, 10_000);
        assert_eq!(new.source_label, "Twitter Web App");
    }

    #[test]
    fn unretweet_floors_at_zero() {
        let mut tweak = Tweak::from_new(
            1,
            CreateTweak::default().into_new(1, None, Utc::now()),
        );
        tweak.record_unretweet();
        assert_eq!(tweak.retweet_count, 0);
        tweak.record_retweet();
        tweak.record_unretweet();
        assert_eq!(tweak.retweet_count, 0);

        tweak.retweet_count = i32::MIN;
        tweak.record_unretweet();
        assert_eq!(tweak.retweet_count, 0);
    }

    #[test]
    fn create_body_requires_author_and_content() {
        assert!(serde_json::from_str::<CreateTweak>("{}").is_err());
        assert!(serde_json::from_str::<CreateTweak>(r#"{"character_id": 3}"#).is_err());
        assert!(serde_json::from_str::<CreateTweak>(r#"{"content": "hi"}"#).is_err());

        let body: CreateTweak =
            serde_json::from_str(r#"{"character_id": 3, "content": "hi"}"#).unwrap();
        assert_eq!(body.character_id, 3);
        assert!(body.like_count.is_none());
        assert!(body.template_id.is_none());
    }

    #[test]
    fn negative_counters_are_rejected() {
        let body = CreateTweak {
            character_id: 1,
            content: "x".into(),
            retweet_count: Some(-1),
            ..Default::default()
        };
        assert!(matches!(body.validate(), Err(Error::InvalidOperation(_))));

        let patch: TweakPatch =
            serde_json::from_str(r#"{"quote_count": -2147483648}"#).unwrap();
        assert!(matches!(patch.validate(), Err(Error::InvalidOperation(_))));

        let patch: TweakPatch =
            serde_json::from_str(r#"{"retweet_count": 0, "like_count": 10}"#).unwrap();
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn display_date_prefers_custom_date() {
        let mut tweak = Tweak::from_new(
            1,
            CreateTweak::default().into_new(1, None, Utc::now()),
        );
        assert_eq!(tweak.display_date(), tweak.created_at);
        let custom = tweak.created_at - chrono::Duration::days(30);
        tweak.custom_date = Some(custom);
        assert_eq!(tweak.display_date(), custom);
    }
}
