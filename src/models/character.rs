// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use chrono::{DateTime, Utc};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};

use crate::patch::{self, Patch};
use crate::schema::tweaknow_characters;

/// Verification badge shown next to a character's name
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum OfficialMark {
    #[default]
    None,
    Blue,
    Gold,
    Grey,
}

impl OfficialMark {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfficialMark::None => "None",
            OfficialMark::Blue => "Blue",
            OfficialMark::Gold => "Gold",
            OfficialMark::Grey => "Grey",
        }
    }
}

impl ToSql<Text, Pg> for OfficialMark {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for OfficialMark {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"None" => Ok(OfficialMark::None),
            b"Blue" => Ok(OfficialMark::Blue),
            b"Gold" => Ok(OfficialMark::Gold),
            b"Grey" => Ok(OfficialMark::Grey),
            other => Err(format!(
                "unknown official mark: {}",
                String::from_utf8_lossy(other)
            )
            .into()),
        }
    }
}

/// A fictional persona living in one universe.
///
/// `display_followers_count`/`display_following_count` are operator-curated
/// figures and are never derived from `character_follows`.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = tweaknow_characters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Character {
    pub id: i32,
    pub universe_id: i32,
    pub name: String,
    pub username: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub birth_date: Option<String>,
    pub pro_category: Option<String>,
    pub official_mark: OfficialMark,
    pub is_private: bool,
    pub display_followers_count: i32,
    pub display_following_count: i32,
    pub profile_picture: Option<String>,
    pub banner_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tweaknow_characters)]
pub struct NewCharacter {
    pub universe_id: i32,
    pub name: String,
    pub username: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub birth_date: Option<String>,
    pub pro_category: Option<String>,
    pub official_mark: OfficialMark,
    pub is_private: bool,
    pub display_followers_count: i32,
    pub display_following_count: i32,
    pub profile_picture: Option<String>,
    pub banner_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tweaknow_characters)]
pub struct CharacterChanges {
    pub name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub birth_date: Option<Option<String>>,
    pub pro_category: Option<Option<String>>,
    pub official_mark: Option<OfficialMark>,
    pub is_private: Option<bool>,
    pub display_followers_count: Option<i32>,
    pub display_following_count: Option<i32>,
    pub profile_picture: Option<Option<String>>,
    pub banner_image: Option<Option<String>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating a character
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub pro_category: Option<String>,
    #[serde(default)]
    pub official_mark: OfficialMark,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub display_followers_count: i32,
    #[serde(default)]
    pub display_following_count: i32,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub banner_image: Option<String>,
}

/// Request body for a partial character update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CharacterPatch {
    pub name: Patch<String>,
    pub username: Patch<String>,
    pub bio: Patch<Option<String>>,
    pub location: Patch<Option<String>>,
    pub website: Patch<Option<String>>,
    pub birth_date: Patch<Option<String>>,
    pub pro_category: Patch<Option<String>>,
    pub official_mark: Patch<OfficialMark>,
    pub is_private: Patch<bool>,
    pub display_followers_count: Patch<i32>,
    pub display_following_count: Patch<i32>,
    pub profile_picture: Patch<Option<String>>,
    pub banner_image: Patch<Option<String>>,
}

impl CreateCharacter {
    pub fn into_new(self, universe_id: i32, now: DateTime<Utc>) -> NewCharacter {
        NewCharacter {
            universe_id,
            name: self.name,
            username: self.username,
            bio: self.bio,
            location: self.location,
            website: self.website,
            birth_date: self.birth_date,
            pro_category: self.pro_category,
            official_mark: self.official_mark,
            is_private: self.is_private,
            display_followers_count: self.display_followers_count,
            display_following_count: self.display_following_count,
            profile_picture: self.profile_picture,
            banner_image: self.banner_image,
            created_at: now,
        }
    }
}

impl CharacterPatch {
    pub fn into_changes(self, now: DateTime<Utc>) -> CharacterChanges {
        CharacterChanges {
            name: self.name.into_option(),
            username: self.username.into_option(),
            bio: self.bio.into_option(),
            location: self.location.into_option(),
            website: self.website.into_option(),
            birth_date: self.birth_date.into_option(),
            pro_category: self.pro_category.into_option(),
            official_mark: self.official_mark.into_option(),
            is_private: self.is_private.into_option(),
            display_followers_count: self.display_followers_count.into_option(),
            display_following_count: self.display_following_count.into_option(),
            profile_picture: self.profile_picture.into_option(),
            banner_image: self.banner_image.into_option(),
            updated_at: Some(now),
        }
    }
}

impl Character {
    pub fn from_new(id: i32, new: NewCharacter) -> Self {
        Self {
            id,
            universe_id: new.universe_id,
            name: new.name,
            username: new.username,
            bio: new.bio,
            location: new.location,
            website: new.website,
            birth_date: new.birth_date,
            pro_category: new.pro_category,
            official_mark: new.official_mark,
            is_private: new.is_private,
            display_followers_count: new.display_followers_count,
            display_following_count: new.display_following_count,
            profile_picture: new.profile_picture,
            banner_image: new.banner_image,
            created_at: new.created_at,
            updated_at: None,
        }
    }

    pub fn apply(&mut self, changes: &CharacterChanges) {
        patch::apply(&mut self.name, &changes.name);
        patch::apply(&mut self.username, &changes.username);
        patch::apply(&mut self.bio, &changes.bio);
        patch::apply(&mut self.location, &changes.location);
        patch::apply(&mut self.website, &changes.website);
        patch::apply(&mut self.birth_date, &changes.birth_date);
        patch::apply(&mut self.pro_category, &changes.pro_category);
        patch::apply(&mut self.official_mark, &changes.official_mark);
        patch::apply(&mut self.is_private, &changes.is_private);
        patch::apply(&mut self.display_followers_count, &changes.display_followers_count);
        patch::apply(&mut self.display_following_count, &changes.display_following_count);
        patch::apply(&mut self.profile_picture, &changes.profile_picture);
        patch::apply(&mut self.banner_image, &changes.banner_image);
        if changes.updated_at.is_some() {
            self.updated_at = changes.updated_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn official_mark_defaults_to_none_and_round_trips_names() {
        let body: CreateCharacter =
            serde_json::from_str(r#"{"name": "Ada", "username": "ada"}"#).unwrap();
        assert_eq!(body.official_mark, OfficialMark::None);

        let body: CreateCharacter = serde_json::from_str(
            r#"{"name": "Ada", "username": "ada", "official_mark": "Gold"}"#,
        )
        .unwrap();
        assert_eq!(body.official_mark.as_str(), "Gold");
    }

    #[test]
    fn unknown_official_mark_is_rejected() {
        let parsed = serde_json::from_str::<CreateCharacter>(
            r#"{"name": "Ada", "username": "ada", "official_mark": "Purple"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn patch_clears_nullable_field_but_keeps_absent_ones() {
        let now = Utc::now();
        let mut character = Character::from_new(
            1,
            CreateCharacter {
                name: "Ada".into(),
                username: "ada".into(),
                bio: Some("hello".into()),
                location: Some("London".into()),
                website: None,
                birth_date: None,
                pro_category: None,
                official_mark: OfficialMark::Blue,
                is_private: false,
                display_followers_count: 10,
                display_following_count: 2,
                profile_picture: None,
                banner_image: None,
            }
            .into_new(7, now),
        );

        let patch: CharacterPatch =
            serde_json::from_str(r#"{"bio": null, "display_followers_count": 99}"#).unwrap();
        character.apply(&patch.into_changes(now));

        assert_eq!(character.bio, None);
        assert_eq!(character.location.as_deref(), Some("London"));
        assert_eq!(character.display_followers_count, 99);
        assert_eq!(character.official_mark, OfficialMark::Blue);
        assert_eq!(character.updated_at, Some(now));
    }
}
