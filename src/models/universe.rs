// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::patch::{self, Patch};
use crate::schema::universes;

/// A user-owned namespace holding characters, tweaks and trends
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = universes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Universe {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = universes)]
pub struct NewUniverse {
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = universes)]
pub struct UniverseChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUniverse {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UniversePatch {
    pub name: Patch<String>,
    pub description: Patch<Option<String>>,
}

impl CreateUniverse {
    pub fn into_new(self, user_id: i32, now: DateTime<Utc>) -> NewUniverse {
        NewUniverse {
            user_id,
            name: self.name,
            description: self.description,
            created_at: now,
        }
    }
}

impl UniversePatch {
    pub fn into_changes(self, now: DateTime<Utc>) -> UniverseChanges {
        UniverseChanges {
            name: self.name.into_option(),
            description: self.description.into_option(),
            updated_at: Some(now),
        }
    }
}

impl Universe {
    pub fn from_new(id: i32, new: NewUniverse) -> Self {
        Self {
            id,
            user_id: new.user_id,
            name: new.name,
            description: new.description,
            created_at: new.created_at,
            updated_at: None,
        }
    }

    pub fn apply(&mut self, changes: &UniverseChanges) {
        patch::apply(&mut self.name, &changes.name);
        patch::apply(&mut self.description, &changes.description);
        if changes.updated_at.is_some() {
            self.updated_at = changes.updated_at;
        }
    }
}
