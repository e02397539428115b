// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

//! Partial-update fields.
//!
//! A request body field is either left out (`Absent`) or supplied (`Set`).
//! For nullable columns the payload type is `Option<T>`, so an explicit JSON
//! `null` decodes to `Set(None)` and clears the column, while a missing key
//! leaves it untouched. Structs using this type must mark the fields
//! `#[serde(default)]`.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// Converts into diesel's changeset convention, where `None` skips the column.
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Absent => None,
            Patch::Set(value) => Some(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Patch::Set)
    }
}

/// Overwrites `slot` when the change is present.
pub(crate) fn apply<T: Clone>(slot: &mut T, change: &Option<T>) {
    if let Some(value) = change {
        *slot = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        bio: Patch<Option<String>>,
        #[serde(default)]
        name: Patch<String>,
    }

    #[test]
    fn missing_key_is_absent() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert!(body.bio.is_absent());
        assert!(body.name.is_absent());
    }

    #[test]
    fn explicit_null_is_set_to_none() {
        let body: Body = serde_json::from_str(r#"{"bio": null}"#).unwrap();
        assert_eq!(body.bio, Patch::Set(None));
        assert!(body.name.is_absent());
    }

    #[test]
    fn value_is_set() {
        let body: Body = serde_json::from_str(r#"{"bio": "hi", "name": "Ada"}"#).unwrap();
        assert_eq!(body.bio, Patch::Set(Some("hi".to_string())));
        assert_eq!(body.name.into_option(), Some("Ada".to_string()));
    }

    #[test]
    fn null_on_required_field_is_rejected() {
        assert!(serde_json::from_str::<Body>(r#"{"name": null}"#).is_err());
    }

    #[test]
    fn apply_only_overwrites_present_changes() {
        let mut slot = 3;
        apply(&mut slot, &None);
        assert_eq!(slot, 3);
        apply(&mut slot, &Some(7));
        assert_eq!(slot, 7);
    }
}
