// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::Utc;
use tracing::{debug, info};

use super::{deleted_or, TweakNowService};
use crate::error::{Error, Result};
use crate::metrics::EngagementEvent;
use crate::models::template::TweakTemplate;
use crate::models::tweak::{CreateTweak, Tweak, TweakPatch};

impl TweakNowService {
    /// Every tweak of the universe, replies included, newest display date first
    pub async fn list_tweaks(&self, caller: i32, universe_id: i32) -> Result<Vec<Tweak>> {
        self.authorize_universe(caller, universe_id).await?;
        self.store.list_tweaks(universe_id).await
    }

    pub async fn get_tweak(&self, caller: i32, universe_id: i32, tweak_id: i32) -> Result<Tweak> {
        self.authorize_universe(caller, universe_id).await?;
        self.store
            .find_tweak(universe_id, tweak_id)
            .await?
            .ok_or(Error::NotFound("tweak"))
    }

    pub async fn list_replies(
        &self,
        caller: i32,
        universe_id: i32,
        tweak_id: i32,
    ) -> Result<Vec<Tweak>> {
        self.authorize_universe(caller, universe_id).await?;
        if self.store.find_tweak(universe_id, tweak_id).await?.is_none() {
            return Err(Error::NotFound("tweak"));
        }
        self.store.list_replies(universe_id, tweak_id).await
    }

    /// Creates a tweak. A quoted tweak that does not exist in the universe
    /// is tolerated: the pointer is stored and no counter moves.
    pub async fn create_tweak(
        &self,
        caller: i32,
        universe_id: i32,
        body: CreateTweak,
    ) -> Result<Tweak> {
        self.authorize_universe(caller, universe_id).await?;
        body.validate()?;

        let template = match body.template_id {
            Some(template_id) => Some(self.owned_template(caller, template_id).await?),
            None => None,
        };

        let new = body.into_new(universe_id, template.as_ref(), Utc::now());
        let created = self.store.create_tweak(new).await?;
        if created.quote_counted {
            self.record(EngagementEvent::QuoteCounted);
        }

        info!(
            "Character {} posted tweak {} in universe {}",
            created.tweak.character_id, created.tweak.id, universe_id
        );
        Ok(created.tweak)
    }

    pub async fn update_tweak(
        &self,
        caller: i32,
        universe_id: i32,
        tweak_id: i32,
        patch: TweakPatch,
    ) -> Result<Tweak> {
        self.authorize_universe(caller, universe_id).await?;
        patch.validate()?;
        debug!("Updating tweak {} in universe {}", tweak_id, universe_id);
        self.store
            .update_tweak(universe_id, tweak_id, patch.into_changes(Utc::now()))
            .await?
            .ok_or(Error::NotFound("tweak"))
    }

    /// Hard delete. The quoted tweak keeps its quote_count.
    pub async fn delete_tweak(&self, caller: i32, universe_id: i32, tweak_id: i32) -> Result<()> {
        self.authorize_universe(caller, universe_id).await?;
        deleted_or(self.store.delete_tweak(universe_id, tweak_id).await?, "tweak")
    }

    pub(crate) async fn owned_template(
        &self,
        caller: i32,
        template_id: i32,
    ) -> Result<TweakTemplate> {
        match self.store.find_template(template_id).await? {
            Some(template) if template.user_id == caller => Ok(template),
            Some(_) => Err(Error::Forbidden("template")),
            None => Err(Error::NotFound("template")),
        }
    }
}
