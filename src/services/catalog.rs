// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::Utc;
use tracing::info;

use super::{deleted_or, TweakNowService};
use crate::error::Result;
use crate::models::template::{CreateTemplate, TweakTemplate};
use crate::models::trend::{CreateTrend, Trend};

impl TweakNowService {
    pub async fn list_trends(&self, caller: i32, universe_id: i32) -> Result<Vec<Trend>> {
        self.authorize_universe(caller, universe_id).await?;
        self.store.list_trends(universe_id).await
    }

    pub async fn create_trend(
        &self,
        caller: i32,
        universe_id: i32,
        body: CreateTrend,
    ) -> Result<Trend> {
        self.authorize_universe(caller, universe_id).await?;
        let trend = self
            .store
            .create_trend(body.into_new(universe_id, Utc::now()))
            .await?;
        info!("Created trend {} in universe {}", trend.name, universe_id);
        Ok(trend)
    }

    pub async fn delete_trend(&self, caller: i32, universe_id: i32, trend_id: i32) -> Result<()> {
        self.authorize_universe(caller, universe_id).await?;
        deleted_or(self.store.delete_trend(universe_id, trend_id).await?, "trend")
    }

    pub async fn list_templates(&self, caller: i32) -> Result<Vec<TweakTemplate>> {
        self.store.list_templates(caller).await
    }

    pub async fn create_template(&self, caller: i32, body: CreateTemplate) -> Result<TweakTemplate> {
        body.validate()?;
        let template = self
            .store
            .create_template(body.into_new(caller, Utc::now()))
            .await?;
        info!("User {} created template {}", caller, template.id);
        Ok(template)
    }

    /// `NotFound` for an unknown id, `Forbidden` for someone else's template
    pub async fn delete_template(&self, caller: i32, template_id: i32) -> Result<()> {
        self.owned_template(caller, template_id).await?;
        deleted_or(
            self.store.delete_template(caller, template_id).await?,
            "template",
        )
    }
}
