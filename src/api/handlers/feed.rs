// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::{AppState, Caller};
use crate::error::Result;
use crate::models::feed::FeedItem;

pub async fn get_feed(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(universe_id): Path<i32>,
) -> Result<Json<Vec<FeedItem>>> {
    Ok(Json(state.service.feed(caller, universe_id).await?))
}
