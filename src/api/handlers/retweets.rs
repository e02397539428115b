// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::DeleteResponse;
use crate::api::{AppState, Caller};
use crate::error::Result;
use crate::models::retweet::{Retweet, RetweetRequest};

#[derive(Debug, Serialize, Deserialize)]
pub struct RetweetStatus {
    pub retweeted: bool,
}

/// 201 when the retweet is new, 200 with the existing row otherwise
pub async fn create_retweet(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, tweak_id)): Path<(i32, i32)>,
    Json(body): Json<RetweetRequest>,
) -> Result<(StatusCode, Json<Retweet>)> {
    let outcome = state
        .service
        .retweet(caller, universe_id, tweak_id, body.character_id)
        .await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.retweet)))
}

pub async fn check_retweet(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, tweak_id, character_id)): Path<(i32, i32, i32)>,
) -> Result<Json<RetweetStatus>> {
    let retweeted = state
        .service
        .has_retweeted(caller, universe_id, tweak_id, character_id)
        .await?;
    Ok(Json(RetweetStatus { retweeted }))
}

pub async fn delete_retweet(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, tweak_id, character_id)): Path<(i32, i32, i32)>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state
        .service
        .undo_retweet(caller, universe_id, tweak_id, character_id)
        .await?;
    Ok(Json(DeleteResponse::new(deleted)))
}
