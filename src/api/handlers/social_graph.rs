// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::DeleteResponse;
use crate::api::{AppState, Caller};
use crate::error::Result;
use crate::models::follow::{CharacterFollow, FollowStatus};

/// 201 for a new edge, 200 with the existing edge otherwise
pub async fn follow(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, follower_id, following_id)): Path<(i32, i32, i32)>,
) -> Result<(StatusCode, Json<CharacterFollow>)> {
    let outcome = state
        .service
        .follow(caller, universe_id, follower_id, following_id)
        .await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.follow)))
}

pub async fn unfollow(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, follower_id, following_id)): Path<(i32, i32, i32)>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state
        .service
        .unfollow(caller, universe_id, follower_id, following_id)
        .await?;
    Ok(Json(DeleteResponse::new(deleted)))
}

pub async fn is_following(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, follower_id, following_id)): Path<(i32, i32, i32)>,
) -> Result<Json<FollowStatus>> {
    Ok(Json(
        state
            .service
            .follow_status(caller, universe_id, follower_id, following_id)
            .await?,
    ))
}
