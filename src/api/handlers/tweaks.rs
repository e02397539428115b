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
use crate::models::tweak::{CreateTweak, Tweak, TweakPatch};

pub async fn list_tweaks(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(universe_id): Path<i32>,
) -> Result<Json<Vec<Tweak>>> {
    Ok(Json(state.service.list_tweaks(caller, universe_id).await?))
}

pub async fn get_tweak(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, tweak_id)): Path<(i32, i32)>,
) -> Result<Json<Tweak>> {
    Ok(Json(
        state.service.get_tweak(caller, universe_id, tweak_id).await?,
    ))
}

pub async fn list_replies(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, tweak_id)): Path<(i32, i32)>,
) -> Result<Json<Vec<Tweak>>> {
    Ok(Json(
        state
            .service
            .list_replies(caller, universe_id, tweak_id)
            .await?,
    ))
}

pub async fn create_tweak(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(universe_id): Path<i32>,
    Json(body): Json<CreateTweak>,
) -> Result<(StatusCode, Json<Tweak>)> {
    let tweak = state.service.create_tweak(caller, universe_id, body).await?;
    Ok((StatusCode::CREATED, Json(tweak)))
}

pub async fn update_tweak(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, tweak_id)): Path<(i32, i32)>,
    Json(patch): Json<TweakPatch>,
) -> Result<Json<Tweak>> {
    Ok(Json(
        state
            .service
            .update_tweak(caller, universe_id, tweak_id, patch)
            .await?,
    ))
}

pub async fn delete_tweak(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, tweak_id)): Path<(i32, i32)>,
) -> Result<Json<DeleteResponse>> {
    state
        .service
        .delete_tweak(caller, universe_id, tweak_id)
        .await?;
    Ok(Json(DeleteResponse::new(true)))
}
