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
use crate::models::universe::{CreateUniverse, Universe, UniversePatch};

pub async fn list_universes(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<Vec<Universe>>> {
    Ok(Json(state.service.list_universes(caller).await?))
}

pub async fn create_universe(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(body): Json<CreateUniverse>,
) -> Result<(StatusCode, Json<Universe>)> {
    let universe = state.service.create_universe(caller, body).await?;
    Ok((StatusCode::CREATED, Json(universe)))
}

pub async fn get_universe(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(universe_id): Path<i32>,
) -> Result<Json<Universe>> {
    Ok(Json(state.service.get_universe(caller, universe_id).await?))
}

pub async fn update_universe(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(universe_id): Path<i32>,
    Json(patch): Json<UniversePatch>,
) -> Result<Json<Universe>> {
    Ok(Json(
        state
            .service
            .update_universe(caller, universe_id, patch)
            .await?,
    ))
}

pub async fn delete_universe(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(universe_id): Path<i32>,
) -> Result<Json<DeleteResponse>> {
    state.service.delete_universe(caller, universe_id).await?;
    Ok(Json(DeleteResponse::new(true)))
}
