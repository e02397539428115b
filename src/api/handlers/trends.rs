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
use crate::models::trend::{CreateTrend, Trend};

pub async fn list_trends(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(universe_id): Path<i32>,
) -> Result<Json<Vec<Trend>>> {
    Ok(Json(state.service.list_trends(caller, universe_id).await?))
}

pub async fn create_trend(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(universe_id): Path<i32>,
    Json(body): Json<CreateTrend>,
) -> Result<(StatusCode, Json<Trend>)> {
    let trend = state.service.create_trend(caller, universe_id, body).await?;
    Ok((StatusCode::CREATED, Json(trend)))
}

pub async fn delete_trend(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, trend_id)): Path<(i32, i32)>,
) -> Result<Json<DeleteResponse>> {
    state
        .service
        .delete_trend(caller, universe_id, trend_id)
        .await?;
    Ok(Json(DeleteResponse::new(true)))
}
