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
use crate::models::template::{CreateTemplate, TweakTemplate};

pub async fn list_templates(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<Vec<TweakTemplate>>> {
    Ok(Json(state.service.list_templates(caller).await?))
}

pub async fn create_template(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(body): Json<CreateTemplate>,
) -> Result<(StatusCode, Json<TweakTemplate>)> {
    let template = state.service.create_template(caller, body).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

pub async fn delete_template(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(template_id): Path<i32>,
) -> Result<Json<DeleteResponse>> {
    state.service.delete_template(caller, template_id).await?;
    Ok(Json(DeleteResponse::new(true)))
}
