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
use crate::models::character::{Character, CharacterPatch, CreateCharacter};

pub async fn list_characters(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(universe_id): Path<i32>,
) -> Result<Json<Vec<Character>>> {
    Ok(Json(
        state.service.list_characters(caller, universe_id).await?,
    ))
}

pub async fn get_character(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, character_id)): Path<(i32, i32)>,
) -> Result<Json<Character>> {
    Ok(Json(
        state
            .service
            .get_character(caller, universe_id, character_id)
            .await?,
    ))
}

pub async fn create_character(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(universe_id): Path<i32>,
    Json(body): Json<CreateCharacter>,
) -> Result<(StatusCode, Json<Character>)> {
    let character = state
        .service
        .create_character(caller, universe_id, body)
        .await?;
    Ok((StatusCode::CREATED, Json(character)))
}

/// PATCH and PUT both apply only the fields present in the body
pub async fn update_character(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, character_id)): Path<(i32, i32)>,
    Json(patch): Json<CharacterPatch>,
) -> Result<Json<Character>> {
    Ok(Json(
        state
            .service
            .update_character(caller, universe_id, character_id, patch)
            .await?,
    ))
}

pub async fn delete_character(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((universe_id, character_id)): Path<(i32, i32)>,
) -> Result<Json<DeleteResponse>> {
    state
        .service
        .delete_character(caller, universe_id, character_id)
        .await?;
    Ok(Json(DeleteResponse::new(true)))
}
