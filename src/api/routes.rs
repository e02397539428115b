// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    characters, feed, health, metrics, retweets, social_graph, templates, trends, tweaks,
    universes,
};
use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // General routes
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::get_metrics))
        // Universe routes
        .route(
            "/universes",
            get(universes::list_universes).post(universes::create_universe),
        )
        .route(
            "/universes/{universe_id}",
            get(universes::get_universe)
                .patch(universes::update_universe)
                .delete(universes::delete_universe),
        )
        // Character routes
        .route(
            "/universes/{universe_id}/characters",
            get(characters::list_characters).post(characters::create_character),
        )
        .route(
            "/universes/{universe_id}/characters/{character_id}",
            get(characters::get_character)
                .patch(characters::update_character)
                .put(characters::update_character)
                .delete(characters::delete_character),
        )
        // Feed and tweak routes
        .route("/universes/{universe_id}/feed", get(feed::get_feed))
        .route(
            "/universes/{universe_id}/tweaks",
            get(tweaks::list_tweaks).post(tweaks::create_tweak),
        )
        .route(
            "/universes/{universe_id}/tweaks/{tweak_id}",
            get(tweaks::get_tweak)
                .patch(tweaks::update_tweak)
                .put(tweaks::update_tweak)
                .delete(tweaks::delete_tweak),
        )
        .route(
            "/universes/{universe_id}/tweaks/{tweak_id}/replies",
            get(tweaks::list_replies),
        )
        // Retweet routes
        .route(
            "/universes/{universe_id}/tweaks/{tweak_id}/retweet",
            post(retweets::create_retweet),
        )
        .route(
            "/universes/{universe_id}/tweaks/{tweak_id}/retweet/{character_id}",
            get(retweets::check_retweet).delete(retweets::delete_retweet),
        )
        // Social graph routes
        .route(
            "/universes/{universe_id}/characters/{follower_id}/follow/{following_id}",
            post(social_graph::follow),
        )
        .route(
            "/universes/{universe_id}/characters/{follower_id}/unfollow/{following_id}",
            delete(social_graph::unfollow),
        )
        .route(
            "/universes/{universe_id}/characters/{follower_id}/is-following/{following_id}",
            get(social_graph::is_following),
        )
        // Trend routes
        .route(
            "/universes/{universe_id}/trends",
            get(trends::list_trends).post(trends::create_trend),
        )
        .route(
            "/universes/{universe_id}/trends/{trend_id}",
            delete(trends::delete_trend),
        )
        // Template routes
        .route(
            "/templates",
            get(templates::list_templates).post(templates::create_template),
        )
        .route("/templates/{template_id}", delete(templates::delete_template))
}
