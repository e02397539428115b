// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

//! HTTP tests against the router with the in-memory store.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use tweaknow::api::{create_router, AppState, TokenRegistry};
use tweaknow::metrics::Metrics;
use tweaknow::services::TweakNowService;
use tweaknow::store::MemoryStore;

const OWNER_TOKEN: &str = "owner-token";
const STRANGER_TOKEN: &str = "stranger-token";

fn create_test_server() -> TestServer {
    let service = TweakNowService::new(
        Arc::new(MemoryStore::new()),
        Arc::new(Metrics::new().unwrap()),
    );
    let tokens = TokenRegistry::new(&[
        (OWNER_TOKEN.to_string(), 1),
        (STRANGER_TOKEN.to_string(), 2),
    ]);
    TestServer::new(create_router(AppState::new(service, tokens))).unwrap()
}

async fn create(server: &TestServer, path: &str, body: Value) -> Value {
    let response = server
        .post(path)
        .authorization_bearer(OWNER_TOKEN)
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

fn id(value: &Value) -> i64 {
    value["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_missing_or_bad_token_is_unauthorized() {
    let server = create_test_server();

    server
        .get("/universes")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/universes")
        .authorization_bearer("nope")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_retweet_flow_over_http() {
    let server = create_test_server();
    let universe = create(&server, "/universes", json!({ "name": "Krypton" })).await;
    let u = id(&universe);

    let c1 = create(
        &server,
        &format!("/universes/{u}/characters"),
        json!({ "name": "Kal", "username": "kal", "official_mark": "Gold" }),
    )
    .await;
    assert_eq!(c1["official_mark"], "Gold");
    let c2 = create(
        &server,
        &format!("/universes/{u}/characters"),
        json!({ "name": "Zod", "username": "zod" }),
    )
    .await;
    let tweak = create(
        &server,
        &format!("/universes/{u}/tweaks"),
        json!({ "character_id": id(&c1), "content": "hello" }),
    )
    .await;
    let t = id(&tweak);
    assert_eq!(tweak["source_label"], "Twitter for iPhone");

    let retweet_path = format!("/universes/{u}/tweaks/{t}/retweet");
    let body = json!({ "character_id": id(&c2) });
    server
        .post(&retweet_path)
        .authorization_bearer(OWNER_TOKEN)
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post(&retweet_path)
        .authorization_bearer(OWNER_TOKEN)
        .json(&body)
        .await
        .assert_status_ok();

    let feed = server
        .get(&format!("/universes/{u}/feed"))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .json::<Value>();
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0]["kind"], "boosted");
    assert_eq!(feed[0]["boosted_by"], id(&c2));
    assert_eq!(feed[0]["tweak"]["retweet_count"], 1);
    assert_eq!(feed[1]["kind"], "original");
    assert!(feed[1]["boosted_by"].is_null());

    let check_path = format!("/universes/{u}/tweaks/{t}/retweet/{}", id(&c2));
    let status = server
        .get(&check_path)
        .authorization_bearer(OWNER_TOKEN)
        .await
        .json::<Value>();
    assert_eq!(status["retweeted"], true);

    let deleted = server
        .delete(&check_path)
        .authorization_bearer(OWNER_TOKEN)
        .await
        .json::<Value>();
    assert_eq!(deleted["deleted"], true);
    let deleted = server
        .delete(&check_path)
        .authorization_bearer(OWNER_TOKEN)
        .await
        .json::<Value>();
    assert_eq!(deleted["deleted"], false);

    let tweak = server
        .get(&format!("/universes/{u}/tweaks/{t}"))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .json::<Value>();
    assert_eq!(tweak["retweet_count"], 0);
}

#[tokio::test]
async fn test_follow_endpoints() {
    let server = create_test_server();
    let u = id(&create(&server, "/universes", json!({ "name": "Oa" })).await);
    let a = id(&create(
        &server,
        &format!("/universes/{u}/characters"),
        json!({ "name": "Hal", "username": "hal" }),
    )
    .await);
    let b = id(&create(
        &server,
        &format!("/universes/{u}/characters"),
        json!({ "name": "Sinestro", "username": "sinestro" }),
    )
    .await);

    let response = server
        .post(&format!("/universes/{u}/characters/{a}/follow/{a}"))
        .authorization_bearer(OWNER_TOKEN)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());

    server
        .post(&format!("/universes/{u}/characters/{a}/follow/{b}"))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post(&format!("/universes/{u}/characters/{a}/follow/{b}"))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .assert_status_ok();

    let status = server
        .get(&format!("/universes/{u}/characters/{a}/is-following/{b}"))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .json::<Value>();
    assert_eq!(
        status,
        json!({ "is_following": true, "followers_count": 1, "following_count": 0 })
    );

    let deleted = server
        .delete(&format!("/universes/{u}/characters/{a}/unfollow/{b}"))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .json::<Value>();
    assert_eq!(deleted["deleted"], true);

    server
        .post(&format!("/universes/{u}/characters/{a}/follow/9999"))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_other_users_universe_is_forbidden() {
    let server = create_test_server();
    let u = id(&create(&server, "/universes", json!({ "name": "Apokolips" })).await);

    server
        .get(&format!("/universes/{u}/characters"))
        .authorization_bearer(STRANGER_TOKEN)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    server
        .get("/universes/424242/feed")
        .authorization_bearer(OWNER_TOKEN)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let mine = server
        .get("/universes")
        .authorization_bearer(STRANGER_TOKEN)
        .await
        .json::<Value>();
    assert_eq!(mine, json!([]));
}

#[tokio::test]
async fn test_put_and_patch_apply_partial_bodies() {
    let server = create_test_server();
    let u = id(&create(&server, "/universes", json!({ "name": "Themyscira" })).await);
    let c = id(&create(
        &server,
        &format!("/universes/{u}/characters"),
        json!({ "name": "Diana", "username": "diana", "bio": "princess", "website": "x.example" }),
    )
    .await);

    let updated = server
        .put(&format!("/universes/{u}/characters/{c}"))
        .authorization_bearer(OWNER_TOKEN)
        .json(&json!({ "bio": null, "display_followers_count": 1000000 }))
        .await
        .json::<Value>();
    assert!(updated["bio"].is_null());
    assert_eq!(updated["website"], "x.example");
    assert_eq!(updated["display_followers_count"], 1000000);

    let updated = server
        .patch(&format!("/universes/{u}/characters/{c}"))
        .authorization_bearer(OWNER_TOKEN)
        .json(&json!({ "name": "Wonder Woman" }))
        .await
        .json::<Value>();
    assert_eq!(updated["name"], "Wonder Woman");
    assert_eq!(updated["username"], "diana");
}

#[tokio::test]
async fn test_trends_and_templates() {
    let server = create_test_server();
    let u = id(&create(&server, "/universes", json!({ "name": "Atlantis" })).await);

    create(
        &server,
        &format!("/universes/{u}/trends"),
        json!({ "name": "#tides", "tweet_count": 10 }),
    )
    .await;
    let top = create(
        &server,
        &format!("/universes/{u}/trends"),
        json!({ "name": "#trident", "tweet_count": 500 }),
    )
    .await;

    let trends = server
        .get(&format!("/universes/{u}/trends"))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .json::<Value>();
    assert_eq!(trends[0]["name"], "#trident");
    assert_eq!(trends.as_array().unwrap().len(), 2);

    server
        .delete(&format!("/universes/{u}/trends/{}", id(&top)))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .assert_status_ok();

    let template = create(&server, "/templates", json!({ "name": "quiet" })).await;
    server
        .delete(&format!("/templates/{}", id(&template)))
        .authorization_bearer(STRANGER_TOKEN)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    server
        .delete(&format!("/templates/{}", id(&template)))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .assert_status_ok();
    server
        .delete(&format!("/templates/{}", id(&template)))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_endpoint_counts_engagement() {
    let server = create_test_server();
    let u = id(&create(&server, "/universes", json!({ "name": "Earth-2" })).await);
    let a = id(&create(
        &server,
        &format!("/universes/{u}/characters"),
        json!({ "name": "Jay", "username": "jay" }),
    )
    .await);
    let b = id(&create(
        &server,
        &format!("/universes/{u}/characters"),
        json!({ "name": "Alan", "username": "alan" }),
    )
    .await);
    server
        .post(&format!("/universes/{u}/characters/{a}/follow/{b}"))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .assert_status(StatusCode::CREATED);

    let text = server.get("/metrics").await.text();
    assert!(text.contains(r#"tweaknow_engagement_events_total{event="follow_created"} 1"#));
}

#[tokio::test]
async fn test_tweak_bodies_are_validated() {
    let server = create_test_server();
    let u = id(&create(&server, "/universes", json!({ "name": "Rann" })).await);
    let c = id(&create(
        &server,
        &format!("/universes/{u}/characters"),
        json!({ "name": "Adam", "username": "adam" }),
    )
    .await);

    server
        .post(&format!("/universes/{u}/tweaks"))
        .authorization_bearer(OWNER_TOKEN)
        .json(&json!({ "character_id": c }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    server
        .post(&format!("/universes/{u}/tweaks"))
        .authorization_bearer(OWNER_TOKEN)
        .json(&json!({}))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let t = id(&create(
        &server,
        &format!("/universes/{u}/tweaks"),
        json!({ "character_id": c, "content": "zeta beam" }),
    )
    .await);
    server
        .patch(&format!("/universes/{u}/tweaks/{t}"))
        .authorization_bearer(OWNER_TOKEN)
        .json(&json!({ "retweet_count": -2147483648i64 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let tweaks = server
        .get(&format!("/universes/{u}/tweaks"))
        .authorization_bearer(OWNER_TOKEN)
        .await
        .json::<Value>();
    assert_eq!(tweaks.as_array().unwrap().len(), 1);
    assert_eq!(tweaks[0]["retweet_count"], 0);
}
