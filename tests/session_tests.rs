// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie lifecycle.

mod common;

use axum::http::{header, StatusCode};
use common::*;

#[tokio::test]
async fn test_reads_without_cookie_create_nothing() {
    let (app, state) = create_test_app(None);

    for _ in 0..50 {
        for uri in ["/api/options", "/api/plan", "/api/session", "/api/export/food"] {
            let response = send(&app, get(uri, None)).await;
            assert!(session_cookie(&response).is_none(), "{uri} set a cookie");
        }
    }
    assert!(state.sessions.is_empty());

    let json = body_json(send(&app, get("/api/session", None)).await).await;
    assert!(json["profile"].is_null());
    assert_eq!(json["has_plan"], false);
    assert_eq!(json["has_food_analysis"], false);
    assert_eq!(json["has_room_analysis"], false);
}

#[tokio::test]
async fn test_failed_write_creates_nothing() {
    let gateway = ScriptedGateway::with_replies(vec![Err("model unavailable")]);
    let (app, state) = create_test_app(Some(gateway));

    let response = send(&app, post_json("/api/plan", None, &profile_json())).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(session_cookie(&response).is_none());
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_first_write_issues_cookie() {
    let gateway = ScriptedGateway::with_replies(vec![Ok(PLAN_REPLY)]);
    let (app, state) = create_test_app(Some(gateway));

    let response = send(&app, post_json("/api/plan", None, &profile_json())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("studentfit_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn test_valid_cookie_is_reused() {
    let gateway = ScriptedGateway::with_replies(vec![Ok(PLAN_REPLY), Ok("Meal result")]);
    let (app, state) = create_test_app(Some(gateway));

    let first = send(&app, post_json("/api/plan", None, &profile_json())).await;
    let cookie = session_cookie(&first).unwrap();

    let second = send(
        &app,
        post_json("/api/analysis/food", Some(&cookie), &image_json()),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    assert!(session_cookie(&second).is_none());
    assert_eq!(state.sessions.len(), 1);

    let summary = body_json(send(&app, get("/api/session", Some(&cookie))).await).await;
    assert_eq!(summary["has_plan"], true);
    assert_eq!(summary["has_food_analysis"], true);
}

#[tokio::test]
async fn test_tampered_cookie_is_ignored() {
    let gateway = ScriptedGateway::with_replies(vec![Ok(PLAN_REPLY)]);
    let (app, state) = create_test_app(Some(gateway));

    let plan = send(&app, post_json("/api/plan", None, &profile_json())).await;
    let cookie = session_cookie(&plan).unwrap();

    // Flip the last signature character
    let mut tampered = cookie.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == '0' { '1' } else { '0' });

    let response = send(&app, get("/api/plan", Some(&tampered))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(session_cookie(&response).is_none());
    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn test_sessions_do_not_share_state() {
    let gateway = ScriptedGateway::with_replies(vec![Ok(PLAN_REPLY)]);
    let (app, _state) = create_test_app(Some(gateway));

    send(&app, post_json("/api/plan", None, &profile_json())).await;

    let other = send(&app, get("/api/plan", None)).await;
    assert_eq!(other.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_discards_state() {
    let gateway = ScriptedGateway::with_replies(vec![Ok(PLAN_REPLY)]);
    let (app, state) = create_test_app(Some(gateway));

    let plan = send(&app, post_json("/api/plan", None, &profile_json())).await;
    let cookie = session_cookie(&plan).unwrap();

    let response = send(&app, delete("/api/session", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(state.sessions.is_empty());

    let removal = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("studentfit_session=;") && v.contains("Max-Age=0"));
    assert!(removal);

    // The old cookie no longer finds the plan
    let response = send(&app, get("/api/plan", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_has_no_session() {
    let (app, state) = create_test_app(None);

    let response = send(&app, get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(response.headers()["X-Content-Type-Options"], "nosniff");
    assert!(state.sessions.is_empty());

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["model_configured"], false);
}

#[tokio::test]
async fn test_write_after_end_starts_new_session() {
    let gateway = ScriptedGateway::with_replies(vec![Ok(PLAN_REPLY), Ok(PLAN_REPLY)]);
    let (app, state) = create_test_app(Some(gateway));

    let first = send(&app, post_json("/api/plan", None, &profile_json())).await;
    let old_cookie = session_cookie(&first).unwrap();
    send(&app, delete("/api/session", Some(&old_cookie))).await;

    let second = send(&app, post_json("/api/plan", Some(&old_cookie), &profile_json())).await;
    assert_eq!(second.status(), StatusCode::OK);
    let new_cookie = session_cookie(&second).unwrap();
    assert_ne!(new_cookie, old_cookie);
    assert_eq!(state.sessions.len(), 1);

    let plan = send(&app, get("/api/plan", Some(&new_cookie))).await;
    assert_eq!(plan.status(), StatusCode::OK);
}
