// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use studentfit::config::Config;
use studentfit::error::AppError;
use studentfit::models::ImageUpload;
use studentfit::routes::create_router;
use studentfit::services::{Coach, ModelGateway};
use studentfit::AppState;
use tower::ServiceExt;

/// A model call seen by the scripted gateway.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub image: Option<ImageUpload>,
}

/// Gateway that replays queued replies in order. `Err` replies become
/// generation errors.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[allow(dead_code)]
impl ScriptedGateway {
    pub fn with_replies(replies: Vec<Result<&str, &str>>) -> Arc<Self> {
        let queue = replies
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Arc::new(Self {
            replies: Mutex::new(queue),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn generate(&self, prompt: &str, image: Option<&ImageUpload>) -> Result<String, AppError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            image: image.cloned(),
        });

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted reply left".to_string()))
            .map_err(AppError::Generation)
    }
}

/// Create a test app around `gateway`, or with no model configured when `None`.
#[allow(dead_code)]
pub fn create_test_app(gateway: Option<Arc<ScriptedGateway>>) -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let coach = gateway.map(|g| Coach::new(g as Arc<dyn ModelGateway>));
    let state = Arc::new(AppState::new(config, coach));
    (create_router(state.clone()), state)
}

/// Send one request through a clone of the router.
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn delete(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn post_json(uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// `name=value` pair of the session cookie set on `response`, if any.
#[allow(dead_code)]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("studentfit_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// A complete profile form submission.
#[allow(dead_code)]
pub fn profile_json() -> Value {
    serde_json::json!({
        "goal": "muscle-gain",
        "budget_level": "moderate",
        "medical_conditions": "Knee pain",
        "dietary_restrictions": "",
        "activity_level": "lightly-active",
        "activity_detail": "Gym",
        "cultural_style": "",
        "exam_mode": false,
        "additional_notes": ""
    })
}

/// A well-formed plan reply with a macro block.
#[allow(dead_code)]
pub const PLAN_REPLY: &str = "### Day 1\n**Breakfast**: Oats\n\nMACRONUTRIENT RATIO\nPROTEIN: 30%\nCARBS: 50%\nFATS: 20%";

/// Minimal photo upload body (PNG signature bytes).
#[allow(dead_code)]
pub fn image_json() -> Value {
    serde_json::json!({
        "mime_type": "image/png",
        "image_base64": "iVBORw0KGgo="
    })
}
