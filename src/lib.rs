// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! StudentFit: AI-generated workout and diet plans for students.
//!
//! This crate provides the backend API that turns a health profile into a
//! model prompt, splits the model's plan into narrative and macro targets,
//! analyzes meal and workout-space photos, and serves plain-text exports.

pub mod config;
pub mod error;
pub mod macro_format;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use error::AppError;
use services::{Coach, SessionStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// `None` when no model credential is configured
    pub coach: Option<Coach>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, coach: Option<Coach>) -> Self {
        let sessions = SessionStore::new(config.session_idle_timeout());
        Self {
            config,
            coach,
            sessions,
        }
    }

    /// The model-backed workflows, or a configuration error if unavailable.
    pub fn coach(&self) -> Result<&Coach, AppError> {
        self.coach.as_ref().ok_or_else(|| {
            AppError::Configuration(
                "API Key not found. Please set GEMINI_API_KEY in your .env file.".to_string(),
            )
        })
    }
}
