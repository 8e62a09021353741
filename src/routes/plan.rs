// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plan generation routes and form options.

use crate::error::{AppError, Result};
use crate::models::{ActivityLevel, BudgetLevel, GeneratedPlan, Goal, HealthProfile, MacroRatio};
use crate::services::{CurrentSession, SessionId};
use crate::AppState;
use axum::{
    extract::State,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/options", get(get_options))
        .route("/api/plan", get(get_plan).post(create_plan))
}

// ─── Form Options ────────────────────────────────────────────

/// One selectable form value with its display label.
#[derive(Serialize)]
pub struct Choice<T> {
    pub value: T,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct OptionsResponse {
    pub goals: Vec<Choice<Goal>>,
    pub budget_levels: Vec<Choice<BudgetLevel>>,
    pub activity_levels: Vec<Choice<ActivityLevel>>,
}

/// Choices for the profile form's select boxes.
async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        goals: Goal::ALL
            .iter()
            .map(|&value| Choice {
                value,
                label: value.label(),
            })
            .collect(),
        budget_levels: BudgetLevel::ALL
            .iter()
            .map(|&value| Choice {
                value,
                label: value.label(),
            })
            .collect(),
        activity_levels: ActivityLevel::ALL
            .iter()
            .map(|&value| Choice {
                value,
                label: value.label(),
            })
            .collect(),
    })
}

// ─── Plan ────────────────────────────────────────────────────

/// One bar of the macro chart.
#[derive(Serialize, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChartRow {
    pub nutrient: String,
    pub percentage: i32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlanResponse {
    pub narrative: String,
    pub macros: Option<MacroRatio>,
    /// Empty when the response had no readable macro block
    pub macro_chart: Vec<ChartRow>,
    pub generated_at: String,
}

impl From<GeneratedPlan> for PlanResponse {
    fn from(plan: GeneratedPlan) -> Self {
        let macro_chart = plan
            .macros
            .map(|m| {
                m.chart_rows()
                    .into_iter()
                    .map(|(nutrient, percentage)| ChartRow {
                        nutrient: nutrient.to_string(),
                        percentage,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            narrative: plan.narrative,
            macros: plan.macros,
            macro_chart,
            generated_at: plan.generated_at,
        }
    }
}

/// Generate a new plan. The profile and plan replace the session's previous
/// ones only if generation succeeds. The first successful plan starts the
/// session.
async fn create_plan(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
    Json(profile): Json<HealthProfile>,
) -> Result<(Extension<SessionId>, Json<PlanResponse>)> {
    profile
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let coach = state.coach()?;
    let plan = coach.generate_plan(&profile).await?;

    let (id, ()) = state
        .sessions
        .update_or_create(session.id(), |s| s.record_plan(profile, plan.clone()))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((Extension(id), Json(plan.into())))
}

/// The session's current plan.
async fn get_plan(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<PlanResponse>> {
    let plan = session
        .read(&state.sessions, |s| s.plan.clone())
        .flatten()
        .ok_or_else(|| AppError::NotFound("No plan generated yet".to_string()))?;

    Ok(Json(plan.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_rows_follow_macros() {
        let response = PlanResponse::from(GeneratedPlan {
            narrative: "plan".to_string(),
            macros: Some(MacroRatio {
                protein: 30,
                carbs: 50,
                fats: 20,
            }),
            generated_at: "2026-01-01T00:00:00Z".to_string(),
        });

        assert_eq!(
            response.macro_chart,
            vec![
                ChartRow {
                    nutrient: "Protein".to_string(),
                    percentage: 30
                },
                ChartRow {
                    nutrient: "Carbs".to_string(),
                    percentage: 50
                },
                ChartRow {
                    nutrient: "Fats".to_string(),
                    percentage: 20
                },
            ]
        );
    }

    #[test]
    fn test_no_chart_without_macros() {
        let response = PlanResponse::from(GeneratedPlan {
            narrative: "plan".to_string(),
            macros: None,
            generated_at: "2026-01-01T00:00:00Z".to_string(),
        });
        assert!(response.macro_chart.is_empty());
    }
}
