// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod coach;
pub mod export;
pub mod gemini;
pub mod partition;
pub mod prompt;
pub mod session;

pub use coach::Coach;
pub use export::format_for_export;
pub use gemini::{GeminiClient, ModelGateway};
pub use partition::{partition, try_partition, MacroSectionError, PartitionedPlan};
pub use prompt::{compile_food_analysis_prompt, compile_plan_prompt, compile_room_analysis_prompt};
pub use session::{CurrentSession, SessionId, SessionState, SessionStore};
