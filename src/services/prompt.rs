// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt construction from a health profile.
//!
//! All builders are pure: the same profile always yields the same prompt,
//! and no interpolated slot is ever left empty.

use crate::macro_format::macro_format_instruction;
use crate::models::{AnalysisKind, HealthProfile};

/// Placeholder for missing medical, restriction and note answers.
pub const NONE_PLACEHOLDER: &str = "None";
/// Placeholder for a missing activity description.
pub const ACTIVITY_PLACEHOLDER: &str = "General";
/// Placeholder for a missing cultural food style.
pub const CULTURE_PLACEHOLDER: &str = "Global";

/// Prepended to the plan prompt when exam week mode is on.
pub const EXAM_WEEK_INSTRUCTIONS: &str = "\
CRITICAL: The user is in EXAM WEEK.
1. Limit all workouts to exactly 15 minutes (HIIT or stretching).
2. Focus meals on 'Brain Foods' (Omega-3s, complex carbs, blueberries, nuts).
3. Suggest low-caffeine energy boosters to avoid study crashes.
4. Keep instructions extremely short and easy to read.";

/// Profile answers with every empty slot replaced by its placeholder.
struct ProfileFields<'a> {
    goal: &'static str,
    budget: &'static str,
    medical: &'a str,
    restrictions: &'a str,
    activity_level: &'static str,
    activity_detail: &'a str,
    culture: &'a str,
    notes: &'a str,
}

impl<'a> ProfileFields<'a> {
    fn new(profile: &'a HealthProfile) -> Self {
        Self {
            goal: profile.goal.label(),
            budget: profile.budget_level.label(),
            medical: or_placeholder(&profile.medical_conditions, NONE_PLACEHOLDER),
            restrictions: or_placeholder(&profile.dietary_restrictions, NONE_PLACEHOLDER),
            activity_level: profile.activity_level.label(),
            activity_detail: or_placeholder(&profile.activity_detail, ACTIVITY_PLACEHOLDER),
            culture: or_placeholder(&profile.cultural_style, CULTURE_PLACEHOLDER),
            notes: or_placeholder(&profile.additional_notes, NONE_PLACEHOLDER),
        }
    }
}

/// Blank or whitespace-only answers count as missing. Non-blank answers are
/// passed through exactly as typed.
fn or_placeholder<'a>(value: &'a str, placeholder: &'static str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// Build the 7-day plan prompt.
pub fn compile_plan_prompt(profile: &HealthProfile) -> String {
    let f = ProfileFields::new(profile);

    let mut prompt = String::from(
        "You are a professional Fitness & Nutrition Coach. Create a highly personalized 7-day plan.\n",
    );
    if profile.exam_mode {
        prompt.push_str(EXAM_WEEK_INSTRUCTIONS);
        prompt.push('\n');
    }

    prompt.push_str(&format!(
        "\nUSER PROFILE:
- Goal: {goal}
- Budget Level: {budget}
- Medical Conditions: {medical}
- Dietary Restrictions: {restrictions}
- Activity Level: {level}
- Current Activity: {detail}
- Cultural Food Style: {culture}
- Specific Request: {notes}

OUTPUT REQUIREMENTS:
1. 🍎 **7-Day Meal Plan**: Specific meals (Breakfast, Lunch, Dinner, Snack) based on {culture} habits and {budget} budget.
2. 💪 **Workout Plan**: A routine tailored to {goal}, respecting {medical}.
3. 🛒 **Shopping List**: Categorized and budget-friendly.
4. 💡 **Pro-Tips**: 3 tips for consistency and time-saving for students.

Format clearly with Markdown and bold headings.
",
        goal = f.goal,
        budget = f.budget,
        medical = f.medical,
        restrictions = f.restrictions,
        level = f.activity_level,
        detail = f.activity_detail,
        culture = f.culture,
        notes = f.notes,
    ));
    prompt.push_str(&macro_format_instruction());
    prompt.push('\n');
    prompt
}

/// Short profile summary embedded in the photo analysis prompts.
pub fn profile_context(profile: &HealthProfile) -> String {
    let f = ProfileFields::new(profile);
    format!(
        "Goal: {}, Budget: {},\nMedical: {}, Restrictions: {},\nActivity: {} ({}), Culture: {}",
        f.goal, f.budget, f.medical, f.restrictions, f.activity_level, f.activity_detail, f.culture
    )
}

/// Fixed wording of one photo analysis prompt.
struct AnalysisTemplate {
    persona: &'static str,
    subject: &'static str,
    tasks: [&'static str; 5],
    closing: &'static str,
}

const FOOD_TEMPLATE: AnalysisTemplate = AnalysisTemplate {
    persona: "Act as a certified nutritionist and AI vision expert.",
    subject: "the provided image of the meal",
    tasks: [
        "IDENTIFY: List every food item and estimated portion size from the image.",
        "SCIENCE-BACKED BREAKDOWN: Provide a table with Calories, Protein, Carbs, and Fats.",
        "PERSONALIZED INSIGHTS: How does this specific meal affect the user's current goal or medical conditions?",
        "RECOMMENDATIONS: Suggest one \"Practical Swap\" to improve the nutrient density of this specific plate.",
        "PRECAUTIONS: Highlight any ingredients visible that might conflict with the user's dietary restrictions.",
    ],
    closing: "Maintain a professional yet supportive tone. Use Markdown for the table.",
};

const ROOM_TEMPLATE: AnalysisTemplate = AnalysisTemplate {
    persona: "Act as a certified Fitness Coach and Biomechanics Expert.",
    subject: "the provided image of the user's environment",
    tasks: [
        "ENVIRONMENT AUDIT: Identify all usable fitness equipment OR household furniture (e.g., chairs, wall space, sturdy elevated surfaces) visible in the image.",
        "CUSTOM CIRCUIT: Design a 15-minute workout circuit tailored to the user's goal. For each exercise, specify which object from the photo to use.",
        "BIOMECHANICAL ADVANTAGE: Briefly explain why these specific objects are safe and effective for the recommended movements.",
        "PROGRESSION TIP: Suggest one way to make the workout harder once they master the current routine.",
        "SAFETY PRECAUTIONS: Highlight any potential hazards in the photo (e.g., slippery floors, unstable furniture) and provide a safety warning based on their medical history.",
    ],
    closing: "Maintain an encouraging and professional tone. Use Markdown for the workout structure.",
};

impl AnalysisTemplate {
    fn for_kind(kind: AnalysisKind) -> &'static Self {
        match kind {
            AnalysisKind::Food => &FOOD_TEMPLATE,
            AnalysisKind::Room => &ROOM_TEMPLATE,
        }
    }

    fn render(&self, profile: Option<&HealthProfile>) -> String {
        let mut prompt = format!("{}\n", self.persona);
        match profile {
            Some(profile) => prompt.push_str(&format!(
                "Analyze {} and cross-reference it with the user's health profile:\n{}\n",
                self.subject,
                profile_context(profile)
            )),
            None => prompt.push_str(&format!("Analyze {}.\n", self.subject)),
        }

        prompt.push_str("\nYOUR TASK:\n");
        for (i, task) in self.tasks.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, task));
        }
        prompt.push('\n');
        prompt.push_str(self.closing);
        prompt.push('\n');
        prompt
    }
}

/// Build the analysis prompt for either photo track.
///
/// `profile` is `None` when no plan has been generated yet; the prompt then
/// carries no personalization context.
pub fn compile_analysis_prompt(kind: AnalysisKind, profile: Option<&HealthProfile>) -> String {
    AnalysisTemplate::for_kind(kind).render(profile)
}

/// Build the meal photo nutrition prompt.
pub fn compile_food_analysis_prompt(profile: Option<&HealthProfile>) -> String {
    compile_analysis_prompt(AnalysisKind::Food, profile)
}

/// Build the workout space prompt.
pub fn compile_room_analysis_prompt(profile: Option<&HealthProfile>) -> String {
    compile_analysis_prompt(AnalysisKind::Room, profile)
}
