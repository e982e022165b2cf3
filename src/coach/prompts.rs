//! Prompt text sent to the coaching model

use super::{AthleteStats, WorkoutSnapshot};

/// System prompt for reviewing the plain-text export
pub const EXPORT_REVIEW_SYSTEM: &str = "You are a fitness coach analyzing pull-up workout data. \
Provide encouraging feedback, identify patterns, and suggest improvements. \
Keep responses concise and actionable.";

/// System prompt for the in-depth workout analysis
pub const WORKOUT_ANALYSIS_SYSTEM: &str = "You are a sports medicine doctor and hypertrophy \
specialist with years of experience coaching athletes of every age. \
Provide evidence-based, actionable advice.";

/// System prompt for nutrition advice
pub const NUTRITION_SYSTEM: &str = "You are an experienced sports and fitness doctor specializing \
in muscle growth and hypertrophy. Focus on nutrition strategies for body recomposition: \
losing fat while gaining muscle mass.";

/// Build the user message for nutrition advice
pub fn nutrition(athlete: &AthleteStats, stats_json: &str, profile: Option<&str>) -> String {
    let mut prompt = String::from(
        "Based on my current stats, please provide:\n\n\
         1. **Caloric Targets**: daily calorie and macronutrient recommendations.\n\
         2. **Protein Strategy**: protein intake, timing, and sources for muscle protein synthesis.\n\
         3. **Carbohydrate Timing**: when and how much carbs to support training and recovery.\n\
         4. **Fat Requirements**: essential fatty acids and hormone support.\n\
         5. **Meal Timing**: meal frequency and timing for body recomposition.\n\
         6. **Hydration**: hydration strategies for performance and recovery.\n\n\
         Provide evidence-based recommendations with scientific references where possible.\n\n",
    );

    if let Some(profile) = profile.map(str::trim).filter(|p| !p.is_empty()) {
        prompt.push_str("CLIENT PROFILE:\n");
        prompt.push_str(profile);
        prompt.push_str("\n\n");
    }

    if athlete.is_empty() {
        prompt.push_str("No client stats were provided; state the assumptions you make.");
    } else {
        prompt.push_str("CLIENT STATS:\n");
        prompt.push_str(stats_json);
    }
    prompt
}

/// Build the user message for the workout analysis
///
/// `workout_json` is the pretty-printed [`WorkoutSnapshot`]; `profile` is the
/// optional free-text athlete description from configuration.
pub fn workout_analysis(snapshot: &WorkoutSnapshot, workout_json: &str, profile: Option<&str>) -> String {
    let mut prompt = String::from(
        "You are an experienced sports and fitness doctor specializing in muscle growth \
         and hypertrophy.\n\n",
    );

    if let Some(profile) = profile.map(str::trim).filter(|p| !p.is_empty()) {
        prompt.push_str("CLIENT PROFILE:\n");
        prompt.push_str(profile);
        prompt.push_str("\n\n");
    }

    prompt.push_str("CURRENT WORKOUT DATA:\n");
    prompt.push_str(workout_json);
    prompt.push_str("\n\n");

    if snapshot.recent_logs.is_empty() {
        prompt.push_str("No sets have been logged yet; advise on how to start.\n\n");
    }

    prompt.push_str(
        "Please provide specific recommendations for:\n\n\
         1. **Training Frequency & Volume**: the optimal pull-up frequency given current performance.\n\
         2. **Progressive Overload**: how to progress while avoiding injury.\n\
         3. **Complementary Exercises**: exercises that support pull-up strength.\n\
         4. **Recovery Optimization**: recovery protocols supporting adaptation.\n\
         5. **Nutrition Timing**: pre/post workout nutrition strategies.\n\n\
         Provide specific, actionable recommendations with scientific rationale.",
    );
    prompt
}
