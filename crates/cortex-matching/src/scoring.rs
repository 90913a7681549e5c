//! Fit score for one (project, candidate) pair
//!
//! ```text
//! score = round(100 * (0.4 * skill + 0.3 * timezone + 0.3 * preference))
//! ```
//!
//! Each component lies in `[0, 1]`, so the score lies in `[0, 100]`. The
//! function is pure: the same inputs always give the same integer.

use std::collections::BTreeSet;

use cortex_models::{Project, ProjectType, User, WorkPreference};

pub const SKILL_WEIGHT: f64 = 0.4;
pub const TIMEZONE_WEIGHT: f64 = 0.3;
pub const PREFERENCE_WEIGHT: f64 = 0.3;

/// Offset gaps beyond this many hours score as badly as this many
pub const MAX_TIMEZONE_GAP_HOURS: f64 = 12.0;

/// Skill component when the project lists no skills
pub const NEUTRAL_SKILL_SCORE: f64 = 0.5;

/// The three score components, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub skill: f64,
    pub timezone: f64,
    pub preference: f64,
}

impl ScoreBreakdown {
    pub fn compute(
        candidate: &User,
        project: &Project,
        owner_offset: f64,
        candidate_offset: f64,
    ) -> Self {
        Self {
            skill: skill_score(&candidate.skills, &project.details.skills_needed),
            timezone: timezone_score(owner_offset, candidate_offset),
            preference: preference_score(candidate.work_preference, project.details.project_type),
        }
    }

    /// Weighted sum in `[0, 1]`
    pub fn raw(&self) -> f64 {
        let sum = SKILL_WEIGHT * self.skill
            + TIMEZONE_WEIGHT * self.timezone
            + PREFERENCE_WEIGHT * self.preference;
        sum.clamp(0.0, 1.0)
    }

    /// Rounded to the nearest integer, halves up
    pub fn score(&self) -> u8 {
        (self.raw() * 100.0 + 0.5).floor() as u8
    }
}

/// Fraction of the needed skills the candidate has
pub fn skill_score(candidate_skills: &BTreeSet<String>, skills_needed: &BTreeSet<String>) -> f64 {
    if skills_needed.is_empty() {
        return NEUTRAL_SKILL_SCORE;
    }
    let overlap = skills_needed.intersection(candidate_skills).count();
    overlap as f64 / skills_needed.len() as f64
}

/// Linear penalty on the offset gap, floored at zero past twelve hours
pub fn timezone_score(owner_offset: f64, candidate_offset: f64) -> f64 {
    let gap = (owner_offset - candidate_offset).abs();
    if !gap.is_finite() {
        return 0.0;
    }
    1.0 - gap.min(MAX_TIMEZONE_GAP_HOURS) / MAX_TIMEZONE_GAP_HOURS
}

/// 1 for an exact match, 0.5 for "both", 0 otherwise
pub fn preference_score(preference: Option<WorkPreference>, project_type: ProjectType) -> f64 {
    match preference {
        Some(pref) if pref.is_exactly(project_type) => 1.0,
        Some(WorkPreference::Both) => 0.5,
        _ => 0.0,
    }
}

/// Fit score of `candidate` for `project`
pub fn fit_score(candidate: &User, project: &Project, owner_offset: f64, candidate_offset: f64) -> u8 {
    ScoreBreakdown::compute(candidate, project, owner_offset, candidate_offset).score()
}
