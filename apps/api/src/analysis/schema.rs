//! Trust-boundary validation for model output.
//!
//! The model's JSON is first read into an all-optional "raw" shape so that a
//! missing field produces a precise message instead of a serde error, then
//! converted into the strongly-typed `AnalysisOutcome`. Scores are clamped
//! to [0, 100]; anything structurally wrong is rejected.

use serde::Deserialize;

use crate::models::analysis::{
    AnalysisFeedback, AnalysisOutcome, AtsFeedback, CategoryFeedback, FeedbackCategory,
    Improvement, SkillCategory, SkillsFeedback, TrendingSkill,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAnalysis {
    pub overall_score: Option<f64>,
    pub feedback: Option<RawFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFeedback {
    pub grammar: Option<RawCategory>,
    pub ats: Option<RawCategory>,
    pub formatting: Option<RawCategory>,
    pub content: Option<RawCategory>,
    pub skills: Option<RawCategory>,
    pub experience: Option<RawCategory>,
    pub improvements: Vec<RawImprovement>,
    pub trending_skills: Vec<RawTrendingSkill>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCategory {
    pub score: Option<f64>,
    pub summary: Option<String>,
    pub suggestions: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawImprovement {
    pub title: Option<String>,
    pub description: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawTrendingSkill {
    pub skill: Option<String>,
    pub relevance: Option<f64>,
    pub category: Option<String>,
}

/// Rounds and clamps an untrusted score into [0, 100].
pub fn clamp_score(raw: f64) -> u32 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u32
}

impl RawAnalysis {
    pub fn validate(self) -> Result<AnalysisOutcome, String> {
        let overall = self.overall_score.ok_or("missing overallScore")?;
        let feedback = self.feedback.ok_or("missing feedback")?;
        Ok(AnalysisOutcome {
            overall_score: clamp_score(overall),
            feedback: feedback.validate()?,
        })
    }
}

impl RawFeedback {
    fn validate(self) -> Result<AnalysisFeedback, String> {
        let improvements = self
            .improvements
            .into_iter()
            .enumerate()
            .map(|(i, imp)| imp.validate().map_err(|e| format!("improvements[{i}]: {e}")))
            .collect::<Result<Vec<_>, _>>()?;

        let trending_skills = self
            .trending_skills
            .into_iter()
            .enumerate()
            .map(|(i, s)| s.validate().map_err(|e| format!("trendingSkills[{i}]: {e}")))
            .collect::<Result<Vec<_>, _>>()?;

        let ats = required("ats", self.ats)?;
        let skills = required("skills", self.skills)?;

        Ok(AnalysisFeedback {
            grammar: required("grammar", self.grammar)?.into_category("grammar")?,
            ats: AtsFeedback {
                score: score_of("ats", ats.score)?,
                summary: summary_of("ats", ats.summary)?,
                missing_keywords: ats.missing_keywords,
                suggestions: ats.suggestions,
            },
            formatting: required("formatting", self.formatting)?.into_category("formatting")?,
            content: required("content", self.content)?.into_category("content")?,
            skills: SkillsFeedback {
                score: score_of("skills", skills.score)?,
                summary: summary_of("skills", skills.summary)?,
                missing_skills: skills.missing_skills,
                suggestions: skills.suggestions,
            },
            experience: required("experience", self.experience)?.into_category("experience")?,
            improvements,
            trending_skills,
        })
    }
}

impl RawCategory {
    fn into_category(self, name: &str) -> Result<CategoryFeedback, String> {
        Ok(CategoryFeedback {
            score: score_of(name, self.score)?,
            summary: summary_of(name, self.summary)?,
            suggestions: self.suggestions,
        })
    }
}

impl RawImprovement {
    fn validate(self) -> Result<Improvement, String> {
        let raw_category = self.category.ok_or("missing category")?;
        let category = FeedbackCategory::parse(&raw_category)
            .ok_or_else(|| format!("unknown category '{raw_category}'"))?;
        Ok(Improvement {
            title: self.title.ok_or("missing title")?,
            description: self.description.ok_or("missing description")?,
            before: self.before.filter(|s| !s.trim().is_empty()),
            after: self.after.filter(|s| !s.trim().is_empty()),
            category,
        })
    }
}

impl RawTrendingSkill {
    fn validate(self) -> Result<TrendingSkill, String> {
        let raw_category = self.category.ok_or("missing category")?;
        let category = SkillCategory::parse(&raw_category)
            .ok_or_else(|| format!("unknown category '{raw_category}'"))?;
        Ok(TrendingSkill {
            skill: self.skill.ok_or("missing skill")?,
            relevance: clamp_score(self.relevance.ok_or("missing relevance")?),
            category,
        })
    }
}

fn required<T>(name: &str, value: Option<T>) -> Result<T, String> {
    value.ok_or_else(|| format!("missing feedback.{name}"))
}

fn score_of(name: &str, score: Option<f64>) -> Result<u32, String> {
    score
        .map(clamp_score)
        .ok_or_else(|| format!("missing feedback.{name}.score"))
}

fn summary_of(name: &str, summary: Option<String>) -> Result<String, String> {
    summary.ok_or_else(|| format!("missing feedback.{name}.summary"))
}
