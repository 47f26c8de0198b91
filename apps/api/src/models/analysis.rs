use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Feedback for one scored dimension of a resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFeedback {
    pub score: u32, // 0 – 100
    pub summary: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsFeedback {
    pub score: u32,
    pub summary: String,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsFeedback {
    pub score: u32,
    pub summary: String,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
}

/// The six feedback categories. Used to tag improvements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    Grammar,
    Ats,
    Formatting,
    Content,
    Skills,
    Experience,
}

impl FeedbackCategory {
    /// Case-insensitive lookup used when reading untrusted model output.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "grammar" => Some(Self::Grammar),
            "ats" => Some(Self::Ats),
            "formatting" => Some(Self::Formatting),
            "content" => Some(Self::Content),
            "skills" => Some(Self::Skills),
            "experience" => Some(Self::Experience),
            _ => None,
        }
    }
}

/// A concrete change the candidate could make, optionally with a before/after example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    pub category: FeedbackCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
}

impl SkillCategory {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "technical" => Some(Self::Technical),
            "soft" => Some(Self::Soft),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingSkill {
    pub skill: String,
    pub relevance: u32, // 0 – 100
    pub category: SkillCategory,
}

/// Full per-category feedback attached to an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFeedback {
    pub grammar: CategoryFeedback,
    pub ats: AtsFeedback,
    pub formatting: CategoryFeedback,
    pub content: CategoryFeedback,
    pub skills: SkillsFeedback,
    pub experience: CategoryFeedback,
    pub improvements: Vec<Improvement>,
    pub trending_skills: Vec<TrendingSkill>,
}

#[cfg(test)]
impl AnalysisFeedback {
    /// Scores of the six categories in declaration order.
    pub fn category_scores(&self) -> [u32; 6] {
        [
            self.grammar.score,
            self.ats.score,
            self.formatting.score,
            self.content.score,
            self.skills.score,
            self.experience.score,
        ]
    }
}

/// What an analyzer (AI or heuristic) produces for one resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub overall_score: u32,
    pub feedback: AnalysisFeedback,
}

/// Input to the analysis store; id and timestamp are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub resume_text: String,
    pub job_description: Option<String>,
    pub overall_score: u32,
    pub feedback: AnalysisFeedback,
}

/// A stored analysis. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub id: Uuid,
    pub resume_text: String,
    pub job_description: Option<String>,
    pub overall_score: u32,
    pub feedback: AnalysisFeedback,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(FeedbackCategory::parse("ATS"), Some(FeedbackCategory::Ats));
        assert_eq!(
            FeedbackCategory::parse(" Experience "),
            Some(FeedbackCategory::Experience)
        );
        assert_eq!(FeedbackCategory::parse("tone"), None);
    }

    #[test]
    fn test_skill_category_serializes_lowercase() {
        let skill = TrendingSkill {
            skill: "Rust".to_string(),
            relevance: 70,
            category: SkillCategory::Technical,
        };
        let json = serde_json::to_value(&skill).unwrap();
        assert_eq!(json["category"], "technical");
        assert_eq!(SkillCategory::parse("Soft"), Some(SkillCategory::Soft));
        assert_eq!(SkillCategory::parse("hard"), None);
    }

    #[test]
    fn test_improvement_omits_absent_examples() {
        let improvement = Improvement {
            title: "Add Technical Skills".to_string(),
            description: "Include a dedicated technical skills section".to_string(),
            before: None,
            after: None,
            category: FeedbackCategory::Skills,
        };
        let json = serde_json::to_value(&improvement).unwrap();
        assert!(json.get("before").is_none());
        assert!(json.get("after").is_none());
        assert_eq!(json["category"], "skills");
    }
}
