//! Heuristic analyzer: the deterministic fallback used when the AI service is unavailable.
//!
//! Pure function of the resume text: no I/O, no randomness, no failure modes.
//! Only the scores vary with the input; every summary, suggestion, improvement
//! and trending skill is a fixed literal so the output is identical for identical text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::analysis::{
    AnalysisFeedback, AnalysisOutcome, AtsFeedback, CategoryFeedback, FeedbackCategory,
    Improvement, SkillCategory, SkillsFeedback, TrendingSkill,
};

const BASE_SCORE: u32 = 60;
/// Heuristic results never claim more than this overall.
pub const MAX_HEURISTIC_OVERALL: u32 = 92;

// Word boundaries are ASCII-only: accented letters do not glue onto a match.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}(?-u:\b)")
        .expect("email pattern compiles")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[0-9]{3}[-.]?[0-9]{3}[-.]?[0-9]{4}(?-u:\b)")
        .expect("phone pattern compiles")
});

static SKILLS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)skill|technolog(?:y|ies)|programming|software")
        .expect("skills pattern compiles")
});

static EXPERIENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)experience|work|job|position|company").expect("experience pattern compiles")
});

// ────────────────────────────────────────────────────────────────────────────
// Signals and scoring
// ────────────────────────────────────────────────────────────────────────────

/// Presence checks extracted from the raw resume text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeSignals {
    pub word_count: usize,
    pub has_email: bool,
    pub has_phone: bool,
    pub has_skills: bool,
    pub has_experience: bool,
}

impl ResumeSignals {
    pub fn detect(text: &str) -> Self {
        Self {
            word_count: text.split_whitespace().count(),
            has_email: EMAIL_RE.is_match(text),
            has_phone: PHONE_RE.is_match(text),
            has_skills: SKILLS_RE.is_match(text),
            has_experience: EXPERIENCE_RE.is_match(text),
        }
    }

    /// Additive score in [60, 100].
    pub fn base_score(&self) -> u32 {
        let mut score = BASE_SCORE;
        if self.word_count > 200 {
            score += 10;
        }
        if self.word_count > 400 {
            score += 5;
        }
        if self.has_email {
            score += 5;
        }
        if self.has_phone {
            score += 5;
        }
        if self.has_skills {
            score += 10;
        }
        if self.has_experience {
            score += 5;
        }
        score
    }
}

/// Per-category `min(cap, base + offset)` rule.
#[derive(Debug, Clone, Copy)]
struct CategoryRule {
    cap: u32,
    offset: u32,
}

impl CategoryRule {
    const fn new(cap: u32, offset: u32) -> Self {
        Self { cap, offset }
    }

    fn apply(&self, base: u32) -> u32 {
        (base + self.offset).min(self.cap)
    }
}

const GRAMMAR: CategoryRule = CategoryRule::new(95, 10);
const ATS: CategoryRule = CategoryRule::new(88, 5);
const FORMATTING: CategoryRule = CategoryRule::new(90, 8);
const CONTENT: CategoryRule = CategoryRule::new(87, 3);
const SKILLS: CategoryRule = CategoryRule::new(85, 0);
const EXPERIENCE: CategoryRule = CategoryRule::new(89, 7);

/// Scores a resume without calling out to any model.
///
/// Algorithm:
/// 1. base = 60, +10 for >200 words, +5 more for >400 words,
///    +5 email, +5 phone, +10 skills keywords, +5 experience keywords
/// 2. overall = min(base, 92)
/// 3. each category = min(cap, base + offset)
pub fn analyze_heuristically(resume_text: &str) -> AnalysisOutcome {
    let base = ResumeSignals::detect(resume_text).base_score();
    AnalysisOutcome {
        overall_score: base.min(MAX_HEURISTIC_OVERALL),
        feedback: demo_feedback(base),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fixed feedback content
// ────────────────────────────────────────────────────────────────────────────

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn demo_feedback(base: u32) -> AnalysisFeedback {
    AnalysisFeedback {
        grammar: CategoryFeedback {
            score: GRAMMAR.apply(base),
            summary: "Good grammar and writing style with room for minor improvements".to_string(),
            suggestions: strings(&[
                "Consider using more action verbs to start bullet points",
                "Ensure consistent verb tenses throughout the document",
            ]),
        },
        ats: AtsFeedback {
            score: ATS.apply(base),
            summary: "Resume contains relevant keywords but could be optimized further".to_string(),
            missing_keywords: strings(&["project management", "data analysis", "team leadership"]),
            suggestions: strings(&[
                "Include more industry-specific keywords",
                "Add technical skills section with relevant technologies",
            ]),
        },
        formatting: CategoryFeedback {
            score: FORMATTING.apply(base),
            summary: "Clean and professional formatting with good structure".to_string(),
            suggestions: strings(&[
                "Consider using bullet points for better readability",
                "Ensure consistent spacing and alignment",
            ]),
        },
        content: CategoryFeedback {
            score: CONTENT.apply(base),
            summary: "Strong content with quantifiable achievements".to_string(),
            suggestions: strings(&[
                "Add more specific metrics and numbers to achievements",
                "Include relevant projects or portfolio items",
            ]),
        },
        skills: SkillsFeedback {
            score: SKILLS.apply(base),
            summary: "Good skills representation with room for expansion".to_string(),
            missing_skills: strings(&[
                "Cloud Computing",
                "Machine Learning",
                "Agile Methodologies",
            ]),
            suggestions: strings(&[
                "Add trending technical skills relevant to your field",
                "Include both hard and soft skills",
            ]),
        },
        experience: CategoryFeedback {
            score: EXPERIENCE.apply(base),
            summary: "Well-documented experience with clear progression".to_string(),
            suggestions: strings(&[
                "Use STAR method to describe achievements",
                "Quantify impact with specific numbers and metrics",
            ]),
        },
        improvements: demo_improvements(),
        trending_skills: demo_trending_skills(),
    }
}

fn demo_improvements() -> Vec<Improvement> {
    vec![
        Improvement {
            title: "Quantify Achievements".to_string(),
            description: "Add specific numbers and metrics to demonstrate impact".to_string(),
            before: Some("Improved team productivity".to_string()),
            after: Some(
                "Improved team productivity by 25% through process optimization".to_string(),
            ),
            category: FeedbackCategory::Content,
        },
        Improvement {
            title: "Add Technical Skills".to_string(),
            description: "Include a dedicated technical skills section".to_string(),
            before: None,
            after: None,
            category: FeedbackCategory::Skills,
        },
        Improvement {
            title: "Optimize Keywords".to_string(),
            description: "Include more industry-specific keywords for ATS compatibility"
                .to_string(),
            before: None,
            after: None,
            category: FeedbackCategory::Ats,
        },
        Improvement {
            title: "Action Verbs".to_string(),
            description: "Start bullet points with strong action verbs".to_string(),
            before: Some("Was responsible for managing projects".to_string()),
            after: Some("Managed cross-functional projects delivering results on time".to_string()),
            category: FeedbackCategory::Grammar,
        },
        Improvement {
            title: "Contact Information".to_string(),
            description: "Ensure all contact information is current and professional".to_string(),
            before: None,
            after: None,
            category: FeedbackCategory::Formatting,
        },
    ]
}

fn demo_trending_skills() -> Vec<TrendingSkill> {
    use SkillCategory::{Soft, Technical};

    [
        ("Cloud Computing (AWS/Azure)", 92, Technical),
        ("Data Analysis", 88, Technical),
        ("Project Management", 85, Soft),
        ("Machine Learning", 82, Technical),
        ("Agile Methodologies", 80, Soft),
        ("Python Programming", 78, Technical),
        ("Leadership", 85, Soft),
        ("Communication", 90, Soft),
    ]
    .into_iter()
    .map(|(skill, relevance, category)| TrendingSkill {
        skill: skill.to_string(),
        relevance,
        category,
    })
    .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
