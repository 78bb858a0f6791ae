use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub class_label: String,
    pub comprehension: f64,
    pub attention: f64,
    pub focus: f64,
    pub retention: f64,
    pub assessment_score: f64,
    pub engagement_time: f64,
}

/// Static selector for the six numeric columns, so field access stays
/// checked at compile time instead of going through string keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Comprehension,
    Attention,
    Focus,
    Retention,
    EngagementTime,
    AssessmentScore,
}

/// The five non-outcome fields, in canonical reporting order.
pub const SKILL_FIELDS: [NumericField; 5] = [
    NumericField::Comprehension,
    NumericField::Attention,
    NumericField::Focus,
    NumericField::Retention,
    NumericField::EngagementTime,
];

impl NumericField {
    pub fn value(&self, record: &StudentRecord) -> f64 {
        match self {
            NumericField::Comprehension => record.comprehension,
            NumericField::Attention => record.attention,
            NumericField::Focus => record.focus,
            NumericField::Retention => record.retention,
            NumericField::EngagementTime => record.engagement_time,
            NumericField::AssessmentScore => record.assessment_score,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NumericField::Comprehension => "comprehension",
            NumericField::Attention => "attention",
            NumericField::Focus => "focus",
            NumericField::Retention => "retention",
            NumericField::EngagementTime => "engagement_time",
            NumericField::AssessmentScore => "assessment_score",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub avg_comprehension: f64,
    pub avg_attention: f64,
    pub avg_focus: f64,
    pub avg_retention: f64,
    pub avg_engagement: f64,
    pub avg_score: f64,
    pub total_students: usize,
    pub class_distribution: BTreeMap<String, usize>,
}

/// Per-skill Pearson coefficients against the assessment score. Skills with
/// zero variance are listed under `undefined` so callers can report them
/// instead of seeing a NaN or a silently missing entry.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMap {
    pub coefficients: BTreeMap<NumericField, f64>,
    pub undefined: Vec<NumericField>,
}

/// Average of every numeric field over some group of students.
#[derive(Debug, Clone, Serialize)]
pub struct FieldAverages {
    pub comprehension: f64,
    pub attention: f64,
    pub focus: f64,
    pub retention: f64,
    pub assessment_score: f64,
    pub engagement_time: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Persona {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub characteristics: Vec<&'static str>,
    pub students: Vec<StudentRecord>,
    pub avg_scores: FieldAverages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub predicted_score: f64,
    pub confidence: Confidence,
    pub recommendations: Vec<String>,
}
