use crate::analytics::round2;
use crate::models::{Confidence, PredictionResult, StudentRecord};

// Fixed linear model. The weights sum to 1.0 and are never fitted to data.
const WEIGHT_COMPREHENSION: f64 = 0.35;
const WEIGHT_ATTENTION: f64 = 0.25;
const WEIGHT_FOCUS: f64 = 0.20;
const WEIGHT_RETENTION: f64 = 0.15;
const WEIGHT_ENGAGEMENT: f64 = 0.05;

const SKILL_GAP_THRESHOLD: f64 = 70.0;
const ENGAGEMENT_GAP_THRESHOLD: f64 = 30.0;

pub fn predict(record: &StudentRecord) -> PredictionResult {
    let predicted_score = round2(
        record.comprehension * WEIGHT_COMPREHENSION
            + record.attention * WEIGHT_ATTENTION
            + record.focus * WEIGHT_FOCUS
            + record.retention * WEIGHT_RETENTION
            + record.engagement_time * WEIGHT_ENGAGEMENT,
    );

    // Strict comparisons: exactly 85 or 65 falls to the lower tier.
    let confidence = if predicted_score > 85.0 {
        Confidence::High
    } else if predicted_score > 65.0 {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    PredictionResult {
        predicted_score,
        confidence,
        recommendations: recommendations(record),
    }
}

/// Fixed message per skill gap, always emitted in this order, independent of
/// the predicted score.
fn recommendations(record: &StudentRecord) -> Vec<String> {
    let mut out = Vec::new();
    if record.comprehension < SKILL_GAP_THRESHOLD {
        out.push("Focus on reading comprehension exercises".to_string());
    }
    if record.attention < SKILL_GAP_THRESHOLD {
        out.push("Implement attention-building activities".to_string());
    }
    if record.focus < SKILL_GAP_THRESHOLD {
        out.push("Use mindfulness and concentration techniques".to_string());
    }
    if record.retention < SKILL_GAP_THRESHOLD {
        out.push("Practice spaced repetition and memory techniques".to_string());
    }
    if record.engagement_time < ENGAGEMENT_GAP_THRESHOLD {
        out.push("Increase interactive learning time".to_string());
    }
    out
}
