use std::collections::BTreeMap;

use crate::error::AnalyticsError;
use crate::models::{
    AnalyticsSummary, CorrelationMap, FieldAverages, NumericField, StudentRecord, SKILL_FIELDS,
};

/// Rounds to 2 decimal places, half away from zero. All values in this
/// domain are non-negative, so this matches the JS-style
/// `Math.round(x * 100) / 100` convention used everywhere in the pipeline.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn average(records: &[StudentRecord], field: NumericField) -> Result<f64, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyDataset {
            operation: "average",
        });
    }
    let sum: f64 = records.iter().map(|record| field.value(record)).sum();
    Ok(round2(sum / records.len() as f64))
}

pub fn summarize(records: &[StudentRecord]) -> Result<AnalyticsSummary, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyDataset {
            operation: "summarize",
        });
    }

    let mut class_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *class_distribution
            .entry(record.class_label.clone())
            .or_insert(0) += 1;
    }

    Ok(AnalyticsSummary {
        avg_comprehension: average(records, NumericField::Comprehension)?,
        avg_attention: average(records, NumericField::Attention)?,
        avg_focus: average(records, NumericField::Focus)?,
        avg_retention: average(records, NumericField::Retention)?,
        avg_engagement: average(records, NumericField::EngagementTime)?,
        avg_score: average(records, NumericField::AssessmentScore)?,
        total_students: records.len(),
        class_distribution,
    })
}

/// Averages over an already-selected group, used for per-persona scores.
pub fn group_averages(records: &[StudentRecord]) -> Result<FieldAverages, AnalyticsError> {
    Ok(FieldAverages {
        comprehension: average(records, NumericField::Comprehension)?,
        attention: average(records, NumericField::Attention)?,
        focus: average(records, NumericField::Focus)?,
        retention: average(records, NumericField::Retention)?,
        assessment_score: average(records, NumericField::AssessmentScore)?,
        engagement_time: average(records, NumericField::EngagementTime)?,
    })
}

/// Pearson product-moment correlation between two numeric fields, rounded to
/// 2 decimals. Zero variance on either side is an explicit error rather than
/// a NaN leaking out of the division.
pub fn pearson(
    records: &[StudentRecord],
    x: NumericField,
    y: NumericField,
) -> Result<f64, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyDataset {
            operation: "pearson",
        });
    }

    let n = records.len() as f64;
    let x_mean: f64 = records.iter().map(|r| x.value(r)).sum::<f64>() / n;
    let y_mean: f64 = records.iter().map(|r| y.value(r)).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut x_sum_sq = 0.0;
    let mut y_sum_sq = 0.0;
    for record in records {
        let dx = x.value(record) - x_mean;
        let dy = y.value(record) - y_mean;
        numerator += dx * dy;
        x_sum_sq += dx * dx;
        y_sum_sq += dy * dy;
    }

    if x_sum_sq == 0.0 || y_sum_sq == 0.0 {
        return Err(AnalyticsError::UndefinedCorrelation { x, y });
    }

    Ok(round2(numerator / (x_sum_sq * y_sum_sq).sqrt()))
}

/// Correlates each skill field against the assessment score. Recomputed from
/// scratch on every call; nothing is cached. Skills with zero variance land
/// in `undefined` instead of aborting the whole map.
pub fn correlations(records: &[StudentRecord]) -> Result<CorrelationMap, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyDataset {
            operation: "correlations",
        });
    }

    let mut coefficients = BTreeMap::new();
    let mut undefined = Vec::new();
    for skill in SKILL_FIELDS {
        match pearson(records, skill, NumericField::AssessmentScore) {
            Ok(coefficient) => {
                coefficients.insert(skill, coefficient);
            }
            Err(AnalyticsError::UndefinedCorrelation { .. }) => undefined.push(skill),
            Err(other) => return Err(other),
        }
    }

    Ok(CorrelationMap {
        coefficients,
        undefined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, scores: [f64; 6]) -> StudentRecord {
        StudentRecord {
            id: id.to_string(),
            name: format!("Student {id}"),
            class_label: "7A".to_string(),
            comprehension: scores[0],
            attention: scores[1],
            focus: scores[2],
            retention: scores[3],
            assessment_score: scores[4],
            engagement_time: scores[5],
        }
    }

    fn sample_cohort() -> Vec<StudentRecord> {
        vec![
            student("S0001", [90.0, 85.0, 80.0, 88.0, 92.0, 40.0]),
            student("S0002", [60.0, 55.0, 50.0, 58.0, 55.0, 20.0]),
            student("S0003", [75.0, 70.0, 72.0, 74.0, 78.0, 30.0]),
        ]
    }

    #[test]
    fn round2_is_half_away_from_zero() {
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(2.346), 2.35);
        // 0.125 is exactly representable, so the half case is genuine.
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn summarize_averages_every_field() {
        let summary = summarize(&sample_cohort()).unwrap();
        assert_eq!(summary.avg_comprehension, 75.0);
        assert_eq!(summary.avg_attention, 70.0);
        assert_eq!(summary.avg_focus, 67.33);
        assert_eq!(summary.avg_retention, 73.33);
        assert_eq!(summary.avg_score, 75.0);
        assert_eq!(summary.avg_engagement, 30.0);
        assert_eq!(summary.total_students, 3);
    }

    #[test]
    fn summarize_counts_class_distribution() {
        let mut records = sample_cohort();
        records[2].class_label = "8A".to_string();
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.class_distribution["7A"], 2);
        assert_eq!(summary.class_distribution["8A"], 1);
    }

    #[test]
    fn summarize_is_idempotent() {
        let records = sample_cohort();
        let first = summarize(&records).unwrap();
        let second = summarize(&records).unwrap();
        assert_eq!(first.avg_score, second.avg_score);
        assert_eq!(first.class_distribution, second.class_distribution);
    }

    #[test]
    fn summarize_rejects_empty_dataset() {
        let err = summarize(&[]).unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyDataset { .. }));
    }

    #[test]
    fn pearson_is_symmetric() {
        let records = sample_cohort();
        let xy = pearson(
            &records,
            NumericField::Comprehension,
            NumericField::AssessmentScore,
        )
        .unwrap();
        let yx = pearson(
            &records,
            NumericField::AssessmentScore,
            NumericField::Comprehension,
        )
        .unwrap();
        assert_eq!(xy, yx);
    }

    #[test]
    fn pearson_stays_within_bounds() {
        let records = sample_cohort();
        for skill in SKILL_FIELDS {
            let r = pearson(&records, skill, NumericField::AssessmentScore).unwrap();
            assert!((-1.0..=1.0).contains(&r), "{skill} out of bounds: {r}");
        }
    }

    #[test]
    fn pearson_perfect_positive_correlation() {
        let records = vec![
            student("S0001", [10.0, 0.0, 0.0, 0.0, 20.0, 0.0]),
            student("S0002", [20.0, 0.0, 0.0, 0.0, 40.0, 0.0]),
            student("S0003", [30.0, 0.0, 0.0, 0.0, 60.0, 0.0]),
        ];
        let r = pearson(
            &records,
            NumericField::Comprehension,
            NumericField::AssessmentScore,
        )
        .unwrap();
        assert_eq!(r, 1.0);
    }

    #[test]
    fn zero_variance_field_is_undefined_not_zero() {
        let records = vec![
            student("S0001", [70.0, 85.0, 80.0, 88.0, 92.0, 40.0]),
            student("S0002", [70.0, 55.0, 50.0, 58.0, 55.0, 20.0]),
        ];
        let err = pearson(
            &records,
            NumericField::Comprehension,
            NumericField::AssessmentScore,
        )
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::UndefinedCorrelation { .. }));
    }

    #[test]
    fn correlations_reports_undefined_skills_separately() {
        let records = vec![
            student("S0001", [70.0, 85.0, 80.0, 88.0, 92.0, 40.0]),
            student("S0002", [70.0, 55.0, 50.0, 58.0, 55.0, 20.0]),
        ];
        let map = correlations(&records).unwrap();
        assert_eq!(map.undefined, vec![NumericField::Comprehension]);
        assert_eq!(map.coefficients.len(), 4);
        assert!(!map.coefficients.contains_key(&NumericField::Comprehension));
    }

    #[test]
    fn correlations_covers_all_skills_when_defined() {
        let map = correlations(&sample_cohort()).unwrap();
        assert_eq!(map.coefficients.len(), SKILL_FIELDS.len());
        assert!(map.undefined.is_empty());
    }
}
