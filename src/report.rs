use std::fmt::Write;

use chrono::Utc;

use crate::analytics;
use crate::models::StudentRecord;
use crate::personas;
use crate::predict;

const AT_RISK_SCORE: f64 = 60.0;

/// Builds the markdown cohort report. Pure over the record slice; the caller
/// owns writing it anywhere.
pub fn build_report(class_label: Option<&str>, records: &[StudentRecord], skipped: usize) -> String {
    let mut output = String::new();
    let scope = class_label.unwrap_or("all classes");

    let _ = writeln!(output, "# Student Cognitive Skills Report");
    let _ = writeln!(
        output,
        "Generated for {} on {}",
        scope,
        Utc::now().date_naive()
    );
    if skipped > 0 {
        let _ = writeln!(output, "Skipped {skipped} malformed rows during load.");
    }
    let _ = writeln!(output);

    if records.is_empty() {
        let _ = writeln!(output, "No student records loaded.");
        return output;
    }

    write_overview(&mut output, records);
    write_correlations(&mut output, records);
    write_personas(&mut output, records);
    write_insights(&mut output, records);
    write_priority_students(&mut output, records);

    output
}

fn write_overview(output: &mut String, records: &[StudentRecord]) {
    let _ = writeln!(output, "## Cohort Overview");
    match analytics::summarize(records) {
        Ok(summary) => {
            let _ = writeln!(output, "- Students: {}", summary.total_students);
            let _ = writeln!(output, "- Avg assessment score: {:.2}", summary.avg_score);
            let _ = writeln!(
                output,
                "- Avg comprehension {:.2}, attention {:.2}, focus {:.2}, retention {:.2}",
                summary.avg_comprehension,
                summary.avg_attention,
                summary.avg_focus,
                summary.avg_retention
            );
            let _ = writeln!(
                output,
                "- Avg engagement time: {:.2} minutes",
                summary.avg_engagement
            );
            let _ = writeln!(output);
            let _ = writeln!(output, "### Class Distribution");
            for (class_label, count) in &summary.class_distribution {
                let _ = writeln!(output, "- {class_label}: {count} students");
            }
        }
        Err(err) => {
            let _ = writeln!(output, "Overview unavailable: {err}");
        }
    }
    let _ = writeln!(output);
}

fn write_correlations(output: &mut String, records: &[StudentRecord]) {
    let _ = writeln!(output, "## Skill Correlations vs Assessment Score");
    match analytics::correlations(records) {
        Ok(map) => {
            for (skill, coefficient) in &map.coefficients {
                let _ = writeln!(output, "- {skill}: r = {coefficient:.2}");
            }
            for skill in &map.undefined {
                let _ = writeln!(output, "- {skill}: not defined (zero variance)");
            }
        }
        Err(err) => {
            let _ = writeln!(output, "Correlations unavailable: {err}");
        }
    }
    let _ = writeln!(output);
}

fn write_personas(output: &mut String, records: &[StudentRecord]) {
    let _ = writeln!(output, "## Learning Personas");
    for persona in personas::segment(records) {
        let _ = writeln!(
            output,
            "### {} ({} students)",
            persona.name,
            persona.students.len()
        );
        let _ = writeln!(output, "{}", persona.description);
        let _ = writeln!(
            output,
            "Avg: comprehension {:.2}, attention {:.2}, focus {:.2}, retention {:.2}, score {:.2}, engagement {:.2}",
            persona.avg_scores.comprehension,
            persona.avg_scores.attention,
            persona.avg_scores.focus,
            persona.avg_scores.retention,
            persona.avg_scores.assessment_score,
            persona.avg_scores.engagement_time
        );
        let _ = writeln!(output);
    }
}

fn write_insights(output: &mut String, records: &[StudentRecord]) {
    let _ = writeln!(output, "## Key Insights");

    if let Ok(map) = analytics::correlations(records) {
        let strongest = map
            .coefficients
            .iter()
            .max_by(|a, b| {
                a.1.abs()
                    .partial_cmp(&b.1.abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(skill, coefficient)| (*skill, *coefficient));
        if let Some((skill, coefficient)) = strongest {
            let _ = writeln!(
                output,
                "- Strongest predictor: {skill} (r = {coefficient:.2}) against assessment scores"
            );
        }
    }

    let at_risk = records
        .iter()
        .filter(|record| record.assessment_score < AT_RISK_SCORE)
        .count();
    let _ = writeln!(
        output,
        "- Students at risk: {at_risk} scoring below {AT_RISK_SCORE:.0}"
    );
    let _ = writeln!(output);
}

fn write_priority_students(output: &mut String, records: &[StudentRecord]) {
    let mut predicted: Vec<(&StudentRecord, f64, Vec<String>)> = records
        .iter()
        .map(|record| {
            let result = predict::predict(record);
            (record, result.predicted_score, result.recommendations)
        })
        .collect();
    predicted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let _ = writeln!(output, "## Priority Students");
    for (record, score, recommendations) in predicted.iter().take(5) {
        let _ = writeln!(
            output,
            "- {} ({}, {}) predicted score {:.2}",
            record.name, record.id, record.class_label, score
        );
        for recommendation in recommendations {
            let _ = writeln!(output, "  - {recommendation}");
        }
    }
}
