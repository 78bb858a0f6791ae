use anyhow::Context;
use rand::prelude::*;
use rand_distr::Normal;

use crate::analytics::round2;

const CLASSES: [&str; 8] = ["6A", "6B", "7A", "7B", "8A", "8B", "9A", "9B"];

const FIRST_NAMES: [&str; 10] = [
    "Avery", "Jules", "Kiara", "Mateo", "Nora", "Omar", "Priya", "Rowan", "Sana", "Theo",
];
const LAST_NAMES: [&str; 10] = [
    "Lee", "Moreno", "Patel", "Okafor", "Bennett", "Silva", "Khan", "Ivanov", "Dubois", "Nakamura",
];

struct SkillModel {
    mean: f64,
    sd: f64,
    min: f64,
    max: f64,
}

// Distribution parameters for each skill column.
const COMPREHENSION: SkillModel = SkillModel { mean: 70.0, sd: 12.0, min: 30.0, max: 100.0 };
const ATTENTION: SkillModel = SkillModel { mean: 65.0, sd: 15.0, min: 20.0, max: 100.0 };
const FOCUS: SkillModel = SkillModel { mean: 68.0, sd: 14.0, min: 25.0, max: 100.0 };
const RETENTION: SkillModel = SkillModel { mean: 67.0, sd: 13.0, min: 25.0, max: 100.0 };
const ENGAGEMENT: SkillModel = SkillModel { mean: 45.0, sd: 20.0, min: 5.0, max: 120.0 };
const SCORE_NOISE_SD: f64 = 6.0;

fn sample(rng: &mut StdRng, model: &SkillModel) -> anyhow::Result<f64> {
    let distribution =
        Normal::new(model.mean, model.sd).context("invalid distribution parameters")?;
    Ok(distribution.sample(rng).clamp(model.min, model.max))
}

/// Generates a synthetic cohort as CSV text. The assessment score is a
/// weighted blend of the skills plus noise, so the generated data carries
/// realistic skill-to-score correlations. Deterministic for a given seed.
pub fn generate_csv(count: usize, seed: u64) -> anyhow::Result<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, SCORE_NOISE_SD).context("invalid distribution parameters")?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "student_id",
        "name",
        "class",
        "comprehension",
        "attention",
        "focus",
        "retention",
        "assessment_score",
        "engagement_time",
    ])?;

    for i in 1..=count {
        let comprehension = sample(&mut rng, &COMPREHENSION)?;
        let attention = sample(&mut rng, &ATTENTION)?;
        let focus = sample(&mut rng, &FOCUS)?;
        let retention = sample(&mut rng, &RETENTION)?;
        let engagement_time = sample(&mut rng, &ENGAGEMENT)?;

        let assessment_score = (0.28 * comprehension
            + 0.26 * attention
            + 0.20 * focus
            + 0.16 * retention
            + 0.10 * (engagement_time / 1.2)
            + noise.sample(&mut rng))
        .clamp(0.0, 100.0);

        let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
        let class_label = CLASSES[rng.gen_range(0..CLASSES.len())];

        writer.write_record([
            format!("S{i:04}"),
            format!("{first} {last}"),
            class_label.to_string(),
            format!("{:.2}", round2(comprehension)),
            format!("{:.2}", round2(attention)),
            format!("{:.2}", round2(focus)),
            format!("{:.2}", round2(retention)),
            format!("{:.2}", round2(assessment_score)),
            format!("{:.2}", round2(engagement_time)),
        ])?;
    }

    let bytes = writer.into_inner().context("flushing CSV buffer")?;
    String::from_utf8(bytes).context("generated CSV is not UTF-8")
}
