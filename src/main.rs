use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

mod analytics;
mod error;
mod generate;
mod loader;
mod models;
mod personas;
mod predict;
mod report;

use models::StudentRecord;

#[derive(Parser)]
#[command(name = "student-insights")]
#[command(about = "Cognitive skill analytics over per-student assessment records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic student dataset
    Generate {
        #[arg(long, default_value_t = 300)]
        count: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value = "students.csv")]
        out: PathBuf,
    },
    /// Print cohort averages and class distribution
    Summary {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        class: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print skill-to-score correlations
    Correlations {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        class: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Segment students into learning personas
    Personas {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        class: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Predict assessment outcome for one student (or the whole cohort)
    Predict {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        id: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write a markdown cohort report
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        class: Option<String>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn load_records(path: &Path, class: Option<&str>) -> anyhow::Result<(Vec<StudentRecord>, usize)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let outcome = loader::load_csv(&text)?;
    for reason in &outcome.skipped {
        eprintln!("warning: skipped {reason}");
    }
    let skipped = outcome.skipped.len();
    Ok((loader::filter_class(outcome.records, class), skipped))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { count, seed, out } => {
            let text = generate::generate_csv(count, seed)?;
            std::fs::write(&out, text)?;
            println!("Wrote {count} students to {}.", out.display());
        }
        Commands::Summary { csv, class, json } => {
            let (records, _) = load_records(&csv, class.as_deref())?;
            let summary = analytics::summarize(&records)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }
            println!("Students: {}", summary.total_students);
            println!("Avg assessment score: {:.2}", summary.avg_score);
            println!("Avg comprehension:    {:.2}", summary.avg_comprehension);
            println!("Avg attention:        {:.2}", summary.avg_attention);
            println!("Avg focus:            {:.2}", summary.avg_focus);
            println!("Avg retention:        {:.2}", summary.avg_retention);
            println!("Avg engagement time:  {:.2}", summary.avg_engagement);
            println!("Class distribution:");
            for (class_label, count) in &summary.class_distribution {
                println!("- {class_label}: {count}");
            }
        }
        Commands::Correlations { csv, class, json } => {
            let (records, _) = load_records(&csv, class.as_deref())?;
            let map = analytics::correlations(&records)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&map)?);
                return Ok(());
            }
            println!("Correlation with assessment score:");
            for (skill, coefficient) in &map.coefficients {
                println!("- {skill}: r = {coefficient:.2}");
            }
            for skill in &map.undefined {
                println!("- {skill}: not defined (zero variance)");
            }
        }
        Commands::Personas { csv, class, json } => {
            let (records, _) = load_records(&csv, class.as_deref())?;
            let personas = personas::segment(&records);
            if json {
                println!("{}", serde_json::to_string_pretty(&personas)?);
                return Ok(());
            }
            if personas.is_empty() {
                println!("No students to segment.");
                return Ok(());
            }
            for persona in personas {
                println!("{} ({} students)", persona.name, persona.students.len());
                println!("  {}", persona.description);
                println!(
                    "  Avg score {:.2}, comprehension {:.2}, attention {:.2}, focus {:.2}, retention {:.2}",
                    persona.avg_scores.assessment_score,
                    persona.avg_scores.comprehension,
                    persona.avg_scores.attention,
                    persona.avg_scores.focus,
                    persona.avg_scores.retention
                );
            }
        }
        Commands::Predict { csv, id, json } => {
            let (records, _) = load_records(&csv, None)?;
            let selected: Vec<&StudentRecord> = match id.as_deref() {
                Some(id) => {
                    let record = records
                        .iter()
                        .find(|record| record.id == id)
                        .with_context(|| format!("no student with id {id}"))?;
                    vec![record]
                }
                None => records.iter().collect(),
            };
            for record in selected {
                let result = predict::predict(record);
                if json {
                    println!("{}", serde_json::to_string(&result)?);
                    continue;
                }
                println!(
                    "{} ({}): predicted {:.2}, confidence {}",
                    record.name, record.id, result.predicted_score, result.confidence
                );
                for recommendation in &result.recommendations {
                    println!("  - {recommendation}");
                }
            }
        }
        Commands::Report { csv, class, out } => {
            let (records, skipped) = load_records(&csv, class.as_deref())?;
            let report = report::build_report(class.as_deref(), &records, skipped);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
