use crate::error::AnalyticsError;
use crate::models::{NumericField, StudentRecord};

/// Column order for the numeric tail of a row. The header line is discarded;
/// position is the contract, not the header text.
const NUMERIC_COLUMNS: [(usize, NumericField); 6] = [
    (3, NumericField::Comprehension),
    (4, NumericField::Attention),
    (5, NumericField::Focus),
    (6, NumericField::Retention),
    (7, NumericField::AssessmentScore),
    (8, NumericField::EngagementTime),
];

const FIELDS_PER_ROW: usize = 9;

#[derive(Debug)]
pub struct LoadOutcome {
    pub records: Vec<StudentRecord>,
    pub skipped: Vec<AnalyticsError>,
}

/// Parses CSV text into records. Rows with a short field count or an
/// unparseable numeric field are skipped and reported in the outcome, never
/// loaded as NaN. Row numbers in skip reasons are 1-based over data rows.
pub fn load_csv(text: &str) -> anyhow::Result<LoadOutcome> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let row_number = index + 1;

        if row.len() < FIELDS_PER_ROW {
            skipped.push(AnalyticsError::ShortRecord {
                row: row_number,
                expected: FIELDS_PER_ROW,
                got: row.len(),
            });
            continue;
        }

        match parse_row(&row, row_number) {
            Ok(record) => records.push(record),
            Err(reason) => skipped.push(reason),
        }
    }

    Ok(LoadOutcome { records, skipped })
}

fn parse_row(row: &csv::StringRecord, row_number: usize) -> Result<StudentRecord, AnalyticsError> {
    let mut values = [0.0f64; 6];
    for (slot, (position, field)) in NUMERIC_COLUMNS.iter().enumerate() {
        let raw = row.get(*position).unwrap_or("").trim();
        values[slot] = raw
            .parse::<f64>()
            .map_err(|_| AnalyticsError::MalformedRecord {
                row: row_number,
                field: *field,
                value: raw.to_string(),
            })?;
    }

    Ok(StudentRecord {
        id: row.get(0).unwrap_or("").trim().to_string(),
        name: row.get(1).unwrap_or("").trim().to_string(),
        class_label: row.get(2).unwrap_or("").trim().to_string(),
        comprehension: values[0],
        attention: values[1],
        focus: values[2],
        retention: values[3],
        assessment_score: values[4],
        engagement_time: values[5],
    })
}

/// Scope helper for the CLI's `--class` flag.
pub fn filter_class(records: Vec<StudentRecord>, class_label: Option<&str>) -> Vec<StudentRecord> {
    match class_label {
        Some(label) => records
            .into_iter()
            .filter(|record| record.class_label == label)
            .collect(),
        None => records,
    }
}
