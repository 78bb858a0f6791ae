use crate::analytics;
use crate::models::{Persona, StudentRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaKind {
    HighPerformers,
    FocusedLearners,
    StrugglingStudents,
    InconsistentPerformers,
}

/// Canonical rule order. Classification walks this list top-down and output
/// personas appear in this order.
pub const PERSONA_ORDER: [PersonaKind; 4] = [
    PersonaKind::HighPerformers,
    PersonaKind::FocusedLearners,
    PersonaKind::StrugglingStudents,
    PersonaKind::InconsistentPerformers,
];

impl PersonaKind {
    pub fn id(&self) -> &'static str {
        match self {
            PersonaKind::HighPerformers => "high-performers",
            PersonaKind::FocusedLearners => "focused-learners",
            PersonaKind::StrugglingStudents => "struggling-students",
            PersonaKind::InconsistentPerformers => "inconsistent-performers",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PersonaKind::HighPerformers => "High Performers",
            PersonaKind::FocusedLearners => "Focused Learners",
            PersonaKind::StrugglingStudents => "Struggling Students",
            PersonaKind::InconsistentPerformers => "Inconsistent Performers",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PersonaKind::HighPerformers => {
                "Students with excellent overall cognitive skills and high assessment scores"
            }
            PersonaKind::FocusedLearners => {
                "Students with strong focus and attention but moderate comprehension"
            }
            PersonaKind::StrugglingStudents => {
                "Students who need additional support across multiple cognitive areas"
            }
            PersonaKind::InconsistentPerformers => {
                "Students with mixed cognitive skills and variable performance"
            }
        }
    }

    pub fn characteristics(&self) -> Vec<&'static str> {
        match self {
            PersonaKind::HighPerformers => vec![
                "High comprehension",
                "Strong attention",
                "Excellent retention",
                "High scores",
            ],
            PersonaKind::FocusedLearners => vec![
                "Excellent focus",
                "Good attention",
                "Moderate comprehension",
                "Consistent performance",
            ],
            PersonaKind::StrugglingStudents => vec![
                "Low comprehension",
                "Attention challenges",
                "Lower retention",
                "Need support",
            ],
            PersonaKind::InconsistentPerformers => vec![
                "Variable skills",
                "Inconsistent scores",
                "Potential for growth",
                "Need targeted help",
            ],
        }
    }
}

/// Mean of the four cognitive skills (engagement time excluded).
pub fn avg_cognitive(record: &StudentRecord) -> f64 {
    (record.comprehension + record.attention + record.focus + record.retention) / 4.0
}

/// First-match-wins over the fixed rule sequence. Order matters: a student
/// satisfying both the high-performer and struggling predicates is a high
/// performer because that rule is tested first.
pub fn classify(record: &StudentRecord) -> PersonaKind {
    let cognitive = avg_cognitive(record);
    if record.assessment_score >= 80.0 && cognitive >= 75.0 {
        PersonaKind::HighPerformers
    } else if record.focus >= 70.0 && record.attention >= 70.0 {
        PersonaKind::FocusedLearners
    } else if record.assessment_score < 60.0 || cognitive < 60.0 {
        PersonaKind::StrugglingStudents
    } else {
        PersonaKind::InconsistentPerformers
    }
}

/// Partitions students into personas. Members keep source order within each
/// persona; personas with no members are dropped from the result.
pub fn segment(records: &[StudentRecord]) -> Vec<Persona> {
    let mut groups: [Vec<StudentRecord>; 4] = Default::default();
    for record in records {
        let slot = PERSONA_ORDER
            .iter()
            .position(|kind| *kind == classify(record))
            .unwrap_or(PERSONA_ORDER.len() - 1);
        groups[slot].push(record.clone());
    }

    PERSONA_ORDER
        .iter()
        .zip(groups)
        .filter_map(|(kind, members)| {
            // Averaging fails only on an empty group, which is exactly the
            // case the output must drop.
            let avg_scores = analytics::group_averages(&members).ok()?;
            Some(Persona {
                id: kind.id(),
                name: kind.name(),
                description: kind.description(),
                characteristics: kind.characteristics(),
                students: members,
                avg_scores,
            })
        })
        .collect()
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
    fn sample_cohort_lands_in_expected_personas() {
        let personas = segment(&sample_cohort());
        assert_eq!(personas.len(), 3);

        assert_eq!(personas[0].id, "high-performers");
        assert_eq!(personas[0].students[0].id, "S0001");
        assert_eq!(personas[1].id, "struggling-students");
        assert_eq!(personas[1].students[0].id, "S0002");
        assert_eq!(personas[2].id, "inconsistent-performers");
        assert_eq!(personas[2].students[0].id, "S0003");
    }

    #[test]
    fn every_student_appears_in_exactly_one_persona() {
        let records = sample_cohort();
        let personas = segment(&records);
        let mut seen: Vec<&str> = personas
            .iter()
            .flat_map(|p| p.students.iter().map(|s| s.id.as_str()))
            .collect();
        seen.sort();
        assert_eq!(seen, vec!["S0001", "S0002", "S0003"]);
    }

    #[test]
    fn earlier_rules_take_precedence() {
        // Satisfies rule 1 and rule 2; rule 1 wins because it is tested first.
        let record = student("S0100", [90.0, 80.0, 75.0, 80.0, 85.0, 10.0]);
        assert_eq!(classify(&record), PersonaKind::HighPerformers);

        // Sub-60 score would match the struggling rule, but high focus and
        // attention hit rule 2 first.
        let record = student("S0101", [95.0, 90.0, 90.0, 95.0, 55.0, 10.0]);
        assert_eq!(classify(&record), PersonaKind::FocusedLearners);
    }

    #[test]
    fn focused_learner_thresholds_are_inclusive() {
        let record = student("S0102", [50.0, 70.0, 70.0, 50.0, 65.0, 10.0]);
        assert_eq!(classify(&record), PersonaKind::FocusedLearners);
    }

    #[test]
    fn struggling_rule_fires_on_either_clause() {
        // Low score, decent cognitive.
        let by_score = student("S0103", [65.0, 65.0, 65.0, 65.0, 55.0, 10.0]);
        assert_eq!(classify(&by_score), PersonaKind::StrugglingStudents);
        // Decent score, low cognitive.
        let by_cognitive = student("S0104", [50.0, 55.0, 60.0, 55.0, 70.0, 10.0]);
        assert_eq!(classify(&by_cognitive), PersonaKind::StrugglingStudents);
    }

    #[test]
    fn catch_all_takes_the_rest() {
        // Score 65 (not <60), cognitive 65 (not <60, not >=75), focus below 70.
        let record = student("S0105", [65.0, 65.0, 65.0, 65.0, 65.0, 10.0]);
        assert_eq!(classify(&record), PersonaKind::InconsistentPerformers);
    }

    #[test]
    fn empty_personas_are_dropped() {
        let records = vec![student("S0001", [90.0, 85.0, 80.0, 88.0, 92.0, 40.0])];
        let personas = segment(&records);
        assert_eq!(personas.len(), 1);
        assert_eq!(personas[0].id, "high-performers");
    }

    #[test]
    fn persona_averages_cover_members_only() {
        let records = vec![
            student("S0001", [90.0, 85.0, 80.0, 88.0, 92.0, 40.0]),
            student("S0002", [80.0, 80.0, 80.0, 80.0, 85.0, 30.0]),
            student("S0003", [20.0, 20.0, 20.0, 20.0, 20.0, 5.0]),
        ];
        let personas = segment(&records);
        let high = personas.iter().find(|p| p.id == "high-performers").unwrap();
        assert_eq!(high.students.len(), 2);
        assert_eq!(high.avg_scores.comprehension, 85.0);
        assert_eq!(high.avg_scores.assessment_score, 88.5);
        assert_eq!(high.avg_scores.engagement_time, 35.0);
    }

    #[test]
    fn members_keep_source_order() {
        let records = vec![
            student("S0010", [90.0, 85.0, 80.0, 88.0, 92.0, 40.0]),
            student("S0002", [85.0, 80.0, 85.0, 90.0, 90.0, 35.0]),
            student("S0007", [95.0, 90.0, 88.0, 92.0, 95.0, 50.0]),
        ];
        let personas = segment(&records);
        let ids: Vec<&str> = personas[0].students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S0010", "S0002", "S0007"]);
    }
}
