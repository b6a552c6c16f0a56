//! Grouping and reduction passes over rows fetched wholesale from the store.
//!
//! Every function here is pure: the store layer fetches the rows, calls one
//! of these, and persists or returns the output. Groups are emitted in
//! first-encounter order of the input rows.

use std::collections::{HashMap, HashSet};

use crate::entities::{CompiledResult, ExamResult, Student};
use crate::enums::{CoverageStatus, PerformanceOutcome};
use crate::responses::{ClassSubjectSummary, GradeCoverage, Performance, PerformanceEntry};

/// Display name used when a referenced subject or teacher no longer exists.
pub const UNKNOWN: &str = "Unknown";

/// Round half away from zero to `places` decimal digits.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}

/// Group `rows` for `term` by student and compute total and average marks.
///
/// Rows belonging to other terms are ignored. Averages are rounded to two
/// decimal digits; totals are exact sums.
#[must_use]
pub fn compile_term(term: &str, rows: &[ExamResult]) -> Vec<CompiledResult> {
    let mut order: Vec<i64> = Vec::new();
    let mut groups: HashMap<i64, (f64, usize)> = HashMap::new();

    for row in rows.iter().filter(|r| r.term == term) {
        let entry = groups.entry(row.student_id).or_insert_with(|| {
            order.push(row.student_id);
            (0.0, 0)
        });
        entry.0 += row.marks;
        entry.1 += 1;
    }

    order
        .into_iter()
        .map(|student_id| {
            let (total, count) = groups[&student_id];
            #[allow(clippy::cast_precision_loss)]
            let average = round_to(total / count as f64, 2);
            CompiledResult {
                student_id,
                term: term.to_string(),
                total_marks: total,
                average,
            }
        })
        .collect()
}

/// Per-grade upload coverage for one term.
///
/// One record is emitted per entry of `grades`, in that order, even when the
/// grade has no students. `term_rows` must already be scoped to the term.
#[must_use]
pub fn coverage_summary(
    grades: &[String],
    total_subjects: usize,
    students: &[Student],
    term_rows: &[ExamResult],
) -> Vec<GradeCoverage> {
    let grade_of: HashMap<i64, &str> = students
        .iter()
        .map(|s| (s.id, s.grade.as_str()))
        .collect();

    let mut uploaded: HashMap<&str, HashSet<i64>> = HashMap::new();
    for row in term_rows {
        if let Some(grade) = grade_of.get(&row.student_id) {
            uploaded.entry(*grade).or_default().insert(row.subject_id);
        }
    }

    grades
        .iter()
        .map(|grade| {
            let count = uploaded.get(grade.as_str()).map_or(0, HashSet::len);
            let status = if total_subjects > 0 && count == total_subjects {
                CoverageStatus::Complete
            } else {
                CoverageStatus::InProgress
            };
            GradeCoverage {
                grade: grade.clone(),
                total_subjects,
                uploaded: count,
                pending: total_subjects.saturating_sub(count),
                status,
            }
        })
        .collect()
}

#[derive(Default)]
struct SubjectTally {
    count: usize,
    sum: f64,
    teacher_id: Option<i64>,
    students: HashSet<i64>,
}

/// Per-subject submissions for every student in `grade`, across all terms.
///
/// The teacher reported for a subject is the one on the last row seen.
/// `pending` counts grade students with no row for the subject.
#[must_use]
pub fn class_results(
    grade: &str,
    students: &[Student],
    rows: &[ExamResult],
    subject_names: &HashMap<i64, String>,
    teacher_names: &HashMap<i64, String>,
) -> Vec<ClassSubjectSummary> {
    let in_grade: HashSet<i64> = students
        .iter()
        .filter(|s| s.grade == grade)
        .map(|s| s.id)
        .collect();

    let mut order: Vec<i64> = Vec::new();
    let mut tallies: HashMap<i64, SubjectTally> = HashMap::new();
    for row in rows.iter().filter(|r| in_grade.contains(&r.student_id)) {
        let tally = tallies.entry(row.subject_id).or_insert_with(|| {
            order.push(row.subject_id);
            SubjectTally::default()
        });
        tally.count += 1;
        tally.sum += row.marks;
        tally.teacher_id = Some(row.teacher_id);
        tally.students.insert(row.student_id);
    }

    order
        .into_iter()
        .filter_map(|subject_id| {
            let tally = tallies.remove(&subject_id)?;
            #[allow(clippy::cast_precision_loss)]
            let average_marks =
                (tally.count > 0).then(|| round_to(tally.sum / tally.count as f64, 1));
            Some(ClassSubjectSummary {
                subject: display_name(subject_names, Some(subject_id)),
                teacher: display_name(teacher_names, tally.teacher_id),
                uploaded: tally.count,
                pending: in_grade.len().saturating_sub(tally.students.len()),
                average_marks,
            })
        })
        .collect()
}

/// Keep only rows whose term is released. Terms absent from `released` are closed.
#[must_use]
pub fn released_performance(
    rows: &[ExamResult],
    released: &HashMap<String, bool>,
    subject_names: &HashMap<i64, String>,
) -> Performance {
    if rows.is_empty() {
        return Performance {
            entries: Vec::new(),
            outcome: PerformanceOutcome::NoRecords,
        };
    }

    let entries: Vec<PerformanceEntry> = rows
        .iter()
        .filter(|r| released.get(&r.term).copied().unwrap_or(false))
        .map(|r| PerformanceEntry {
            subject: subject_names
                .get(&r.subject_id)
                .cloned()
                .unwrap_or_else(|| "Unknown Subject".to_string()),
            marks: r.marks,
            term: r.term.clone(),
            exam_type: r.exam_type.clone(),
        })
        .collect();

    let outcome = if entries.is_empty() {
        PerformanceOutcome::NotReleased
    } else {
        PerformanceOutcome::Released
    };
    Performance { entries, outcome }
}

fn display_name(names: &HashMap<i64, String>, id: Option<i64>) -> String {
    id.and_then(|id| names.get(&id))
        .cloned()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn row(id: i64, student_id: i64, subject_id: i64, term: &str, marks: f64) -> ExamResult {
        ExamResult {
            id,
            student_id,
            subject_id,
            teacher_id: 100 + subject_id,
            term: term.into(),
            exam_type: "Final".into(),
            marks,
            created_at: Utc::now(),
        }
    }

    fn student(id: i64, grade: &str) -> Student {
        Student {
            id,
            reg_no: Some(format!("BP{id:05}")),
            name: format!("Student {id}"),
            gender: None,
            date_of_birth: None,
            grade: grade.into(),
            created_at: Utc::now(),
        }
    }

    fn grades() -> Vec<String> {
        (1..=9).map(|i| format!("Grade {i}")).collect()
    }

    #[test]
    fn round_half_away_from_zero() {
        assert!((round_to(84.125, 2) - 84.13).abs() < 1e-9);
        assert!((round_to(72.25, 1) - 72.3).abs() < 1e-9);
        assert!((round_to(-0.5, 0) + 1.0).abs() < 1e-9);
        assert!((round_to(85.0, 2) - 85.0).abs() < 1e-9);
    }

    #[test]
    fn compile_two_subjects_for_one_student() {
        let rows = vec![row(1, 1, 1, "2025-T1", 80.0), row(2, 1, 2, "2025-T1", 90.0)];
        let compiled = compile_term("2025-T1", &rows);
        assert_eq!(
            compiled,
            vec![CompiledResult {
                student_id: 1,
                term: "2025-T1".into(),
                total_marks: 170.0,
                average: 85.0,
            }]
        );
    }

    #[test]
    fn compile_keeps_encounter_order_and_ignores_other_terms() {
        let rows = vec![
            row(1, 7, 1, "2025-T1", 50.0),
            row(2, 3, 1, "2025-T1", 60.0),
            row(3, 7, 2, "2025-T2", 99.0),
            row(4, 3, 2, "2025-T1", 61.0),
        ];
        let compiled = compile_term("2025-T1", &rows);
        let ids: Vec<i64> = compiled.iter().map(|c| c.student_id).collect();
        assert_eq!(ids, vec![7, 3]);
        assert!((compiled[0].total_marks - 50.0).abs() < 1e-9);
        assert!((compiled[1].average - 60.5).abs() < 1e-9);
    }

    #[test]
    fn compiled_totals_preserve_raw_sum() {
        let rows: Vec<ExamResult> = (0..40)
            .map(|i| row(i, i % 7, i % 5, "2025-T3", f64::from(i32::try_from(i).unwrap()) * 1.5))
            .collect();
        let raw: f64 = rows.iter().map(|r| r.marks).sum();
        let compiled: f64 = compile_term("2025-T3", &rows)
            .iter()
            .map(|c| c.total_marks)
            .sum();
        assert!((raw - compiled).abs() < 1e-9);
    }

    #[test]
    fn compile_of_empty_term_is_empty() {
        assert!(compile_term("2030-T1", &[row(1, 1, 1, "2025-T1", 10.0)]).is_empty());
    }

    #[test]
    fn coverage_three_of_five_subjects() {
        let students = vec![student(1, "Grade 3"), student(2, "Grade 3"), student(3, "Grade 4")];
        let rows = vec![
            row(1, 1, 1, "2025-T1", 70.0),
            row(2, 2, 1, "2025-T1", 71.0),
            row(3, 1, 2, "2025-T1", 72.0),
            row(4, 2, 3, "2025-T1", 73.0),
            row(5, 3, 4, "2025-T1", 74.0),
        ];
        let summary = coverage_summary(&grades(), 5, &students, &rows);
        assert_eq!(summary.len(), 9);

        let grade3 = &summary[2];
        assert_eq!(
            grade3,
            &GradeCoverage {
                grade: "Grade 3".into(),
                total_subjects: 5,
                uploaded: 3,
                pending: 2,
                status: CoverageStatus::InProgress,
            }
        );
        assert_eq!(summary[3].uploaded, 1);
        assert_eq!(summary[0].uploaded, 0);
        assert_eq!(summary[0].pending, 5);
    }

    #[test]
    fn coverage_complete_when_all_subjects_uploaded() {
        let students = vec![student(1, "Grade 1")];
        let rows = vec![row(1, 1, 1, "T", 1.0), row(2, 1, 2, "T", 2.0)];
        let summary = coverage_summary(&grades(), 2, &students, &rows);
        assert_eq!(summary[0].status, CoverageStatus::Complete);
        assert_eq!(summary[0].pending, 0);
    }

    #[test]
    fn coverage_never_complete_without_subjects() {
        let summary = coverage_summary(&grades(), 0, &[], &[]);
        assert!(summary
            .iter()
            .all(|g| g.status == CoverageStatus::InProgress && g.pending == 0));
    }

    #[test]
    fn coverage_ignores_grades_outside_the_configured_list() {
        let students = vec![student(1, "Form 2")];
        let rows = vec![row(1, 1, 1, "T", 50.0)];
        let summary = coverage_summary(&grades(), 1, &students, &rows);
        assert!(summary.iter().all(|g| g.uploaded == 0));
    }

    #[test]
    fn class_results_group_by_subject() {
        let students = vec![student(1, "Grade 5"), student(2, "Grade 5"), student(3, "Grade 6")];
        let rows = vec![
            row(1, 1, 1, "2025-T1", 80.0),
            row(2, 2, 1, "2025-T2", 75.0),
            row(3, 1, 2, "2025-T1", 64.0),
            row(4, 3, 1, "2025-T1", 10.0),
        ];
        let subjects = HashMap::from([(1, "Maths".to_string()), (2, "English".to_string())]);
        let teachers = HashMap::from([(101, "Mr. Banda".to_string())]);

        let summary = class_results("Grade 5", &students, &rows, &subjects, &teachers);
        assert_eq!(
            summary,
            vec![
                ClassSubjectSummary {
                    subject: "Maths".into(),
                    teacher: "Mr. Banda".into(),
                    uploaded: 2,
                    pending: 0,
                    average_marks: Some(77.5),
                },
                ClassSubjectSummary {
                    subject: "English".into(),
                    teacher: UNKNOWN.into(),
                    uploaded: 1,
                    pending: 1,
                    average_marks: Some(64.0),
                },
            ]
        );
    }

    #[test]
    fn class_results_teacher_is_last_seen() {
        let students = vec![student(1, "Grade 2")];
        let mut first = row(1, 1, 1, "T", 50.0);
        first.teacher_id = 1;
        let mut second = row(2, 1, 1, "T", 60.0);
        second.teacher_id = 2;
        let teachers = HashMap::from([(1, "A".to_string()), (2, "B".to_string())]);
        let summary = class_results("Grade 2", &students, &[first, second], &HashMap::new(), &teachers);
        assert_eq!(summary[0].teacher, "B");
        assert_eq!(summary[0].subject, UNKNOWN);
    }

    #[test]
    fn performance_distinguishes_empty_cases() {
        let subjects = HashMap::from([(1, "Maths".to_string())]);
        let none = released_performance(&[], &HashMap::new(), &subjects);
        assert_eq!(none.outcome, PerformanceOutcome::NoRecords);

        let rows = vec![row(1, 1, 1, "2025-T1", 80.0)];
        let closed = released_performance(&rows, &HashMap::new(), &subjects);
        assert_eq!(closed.outcome, PerformanceOutcome::NotReleased);
        assert!(closed.entries.is_empty());

        let withheld = HashMap::from([("2025-T1".to_string(), false)]);
        let closed = released_performance(&rows, &withheld, &subjects);
        assert_eq!(closed.outcome, PerformanceOutcome::NotReleased);
    }

    #[test]
    fn performance_filters_unreleased_terms() {
        let subjects = HashMap::from([(1, "Maths".to_string())]);
        let rows = vec![row(1, 1, 1, "2025-T1", 80.0), row(2, 1, 2, "2025-T2", 70.0)];
        let released = HashMap::from([
            ("2025-T1".to_string(), false),
            ("2025-T2".to_string(), true),
        ]);
        let perf = released_performance(&rows, &released, &subjects);
        assert_eq!(perf.outcome, PerformanceOutcome::Released);
        assert_eq!(
            perf.entries,
            vec![PerformanceEntry {
                subject: "Unknown Subject".into(),
                marks: 70.0,
                term: "2025-T2".into(),
                exam_type: "Final".into(),
            }]
        );
    }
}
