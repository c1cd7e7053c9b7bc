use std::collections::BTreeMap;

use super::*;
use crate::models::GradeTally;

fn metrics(trend: &[(&str, u32, u32)]) -> DashboardMetrics {
    let vaccination_trend: BTreeMap<String, GradeTally> = trend
        .iter()
        .map(|(g, v, n)| ((*g).to_owned(), GradeTally { vaccinated: *v, not_vaccinated: *n }))
        .collect();
    let total_students = trend.iter().map(|(_, v, n)| v + n).sum();
    let students_vaccinated = trend.iter().map(|(_, v, _)| v).sum();
    DashboardMetrics { total_students, students_vaccinated, vaccination_trend }
}

#[test]
fn percentage_rounds_half_up_and_guards_zero() {
    assert_eq!(percentage(0, 0), 0);
    assert_eq!(percentage(1, 3), 33);
    assert_eq!(percentage(2, 3), 67);
    assert_eq!(percentage(1, 8), 13);
    assert_eq!(percentage(5, 5), 100);
}

#[test]
fn breakdown_orders_grades_numerically() {
    let rows = grade_breakdown(&metrics(&[("10", 1, 1), ("2", 3, 1), ("9", 0, 4)]));
    let grades: Vec<&str> = rows.iter().map(|r| r.grade.as_str()).collect();
    assert_eq!(grades, vec!["2", "9", "10"]);
    assert_eq!(rows[0], GradeBreakdown { grade: "2".to_owned(), vaccinated: 3, total: 4, percentage: 75 });
}

#[test]
fn chart_series_labels_and_stacks() {
    let series = chart_series(&metrics(&[("5", 3, 1), ("6", 2, 6)]));
    assert_eq!(series.labels, vec!["Grade 5", "Grade 6"]);
    assert_eq!(series.vaccinated, vec![3, 2]);
    assert_eq!(series.not_vaccinated, vec![1, 6]);
    assert_eq!(series.max_stack(), 8);
    assert!(chart_series(&DashboardMetrics::default()).is_empty());
}

#[test]
fn dataset_share_is_relative_to_dataset_total() {
    assert_eq!(dataset_share(&[3, 1], 0), 75);
    assert_eq!(dataset_share(&[3, 1], 5), 0);
    assert_eq!(dataset_share(&[0, 0], 1), 0);
}
