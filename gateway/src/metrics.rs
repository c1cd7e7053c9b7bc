//! Dashboard number crunching: coverage percentages, the per-grade list and
//! the stacked bar chart series.

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;

use crate::listing::compare_grades;
use crate::models::DashboardMetrics;

/// `round(part / total * 100)`, half away from zero; 0 when `total` is 0.
#[must_use]
pub fn percentage(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = u64::from(part) * 200 + u64::from(total);
    let rounded = scaled / (u64::from(total) * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// One line of the per-grade coverage list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradeBreakdown {
    pub grade: String,
    pub vaccinated: u32,
    pub total: u32,
    pub percentage: u32,
}

/// Per-grade coverage in numeric grade order.
#[must_use]
pub fn grade_breakdown(metrics: &DashboardMetrics) -> Vec<GradeBreakdown> {
    let mut rows: Vec<GradeBreakdown> = metrics
        .vaccination_trend
        .iter()
        .map(|(grade, tally)| GradeBreakdown {
            grade: grade.clone(),
            vaccinated: tally.vaccinated,
            total: tally.total(),
            percentage: percentage(tally.vaccinated, tally.total()),
        })
        .collect();
    rows.sort_by(|a, b| compare_grades(&a.grade, &b.grade));
    rows
}

/// Data behind the stacked "vaccinated vs not" bar chart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub vaccinated: Vec<u32>,
    pub not_vaccinated: Vec<u32>,
}

impl ChartSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Tallest stacked bar, used to scale the y axis.
    #[must_use]
    pub fn max_stack(&self) -> u32 {
        self.vaccinated
            .iter()
            .zip(&self.not_vaccinated)
            .map(|(v, n)| v.saturating_add(*n))
            .max()
            .unwrap_or(0)
    }
}

#[must_use]
pub fn chart_series(metrics: &DashboardMetrics) -> ChartSeries {
    let mut series = ChartSeries::default();
    for row in grade_breakdown(metrics) {
        series.labels.push(format!("Grade {}", row.grade));
        series.vaccinated.push(row.vaccinated);
        series.not_vaccinated.push(row.total - row.vaccinated);
    }
    series
}

/// Share of one bar within its dataset, as shown in the chart tooltip.
#[must_use]
pub fn dataset_share(values: &[u32], index: usize) -> u32 {
    let total = values.iter().fold(0_u32, |acc, v| acc.saturating_add(*v));
    values.get(index).map_or(0, |value| percentage(*value, total))
}
