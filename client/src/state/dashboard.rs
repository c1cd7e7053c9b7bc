//! Dashboard metrics and upcoming-drive state.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use gateway::listing;
use gateway::metrics::{self, ChartSeries, GradeBreakdown};
use gateway::models::{DashboardMetrics, Drive};
use time::Date;

#[derive(Clone, Debug)]
pub struct DashboardState {
    pub metrics: Option<DashboardMetrics>,
    pub upcoming: Vec<Drive>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self { metrics: None, upcoming: Vec::new(), loading: true, error: None }
    }
}

impl DashboardState {
    pub fn loaded(&mut self, result: Result<(DashboardMetrics, Vec<Drive>), String>) {
        self.loading = false;
        match result {
            Ok((metrics, upcoming)) => {
                self.metrics = Some(metrics);
                self.upcoming = upcoming;
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }

    pub fn total_students(&self) -> u32 {
        self.metrics.as_ref().map_or(0, |m| m.total_students)
    }

    pub fn vaccinated(&self) -> u32 {
        self.metrics.as_ref().map_or(0, |m| m.students_vaccinated)
    }

    pub fn remaining(&self) -> u32 {
        self.metrics.as_ref().map_or(0, DashboardMetrics::remaining)
    }

    pub fn coverage(&self) -> u32 {
        metrics::percentage(self.vaccinated(), self.total_students())
    }

    pub fn breakdown(&self) -> Vec<GradeBreakdown> {
        self.metrics.as_ref().map(metrics::grade_breakdown).unwrap_or_default()
    }

    pub fn chart(&self) -> ChartSeries {
        self.metrics.as_ref().map(metrics::chart_series).unwrap_or_default()
    }

    /// Upcoming drives with their day countdown, soonest first.
    pub fn upcoming_with_days(&self, today: Date) -> Vec<(Drive, i64)> {
        listing::upcoming_drives(&self.upcoming, today)
            .into_iter()
            .map(|(d, days)| (d.clone(), days))
            .collect()
    }
}

/// "Today", "Tomorrow" or "In N days".
pub fn countdown_label(days: i64) -> String {
    match days {
        0 => "Today".to_owned(),
        1 => "Tomorrow".to_owned(),
        n => format!("In {n} days"),
    }
}
