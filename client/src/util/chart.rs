//! Geometry for the stacked "vaccinated vs not" bar chart, drawn as SVG.

#[cfg(test)]
#[path = "chart_test.rs"]
mod chart_test;

use gateway::metrics::{ChartSeries, dataset_share};

pub const CHART_WIDTH: f64 = 640.0;
pub const CHART_HEIGHT: f64 = 280.0;
const PLOT_TOP: f64 = 16.0;
const PLOT_BOTTOM: f64 = 40.0;
const PLOT_LEFT: f64 = 40.0;
const BAR_FILL: f64 = 0.6;

/// One stacked bar: vaccinated segment on the bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct StackedBar {
    pub label: String,
    pub x: f64,
    pub width: f64,
    pub vaccinated_y: f64,
    pub vaccinated_height: f64,
    pub remaining_y: f64,
    pub remaining_height: f64,
    /// Tooltip text, e.g. `Vaccinated: 3 (60%)`.
    pub vaccinated_tip: String,
    pub remaining_tip: String,
}

fn plot_height() -> f64 {
    CHART_HEIGHT - PLOT_TOP - PLOT_BOTTOM
}

/// Y coordinate of the x axis.
pub fn baseline() -> f64 {
    CHART_HEIGHT - PLOT_BOTTOM
}

pub fn layout(series: &ChartSeries) -> Vec<StackedBar> {
    let count = series.labels.len();
    if count == 0 {
        return Vec::new();
    }
    let max = f64::from(series.max_stack().max(1));
    let slot = (CHART_WIDTH - PLOT_LEFT) / f64::from(u32::try_from(count).unwrap_or(u32::MAX));
    let width = slot * BAR_FILL;
    let scale = plot_height() / max;

    (0..count)
        .map(|i| {
            let vaccinated = series.vaccinated.get(i).copied().unwrap_or(0);
            let remaining = series.not_vaccinated.get(i).copied().unwrap_or(0);
            let vaccinated_height = f64::from(vaccinated) * scale;
            let remaining_height = f64::from(remaining) * scale;
            let vaccinated_y = baseline() - vaccinated_height;
            let index = f64::from(u32::try_from(i).unwrap_or(u32::MAX));
            StackedBar {
                label: series.labels[i].clone(),
                x: PLOT_LEFT + slot * index + (slot - width) / 2.0,
                width,
                vaccinated_y,
                vaccinated_height,
                remaining_y: vaccinated_y - remaining_height,
                remaining_height,
                vaccinated_tip: format!(
                    "Vaccinated: {vaccinated} ({}%)",
                    dataset_share(&series.vaccinated, i)
                ),
                remaining_tip: format!(
                    "Not Vaccinated: {remaining} ({}%)",
                    dataset_share(&series.not_vaccinated, i)
                ),
            }
        })
        .collect()
}

/// Y-axis ticks as (value, y) pairs, at most five steps.
pub fn ticks(series: &ChartSeries) -> Vec<(u32, f64)> {
    let max = series.max_stack().max(1);
    let step = max.div_ceil(5).max(1);
    let scale = plot_height() / f64::from(max);
    (0..=max)
        .step_by(usize::try_from(step).unwrap_or(1))
        .map(|value| (value, baseline() - f64::from(value) * scale))
        .collect()
}
