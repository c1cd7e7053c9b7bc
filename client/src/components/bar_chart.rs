//! Stacked per-grade coverage chart rendered as inline SVG.

use gateway::metrics::ChartSeries;
use leptos::prelude::*;

use crate::util::chart::{self, CHART_HEIGHT, CHART_WIDTH};

#[component]
pub fn BarChart(#[prop(into)] series: Signal<ChartSeries>) -> impl IntoView {
    let view_box = format!("0 0 {CHART_WIDTH} {CHART_HEIGHT}");
    let label_y = chart::baseline() + 18.0;

    view! {
        <div class="chart">
            <div class="chart__legend">
                <span class="chart__key chart__key--vaccinated">"Vaccinated"</span>
                <span class="chart__key chart__key--remaining">"Not Vaccinated"</span>
            </div>
            <Show
                when=move || !series.get().is_empty()
                fallback=|| view! { <p class="chart__empty">"No vaccination data yet"</p> }
            >
                <svg class="chart__svg" viewBox=view_box.clone() role="img" aria-label="Vaccination by grade">
                    {move || {
                        chart::ticks(&series.get())
                            .into_iter()
                            .map(|(value, y)| {
                                view! {
                                    <g class="chart__tick">
                                        <line x1="40" x2=CHART_WIDTH y1=y y2=y/>
                                        <text x="32" y=y text-anchor="end">{value}</text>
                                    </g>
                                }
                            })
                            .collect_view()
                    }}
                    {move || {
                        chart::layout(&series.get())
                            .into_iter()
                            .map(|bar| {
                                let label_x = bar.x + bar.width / 2.0;
                                view! {
                                    <g class="chart__bar">
                                        <rect
                                            class="chart__segment chart__segment--vaccinated"
                                            x=bar.x
                                            y=bar.vaccinated_y
                                            width=bar.width
                                            height=bar.vaccinated_height
                                        >
                                            <title>{bar.vaccinated_tip}</title>
                                        </rect>
                                        <rect
                                            class="chart__segment chart__segment--remaining"
                                            x=bar.x
                                            y=bar.remaining_y
                                            width=bar.width
                                            height=bar.remaining_height
                                        >
                                            <title>{bar.remaining_tip}</title>
                                        </rect>
                                        <text class="chart__label" x=label_x y=label_y text-anchor="middle">
                                            {bar.label}
                                        </text>
                                    </g>
                                }
                            })
                            .collect_view()
                    }}
                </svg>
            </Show>
        </div>
    }
}
