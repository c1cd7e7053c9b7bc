//! Coverage overview: headline metrics, the per-grade chart and list, and
//! the next scheduled drives.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route (`/` and `/dashboard`). It loads
//! metrics and upcoming drives once on mount and again on "Refresh Data".

use gateway::dates;
use gateway::error::ApiError;
use leptos::prelude::*;

use crate::components::bar_chart::BarChart;
use crate::components::error_banner::ErrorBanner;
use crate::net::api::{DashboardApi, error_message, use_api};
use crate::state::dashboard::{DashboardState, countdown_label};
use crate::state::session::SessionContext;
use crate::util::clock;

const LOAD_FAILED_MESSAGE: &str = "Failed to load dashboard data";

fn load(api: DashboardApi, state: RwSignal<DashboardState>) {
    if state.try_update(|s| s.loading = true).is_none() {
        return;
    }
    leptos::task::spawn_local(async move {
        let result = async {
            let metrics = api.dashboard_metrics().await?;
            let upcoming = api.list_drives(true).await?;
            Ok::<_, ApiError>((metrics, upcoming))
        }
        .await
        .map_err(|e| error_message(&e, LOAD_FAILED_MESSAGE));
        let _ = state.try_update(|s| s.loaded(result));
    });
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let session = expect_context::<SessionContext>();
    let state = RwSignal::new(DashboardState::default());

    load(api.clone(), state);

    let on_refresh = {
        let api = api.clone();
        move |_| {
            if !state.get_untracked().loading {
                load(api.clone(), state);
            }
        }
    };
    let on_retry = Callback::new(move |()| load(api.clone(), state));

    let greeting = move || match session.username() {
        Some(name) => format!("Welcome, {name}!"),
        None => "Welcome!".to_owned(),
    };

    let cards = move || {
        let s = state.get();
        let total = s.total_students();
        let vaccinated = s.vaccinated();
        [
            ("Vaccination Percentage", format!("{}%", s.coverage()), format!("{vaccinated} out of {total} students")),
            ("Students Vaccinated", vaccinated.to_string(), format!("{} remaining", s.remaining())),
            ("Total Students", total.to_string(), "Across all grades".to_owned()),
            ("Upcoming Drives", s.upcoming.len().to_string(), "Scheduled vaccinations".to_owned()),
        ]
        .into_iter()
        .map(|(title, value, caption)| {
            view! {
                <div class="metric-card">
                    <h3 class="metric-card__title">{title}</h3>
                    <p class="metric-card__value">{value}</p>
                    <p class="metric-card__caption">{caption}</p>
                </div>
            }
        })
        .collect_view()
    };

    let grade_list = move || {
        state
            .get()
            .breakdown()
            .into_iter()
            .map(|row| {
                let width = format!("width: {}%", row.percentage);
                view! {
                    <div class="grade-row">
                        <div class="grade-row__head">
                            <h3>{format!("Grade {}", row.grade)}</h3>
                            <p>
                                <span class="grade-row__vaccinated">{row.vaccinated}</span>
                                {format!(" / {}", row.total)}
                            </p>
                        </div>
                        <div class="progress">
                            <div class="progress__fill" style=width></div>
                        </div>
                        <p class="grade-row__caption">{format!("{}% vaccinated", row.percentage)}</p>
                    </div>
                }
            })
            .collect_view()
    };

    let upcoming = move || {
        let drives = state.get().upcoming_with_days(clock::today());
        if drives.is_empty() {
            return view! { <p class="dashboard__empty">"No upcoming vaccination drives"</p> }.into_any();
        }
        drives
            .into_iter()
            .map(|(drive, days)| {
                let when = drive
                    .calendar_date()
                    .map_or_else(|| drive.date.clone(), dates::format_with_weekday);
                view! {
                    <div class="upcoming-row">
                        <div>
                            <p class="upcoming-row__name">{drive.name}</p>
                            <p class="upcoming-row__date">{when}</p>
                        </div>
                        <span class="badge">{countdown_label(days)}</span>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="dashboard">
            <div class="dashboard__header">
                <h1>{greeting}</h1>
                <button class="btn btn--primary" on:click=on_refresh disabled=move || state.get().loading>
                    {move || if state.get().loading { "Refreshing..." } else { "Refresh Data" }}
                </button>
            </div>

            <Show when=move || state.get().error.is_some()>
                <ErrorBanner message=Signal::derive(move || state.get().error.unwrap_or_default()) on_retry=on_retry/>
            </Show>

            <Show
                when=move || state.get().metrics.is_some()
                fallback=move || {
                    view! {
                        <Show when=move || state.get().loading>
                            <p class="dashboard__loading">"Loading dashboard..."</p>
                        </Show>
                    }
                }
            >
                <div class="dashboard__cards">{cards}</div>

                <div class="dashboard__panels">
                    <section class="panel panel--wide">
                        <h2>"Vaccination Trend"</h2>
                        <BarChart series=Signal::derive(move || state.get().chart())/>
                    </section>
                    <section class="panel">
                        <h2>"Vaccinations by Class"</h2>
                        <div class="grade-list">{grade_list}</div>
                    </section>
                </div>

                <section class="panel">
                    <div class="panel__head">
                        <h2>"Upcoming Vaccination Drives"</h2>
                        <span class="panel__hint">"Next 30 days"</span>
                    </div>
                    <div class="upcoming-list">{upcoming}</div>
                </section>
            </Show>
        </div>
    }
}
