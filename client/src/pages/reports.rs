//! Drive reports: search, date filter and PDF/CSV/Excel exports, per drive
//! or for all drives at once.

use gateway::dates;
use gateway::models::Drive;
use gateway::reports::ReportFormat;
use leptos::prelude::*;

use crate::components::error_banner::ErrorBanner;
use crate::components::pagination::Pagination;
use crate::net::api::{DashboardApi, error_message, use_api};
use crate::state::reports::{ExportTarget, ReportsState, download_failure};
use crate::util::download;

fn load(api: DashboardApi, state: RwSignal<ReportsState>) {
    if state.try_update(|s| s.loading = true).is_none() {
        return;
    }
    leptos::task::spawn_local(async move {
        let result = api
            .list_drives(false)
            .await
            .map_err(|e| error_message(&e, "Failed to load reports"));
        let _ = state.try_update(|s| s.loaded(result));
    });
}

fn export(api: DashboardApi, state: RwSignal<ReportsState>, target: ExportTarget, format: ReportFormat) {
    let mut started = false;
    state.update(|s| started = s.start_download(target));
    if !started {
        return;
    }
    leptos::task::spawn_local(async move {
        let file = match target {
            ExportTarget::Drive(id) => api.download_drive_report(id, format).await,
            ExportTarget::All => api.download_all_reports(format).await,
        };
        let result = match file {
            Ok(file) => download::save_report(&file).map_err(|e| {
                leptos::logging::warn!("{e}");
                download_failure(target, format)
            }),
            Err(e) => Err(error_message(&e, &download_failure(target, format))),
        };
        let _ = state.try_update(|s| s.finish_download(result));
    });
}

#[component]
fn ExportMenu(target: ExportTarget, state: RwSignal<ReportsState>, on_export: Callback<(ExportTarget, ReportFormat)>) -> impl IntoView {
    let idle_label = match target {
        ExportTarget::Drive(_) => "Export",
        ExportTarget::All => "Export All Reports",
    };

    view! {
        <div class="export">
            <button
                class="btn export__toggle"
                disabled=move || state.get().is_downloading(target)
                on:click=move |_| state.update(|s| s.toggle_menu(target))
            >
                {move || if state.get().is_downloading(target) { "Exporting..." } else { idle_label }}
            </button>
            <Show when=move || state.get().menu == Some(target)>
                <div class="export__menu">
                    {ReportFormat::ALL
                        .into_iter()
                        .map(|format| {
                            view! {
                                <button class="export__item" on:click=move |_| on_export.run((target, format))>
                                    {format.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let api = use_api();
    let state = RwSignal::new(ReportsState::default());

    load(api.clone(), state);

    let on_retry = {
        let api = api.clone();
        Callback::new(move |()| load(api.clone(), state))
    };
    let on_export = Callback::new(move |(target, format): (ExportTarget, ReportFormat)| {
        export(api.clone(), state, target, format);
    });
    let on_page = Callback::new(move |page: usize| state.update(|s| s.set_page(page)));

    let report_row = move |drive: Drive| {
        let when = drive.calendar_date().map_or_else(|| drive.date.clone(), dates::format_numeric);
        let grades = if drive.target_grades.trim().is_empty() { "All".to_owned() } else { drive.target_grades };
        view! {
            <tr>
                <td class="table__strong">{drive.name}</td>
                <td>{when}</td>
                <td>{grades}</td>
                <td class="table__actions">
                    <ExportMenu target=ExportTarget::Drive(drive.id) state=state on_export=on_export/>
                </td>
            </tr>
        }
    };

    view! {
        <div class="page">
            <div class="page__header">
                <h1>"Vaccination Reports"</h1>
            </div>

            <div class="filters">
                <label class="filters__field">
                    <span>"Search by name"</span>
                    <input
                        type="text"
                        placeholder="Search reports..."
                        prop:value=move || state.get().search
                        on:input=move |ev| state.update(|s| s.set_search(event_target_value(&ev)))
                    />
                </label>
                <label class="filters__field">
                    <span>"Filter by date"</span>
                    <input
                        type="date"
                        prop:value=move || state.get().date_input()
                        on:input=move |ev| state.update(|s| s.set_date(&event_target_value(&ev)))
                    />
                </label>
                <ExportMenu target=ExportTarget::All state=state on_export=on_export/>
            </div>

            <Show when=move || state.get().download_error.is_some()>
                <p class="page__error" role="alert">{move || state.get().download_error.unwrap_or_default()}</p>
            </Show>

            <Show when=move || state.get().error.is_some()>
                <ErrorBanner message=Signal::derive(move || state.get().error.unwrap_or_default()) on_retry=on_retry/>
            </Show>

            <Show
                when=move || !state.get().loading
                fallback=|| view! { <p class="page__loading">"Loading..."</p> }
            >
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Drive Name"</th>
                            <th>"Date"</th>
                            <th>"Target Grades"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || state.get().visible().into_iter().map(report_row).collect_view()}
                    </tbody>
                </table>
                <Show when=move || state.get().show_pagination()>
                    <Pagination info=Signal::derive(move || state.get().page_info()) on_page=on_page/>
                </Show>
            </Show>
        </div>
    }
}
