//! Vaccination drives: search, paged cards and the add/edit dialog.

use gateway::dates;
use gateway::models::{Drive, DriveInput};
use leptos::prelude::*;

use crate::components::drive_modal::DriveModal;
use crate::components::error_banner::ErrorBanner;
use crate::components::pagination::Pagination;
use crate::net::api::{DashboardApi, error_message, use_api};
use crate::state::drives::{DriveEditor, DrivesState};
use crate::util::browser;

fn load(api: DashboardApi, state: RwSignal<DrivesState>) {
    if state.try_update(|s| s.loading = true).is_none() {
        return;
    }
    leptos::task::spawn_local(async move {
        let result = api
            .list_drives(false)
            .await
            .map_err(|e| error_message(&e, "Failed to load drives"));
        let _ = state.try_update(|s| s.loaded(result));
    });
}

#[component]
pub fn DrivesPage() -> impl IntoView {
    let api = use_api();
    let state = RwSignal::new(DrivesState::default());
    let editor = RwSignal::new(DriveEditor::default());
    let modal_open = RwSignal::new(false);

    load(api.clone(), state);

    let on_retry = {
        let api = api.clone();
        Callback::new(move |()| load(api.clone(), state))
    };

    let open_editor = move |next: DriveEditor| {
        editor.set(next);
        modal_open.set(true);
    };
    let on_close = Callback::new(move |()| modal_open.set(false));

    let on_save = {
        let api = api.clone();
        Callback::new(move |input: DriveInput| {
            let existing = editor.get_untracked().editing;
            editor.update(|e| e.saving = true);
            let api = api.clone();
            leptos::task::spawn_local(async move {
                let result = match existing {
                    Some(id) => api.update_drive(id, &input).await,
                    None => api.create_drive(&input).await,
                };
                match result {
                    Ok(_) => {
                        let _ = modal_open.try_set(false);
                        load(api, state);
                    }
                    Err(e) => {
                        let _ = editor.try_update(|ed| {
                            ed.saving = false;
                            ed.error = Some(error_message(&e, "Failed to save drive"));
                        });
                    }
                }
            });
        })
    };

    let on_delete = {
        let api = api.clone();
        Callback::new(move |id: i64| {
            if !browser::confirm("Are you sure you want to delete this drive?") {
                return;
            }
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.delete_drive(id).await {
                    Ok(()) => load(api, state),
                    Err(e) => {
                        let _ = state.try_update(|s| s.error = Some(error_message(&e, "Failed to delete drive")));
                    }
                }
            });
        })
    };

    let on_page = Callback::new(move |page: usize| state.update(|s| s.set_page(page)));

    let drive_card = move |drive: Drive| {
        let when = drive.calendar_date().map_or_else(|| drive.date.clone(), dates::format_long);
        let id = drive.id;
        let for_edit = drive.clone();
        view! {
            <div class="drive-card">
                <div class="drive-card__body">
                    <h3>{drive.name}</h3>
                    <p class="drive-card__date">{when}</p>
                    <p class="drive-card__grades">{format!("Target Grades: {}", drive.target_grades)}</p>
                </div>
                <div class="drive-card__actions">
                    <button class="btn btn--link" on:click=move |_| open_editor(DriveEditor::for_drive(&for_edit))>
                        "Edit"
                    </button>
                    <button class="btn btn--link btn--danger" on:click=move |_| on_delete.run(id)>
                        "Delete"
                    </button>
                </div>
            </div>
        }
    };

    view! {
        <div class="page">
            <div class="page__header">
                <h1>"Vaccination Drives"</h1>
                <button class="btn btn--primary" on:click=move |_| open_editor(DriveEditor::default())>
                    "Add Drive"
                </button>
            </div>

            <input
                class="page__search"
                type="text"
                placeholder="Search drives..."
                prop:value=move || state.get().search
                on:input=move |ev| state.update(|s| s.set_search(event_target_value(&ev)))
            />

            <Show when=move || state.get().error.is_some()>
                <ErrorBanner message=Signal::derive(move || state.get().error.unwrap_or_default()) on_retry=on_retry/>
            </Show>

            <Show
                when=move || !state.get().loading
                fallback=|| view! { <p class="page__loading">"Loading..."</p> }
            >
                <div class="drive-grid">
                    {move || state.get().visible().into_iter().map(drive_card).collect_view()}
                </div>
                <Show when=move || state.get().show_pagination()>
                    <Pagination info=Signal::derive(move || state.get().page_info()) on_page=on_page/>
                </Show>
            </Show>

            <Show when=move || modal_open.get()>
                <DriveModal editor=editor on_close=on_close on_save=on_save/>
            </Show>
        </div>
    }
}
