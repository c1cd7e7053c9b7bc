//! Student registry: search, grade chips, the paged table and the
//! single-entry / bulk CSV dialog.
//!
//! The table joins three lists (students, vaccination records, drives),
//! fetched one after another on every load.

use gateway::error::ApiError;
use gateway::listing::{self, NO_DRIVE_LABEL};
use gateway::models::StudentSubmission;
use leptos::prelude::*;

use crate::components::error_banner::ErrorBanner;
use crate::components::pagination::Pagination;
use crate::components::student_modal::StudentModal;
use crate::net::api::{DashboardApi, error_message, use_api};
use crate::state::students::{CsvSelection, StudentEditor, StudentsState};
use crate::util::browser;

const UPLOAD_SUCCESS_MESSAGE: &str = "Students uploaded successfully!";

fn load(api: DashboardApi, state: RwSignal<StudentsState>) {
    if state.try_update(|s| s.loading = true).is_none() {
        return;
    }
    leptos::task::spawn_local(async move {
        let result = async {
            let students = api.list_students().await?;
            let records = api.list_vaccination_records().await?;
            let drives = api.list_drives(false).await?;
            Ok::<_, ApiError>((listing::enrich_students(students, &records), drives))
        }
        .await
        .map_err(|e| error_message(&e, "Failed to load students"));
        let _ = state.try_update(|s| s.loaded(result));
    });
}

#[component]
pub fn StudentsPage() -> impl IntoView {
    let api = use_api();
    let state = RwSignal::new(StudentsState::default());
    let editor = RwSignal::new(StudentEditor::default());
    let modal_open = RwSignal::new(false);

    load(api.clone(), state);

    let on_retry = {
        let api = api.clone();
        Callback::new(move |()| load(api.clone(), state))
    };

    let open_editor = move |next: StudentEditor| {
        editor.set(next);
        modal_open.set(true);
    };
    let on_close = Callback::new(move |()| modal_open.set(false));

    let on_save = {
        let api = api.clone();
        Callback::new(move |submission: StudentSubmission| {
            let existing = editor.get_untracked().editing;
            editor.update(|e| e.saving = true);
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.save_student(existing, &submission).await {
                    Ok(_) => {
                        let _ = modal_open.try_set(false);
                        load(api, state);
                    }
                    Err(e) => {
                        let _ = editor.try_update(|ed| {
                            ed.saving = false;
                            ed.error = Some(error_message(&e, "Failed to save student"));
                        });
                    }
                }
            });
        })
    };

    let on_upload = {
        let api = api.clone();
        Callback::new(move |csv: CsvSelection| {
            editor.update(|e| {
                e.saving = true;
                e.error = None;
                e.notice = None;
            });
            let api = api.clone();
            leptos::task::spawn_local(async move {
                let result = api.upload_students_csv(&csv.filename, &csv.content_type, csv.bytes).await;
                let uploaded = result.is_ok();
                let _ = editor.try_update(|ed| {
                    ed.saving = false;
                    match result {
                        Ok(message) => {
                            ed.csv = None;
                            ed.notice = Some(message.unwrap_or_else(|| UPLOAD_SUCCESS_MESSAGE.to_owned()));
                        }
                        Err(e) => ed.error = Some(error_message(&e, "Failed to upload students")),
                    }
                });
                if uploaded {
                    load(api, state);
                }
            });
        })
    };

    let on_delete = {
        let api = api.clone();
        Callback::new(move |id: i64| {
            if !browser::confirm("Are you sure you want to delete this student?") {
                return;
            }
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.delete_student(id).await {
                    Ok(()) => load(api, state),
                    Err(e) => {
                        let _ = state.try_update(|s| s.error = Some(error_message(&e, "Failed to delete student")));
                    }
                }
            });
        })
    };

    let on_page = Callback::new(move |page: usize| state.update(|s| s.set_page(page)));

    let grade_chips = move || {
        let s = state.get();
        s.grade_chips()
            .into_iter()
            .map(|(grade, label)| {
                let class = if s.grade.as_deref() == Some(grade.as_str()) { "chip chip--active" } else { "chip" };
                view! {
                    <button class=class on:click=move |_| state.update(|st| st.toggle_grade(&grade))>
                        {label}
                    </button>
                }
            })
            .collect_view()
    };

    let rows = move || {
        let s = state.get();
        let visible = s.visible();
        if visible.is_empty() {
            return view! {
                <tr>
                    <td class="table__empty" colspan="6">{s.empty_message()}</td>
                </tr>
            }
            .into_any();
        }
        visible
            .into_iter()
            .map(|row| {
                let student = row.student;
                let vaccinated = student.vaccination_status;
                let drive = if vaccinated {
                    row.latest_drive
                        .or_else(|| student.vaccinated_in.and_then(|id| s.drive_name(id)).map(str::to_owned))
                        .unwrap_or_else(|| NO_DRIVE_LABEL.to_owned())
                } else {
                    NO_DRIVE_LABEL.to_owned()
                };
                let (pill, answer) = if vaccinated { ("pill pill--yes", "Yes") } else { ("pill pill--no", "No") };
                let id = student.id;
                let (name, grade, roll) = (student.name.clone(), student.grade.clone(), student.roll_number.clone());
                view! {
                    <tr>
                        <td class="table__strong">{name}</td>
                        <td>{grade}</td>
                        <td>{roll}</td>
                        <td>
                            <span class=pill>{answer}</span>
                        </td>
                        <td>{drive}</td>
                        <td class="table__actions">
                            <button
                                class="btn btn--link"
                                on:click=move |_| open_editor(StudentEditor::for_student(&student))
                            >
                                "Edit"
                            </button>
                            <button class="btn btn--link btn--danger" on:click=move |_| on_delete.run(id)>
                                "Delete"
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="page">
            <div class="page__header">
                <h1>"Student Registry"</h1>
                <button class="btn btn--primary" on:click=move |_| open_editor(StudentEditor::default())>
                    "Add Student"
                </button>
            </div>

            <input
                class="page__search"
                type="text"
                placeholder="Search by name, grade or roll number..."
                prop:value=move || state.get().search
                on:input=move |ev| state.update(|s| s.set_search(event_target_value(&ev)))
            />

            <Show when=move || state.get().error.is_some()>
                <ErrorBanner message=Signal::derive(move || state.get().error.unwrap_or_default()) on_retry=on_retry/>
            </Show>

            <Show
                when=move || !state.get().loading
                fallback=|| view! { <p class="page__loading">"Loading students..."</p> }
            >
                <Show when=move || state.get().show_grade_chips()>
                    <div class="chips">
                        <h2>"Select Grade"</h2>
                        <div class="chips__row">{grade_chips}</div>
                    </div>
                </Show>

                <table class="table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Grade"</th>
                            <th>"Roll No."</th>
                            <th>"Vaccinated"</th>
                            <th>"Vaccination Drive"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>

                <Show when=move || state.get().show_pagination()>
                    <Pagination info=Signal::derive(move || state.get().page_info()) on_page=on_page/>
                </Show>
            </Show>

            <Show when=move || modal_open.get()>
                <StudentModal
                    editor=editor
                    drives=Signal::derive(move || state.get().drives)
                    on_close=on_close
                    on_save=on_save
                    on_upload=on_upload
                />
            </Show>
        </div>
    }
}
