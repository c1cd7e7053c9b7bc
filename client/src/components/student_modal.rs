//! Add/edit dialog for students, with a bulk CSV tab when adding.

use gateway::dates;
use gateway::models::{Drive, StudentSubmission};
use gateway::validation::{MAX_GRADE, MIN_GRADE, StudentField};
use leptos::prelude::*;

use crate::state::students::{CsvSelection, EntryMode, StudentEditor};

fn drive_option_label(drive: &Drive) -> String {
    let date = drive.calendar_date().map_or_else(|| drive.date.clone(), dates::format_numeric);
    format!("{} ({date})", drive.name)
}

#[component]
pub fn StudentModal(
    editor: RwSignal<StudentEditor>,
    #[prop(into)] drives: Signal<Vec<Drive>>,
    on_close: Callback<()>,
    on_save: Callback<StudentSubmission>,
    on_upload: Callback<CsvSelection>,
) -> impl IntoView {
    let on_backdrop = move |_| on_close.run(());
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if editor.get_untracked().saving {
            return;
        }
        let mut submission = None;
        editor.update(|e| submission = e.submission());
        if let Some(submission) = submission {
            on_save.run(submission);
        }
    };

    let on_bulk_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = editor.get_untracked();
        if current.saving {
            return;
        }
        if let Some(csv) = current.csv {
            on_upload.run(csv);
        }
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            leptos::task::spawn_local(async move {
                if let Some(selection) = crate::util::browser::read_picked_file(&input).await {
                    let _ = editor.try_update(|e| {
                        e.notice = None;
                        e.select_csv(selection);
                    });
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = ev;
    };

    let field_error = move |field: StudentField| {
        move || {
            editor.get().field_error(field).map(|message| {
                view! { <p class="dialog__field-error">{message}</p> }
            })
        }
    };

    // Typing must not rebuild the form, so the body switches on the tab only.
    let mode = Memo::new(move |_| editor.get().mode);

    let tab_class = move |tab: EntryMode| {
        move || if mode.get() == tab { "dialog__tab dialog__tab--active" } else { "dialog__tab" }
    };

    let single_form = move || {
        view! {
            <form class="dialog__form" on:submit=on_submit>
                <label class="dialog__label" for="student-name">"Full Name *"</label>
                <input
                    id="student-name"
                    class="dialog__input"
                    type="text"
                    prop:value=move || editor.get().form.name
                    on:input=move |ev| editor.update(|e| e.form.name = event_target_value(&ev))
                />
                {field_error(StudentField::Name)}

                <div class="dialog__row">
                    <div>
                        <label class="dialog__label" for="student-grade">"Grade *"</label>
                        <select
                            id="student-grade"
                            class="dialog__input"
                            prop:value=move || editor.get().form.grade
                            on:change=move |ev| editor.update(|e| e.form.grade = event_target_value(&ev))
                        >
                            <option value="">"Select Grade"</option>
                            {(MIN_GRADE..=MAX_GRADE)
                                .map(|g| view! { <option value=g.to_string()>{g}</option> })
                                .collect_view()}
                        </select>
                        {field_error(StudentField::Grade)}
                    </div>
                    <div>
                        <label class="dialog__label" for="student-roll">"Roll Number *"</label>
                        <input
                            id="student-roll"
                            class="dialog__input"
                            type="number"
                            min="1"
                            prop:value=move || editor.get().form.roll_number
                            on:input=move |ev| editor.update(|e| e.form.roll_number = event_target_value(&ev))
                        />
                        {field_error(StudentField::RollNumber)}
                    </div>
                </div>

                <label class="dialog__check">
                    <input
                        type="checkbox"
                        prop:checked=move || editor.get().form.vaccination_status
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            editor.update(|e| e.set_vaccinated(checked));
                        }
                    />
                    "Vaccinated"
                </label>

                <Show when=move || editor.get().form.vaccination_status>
                    <label class="dialog__label" for="student-drive">"Vaccination Drive *"</label>
                    <select
                        id="student-drive"
                        class="dialog__input"
                        prop:value=move || editor.get().form.vaccinated_in.map(|id| id.to_string()).unwrap_or_default()
                        on:change=move |ev| {
                            let picked = event_target_value(&ev).parse().ok();
                            editor.update(|e| e.form.vaccinated_in = picked);
                        }
                    >
                        <option value="">"Select Drive"</option>
                        {move || {
                            drives
                                .get()
                                .iter()
                                .map(|d| view! { <option value=d.id.to_string()>{drive_option_label(d)}</option> })
                                .collect_view()
                        }}
                    </select>
                    {field_error(StudentField::VaccinatedIn)}
                </Show>

                <div class="dialog__actions">
                    <button class="btn" type="button" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" type="submit" disabled=move || editor.get().saving>
                        {move || if editor.get().saving { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        }
    };

    let bulk_form = move || {
        view! {
            <form class="dialog__form" on:submit=on_bulk_submit>
                <Show when=move || editor.get().notice.is_some()>
                    <p class="dialog__notice">{move || editor.get().notice.unwrap_or_default()}</p>
                </Show>
                <label class="dialog__label" for="student-csv">"CSV File *"</label>
                <input id="student-csv" class="dialog__input" type="file" accept=".csv,text/csv" on:change=on_file_change/>
                <p class="dialog__hint">"Columns: name, grade, roll_number, vaccination_status"</p>
                <div class="dialog__actions">
                    <button class="btn" type="button" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--primary"
                        type="submit"
                        disabled=move || {
                            let e = editor.get();
                            e.saving || e.csv.is_none()
                        }
                    >
                        {move || if editor.get().saving { "Uploading..." } else { "Upload" }}
                    </button>
                </div>
            </form>
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=on_backdrop>
            <div
                class="dialog dialog--student"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                tabindex="0"
            >
                <h2>{move || editor.get().title()}</h2>

                <Show when=move || editor.get().editing.is_none()>
                    <nav class="dialog__tabs">
                        <button
                            class=tab_class(EntryMode::Single)
                            type="button"
                            on:click=move |_| editor.update(|e| e.mode = EntryMode::Single)
                        >
                            "Single Entry"
                        </button>
                        <button
                            class=tab_class(EntryMode::Bulk)
                            type="button"
                            on:click=move |_| editor.update(|e| e.mode = EntryMode::Bulk)
                        >
                            "Bulk Upload"
                        </button>
                    </nav>
                </Show>

                <Show when=move || editor.get().error.is_some()>
                    <p class="dialog__error">{move || editor.get().error.unwrap_or_default()}</p>
                </Show>

                {move || match mode.get() {
                    EntryMode::Single => single_form().into_any(),
                    EntryMode::Bulk => bulk_form().into_any(),
                }}
            </div>
        </div>
    }
}
