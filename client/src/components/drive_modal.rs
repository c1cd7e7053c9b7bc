//! Add/edit dialog for a vaccination drive.

use gateway::models::DriveInput;
use leptos::prelude::*;

use crate::state::drives::DriveEditor;
use crate::util::clock;

/// The page owns the editor signal and performs the save; this dialog only
/// edits fields and hands a validated body to `on_save`.
#[component]
pub fn DriveModal(editor: RwSignal<DriveEditor>, on_close: Callback<()>, on_save: Callback<DriveInput>) -> impl IntoView {
    let on_backdrop = move |_| on_close.run(());
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = editor.get_untracked();
        if current.saving || current.date_error.is_some() {
            return;
        }
        match current.submission(clock::today()) {
            Ok(input) => {
                editor.update(|e| e.error = None);
                on_save.run(input);
            }
            Err(message) => editor.update(|e| e.error = Some(message)),
        }
    };

    let blocked = move || {
        let e = editor.get();
        e.saving || e.date_error.is_some()
    };

    view! {
        <div class="dialog-backdrop" on:click=on_backdrop>
            <div
                class="dialog dialog--drive"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                tabindex="0"
            >
                <h2>{move || editor.get().title()}</h2>

                <Show when=move || editor.get().error.is_some()>
                    <p class="dialog__error">{move || editor.get().error.unwrap_or_default()}</p>
                </Show>

                <form class="dialog__form" on:submit=on_submit>
                    <label class="dialog__label" for="drive-name">"Drive Name"</label>
                    <input
                        id="drive-name"
                        class="dialog__input"
                        type="text"
                        required
                        prop:value=move || editor.get().input.name
                        on:input=move |ev| editor.update(|e| e.input.name = event_target_value(&ev))
                    />

                    <label class="dialog__label" for="drive-date">"Date"</label>
                    <input
                        id="drive-date"
                        class="dialog__input"
                        type="date"
                        required
                        prop:value=move || editor.get().input.date
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            editor.update(|e| e.set_date(raw, clock::today()));
                        }
                    />
                    <Show when=move || editor.get().date_error.is_some()>
                        <p class="dialog__field-error">{move || editor.get().date_error.unwrap_or_default()}</p>
                    </Show>

                    <label class="dialog__label" for="drive-grades">"Target Grades"</label>
                    <input
                        id="drive-grades"
                        class="dialog__input"
                        type="text"
                        placeholder="e.g., 5-10 or 5,6,7"
                        required
                        prop:value=move || editor.get().input.target_grades
                        on:input=move |ev| editor.update(|e| e.input.target_grades = event_target_value(&ev))
                    />

                    <div class="dialog__actions">
                        <button class="btn" type="button" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button class="btn btn--primary" type="submit" disabled=blocked>
                            {move || if editor.get().saving { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
