use leptos::prelude::*;

/// Inline load failure with a retry button.
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<String>, on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div class="error-banner" role="alert">
            <p class="error-banner__message">{move || message.get()}</p>
            <button class="btn error-banner__retry" on:click=move |_| on_retry.run(())>
                "Retry"
            </button>
        </div>
    }
}
