//! Small `web-sys` wrappers: confirm dialogs and reading picked files.
//!
//! Native builds get inert fallbacks.

#[cfg(feature = "csr")]
use crate::state::students::CsvSelection;

/// Native `window.confirm`. Declines when no window is available.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        false
    }
}

/// Read the first file picked in a file `<input>`.
#[cfg(feature = "csr")]
pub async fn read_picked_file(input: &web_sys::HtmlInputElement) -> Option<CsvSelection> {
    let file = input.files()?.get(0)?;
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await.ok()?;
    Some(CsvSelection {
        filename: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}
