//! Hand a downloaded report to the browser as a file save.

#[cfg(test)]
#[path = "download_test.rs"]
mod download_test;

use gateway::reports::ReportFile;

/// How long the object URL outlives the click that starts the save.
pub const REVOKE_DELAY_MS: u32 = 1_000;

pub const NO_BODY_MESSAGE: &str = "Download failed: no document body";

/// Trigger a save of `file` through a temporary object URL.
///
/// # Errors
///
/// Returns a display message when the browser refuses any step.
pub fn save_report(file: &ReportFile) -> Result<(), String> {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let fail = |e: wasm_bindgen::JsValue| format!("Download failed: {e:?}");
        let window = web_sys::window().ok_or("Download failed: no window")?;
        let document = window.document().ok_or("Download failed: no document")?;

        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&file.content_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(fail)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(fail)?;

        let anchor = document
            .create_element("a")
            .map_err(fail)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "Download failed: not an anchor".to_owned())?;
        anchor.set_href(&url);
        anchor.set_download(&file.filename);
        let Some(body) = document.body() else {
            let _ = web_sys::Url::revoke_object_url(&url);
            return Err(NO_BODY_MESSAGE.to_owned());
        };
        let _ = body.append_child(&anchor);
        anchor.click();
        let _ = body.remove_child(&anchor);

        // Revoking inside the click handler cancels the save in some browsers.
        gloo_timers::callback::Timeout::new(REVOKE_DELAY_MS, move || {
            let _ = web_sys::Url::revoke_object_url(&url);
        })
        .forget();
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = file;
        Err("Downloads need a browser".to_owned())
    }
}
