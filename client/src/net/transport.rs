//! `gloo-net` transport with a request timeout.
//!
//! Client-side (csr): real `fetch` calls raced against a `gloo-timers`
//! timeout.
//! Native builds: every send fails with [`TransportError::Unavailable`].

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use gateway::{ApiRequest, ApiResponse, Transport, TransportError};

#[derive(Clone, Copy, Debug)]
pub struct BrowserTransport {
    timeout: Duration,
}

impl BrowserTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Timer length for `gloo-timers`, which counts in `u32` milliseconds.
fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

impl Transport for BrowserTransport {
    async fn send(&self, url: &str, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use futures::future::{Either, select};

            let timer = gloo_timers::future::TimeoutFuture::new(timeout_millis(self.timeout));
            let request = std::pin::pin!(browser::send(url, request));
            match select(request, std::pin::pin!(timer)).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(TransportError::TimedOut(self.timeout.as_secs())),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, request, timeout_millis(self.timeout));
            Err(TransportError::Unavailable)
        }
    }
}

#[cfg(feature = "csr")]
mod browser {
    use gateway::{ApiRequest, ApiResponse, Method, MultipartFile, RequestBody, TransportError};
    use gloo_net::http::Request;

    fn failed(error: impl std::fmt::Display) -> TransportError {
        TransportError::Failed(error.to_string())
    }

    fn js_failed(error: wasm_bindgen::JsValue) -> TransportError {
        TransportError::Failed(format!("{error:?}"))
    }

    pub(super) async fn send(url: &str, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Delete => Request::delete(url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let prepared = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(file) => builder.body(form_data(file)?),
        }
        .map_err(failed)?;

        let response = prepared.send().await.map_err(failed)?;
        let status = response.status();
        let headers = response.headers().entries().collect();
        let body = response.binary().await.map_err(failed)?;
        Ok(ApiResponse { status, headers, body })
    }

    /// Content-Type is left to the browser so it can add the boundary.
    fn form_data(file: &MultipartFile) -> Result<web_sys::FormData, TransportError> {
        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&file.content_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_failed)?;
        let form = web_sys::FormData::new().map_err(js_failed)?;
        form.append_with_blob_and_filename(&file.field, &blob, &file.filename)
            .map_err(js_failed)?;
        Ok(form)
    }
}
