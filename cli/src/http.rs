//! `reqwest` implementation of the gateway transport.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use gateway::{ApiRequest, ApiResponse, Method, RequestBody, Transport, TransportError};
use reqwest::multipart::{Form, Part};

pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Fails when the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    fn failed(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::TimedOut(self.timeout.as_secs())
        } else {
            TransportError::Failed(error.to_string())
        }
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for HttpTransport {
    async fn send(&self, url: &str, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self.client.request(reqwest_method(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(file) => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.filename.clone())
                    .mime_str(&file.content_type)
                    .map_err(|e| self.failed(e))?;
                builder.multipart(Form::new().part(file.field.clone(), part))
            }
        };

        let response = builder.send().await.map_err(|e| self.failed(e))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_owned(), value.to_str().ok()?.to_owned())))
            .collect();
        let body = response.bytes().await.map_err(|e| self.failed(e))?.to_vec();
        Ok(ApiResponse { status, headers, body })
    }
}
