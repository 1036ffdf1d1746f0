//! HTTP client for SIGHT-Lipa backend requests.
//!
//! This module provides a low-level wrapper around `reqwest` that joins
//! paths onto the configured base URL, sends JSON bodies and turns non-2xx
//! answers into [`ApiError::Status`] carrying the backend's `details`.

use super::error::ApiError;
use reqwest::{Method, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT_IN_SECS: u64 = 15;

/// Makes requests to the backend and tries to conform response data to the
/// requested type.
///
#[derive(Clone)]
pub struct Client {
    pub(crate) base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL, e.g.
    /// `http://localhost:5000/api`.
    ///
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_owned(),
            message: e.to_string(),
        })?;
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_IN_SECS))
            .build()?;
        Ok(Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client,
        })
    }

    /// Return decoded body of `GET {base}/{path}`.
    ///
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<Vec<(&str, String)>>,
    ) -> Result<T, ApiError> {
        let response = check_status(self.call::<()>(Method::GET, path, params, None).await?).await?;
        decode(response).await
    }

    /// Send `body` as JSON and return the decoded response body, whatever
    /// the status. Used where the backend reports failure in the body.
    ///
    pub async fn send_unchecked<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.call(method, path, None, Some(body)).await?;
        decode(response).await
    }

    /// Send `body` as JSON. Returns the response body as loose JSON, or
    /// `None` when the backend answered without one.
    ///
    pub async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        let response = check_status(self.call(method, path, None, body).await?).await?;
        let response_bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&response_bytes).ok())
    }

    /// Make request and return the raw response.
    ///
    async fn call<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: Option<Vec<(&str, String)>>,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let request_url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        log::debug!("{} {}", method, request_url);

        let mut request = self.http_client.request(method, &request_url);
        if let Some(params) = params {
            request = request.query(&params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }
}

/// Pass 2xx responses through; turn anything else into
/// [`ApiError::Status`].
///
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let response_text = response
        .text()
        .await
        .unwrap_or_else(|_| String::from("Unable to read response"));
    log::error!(
        "API request failed with status {}: {}",
        status,
        response_text
    );
    Err(ApiError::Status {
        status: status.as_u16(),
        details: extract_details(&response_text),
    })
}

/// Decode a JSON body, logging it when it does not fit `T`.
///
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response_bytes = response.bytes().await?;
    serde_json::from_slice::<T>(&response_bytes).map_err(|e| {
        log::error!(
            "Failed to deserialize API response: {}. Response body: {}",
            e,
            String::from_utf8_lossy(&response_bytes)
        );
        ApiError::Deserialization(e)
    })
}

/// Pull the `details` string out of an error body. Other keys such as
/// `message` or `error` only reach the log.
///
pub(crate) fn extract_details(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
    json.get("details").and_then(|v| v.as_str()).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_malformed_url() {
        let result = Client::new("not a url");
        assert!(matches!(result, Err(ApiError::InvalidUrl { .. })));
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = Client::new("http://localhost:5000/api/").unwrap();
        assert_eq!(client.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn extract_details_prefers_details_key() {
        let body = r#"{"message":"Bad request","details":"address is required"}"#;
        assert_eq!(extract_details(body).as_deref(), Some("address is required"));
    }

    #[test]
    fn extract_details_ignores_other_keys() {
        assert_eq!(extract_details(r#"{"message":"Not found"}"#), None);
        assert_eq!(extract_details(r#"{"error":"Failed to create landmark"}"#), None);
        assert_eq!(extract_details("<html>oops</html>"), None);
        assert_eq!(extract_details(r#"{"details": 12}"#), None);
    }
}
