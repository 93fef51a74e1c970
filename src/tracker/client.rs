//! HTTP client for the entries store.
//!
//! This module provides a low-level wrapper that builds request URLs against
//! the configured origin, sets JSON headers, and turns non-2xx responses and
//! malformed bodies into errors.

use super::TrackerError;
use log::*;
use reqwest::{header::CONTENT_TYPE, Method, Response};
use serde::{de::DeserializeOwned, Serialize};

/// Makes requests to the store and tries to conform response data to a type.
///
#[derive(Clone)]
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str) -> Result<Self, TrackerError> {
        Ok(Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::builder().build()?,
        })
    }

    /// Make request and deserialize the response body.
    ///
    pub async fn json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, TrackerError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let bytes = self.call(method, path, body).await?.bytes().await?;
        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            error!(
                "Failed to deserialize response: {}. Response body: {}",
                e,
                String::from_utf8_lossy(&bytes)
            );
            TrackerError::Deserialization(e)
        })
    }

    /// Make request with optional JSON body and return the response, or an
    /// error for transport failures and non-2xx statuses.
    ///
    pub async fn call<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, TrackerError>
    where
        B: Serialize + ?Sized,
    {
        let request_url = format!("{}/{}", self.base_url, path);
        debug!("{} {}", method, request_url);

        let mut request = self
            .http_client
            .request(method, &request_url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            error!("Request to {} failed with status {}: {}", request_url, status, body);
            return Err(TrackerError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let client = Client::new("http://localhost:3001/").unwrap();
        assert_eq!(client.base_url, "http://localhost:3001");
    }
}
