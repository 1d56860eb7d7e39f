/*
 * SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: LicenseRef-NvidiaProprietary
 *
 * NVIDIA CORPORATION, its affiliates and licensors retain all intellectual
 * property and proprietary rights in and to this material, related
 * documentation and any modifications thereto. Any use, reproduction,
 * disclosure or distribution of this material and related documentation
 * without an express license agreement from NVIDIA CORPORATION or
 * its affiliates is strictly prohibited.
 */

// src/lib.rs
// HTTP client plumbing for the LubeLogger REST API.
//
// LubeApiClient is a thin typed wrapper over reqwest: build a URL from
// the configured endpoint, issue the request, and map transport, status,
// and parse failures to distinct LubeApiError variants. There are no
// retries at this layer; callers decide what a failure means.

mod lube_api;
pub mod lube_model;

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Client as HttpClient, ClientBuilder, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

pub use crate::lube_api::OdometerApi;
pub use crate::lube_model::{Mileage, NewOdometerRecord, OdometerRecord, Vehicle};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(thiserror::Error, Debug)]
pub enum LubeApiError {
    #[error("Network error talking to LubeLogger at {url}. {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status_code} at {url}: {response_body}")]
    HttpStatus {
        url: String,
        status_code: StatusCode,
        response_body: String,
    },

    #[error("Could not deserialize response from {url}. Body: {body}. {source}")]
    JsonDeserialize {
        url: String,
        body: String,
        source: serde_json::Error,
    },

    #[error("Could not serialize request body for {url}. Obj: {object_debug}. {source}")]
    JsonSerialize {
        url: String,
        object_debug: String,
        source: serde_json::Error,
    },

    #[error("Remote returned empty body at {url}, status {status}")]
    NoContent { url: String, status: StatusCode },

    #[error("Reqwest error: '{0}'")]
    Reqwest(#[from] reqwest::Error),
}

// LubeEndpoint describes where the LubeLogger instance lives. The port
// is optional: some deployments sit behind a reverse proxy and are
// addressed by hostname (or full URL) alone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LubeEndpoint {
    pub address: String,
    pub port: Option<u16>,
}

impl LubeEndpoint {
    // base_url renders the endpoint as a URL prefix. A bare hostname
    // gets an http:// scheme; an explicit port is appended when set.
    pub fn base_url(&self) -> String {
        let address = self.address.trim_end_matches('/');
        let base = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };
        match self.port {
            Some(port) => format!("{base}:{port}"),
            None => base,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LubeClientBuilder {
    pub endpoint: LubeEndpoint,
    pub timeout: Duration,
}

impl LubeClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(&self) -> Result<LubeApiClient, LubeApiError> {
        let client = ClientBuilder::new().timeout(self.timeout).build()?;

        Ok(LubeApiClient {
            base_url: self.endpoint.base_url(),
            client,
        })
    }
}

#[derive(Debug, Clone)]
pub struct LubeApiClient {
    base_url: String,
    client: HttpClient,
}

impl LubeApiClient {
    pub fn builder(endpoint: LubeEndpoint) -> LubeClientBuilder {
        LubeClientBuilder {
            endpoint,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn get<T>(
        &self,
        api: &str,
        query: &[(&str, String)],
    ) -> Result<T, LubeApiError>
    where
        T: DeserializeOwned + std::fmt::Debug,
    {
        self.req::<T, String>(Method::GET, api, query, &None).await
    }

    pub(crate) async fn post<T, B>(
        &self,
        api: &str,
        query: &[(&str, String)],
        data: B,
    ) -> Result<T, LubeApiError>
    where
        T: DeserializeOwned + std::fmt::Debug,
        B: Serialize + std::fmt::Debug,
    {
        self.req(Method::POST, api, query, &Some(data)).await
    }

    async fn req<T, B>(
        &self,
        method: Method,
        api: &str,
        query: &[(&str, String)],
        body: &Option<B>,
    ) -> Result<T, LubeApiError>
    where
        T: DeserializeOwned + std::fmt::Debug,
        B: Serialize + std::fmt::Debug,
    {
        let url = format!("{}/{}", self.base_url, api);

        let body_enc = match body {
            Some(b) => Some(serde_json::to_string(b).map_err(|e| {
                LubeApiError::JsonSerialize {
                    url: url.clone(),
                    object_debug: format!("{b:?}"),
                    source: e,
                }
            })?),
            None => None,
        };

        let mut req_b = match method {
            Method::GET => self.client.get(&url),
            Method::POST => self.client.post(&url),
            _ => unreachable!("Only GET and POST http methods are used."),
        };
        req_b = req_b.header(ACCEPT, HeaderValue::from_static("*/*"));
        req_b = req_b.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        req_b = req_b.header(USER_AGENT, HeaderValue::from_static("liblube/0.1"));
        if !query.is_empty() {
            req_b = req_b.query(query);
        }
        if let Some(b) = body_enc {
            req_b = req_b.body(b);
        }

        let response = req_b.send().await.map_err(|e| LubeApiError::Network {
            url: url.clone(),
            source: e,
        })?;
        let status_code = response.status();

        // get the entire response body into a buffer, then try to
        // convert to a utf8 string for error context and parsing
        let response_buffer = response.bytes().await.map_err(|e| LubeApiError::Network {
            url: url.clone(),
            source: e,
        })?;
        let response_body = String::from_utf8_lossy(&response_buffer).to_string();
        debug!("RX {status_code} {}", truncate(&response_body, 1500));

        if !status_code.is_success() {
            return Err(LubeApiError::HttpStatus {
                url,
                status_code,
                response_body,
            });
        }

        if response_body.is_empty() {
            return Err(LubeApiError::NoContent {
                url,
                status: status_code,
            });
        }

        serde_json::from_str(&response_body).map_err(|e| LubeApiError::JsonDeserialize {
            url,
            body: response_body,
            source: e,
        })
    }
}

// truncate cuts a string to at most len bytes without splitting a
// multibyte character.
fn truncate(s: &str, len: usize) -> &str {
    if s.len() <= len {
        return s;
    }
    let mut end = len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
