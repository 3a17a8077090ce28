// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Google Generative Language API: model discovery and `generateContent`
//! with a bounded retry on "overloaded" errors.
//!
//! The API key travels as the `key` query parameter on both endpoints.
//! Error envelopes (`{"error": {"message": ..}}`) come back with non-2xx
//! statuses, so bodies are decoded regardless of status.

use crate::error::ReportError;
use crate::models::{GenerateResponse, ModelDescriptor, ModelList};
use log::{debug, error, info, warn};
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GENERATE_METHOD: &str = "generateContent";

pub const MAX_RETRIES: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_secs(3);
pub const OVERLOAD_MARKER: &str = "overloaded";

/// The two provider endpoints the report pipeline talks to.
pub trait GenerativeApi {
    fn list_models(&self) -> Result<ModelList, ReportError>;
    fn generate_content(&self, model: &str, prompt: &str) -> Result<GenerateResponse, ReportError>;
}

pub trait Sleeper {
    fn sleep(&self, dur: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, dur: Duration) {
        std::thread::sleep(dur);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
    pub trigger: &'static str,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            delay: RETRY_DELAY,
            trigger: OVERLOAD_MARKER,
        }
    }
}

pub struct GeminiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::blocking::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::blocking::Response,
    ) -> Result<T, ReportError> {
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ReportError::Transport(e.without_url().to_string()))?;
        debug!("HTTP {} ({} bytes)", status, body.len());
        serde_json::from_str(&body)
            .map_err(|e| ReportError::MalformedResponse(format!("HTTP {}: {}", status, e)))
    }
}

impl GenerativeApi for GeminiClient {
    fn list_models(&self) -> Result<ModelList, ReportError> {
        let url = format!("{}/models", self.base_url);
        let resp = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .map_err(|e| ReportError::Transport(e.without_url().to_string()))?;
        Self::decode(resp)
    }

    fn generate_content(&self, model: &str, prompt: &str) -> Result<GenerateResponse, ReportError> {
        let url = format!("{}/{}:{}", self.base_url, model, GENERATE_METHOD);
        let resp = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .map_err(|e| ReportError::Transport(e.without_url().to_string()))?;
        Self::decode(resp)
    }
}

/// Every model in the listing, or `NoCapableModelFound` when the listing
/// itself fails or carries an error envelope.
pub fn list_models<A: GenerativeApi + ?Sized>(api: &A) -> Result<Vec<ModelDescriptor>, ReportError> {
    let listing = api
        .list_models()
        .map_err(|e| ReportError::NoCapableModelFound(e.to_string()))?;
    if let Some(err) = listing.error {
        return Err(ReportError::NoCapableModelFound(err.message));
    }
    listing.models.ok_or_else(|| {
        ReportError::NoCapableModelFound("model listing has no 'models' field".to_string())
    })
}

/// Name of the first listed model that supports `generateContent`.
pub fn discover_model<A: GenerativeApi + ?Sized>(api: &A) -> Result<String, ReportError> {
    let models = list_models(api)?;
    let found = models
        .into_iter()
        .find(|m| m.supports(GENERATE_METHOD))
        .map(|m| m.name)
        .ok_or_else(|| {
            ReportError::NoCapableModelFound(format!("no model lists '{}'", GENERATE_METHOD))
        })?;
    info!("Using model {}", found);
    Ok(found)
}

/// Issue the same generation request until it succeeds, fails with something
/// other than an overload, or `policy.max_retries` retries are used up.
pub fn generate_with_retry<A, S>(
    api: &A,
    model: &str,
    prompt: &str,
    policy: &RetryPolicy,
    sleeper: &S,
) -> Result<String, ReportError>
where
    A: GenerativeApi + ?Sized,
    S: Sleeper + ?Sized,
{
    let mut retries = 0;
    loop {
        let resp = match api.generate_content(model, prompt) {
            Ok(resp) => resp,
            Err(ReportError::Transport(msg)) => {
                error!("Generation request failed: {}", msg);
                return Err(ReportError::GenerationFailed(msg));
            }
            Err(e) => return Err(e),
        };

        let Some(err) = resp.error.as_ref() else {
            return resp
                .first_text()
                .map(str::to_string)
                .ok_or_else(|| {
                    ReportError::MalformedResponse(
                        "missing candidates[0].content.parts[0].text".to_string(),
                    )
                });
        };

        if err.message.contains(policy.trigger) && retries < policy.max_retries {
            retries += 1;
            warn!(
                "Model overloaded, retrying in {:?} ({}/{})",
                policy.delay, retries, policy.max_retries
            );
            sleeper.sleep(policy.delay);
            continue;
        }
        error!("Generation failed after {} retries: {}", retries, err.message);
        return Err(ReportError::GenerationFailed(err.message.clone()));
    }
}
