//! Natural-language guidance enrichment.
//!
//! A [`GuidanceClient`] turns the two range readings into a short, calm
//! instruction ("Step right carefully.") by asking a locally running
//! [Ollama](https://ollama.com) instance via its `/api/generate` endpoint.
//!
//! This is out-of-band enrichment, not part of the safety path: a failed or
//! slow request leaves the previous phrase in place and is logged, never
//! surfaced. Refreshes are throttled so that per-frame state updates do not
//! flood the model server.
//!
//! # Example
//!
//! ```rust,no_run
//! use sightline_runtime::guidance::GuidanceClient;
//!
//! let client = GuidanceClient::new("http://localhost:11434", "llama3");
//! // Requires a running Ollama instance - skipped in unit tests.
//! // client.refresh(0.3, 0.6).await;
//! assert_eq!(client.current().phrase, "No guidance yet.");
//! ```

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Phrase shown before the first successful refresh.
pub const DEFAULT_PHRASE: &str = "No guidance yet.";

/// Errors that can arise from a guidance request.
#[derive(Error, Debug)]
pub enum GuidanceError {
    /// The HTTP request to the model server failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// The latest human-phrased instruction.
#[derive(Debug, Clone)]
pub struct Guidance {
    pub phrase: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Async client for Ollama's `/api/generate` endpoint.
///
/// Construct once and reuse; [`current`][Self::current] always returns the
/// latest phrase, initially [`DEFAULT_PHRASE`].
pub struct GuidanceClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
    latest: Mutex<Guidance>,
    limiter: DefaultDirectRateLimiter,
}

impl GuidanceClient {
    /// `base_url` is the Ollama instance (e.g. `"http://localhost:11434"`),
    /// `model` the model name (e.g. `"llama3"`).
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            client: reqwest::Client::new(),
            latest: Mutex::new(Guidance {
                phrase: DEFAULT_PHRASE.to_string(),
                updated_at: Utc::now(),
            }),
            // At most one model request per second, whatever the frame rate.
            limiter: RateLimiter::direct(Quota::per_second(NonZeroU32::MIN)),
        }
    }

    /// The latest phrase.
    pub fn current(&self) -> Guidance {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Build the instruction prompt from the two ranges (meters in, the
    /// prompt speaks centimeters like the sensor unit does).
    pub fn build_prompt(left_m: f64, right_m: f64) -> String {
        format!(
            "\nLeft sensor: {:.0} cm. Right sensor: {:.0} cm.\n\
             Write one calm, short, natural-sounding instruction for a visually impaired user.\n\
             Tone: clear, safe, concise.\n\
             Examples: \"Clear path ahead.\" \"Step right carefully.\" \"Obstacle close on left.\"\n\
             Output only the instruction text.",
            left_m * 100.0,
            right_m * 100.0
        )
    }

    /// Request a fresh phrase for the given ranges.
    ///
    /// Throttled to one in-flight request per second; throttled calls return
    /// immediately. On success the stored phrase is replaced; on failure the
    /// previous phrase stays and the error is logged. Never fatal.
    pub async fn refresh(&self, left_m: f64, right_m: f64) {
        if self.limiter.check().is_err() {
            debug!("guidance refresh throttled");
            return;
        }
        let prompt = Self::build_prompt(left_m, right_m);
        match self.request_phrase(&prompt).await {
            Ok(phrase) => {
                info!(phrase = %phrase, "guidance updated");
                let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
                *latest = Guidance {
                    phrase,
                    updated_at: Utc::now(),
                };
            }
            Err(e) => warn!(error = %e, "guidance request failed, keeping previous phrase"),
        }
    }

    async fn request_phrase(&self, prompt: &str) -> Result<String, GuidanceError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        let response: GenerateResponse = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.response.trim().to_string())
    }
}
