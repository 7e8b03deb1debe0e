use crate::error::{ClientError, Result};
use crate::WordService;
use async_trait::async_trait;
use semantle_engine::{LookupResult, StoryStats};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://semantle.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// `model2/{target}/{guess}` response. The service may also include its own
/// similarity figure; the engine recomputes similarity from the vectors, so
/// only the vector and percentile are consumed.
#[derive(Debug, Deserialize)]
struct ModelResponse {
    vec: Vec<f32>,
    percentile: Option<u16>,
}

/// HTTP client for a Semantle-compatible similarity server.
pub struct SemantleClient {
    http: reqwest::Client,
    base_url: String,
}

impl SemantleClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        log::debug!("GET {url}");
        let body = self.http.get(url).send().await?.text().await?;
        Ok(body)
    }
}

/// An unparseable body from the model endpoint means the service does not
/// know the guessed word: it answers the unknown-word case with a non-JSON
/// page, not an error envelope.
fn parse_model_response(body: &str, guess: &str) -> Result<LookupResult> {
    let parsed: ModelResponse =
        serde_json::from_str(body).map_err(|_| ClientError::InvalidWord(guess.to_string()))?;
    Ok(LookupResult {
        vector: parsed.vec,
        percentile: parsed.percentile,
    })
}

#[async_trait]
impl WordService for SemantleClient {
    async fn fetch_vector(&self, target: &str, guess: &str) -> Result<LookupResult> {
        let url = format!("{}/model2/{target}/{guess}", self.base_url);
        let body = self.get_text(&url).await?;
        parse_model_response(&body, guess)
    }

    async fn fetch_story_stats(&self, target: &str) -> Result<StoryStats> {
        let url = format!("{}/similarity/{target}", self.base_url);
        let body = self.get_text(&url).await?;
        let stats: StoryStats = serde_json::from_str(&body)?;
        Ok(stats)
    }

    async fn fetch_nth_nearby(&self, target: &str, rank: u16) -> Result<String> {
        let url = format!("{}/nth_nearby/{target}/{rank}", self.base_url);
        let body = self.get_text(&url).await?;
        let word: String = serde_json::from_str(&body)?;
        Ok(word)
    }
}
