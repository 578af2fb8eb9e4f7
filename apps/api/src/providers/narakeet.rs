//! Narakeet text-to-speech client.
//!
//! Wire shape: POST {base}/text-to-speech/mp3?voice=..&speed=.. with the
//! plain-text body to speak, API key in `x-api-key`. The response body is
//! the complete MP3.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use crate::providers::{SpeechSynthesizer, SynthesisError};

/// Hard cap on a single synthesis call. Verse-sized texts render well
/// within this; anything longer indicates a stuck request.
pub const SYNTHESIS_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct NarakeetClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NarakeetClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(SYNTHESIS_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for NarakeetClient {
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        speed: f32,
    ) -> Result<Bytes, SynthesisError> {
        let url = format!("{}/text-to-speech/mp3", self.base_url);
        let speed_param = speed.to_string();

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "text/plain")
            .header("Accept", "application/octet-stream")
            .query(&[("voice", voice), ("speed", speed_param.as_str())])
            .body(text.to_string())
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Provider {
                status: status.as_u16(),
                message: body,
            });
        }

        let audio = response.bytes().await.map_err(map_reqwest)?;
        debug!(
            "synthesis succeeded: voice={}, speed={}, bytes={}",
            voice,
            speed,
            audio.len()
        );
        Ok(audio)
    }
}

fn map_reqwest(e: reqwest::Error) -> SynthesisError {
    if e.is_timeout() {
        SynthesisError::Timeout(SYNTHESIS_TIMEOUT_SECS)
    } else {
        SynthesisError::Http(e)
    }
}
