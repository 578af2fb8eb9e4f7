//! English-to-Indic translation via the public gtx endpoint.
//!
//! The endpoint returns a deeply nested array rather than an object; see
//! [`parse_translation`] for the shape. English targets short-circuit and
//! never hit the network.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::providers::{TranslateError, Translator};
use crate::verses::models::LangCode;

const TRANSLATE_TIMEOUT_SECS: u64 = 15;
const MAX_RETRIES: u32 = 3;

#[derive(Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    base_url: String,
}

impl GoogleTranslateClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(TRANSLATE_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target: LangCode) -> Result<String, TranslateError> {
        if target == LangCode::En {
            return Ok(text.to_string());
        }

        let url = format!("{}/translate_a/single", self.base_url);
        let mut last_error: Option<TranslateError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 500ms, 1s
                let delay = std::time::Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "translation attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .get(&url)
                .query(&[
                    ("client", "gtx"),
                    ("sl", "en"),
                    ("tl", target.as_str()),
                    ("dt", "t"),
                    ("q", text),
                ])
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(map_reqwest(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("translation endpoint returned {}: {}", status, body);
                last_error = Some(TranslateError::Provider {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(TranslateError::Provider {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let body: Value = match response.json().await {
                Ok(v) => v,
                Err(e) => {
                    last_error = Some(map_reqwest(e));
                    continue;
                }
            };

            return parse_translation(&body).ok_or(TranslateError::Malformed);
        }

        Err(last_error.unwrap_or(TranslateError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}

fn map_reqwest(e: reqwest::Error) -> TranslateError {
    if e.is_timeout() {
        TranslateError::Timeout(TRANSLATE_TIMEOUT_SECS)
    } else {
        TranslateError::Http(e)
    }
}

/// Pulls the concatenated translation out of a gtx response.
/// Shape: `[[["chunk translated", "chunk original", ...], ...], ...]`;
/// element 0 of each inner segment is the translated chunk.
fn parse_translation(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        if let Some(chunk) = segment.get(0).and_then(Value::as_str) {
            out.push_str(chunk);
        }
    }
    let out = out.trim();
    if out.is_empty() {
        None
    } else {
        Some(out.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_translation_concatenates_segments() {
        let body = json!([
            [
                ["नमस्ते ", "hello ", null, null],
                ["दुनिया", "world", null, null]
            ],
            null,
            "en"
        ]);
        assert_eq!(parse_translation(&body).unwrap(), "नमस्ते दुनिया");
    }

    #[test]
    fn test_parse_translation_single_segment() {
        let body = json!([[["કૃષ્ણ", "krishna"]]]);
        assert_eq!(parse_translation(&body).unwrap(), "કૃષ્ણ");
    }

    #[test]
    fn test_parse_translation_rejects_object_body() {
        let body = json!({"error": "quota exceeded"});
        assert!(parse_translation(&body).is_none());
    }

    #[test]
    fn test_parse_translation_rejects_empty_body() {
        assert!(parse_translation(&json!([])).is_none());
        assert!(parse_translation(&json!([[]])).is_none());
    }

    #[test]
    fn test_parse_translation_skips_non_string_chunks() {
        let body = json!([[[null, "hello"], ["ठीक", "ok"]]]);
        assert_eq!(parse_translation(&body).unwrap(), "ठीक");
    }

    #[tokio::test]
    async fn test_english_target_short_circuits() {
        // Unroutable base URL: proves no network call happens for en.
        let client = GoogleTranslateClient::new("http://127.0.0.1:1".to_string());
        let out = client.translate("as it is", LangCode::En).await.unwrap();
        assert_eq!(out, "as it is");
    }
}
