//! Client for the Generative Language `generateContent` endpoint.

use std::{future::Future, pin::Pin, time::Duration};

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, TextCompletion};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MAX_OUTPUT_TOKENS: u32 = 2048;
const TEMPERATURE: f32 = 0.7;

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Part {
  pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role:  Option<String>,
  #[serde(default)]
  pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
  pub max_output_tokens: u32,
  pub temperature:       f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest {
  pub system_instruction: Content,
  pub contents:           Vec<Content>,
  #[serde(rename = "generationConfig")]
  pub generation_config:  GenerationConfig,
}

impl GenerateRequest {
  pub(crate) fn new(preamble: &str, message: &str) -> Self {
    Self {
      system_instruction: Content {
        role:  None,
        parts: vec![Part { text: preamble.to_owned() }],
      },
      contents:           vec![Content {
        role:  Some("user".into()),
        parts: vec![Part { text: message.to_owned() }],
      }],
      generation_config:  GenerationConfig {
        max_output_tokens: MAX_OUTPUT_TOKENS,
        temperature:       TEMPERATURE,
      },
    }
  }
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

impl GenerateResponse {
  /// Text of the first candidate's parts, joined.
  pub(crate) fn into_text(self) -> Result<String> {
    let text: String = self
      .candidates
      .into_iter()
      .next()
      .and_then(|c| c.content)
      .map(|c| c.parts.into_iter().map(|p| p.text).collect())
      .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
      return Err(Error::EmptyCompletion);
    }
    Ok(text.to_owned())
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GeminiClient {
  client:  Client,
  api_key: String,
  model:   String,
}

impl GeminiClient {
  pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self {
      client,
      api_key: api_key.into(),
      model: model.into(),
    })
  }

  fn url(&self) -> String {
    format!("{BASE_URL}/{}:generateContent", self.model)
  }

  async fn generate(&self, preamble: &str, message: &str) -> Result<String> {
    let resp = self
      .client
      .post(self.url())
      .query(&[("key", self.api_key.as_str())])
      .json(&GenerateRequest::new(preamble, message))
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status(resp.status().as_u16()));
    }
    resp.json::<GenerateResponse>().await?.into_text()
  }
}

impl TextCompletion for GeminiClient {
  fn complete<'a>(
    &'a self,
    preamble: &'a str,
    message: &'a str,
  ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
    Box::pin(self.generate(preamble, message))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn request_carries_instruction_and_settings() {
    let body = serde_json::to_value(GenerateRequest::new("be brief", "hey")).unwrap();
    assert_eq!(body["system_instruction"]["parts"][0]["text"], "be brief");
    assert!(body["system_instruction"].get("role").is_none());
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "hey");
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
    let temp = body["generationConfig"]["temperature"].as_f64().unwrap();
    assert!((temp - 0.7).abs() < 1e-6);
  }

  #[test]
  fn response_text_is_first_candidate() {
    let resp: GenerateResponse = serde_json::from_value(json!({
      "candidates": [
        { "content": { "role": "model", "parts": [{ "text": " Join the reunion! " }] } },
        { "content": { "parts": [{ "text": "ignored" }] } }
      ]
    }))
    .unwrap();
    assert_eq!(resp.into_text().unwrap(), "Join the reunion!");
  }

  #[test]
  fn empty_response_is_an_error() {
    let resp: GenerateResponse = serde_json::from_value(json!({})).unwrap();
    assert!(matches!(resp.into_text(), Err(Error::EmptyCompletion)));

    let resp: GenerateResponse =
      serde_json::from_value(json!({ "candidates": [{}] })).unwrap();
    assert!(matches!(resp.into_text(), Err(Error::EmptyCompletion)));
  }
}
