//! The LegacyLink assistant.
//!
//! Short questions with a canned answer are served from a fixed FAQ table;
//! everything else goes to a [`TextCompletion`] service, if one is
//! configured.

pub mod error;
pub mod faq;
pub mod gemini;

pub use error::{Error, Result};
pub use gemini::GeminiClient;

use std::{future::Future, pin::Pin, sync::Arc};

use serde::Serialize;

/// Instruction sent ahead of every user message.
pub const PREAMBLE: &str = "You are the LegacyLink Assistant. Keep responses \
                            under 15 words and give only one response. Focus \
                            on college, alumni, and student-related topics.";

/// A remote text-generation backend.
///
/// Returns a boxed future so the assistant can hold any backend behind a
/// trait object.
pub trait TextCompletion: Send + Sync {
  fn complete<'a>(
    &'a self,
    preamble: &'a str,
    message: &'a str,
  ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
  Faq,
  Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
  pub text:   String,
  pub source: ReplySource,
}

#[derive(Clone, Default)]
pub struct Assistant {
  completion: Option<Arc<dyn TextCompletion>>,
}

impl Assistant {
  pub fn new(completion: Option<Arc<dyn TextCompletion>>) -> Self {
    Self { completion }
  }

  /// An assistant that only knows the FAQ table.
  pub fn faq_only() -> Self { Self::default() }

  pub async fn reply(&self, message: &str) -> Result<Reply> {
    let message = message.trim();
    if message.is_empty() {
      return Err(Error::EmptyMessage);
    }

    if let Some(text) = faq::lookup(message) {
      return Ok(Reply { text: text.to_owned(), source: ReplySource::Faq });
    }

    let completion = self.completion.as_ref().ok_or(Error::Unavailable)?;
    let text = completion.complete(PREAMBLE, message).await?;
    tracing::debug!(chars = text.len(), "completion received");
    Ok(Reply { text, source: ReplySource::Model })
  }
}
