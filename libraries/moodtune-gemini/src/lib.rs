//! Moodtune Gemini Client
//!
//! Minimal client for the `generateContent` endpoint of the Google
//! generative language API. Only single-turn text prompts are supported.
//!
//! ```ignore
//! use moodtune_gemini::{GeminiClient, GeminiConfig};
//!
//! let client = GeminiClient::new(GeminiConfig::new("api-key"))?;
//! let answer = client.generate("Say hello").await?;
//! ```

mod client;
mod error;
mod types;

pub use client::GeminiClient;
pub use error::{GeminiError, Result};
pub use types::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
