//! Text generation for the study broker.
//!
//! This crate provides:
//! - The [`TextGenerator`] port: structured prompt in, JSON out
//! - [`PromptRequest`], a named template with string parameters and an output schema
//! - [`GeminiClient`], the HTTP adapter for Google's Gemini API

pub mod client;
pub mod error;
pub mod port;
pub mod prompt;
pub mod types;

pub use client::{GeminiClient, GeminiConfig};
pub use error::{GenAiError, GenAiResult};
pub use port::{generate_as, TextGenerator};
pub use prompt::PromptRequest;
