//! The text generation port.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{GenAiError, GenAiResult};
use crate::prompt::PromptRequest;

/// Submit structured prompt parameters, receive structured output or failure.
///
/// Implementations return the raw JSON value produced by the model; callers
/// usually go through [`generate_as`] to decode it into the requested shape.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &PromptRequest) -> GenAiResult<Value>;

    /// Whether the generator has what it needs to serve requests.
    fn is_ready(&self) -> bool {
        true
    }
}

/// Generate and decode output into `T`.
///
/// A value that does not match `T` is reported as [`GenAiError::InvalidOutput`].
pub async fn generate_as<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    prompt: &PromptRequest,
) -> GenAiResult<T> {
    let value = generator.generate(prompt).await?;
    serde_json::from_value(value)
        .map_err(|e| GenAiError::invalid_output(format!("{}: {}", prompt.name, e)))
}
