use crate::Result;
use async_trait::async_trait;

/// Boundary to the external natural-language generation service.
///
/// One operation: given a prompt, return the completion text or fail. The
/// returned text is free-form; callers must never assume it is valid JSON
/// without running it through a tolerant decode step.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Provider-facing model identifier.
    fn name(&self) -> &str;

    /// Request a completion for `prompt`. The call blocks the workflow
    /// until the service answers; there is no cancellation.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
