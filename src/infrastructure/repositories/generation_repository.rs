use async_trait::async_trait;

/// Repository for music generation.
/// Abstracts the upstream inference provider (HuggingFace Inference API,
/// a self-hosted model server, etc.); one instance per configured model.
///
/// Implementations are responsible for:
/// - Provider-specific request payloads and authentication
/// - Enforcing a request timeout
/// - Reporting upstream failures as a human-readable message
#[async_trait]
pub trait GenerationRepository: Send + Sync {
    /// Generate audio from a text prompt.
    ///
    /// Returns the raw audio bytes exactly as the provider produced them;
    /// callers treat the payload as opaque.
    ///
    /// # Errors
    /// Returns an error message if the provider is unreachable or responds
    /// with a non-success status.
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, String>;
}
