use super::model::ModelKey;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum GenerationServiceError {
    #[error("Missing prompt or model selection")]
    EmptyPrompt,
    #[error("Model {0} is not configured.")]
    NotConfigured(ModelKey),
    #[error("{model} is temporarily unavailable or busy. Details: {message}")]
    Upstream { model: ModelKey, message: String },
}

impl From<GenerationServiceError> for AppError {
    fn from(err: GenerationServiceError) -> Self {
        match err {
            GenerationServiceError::EmptyPrompt => AppError::BadRequest(err.to_string()),
            GenerationServiceError::NotConfigured(_) => AppError::NotFound(err.to_string()),
            GenerationServiceError::Upstream { .. } => AppError::ServiceUnavailable(err.to_string()),
        }
    }
}
