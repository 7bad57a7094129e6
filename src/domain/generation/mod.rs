pub mod error;
pub mod format;
pub mod model;
pub mod service;

pub use error::GenerationServiceError;
pub use format::AudioFormat;
pub use model::ModelKey;
pub use service::{GenerationResult, GenerationService, GenerationServiceApi};
