mod generation_repository;
mod hf_inference_repository;

pub use generation_repository::GenerationRepository;
pub use hf_inference_repository::HfInferenceRepository;
