pub mod dto;
pub mod error;
pub mod model;
pub mod polling;
pub mod service;
pub mod strategy;
pub mod voice;

pub use error::SynthesisError;
pub use model::{AudioUrl, ClipJob, SynthesisRequest, SynthesisSettings, VendorProject, VendorVoice};
pub use service::{TtsService, TtsServiceApi};
pub use voice::VoiceResolver;
