pub mod resemble_tts_repository;
pub mod tts_repository;

pub use resemble_tts_repository::ResembleTtsRepository;
pub use tts_repository::{SpeechParams, TtsRepository, VendorError};
