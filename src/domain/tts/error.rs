use crate::error::AppError;
use crate::infrastructure::repositories::VendorError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthesisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("No voices found. Please create a voice in your speech vendor account.")]
    NoVoiceConfigured,
    #[error("No projects found in your speech vendor account.")]
    NoProjectConfigured,
    #[error("vendor request `{operation}` failed: {detail}")]
    VendorRequestFailed {
        operation: &'static str,
        status: Option<u16>,
        detail: String,
    },
    #[error("audio generation timed out after {attempts} polls")]
    SynthesisTimeout { attempts: u32 },
}

impl SynthesisError {
    /// Wrap a repository failure, keeping the vendor status for diagnostics
    pub fn vendor(operation: &'static str, err: VendorError) -> Self {
        SynthesisError::VendorRequestFailed {
            operation,
            status: err.status(),
            detail: err.to_string(),
        }
    }

    /// Account setup problems an operator has to fix
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SynthesisError::NoVoiceConfigured | SynthesisError::NoProjectConfigured
        )
    }
}

impl From<SynthesisError> for AppError {
    fn from(err: SynthesisError) -> Self {
        if err.is_configuration() {
            tracing::warn!(error = %err, "Speech vendor account needs operator setup");
        }

        match err {
            SynthesisError::InvalidInput(msg) => AppError::BadRequest(msg),
            SynthesisError::NoVoiceConfigured | SynthesisError::NoProjectConfigured => {
                AppError::NotFound(err.to_string())
            }
            SynthesisError::VendorRequestFailed {
                operation, status, ..
            } => AppError::ExternalService {
                message: "Speech vendor request failed".to_string(),
                details: Some(match status {
                    Some(code) => format!("{} returned status {}", operation, code),
                    None => format!("{} could not be completed", operation),
                }),
            },
            SynthesisError::SynthesisTimeout { .. } => {
                AppError::Timeout("Audio generation timed out".to_string())
            }
        }
    }
}
