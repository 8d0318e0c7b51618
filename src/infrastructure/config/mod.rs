use crate::domain::tts::SynthesisSettings;
use crate::infrastructure::repositories::resemble_tts_repository::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    // Speech vendor
    pub resemble_api_key: String,
    pub resemble_base_url: String,
    pub vendor_timeout_secs: u64,
    // Synthesis
    pub tts_voice_id: Option<String>,
    pub tts_sample_rate: u32,
    pub tts_output_format: String,
    pub tts_poll_interval_ms: u64,
    pub tts_poll_max_attempts: u32,
    pub tts_max_text_chars: usize,
    // CORS, None allows any origin
    pub cors_allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            resemble_api_key: env::var("RESEMBLE_API_KEY")
                .map_err(|_| "RESEMBLE_API_KEY is not configured")?,
            resemble_base_url: env::var("RESEMBLE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            vendor_timeout_secs: env::var("TTS_VENDOR_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            tts_voice_id: optional_var("TTS_VOICE_ID"),
            tts_sample_rate: env::var("TTS_SAMPLE_RATE")
                .unwrap_or_else(|_| "22050".to_string())
                .parse()?,
            tts_output_format: env::var("TTS_OUTPUT_FORMAT").unwrap_or_else(|_| "mp3".to_string()),
            tts_poll_interval_ms: env::var("TTS_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()?,
            tts_poll_max_attempts: env::var("TTS_POLL_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()?,
            tts_max_text_chars: env::var("TTS_MAX_TEXT_CHARS")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            cors_allowed_origins: optional_var("CORS_ALLOWED_ORIGINS").map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            }),
        };

        if config.tts_poll_max_attempts == 0 {
            return Err("TTS_POLL_MAX_ATTEMPTS must be at least 1".into());
        }

        Ok(config)
    }

    pub fn synthesis_settings(&self) -> SynthesisSettings {
        SynthesisSettings {
            sample_rate: self.tts_sample_rate,
            output_format: self.tts_output_format.clone(),
            poll_interval: Duration::from_millis(self.tts_poll_interval_ms),
            max_poll_attempts: self.tts_poll_max_attempts,
            max_text_chars: self.tts_max_text_chars,
        }
    }

    pub fn vendor_timeout(&self) -> Duration {
        Duration::from_secs(self.vendor_timeout_secs)
    }
}

/// Unset and blank are treated the same
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
