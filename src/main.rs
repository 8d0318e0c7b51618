use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use portfolio_voice_proxy::controllers::tts::TtsController;
use portfolio_voice_proxy::domain::tts::TtsService;
use portfolio_voice_proxy::infrastructure::config::{Config, LogFormat};
use portfolio_voice_proxy::infrastructure::http::start_http_server;
use portfolio_voice_proxy::infrastructure::repositories::ResembleTtsRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting portfolio voice proxy on {}:{}",
        config.host,
        config.port
    );

    // Create the speech vendor HTTP client
    let http_client = reqwest::Client::builder()
        .timeout(config.vendor_timeout())
        .build()?;

    tracing::info!(
        base_url = %config.resemble_base_url,
        timeout_secs = config.vendor_timeout_secs,
        pinned_voice = config.tts_voice_id.is_some(),
        "Speech vendor client initialized"
    );

    let settings = config.synthesis_settings();
    tracing::info!(
        sample_rate = settings.sample_rate,
        output_format = %settings.output_format,
        poll_interval_ms = settings.poll_interval.as_millis(),
        max_poll_attempts = settings.max_poll_attempts,
        "Synthesis settings loaded"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Repository (vendor client)
    let tts_repo = Arc::new(ResembleTtsRepository::new(
        http_client,
        config.resemble_base_url.clone(),
        config.resemble_api_key.clone(),
    ));

    // 2. Service
    let tts_service = Arc::new(TtsService::new(
        tts_repo,
        settings,
        config.tts_voice_id.clone(),
    ));

    // 3. Controller
    let tts_controller = Arc::new(TtsController::new(tts_service.clone()));

    start_http_server(config, tts_service, tts_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "portfolio_voice_proxy=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
