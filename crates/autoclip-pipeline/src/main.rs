//! Intelligent video clipper binary.

use std::path::PathBuf;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use autoclip_pipeline::{AppConfig, Processor};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("autoclip=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting autoclip");

    // Optional config file from the first argument or AUTOCLIP_CONFIG
    let config_path: Option<PathBuf> = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("AUTOCLIP_CONFIG").ok())
        .map(PathBuf::from);

    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };
    info!(url = %config.video_url, project = %config.project_name, "configuration loaded");

    let processor = Processor::new(config);

    if let Err(e) = processor.check_dependencies() {
        error!("Missing dependency: {}", e);
        std::process::exit(2);
    }

    match processor.run().await {
        Ok(summary) => {
            info!(
                clips = summary.clips.len(),
                reel = summary.highlight_reel.is_some(),
                report = %summary.report_path.display(),
                "run complete"
            );
        }
        Err(e) => {
            error!("Run failed: {}", e);
            let code = if e.is_exhaustion() { 3 } else { 1 };
            std::process::exit(code);
        }
    }
}
