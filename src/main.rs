mod app;
mod components;
mod config;
mod panel;
mod view;
mod weather;

use anyhow::Context;
use app::WeatherApp;
use config::Config;
use iced::{window, Application, Settings, Size};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    if !config.has_api_key() {
        warn!(
            "No API key configured; set {} or add api_key to the config file",
            config::API_KEY_ENV
        );
    }
    info!(language = %config.language, "Starting weather window");

    let settings = Settings {
        window: window::Settings {
            size: Size::new(700.0, 700.0),
            resizable: false,
            ..window::Settings::default()
        },
        ..Settings::with_flags(config)
    };

    WeatherApp::run(settings).context("Failed to run the weather window")
}
