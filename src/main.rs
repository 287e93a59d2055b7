//! Genfinity desktop entry point

use dioxus::desktop::{Config, WindowBuilder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // A missing .env is normal; the key may come from the shell
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = dotenv {
        tracing::debug!("No .env file loaded: {}", e);
    }
    tracing::info!("Starting Genfinity v{}", env!("CARGO_PKG_VERSION"));

    let window = WindowBuilder::new()
        .with_title("Genfinity")
        .with_resizable(true);

    // Utility classes come from the Tailwind runtime; tokens live in main.css
    let head = r#"<script src="https://cdn.tailwindcss.com"></script>"#.to_string();

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(window)
                .with_custom_head(head),
        )
        .launch(genfinity::app::App);
}
