mod app;
mod bridge;
mod components;
mod feed;
mod host;
mod state;
mod theme_watcher;

use crate::app::App;
use dioxus::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use twitch_panel_core::PanelConfig;

const APP_NAME: &str = "Live Streams";

/// Deployment configuration, compiled into the bundle
const PANEL_TOML: &str = include_str!("../assets/panel.toml");

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let (config, config_error) = match PanelConfig::from_toml_str(PANEL_TOML) {
        Ok(config) => (config, None),
        Err(e) => (PanelConfig::default(), Some(e)),
    };

    init_tracing(&config.logging.level);

    if let Some(e) = config_error {
        error!("Invalid panel.toml, using defaults: {e}");
    }

    if cfg!(not(target_arch = "wasm32")) {
        error!("{APP_NAME} runs in the browser; build it for wasm32 with `dx serve --platform web`");
        std::process::exit(1);
    }

    info!(
        "Starting {APP_NAME} (theme: {:?}, layout: {:?})",
        config.theme.preference, config.embed.layout
    );

    dioxus::LaunchBuilder::web().with_context(config).launch(root);
}

fn root() -> Element {
    rsx! {
        document::Title { "{APP_NAME}" }
        document::Stylesheet { href: asset!("/assets/panel.css") }
        App {}
    }
}

/// Initialize the global subscriber. `RUST_LOG` wins over the configured level
/// where an environment exists.
fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(target_arch = "wasm32")]
    let output_layer = tracing_wasm::WASMLayer::new(tracing_wasm::WASMLayerConfig::default());

    #[cfg(not(target_arch = "wasm32"))]
    let output_layer = tracing_subscriber::fmt::layer();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(output_layer)
        .try_init();
}
