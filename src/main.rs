mod api;
mod app;
mod components;
mod config;
mod error;
mod logging;
mod map;
mod outcome;
mod pages;
mod params;
mod picker;
mod presenter;
mod resources;
mod session;
mod submitter;
#[cfg(test)]
mod testing;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    logging::init(&config.log_filter);
    tracing::info!("Processing service at {}", config.api_base_url);

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
