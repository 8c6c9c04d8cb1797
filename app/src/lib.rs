//! Host-side glue for the 7TV link emote engine.
//!
//! `hooks` exposes the render hooks the chat client calls with JSON
//! payloads; `config` loads the settings snapshot from the environment.

pub mod config;
pub mod hooks;

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}
