//! Shared plumbing for the offline tools: TOML loading and the scripted player.

pub mod load;
pub mod sim;

use std::io;

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber honouring `RUST_LOG`, defaulting to `default_level`.
pub fn init_tracing(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(io::stderr).init();
}
