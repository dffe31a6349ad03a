pub mod binding;
pub mod busy;
pub mod commands;
pub mod config;
pub mod session;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use binding::Binding;
pub use busy::{BusyFlag, BusyGuard};
pub use config::ClientConfig;
pub use session::SessionStore;
pub use state::AppContext;

/// Install the global tracing subscriber. Call once at app start.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ripple_client=debug,ripple_backend=debug,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!("Starting Ripple client");
}
