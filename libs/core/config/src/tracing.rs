use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is unset in production.
const PRODUCTION_FILTER: &str = "info,tower_http=info,mongodb=warn";

/// Default filter when `RUST_LOG` is unset in development.
const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug,mongodb=info";

/// Install color-eyre with the workspace configuration.
///
/// Call this first in `main()`. Shows error locations and hides the
/// environment section. Safe to call more than once.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing for the given environment.
///
/// - **Production** (`APP_ENV=production`): flattened JSON events without
///   module targets, for log shippers.
/// - **Development** (default): pretty, multi-line output.
///
/// Both install `tracing_error::ErrorLayer` so `color-eyre` reports carry
/// the active span trace. `RUST_LOG` overrides the default filter.
///
/// A second call is a no-op, which keeps tests that share a process quiet.
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new(PRODUCTION_FILTER)
        } else {
            EnvFilter::new(DEVELOPMENT_FILTER)
        }
    });

    let result = if is_production {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(environment = ?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
