pub mod build_info;

use std::{io, sync::Once};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVES: &str = "onsite=info,onsite_core=info,onsite_storage_json=info";

/// Initializes the global tracing subscriber. Logs go to stderr so command output
/// on stdout stays machine readable. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    });
}
