//! Tracing setup shared by unit and integration tests

use std::sync::Once;

use tracing_subscriber::{fmt, fmt::format::FmtSpan, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Used when `RUST_LOG` is unset: store events at debug, dependencies at warn.
const DEFAULT_FILTER: &str = "warn,treestore=debug";

/// Installs a global subscriber that writes through the test harness capture.
///
/// Every test may call this; only the first call installs anything, and a
/// subscriber installed elsewhere is left in place.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter);

        if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
            eprintln!("test logging not installed: {}", e);
        }
        tracing::debug!("test logging ready");
    });
}
