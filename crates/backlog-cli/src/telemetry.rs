//! Logging setup for the `backlog` binary.
//!
//! Log output goes to stderr so stdout only carries results (summary line,
//! `--json` report, dry-run bodies). Filtering follows `RUST_LOG` and falls
//! back to `info`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging() {
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        );

    // 既に subscriber が設定されていれば何もしない
    let _ = registry.try_init();
}
