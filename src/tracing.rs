//! Tracing initialization.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize tracing on stderr, keeping stdout free for the MCP transport.
///
/// `RUST_LOG` refines the filter; `verbose` (the `--verbose` flag) lowers the
/// default level to DEBUG. Safe to call multiple times.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let is_test = under_test_runner();
        let filter =
            EnvFilter::from_default_env().add_directive(default_level(verbose, is_test).into());

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
            .compact();

        let installed = if is_test {
            builder.with_test_writer().finish().try_init()
        } else {
            builder.with_writer(std::io::stderr).finish().try_init()
        };
        if let Err(e) = installed {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}

fn under_test_runner() -> bool {
    std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok()
}

fn default_level(verbose: bool, is_test: bool) -> Level {
    if verbose || is_test {
        Level::DEBUG
    } else {
        Level::INFO
    }
}
