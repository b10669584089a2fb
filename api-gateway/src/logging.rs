//! Tracing subscriber setup

use tracing::Level;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Level used for per-request trace events
///
/// Bare levels like `debug` map directly; filter directives such as
/// `api_gateway=debug,tower_http=info` fall back to `INFO`.
pub fn request_level(log_level: &str) -> Level {
    log_level.parse::<Level>().unwrap_or(Level::INFO)
}

/// Install the global tracing subscriber
///
/// `log_level` is either a bare level or a full `EnvFilter` directive list.
/// Returns `false` when a subscriber was already installed.
pub fn init(log_level: &str, json: bool) -> bool {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::CLOSE);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish()).is_ok()
    } else {
        tracing::subscriber::set_global_default(builder.finish()).is_ok()
    }
}
