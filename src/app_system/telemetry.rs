use tracing_subscriber::fmt::time::uptime;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` controls the filter (default
/// `info`); `json` switches from compact text to JSON lines.
pub fn setup_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(uptime());

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}
