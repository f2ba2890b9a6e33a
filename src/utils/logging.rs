//! Tracing subscriber setup

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "vip_video_parser=info,vip_parser=info";

/// Build the filter directive for a configured level
pub fn filter_for_level(level: &str) -> String {
    format!("vip_video_parser={level},vip_parser={level}")
}

/// Install the global fmt subscriber; repeated calls are ignored
pub fn init_tracing(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        level
            .map(filter_for_level)
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
            .into()
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run `f` with a temporary stderr subscriber.
///
/// Used for work that happens before `init_tracing`, such as loading the
/// configuration that decides the log level.
pub fn with_bootstrap_logging<T>(f: impl FnOnce() -> T) -> T {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    with_scoped_subscriber(filter, std::io::stderr, f)
}

fn with_scoped_subscriber<W, T>(filter: EnvFilter, writer: W, f: impl FnOnce() -> T) -> T
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}
