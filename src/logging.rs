use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const HTTP_DEFAULT_FILTER: &str = "course_timetable=info,tower_http=info";
pub const CLI_DEFAULT_FILTER: &str = "course_timetable=error";

/// Install a compact stderr subscriber. `RUST_LOG` wins over `default_filter`.
/// Calling this twice is harmless; the second install is ignored.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
