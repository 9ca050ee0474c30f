use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the JSON tracing subscriber for the CLI.
///
/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// the default level.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .ok();
}
