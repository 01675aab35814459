//! Tracing setup for xtask commands.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::dirs;

/// Installs a stderr layer and, when `log_file` is set, a file layer under
/// the platform log directory.
///
/// `RUST_LOG` wins over `verbosity`. The returned guard must stay alive for
/// the file writer to flush.
pub fn init(verbosity: u8, log_file: bool) -> Result<Option<WorkerGuard>> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = if log_file {
        let log_dir = dirs::log_dir();
        std::fs::create_dir_all(&log_dir)?;
        let appender = tracing_appender::rolling::never(&log_dir, "xtask.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
