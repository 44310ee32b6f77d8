//! Structured logging for the harness.
//!
//! One console layer plus two rolling file sinks under `logs/`: a combined
//! log and an error-only log. Panics are routed through `tracing::error!` so
//! they land in both files. Initialization is explicit; nothing here is
//! lazily constructed behind the caller's back.

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Settings;
use crate::error::{HarnessError, Result};

/// Keeps the non-blocking file writers flushing. Hold this for the life of
/// the process; dropping it stops the background writer threads.
pub struct LogGuards {
	_combined: WorkerGuard,
	_errors: WorkerGuard,
}

/// Initializes the process-wide subscriber from the settings.
///
/// `RUST_LOG` overrides `LOG_LEVEL` when set. Fails if called twice or if
/// the log directory cannot be created.
pub fn init(settings: &Settings) -> Result<LogGuards> {
	std::fs::create_dir_all(&settings.log_path)?;

	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

	let combined = tracing_appender::rolling::daily(&settings.log_path, "combined.log");
	let (combined_writer, combined_guard) = tracing_appender::non_blocking(combined);

	let errors = tracing_appender::rolling::daily(&settings.log_path, "error.log");
	let (error_writer, error_guard) = tracing_appender::non_blocking(errors);

	tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr.with_max_level(Level::TRACE))
				.compact(),
		)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(combined_writer)
				.with_ansi(false),
		)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(error_writer.with_max_level(Level::ERROR))
				.with_ansi(false),
		)
		.try_init()
		.map_err(|e| HarnessError::LoggingInit(e.to_string()))?;

	install_panic_hook();

	Ok(LogGuards {
		_combined: combined_guard,
		_errors: error_guard,
	})
}

/// Routes panics through the subscriber so they reach the error log, then
/// delegates to the previous hook for the usual stderr backtrace.
fn install_panic_hook() {
	let previous = std::panic::take_hook();
	std::panic::set_hook(Box::new(move |info| {
		tracing::error!(kind = "panic", "{info}");
		previous(info);
	}));
}

/// Logs a named test step at info level.
pub fn test_step(step: &str) {
	tracing::info!(kind = "step", "TEST STEP: {step}");
}

/// Logs a driver-facing action at debug level.
pub fn test_action(action: &str) {
	tracing::debug!(kind = "action", "TEST ACTION: {action}");
}

/// Logs an assertion description at info level.
pub fn test_assertion(assertion: &str) {
	tracing::info!(kind = "assertion", "TEST ASSERTION: {assertion}");
}
