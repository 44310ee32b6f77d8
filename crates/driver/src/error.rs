use thiserror::Error;

pub type Result<T> = std::result::Result<T, DriverError>;

/// Failures surfaced by a driver implementation.
///
/// The harness propagates these untouched; in particular a [`NotFound`]
/// raised while selecting a dropdown option must reach the test script with
/// the selector that failed to match.
///
/// [`NotFound`]: DriverError::NotFound
#[derive(Debug, Error)]
pub enum DriverError {
	#[error("no element matched selector: {selector}")]
	NotFound { selector: String },

	#[error("element is not visible: {selector}")]
	NotVisible { selector: String },

	#[error("no iframe matched selector: {selector}")]
	NoSuchFrame { selector: String },

	#[error("navigation failed: {url}")]
	Navigation { url: String, reason: String },

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("driver protocol error: {0}")]
	Protocol(String),
}

impl DriverError {
	/// Returns the selector carried by element-level failures, if any.
	pub fn selector(&self) -> Option<&str> {
		match self {
			DriverError::NotFound { selector }
			| DriverError::NotVisible { selector }
			| DriverError::NoSuchFrame { selector } => Some(selector),
			_ => None,
		}
	}
}
