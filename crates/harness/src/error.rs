use storecheck_driver::DriverError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

/// Failures raised by the harness layers.
///
/// Assertion and timeout failures are never silently swallowed; only
/// [`click_with_retry`](crate::Actions::click_with_retry) suppresses them,
/// and only until its attempt budget runs out.
#[derive(Debug, Error)]
pub enum HarnessError {
	/// An expected condition did not hold.
	#[error("{message} (expected: {expected}, actual: {actual})")]
	Assertion {
		message: String,
		expected: String,
		actual: String,
	},

	/// A wait condition was not met within its deadline.
	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	#[error("user credentials not found for key: {key}")]
	MissingCredentials { key: String },

	#[error("logging initialization failed: {0}")]
	LoggingInit(String),

	#[error(transparent)]
	Driver(#[from] DriverError),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl HarnessError {
	pub(crate) fn assertion(
		message: impl Into<String>,
		expected: impl ToString,
		actual: impl ToString,
	) -> Self {
		HarnessError::Assertion {
			message: message.into(),
			expected: expected.to_string(),
			actual: actual.to_string(),
		}
	}

	/// True for timeout failures, from either the harness or the driver.
	pub fn is_timeout(&self) -> bool {
		matches!(self, HarnessError::Timeout { .. })
	}

	pub fn is_assertion(&self) -> bool {
		matches!(self, HarnessError::Assertion { .. })
	}
}
