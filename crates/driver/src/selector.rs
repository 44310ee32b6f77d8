//! Typed element selectors.
//!
//! A [`Selector`] is a CSS selector plus an optional human-readable label.
//! The label feeds log lines and assertion messages so failures read as
//! "login button" rather than `#header > form button.btn-primary`.

use serde::{Deserialize, Serialize};

/// A CSS selector with an optional descriptive label for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
	/// The CSS selector string handed to the driver.
	pub css: String,
	/// Human-readable label used in log lines and assertion messages.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
}

impl Selector {
	/// Creates a selector from a CSS string.
	pub fn css(css: impl Into<String>) -> Self {
		Self {
			css: css.into(),
			label: None,
		}
	}

	/// Attaches a descriptive label used in diagnostics.
	pub fn labeled(css: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			css: css.into(),
			label: Some(label.into()),
		}
	}

	/// The string used when this selector appears in a log line or an error.
	pub fn describe(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.css)
	}
}

impl std::fmt::Display for Selector {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.describe())
	}
}

impl From<&str> for Selector {
	fn from(css: &str) -> Self {
		Selector::css(css)
	}
}
