//! Environment-backed harness settings.
//!
//! [`Settings`] is assembled once from environment variables at process start
//! and stays read-only afterwards; every component receives it explicitly at
//! construction. Each variable has a documented default so a bare environment
//! still yields a runnable configuration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::artifacts;
use crate::error::{HarnessError, Result};

/// A test user's login pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
	pub email: String,
	pub password: String,
}

/// Harness configuration resolved from the environment.
///
/// | Variable | Default |
/// |---|---|
/// | `BASE_URL` | `http://automationpractice.com/index.php` |
/// | `BROWSER` | `chrome` |
/// | `HEADLESS` | `false` |
/// | `CONCURRENCY` | `1` |
/// | `TEST_TIMEOUT` | `30000` (ms) |
/// | `RETRY_COUNT` | `0` |
/// | `SCREENSHOT_ON_FAIL` | `true` |
/// | `VIDEO_RECORDING` | `false` |
/// | `LOG_LEVEL` | `info` |
/// | `TEST_USER1_EMAIL` / `TEST_USER1_PASSWORD` | built-in test account |
/// | `TEST_USER2_EMAIL` / `TEST_USER2_PASSWORD` | built-in test account |
/// | `CI`, `GITHUB_ACTIONS` | `false` |
#[derive(Debug, Clone)]
pub struct Settings {
	pub base_url: String,
	pub browser: String,
	pub headless: bool,
	/// Maximum number of simultaneous browser sessions.
	pub concurrency: usize,
	/// Per-test deadline in milliseconds.
	pub test_timeout_ms: u64,
	/// Quarantine retries for flaky test cases.
	pub retry_count: u32,
	pub screenshot_on_fail: bool,
	pub video_recording: bool,
	pub log_level: String,
	users: HashMap<String, Credentials>,
	pub is_ci: bool,
	pub is_github_actions: bool,
	pub screenshot_path: PathBuf,
	pub video_path: PathBuf,
	pub report_path: PathBuf,
	pub html_report_path: PathBuf,
	pub log_path: PathBuf,
}

impl Settings {
	/// Reads settings from the process environment.
	pub fn from_env() -> Self {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reads settings through an arbitrary variable lookup.
	///
	/// The seam tests use to avoid mutating process-global environment state.
	pub fn from_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut users = HashMap::new();
		users.insert(
			"testUser1".to_string(),
			Credentials {
				email: string_or(&lookup, "TEST_USER1_EMAIL", "Harrison30@gmail.com"),
				password: string_or(&lookup, "TEST_USER1_PASSWORD", "oO_PI6jocB1JOLN"),
			},
		);
		users.insert(
			"testUser2".to_string(),
			Credentials {
				email: string_or(&lookup, "TEST_USER2_EMAIL", "Bryon55@gmail.com"),
				password: string_or(&lookup, "TEST_USER2_PASSWORD", "UYn4zvvJS45jLqB"),
			},
		);

		Self {
			base_url: string_or(&lookup, "BASE_URL", "http://automationpractice.com/index.php"),
			browser: string_or(&lookup, "BROWSER", "chrome"),
			headless: flag(&lookup, "HEADLESS"),
			concurrency: number_or(&lookup, "CONCURRENCY", 1),
			test_timeout_ms: number_or(&lookup, "TEST_TIMEOUT", 30_000),
			retry_count: number_or(&lookup, "RETRY_COUNT", 0),
			screenshot_on_fail: lookup("SCREENSHOT_ON_FAIL").as_deref() != Some("false"),
			video_recording: flag(&lookup, "VIDEO_RECORDING"),
			log_level: string_or(&lookup, "LOG_LEVEL", "info"),
			users,
			is_ci: flag(&lookup, "CI"),
			is_github_actions: flag(&lookup, "GITHUB_ACTIONS"),
			screenshot_path: PathBuf::from(artifacts::SCREENSHOTS_DIR),
			video_path: PathBuf::from(artifacts::VIDEOS_DIR),
			report_path: PathBuf::from(artifacts::REPORTS_DIR),
			html_report_path: PathBuf::from(artifacts::HTML_REPORT_DIR),
			log_path: PathBuf::from(artifacts::LOGS_DIR),
		}
	}

	/// Looks up a test user's credentials by key (e.g. `testUser1`).
	pub fn credentials(&self, key: &str) -> Result<&Credentials> {
		self.users.get(key).ok_or_else(|| HarnessError::MissingCredentials {
			key: key.to_string(),
		})
	}

	/// Browser selector string for the driver: `chrome` or `chrome:headless`.
	pub fn browser_selector(&self) -> String {
		if self.headless {
			format!("{}:headless", self.browser)
		} else {
			self.browser.clone()
		}
	}
}

fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
	F: Fn(&str) -> Option<String>,
{
	lookup(key).unwrap_or_else(|| default.to_string())
}

/// `true` only when the variable is exactly `"true"`.
fn flag<F>(lookup: &F, key: &str) -> bool
where
	F: Fn(&str) -> Option<String>,
{
	lookup(key).as_deref() == Some("true")
}

/// Parses a numeric variable, falling back to the default on absence or on
/// an unparseable value.
fn number_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
	F: Fn(&str) -> Option<String>,
	T: FromStr,
{
	lookup(key)
		.and_then(|raw| raw.trim().parse().ok())
		.unwrap_or(default)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
		move |key| {
			pairs
				.iter()
				.find(|(k, _)| *k == key)
				.map(|(_, v)| (*v).to_string())
		}
	}

	#[test]
	fn defaults_apply_on_empty_environment() {
		let settings = Settings::from_lookup(|_| None);
		assert_eq!(settings.base_url, "http://automationpractice.com/index.php");
		assert_eq!(settings.browser, "chrome");
		assert!(!settings.headless);
		assert_eq!(settings.concurrency, 1);
		assert_eq!(settings.test_timeout_ms, 30_000);
		assert_eq!(settings.retry_count, 0);
		assert!(settings.screenshot_on_fail);
		assert!(!settings.video_recording);
		assert_eq!(settings.log_level, "info");
		assert!(!settings.is_ci);
	}

	#[test]
	fn environment_overrides_defaults() {
		let settings = Settings::from_lookup(lookup_from(&[
			("BASE_URL", "https://staging.shop.example"),
			("BROWSER", "firefox"),
			("HEADLESS", "true"),
			("CONCURRENCY", "4"),
			("SCREENSHOT_ON_FAIL", "false"),
			("CI", "true"),
		]));
		assert_eq!(settings.base_url, "https://staging.shop.example");
		assert_eq!(settings.browser_selector(), "firefox:headless");
		assert_eq!(settings.concurrency, 4);
		assert!(!settings.screenshot_on_fail);
		assert!(settings.is_ci);
	}

	#[test]
	fn unparseable_numbers_fall_back_to_defaults() {
		let settings = Settings::from_lookup(lookup_from(&[
			("CONCURRENCY", "lots"),
			("TEST_TIMEOUT", ""),
		]));
		assert_eq!(settings.concurrency, 1);
		assert_eq!(settings.test_timeout_ms, 30_000);
	}

	#[test]
	fn default_credentials_resolve() {
		let settings = Settings::from_lookup(|_| None);
		let user = settings.credentials("testUser1").unwrap();
		assert_eq!(user.email, "Harrison30@gmail.com");
		assert_eq!(user.password, "oO_PI6jocB1JOLN");
	}

	#[test]
	fn unknown_credential_key_names_the_key() {
		let settings = Settings::from_lookup(|_| None);
		let err = settings.credentials("unknownKey").unwrap_err();
		assert!(err.to_string().contains("unknownKey"));
	}

	#[test]
	fn credential_overrides_from_environment() {
		let settings = Settings::from_lookup(lookup_from(&[
			("TEST_USER1_EMAIL", "qa@shop.example"),
			("TEST_USER1_PASSWORD", "hunter2hunter2"),
		]));
		let user = settings.credentials("testUser1").unwrap();
		assert_eq!(user.email, "qa@shop.example");
		assert_eq!(user.password, "hunter2hunter2");
	}

	#[test]
	fn browser_selector_without_headless() {
		let settings = Settings::from_lookup(|_| None);
		assert_eq!(settings.browser_selector(), "chrome");
	}
}
