//! Artifact naming and path templates.
//!
//! Screenshots and videos land under per-run directories rendered from a
//! [`PathTemplate`]; reports go to a fixed `reports/` tree. Naming is pure
//! string work so it stays unit-testable without a driver.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Screenshots directory under the project root.
pub const SCREENSHOTS_DIR: &str = "screenshots";
/// Videos directory under the project root.
pub const VIDEOS_DIR: &str = "videos";
/// Reports directory (structured JSON report lands here).
pub const REPORTS_DIR: &str = "reports";
/// HTML report directory.
pub const HTML_REPORT_DIR: &str = "reports/html";
/// Log files directory.
pub const LOGS_DIR: &str = "logs";

/// Default artifact path pattern; the caller appends the file extension.
pub const DEFAULT_PATH_PATTERN: &str = "{date}_{time}/{fixture}/{test}/{browser}/{fileIndex}";

/// Derives a filesystem-safe screenshot name: the base name plus a UTC
/// timestamp containing only digits and hyphens.
pub fn screenshot_name(base: &str, now: DateTime<Utc>) -> String {
	format!("{base}_{}", now.format("%Y-%m-%d-%H-%M-%S-%3f"))
}

/// Substitution context for one artifact file.
#[derive(Debug, Clone)]
pub struct ArtifactContext<'a> {
	pub fixture: &'a str,
	pub test: &'a str,
	pub browser: &'a str,
	pub file_index: u32,
	pub timestamp: DateTime<Utc>,
}

/// An artifact path pattern with `{date}`, `{time}`, `{fixture}`, `{test}`,
/// `{browser}` and `{fileIndex}` placeholders.
#[derive(Debug, Clone)]
pub struct PathTemplate {
	pattern: String,
}

impl Default for PathTemplate {
	fn default() -> Self {
		Self::new(DEFAULT_PATH_PATTERN)
	}
}

impl PathTemplate {
	pub fn new(pattern: impl Into<String>) -> Self {
		Self {
			pattern: pattern.into(),
		}
	}

	/// Renders the pattern for one artifact. Fixture and test names are
	/// sanitized so they cannot escape the artifact tree or produce
	/// filesystem-hostile components.
	pub fn render(&self, cx: &ArtifactContext<'_>) -> PathBuf {
		let rendered = self
			.pattern
			.replace("{date}", &cx.timestamp.format("%Y-%m-%d").to_string())
			.replace("{time}", &cx.timestamp.format("%H-%M-%S").to_string())
			.replace("{fixture}", &sanitize(cx.fixture))
			.replace("{test}", &sanitize(cx.test))
			.replace("{browser}", &sanitize(cx.browser))
			.replace("{fileIndex}", &cx.file_index.to_string());
		PathBuf::from(rendered)
	}
}

/// Replaces path separators and other filesystem-hostile characters with
/// hyphens, collapsing whitespace runs to single underscores.
fn sanitize(component: &str) -> String {
	let mut out = String::with_capacity(component.len());
	let mut in_space = false;
	for ch in component.trim().chars() {
		if ch.is_whitespace() {
			if !in_space {
				out.push('_');
				in_space = true;
			}
			continue;
		}
		in_space = false;
		match ch {
			'/' | '\\' | ':' | '.' | '*' | '?' | '"' | '<' | '>' | '|' => out.push('-'),
			_ => out.push(ch),
		}
	}
	out
}
