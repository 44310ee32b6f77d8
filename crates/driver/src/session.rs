//! The [`Target`] and [`Session`] capability traits.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::Selector;
use crate::error::Result;

/// A lazy handle to zero-or-more matched elements in the page under test.
///
/// Every query re-evaluates against the live page; holding a `Target` across
/// a navigation is allowed and simply resolves against the new document.
#[async_trait]
pub trait Target: Send + Sync {
	/// Whether at least one element currently matches.
	async fn exists(&self) -> Result<bool>;

	/// Whether the first matched element is rendered visible.
	///
	/// An element that does not exist is not visible.
	async fn visible(&self) -> Result<bool>;

	/// Rendered text content of the first matched element.
	async fn text(&self) -> Result<String>;

	/// Attribute value of the first matched element, `None` when absent.
	async fn attribute(&self, name: &str) -> Result<Option<String>>;

	/// Cardinality of the matched element set.
	async fn count(&self) -> Result<usize>;

	/// Checked state of the first matched element (checkboxes, radios).
	async fn checked(&self) -> Result<bool>;

	/// Human-readable description for log lines and assertion messages.
	fn description(&self) -> String;
}

/// The active browsing context actions and reads are performed against.
///
/// A session is bound to one browser page. All operations within a session
/// are strictly ordered by the caller; implementations may assume no two
/// calls race against the same page state.
#[async_trait]
pub trait Session: Send + Sync {
	type Target: Target + Clone + Send + Sync;

	/// Resolves a selector into a target handle. Cheap; no driver round-trip.
	fn target(&self, selector: &Selector) -> Self::Target;

	/// Derives the `<option>` of a dropdown matched by visible text.
	fn option_by_text(&self, dropdown: &Self::Target, text: &str) -> Self::Target;

	/// Derives the `<option>` of a dropdown matched by its value attribute.
	fn option_by_value(&self, dropdown: &Self::Target, value: &str) -> Self::Target;

	async fn click(&self, target: &Self::Target) -> Result<()>;

	async fn double_click(&self, target: &Self::Target) -> Result<()>;

	async fn right_click(&self, target: &Self::Target) -> Result<()>;

	async fn hover(&self, target: &Self::Target) -> Result<()>;

	/// Clears any existing value via select-all-then-delete.
	async fn clear_text(&self, target: &Self::Target) -> Result<()>;

	/// Types `text` into the target, appending to the current value.
	async fn type_text(&self, target: &Self::Target, text: &str) -> Result<()>;

	/// Scrolls the target into view. The target need not be visible yet.
	async fn scroll_into_view(&self, target: &Self::Target) -> Result<()>;

	async fn goto(&self, url: &str) -> Result<()>;

	/// Hard reload, bypassing the page cache.
	async fn reload_bypass_cache(&self) -> Result<()>;

	async fn current_url(&self) -> Result<String>;

	/// Makes the iframe matched by `target` the active execution context.
	async fn enter_frame(&self, target: &Self::Target) -> Result<()>;

	/// Returns the execution context to the main window.
	async fn leave_frame(&self) -> Result<()>;

	/// Captures a screenshot under the given artifact name and returns the
	/// path it was written to.
	async fn screenshot(&self, name: &str) -> Result<PathBuf>;
}
