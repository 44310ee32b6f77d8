//! Wait-safe interaction helpers.
//!
//! Every interaction waits for its element before acting, so test scripts
//! never race the page's rendering. Each helper logs its intent before
//! touching the driver.
//!
//! The only helper with retry semantics is [`Actions::click_with_retry`]:
//! bounded attempts, fixed pause, final error re-raised untouched. Everything
//! else propagates the first failure immediately.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use storecheck_driver::{Selector, Session, Target};
use tracing::{debug, info};

use crate::artifacts;
use crate::config::Settings;
use crate::error::{HarnessError, Result};
use crate::retry::{RetryPolicy, retry};

/// Default deadline for element waits.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Pause between clicks inside [`Actions::click_with_retry`].
pub const CLICK_RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Polling interval for wait conditions.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Interaction helpers bound to one driver session.
pub struct Actions<'a, S: Session> {
	session: &'a S,
	settings: &'a Settings,
}

impl<'a, S: Session> Actions<'a, S> {
	pub fn new(session: &'a S, settings: &'a Settings) -> Self {
		Self { session, settings }
	}

	pub fn session(&self) -> &S {
		self.session
	}

	/// Resolves a selector against the session.
	pub fn target(&self, selector: &Selector) -> S::Target {
		self.session.target(selector)
	}

	/// Suspends until the target exists and is visible.
	///
	/// This is the building block every other interaction helper calls
	/// first. Fails with a timeout error once `timeout` elapses without the
	/// condition holding.
	pub async fn wait_for_element(&self, target: &S::Target, timeout: Duration) -> Result<()> {
		debug!(
			element = %target.description(),
			timeout_ms = timeout.as_millis() as u64,
			"waiting for element to be visible"
		);
		wait_until(
			timeout,
			format!("element visible: {}", target.description()),
			|| async move { Ok(target.exists().await? && target.visible().await?) },
		)
		.await
	}

	/// Suspends until the target no longer exists.
	pub async fn wait_for_element_gone(&self, target: &S::Target, timeout: Duration) -> Result<()> {
		debug!(
			element = %target.description(),
			timeout_ms = timeout.as_millis() as u64,
			"waiting for element to disappear"
		);
		wait_until(
			timeout,
			format!("element gone: {}", target.description()),
			|| async move { Ok(!target.exists().await?) },
		)
		.await
	}

	/// Waits for the element and clicks it, retrying up to `retries` times.
	///
	/// Each failed attempt logs a warning and pauses for the fixed
	/// [`CLICK_RETRY_BACKOFF`]; the final attempt's error is re-raised
	/// unmodified.
	pub async fn click_with_retry(&self, target: &S::Target, retries: u32) -> Result<()> {
		info!(element = %target.description(), retries, "clicking element with retry");
		let policy = RetryPolicy::new(retries, CLICK_RETRY_BACKOFF);
		retry(policy, |_attempt| async move {
			self.wait_for_element(target, DEFAULT_TIMEOUT).await?;
			self.session.click(target).await?;
			Ok(())
		})
		.await
	}

	/// Waits for the element, clears its value, then types `text`.
	///
	/// No retry; a failure anywhere propagates immediately.
	pub async fn type_text_clear(&self, target: &S::Target, text: &str) -> Result<()> {
		info!(element = %target.description(), text, "typing text after clearing");
		self.wait_for_element(target, DEFAULT_TIMEOUT).await?;
		self.session.clear_text(target).await?;
		self.session.type_text(target, text).await?;
		Ok(())
	}

	/// Selects a dropdown option by its visible text.
	pub async fn select_dropdown_by_text(&self, dropdown: &S::Target, option_text: &str) -> Result<()> {
		info!(element = %dropdown.description(), option_text, "selecting dropdown option");
		self.wait_for_element(dropdown, DEFAULT_TIMEOUT).await?;
		let option = self.session.option_by_text(dropdown, option_text);
		self.session.click(dropdown).await?;
		self.session.click(&option).await?;
		Ok(())
	}

	/// Selects a dropdown option by its value attribute.
	pub async fn select_dropdown_by_value(&self, dropdown: &S::Target, value: &str) -> Result<()> {
		info!(element = %dropdown.description(), value, "selecting dropdown option by value");
		self.wait_for_element(dropdown, DEFAULT_TIMEOUT).await?;
		let option = self.session.option_by_value(dropdown, value);
		self.session.click(dropdown).await?;
		self.session.click(&option).await?;
		Ok(())
	}

	pub async fn hover_element(&self, target: &S::Target) -> Result<()> {
		info!(element = %target.description(), "hovering over element");
		self.wait_for_element(target, DEFAULT_TIMEOUT).await?;
		self.session.hover(target).await?;
		Ok(())
	}

	pub async fn double_click_element(&self, target: &S::Target) -> Result<()> {
		info!(element = %target.description(), "double clicking element");
		self.wait_for_element(target, DEFAULT_TIMEOUT).await?;
		self.session.double_click(target).await?;
		Ok(())
	}

	pub async fn right_click_element(&self, target: &S::Target) -> Result<()> {
		info!(element = %target.description(), "right clicking element");
		self.wait_for_element(target, DEFAULT_TIMEOUT).await?;
		self.session.right_click(target).await?;
		Ok(())
	}

	/// Scrolls the target into view. No wait precondition; the element may
	/// not be visible yet.
	pub async fn scroll_to_element(&self, target: &S::Target) -> Result<()> {
		info!(element = %target.description(), "scrolling to element");
		self.session.scroll_into_view(target).await?;
		Ok(())
	}

	/// Captures a screenshot under a timestamped, filesystem-safe name.
	pub async fn take_screenshot(&self, name: &str) -> Result<()> {
		let screenshot = artifacts::screenshot_name(name, Utc::now());
		info!(screenshot = %screenshot, "taking screenshot");
		self.session.screenshot(&screenshot).await?;
		Ok(())
	}

	/// Unconditional suspension. For flows with no observable readiness
	/// signal; prefer the wait helpers everywhere else.
	pub async fn wait(&self, duration: Duration) {
		debug!(ms = duration.as_millis() as u64, "waiting");
		tokio::time::sleep(duration).await;
	}

	pub async fn navigate_to(&self, url: &str) -> Result<()> {
		info!(url, "navigating to URL");
		self.session.goto(url).await?;
		Ok(())
	}

	/// Navigates to the configured base URL.
	pub async fn open_base_url(&self) -> Result<()> {
		self.navigate_to(&self.settings.base_url).await
	}

	/// Hard reload, bypassing the page cache.
	pub async fn refresh_page(&self) -> Result<()> {
		info!("refreshing page");
		self.session.reload_bypass_cache().await?;
		Ok(())
	}

	pub async fn get_current_url(&self) -> Result<String> {
		let url = self.session.current_url().await?;
		debug!(%url, "current URL");
		Ok(url)
	}

	/// Makes the iframe the active execution context. The caller pairs this
	/// with [`switch_to_main_window`](Self::switch_to_main_window); nothing
	/// restores the context automatically.
	pub async fn switch_to_iframe(&self, target: &S::Target) -> Result<()> {
		info!(element = %target.description(), "switching to iframe");
		self.session.enter_frame(target).await?;
		Ok(())
	}

	pub async fn switch_to_main_window(&self) -> Result<()> {
		info!("switching to main window");
		self.session.leave_frame().await?;
		Ok(())
	}

	pub async fn get_element_count(&self, target: &S::Target) -> Result<usize> {
		let count = target.count().await?;
		debug!(element = %target.description(), count, "element count");
		Ok(count)
	}

	pub async fn element_exists(&self, target: &S::Target) -> Result<bool> {
		let exists = target.exists().await?;
		debug!(element = %target.description(), exists, "element exists");
		Ok(exists)
	}

	pub async fn is_element_visible(&self, target: &S::Target) -> Result<bool> {
		let visible = target.visible().await?;
		debug!(element = %target.description(), visible, "element visible");
		Ok(visible)
	}

	pub async fn get_element_text(&self, target: &S::Target) -> Result<String> {
		let text = target.text().await?;
		debug!(element = %target.description(), %text, "element text");
		Ok(text)
	}

	pub async fn get_element_attribute(&self, target: &S::Target, name: &str) -> Result<Option<String>> {
		let value = target.attribute(name).await?;
		debug!(element = %target.description(), name, value = ?value, "element attribute");
		Ok(value)
	}
}

/// Polls `check` until it reports true or `timeout` elapses.
///
/// Never reports success before the condition holds; reports the timeout
/// failure at or after the deadline. The final sleep is clamped so the
/// deadline check runs exactly at the deadline rather than one full
/// interval past it.
pub(crate) async fn wait_until<F, Fut>(timeout: Duration, condition: String, mut check: F) -> Result<()>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<bool>>,
{
	let start = tokio::time::Instant::now();
	loop {
		if check().await? {
			return Ok(());
		}
		let elapsed = start.elapsed();
		if elapsed >= timeout {
			return Err(HarnessError::Timeout {
				ms: timeout.as_millis() as u64,
				condition,
			});
		}
		tokio::time::sleep(POLL_INTERVAL.min(timeout - elapsed)).await;
	}
}
