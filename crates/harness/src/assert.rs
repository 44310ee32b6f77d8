//! Custom assertions with default messages and logging.
//!
//! Each assertion logs one structured event before performing the check.
//! Failures carry the supplied (or generated) message plus expected/actual
//! context. Nothing here retries; retry is the action layer's business.

use std::time::Duration;

use storecheck_driver::{Session, Target};

use crate::actions::wait_until;
use crate::error::{HarnessError, Result};
use crate::logging;

/// Driver-facing assertions bound to one session.
pub struct Assertions<'a, S: Session> {
	session: &'a S,
}

impl<'a, S: Session> Assertions<'a, S> {
	pub fn new(session: &'a S) -> Self {
		Self { session }
	}

	/// Asserts the target exists and is visible within `timeout`.
	pub async fn assert_visible(
		&self,
		target: &S::Target,
		message: Option<&str>,
		timeout: Duration,
	) -> Result<()> {
		let message = or_default(message, || format!("{} should be visible", target.description()));
		logging::test_assertion(&message);
		wait_until(timeout, message, || async move {
			Ok(target.exists().await? && target.visible().await?)
		})
		.await
	}

	pub async fn assert_not_visible(
		&self,
		target: &S::Target,
		message: Option<&str>,
		timeout: Duration,
	) -> Result<()> {
		let message = or_default(message, || {
			format!("{} should not be visible", target.description())
		});
		logging::test_assertion(&message);
		wait_until(timeout, message, || async move { Ok(!target.visible().await?) }).await
	}

	pub async fn assert_exists(
		&self,
		target: &S::Target,
		message: Option<&str>,
		timeout: Duration,
	) -> Result<()> {
		let message = or_default(message, || format!("{} should exist", target.description()));
		logging::test_assertion(&message);
		wait_until(timeout, message, || async move { Ok(target.exists().await?) }).await
	}

	pub async fn assert_not_exists(
		&self,
		target: &S::Target,
		message: Option<&str>,
		timeout: Duration,
	) -> Result<()> {
		let message = or_default(message, || format!("{} should not exist", target.description()));
		logging::test_assertion(&message);
		wait_until(timeout, message, || async move { Ok(!target.exists().await?) }).await
	}

	/// Asserts the target's rendered text contains `expected` (case
	/// sensitive).
	pub async fn assert_text_contains(
		&self,
		target: &S::Target,
		expected: &str,
		message: Option<&str>,
	) -> Result<()> {
		let message = or_default(message, || format!("Text should contain: {expected}"));
		logging::test_assertion(&message);
		let actual = target.text().await?;
		if actual.contains(expected) {
			Ok(())
		} else {
			Err(HarnessError::assertion(message, expected, actual))
		}
	}

	pub async fn assert_text_equals(
		&self,
		target: &S::Target,
		expected: &str,
		message: Option<&str>,
	) -> Result<()> {
		let message = or_default(message, || format!("Text should equal: {expected}"));
		logging::test_assertion(&message);
		let actual = target.text().await?;
		if actual == expected {
			Ok(())
		} else {
			Err(HarnessError::assertion(message, expected, actual))
		}
	}

	pub async fn assert_text_not_contains(
		&self,
		target: &S::Target,
		unexpected: &str,
		message: Option<&str>,
	) -> Result<()> {
		let message = or_default(message, || format!("Text should not contain: {unexpected}"));
		logging::test_assertion(&message);
		let actual = target.text().await?;
		if actual.contains(unexpected) {
			Err(HarnessError::assertion(
				message,
				format!("text without \"{unexpected}\""),
				actual,
			))
		} else {
			Ok(())
		}
	}

	/// Asserts the current navigable location contains `expected`.
	pub async fn assert_url_contains(&self, expected: &str, message: Option<&str>) -> Result<()> {
		let message = or_default(message, || format!("URL should contain: {expected}"));
		logging::test_assertion(&message);
		let actual = self.session.current_url().await?;
		if actual.contains(expected) {
			Ok(())
		} else {
			Err(HarnessError::assertion(message, expected, actual))
		}
	}

	pub async fn assert_url_equals(&self, expected: &str, message: Option<&str>) -> Result<()> {
		let message = or_default(message, || format!("URL should equal: {expected}"));
		logging::test_assertion(&message);
		let actual = self.session.current_url().await?;
		if actual == expected {
			Ok(())
		} else {
			Err(HarnessError::assertion(message, expected, actual))
		}
	}

	/// Asserts the cardinality of the matched element set.
	pub async fn assert_element_count(
		&self,
		target: &S::Target,
		expected: usize,
		message: Option<&str>,
	) -> Result<()> {
		let message = or_default(message, || format!("Element count should be: {expected}"));
		logging::test_assertion(&message);
		let actual = target.count().await?;
		if actual == expected {
			Ok(())
		} else {
			Err(HarnessError::assertion(message, expected, actual))
		}
	}

	pub async fn assert_has_attribute(
		&self,
		target: &S::Target,
		name: &str,
		expected: &str,
		message: Option<&str>,
	) -> Result<()> {
		let message = or_default(message, || {
			format!("Element should have attribute {name} with value: {expected}")
		});
		logging::test_assertion(&message);
		let actual = target.attribute(name).await?;
		match actual {
			Some(value) if value == expected => Ok(()),
			Some(value) => Err(HarnessError::assertion(message, expected, value)),
			None => Err(HarnessError::assertion(message, expected, "<absent>")),
		}
	}

	pub async fn assert_has_class(
		&self,
		target: &S::Target,
		class: &str,
		message: Option<&str>,
	) -> Result<()> {
		let message = or_default(message, || format!("Element should have class: {class}"));
		logging::test_assertion(&message);
		let classes = target.attribute("class").await?.unwrap_or_default();
		if classes.split_whitespace().any(|c| c == class) {
			Ok(())
		} else {
			Err(HarnessError::assertion(message, class, classes))
		}
	}

	pub async fn assert_not_has_class(
		&self,
		target: &S::Target,
		class: &str,
		message: Option<&str>,
	) -> Result<()> {
		let message = or_default(message, || format!("Element should not have class: {class}"));
		logging::test_assertion(&message);
		let classes = target.attribute("class").await?.unwrap_or_default();
		if classes.split_whitespace().any(|c| c == class) {
			Err(HarnessError::assertion(
				message,
				format!("class list without \"{class}\""),
				classes,
			))
		} else {
			Ok(())
		}
	}

	/// Asserts the element carries no `disabled` attribute.
	pub async fn assert_enabled(&self, target: &S::Target, message: Option<&str>) -> Result<()> {
		let message = or_default(message, || format!("{} should be enabled", target.description()));
		logging::test_assertion(&message);
		match target.attribute("disabled").await? {
			None => Ok(()),
			Some(_) => Err(HarnessError::assertion(message, "enabled", "disabled")),
		}
	}

	pub async fn assert_disabled(&self, target: &S::Target, message: Option<&str>) -> Result<()> {
		let message = or_default(message, || format!("{} should be disabled", target.description()));
		logging::test_assertion(&message);
		match target.attribute("disabled").await? {
			Some(_) => Ok(()),
			None => Err(HarnessError::assertion(message, "disabled", "enabled")),
		}
	}

	pub async fn assert_checked(&self, target: &S::Target, message: Option<&str>) -> Result<()> {
		let message = or_default(message, || format!("{} should be checked", target.description()));
		logging::test_assertion(&message);
		if target.checked().await? {
			Ok(())
		} else {
			Err(HarnessError::assertion(message, "checked", "unchecked"))
		}
	}

	pub async fn assert_not_checked(&self, target: &S::Target, message: Option<&str>) -> Result<()> {
		let message = or_default(message, || {
			format!("{} should not be checked", target.description())
		});
		logging::test_assertion(&message);
		if target.checked().await? {
			Err(HarnessError::assertion(message, "unchecked", "checked"))
		} else {
			Ok(())
		}
	}
}

/// Plain value comparison; no driver interaction. Usable for arbitrary
/// computed values in a test.
pub fn assert_value_equals<T>(actual: &T, expected: &T, message: Option<&str>) -> Result<()>
where
	T: PartialEq + std::fmt::Debug,
{
	let message = or_default(message, || format!("Value should equal: {expected:?}"));
	logging::test_assertion(&message);
	if actual == expected {
		Ok(())
	} else {
		Err(HarnessError::assertion(
			message,
			format!("{expected:?}"),
			format!("{actual:?}"),
		))
	}
}

pub fn assert_value_not_equals<T>(actual: &T, expected: &T, message: Option<&str>) -> Result<()>
where
	T: PartialEq + std::fmt::Debug,
{
	let message = or_default(message, || format!("Value should not equal: {expected:?}"));
	logging::test_assertion(&message);
	if actual == expected {
		Err(HarnessError::assertion(
			message,
			format!("anything but {expected:?}"),
			format!("{actual:?}"),
		))
	} else {
		Ok(())
	}
}

fn or_default(message: Option<&str>, default: impl FnOnce() -> String) -> String {
	message.map_or_else(default, str::to_string)
}
