//! Session concurrency limiting.
//!
//! Within one browser session every operation is strictly ordered, so no
//! locking is needed there. Parallelism exists only across sessions, and the
//! limiter caps how many run at once.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

use crate::config::Settings;

/// Caps the number of simultaneously open browser sessions.
#[derive(Clone)]
pub struct SessionLimiter {
	permits: Arc<Semaphore>,
	max_sessions: usize,
}

/// Holds one session slot; dropping it frees the slot.
pub struct SessionPermit {
	_permit: OwnedSemaphorePermit,
}

impl SessionLimiter {
	/// A limiter for `max_sessions` concurrent sessions (at least one).
	pub fn new(max_sessions: usize) -> Self {
		let max_sessions = max_sessions.max(1);
		Self {
			permits: Arc::new(Semaphore::new(max_sessions)),
			max_sessions,
		}
	}

	/// A limiter sized by the `CONCURRENCY` setting.
	pub fn from_settings(settings: &Settings) -> Self {
		Self::new(settings.concurrency)
	}

	pub fn max_sessions(&self) -> usize {
		self.max_sessions
	}

	/// Number of slots currently free.
	pub fn available(&self) -> usize {
		self.permits.available_permits()
	}

	/// Waits for a free slot. The permit ties the slot to the session's
	/// lifetime; drop it when the session closes.
	pub async fn acquire(&self) -> SessionPermit {
		debug!(available = self.available(), max = self.max_sessions, "acquiring session slot");
		let permit = Arc::clone(&self.permits)
			.acquire_owned()
			.await
			.expect("session semaphore is never closed");
		SessionPermit { _permit: permit }
	}
}
