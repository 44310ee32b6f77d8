//! Bounded retry with fixed backoff.
//!
//! The policy is explicit: attempt count and inter-attempt delay. The delay
//! is fixed, not exponential.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// How many times to attempt an operation and how long to pause in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Total attempt budget. Zero is treated as one attempt.
	pub max_attempts: u32,
	/// Fixed pause between attempts.
	pub backoff: Duration,
}

impl RetryPolicy {
	pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

	pub const fn new(max_attempts: u32, backoff: Duration) -> Self {
		Self {
			max_attempts,
			backoff,
		}
	}

	/// A policy with the default one-second backoff.
	pub const fn attempts(max_attempts: u32) -> Self {
		Self::new(max_attempts, Self::DEFAULT_BACKOFF)
	}
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self::attempts(3)
	}
}

/// Runs `op` until it succeeds or the attempt budget is exhausted.
///
/// Failed attempts are logged at warn level and followed by the fixed
/// backoff; the final attempt's error is returned unmodified. The closure
/// receives the 1-based attempt number.
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, mut op: F) -> std::result::Result<T, E>
where
	E: std::fmt::Display,
	F: FnMut(u32) -> Fut,
	Fut: Future<Output = std::result::Result<T, E>>,
{
	let budget = policy.max_attempts.max(1);
	let mut attempt = 0;
	loop {
		attempt += 1;
		match op(attempt).await {
			Ok(value) => return Ok(value),
			Err(err) if attempt >= budget => return Err(err),
			Err(err) => {
				warn!(attempt, budget, error = %err, "attempt failed, retrying");
				tokio::time::sleep(policy.backoff).await;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicU32, Ordering};

	use super::*;

	#[tokio::test(start_paused = true)]
	async fn succeeds_on_first_attempt_without_backoff() {
		let start = tokio::time::Instant::now();
		let result: Result<u32, String> = retry(RetryPolicy::attempts(3), |_| async { Ok(7) }).await;
		assert_eq!(result.unwrap(), 7);
		assert_eq!(start.elapsed(), Duration::ZERO);
	}

	#[tokio::test(start_paused = true)]
	async fn recovers_on_later_attempt() {
		let calls = AtomicU32::new(0);
		let result: Result<u32, String> = retry(RetryPolicy::attempts(3), |attempt| {
			let calls = &calls;
			async move {
				calls.fetch_add(1, Ordering::SeqCst);
				if attempt < 3 {
					Err("not yet".to_string())
				} else {
					Ok(attempt)
				}
			}
		})
		.await;
		assert_eq!(result.unwrap(), 3);
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test(start_paused = true)]
	async fn exhaustion_returns_the_final_error() {
		let calls = AtomicU32::new(0);
		let result: Result<(), String> = retry(RetryPolicy::attempts(3), |attempt| {
			let calls = &calls;
			async move {
				calls.fetch_add(1, Ordering::SeqCst);
				Err(format!("failure #{attempt}"))
			}
		})
		.await;
		assert_eq!(result.unwrap_err(), "failure #3");
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test(start_paused = true)]
	async fn backoff_runs_between_attempts_only() {
		let start = tokio::time::Instant::now();
		let policy = RetryPolicy::new(3, Duration::from_secs(1));
		let result: Result<(), String> = retry(policy, |_| async { Err("no".to_string()) }).await;
		assert!(result.is_err());
		// Two pauses for three attempts.
		assert_eq!(start.elapsed(), Duration::from_secs(2));
	}

	#[tokio::test(start_paused = true)]
	async fn zero_attempts_still_runs_once() {
		let calls = AtomicU32::new(0);
		let result: Result<(), String> = retry(RetryPolicy::attempts(0), |_| {
			let calls = &calls;
			async move {
				calls.fetch_add(1, Ordering::SeqCst);
				Err("once".to_string())
			}
		})
		.await;
		assert!(result.is_err());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}
}
