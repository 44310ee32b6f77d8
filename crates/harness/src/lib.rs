//! storecheck: end-to-end UI test harness for the sample shop.
//!
//! The harness sits between test scripts and a browser-automation driver.
//! Scripts talk to three things: [`Actions`] for wait-safe interactions,
//! [`Assertions`] for checks with default messages and logging, and
//! [`testdata`] for randomized domain records. Configuration comes from the
//! environment once at startup; logging goes through `tracing` to the
//! console and rolling files under `logs/`.
//!
//! The driver is abstracted behind the [`Session`]/[`Target`] traits from
//! `storecheck-driver`; the harness never names a concrete automation
//! library.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//!
//! use storecheck::{Actions, Assertions, Selector, Settings, logging, testdata};
//!
//! async fn first_purchase<S: storecheck::Session>(session: &S) -> storecheck::Result<()> {
//!     let settings = Settings::from_env();
//!     let _guards = logging::init(&settings)?;
//!
//!     let actions = Actions::new(session, &settings);
//!     let asserts = Assertions::new(session);
//!     let user = testdata::UserData::random();
//!
//!     actions.open_base_url().await?;
//!     let email_field = actions.target(&Selector::labeled("#email", "signup email"));
//!     actions.type_text_clear(&email_field, &user.email).await?;
//!     let submit = actions.target(&Selector::css("#SubmitCreate"));
//!     actions.click_with_retry(&submit, 3).await?;
//!     asserts.assert_url_contains("controller=authentication", None).await?;
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod artifacts;
pub mod assert;
pub mod config;
pub mod error;
pub mod logging;
pub mod retry;
pub mod session;
pub mod testdata;

pub use actions::{Actions, CLICK_RETRY_BACKOFF, DEFAULT_TIMEOUT};
pub use assert::{Assertions, assert_value_equals, assert_value_not_equals};
pub use config::{Credentials, Settings};
pub use error::{HarnessError, Result};
pub use retry::{RetryPolicy, retry};
pub use session::{SessionLimiter, SessionPermit};

// Re-export the driver seam so test scripts depend on one crate.
pub use storecheck_driver as driver;
pub use storecheck_driver::{Selector, Session, Target};
