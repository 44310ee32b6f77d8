//! Capability interface between the storecheck harness and a browser driver.
//!
//! The harness never talks to a concrete automation library. It depends on
//! two traits: [`Target`], a lazy handle to zero-or-more matched elements
//! exposing state queries, and [`Session`], the active browsing context
//! against which actions and reads are performed. Any driver that can
//! implement these two traits can sit underneath the harness.
//!
//! The [`sim`] module provides a deterministic in-memory implementation used
//! by the harness test suite.

mod error;
mod selector;
mod session;

pub mod sim;

pub use error::{DriverError, Result};
pub use selector::Selector;
pub use session::{Session, Target};
