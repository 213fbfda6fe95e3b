//! Local persistence for a single user-entered name.
//!
//! The [`Store`] keeps at most one [`Record`] in an embedded database file and
//! exposes asynchronous [`Store::save`] and [`Store::load`] operations that run
//! their storage work off the caller's thread.

pub mod error;
pub mod fs;
pub mod store;

pub use error::{Error, Result};
pub use store::{Record, Store};
