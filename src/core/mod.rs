//! Core types shared by every widget.
//!
//! - the `State` trait for widget status enums
//! - `Guard` predicates that gate transitions
//! - `StatusLog`, a bounded record of status changes
//!
//! Everything here is pure.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StatusChange, StatusLog, DEFAULT_LOG_CAPACITY};
pub use state::State;
