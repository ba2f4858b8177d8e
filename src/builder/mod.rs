//! Fluent builders and macros for assembling widgets.

pub mod error;
pub mod macros;
pub mod rotator;
pub mod submitter;

pub use error::BuildError;
pub use rotator::RotatorBuilder;
pub use submitter::FormSubmitterBuilder;
