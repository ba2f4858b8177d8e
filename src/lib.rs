//! Choreo: the behavior behind a showcase site's moving parts
//!
//! Choreo is built on Stillwater's "pure core, imperative shell" philosophy.
//! Carousels, reveal-on-scroll latches, animated counters and lead-capture
//! forms are plain state machines with no side effects; the timers,
//! visibility observations and the outbound notification live in a thin
//! async shell that releases everything it owns on drop.
//!
//! # Core Concepts
//!
//! - **Rotator**: index into a fixed list that wraps at both ends
//! - **RevealOnView**: latches when an element scrolls into view
//! - **AnimatedCounter**: counts up to a target once revealed
//! - **FormSubmitter**: validates, sends one notification, resets after success
//!
//! # Example
//!
//! ```rust
//! use choreo::builder::FormSubmitterBuilder;
//! use choreo::form::{FormError, FormStatus};
//! use choreo::notify::{DeliveryError, NotificationRequest, Notifier, TemplateRoutes};
//! use choreo::rotator::Rotator;
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct Inbox;
//!
//! #[async_trait]
//! impl Notifier for Inbox {
//!     async fn send(&self, _request: &NotificationRequest) -> Result<bool, DeliveryError> {
//!         Ok(true)
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut hero = Rotator::new(vec!["studio.jpg", "stage.jpg"]).unwrap();
//! hero.next();
//! assert_eq!(*hero.current(), "stage.jpg");
//!
//! let trial = FormSubmitterBuilder::new()
//!     .notifier(Arc::new(Inbox))
//!     .routes(TemplateRoutes::new("template_trial", "template_rental"))
//!     .build()
//!     .unwrap();
//!
//! let err = trial.submit().await.unwrap_err();
//! assert!(matches!(err, FormError::Validation { .. }));
//! assert_eq!(trial.status(), FormStatus::Idle);
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod counter;
pub mod effects;
pub mod form;
pub mod navigation;
pub mod notify;
pub mod reveal;
pub mod rotator;

// Re-export commonly used types
pub use builder::{BuildError, FormSubmitterBuilder, RotatorBuilder};
pub use config::{ConfigError, SiteConfig};
pub use core::{Guard, State, StatusChange, StatusLog};
pub use counter::{AnimatedCounter, CounterSpec, RevealedCounter};
pub use effects::{AutoRotator, CounterAnimation, FormSubmitter, SubmitOutcome};
pub use form::{FormError, FormFields, FormKind, FormSchema, FormStatus};
pub use notify::{DeliveryError, EmailJsNotifier, Notifier, TemplateRoutes};
pub use reveal::{AttachedReveal, RevealOnView, Visibility};
pub use rotator::{Direction, Rotator, RotatorError, RotatorGroup};
