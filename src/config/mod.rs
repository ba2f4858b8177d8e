//! Site configuration loaded from TOML.
//!
//! Credentials and template identifiers are injected here rather than
//! compiled in.
//!
//! ```toml
//! [notification]
//! service_id = "service_vibe"
//! user_id = "public_key"
//!
//! [notification.templates]
//! trial = "template_trial"
//! rental = "template_rental"
//!
//! [timing]
//! manual_cooldown_ms = 5000
//!
//! [forms]
//! rental = ["eventType", "rentalDate", "phone"]
//! ```

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{FormSettings, NotificationSettings, SiteConfig, TimingSettings};
