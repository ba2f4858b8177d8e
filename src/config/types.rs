use crate::form::{FormError, FormKind, FormSchema};
use crate::notify::{EmailJsNotifier, TemplateRoutes, DEFAULT_ENDPOINT};
use crate::rotator::ResumePolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root of the site configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub notification: NotificationSettings,
    #[serde(default)]
    pub timing: TimingSettings,
    #[serde(default)]
    pub forms: FormSettings,
}

/// Credentials and routing for the notification collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub service_id: String,
    /// Public key of the sending account.
    pub user_id: String,
    /// Name shown as the addressee of every notification.
    #[serde(default = "default_recipient_name")]
    pub recipient_name: String,
    pub templates: TemplateRoutes,
    /// Absent means wait for the collaborator indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl NotificationSettings {
    pub fn delivery_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn notifier(&self) -> EmailJsNotifier {
        EmailJsNotifier::new(&self.service_id, &self.user_id).with_endpoint(&self.endpoint)
    }
}

/// Widget timings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSettings {
    #[serde(default = "default_hero_interval")]
    pub hero_interval_ms: u64,
    #[serde(default = "default_testimonial_interval")]
    pub testimonial_interval_ms: u64,
    #[serde(default = "default_branch_interval")]
    pub branch_interval_ms: u64,
    /// Pause after a manual carousel move; 0 keeps the timer running.
    #[serde(default)]
    pub manual_cooldown_ms: u64,
    #[serde(default = "default_success_reset")]
    pub success_reset_ms: u64,
    #[serde(default = "default_counter_duration")]
    pub counter_duration_ms: u64,
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            hero_interval_ms: default_hero_interval(),
            testimonial_interval_ms: default_testimonial_interval(),
            branch_interval_ms: default_branch_interval(),
            manual_cooldown_ms: 0,
            success_reset_ms: default_success_reset(),
            counter_duration_ms: default_counter_duration(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

impl TimingSettings {
    pub fn hero_interval(&self) -> Duration {
        Duration::from_millis(self.hero_interval_ms)
    }

    pub fn testimonial_interval(&self) -> Duration {
        Duration::from_millis(self.testimonial_interval_ms)
    }

    pub fn branch_interval(&self) -> Duration {
        Duration::from_millis(self.branch_interval_ms)
    }

    pub fn success_reset(&self) -> Duration {
        Duration::from_millis(self.success_reset_ms)
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn resume_policy(&self) -> ResumePolicy {
        match self.manual_cooldown_ms {
            0 => ResumePolicy::Continuous,
            ms => ResumePolicy::Cooldown(Duration::from_millis(ms)),
        }
    }
}

/// Mandatory-field overrides per form kind. Unset kinds keep their
/// built-in mandatory subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSettings {
    #[serde(default)]
    pub trial: Option<Vec<String>>,
    #[serde(default)]
    pub rental: Option<Vec<String>>,
    #[serde(default)]
    pub join: Option<Vec<String>>,
}

impl FormSettings {
    pub fn mandatory_for(&self, kind: FormKind) -> Option<&[String]> {
        match kind {
            FormKind::Trial => self.trial.as_deref(),
            FormKind::Rental => self.rental.as_deref(),
            FormKind::Join => self.join.as_deref(),
        }
    }

    pub fn schema_for(&self, kind: FormKind) -> Result<FormSchema, FormError> {
        let schema = FormSchema::for_kind(kind);
        match self.mandatory_for(kind) {
            Some(names) => schema.with_mandatory(names.iter().cloned()),
            None => Ok(schema),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_recipient_name() -> String {
    "Vibe Dance Academy".to_string()
}

fn default_hero_interval() -> u64 {
    5000
}

fn default_testimonial_interval() -> u64 {
    5000
}

fn default_branch_interval() -> u64 {
    4000
}

fn default_success_reset() -> u64 {
    3000
}

fn default_counter_duration() -> u64 {
    2000
}

fn default_frame_interval() -> u64 {
    16
}
