//! Builder for form submitters.

use crate::builder::error::BuildError;
use crate::config::SiteConfig;
use crate::effects::{DeliveryEnv, FormSubmitter, DEFAULT_RESET_AFTER};
use crate::form::{FormFields, FormKind, FormSchema, FormState};
use crate::notify::{Notifier, TemplateRoutes};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_RECIPIENT: &str = "Vibe Dance Academy";

/// Builder for [`FormSubmitter`] with a fluent API.
///
/// ```rust
/// use choreo::builder::FormSubmitterBuilder;
/// use choreo::form::FormKind;
/// use choreo::notify::{EmailJsNotifier, TemplateRoutes};
/// use std::sync::Arc;
///
/// let submitter = FormSubmitterBuilder::new()
///     .kind(FormKind::Rental)
///     .notifier(Arc::new(EmailJsNotifier::new("service_vibe", "public_key")))
///     .routes(TemplateRoutes::new("template_trial", "template_rental"))
///     .build()
///     .unwrap();
///
/// assert_eq!(submitter.kind(), FormKind::Rental);
/// ```
pub struct FormSubmitterBuilder {
    schema: Option<FormSchema>,
    notifier: Option<Arc<dyn Notifier>>,
    routes: Option<TemplateRoutes>,
    recipient: String,
    reset_after: Duration,
    delivery_timeout: Option<Duration>,
    prefill: Option<FormFields>,
}

impl FormSubmitterBuilder {
    /// Create a new builder. The form defaults to a trial booking.
    pub fn new() -> Self {
        Self {
            schema: None,
            notifier: None,
            routes: None,
            recipient: DEFAULT_RECIPIENT.to_string(),
            reset_after: DEFAULT_RESET_AFTER,
            delivery_timeout: None,
            prefill: None,
        }
    }

    /// Start from a site configuration.
    ///
    /// Sets the schema for `kind` (with any mandatory-field override), the
    /// EmailJS notifier, routes, recipient, reset delay and timeout.
    pub fn from_config(config: &SiteConfig, kind: FormKind) -> Result<Self, BuildError> {
        let n = &config.notification;
        let mut builder = Self::new()
            .schema(config.forms.schema_for(kind)?)
            .notifier(Arc::new(n.notifier()))
            .routes(n.templates.clone())
            .recipient(n.recipient_name.clone())
            .reset_after(config.timing.success_reset());
        builder.delivery_timeout = n.delivery_timeout();
        Ok(builder)
    }

    pub fn schema(mut self, schema: FormSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Use the built-in schema for `kind`.
    pub fn kind(self, kind: FormKind) -> Self {
        self.schema(FormSchema::for_kind(kind))
    }

    /// Set the notification collaborator (required).
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set the template routing (required).
    pub fn routes(mut self, routes: TemplateRoutes) -> Self {
        self.routes = Some(routes);
        self
    }

    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    pub fn reset_after(mut self, delay: Duration) -> Self {
        self.reset_after = delay;
        self
    }

    pub fn delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = Some(timeout);
        self
    }

    /// Answers carried over from navigation.
    pub fn prefill(mut self, fields: FormFields) -> Self {
        self.prefill = Some(fields);
        self
    }

    /// Build the submitter.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<FormSubmitter, BuildError> {
        let notifier = self.notifier.ok_or(BuildError::MissingNotifier)?;
        let routes = self.routes.ok_or(BuildError::MissingRoutes)?;
        let schema = self.schema.unwrap_or_else(FormSchema::trial);

        let mut state = FormState::new(schema);
        if let Some(prefill) = &self.prefill {
            if prefill.kind() != state.kind() {
                return Err(BuildError::PrefillMismatch {
                    prefill: prefill.kind().to_string(),
                    schema: state.kind().to_string(),
                });
            }
            state = state.with_prefill(prefill);
        }

        let mut env = DeliveryEnv::new(notifier);
        if let Some(timeout) = self.delivery_timeout {
            env = env.with_timeout(timeout);
        }

        Ok(FormSubmitter::new(
            state,
            env,
            routes,
            self.recipient,
            self.reset_after,
        ))
    }
}

impl Default for FormSubmitterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormStatus;
    use crate::notify::EmailJsNotifier;

    fn notifier() -> Arc<dyn Notifier> {
        Arc::new(EmailJsNotifier::new("service", "user"))
    }

    fn routes() -> TemplateRoutes {
        TemplateRoutes::new("template_trial", "template_rental")
    }

    #[test]
    fn missing_notifier_is_reported() {
        let result = FormSubmitterBuilder::new().routes(routes()).build();
        assert!(matches!(result, Err(BuildError::MissingNotifier)));
    }

    #[test]
    fn missing_routes_is_reported() {
        let result = FormSubmitterBuilder::new().notifier(notifier()).build();
        assert!(matches!(result, Err(BuildError::MissingRoutes)));
    }

    #[test]
    fn defaults_to_idle_trial_form() {
        let submitter = FormSubmitterBuilder::new()
            .notifier(notifier())
            .routes(routes())
            .build()
            .unwrap();
        assert_eq!(submitter.kind(), FormKind::Trial);
        assert_eq!(submitter.status(), FormStatus::Idle);
    }

    #[test]
    fn prefill_must_match_schema() {
        let prefill = FormFields::from_schema(&FormSchema::rental());
        let result = FormSubmitterBuilder::new()
            .notifier(notifier())
            .routes(routes())
            .prefill(prefill)
            .build();
        assert_eq!(
            result.err(),
            Some(BuildError::PrefillMismatch {
                prefill: "rental".into(),
                schema: "trial".into(),
            })
        );
    }

    #[test]
    fn prefill_is_applied() {
        let mut prefill = FormFields::from_schema(&FormSchema::trial());
        prefill.set("childName", "Asha").unwrap();
        let submitter = FormSubmitterBuilder::new()
            .notifier(notifier())
            .routes(routes())
            .prefill(prefill)
            .build()
            .unwrap();
        assert_eq!(submitter.fields().get("childName"), Some("Asha"));
    }

    #[test]
    fn from_config_applies_mandatory_override() {
        let config = SiteConfig::from_toml_str(
            r#"
[notification]
service_id = "service_vibe"
user_id = "public_key"
timeout_seconds = 20

[notification.templates]
trial = "template_trial"
rental = "template_rental"

[forms]
rental = ["phone"]
"#,
        )
        .unwrap();

        let builder = FormSubmitterBuilder::from_config(&config, FormKind::Rental).unwrap();
        assert_eq!(builder.delivery_timeout, Some(Duration::from_secs(20)));
        assert_eq!(
            builder.schema.as_ref().unwrap().mandatory(),
            ["phone".to_string()]
        );
        assert!(builder.build().is_ok());
    }
}
