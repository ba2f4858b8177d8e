//! The asynchronous side of a form: one notification per submission and the
//! timed reset after success.

use super::{deliver, DeliveryEnv, TaskGuard};
use crate::core::{State, StatusLog};
use crate::form::{template_params, Begin, FormError, FormFields, FormKind, FormState, FormStatus};
use crate::notify::{NotificationRequest, TemplateRoutes};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use stillwater::Effect;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How long the success message stays up before the form clears.
pub const DEFAULT_RESET_AFTER: Duration = Duration::from_millis(3000);

/// What a call to [`FormSubmitter::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The notification was accepted.
    Delivered { submission: Uuid },
    /// Another submission was in progress or the success message was still
    /// showing; nothing was sent.
    Ignored { status: FormStatus },
}

struct Inner {
    state: Mutex<FormState>,
    status: watch::Sender<FormStatus>,
    env: DeliveryEnv,
    routes: TemplateRoutes,
    recipient: String,
    reset_after: Duration,
    reset_timer: Mutex<Option<TaskGuard>>,
}

impl Inner {
    fn publish(&self) {
        let status = self.state.lock().status();
        self.status.send_replace(status);
    }
}

/// A form wired to a notifier.
///
/// Cheap to clone; clones share the same form. The reset timer is cancelled
/// when the last clone is dropped.
#[derive(Clone)]
pub struct FormSubmitter {
    inner: Arc<Inner>,
}

impl FormSubmitter {
    pub fn new(
        state: FormState,
        env: DeliveryEnv,
        routes: TemplateRoutes,
        recipient: impl Into<String>,
        reset_after: Duration,
    ) -> Self {
        let (status, _) = watch::channel(state.status());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                status,
                env,
                routes,
                recipient: recipient.into(),
                reset_after,
                reset_timer: Mutex::new(None),
            }),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.inner.state.lock().kind()
    }

    pub fn status(&self) -> FormStatus {
        self.inner.state.lock().status()
    }

    /// Snapshot of the current answers.
    pub fn fields(&self) -> FormFields {
        self.inner.state.lock().fields().clone()
    }

    pub fn set_field(&self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.inner.state.lock().set_field(name, value)
    }

    pub fn last_error(&self) -> Option<FormError> {
        self.inner.state.lock().last_error().cloned()
    }

    pub fn history(&self) -> StatusLog<FormStatus> {
        self.inner.state.lock().history().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormStatus> {
        self.inner.status.subscribe()
    }

    /// Validate, send one notification and record the outcome.
    ///
    /// Delivery failures are returned and leave the form in `Error` with its
    /// answers intact. If the returned future is dropped before the
    /// notification settles, the form goes back to its previous status.
    pub async fn submit(&self) -> Result<SubmitOutcome, FormError> {
        let begin = self.inner.state.lock().begin_submit()?;
        let (fields, previous) = match begin {
            Begin::Ignored(status) => return Ok(SubmitOutcome::Ignored { status }),
            Begin::Started {
                fields, previous, ..
            } => (fields, previous),
        };
        self.inner.publish();

        let submission = Uuid::new_v4();
        let kind = fields.kind();
        let request = NotificationRequest {
            template_id: self.inner.routes.template_for(kind).to_string(),
            params: template_params(kind, &fields, &self.inner.recipient, Utc::now()),
        };
        info!(%submission, %kind, template = %request.template_id, "Submitting form");

        let in_flight = InFlight {
            inner: Arc::clone(&self.inner),
            previous,
            settled: false,
        };
        let outcome = deliver(request).run(&self.inner.env).await;
        in_flight.settle();

        let status = self.inner.state.lock().finish(outcome.clone());
        self.inner.publish();
        debug!(%submission, status = status.name(), "Submission settled");

        match outcome {
            Ok(()) => {
                self.schedule_reset();
                Ok(SubmitOutcome::Delivered { submission })
            }
            Err(err) => {
                warn!(%submission, error = %err, "Form notification failed");
                Err(FormError::Delivery(err))
            }
        }
    }

    fn schedule_reset(&self) {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let delay = self.inner.reset_after;
        let timer = TaskGuard::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                if inner.state.lock().reset_after_success() {
                    debug!("Form reset after success");
                }
                inner.publish();
            }
        });
        *self.inner.reset_timer.lock() = Some(timer);
    }
}

impl std::fmt::Debug for FormSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSubmitter")
            .field("kind", &self.kind())
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

/// Restores the pre-submit status if a submission is dropped mid-flight.
struct InFlight {
    inner: Arc<Inner>,
    previous: FormStatus,
    settled: bool,
}

impl InFlight {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.settled {
            self.inner.state.lock().abandon(self.previous);
            self.inner.publish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormSchema;
    use crate::notify::{DeliveryError, Notifier};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Notifier for Counting {
        async fn send(&self, _request: &NotificationRequest) -> Result<bool, DeliveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    fn submitter() -> (FormSubmitter, Arc<Counting>) {
        let notifier = Arc::new(Counting {
            calls: AtomicUsize::new(0),
        });
        let schema = FormSchema::trial().with_mandatory(["phone"]).unwrap();
        let submitter = FormSubmitter::new(
            FormState::new(schema),
            DeliveryEnv::new(notifier.clone()),
            TemplateRoutes::new("template_trial", "template_rental"),
            "Vibe Dance Academy",
            DEFAULT_RESET_AFTER,
        );
        (submitter, notifier)
    }

    #[tokio::test(start_paused = true)]
    async fn validation_failure_sends_nothing() {
        let (form, notifier) = submitter();
        let err = form.submit().await.unwrap_err();

        assert_eq!(err.missing_names(), vec!["phone"]);
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn success_then_reset() {
        let (form, notifier) = submitter();
        form.set_field("phone", "98765").unwrap();

        let outcome = form.submit().await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Delivered { .. }));
        assert_eq!(form.status(), FormStatus::Success);
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        assert_eq!(form.status(), FormStatus::Idle);
        assert!(form.fields().is_blank("phone"));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_submitter_cancels_reset() {
        let (form, _) = submitter();
        form.set_field("phone", "98765").unwrap();
        form.submit().await.unwrap();

        let mut status = form.subscribe();
        status.borrow_and_update();
        drop(form);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(status.has_changed().is_err());
    }
}
