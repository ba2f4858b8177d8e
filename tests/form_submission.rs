//! End-to-end submission flow against a scripted notifier, on a paused
//! clock.

use async_trait::async_trait;
use choreo::builder::FormSubmitterBuilder;
use choreo::core::State;
use choreo::effects::{FormSubmitter, SubmitOutcome};
use choreo::form::{FormError, FormKind, FormSchema, FormStatus};
use choreo::notify::{DeliveryError, NotificationRequest, Notifier, TemplateRoutes};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Answers from a script, one per call, after a fixed delay.
struct ScriptedNotifier {
    delay: Duration,
    answers: Mutex<VecDeque<Result<bool, DeliveryError>>>,
    sent: Mutex<Vec<NotificationRequest>>,
}

impl ScriptedNotifier {
    fn new(delay: Duration, answers: Vec<Result<bool, DeliveryError>>) -> Arc<Self> {
        Arc::new(Self {
            delay,
            answers: Mutex::new(answers.into()),
            sent: Mutex::new(Vec::new()),
        })
    }

    fn sent(&self) -> Vec<NotificationRequest> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Notifier for ScriptedNotifier {
    async fn send(&self, request: &NotificationRequest) -> Result<bool, DeliveryError> {
        self.sent.lock().push(request.clone());
        sleep(self.delay).await;
        self.answers.lock().pop_front().unwrap_or(Ok(true))
    }
}

fn rental_form(notifier: Arc<ScriptedNotifier>) -> FormSubmitter {
    FormSubmitterBuilder::new()
        .schema(
            FormSchema::rental()
                .with_mandatory(["name", "phone", "eventType"])
                .unwrap(),
        )
        .notifier(notifier)
        .routes(TemplateRoutes::new("template_trial", "template_rental"))
        .recipient("Vibe Dance Academy")
        .build()
        .unwrap()
}

fn fill(form: &FormSubmitter) {
    form.set_field("name", "Priya").unwrap();
    form.set_field("phone", "9876543210").unwrap();
    form.set_field("eventType", "workshop").unwrap();
}

#[tokio::test(start_paused = true)]
async fn empty_form_reports_all_missing_fields_and_sends_nothing() {
    init_tracing();
    let notifier = ScriptedNotifier::new(Duration::ZERO, vec![]);
    let form = rental_form(notifier.clone());

    let err = form.submit().await.unwrap_err();

    assert_eq!(err.missing_names(), vec!["name", "phone", "eventType"]);
    assert_eq!(form.status(), FormStatus::Idle);
    assert!(notifier.sent().is_empty());
}

#[tokio::test(start_paused = true)]
async fn success_sends_routed_request_then_resets_after_three_seconds() {
    init_tracing();
    let notifier = ScriptedNotifier::new(Duration::from_millis(300), vec![Ok(true)]);
    let form = rental_form(notifier.clone());
    fill(&form);

    let outcome = form.submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Delivered { .. }));
    assert_eq!(form.status(), FormStatus::Success);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].template_id, "template_rental");
    assert_eq!(sent[0].params["from_name"], "Priya");
    assert_eq!(sent[0].params["event_type"], "workshop");
    assert_eq!(sent[0].params["rental_date"], "Not specified");

    sleep(Duration::from_millis(2900)).await;
    assert_eq!(form.status(), FormStatus::Success);
    assert_eq!(form.fields().get("name"), Some("Priya"));

    sleep(Duration::from_millis(200)).await;
    assert_eq!(form.status(), FormStatus::Idle);
    assert!(form.fields().iter().all(|(_, v)| v.is_empty()));

    let path: Vec<_> = form
        .history()
        .path()
        .into_iter()
        .map(|s| s.name().to_string())
        .collect();
    assert_eq!(path, ["Idle", "Submitting", "Success", "Idle"]);
}

#[tokio::test(start_paused = true)]
async fn failure_keeps_fields_and_stays_in_error_until_resubmitted() {
    init_tracing();
    let notifier = ScriptedNotifier::new(
        Duration::from_millis(100),
        vec![Err(DeliveryError::Transport("connection reset".into())), Ok(true)],
    );
    let form = rental_form(notifier.clone());
    fill(&form);

    let err = form.submit().await.unwrap_err();
    assert!(matches!(err, FormError::Delivery(DeliveryError::Transport(_))));
    assert_eq!(form.status(), FormStatus::Error);
    assert!(form.status().is_error());

    sleep(Duration::from_secs(30)).await;
    assert_eq!(form.status(), FormStatus::Error);
    assert_eq!(form.fields().get("phone"), Some("9876543210"));
    assert_eq!(notifier.sent().len(), 1, "failures are not retried");

    let outcome = form.submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Delivered { .. }));
    assert_eq!(notifier.sent().len(), 2);
    assert!(form.last_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn falsy_answer_is_a_failure() {
    let notifier = ScriptedNotifier::new(Duration::ZERO, vec![Ok(false)]);
    let form = rental_form(notifier);
    fill(&form);

    assert_eq!(
        form.submit().await.unwrap_err(),
        FormError::Delivery(DeliveryError::Rejected)
    );
    assert_eq!(form.status(), FormStatus::Error);
}

#[tokio::test(start_paused = true)]
async fn second_submit_while_in_flight_is_ignored() {
    init_tracing();
    let notifier = ScriptedNotifier::new(Duration::from_secs(2), vec![Ok(true)]);
    let form = rental_form(notifier.clone());
    fill(&form);

    let first = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });
    sleep(Duration::from_millis(10)).await;
    assert_eq!(form.status(), FormStatus::Submitting);

    let second = form.submit().await.unwrap();
    assert_eq!(
        second,
        SubmitOutcome::Ignored {
            status: FormStatus::Submitting
        }
    );

    let first = first.await.unwrap().unwrap();
    assert!(matches!(first, SubmitOutcome::Delivered { .. }));
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn submit_during_success_message_is_ignored() {
    let notifier = ScriptedNotifier::new(Duration::ZERO, vec![]);
    let form = rental_form(notifier.clone());
    fill(&form);
    form.submit().await.unwrap();

    assert_eq!(
        form.submit().await.unwrap(),
        SubmitOutcome::Ignored {
            status: FormStatus::Success
        }
    );
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn status_changes_are_published() {
    let notifier = ScriptedNotifier::new(Duration::from_millis(50), vec![]);
    let form = rental_form(notifier);
    fill(&form);
    let mut status = form.subscribe();
    assert_eq!(*status.borrow_and_update(), FormStatus::Idle);

    let watcher = tokio::spawn(async move {
        let mut seen = Vec::new();
        while status.changed().await.is_ok() {
            let current = *status.borrow_and_update();
            seen.push(current);
            if current == FormStatus::Idle {
                break;
            }
        }
        seen
    });

    form.submit().await.unwrap();
    sleep(Duration::from_secs(4)).await;

    assert_eq!(
        watcher.await.unwrap(),
        vec![FormStatus::Submitting, FormStatus::Success, FormStatus::Idle]
    );
}

#[tokio::test(start_paused = true)]
async fn configured_timeout_turns_slow_delivery_into_error() {
    let notifier = ScriptedNotifier::new(Duration::from_secs(120), vec![]);
    let form = FormSubmitterBuilder::new()
        .kind(FormKind::Join)
        .notifier(notifier.clone())
        .routes(TemplateRoutes::new("template_trial", "template_rental"))
        .delivery_timeout(Duration::from_secs(20))
        .build()
        .unwrap();
    for (name, value) in [
        ("parentName", "Ravi"),
        ("studentName", "Asha"),
        ("age", "9"),
        ("address", "12 Mill Road"),
        ("phone", "98765"),
        ("email", "ravi@example.com"),
        ("branch", "palladam"),
    ] {
        form.set_field(name, value).unwrap();
    }

    let err = form.submit().await.unwrap_err();
    assert_eq!(
        err,
        FormError::Delivery(DeliveryError::TimedOut(Duration::from_secs(20)))
    );
    assert_eq!(notifier.sent()[0].template_id, "template_trial");
    assert_eq!(form.status(), FormStatus::Error);
}

#[tokio::test(start_paused = true)]
async fn dropped_submission_restores_previous_status() {
    let notifier = ScriptedNotifier::new(Duration::from_secs(10), vec![]);
    let form = rental_form(notifier);
    fill(&form);

    let pending = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });
    sleep(Duration::from_millis(10)).await;
    assert_eq!(form.status(), FormStatus::Submitting);

    pending.abort();
    assert!(pending.await.unwrap_err().is_cancelled());
    assert_eq!(form.status(), FormStatus::Idle);
    assert_eq!(form.fields().get("name"), Some("Priya"));
}

#[tokio::test(start_paused = true)]
async fn editing_while_submitting_is_allowed_and_not_sent() {
    let notifier = ScriptedNotifier::new(Duration::from_secs(1), vec![]);
    let form = rental_form(notifier.clone());
    fill(&form);

    let pending = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });
    sleep(Duration::from_millis(10)).await;
    form.set_field("name", "Changed").unwrap();
    pending.await.unwrap().unwrap();

    assert_eq!(notifier.sent()[0].params["from_name"], "Priya");
}
