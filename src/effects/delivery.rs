//! Sending a notification as a stillwater effect.

use crate::notify::{DeliveryError, NotificationRequest, Notifier};
use std::sync::Arc;
use std::time::Duration;
use stillwater::prelude::*;
use tracing::{info, warn};

/// What a delivery needs to run.
#[derive(Clone)]
pub struct DeliveryEnv {
    pub notifier: Arc<dyn Notifier>,
    /// `None` waits for the collaborator indefinitely.
    pub timeout: Option<Duration>,
}

impl DeliveryEnv {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl std::fmt::Debug for DeliveryEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryEnv")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Send `request` exactly once. A `false` answer becomes
/// [`DeliveryError::Rejected`].
pub fn deliver(
    request: NotificationRequest,
) -> impl Effect<Output = (), Error = DeliveryError, Env = DeliveryEnv> {
    from_async(move |env: &DeliveryEnv| {
        let notifier = Arc::clone(&env.notifier);
        let timeout = env.timeout;
        async move {
            let attempt = notifier.send(&request);
            let accepted = match timeout {
                Some(limit) => tokio::time::timeout(limit, attempt)
                    .await
                    .map_err(|_| DeliveryError::TimedOut(limit))??,
                None => attempt.await?,
            };

            if accepted {
                info!(template = %request.template_id, "Notification accepted");
                Ok(())
            } else {
                warn!(template = %request.template_id, "Notification rejected");
                Err(DeliveryError::Rejected)
            }
        }
    })
}
