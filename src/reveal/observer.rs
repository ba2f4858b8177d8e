//! Binding a [`RevealOnView`] to the host's visibility collaborator.

use super::{RevealOnView, Visibility};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Identifier of an observed element, as the host names it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub String);

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserveOptions {
    pub threshold: f32,
    /// Negative values shrink the viewport, so elements must scroll further
    /// in before they count.
    pub root_margin_px: i32,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin_px: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservationId(pub u64);

pub type VisibilitySink = Box<dyn Fn(Visibility) + Send + Sync>;

/// Host-side visibility reporting (an intersection observer).
pub trait VisibilitySource: Send + Sync {
    /// Start delivering samples for `target` to `sink`.
    fn observe(
        &self,
        target: &ElementId,
        options: ObserveOptions,
        sink: VisibilitySink,
    ) -> ObservationId;

    /// Stop delivering samples. Unknown ids are ignored.
    fn unobserve(&self, id: ObservationId);
}

/// Registered interest in an element; unobserves when dropped.
pub struct Observation {
    source: Arc<dyn VisibilitySource>,
    id: ObservationId,
}

impl Observation {
    pub fn register(
        source: Arc<dyn VisibilitySource>,
        target: &ElementId,
        options: ObserveOptions,
        sink: VisibilitySink,
    ) -> Self {
        let id = source.observe(target, options, sink);
        Self { source, id }
    }

    pub fn id(&self) -> ObservationId {
        self.id
    }
}

impl fmt::Debug for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observation").field("id", &self.id).finish()
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        self.source.unobserve(self.id);
    }
}

/// A mounted reveal fed by a live observation.
///
/// Output is published on a watch channel. Dropping the value unmounts the
/// reveal before unobserving, so a sample racing the teardown is discarded.
pub struct AttachedReveal {
    target: ElementId,
    reveal: Arc<Mutex<RevealOnView>>,
    visible: Arc<watch::Sender<bool>>,
    // Dropped after `Drop::drop` has unmounted.
    _observation: Observation,
}

impl AttachedReveal {
    pub fn attach(
        source: Arc<dyn VisibilitySource>,
        target: ElementId,
        reveal: RevealOnView,
    ) -> Self {
        let options = ObserveOptions {
            threshold: reveal.threshold(),
            ..ObserveOptions::default()
        };
        Self::attach_with(source, target, reveal, options)
    }

    /// Like [`attach`](Self::attach) with explicit observer options.
    pub fn attach_with(
        source: Arc<dyn VisibilitySource>,
        target: ElementId,
        mut reveal: RevealOnView,
        options: ObserveOptions,
    ) -> Self {
        reveal.mount();
        let (tx, _) = watch::channel(reveal.is_visible());
        let visible = Arc::new(tx);
        let reveal = Arc::new(Mutex::new(reveal));

        let sink_reveal = Arc::clone(&reveal);
        let sink_visible = Arc::clone(&visible);
        let element = target.clone();
        let sink: VisibilitySink = Box::new(move |sample| {
            let now_visible = {
                let mut reveal = sink_reveal.lock();
                if !reveal.observe(sample) {
                    return;
                }
                reveal.is_visible()
            };
            debug!(element = %element, visible = now_visible, "Reveal changed");
            sink_visible.send_replace(now_visible);
        });

        let observation = Observation::register(source, &target, options, sink);
        Self {
            target,
            reveal,
            visible,
            _observation: observation,
        }
    }

    pub fn target(&self) -> &ElementId {
        &self.target
    }

    pub fn is_visible(&self) -> bool {
        self.reveal.lock().is_visible()
    }

    pub fn has_triggered(&self) -> bool {
        self.reveal.lock().has_triggered()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }
}

impl Drop for AttachedReveal {
    fn drop(&mut self) {
        self.reveal.lock().unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeSource {
        next: Mutex<u64>,
        sinks: Mutex<HashMap<u64, VisibilitySink>>,
        options: Mutex<Vec<ObserveOptions>>,
    }

    impl FakeSource {
        fn emit(&self, sample: Visibility) {
            for sink in self.sinks.lock().values() {
                sink(sample);
            }
        }

        fn active(&self) -> usize {
            self.sinks.lock().len()
        }
    }

    impl VisibilitySource for FakeSource {
        fn observe(
            &self,
            _target: &ElementId,
            options: ObserveOptions,
            sink: VisibilitySink,
        ) -> ObservationId {
            let mut next = self.next.lock();
            *next += 1;
            self.sinks.lock().insert(*next, sink);
            self.options.lock().push(options);
            ObservationId(*next)
        }

        fn unobserve(&self, id: ObservationId) {
            self.sinks.lock().remove(&id.0);
        }
    }

    #[test]
    fn attach_registers_with_reveal_threshold() {
        let source = Arc::new(FakeSource::default());
        let _attached = AttachedReveal::attach(
            source.clone(),
            "stats".into(),
            RevealOnView::once(0.3).unwrap(),
        );

        assert_eq!(source.active(), 1);
        assert_eq!(source.options.lock()[0].threshold, 0.3);
    }

    #[test]
    fn samples_flow_to_subscribers() {
        let source = Arc::new(FakeSource::default());
        let attached = AttachedReveal::attach(
            source.clone(),
            "about".into(),
            RevealOnView::once(0.1).unwrap(),
        );
        let rx = attached.subscribe();

        source.emit(Visibility::visible(0.05));
        assert!(!*rx.borrow());

        source.emit(Visibility::visible(0.2));
        assert!(*rx.borrow());
        assert!(attached.is_visible());
        assert!(attached.has_triggered());
    }

    #[test]
    fn drop_unobserves() {
        let source = Arc::new(FakeSource::default());
        let attached = AttachedReveal::attach(
            source.clone(),
            "counter".into(),
            RevealOnView::repeating(0.5).unwrap(),
        );
        drop(attached);
        assert_eq!(source.active(), 0);
    }

    #[test]
    fn observation_handle_unobserves_on_drop() {
        let source = Arc::new(FakeSource::default());
        let observation = Observation::register(
            source.clone(),
            &"hero".into(),
            ObserveOptions::default(),
            Box::new(|_| {}),
        );
        assert_eq!(observation.id(), ObservationId(1));
        drop(observation);
        assert_eq!(source.active(), 0);
    }
}
