//! Animated counters: a number that climbs from zero to a target.
//!
//! Each tick adds `target / (duration / frame)` to an accumulator; the
//! displayed value is the accumulator rounded up, clamped to the target.
//! The ticking itself is driven by [`crate::effects::CounterAnimation`].
//!
//! ```rust
//! use choreo::counter::{AnimatedCounter, CounterSpec};
//! use std::time::Duration;
//!
//! let spec = CounterSpec::new(100).with_duration(Duration::from_millis(160));
//! let mut students = AnimatedCounter::new(spec);
//!
//! students.start();
//! assert_eq!(students.tick(), 10);
//! while !students.is_finished() {
//!     students.tick();
//! }
//! assert_eq!(students.value(), 100);
//! ```

use crate::config::TimingSettings;
use crate::reveal::{RevealError, RevealOnView, Visibility};
use crate::state_enum;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);
pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);
/// Visible fraction at which stat counters start.
pub const DEFAULT_THRESHOLD: f32 = 0.3;

const MIN_FRAME: Duration = Duration::from_millis(1);

state_enum! {
    pub enum CounterPhase {
        Waiting,
        Running,
        Finished,
    }
    final: [Finished]
}

/// Target and pacing of one counter.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSpec {
    target: u64,
    duration: Duration,
    frame: Duration,
    prefix: String,
    suffix: String,
}

impl CounterSpec {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            duration: DEFAULT_DURATION,
            frame: DEFAULT_FRAME,
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    /// A counter paced by the configured duration and frame interval.
    pub fn from_timing(target: u64, timing: &TimingSettings) -> Self {
        Self::new(target)
            .with_duration(timing.counter_duration())
            .with_frame(timing.frame_interval())
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Frames shorter than a millisecond are raised to one.
    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = frame.max(MIN_FRAME);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// e.g. `"+"` for "1,500+".
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Amount added per tick.
    ///
    /// When the duration is shorter than a single frame the whole target is
    /// covered in one step.
    pub fn increment(&self) -> f64 {
        let frames = self.duration.as_nanos() as f64 / self.frame.as_nanos() as f64;
        if !frames.is_finite() || frames <= 1.0 {
            return self.target as f64;
        }
        self.target as f64 / frames
    }
}

/// One counter's progress.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedCounter {
    spec: CounterSpec,
    step: f64,
    accumulated: f64,
    value: u64,
    phase: CounterPhase,
}

impl AnimatedCounter {
    pub fn new(spec: CounterSpec) -> Self {
        Self {
            step: spec.increment(),
            spec,
            accumulated: 0.0,
            value: 0,
            phase: CounterPhase::Waiting,
        }
    }

    pub fn spec(&self) -> &CounterSpec {
        &self.spec
    }

    /// Begin counting. Returns `false` if it had already started.
    pub fn start(&mut self) -> bool {
        if self.phase != CounterPhase::Waiting {
            return false;
        }
        debug!(goal = self.spec.target, "Counter started");
        self.phase = CounterPhase::Running;
        true
    }

    /// Advance one frame and return the value to show.
    ///
    /// Does nothing unless running.
    pub fn tick(&mut self) -> u64 {
        if self.phase != CounterPhase::Running {
            return self.value;
        }

        let target = self.spec.target;
        self.accumulated += self.step;
        if self.accumulated >= target as f64 {
            self.value = target;
            self.phase = CounterPhase::Finished;
        } else {
            let shown = self.accumulated.ceil() as u64;
            self.value = shown.clamp(self.value, target);
        }
        self.value
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == CounterPhase::Finished
    }

    /// Prefix, thousands-grouped value, suffix.
    pub fn display(&self) -> String {
        format!(
            "{}{}{}",
            self.spec.prefix,
            group_thousands(self.value),
            self.spec.suffix
        )
    }
}

/// A counter that starts the first time its element is revealed.
///
/// Counters only ever play once, so the reveal is always trigger-once.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealedCounter {
    reveal: RevealOnView,
    counter: AnimatedCounter,
}

impl RevealedCounter {
    pub fn new(spec: CounterSpec) -> Self {
        Self {
            reveal: RevealOnView::latched(DEFAULT_THRESHOLD),
            counter: AnimatedCounter::new(spec),
        }
    }

    /// Start at a different visible fraction.
    pub fn with_threshold(spec: CounterSpec, threshold: f32) -> Result<Self, RevealError> {
        Ok(Self {
            reveal: RevealOnView::once(threshold)?,
            counter: AnimatedCounter::new(spec),
        })
    }

    pub fn mount(&mut self) {
        self.reveal.mount();
    }

    pub fn unmount(&mut self) {
        self.reveal.unmount();
    }

    /// Feed a visibility sample. Returns `true` if this sample started the
    /// counter.
    pub fn observe(&mut self, sample: Visibility) -> bool {
        if self.reveal.observe(sample) && self.reveal.is_visible() {
            return self.counter.start();
        }
        false
    }

    pub fn tick(&mut self) -> u64 {
        self.counter.tick()
    }

    pub fn counter(&self) -> &AnimatedCounter {
        &self.counter
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal.is_visible()
    }
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
