use std::cell::Cell;
use std::rc::Rc;
use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub enum Easing {
    Linear,
    EaseInOut,
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for AnimationSpec {
    /// Roughly what browsers use for `behavior: "smooth"`.
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

// Animation clock
pub trait Clock {
    fn now(&self) -> Instant;
}

/// A clock driven by hand; clones share the same time.
#[derive(Clone)]
pub struct ManualClock {
    t: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            t: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

/// Scalar tween sampled against an explicit time.
#[derive(Clone, Debug)]
pub struct AnimatedValue {
    start: f32,
    target: f32,
    spec: AnimationSpec,
    start_time: Instant,
}

impl AnimatedValue {
    pub fn new(start: f32, target: f32, spec: AnimationSpec, now: Instant) -> Self {
        Self {
            start,
            target,
            spec,
            start_time: now,
        }
    }

    /// Value at `now`, and whether the tween is still running.
    pub fn sample(&self, now: Instant) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed >= self.spec.duration || self.spec.duration.is_zero() {
            return (self.target, false);
        }
        let t = elapsed.as_secs_f32() / self.spec.duration.as_secs_f32();
        let eased = self.spec.easing.interpolate(t);
        (self.start + (self.target - self.start) * eased, true)
    }
}
