//! Tweens driven by a per-thread clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use web_time::{Duration, Instant};

use crate::Color;

pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

/// Wall time. What every host runs on.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

thread_local! {
    static CLOCK: RefCell<Rc<dyn Clock>> = RefCell::new(Rc::new(SystemClock));
}

pub(crate) fn now() -> Instant {
    CLOCK.with(|c| c.borrow().now())
}

/// Replace the animation clock for the current thread.
pub fn set_clock(clock: Rc<dyn Clock>) {
    CLOCK.with(|c| *c.borrow_mut() = clock);
}

/// Hand-driven time. Clones share one instant.
#[derive(Clone)]
pub struct TestClock {
    t: Rc<Cell<Instant>>,
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            t: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// New clock, already installed on this thread.
    pub fn install() -> Self {
        let clock = Self::new();
        set_clock(Rc::new(clock.clone()));
        clock
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Symmetric cubic: slow start, slow finish.
    EaseInOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for AnimationSpec {
    /// 300 ms ease-in-out.
    fn default() -> Self {
        Self::tween(Duration::from_millis(300), Easing::EaseInOut)
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Color {
    /// Per channel, rounded.
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        let mix = |a: u8, b: u8| {
            let v = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
            mix(self.3, other.3),
        )
    }
}

struct Run<T> {
    from: T,
    started: Instant,
}

/// A value that tweens toward its target. Call [`update`](Self::update)
/// once per frame.
pub struct AnimatedValue<T: Interpolate + Clone> {
    value: T,
    target: T,
    spec: AnimationSpec,
    run: Option<Run<T>>,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            value: initial.clone(),
            target: initial,
            spec,
            run: None,
        }
    }

    /// Start tweening toward `target` from wherever the value is now, so a
    /// retarget mid-flight does not jump.
    pub fn set_target(&mut self, target: T) {
        self.target = target;
        self.run = Some(Run {
            from: self.value.clone(),
            started: now(),
        });
    }

    /// Advance to the clock's current time. Returns `true` while still running.
    pub fn update(&mut self) -> bool {
        let Some(run) = &self.run else {
            return false;
        };
        let active = now().saturating_duration_since(run.started);
        if active >= self.spec.duration {
            self.value = self.target.clone();
            self.run = None;
            return false;
        }

        let progress = active.as_secs_f32() / self.spec.duration.as_secs_f32();
        self.value = run
            .from
            .interpolate(&self.target, self.spec.easing.apply(progress));
        true
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}
