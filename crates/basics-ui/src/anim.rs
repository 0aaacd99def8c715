use basics_core::Color;
use basics_core::{
    animation::{AnimatedValue, AnimationSpec, Interpolate},
    invalidate_current, remember_state_with_key,
};

/// Retarget-or-advance step shared by the typed helpers. While the value is
/// in flight the enclosing group stays invalidated so frames keep coming.
fn animate<T>(key: String, target: T, spec: AnimationSpec) -> T
where
    T: Interpolate + Clone + PartialEq + 'static,
{
    let anim = remember_state_with_key(key, || AnimatedValue::new(target.clone(), spec));
    let (value, running) = {
        let mut a = anim.borrow_mut();
        if *a.target() != target {
            a.set_target(target);
        }
        let running = a.update();
        (a.get().clone(), running)
    };
    if running {
        invalidate_current();
    }
    value
}

/// Animate f32 to the given target; returns the current value each frame.
pub fn animate_f32(key: impl Into<String>, target: f32, spec: AnimationSpec) -> f32 {
    animate(format!("anim:f32:{}", key.into()), target, spec)
}

/// Animate Color to the given target; returns the current value each frame.
pub fn animate_color(key: impl Into<String>, target: Color, spec: AnimationSpec) -> Color {
    animate(format!("anim:color:{}", key.into()), target, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use basics_core::*;
    use web_time::Duration;

    fn swatch(selected: &Signal<bool>) -> View {
        restartable((), |_| {
            let target = if selected.get() { Color::RED } else { Color::TRANSPARENT };
            let bg = animate_color("bg", target, AnimationSpec::default());
            View::new(0, ViewKind::Box).modifier(Modifier::new().background(bg))
        })
    }

    fn background(frame: &Frame) -> Option<Color> {
        frame.root.modifier.background
    }

    #[test]
    fn color_settles_on_target_and_stops_requesting_frames() {
        let clock = TestClock::install();
        let selected = signal(false);
        let mut sched = Scheduler::new();

        let frame = sched.repose(|_| swatch(&selected));
        assert_eq!(background(frame), Some(Color::TRANSPARENT));

        selected.set(true);
        let frame = sched.repose(|_| swatch(&selected));
        assert_eq!(background(frame), Some(Color::TRANSPARENT));
        assert!(sched.needs_frame());

        clock.advance(Duration::from_millis(150));
        let mid = background(sched.repose(|_| swatch(&selected)));
        assert_ne!(mid, Some(Color::TRANSPARENT));
        assert_ne!(mid, Some(Color::RED));

        clock.advance(Duration::from_millis(200));
        let frame = sched.repose(|_| swatch(&selected));
        assert_eq!(background(frame), Some(Color::RED));
        assert!(!sched.needs_frame());
    }

    #[test]
    fn f32_without_change_never_animates() {
        let _clock = TestClock::install();
        let mut sched = Scheduler::new();
        let frame = sched.repose(|_| {
            let v = animate_f32("alpha", 1.0, AnimationSpec::tween(Duration::from_millis(150), Easing::Linear));
            View::new(0, ViewKind::Box).modifier(Modifier::new().padding(v))
        });
        assert_eq!(frame.root.modifier.padding, Some(1.0));
        assert!(!sched.needs_frame());
    }
}
