#[cfg(test)]
mod tests {
    use crate::animation::*;
    use crate::reactive;
    use crate::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use web_time::Duration;

    fn text(s: impl Into<String>) -> View {
        View::new(
            0,
            ViewKind::Text {
                text: s.into(),
                color: Color::BLACK,
                font_size: 16.0,
            },
        )
    }

    fn column(children: Vec<View>) -> View {
        View::new(0, ViewKind::Column).with_children(children)
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_tracked_read_is_notified_once_per_run() {
        let sig = signal(1);
        let hits = Rc::new(Cell::new(0));
        let obs = reactive::new_observer({
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });

        reactive::with_observer(obs, || sig.get());
        assert_eq!(reactive::dependency_count(obs), 1);

        sig.set(2);
        assert_eq!(hits.get(), 1);
        // Edges are dropped on notify until the observer runs again.
        sig.set(3);
        assert_eq!(hits.get(), 1);

        reactive::with_observer(obs, || sig.get_untracked());
        assert_eq!(reactive::dependency_count(obs), 0);

        reactive::remove_observer(obs);
    }

    fn counters(handles: &RefCell<Vec<Signal<i32>>>) -> View {
        handles.borrow_mut().clear();
        let rows = (0..2)
            .map(|_| {
                let count = remember(|| signal(0));
                handles.borrow_mut().push((*count).clone());
                text(format!("count {}", count.get()))
            })
            .collect();
        column(rows)
    }

    #[test]
    fn test_remember_is_per_instance_and_survives_passes() {
        let handles = RefCell::new(Vec::new());
        let mut sched = Scheduler::new();

        sched.repose(|_| counters(&handles));
        handles.borrow()[0].set(5);
        assert!(sched.needs_frame());

        let frame = sched.repose(|_| counters(&handles));
        assert_eq!(frame.root.children[0].text(), Some("count 5"));
        assert_eq!(frame.root.children[1].text(), Some("count 0"));
        assert_eq!(frame.stats.slots_created, 0);
    }

    #[test]
    fn test_frame_reused_without_invalidation() {
        let handles = RefCell::new(Vec::new());
        let mut sched = Scheduler::new();

        let first = sched.repose(|_| counters(&handles)).stats.pass;
        assert!(!sched.needs_frame());
        let second = sched.repose(|_| counters(&handles)).stats.pass;
        assert_eq!(first, second);

        sched.invalidate();
        let third = sched.repose(|_| counters(&handles)).stats.pass;
        assert_eq!(third, first + 1);
    }

    #[test]
    fn test_rerender_is_structurally_identical() {
        let handles = RefCell::new(Vec::new());
        let mut sched = Scheduler::new();

        let before = sched.repose(|_| counters(&handles)).root.clone();
        sched.invalidate();
        let after = sched.repose(|_| counters(&handles)).root.clone();
        assert_eq!(before, after);
    }

    fn keyed(names: &[&str], handles: &RefCell<Vec<(String, Signal<i32>)>>) -> View {
        handles.borrow_mut().clear();
        let rows = names
            .iter()
            .map(|name| {
                key(name, || {
                    let count = remember(|| signal(0));
                    handles
                        .borrow_mut()
                        .push((name.to_string(), (*count).clone()));
                    text(format!("{name}={}", count.get()))
                })
            })
            .collect();
        column(rows)
    }

    #[test]
    fn test_keyed_state_follows_key_across_reorder() {
        let handles = RefCell::new(Vec::new());
        let mut sched = Scheduler::new();

        sched.repose(|_| keyed(&["a", "b"], &handles));
        handles.borrow()[0].1.set(1);

        sched.invalidate();
        let frame = sched.repose(|_| keyed(&["b", "a"], &handles));
        assert_eq!(frame.root.children[0].text(), Some("b=0"));
        assert_eq!(frame.root.children[1].text(), Some("a=1"));
    }

    #[test]
    fn test_leaving_the_tree_tears_down_state_and_runs_unmount() {
        let show = signal(true);
        let unmounted = Rc::new(Cell::new(0));
        let mut sched = Scheduler::new();

        let build = |show: &Signal<bool>, unmounted: &Rc<Cell<i32>>| {
            let mut kids = vec![text("always")];
            if show.get() {
                kids.push(key("child", || {
                    let _state = remember(|| signal(String::from("kept")));
                    let unmounted = unmounted.clone();
                    disposable_effect((), move || {
                        on_unmount(move || unmounted.set(unmounted.get() + 1))
                    });
                    text("child")
                }));
            }
            column(kids)
        };

        sched.repose(|_| build(&show, &unmounted));
        let with_child = sched.retained_slot_count();
        assert!(with_child >= 2);

        show.set(false);
        let frame = sched.repose(|_| build(&show, &unmounted));
        assert_eq!(unmounted.get(), 1);
        assert!(frame.stats.slots_forgotten >= 2);
        assert!(sched.retained_slot_count() < with_child);

        // Coming back creates fresh state and re-runs the effect.
        show.set(true);
        let frame = sched.repose(|_| build(&show, &unmounted));
        assert!(frame.root.find_text("child").is_some());
        assert!(frame.stats.slots_created >= 2);
        assert_eq!(unmounted.get(), 1);
    }

    #[test]
    fn test_disposable_effect_reruns_only_when_its_key_changes() {
        let runs = Rc::new(Cell::new(0));
        let cleanups = Rc::new(Cell::new(0));
        let mut sched = Scheduler::new();

        let pass = |sched: &mut Scheduler, k: i32| {
            let runs = runs.clone();
            let cleanups = cleanups.clone();
            sched.invalidate();
            sched.repose(move |_| {
                disposable_effect(k, move || {
                    runs.set(runs.get() + 1);
                    on_unmount(move || cleanups.set(cleanups.get() + 1))
                });
                text("effect")
            });
        };

        for _ in 0..5 {
            pass(&mut sched, 1);
        }
        assert_eq!((runs.get(), cleanups.get()), (1, 0));
        let slots = sched.retained_slot_count();

        pass(&mut sched, 2);
        assert_eq!((runs.get(), cleanups.get()), (2, 1));
        assert_eq!(sched.retained_slot_count(), slots);

        drop(sched);
        assert_eq!(cleanups.get(), 2);
    }

    #[test]
    fn test_restartable_skips_clean_group() {
        let runs = Rc::new(Cell::new(0));
        let outer = signal(0);
        let inner: Rc<RefCell<Option<Signal<i32>>>> = Rc::new(RefCell::new(None));
        let mut sched = Scheduler::new();

        let build = |outer: &Signal<i32>| {
            let runs = runs.clone();
            let inner = inner.clone();
            let group = restartable((), move |_| {
                runs.set(runs.get() + 1);
                let local = remember(|| signal(0));
                *inner.borrow_mut() = Some((*local).clone());
                text(format!("inner {}", local.get()))
            });
            column(vec![group, text(format!("outer {}", outer.get()))])
        };

        sched.repose(|_| build(&outer));
        assert_eq!(runs.get(), 1);

        outer.set(1);
        let frame = sched.repose(|_| build(&outer));
        assert_eq!(runs.get(), 1);
        assert_eq!(frame.stats.groups_skipped, 1);
        assert_eq!(frame.stats.slots_forgotten, 0);
        assert_eq!(frame.root.children[1].text(), Some("outer 1"));

        let local = inner.borrow().clone().expect("group ran once");
        local.set(9);
        let frame = sched.repose(|_| build(&outer));
        assert_eq!(runs.get(), 2);
        assert_eq!(frame.root.children[0].text(), Some("inner 9"));
    }

    #[test]
    fn test_restartable_reruns_when_inputs_change() {
        let runs = Rc::new(Cell::new(0));
        let mut sched = Scheduler::new();

        let build = |label: &str| {
            let runs = runs.clone();
            restartable(label.to_string(), move |label| {
                runs.set(runs.get() + 1);
                text(label.clone())
            })
        };

        sched.repose(|_| build("a"));
        sched.invalidate();
        sched.repose(|_| build("a"));
        assert_eq!(runs.get(), 1);

        sched.invalidate();
        let frame = sched.repose(|_| build("b"));
        assert_eq!(runs.get(), 2);
        assert_eq!(frame.root.text(), Some("b"));
    }

    #[test]
    fn test_key_based_remember() {
        let mut sched = Scheduler::new();
        let seen = RefCell::new(Vec::new());

        for init in [42, 100] {
            sched.invalidate();
            sched.repose(|_| {
                let v = remember_with_key("test", || init);
                seen.borrow_mut().push(*v);
                text("x")
            });
        }

        // Same key, same slot: the second init never runs.
        assert_eq!(*seen.borrow(), vec![42, 42]);
    }

    #[test]
    fn test_hit_regions_route_clicks() {
        let clicks = Rc::new(Cell::new(0));
        let mut sched = Scheduler::new();

        let frame = sched.repose(|_| {
            let clicks = clicks.clone();
            column(vec![
                text("label"),
                text("tap me").modifier(Modifier::new().clickable(move || clicks.set(clicks.get() + 1))),
            ])
        });

        assert_eq!(frame.hit_regions.len(), 1);
        assert_eq!(frame.hit_regions[0].id, 3);
        if let Some(cb) = &frame.hit_regions[0].on_click {
            cb();
        }
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_schedulers_on_one_thread_are_isolated() {
        let a_handles = RefCell::new(Vec::new());
        let b_handles = RefCell::new(Vec::new());
        let mut a = Scheduler::new();
        a.repose(|_| counters(&a_handles));
        a_handles.borrow()[0].set(2);
        a.repose(|_| counters(&a_handles));

        let unmounted = Rc::new(Cell::new(0));
        {
            let mut b = Scheduler::new();
            let frame = b.repose(|_| {
                let unmounted = unmounted.clone();
                disposable_effect((), move || {
                    on_unmount(move || unmounted.set(unmounted.get() + 1))
                });
                counters(&b_handles)
            });
            assert_eq!(frame.root.children[0].text(), Some("count 0"));
            assert_eq!(frame.stats.slots_created, 3);

            // A write in B does not ask A for a frame.
            b_handles.borrow()[1].set(7);
            assert!(b.needs_frame());
            assert!(!a.needs_frame());
        }
        assert_eq!(unmounted.get(), 1);

        a.invalidate();
        let frame = a.repose(|_| counters(&a_handles));
        assert_eq!(frame.root.children[0].text(), Some("count 2"));
        assert_eq!(frame.stats.slots_created, 0);
        assert_eq!(a.retained_slot_count(), 2);
    }

    #[test]
    fn test_remember_outside_a_pass_is_not_retained() {
        let first = remember(|| signal(1));
        first.set(5);
        let second = remember(|| signal(1));
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_key_identity_includes_the_file() {
        let mut sched = Scheduler::new();
        sched.repose(|_| {
            key("row", || {
                let _ = remember(|| 0u8);
            });
            text("x")
        });

        let keys = sched.slot_keys();
        assert_eq!(keys.len(), 1);
        assert!(keys[0].starts_with(&format!("/{}:", file!())), "{}", keys[0]);
        assert!(keys[0].contains("@row/"), "{}", keys[0]);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));

        assert_eq!(Color::from_argb(0xffCE93D8), Color(0xCE, 0x93, 0xD8, 0xFF));
    }

    #[test]
    fn test_animation_deterministic() {
        let clock = TestClock::install();

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0);

        clock.advance(Duration::from_millis(250));
        assert!(a.update());
        assert!((*a.get() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        let cont = a.update();
        assert!(!cont);
        assert!(!a.update(), "finished tweens stay finished");
        assert!((*a.get() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_color_interpolation_endpoints() {
        let from = Color::TRANSPARENT;
        let to = Color::RED;
        assert_eq!(from.interpolate(&to, 0.0), from);
        assert_eq!(from.interpolate(&to, 1.0), to);
        assert_eq!(from.interpolate(&to, 0.5), Color(128, 0, 0, 128));
    }
}
