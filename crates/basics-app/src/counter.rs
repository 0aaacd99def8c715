use basics_core::*;
use basics_ui::{ButtonColors, OutlinedButton};

use crate::theme::Theme;

pub const COUNTER_LABEL_PREFIX: &str = "I've been clicked";

pub fn counter_label(count: i32) -> String {
    format!("{COUNTER_LABEL_PREFIX} {count} times")
}

/// Owns its count; every instance counts on its own.
pub fn Counter(theme: &Theme) -> View {
    restartable(theme.colors, |colors| {
        let count = remember(|| signal(0i32));
        let on_click = {
            let count = (*count).clone();
            move || count.update(|n| *n += 1)
        };
        OutlinedButton(
            counter_label(count.get()),
            ButtonColors {
                background: colors.surface,
                content: colors.primary,
            },
            on_click,
        )
    })
}

/// Stateless: renders `count` and reports `count + 1` to the owner.
pub fn HoistedCounter(count: i32, update_count: impl Fn(i32) + 'static) -> View {
    let background = if count > 5 { Color::RED } else { Color::BLUE };
    OutlinedButton(
        counter_label(count),
        ButtonColors {
            background,
            content: Color::WHITE,
        },
        move || update_count(count + 1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn button_parts(v: &View) -> (Color, Option<Callback>) {
        match &v.kind {
            ViewKind::Button {
                background,
                on_click,
                ..
            } => (*background, on_click.clone()),
            other => panic!("expected a button, got {other:?}"),
        }
    }

    #[test]
    fn hoisted_counter_reports_next_value() {
        let seen = Rc::new(Cell::new(None));
        let v = HoistedCounter(5, {
            let seen = seen.clone();
            move |n| seen.set(Some(n))
        });
        assert_eq!(v.text(), Some("I've been clicked 5 times"));

        let (background, on_click) = button_parts(&v);
        assert_eq!(background, Color::BLUE);
        on_click.expect("clickable")();
        assert_eq!(seen.get(), Some(6));
    }

    #[test]
    fn hoisted_counter_turns_red_past_five() {
        let (at_five, _) = button_parts(&HoistedCounter(5, |_| {}));
        let (at_six, _) = button_parts(&HoistedCounter(6, |_| {}));
        assert_eq!(at_six, Color::RED);
        assert_ne!(at_five, at_six);
    }

    #[test]
    fn internal_counter_uses_theme_colors() {
        let theme = Theme::new(true);
        let mut sched = Scheduler::new();
        let frame = sched.repose(|_| Counter(&theme));
        match &frame.root.kind {
            ViewKind::Button {
                text,
                background,
                content_color,
                outlined,
                ..
            } => {
                assert_eq!(text, "I've been clicked 0 times");
                assert_eq!(*background, theme.colors.surface);
                assert_eq!(*content_color, theme.colors.primary);
                assert!(*outlined);
            }
            other => panic!("expected a button, got {other:?}"),
        }
    }
}
