use basics_core::*;
use basics_ui::{Text, TextStyle, animate_color};

use crate::theme::Theme;

pub fn greeting_text(name: &str) -> String {
    format!("Hello {name}")
}

/// `Hello <name>` in h3. Clicking toggles a private selection flag; the
/// background tweens between transparent and red.
pub fn Greeting(name: &str, theme: &Theme) -> View {
    restartable((name.to_string(), theme.typography), |(name, typography)| {
        let selected = remember(|| signal(false));
        let target = if selected.get() {
            Color::RED
        } else {
            Color::TRANSPARENT
        };
        let background = animate_color("background", target, AnimationSpec::default());

        let toggle = {
            let selected = (*selected).clone();
            move || selected.update(|s| *s = !*s)
        };
        Text(greeting_text(name)).size(typography.h3).modifier(
            Modifier::new()
                .padding(18.0)
                .background(background)
                .clickable(toggle),
        )
    })
}
