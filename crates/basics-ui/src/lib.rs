#![allow(non_snake_case)]
//! Widgets, lazy lists and animated values.

pub mod anim;
pub mod lazy;

use std::rc::Rc;

use basics_core::*;

pub use anim::{animate_color, animate_f32};
pub use lazy::{LazyColumn, LazyColumnState};

pub fn Surface(modifier: Modifier, child: View) -> View {
    let mut v = View::new(0, ViewKind::Surface).modifier(modifier);
    v.children = vec![child];
    v
}

pub fn Box(modifier: Modifier) -> View {
    View::new(0, ViewKind::Box).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(0, ViewKind::Column).modifier(modifier)
}

pub fn Text(text: impl Into<String>) -> View {
    let text = text.into();
    View::new(
        0,
        ViewKind::Text {
            text: text.clone(),
            color: Color::BLACK,
            font_size: 16.0, // dp
        },
    )
    .semantics(Semantics::new(Role::Text).label(text))
}

/// Horizontal rule, 1dp thick.
pub fn Divider(color: Color) -> View {
    View::new(
        0,
        ViewKind::Divider {
            color,
            thickness: 1.0,
        },
    )
    .modifier(Modifier::new().fill_max_width())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonColors {
    pub background: Color,
    pub content: Color,
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            background: Color::from_hex("#6200EE"),
            content: Color::WHITE,
        }
    }
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    button(text.into(), ButtonColors::default(), false, Rc::new(on_click))
}

/// Button with a 1dp outline; `colors` usually comes from the theme.
pub fn OutlinedButton(
    text: impl Into<String>,
    colors: ButtonColors,
    on_click: impl Fn() + 'static,
) -> View {
    button(text.into(), colors, true, Rc::new(on_click))
        .modifier(Modifier::new().border(1.0, colors.content.with_alpha(0x1F), 4.0))
}

fn button(text: String, colors: ButtonColors, outlined: bool, on_click: Callback) -> View {
    View::new(
        0,
        ViewKind::Button {
            text: text.clone(),
            on_click: Some(on_click),
            background: colors.background,
            content_color: colors.content,
            outlined,
        },
    )
    .semantics(Semantics::new(Role::Button).label(text))
}

pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(self, children: impl IntoChildren) -> Self {
        self.with_children(children.into_children())
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);

/// Method styling
pub trait TextStyle {
    fn color(self, c: Color) -> View;
    fn size(self, dp_font: f32) -> View;
}

impl TextStyle for View {
    fn color(mut self, c: Color) -> View {
        if let ViewKind::Text {
            color: text_color, ..
        } = &mut self.kind
        {
            *text_color = c;
        }
        self
    }
    fn size(mut self, dp_font: f32) -> View {
        if let ViewKind::Text {
            font_size: text_size_dp,
            ..
        } = &mut self.kind
        {
            *text_size_dp = dp_font;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn outlined_button_carries_colors_and_label() {
        let clicks = Rc::new(Cell::new(0));
        let colors = ButtonColors {
            background: Color::BLUE,
            content: Color::WHITE,
        };
        let b = OutlinedButton("Go", colors, {
            let clicks = clicks.clone();
            move || clicks.set(clicks.get() + 1)
        });

        match &b.kind {
            ViewKind::Button {
                background,
                outlined,
                on_click,
                ..
            } => {
                assert_eq!(*background, Color::BLUE);
                assert!(*outlined);
                if let Some(cb) = on_click {
                    cb();
                }
            }
            other => panic!("expected a button, got {other:?}"),
        }
        assert_eq!(clicks.get(), 1);
        assert!(b.modifier.border.is_some());
        assert_eq!(b.semantics.and_then(|s| s.label).as_deref(), Some("Go"));
    }

    #[test]
    fn text_style_only_touches_text() {
        let t = Text("hi").color(Color::RED).size(48.0);
        assert_eq!(
            t.kind,
            ViewKind::Text {
                text: "hi".into(),
                color: Color::RED,
                font_size: 48.0,
            }
        );
        let d = Divider(Color::BLUE).color(Color::RED);
        assert_eq!(
            d.kind,
            ViewKind::Divider {
                color: Color::BLUE,
                thickness: 1.0,
            }
        );
    }

    #[test]
    fn child_accepts_tuples() {
        let c = Column(Modifier::new()).child((Text("a"), Divider(Color::BLACK), Text("b")));
        assert_eq!(c.children.len(), 3);
    }
}
