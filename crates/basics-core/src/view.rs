use crate::{Color, Modifier, Vec2};
use std::rc::Rc;

pub type ViewId = u64;

pub type Callback = Rc<dyn Fn()>;
/// Consumes a scroll delta (px) and returns the leftover.
pub type ScrollCallback = Rc<dyn Fn(Vec2) -> Vec2>;

#[derive(Clone, Default)]
pub enum ViewKind {
    Surface,
    #[default]
    Box,
    Column,
    ScrollV {
        on_scroll: Option<ScrollCallback>,
        set_viewport_height: Option<Rc<dyn Fn(f32)>>,
    },
    Text {
        text: String,
        color: Color,
        font_size: f32,
    },
    Button {
        text: String,
        on_click: Option<Callback>,
        background: Color,
        content_color: Color,
        outlined: bool,
    },
    Divider {
        color: Color,
        thickness: f32,
    },
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Surface => write!(f, "Surface"),
            ViewKind::Box => write!(f, "Box"),
            ViewKind::Column => write!(f, "Column"),
            ViewKind::ScrollV { .. } => write!(f, "ScrollV"),
            ViewKind::Text {
                text,
                color,
                font_size,
            } => f
                .debug_struct("Text")
                .field("text", text)
                .field("color", color)
                .field("font_size", font_size)
                .finish(),
            ViewKind::Button {
                text,
                background,
                content_color,
                outlined,
                ..
            } => f
                .debug_struct("Button")
                .field("text", text)
                .field("background", background)
                .field("content_color", content_color)
                .field("outlined", outlined)
                .field("on_click", &"<callback>")
                .finish(),
            ViewKind::Divider { color, thickness } => f
                .debug_struct("Divider")
                .field("color", color)
                .field("thickness", thickness)
                .finish(),
        }
    }
}

/// Handlers are compared by presence only: a fresh closure built from the
/// same state renders the same node.
impl PartialEq for ViewKind {
    fn eq(&self, other: &Self) -> bool {
        use ViewKind::*;
        match (self, other) {
            (Surface, Surface) | (Box, Box) | (Column, Column) => true,
            (
                ScrollV {
                    on_scroll: a,
                    set_viewport_height: b,
                },
                ScrollV {
                    on_scroll: x,
                    set_viewport_height: y,
                },
            ) => a.is_some() == x.is_some() && b.is_some() == y.is_some(),
            (
                Text {
                    text: t1,
                    color: c1,
                    font_size: s1,
                },
                Text {
                    text: t2,
                    color: c2,
                    font_size: s2,
                },
            ) => t1 == t2 && c1 == c2 && s1 == s2,
            (
                Button {
                    text: t1,
                    on_click: h1,
                    background: b1,
                    content_color: c1,
                    outlined: o1,
                },
                Button {
                    text: t2,
                    on_click: h2,
                    background: b2,
                    content_color: c2,
                    outlined: o2,
                },
            ) => t1 == t2 && h1.is_some() == h2.is_some() && b1 == b2 && c1 == c2 && o1 == o2,
            (
                Divider {
                    color: c1,
                    thickness: t1,
                },
                Divider {
                    color: c2,
                    thickness: t2,
                },
            ) => c1 == c2 && t1 == t2,
            _ => false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
    pub semantics: Option<crate::semantics::Semantics>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            modifier: Modifier::default(),
            children: vec![],
            semantics: None,
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn semantics(mut self, s: crate::semantics::Semantics) -> Self {
        self.semantics = Some(s);
        self
    }

    /// Depth-first search by predicate.
    pub fn find(&self, pred: &dyn Fn(&View) -> bool) -> Option<&View> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(pred))
    }

    /// All nodes matching `pred`, in pre-order.
    pub fn find_all(&self, pred: &dyn Fn(&View) -> bool) -> Vec<&View> {
        let mut out = Vec::new();
        fn walk<'a>(v: &'a View, pred: &dyn Fn(&View) -> bool, out: &mut Vec<&'a View>) {
            if pred(v) {
                out.push(v);
            }
            for c in &v.children {
                walk(c, pred, out);
            }
        }
        walk(self, pred, &mut out);
        out
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ViewKind::Text { text, .. } | ViewKind::Button { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn find_text(&self, text: &str) -> Option<&View> {
        self.find(&|v| v.text() == Some(text))
    }
}
