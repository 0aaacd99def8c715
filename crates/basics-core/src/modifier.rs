use std::fmt;
use std::rc::Rc;

use crate::{Callback, Color, Semantics, Size};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
    pub radius: f32,
}

/// Axes that stretch to the parent's extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fill {
    pub width: bool,
    pub height: bool,
}

/// Decoration and input attached to a view. Compared by value, except the
/// click handler, which only counts as present or absent.
#[derive(Clone, Default)]
pub struct Modifier {
    /// Fixed size in dp.
    pub size: Option<Size>,
    pub fill: Fill,
    /// Uniform padding in dp.
    pub padding: Option<f32>,
    pub background: Option<Color>,
    pub border: Option<Border>,
    pub on_click: Option<Callback>,
    pub semantics: Option<Semantics>,
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Modifier");
        if let Some(size) = &self.size {
            d.field("size", size);
        }
        if self.fill != Fill::default() {
            d.field("fill", &self.fill);
        }
        if let Some(p) = self.padding {
            d.field("padding", &p);
        }
        if let Some(bg) = &self.background {
            d.field("background", bg);
        }
        if let Some(b) = &self.border {
            d.field("border", b);
        }
        if self.on_click.is_some() {
            d.field("on_click", &"<fn>");
        }
        if let Some(s) = &self.semantics {
            d.field("semantics", s);
        }
        d.finish()
    }
}

impl PartialEq for Modifier {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.fill == other.fill
            && self.padding == other.padding
            && self.background == other.background
            && self.border == other.border
            && self.on_click.is_some() == other.on_click.is_some()
            && self.semantics == other.semantics
    }
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size { width, height });
        self
    }

    pub fn fill_max_size(mut self) -> Self {
        self.fill = Fill {
            width: true,
            height: true,
        };
        self
    }

    pub fn fill_max_width(mut self) -> Self {
        self.fill.width = true;
        self
    }

    pub fn fill_max_height(mut self) -> Self {
        self.fill.height = true;
        self
    }

    pub fn padding(mut self, dp: f32) -> Self {
        self.padding = Some(dp);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border(mut self, width: f32, color: Color, radius: f32) -> Self {
        self.border = Some(Border {
            width,
            color,
            radius,
        });
        self
    }

    pub fn clickable(mut self, on_click: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(on_click));
        self
    }

    pub fn semantics(mut self, s: Semantics) -> Self {
        self.semantics = Some(s);
        self
    }
}
