use std::ops::Range;
use std::rc::Rc;

use basics_core::*;

/// Rows kept composed on each side of the viewport.
pub const BUFFER_ROWS: usize = 2;

/// Scroll position and viewport height of a [`LazyColumn`], in dp.
pub struct LazyColumnState {
    scroll_offset: Signal<f32>,
    viewport_height: Signal<f32>,
}

impl Default for LazyColumnState {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyColumnState {
    pub fn new() -> Self {
        Self {
            scroll_offset: signal(0.0),
            viewport_height: signal(600.0),
        }
    }

    pub fn offset(&self) -> f32 {
        self.scroll_offset.get_untracked()
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height.get_untracked()
    }

    /// Non-finite heights are ignored.
    pub fn set_viewport_height(&self, h: f32) {
        if !h.is_finite() {
            log::warn!("lazy column: ignoring viewport height {h}");
            return;
        }
        let h = h.max(0.0);
        if (self.viewport_height.get_untracked() - h).abs() > f32::EPSILON {
            self.viewport_height.set(h);
        }
    }

    pub fn set_offset(&self, off: f32, content_height: f32) {
        let max_off = (content_height - self.viewport_height()).max(0.0);
        let next = off.clamp(0.0, max_off);
        if (next - self.offset()).abs() > f32::EPSILON {
            self.scroll_offset.set(next);
        }
    }

    /// Consume `delta`. Returns the leftover (for nested scroll).
    pub fn scroll_immediate(&self, delta: f32, content_height: f32) -> f32 {
        let before = self.offset();
        self.set_offset(before + delta, content_height);
        let consumed = self.offset() - before;
        delta - consumed
    }
}

/// Indices to compose for the given scroll position: the visible rows plus
/// [`BUFFER_ROWS`] on each side, clipped to `count`.
pub fn visible_range(count: usize, item_height: f32, offset: f32, viewport: f32) -> Range<usize> {
    if count == 0 || item_height <= 0.0 {
        return 0..0;
    }
    let first_visible = (offset / item_height).floor().max(0.0) as usize;
    let last_visible = ((offset + viewport) / item_height).ceil().max(0.0) as usize;

    let start = first_visible.saturating_sub(BUFFER_ROWS).min(count);
    let end = last_visible.saturating_add(BUFFER_ROWS).min(count).max(start);
    start..end
}

/// Virtualized list - only composes rows near the viewport.
///
/// Each row is composed under `key(index)`, so a row's retained state lives
/// while it is in the window and is torn down once it scrolls out.
pub fn LazyColumn<T, F>(
    items: &[T],
    item_height_dp: f32,
    state: Rc<LazyColumnState>,
    modifier: Modifier,
    item_builder: F,
) -> View
where
    F: Fn(&T, usize) -> View,
{
    let content_height = items.len() as f32 * item_height_dp;

    // Tracked reads: scrolling invalidates whoever composes this list.
    let offset = state.scroll_offset.get();
    let viewport = state.viewport_height.get();
    let window = visible_range(items.len(), item_height_dp, offset, viewport);
    log::trace!("lazy column: rows {window:?} of {}", items.len());

    let mut children = Vec::with_capacity(window.len() + 2);

    if window.start > 0 {
        children.push(crate::Box(
            Modifier::new().size(1.0, window.start as f32 * item_height_dp),
        ));
    }

    for (i, item) in items[window.clone()].iter().enumerate() {
        let index = window.start + i;
        children.push(key(index, || item_builder(item, index)));
    }

    if window.end < items.len() {
        let remaining = items.len() - window.end;
        children.push(crate::Box(
            Modifier::new().size(1.0, remaining as f32 * item_height_dp),
        ));
    }

    let on_scroll = {
        let st = state.clone();
        Rc::new(move |d: Vec2| -> Vec2 {
            let leftover = st.scroll_immediate(d.y, content_height);
            Vec2 { x: d.x, y: leftover }
        })
    };

    let set_viewport = {
        let st = state.clone();
        Rc::new(move |h: f32| st.set_viewport_height(h))
    };

    let content = crate::Column(Modifier::new()).with_children(children);

    View::new(
        0,
        ViewKind::ScrollV {
            on_scroll: Some(on_scroll),
            set_viewport_height: Some(set_viewport),
        },
    )
    .modifier(modifier)
    .with_children(vec![content])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Text;
    use std::cell::Cell;

    fn rows(frame: &Frame) -> usize {
        frame.root.children[0]
            .children
            .iter()
            .filter(|c| matches!(c.kind, ViewKind::Text { .. }))
            .count()
    }

    #[test]
    fn visible_range_adds_buffer_and_clips() {
        assert_eq!(visible_range(1000, 50.0, 0.0, 500.0), 0..12);
        assert_eq!(visible_range(1000, 50.0, 1000.0, 500.0), 18..32);
        assert_eq!(visible_range(20, 50.0, 500.0, 500.0), 8..20);
        assert_eq!(visible_range(0, 50.0, 0.0, 500.0), 0..0);
        assert_eq!(visible_range(3, 50.0, 0.0, 500.0), 0..3);
    }

    #[test]
    fn unbounded_viewport_covers_every_row() {
        assert_eq!(visible_range(1000, 91.0, 0.0, f32::INFINITY), 0..1000);
        assert_eq!(visible_range(1000, 91.0, 0.0, f32::NAN), 0..2);

        let st = LazyColumnState::new();
        st.set_viewport_height(320.0);
        st.set_viewport_height(f32::INFINITY);
        st.set_viewport_height(f32::NAN);
        assert_eq!(st.viewport_height(), 320.0);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let st = LazyColumnState::new();
        st.set_viewport_height(100.0);

        assert_eq!(st.scroll_immediate(-30.0, 1000.0), -30.0);
        assert_eq!(st.offset(), 0.0);

        assert_eq!(st.scroll_immediate(250.0, 1000.0), 0.0);
        assert_eq!(st.offset(), 250.0);

        let leftover = st.scroll_immediate(10_000.0, 1000.0);
        assert_eq!(st.offset(), 900.0);
        assert_eq!(leftover, 10_000.0 - 650.0);
    }

    #[test]
    fn only_rows_near_the_viewport_are_composed() {
        let items: Vec<String> = (0..1000).map(|i| format!("Row {i}")).collect();
        let state = Rc::new(LazyColumnState::new());
        state.set_viewport_height(500.0);
        let built = Rc::new(Cell::new(0));
        let mut sched = Scheduler::new();

        let build = |items: &[String]| {
            let built = built.clone();
            LazyColumn(items, 50.0, state.clone(), Modifier::new(), move |s, _| {
                built.set(built.get() + 1);
                Text(s.clone())
            })
        };

        let frame = sched.repose(|_| build(&items));
        assert_eq!(rows(frame), 12);
        assert_eq!(built.get(), 12);
        assert!(frame.root.find_text("Row 0").is_some());
        assert!(frame.root.find_text("Row 12").is_none());

        let on_scroll = frame.hit_regions[0].on_scroll.clone().expect("scroll handler");
        on_scroll(Vec2::new(0.0, 5000.0));
        assert!(sched.needs_frame());

        let frame = sched.repose(|_| build(&items));
        assert_eq!(rows(frame), 14);
        assert!(frame.root.find_text("Row 0").is_none());
        assert!(frame.root.find_text("Row 100").is_some());
    }

    #[test]
    fn empty_list_renders_no_rows() {
        let state = Rc::new(LazyColumnState::new());
        let mut sched = Scheduler::new();
        let items: Vec<String> = Vec::new();

        let frame = sched.repose(|_| {
            LazyColumn(&items, 50.0, state.clone(), Modifier::new(), |s, _| Text(s.clone()))
        });
        assert_eq!(rows(frame), 0);
        assert_eq!(frame.root.children[0].children.len(), 0);
    }
}
