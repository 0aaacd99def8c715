use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Display;
use std::panic::Location;
use std::rc::{Rc, Weak};

use crate::reactive::{self, ObserverId};
use crate::{Callback, Role, ScrollCallback, View, ViewId, ViewKind};

type SharedComposer = Rc<RefCell<Composer>>;

thread_local! {
    // The composer of the scheduler whose pass is running, if any.
    static CURRENT: RefCell<Option<SharedComposer>> = const { RefCell::new(None) };
}

fn current() -> Option<SharedComposer> {
    CURRENT.with(|c| c.borrow().clone())
}

/// Makes a composer current until dropped, then restores the previous one.
struct Installed(Option<SharedComposer>);

impl Installed {
    fn new(composer: SharedComposer) -> Self {
        Self(CURRENT.with(|c| c.borrow_mut().replace(composer)))
    }
}

impl Drop for Installed {
    fn drop(&mut self) {
        let prev = self.0.take();
        let _ = CURRENT.try_with(|c| *c.borrow_mut() = prev);
    }
}

/// Retained-state store and group table of one [`Scheduler`].
///
/// Keys are hierarchical: `<parent group key>/<file>:<line>:<col>#<n>` for
/// positional call sites, `<parent group key>/<file>:<line>:<col>@<key>` for
/// keyed ones. Anything not visited during a pass is torn down when the pass
/// ends.
#[derive(Default)]
struct Composer {
    pass: u64,
    stack: Vec<String>,
    occurrences: HashMap<String, usize>,
    slots: HashMap<String, Slot>,
    groups: HashMap<String, Group>,
    frame_requested: bool,
    stats: PassStats,
}

struct Slot {
    value: Box<dyn Any>,
    seen: u64,
}

struct Group {
    parent: Option<String>,
    seen: u64,
    restart: Option<Restart>,
}

struct Restart {
    observer: ObserverId,
    dirty: bool,
    cache: Option<(Box<dyn Any>, View)>,
}

/// Counters for one composition pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    pub pass: u64,
    pub groups_run: usize,
    pub groups_skipped: usize,
    pub slots_created: usize,
    pub slots_forgotten: usize,
    pub groups_forgotten: usize,
}

enum Lookup<T> {
    Hit(Rc<T>),
    Mismatch,
    Miss,
}

impl Composer {
    fn parent_key(&self) -> &str {
        self.stack.last().map(String::as_str).unwrap_or("")
    }

    fn positional_key(&mut self, site: &Location<'_>) -> String {
        let base = format!(
            "{}/{}:{}:{}",
            self.parent_key(),
            site.file(),
            site.line(),
            site.column()
        );
        let n = self.occurrences.entry(base.clone()).or_insert(0);
        let key = format!("{base}#{n}");
        *n += 1;
        key
    }

    fn explicit_key(&mut self, key: &str) -> String {
        let base = format!("{}/{key}", self.parent_key());
        let seen_before = {
            let n = self.occurrences.entry(base.clone()).or_insert(0);
            *n += 1;
            *n - 1
        };
        if seen_before > 0 {
            log::warn!(
                "key '{key}' used more than once under '{}'; later uses get distinct identities",
                self.parent_key()
            );
            format!("{base}#{seen_before}")
        } else {
            base
        }
    }

    fn retain_descendants(&mut self, key: &str) {
        let prefix = format!("{key}/");
        let pass = self.pass;
        for (k, slot) in self.slots.iter_mut() {
            if k.starts_with(&prefix) {
                slot.seen = pass;
            }
        }
        for (k, group) in self.groups.iter_mut() {
            if k.starts_with(&prefix) {
                group.seen = pass;
            }
        }
    }

    fn invalidate(&mut self, key: &str) {
        self.frame_requested = true;
        let mut cursor = Some(key.to_string());
        while let Some(k) = cursor {
            match self.groups.get_mut(&k) {
                Some(group) => {
                    if let Some(restart) = group.restart.as_mut() {
                        restart.dirty = true;
                    }
                    cursor = group.parent.clone();
                }
                None => break,
            }
        }
    }

    fn sweep(&mut self) -> (Vec<Slot>, Vec<Group>) {
        let pass = self.pass;
        let stale_slots: Vec<String> = self
            .slots
            .iter()
            .filter(|(_, s)| s.seen != pass)
            .map(|(k, _)| k.clone())
            .collect();
        let stale_groups: Vec<String> = self
            .groups
            .iter()
            .filter(|(_, g)| g.seen != pass)
            .map(|(k, _)| k.clone())
            .collect();

        for k in &stale_slots {
            log::trace!("forgetting slot {k}");
        }
        for k in &stale_groups {
            log::trace!("forgetting group {k}");
        }

        let slots: Vec<Slot> = stale_slots
            .iter()
            .filter_map(|k| self.slots.remove(k))
            .collect();
        let groups: Vec<Group> = stale_groups
            .iter()
            .filter_map(|k| self.groups.remove(k))
            .collect();
        self.stats.slots_forgotten = slots.len();
        self.stats.groups_forgotten = groups.len();
        (slots, groups)
    }
}

fn begin_pass(composer: &RefCell<Composer>) {
    let mut c = composer.borrow_mut();
    c.pass += 1;
    c.stack.clear();
    c.occurrences.clear();
    c.frame_requested = false;
    c.stats = PassStats {
        pass: c.pass,
        ..PassStats::default()
    };
}

fn end_pass(composer: &RefCell<Composer>) -> PassStats {
    let (stats, slots, groups) = {
        let mut c = composer.borrow_mut();
        let (slots, groups) = c.sweep();
        (c.stats, slots, groups)
    };
    // Teardown runs user cleanups; keep the composer unborrowed meanwhile.
    release(slots, groups);
    stats
}

fn release(slots: Vec<Slot>, groups: Vec<Group>) {
    drop(slots);
    for group in groups {
        if let Some(restart) = &group.restart {
            reactive::remove_observer(restart.observer);
        }
    }
}

fn request_frame_on(owner: &Weak<RefCell<Composer>>) {
    let Some(composer) = owner.upgrade() else {
        return;
    };
    match composer.try_borrow_mut() {
        Ok(mut c) => c.frame_requested = true,
        Err(_) => log::warn!("frame requested while the composer is busy; ignored"),
    }
}

fn invalidate_group(owner: &Weak<RefCell<Composer>>, key: &str) {
    let Some(composer) = owner.upgrade() else {
        return;
    };
    match composer.try_borrow_mut() {
        Ok(mut c) => c.invalidate(key),
        Err(_) => log::warn!("group {key} invalidated while the composer is busy; ignored"),
    }
}

/// Re-run the innermost enclosing restartable group on the next pass.
pub fn invalidate_current() {
    let Some(composer) = current() else {
        log::warn!("invalidate_current outside of a composition pass; ignored");
        return;
    };
    let mut c = composer.borrow_mut();
    match c.stack.last().cloned() {
        Some(key) => c.invalidate(&key),
        None => c.frame_requested = true,
    }
}

/// Call-site remember. The Nth call from the same source location inside
/// the same group always refers to the Nth stored value.
///
/// Outside a composition pass nothing is retained: `init` runs every call.
#[track_caller]
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let site = Location::caller();
    let Some(composer) = current() else {
        log::warn!("remember at {site} outside of a composition pass");
        return Rc::new(init());
    };
    let key = composer.borrow_mut().positional_key(site);
    remember_at(&composer, key, init)
}

/// Key-based remember, relative to the enclosing group.
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let Some(composer) = current() else {
        log::warn!("remember_with_key({key}) outside of a composition pass");
        return Rc::new(init());
    };
    let key = composer.borrow_mut().explicit_key(&key);
    remember_at(&composer, key, init)
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}

fn remember_at<T: 'static>(
    composer: &RefCell<Composer>,
    key: String,
    init: impl FnOnce() -> T,
) -> Rc<T> {
    let found = {
        let mut c = composer.borrow_mut();
        let pass = c.pass;
        match c.slots.get_mut(&key) {
            Some(slot) => {
                slot.seen = pass;
                match slot.value.downcast_ref::<Rc<T>>() {
                    Some(rc) => Lookup::Hit(rc.clone()),
                    None => Lookup::Mismatch,
                }
            }
            None => Lookup::Miss,
        }
    };

    match found {
        Lookup::Hit(rc) => rc,
        Lookup::Mismatch => {
            log::warn!(
                "remember: slot '{key}' type changed; replacing. \
                 If this is due to conditional composition, wrap the branch in key()."
            );
            insert_slot(composer, key, init)
        }
        Lookup::Miss => insert_slot(composer, key, init),
    }
}

fn insert_slot<T: 'static>(
    composer: &RefCell<Composer>,
    key: String,
    init: impl FnOnce() -> T,
) -> Rc<T> {
    // `init` may itself compose; run it before borrowing.
    let rc: Rc<T> = Rc::new(init());
    let replaced = {
        let mut c = composer.borrow_mut();
        let seen = c.pass;
        c.stats.slots_created += 1;
        c.slots.insert(
            key,
            Slot {
                value: Box::new(rc.clone()),
                seen,
            },
        )
    };
    drop(replaced);
    rc
}

struct GroupGuard(SharedComposer);

impl GroupGuard {
    fn push(composer: SharedComposer, key: String) -> Self {
        composer.borrow_mut().stack.push(key);
        GroupGuard(composer)
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        if let Ok(mut c) = self.0.try_borrow_mut() {
            c.stack.pop();
        }
    }
}

/// Give `content` an explicit identity. Retained state inside follows the
/// key rather than the call order, which is what list rows and loop bodies
/// need.
#[track_caller]
pub fn key<K: Display, R>(key: K, content: impl FnOnce() -> R) -> R {
    let site = Location::caller();
    let Some(composer) = current() else {
        return content();
    };
    let full = {
        let mut c = composer.borrow_mut();
        let full = c.explicit_key(&format!(
            "{}:{}:{}@{key}",
            site.file(),
            site.line(),
            site.column()
        ));
        let pass = c.pass;
        let parent = c.stack.last().cloned();
        let group = c.groups.entry(full.clone()).or_insert_with(|| Group {
            parent,
            seen: pass,
            restart: None,
        });
        group.seen = pass;
        full
    };

    let _guard = GroupGuard::push(composer, full);
    content()
}

enum Step {
    Reuse(View),
    Run(ObserverId),
}

/// A group that can be skipped. When none of the signals it read have been
/// written and `inputs` equals the previous inputs, the cached subtree is
/// returned and `content` is not invoked.
#[track_caller]
pub fn restartable<I>(inputs: I, content: impl FnOnce(&I) -> View) -> View
where
    I: PartialEq + Clone + 'static,
{
    let site = Location::caller();
    let Some(composer) = current() else {
        return content(&inputs);
    };
    let owner = Rc::downgrade(&composer);
    let (key, step) = {
        let mut c = composer.borrow_mut();
        let c = &mut *c;
        let key = c.positional_key(site);
        let pass = c.pass;
        let parent = c.stack.last().cloned();
        let group = c.groups.entry(key.clone()).or_insert_with(|| Group {
            parent,
            seen: pass,
            restart: None,
        });
        group.seen = pass;
        let restart = group.restart.get_or_insert_with(|| {
            let target = key.clone();
            Restart {
                observer: reactive::new_observer(move || invalidate_group(&owner, &target)),
                dirty: true,
                cache: None,
            }
        });

        let cached = match &restart.cache {
            Some((prev, view)) if !restart.dirty => prev
                .downcast_ref::<I>()
                .filter(|prev| **prev == inputs)
                .map(|_| view.clone()),
            _ => None,
        };

        let step = match cached {
            Some(view) => {
                c.retain_descendants(&key);
                c.stats.groups_skipped += 1;
                Step::Reuse(view)
            }
            None => {
                restart.dirty = false;
                let observer = restart.observer;
                c.stats.groups_run += 1;
                Step::Run(observer)
            }
        };
        (key, step)
    };

    match step {
        Step::Reuse(view) => {
            log::trace!("skipping clean group {key}");
            view
        }
        Step::Run(observer) => {
            let view = {
                let _guard = GroupGuard::push(composer.clone(), key.clone());
                reactive::with_observer(observer, || content(&inputs))
            };
            let mut c = composer.borrow_mut();
            if let Some(restart) = c.groups.get_mut(&key).and_then(|g| g.restart.as_mut()) {
                restart.cache = Some((Box::new(inputs), view.clone()));
            }
            view
        }
    }
}

/// Output of one composition pass: the id-stamped tree plus everything the
/// host needs to route input without a layout pass.
#[derive(Clone, Default)]
pub struct Frame {
    pub root: View,
    pub hit_regions: Vec<HitRegion>,
    pub semantics_nodes: Vec<SemNode>,
    pub stats: PassStats,
}

impl Frame {
    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        fn count(v: &View) -> usize {
            1 + v.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    pub fn find_by_label(&self, label: &str) -> Option<&SemNode> {
        self.semantics_nodes
            .iter()
            .find(|n| n.label.as_deref() == Some(label))
    }
}

#[derive(Clone)]
pub struct HitRegion {
    pub id: ViewId,
    pub on_click: Option<Callback>,
    pub on_scroll: Option<ScrollCallback>,
    pub set_viewport_height: Option<Rc<dyn Fn(f32)>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SemNode {
    /// Shared with the associated `HitRegion`.
    pub id: ViewId,
    pub role: Role,
    pub label: Option<String>,
    pub enabled: bool,
}

/// Owns one composition: its retained state, its groups and its last frame.
/// Several schedulers on one thread never see each other's state.
pub struct Scheduler {
    /// Viewport in physical pixels.
    pub size: (u32, u32),
    /// Ambient dark-mode setting supplied by the host.
    pub dark_theme: bool,
    composer: SharedComposer,
    root_observer: ObserverId,
    frame: Option<Frame>,
    forced: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        let composer: SharedComposer = Rc::new(RefCell::new(Composer::default()));
        let owner = Rc::downgrade(&composer);
        Self {
            size: (1280, 800),
            dark_theme: false,
            composer,
            root_observer: reactive::new_observer(move || request_frame_on(&owner)),
            frame: None,
            forced: false,
        }
    }

    /// Force the next `repose` to compose even if nothing was invalidated.
    pub fn invalidate(&mut self) {
        self.forced = true;
    }

    pub fn needs_frame(&self) -> bool {
        self.frame.is_none()
            || self.forced
            || self.composer.try_borrow().map_or(true, |c| c.frame_requested)
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Number of live retained slots.
    pub fn retained_slot_count(&self) -> usize {
        self.composer.borrow().slots.len()
    }

    #[cfg(test)]
    pub(crate) fn slot_keys(&self) -> Vec<String> {
        self.composer.borrow().slots.keys().cloned().collect()
    }

    /// Compose the root if anything asked for a frame; otherwise return the
    /// previous frame untouched.
    pub fn repose<F>(&mut self, build_root: F) -> &Frame
    where
        F: FnOnce(&mut Scheduler) -> View,
    {
        if self.needs_frame() {
            let frame = self.compose(build_root);
            self.frame = Some(frame);
        } else {
            log::trace!("repose: nothing invalidated, reusing previous frame");
        }
        self.frame.get_or_insert_with(Frame::default)
    }

    fn compose<F>(&mut self, build_root: F) -> Frame
    where
        F: FnOnce(&mut Scheduler) -> View,
    {
        let composer = self.composer.clone();
        let _current = Installed::new(composer.clone());
        begin_pass(&composer);
        self.forced = false;
        let observer = self.root_observer;
        let root = reactive::with_observer(observer, || build_root(self));
        let stats = end_pass(&composer);

        let mut next_id = 1;
        let mut hits = Vec::new();
        let mut sems = Vec::new();
        let root = stamp(root, &mut next_id, &mut hits, &mut sems);

        log::debug!(
            "pass {}: {} nodes, groups run/skipped {}/{}, slots +{} -{}",
            stats.pass,
            next_id - 1,
            stats.groups_run,
            stats.groups_skipped,
            stats.slots_created,
            stats.slots_forgotten
        );

        Frame {
            root,
            hit_regions: hits,
            semantics_nodes: sems,
            stats,
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        reactive::remove_observer(self.root_observer);
        let (slots, groups) = {
            let mut c = self.composer.borrow_mut();
            c.stack.clear();
            let slots: Vec<Slot> = c.slots.drain().map(|(_, s)| s).collect();
            let groups: Vec<Group> = c.groups.drain().map(|(_, g)| g).collect();
            (slots, groups)
        };
        release(slots, groups);
    }
}

/// Assign pre-order ids and collect input routing.
fn stamp(mut v: View, id: &mut ViewId, hits: &mut Vec<HitRegion>, sems: &mut Vec<SemNode>) -> View {
    v.id = *id;
    *id += 1;

    let mut hit = HitRegion {
        id: v.id,
        on_click: v.modifier.on_click.clone(),
        on_scroll: None,
        set_viewport_height: None,
    };
    match &v.kind {
        ViewKind::Button { on_click, .. } => {
            if let Some(cb) = on_click {
                hit.on_click = Some(cb.clone());
            }
        }
        ViewKind::ScrollV {
            on_scroll,
            set_viewport_height,
            ..
        } => {
            hit.on_scroll = on_scroll.clone();
            hit.set_viewport_height = set_viewport_height.clone();
        }
        _ => {}
    }
    if hit.on_click.is_some() || hit.on_scroll.is_some() || hit.set_viewport_height.is_some() {
        hits.push(hit);
    }

    if let Some(s) = v.semantics.as_ref().or(v.modifier.semantics.as_ref()) {
        sems.push(SemNode {
            id: v.id,
            role: s.role,
            label: s.label.clone(),
            enabled: s.enabled,
        });
    }

    v.children = std::mem::take(&mut v.children)
        .into_iter()
        .map(|c| stamp(c, id, hits, sems))
        .collect();
    v
}
