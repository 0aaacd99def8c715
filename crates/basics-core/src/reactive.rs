//! Dependency graph between signals and the composition groups that read them.
//!
//! Observers are notifications, not recomputations: a group observer marks
//! itself dirty and asks for a frame, and the next composition pass re-runs
//! it under tracking (which rebuilds its edges).

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

pub type SignalId = usize;

new_key_type! {
    pub struct ObserverId;
}

thread_local! {
    static CURRENT_OBSERVER: Cell<Option<ObserverId>> = const { Cell::new(None) };
    static NEXT_SIGNAL: Cell<SignalId> = const { Cell::new(0) };
    static GRAPH: RefCell<DepGraph> = RefCell::new(DepGraph::default());
}

#[derive(Default)]
struct DepGraph {
    // signal_id -> observers that depend on it
    edges: HashMap<SignalId, HashSet<ObserverId>>,
    // observer_id -> signals it depends on; a group reads only a handful
    back: HashMap<ObserverId, SmallVec<[SignalId; 4]>>,
    observers: SlotMap<ObserverId, Rc<dyn Fn()>>,
    running: HashSet<ObserverId>,
}

impl DepGraph {
    fn remove_all_edges_for(&mut self, obs: ObserverId) {
        if let Some(signals) = self.back.remove(&obs) {
            for s in signals {
                if let Some(set) = self.edges.get_mut(&s) {
                    set.remove(&obs);
                    if set.is_empty() {
                        self.edges.remove(&s);
                    }
                }
            }
        }
    }

    fn remove_observer(&mut self, obs: ObserverId) {
        self.observers.remove(obs);
        self.remove_all_edges_for(obs);
        self.running.remove(&obs);
    }

    fn forget_signal(&mut self, sig: SignalId) {
        if let Some(observers) = self.edges.remove(&sig) {
            for obs in observers {
                if let Some(sigs) = self.back.get_mut(&obs) {
                    sigs.retain(|s| *s != sig);
                }
            }
        }
    }
}

pub(crate) fn next_signal_id() -> SignalId {
    NEXT_SIGNAL.with(|n| {
        let id = n.get();
        n.set(id + 1);
        id
    })
}

pub fn register_signal_read(sig: SignalId) {
    if let Some(obs) = current_observer() {
        GRAPH.with(|g| {
            let mut g = g.borrow_mut();
            g.edges.entry(sig).or_default().insert(obs);
            let sigs = g.back.entry(obs).or_default();
            if !sigs.contains(&sig) {
                sigs.push(sig);
            }
        });
    }
}

/// Notify every observer that read `sig` since its last tracked run.
///
/// Each observer's edges are dropped before it is notified; it re-subscribes
/// when it next runs under [`with_observer`].
pub fn signal_changed(sig: SignalId) {
    let pending: Vec<(ObserverId, Rc<dyn Fn()>)> = GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let targets: Vec<ObserverId> = g
            .edges
            .get(&sig)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        targets
            .into_iter()
            .filter_map(|obs| {
                if g.running.contains(&obs) {
                    return None;
                }
                g.remove_all_edges_for(obs);
                g.observers.get(obs).cloned().map(|f| (obs, f))
            })
            .collect()
    });

    for (obs, f) in pending {
        GRAPH.with(|g| g.borrow_mut().running.insert(obs));
        f();
        GRAPH.with(|g| g.borrow_mut().running.remove(&obs));
    }
}

/// Called when a signal is dropped.
pub(crate) fn forget_signal(sig: SignalId) {
    // The graph may already be gone during thread teardown.
    let _ = GRAPH.try_with(|g| {
        if let Ok(mut g) = g.try_borrow_mut() {
            g.forget_signal(sig);
        }
    });
}

pub fn new_observer(f: impl Fn() + 'static) -> ObserverId {
    GRAPH.with(|g| g.borrow_mut().observers.insert(Rc::new(f)))
}

/// Remove an observer and all of its dependency edges.
pub fn remove_observer(id: ObserverId) {
    let _ = GRAPH.try_with(|g| {
        if let Ok(mut g) = g.try_borrow_mut() {
            g.remove_observer(id);
        }
    });
}

pub(crate) fn current_observer() -> Option<ObserverId> {
    CURRENT_OBSERVER.with(|co| co.get())
}

/// Run `f` with `id` as the current observer. Previous edges of `id` are
/// cleared first, so afterwards `id` depends on exactly what `f` read.
pub fn with_observer<R>(id: ObserverId, f: impl FnOnce() -> R) -> R {
    GRAPH.with(|g| g.borrow_mut().remove_all_edges_for(id));
    swap_observer(Some(id), f)
}

fn swap_observer<R>(next: Option<ObserverId>, f: impl FnOnce() -> R) -> R {
    // Restores the previous observer even if `f` unwinds.
    struct Restore(Option<ObserverId>);
    impl Drop for Restore {
        fn drop(&mut self) {
            CURRENT_OBSERVER.with(|co| co.set(self.0));
        }
    }
    let _restore = Restore(CURRENT_OBSERVER.with(|co| co.replace(next)));
    f()
}

/// Number of signals `id` currently depends on.
#[cfg(test)]
pub(crate) fn dependency_count(id: ObserverId) -> usize {
    GRAPH.with(|g| g.borrow().back.get(&id).map_or(0, |s| s.len()))
}
