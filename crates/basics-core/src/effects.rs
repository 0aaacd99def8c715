use std::cell::RefCell;
use std::rc::Rc;

use crate::remember;

#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }
}

/// Cleanup for [`disposable_effect`].
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}

struct EffectSlot<K> {
    key: Option<K>,
    cleanup: Option<Dispose>,
}

impl<K> Drop for EffectSlot<K> {
    // The composer drops the slot when its call site leaves the tree.
    fn drop(&mut self) {
        if let Some(d) = self.cleanup.take() {
            d.run();
        }
    }
}

/// Runs `effect` on first composition and again whenever `key` changes;
/// the previous cleanup runs before each re-run and once more on unmount.
#[track_caller]
pub fn disposable_effect<K: PartialEq + Clone + 'static>(
    key: K,
    effect: impl FnOnce() -> Dispose,
) {
    let slot = remember(|| {
        RefCell::new(EffectSlot::<K> {
            key: None,
            cleanup: None,
        })
    });

    let changed = slot.borrow().key.as_ref() != Some(&key);
    if changed {
        let previous = {
            let mut s = slot.borrow_mut();
            s.key = Some(key);
            s.cleanup.take()
        };
        if let Some(d) = previous {
            d.run();
        }
        let d = effect();
        slot.borrow_mut().cleanup = Some(d);
    }
}
