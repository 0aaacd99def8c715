use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::reactive::{self, SignalId};

/// Observable value. Cloning yields another handle to the same cell.
///
/// `get` inside a composition group registers the group as a dependent;
/// `set`/`update` invalidate the dependent groups.
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    id: SignalId,
    value: T,
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        reactive::forget_signal(self.id);
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        f.debug_struct("Signal")
            .field("id", &inner.id)
            .field("value", &inner.value)
            .finish()
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            id: reactive::next_signal_id(),
            value,
        })))
    }

    fn id(&self) -> SignalId {
        self.0.borrow().id
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        reactive::register_signal_read(self.id());
        self.0.borrow().value.clone()
    }

    /// Read without registering a dependency.
    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    fn notify(&self) {
        let id = self.0.borrow().id;
        reactive::signal_changed(id);
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
