//! # State, groups and frames
//!
//! The runtime behind the compose-basics sample. Three pieces:
//!
//! - `Signal<T>`: an observable cell. Reads inside a composition group make
//!   the group a dependent; writes invalidate it.
//! - `remember*`: retained state keyed by call site (or explicit key) under
//!   the enclosing group. It lives exactly as long as its call site keeps
//!   being composed.
//! - `Scheduler`: owns one composition's retained state, runs a pass, sweeps
//!   what was not visited, and hands the host an id-stamped [`Frame`].
//!   Schedulers on the same thread are fully isolated.
//!
//! ## Signals
//!
//! ```rust
//! use basics_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Remembered state
//!
//! ```rust
//! use basics_core::*;
//!
//! fn counter_label() -> View {
//!     let count = remember(|| signal(0));
//!     View::new(0, ViewKind::Text {
//!         text: format!("{} clicks", count.get()),
//!         color: Color::BLACK,
//!         font_size: 16.0,
//!     })
//! }
//!
//! let mut sched = Scheduler::new();
//! let frame = sched.repose(|_| counter_label());
//! assert_eq!(frame.root.text(), Some("0 clicks"));
//! ```
//!
//! - `remember` is call-site based: the Nth call from one source location in
//!   a group always maps to the Nth value.
//! - `remember_with_key` and [`key`] are key based and survive conditional
//!   branches and reordering.
//!
//! ## Skippable groups
//!
//! `restartable(inputs, content)` caches its subtree. On the next pass it is
//! reused untouched unless a signal it read was written or `inputs` changed.
//!
//! ## Effects and cleanup
//!
//! `disposable_effect` runs once per key and cleans up when its call site
//! leaves the tree, or when its scheduler is dropped.

pub mod animation;
pub mod color;
pub mod effects;
pub mod geometry;
pub mod modifier;
pub mod prelude;
pub mod reactive;
pub mod runtime;
pub mod semantics;
pub mod signal;
pub mod tests;
pub mod view;

pub use color::*;
pub use effects::*;
pub use geometry::*;
pub use modifier::*;
pub use prelude::*;
pub use runtime::*;
pub use semantics::*;
pub use signal::*;
pub use view::*;
