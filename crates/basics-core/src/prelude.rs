pub use crate::animation::{
    AnimatedValue, AnimationSpec, Clock, Easing, Interpolate, SystemClock, TestClock, set_clock,
};
pub use crate::color::Color;
pub use crate::effects::{Dispose, disposable_effect, on_unmount};
pub use crate::geometry::{Size, Vec2};
pub use crate::modifier::Modifier;
pub use crate::runtime::{
    Frame, HitRegion, PassStats, Scheduler, SemNode, invalidate_current, key, remember,
    remember_state_with_key, remember_with_key, restartable,
};
pub use crate::semantics::{Role, Semantics};
pub use crate::signal::{Signal, signal};
pub use crate::view::{View, ViewId, ViewKind};
