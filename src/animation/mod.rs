//! Time-driven animation.
//!
//! An [`AnimationTask`] is one duration-bounded mutation applied to a
//! scene node or a bone every tick; an [`Animator`] owns a list of
//! tasks and advances them uniformly once per frame.

pub mod scheduler;
pub mod task;

pub use scheduler::Animator;
pub use task::{AnimationKind, AnimationTask};
