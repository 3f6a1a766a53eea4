//! Render boundary.
//!
//! The core never talks to a GPU. It emits model matrices, bone
//! matrices, and draw requests through the [`RenderSink`] trait, and
//! resolves which bones deserve uniform slots through a per-frame
//! [`FrameContext`]. A real renderer implements `RenderSink` over its
//! command encoder; [`RecordingSink`] is a ready-made implementation
//! that just records the stream.

pub mod context;
pub mod sink;

pub use context::FrameContext;
pub use sink::{RecordedDraw, RecordingSink, RenderSink};
