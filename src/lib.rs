//! A hierarchical scene graph with skeletal animation.
//!
//! The crate is organized around a [`Scene`] that owns three arenas —
//! nodes, meshes, and bone bindings — addressed by copyable keys.
//! Animation tasks mutate node placement or bone transforms through
//! those keys each frame, and the render traversal walks the node tree
//! composing model matrices and emitting draw commands to a
//! [`RenderSink`].
//!
//! File import and GPU submission are collaborator boundaries, not
//! implementations: loaders produce [`assets::ImportedModel`] data and
//! renderers consume [`RenderSink`] calls.

pub mod animation;
pub mod assets;
pub mod errors;
pub mod render;
pub mod resources;
pub mod scene;

pub use animation::{AnimationKind, AnimationTask, Animator};
pub use errors::{MarrowError, Result};
pub use render::{FrameContext, RecordingSink, RenderSink};
pub use resources::{Mesh, TextureBinding, Vertex, VertexBoneWeights};
pub use scene::{BoneBinding, BoneKey, MeshKey, Node, NodeKey, Scene};
