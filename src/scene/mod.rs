//! Scene graph: node hierarchy, bone bindings, and the owning
//! [`Scene`] container.
//!
//! - [`Node`]: positioned object with placement state and cached local matrix
//! - [`BoneBinding`]: named skeletal joint record (bind offset + runtime transform)
//! - [`Scene`]: arena owner, hierarchy operations, render traversal

pub mod bone;
pub mod node;
pub mod scene;

pub use bone::{BoneBinding, BonePool};
pub use node::Node;
pub use scene::Scene;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
    pub struct MeshKey;
    pub struct BoneKey;
}
