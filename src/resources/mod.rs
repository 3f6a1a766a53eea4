//! CPU-side renderable resources.
//!
//! - [`Mesh`]: vertex/index/texture data plus the per-mesh bone table
//! - [`Vertex`] / [`VertexBoneWeights`]: POD vertex layout for GPU upload
//! - [`primitives`]: hand-built meshes for loader-free scenes

pub mod mesh;
pub mod primitives;

pub use mesh::{MAX_BONE_INFLUENCES, Mesh, TextureBinding, Vertex, VertexBoneWeights};
