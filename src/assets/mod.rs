//! Import boundary.
//!
//! File-format parsing lives outside this crate: a loader implements
//! [`ModelLoader`] and hands back plain [`ImportedModel`] data, which
//! [`instantiate`] turns into scene nodes, meshes, and bone bindings.

pub mod import;

pub use import::{
    ImportedBone, ImportedMesh, ImportedModel, ImportedNode, ImportedTexture, ImportedVertex,
    ModelLoader, instantiate, mat4_from_rows,
};
