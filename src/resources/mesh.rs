use glam::{Vec2, Vec3};
use rustc_hash::FxHashMap;

use crate::scene::bone::{BoneBinding, BonePool};
use crate::scene::BoneKey;

/// Maximum number of bones that may influence a single vertex.
///
/// Fixed at four to match the common shader-side `uvec4`/`vec4`
/// attribute pair; a fifth influence competes for a slot (see
/// [`VertexBoneWeights::add_influence`]).
pub const MAX_BONE_INFLUENCES: usize = 4;

/// Per-vertex bone influences: up to four (index, weight) pairs.
///
/// A weight of `0.0` marks a free slot. Weights are stored exactly as
/// supplied — no normalization is performed here; shading stages that
/// expect normalized weights must normalize downstream.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VertexBoneWeights {
    pub indices: [u32; MAX_BONE_INFLUENCES],
    pub weights: [f32; MAX_BONE_INFLUENCES],
}

impl VertexBoneWeights {
    /// Records an influence of `bone_index` on this vertex.
    ///
    /// Free slots are always preferred. Once all four slots are
    /// occupied, the new influence replaces the currently-smallest
    /// stored weight, and only if it is strictly greater — an exact
    /// tie is rejected.
    ///
    /// Returns whether the influence was stored.
    pub fn add_influence(&mut self, bone_index: u32, weight: f32) -> bool {
        if let Some(slot) = self.weights.iter().position(|&w| w == 0.0) {
            self.indices[slot] = bone_index;
            self.weights[slot] = weight;
            return true;
        }

        let min_slot = self
            .weights
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map_or(0, |(slot, _)| slot);

        if weight > self.weights[min_slot] {
            self.indices[min_slot] = bone_index;
            self.weights[min_slot] = weight;
            return true;
        }
        false
    }

    /// Iterates the occupied slots as (bone index, weight) pairs.
    pub fn influences(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.indices
            .iter()
            .zip(self.weights.iter())
            .filter(|&(_, &w)| w != 0.0)
            .map(|(&i, &w)| (i, w))
    }
}

/// A single mesh vertex: position, normal, texture coordinates, and
/// bone influences. `#[repr(C)]` so a renderer can upload vertex
/// slices directly (see [`Mesh::vertex_bytes`]).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub bones: VertexBoneWeights,
}

impl Vertex {
    #[must_use]
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            uv,
            bones: VertexBoneWeights::default(),
        }
    }
}

/// A renderer texture handle paired with the shader sampler it binds.
///
/// The id is opaque to the core; the renderer that produced it at
/// import time is the one that consumes it at draw time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureBinding {
    pub sampler_name: String,
    pub texture_id: u32,
}

impl TextureBinding {
    #[must_use]
    pub fn new(sampler_name: impl Into<String>, texture_id: u32) -> Self {
        Self {
            sampler_name: sampler_name.into(),
            texture_id,
        }
    }
}

/// A triangle mesh with named textures and an optional bone table.
///
/// The bone table is keyed by name and assigns dense local indices
/// (`0..bone_count()`) in first-registration order. The
/// [`BoneBinding`] records themselves live in the scene's bone pool;
/// the mesh holds keys into it, so a binding mutated through any path
/// (an animation task, a rescale) is seen here as well.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    /// Flat triangle list: three indices per face.
    pub indices: Vec<u32>,
    pub textures: Vec<TextureBinding>,

    // === Bone table ===
    bone_keys: Vec<BoneKey>,
    bone_names: FxHashMap<String, usize>,
}

impl Mesh {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        textures: Vec<TextureBinding>,
    ) -> Self {
        Self {
            name: name.into(),
            vertices,
            indices,
            textures,
            bone_keys: Vec::new(),
            bone_names: FxHashMap::default(),
        }
    }

    pub fn add_texture(&mut self, texture: TextureBinding) {
        self.textures.push(texture);
    }

    /// Registers a bone by name, returning its dense local index.
    ///
    /// Idempotent: re-registering an existing name returns the index
    /// it was first assigned. Fresh registrations insert a new
    /// [`BoneBinding`] with an identity offset into `bones`; import
    /// code sets the real offset afterwards.
    pub fn register_bone(&mut self, bones: &mut BonePool, name: &str) -> usize {
        if let Some(&index) = self.bone_names.get(name) {
            return index;
        }
        let index = self.bone_keys.len();
        self.bone_keys.push(bones.insert(BoneBinding::new(name)));
        self.bone_names.insert(name.to_owned(), index);
        index
    }

    /// Local index of a named bone, if registered.
    #[must_use]
    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.bone_names.get(name).copied()
    }

    /// Key of the bone at a local index.
    #[must_use]
    pub fn bone_key(&self, index: usize) -> Option<BoneKey> {
        self.bone_keys.get(index).copied()
    }

    /// Bone keys in local-index order.
    #[inline]
    #[must_use]
    pub fn bone_keys(&self) -> &[BoneKey] {
        &self.bone_keys
    }

    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bone_keys.len()
    }

    /// Whether any bones are registered, i.e. the mesh is skinned.
    #[inline]
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        !self.bone_keys.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Raw vertex data for GPU upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
