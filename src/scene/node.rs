use glam::{Mat4, Vec3};

use crate::scene::{BoneKey, MeshKey, NodeKey};

/// A positioned object in the scene hierarchy.
///
/// # Placement
///
/// A node's local placement is five independent pieces of state:
/// translation, per-axis Euler orientation (radians, applied in a
/// fixed Z then X then Y order), scale, a rotation center, and an
/// immutable base transform baked in at construction (typically the
/// import format's node transform). The derived [`local_matrix`]
/// is recomputed on every mutation as
///
/// ```text
/// translate(translation)
///   * translate(rotation_center * scale)
///   * rotate_z * rotate_x * rotate_y
///   * scale(scale)
///   * translate(-rotation_center)
///   * base_transform
/// ```
///
/// No validation is applied: orientation components are unconstrained
/// radians, and a zero scale degenerates the matrix — that is the
/// caller's responsibility.
///
/// # Hierarchy
///
/// Nodes own their meshes and children by key. `bone_bindings` is the
/// flattened list of every bone reachable through this node's own
/// meshes and its descendants', collected at spawn/attach time in
/// discovery order and never deduplicated across meshes.
///
/// [`local_matrix`]: Self::local_matrix
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    // === Placement ===
    translation: Vec3,
    orientation: Vec3,
    scale: Vec3,
    rotation_center: Vec3,
    base_transform: Mat4,
    local_matrix: Mat4,

    // === Hierarchy ===
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) meshes: Vec<MeshKey>,
    pub(crate) bone_bindings: Vec<BoneKey>,
}

impl Node {
    /// Creates a detached node holding `meshes`, with identity
    /// placement. Detached nodes are fully functional but are not
    /// rendered until reachable from a root.
    #[must_use]
    pub fn new(meshes: Vec<MeshKey>) -> Self {
        Self::with_base_transform(meshes, Mat4::IDENTITY)
    }

    /// Like [`new`](Self::new), with a base transform composed after
    /// all local transform operations.
    #[must_use]
    pub fn with_base_transform(meshes: Vec<MeshKey>, base_transform: Mat4) -> Self {
        let mut node = Self {
            name: String::new(),
            translation: Vec3::ZERO,
            orientation: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation_center: Vec3::ZERO,
            base_transform,
            local_matrix: Mat4::IDENTITY,
            parent: None,
            children: Vec::new(),
            meshes,
            bone_bindings: Vec::new(),
        };
        node.rebuild_local_matrix();
        node
    }

    fn rebuild_local_matrix(&mut self) {
        self.local_matrix = Mat4::from_translation(self.translation)
            * Mat4::from_translation(self.rotation_center * self.scale)
            * Mat4::from_rotation_z(self.orientation.z)
            * Mat4::from_rotation_x(self.orientation.x)
            * Mat4::from_rotation_y(self.orientation.y)
            * Mat4::from_scale(self.scale)
            * Mat4::from_translation(-self.rotation_center)
            * self.base_transform;
    }

    // ========================================================================
    // Placement accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    #[inline]
    #[must_use]
    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    #[inline]
    #[must_use]
    pub fn rotation_center(&self) -> Vec3 {
        self.rotation_center
    }

    #[inline]
    #[must_use]
    pub fn base_transform(&self) -> &Mat4 {
        &self.base_transform
    }

    /// The composed local model matrix, always current with the
    /// placement fields.
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Mat4 {
        &self.local_matrix
    }

    // ========================================================================
    // Placement mutation
    // ========================================================================

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.rebuild_local_matrix();
    }

    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.orientation = orientation;
        self.rebuild_local_matrix();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.rebuild_local_matrix();
    }

    pub fn set_rotation_center(&mut self, rotation_center: Vec3) {
        self.rotation_center = rotation_center;
        self.rebuild_local_matrix();
    }

    /// Adds `offset` to the current translation.
    pub fn translate(&mut self, offset: Vec3) {
        self.translation += offset;
        self.rebuild_local_matrix();
    }

    /// Adds `delta` (radians per axis) to the current orientation.
    pub fn rotate(&mut self, delta: Vec3) {
        self.orientation += delta;
        self.rebuild_local_matrix();
    }

    /// Multiplies the local scale componentwise. Bone offsets are not
    /// touched here; use [`Scene::rescale`](crate::scene::Scene::rescale)
    /// for skinned subtrees.
    pub(crate) fn rescale_local(&mut self, factor: Vec3) {
        self.scale *= factor;
        self.rebuild_local_matrix();
    }

    // ========================================================================
    // Hierarchy accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn meshes(&self) -> &[MeshKey] {
        &self.meshes
    }

    /// Every bone binding reachable from this node: its own meshes'
    /// first (in mesh order), then each attached child's flattened
    /// list, in attachment order. Duplicate names across distinct
    /// meshes are distinct entries.
    #[inline]
    #[must_use]
    pub fn bone_bindings(&self) -> &[BoneKey] {
        &self.bone_bindings
    }
}
