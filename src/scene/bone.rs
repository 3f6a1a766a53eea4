use glam::Mat4;
use slotmap::SlotMap;

use crate::scene::BoneKey;

/// Pool of bone bindings, owned by the scene.
///
/// Every mesh bone table, node flattened-bone list, and bone-targeted
/// animation task holds [`BoneKey`]s into this pool, so a write
/// through one path is visible through all of them. A key whose
/// binding has been removed simply misses the pool; consumers treat
/// that as a no-op.
pub type BonePool = SlotMap<BoneKey, BoneBinding>;

/// One skeletal joint within one mesh.
///
/// `offset_matrix` maps mesh-local space into bone space as captured
/// at bind time; after import it changes only under a deliberate
/// rescale (see [`Scene::rescale`](crate::scene::Scene::rescale)).
///
/// `final_transformation` is what the renderer uploads. It starts
/// equal to the offset and is thereafter composed in place by
/// animation tasks — each tick left-multiplies an incremental
/// rotation, so the transform accumulates across the object's
/// lifetime rather than being re-derived from the bind pose each
/// frame. [`reset_to_bind_pose`](Self::reset_to_bind_pose) is the
/// explicit way back to a clean baseline.
#[derive(Debug, Clone)]
pub struct BoneBinding {
    pub name: String,
    pub offset_matrix: Mat4,
    pub final_transformation: Mat4,
}

impl BoneBinding {
    /// A binding with an identity offset; import code overwrites the
    /// offset once the real bind matrix is known.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offset_matrix: Mat4::IDENTITY,
            final_transformation: Mat4::IDENTITY,
        }
    }

    #[must_use]
    pub fn with_offset(name: impl Into<String>, offset_matrix: Mat4) -> Self {
        Self {
            name: name.into(),
            offset_matrix,
            final_transformation: offset_matrix,
        }
    }

    /// Sets the bind-time offset and resets the runtime transform to
    /// match, as both start from the same matrix at import.
    pub fn set_offset(&mut self, offset_matrix: Mat4) {
        self.offset_matrix = offset_matrix;
        self.final_transformation = offset_matrix;
    }

    /// Discards accumulated animation, restoring
    /// `final_transformation` to the bind-time offset.
    pub fn reset_to_bind_pose(&mut self) {
        self.final_transformation = self.offset_matrix;
    }
}
