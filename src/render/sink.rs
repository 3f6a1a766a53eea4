use glam::Mat4;

use crate::resources::mesh::Mesh;
use crate::scene::MeshKey;

/// Where the render traversal sends its output.
///
/// Calls arrive in a stateful stream per draw: the model matrix, then
/// any bone matrices (slot, transform), then the draw itself. Mesh
/// vertex/index/texture data is reachable through the `&Mesh`
/// argument; uploading and caching it is the implementer's business.
pub trait RenderSink {
    /// Sets the model ("world") matrix for subsequent draws.
    fn set_model_matrix(&mut self, matrix: Mat4);

    /// Sets one entry of the shader's bone matrix array.
    fn set_bone_matrix(&mut self, slot: usize, matrix: Mat4);

    /// Draws a mesh with the most recently set uniforms.
    fn draw_mesh(&mut self, key: MeshKey, mesh: &Mesh);
}

/// One recorded draw call.
#[derive(Debug, Clone)]
pub struct RecordedDraw {
    pub mesh: MeshKey,
    pub mesh_name: String,
    pub model_matrix: Mat4,
    /// (slot, transform) pairs set since the previous draw.
    pub bone_matrices: Vec<(usize, Mat4)>,
}

/// A [`RenderSink`] that records the command stream instead of
/// drawing. Useful headless and in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pending_model: Mat4,
    pending_bones: Vec<(usize, Mat4)>,
    pub draws: Vec<RecordedDraw>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.pending_bones.clear();
        self.draws.clear();
    }
}

impl RenderSink for RecordingSink {
    fn set_model_matrix(&mut self, matrix: Mat4) {
        self.pending_model = matrix;
    }

    fn set_bone_matrix(&mut self, slot: usize, matrix: Mat4) {
        self.pending_bones.push((slot, matrix));
    }

    fn draw_mesh(&mut self, key: MeshKey, mesh: &Mesh) {
        self.draws.push(RecordedDraw {
            mesh: key,
            mesh_name: mesh.name.clone(),
            model_matrix: self.pending_model,
            bone_matrices: std::mem::take(&mut self.pending_bones),
        });
    }
}
