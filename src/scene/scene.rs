use glam::{Mat4, Vec3};
use slotmap::SlotMap;

use crate::render::{FrameContext, RenderSink};
use crate::resources::mesh::Mesh;
use crate::scene::bone::BonePool;
use crate::scene::node::Node;
use crate::scene::{BoneKey, MeshKey, NodeKey};

/// The scene: pure data layer owning every node, mesh, and bone
/// binding, plus the list of root nodes the render traversal starts
/// from.
///
/// All storage is arena-based. Nodes reference meshes and bone
/// bindings by key, so a single binding mutated by an animation task
/// is immediately visible to every mesh and node that references it —
/// intentional aliasing with no concurrent writers (the whole frame
/// loop is single-threaded).
///
/// # Building hierarchies
///
/// A node's flattened bone list is collected from its own meshes at
/// [`spawn`](Self::spawn) time and grows by one child's worth on each
/// [`attach`](Self::attach). Attachment does **not** re-flatten
/// later: bones a descendant gains after it was attached are not
/// propagated upward. Build subtrees fully, then attach them
/// bottom-up — [`crate::assets::instantiate`] does exactly that.
pub struct Scene {
    pub nodes: SlotMap<NodeKey, Node>,
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub bones: BonePool,
    pub roots: Vec<NodeKey>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            meshes: SlotMap::with_key(),
            bones: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }

    // ========================================================================
    // Pool access
    // ========================================================================

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshKey {
        self.meshes.insert(mesh)
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    #[inline]
    #[must_use]
    pub fn get_mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    #[inline]
    pub fn get_mesh_mut(&mut self, key: MeshKey) -> Option<&mut Mesh> {
        self.meshes.get_mut(key)
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Inserts a detached node, collecting its flattened bone list
    /// from its meshes (mesh order, duplicates kept).
    pub fn spawn(&mut self, mut node: Node) -> NodeKey {
        let mut bindings = Vec::new();
        for &mesh_key in &node.meshes {
            if let Some(mesh) = self.meshes.get(mesh_key) {
                bindings.extend_from_slice(mesh.bone_keys());
            }
        }
        node.bone_bindings = bindings;
        self.nodes.insert(node)
    }

    /// Marks a node as a scene root, making it (and its subtree)
    /// reachable by the render traversal.
    pub fn add_root(&mut self, node: NodeKey) {
        self.roots.push(node);
    }

    /// Attaches `child` under `parent` and appends the child's
    /// flattened bone list to the parent's.
    ///
    /// Invalid pairs (missing keys, self-attachment, a link that
    /// would close a cycle) are rejected with a warning.
    pub fn attach(&mut self, parent: NodeKey, child: NodeKey) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            log::warn!("attach: parent or child no longer exists");
            return;
        }
        // Walk up from the parent; finding the child there means the
        // link would close a cycle.
        let mut cursor = Some(parent);
        while let Some(key) = cursor {
            if key == child {
                log::warn!("attach: link would create a cycle");
                return;
            }
            cursor = self.nodes[key].parent;
        }

        let child_node = &mut self.nodes[child];
        if child_node.parent.is_some() {
            log::warn!("attach: child already has a parent");
            return;
        }
        child_node.parent = Some(parent);
        let child_bindings = child_node.bone_bindings.clone();

        let parent_node = &mut self.nodes[parent];
        parent_node.children.push(child);
        parent_node.bone_bindings.extend(child_bindings);
    }

    /// Depth-first search for a node by name under `root` (inclusive),
    /// first match wins.
    #[must_use]
    pub fn find_node(&self, root: NodeKey, name: &str) -> Option<NodeKey> {
        let node = self.nodes.get(root)?;
        if node.name == name {
            return Some(root);
        }
        node.children
            .iter()
            .find_map(|&child| self.find_node(child, name))
    }

    /// First bone with the given name reachable from `node`.
    #[must_use]
    pub fn find_bone(&self, node: NodeKey, name: &str) -> Option<BoneKey> {
        self.nodes
            .get(node)?
            .bone_bindings
            .iter()
            .find(|&&key| self.bones.get(key).is_some_and(|b| b.name == name))
            .copied()
    }

    // ========================================================================
    // Skinned-subtree operations
    // ========================================================================

    /// Multiplies the node's local scale by `factor` componentwise and
    /// rescales every reachable bone binding to match.
    ///
    /// Imported rigs are defined in the mesh's native units; when the
    /// visual mesh is rescaled, bone-space offsets must be rescaled
    /// identically or skinning misaligns vertices relative to bones.
    /// Both the offset and the runtime transform are left-multiplied
    /// by the pure-scale matrix, exactly once per call.
    pub fn rescale(&mut self, node: NodeKey, factor: Vec3) {
        let Some(target) = self.nodes.get_mut(node) else {
            log::warn!("rescale: node no longer exists");
            return;
        };
        target.rescale_local(factor);
        let bindings = target.bone_bindings.clone();

        let scale = Mat4::from_scale(factor);
        for key in bindings {
            if let Some(bone) = self.bones.get_mut(key) {
                bone.offset_matrix = scale * bone.offset_matrix;
                bone.final_transformation = scale * bone.final_transformation;
            }
        }
    }

    /// Restores every bone binding reachable from `node` to its
    /// bind-time offset, discarding accumulated animation.
    pub fn reset_to_bind_pose(&mut self, node: NodeKey) {
        let Some(target) = self.nodes.get(node) else {
            log::warn!("reset_to_bind_pose: node no longer exists");
            return;
        };
        let bindings = target.bone_bindings.clone();
        for key in bindings {
            if let Some(bone) = self.bones.get_mut(key) {
                bone.reset_to_bind_pose();
            }
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Traverses every root, composing world matrices and emitting
    /// draw commands to `sink`.
    ///
    /// Per node: `world = parent_world * local_matrix`; each owned
    /// mesh is drawn before any child is visited, and children are
    /// visited in attachment order. For skinned meshes, the
    /// final transformation of every render-relevant bone (as decided
    /// by the frame context's allowlist) is emitted under its
    /// frame-scoped slot. The tree itself is never mutated here.
    ///
    /// Callers reset `frame` once at the start of each frame with
    /// [`FrameContext::begin_frame`]; slots are then assigned in
    /// traversal order as meshes are visited.
    pub fn render(&self, sink: &mut dyn RenderSink, frame: &mut FrameContext) {
        for &root in &self.roots {
            self.render_node(root, Mat4::IDENTITY, sink, frame);
        }
    }

    /// Renders one subtree under an explicit parent world matrix.
    pub fn render_subtree(
        &self,
        node: NodeKey,
        parent_world: Mat4,
        sink: &mut dyn RenderSink,
        frame: &mut FrameContext,
    ) {
        self.render_node(node, parent_world, sink, frame);
    }

    fn render_node(
        &self,
        key: NodeKey,
        parent_world: Mat4,
        sink: &mut dyn RenderSink,
        frame: &mut FrameContext,
    ) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        let world = parent_world * *node.local_matrix();

        for &mesh_key in &node.meshes {
            let Some(mesh) = self.meshes.get(mesh_key) else {
                continue;
            };
            sink.set_model_matrix(world);
            for &bone_key in mesh.bone_keys() {
                let Some(bone) = self.bones.get(bone_key) else {
                    continue;
                };
                if let Some(slot) = frame.slot_for(&bone.name) {
                    sink.set_bone_matrix(slot, bone.final_transformation);
                }
            }
            sink.draw_mesh(mesh_key, mesh);
        }

        for &child in &node.children {
            self.render_node(child, world, sink, frame);
        }
    }
}
