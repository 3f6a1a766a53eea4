use std::path::Path;

use glam::{Mat4, Vec2, Vec3};

use crate::errors::Result;
use crate::resources::mesh::{Mesh, TextureBinding, Vertex};
use crate::scene::{Node, NodeKey, Scene};

const IDENTITY_ROWS: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// A fully parsed model: a tree of transformed nodes carrying meshes.
#[derive(Debug, Clone)]
pub struct ImportedModel {
    pub root: ImportedNode,
}

/// One node of the imported hierarchy.
#[derive(Debug, Clone)]
pub struct ImportedNode {
    pub name: String,
    /// Row-major 4x4 local transform, as interchange formats store it.
    /// Converted to the runtime's column-major convention during
    /// instantiation — see [`mat4_from_rows`].
    pub transform: [[f32; 4]; 4],
    pub meshes: Vec<ImportedMesh>,
    pub children: Vec<ImportedNode>,
}

impl ImportedNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: IDENTITY_ROWS,
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl Default for ImportedNode {
    fn default() -> Self {
        Self::new("")
    }
}

/// Raw mesh data: vertices, triangle index triples, named textures,
/// and named bone bindings.
#[derive(Debug, Clone, Default)]
pub struct ImportedMesh {
    pub name: String,
    pub vertices: Vec<ImportedVertex>,
    pub faces: Vec<[u32; 3]>,
    pub textures: Vec<ImportedTexture>,
    pub bones: Vec<ImportedBone>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// A named bone with its bind-time offset matrix (row-major) and the
/// vertices it influences as (vertex index, weight) pairs.
#[derive(Debug, Clone)]
pub struct ImportedBone {
    pub name: String,
    pub offset_matrix: [[f32; 4]; 4],
    pub weights: Vec<(u32, f32)>,
}

#[derive(Debug, Clone)]
pub struct ImportedTexture {
    pub sampler_name: String,
    pub texture_id: u32,
}

/// The out-of-scope file-format collaborator. Implementations parse a
/// model file (and resolve its material/texture references) into
/// [`ImportedModel`] data; failures propagate as
/// [`MarrowError`](crate::errors::MarrowError) and abort scene
/// construction.
pub trait ModelLoader {
    fn load_model(&self, path: &Path) -> Result<ImportedModel>;
}

/// Converts a row-major matrix to the runtime's column-major [`Mat4`].
///
/// Coordinate-convention normalization belongs here at the import
/// boundary; nothing inside the core transposes.
#[must_use]
pub fn mat4_from_rows(rows: &[[f32; 4]; 4]) -> Mat4 {
    Mat4::from_cols_array_2d(rows).transpose()
}

/// Builds scene content from an imported model and returns the
/// detached root node, ready for [`Scene::add_root`] or
/// [`Scene::attach`].
///
/// Meshes register their bones (first registration wins the offset;
/// repeated names within one mesh merge into one binding) and assign
/// vertex weights through the four-slot policy. Children are built
/// depth-first and attached only once complete, so every flattened
/// bone list is final when it propagates upward.
pub fn instantiate(scene: &mut Scene, model: &ImportedModel) -> NodeKey {
    let nodes_before = scene.nodes.len();
    let meshes_before = scene.meshes.len();
    let bones_before = scene.bones.len();

    let root = instantiate_node(scene, &model.root);

    log::debug!(
        "instantiated '{}': {} nodes, {} meshes, {} bones",
        model.root.name,
        scene.nodes.len() - nodes_before,
        scene.meshes.len() - meshes_before,
        scene.bones.len() - bones_before,
    );
    root
}

fn instantiate_node(scene: &mut Scene, imported: &ImportedNode) -> NodeKey {
    let mut mesh_keys = Vec::with_capacity(imported.meshes.len());
    for imported_mesh in &imported.meshes {
        let mesh = build_mesh(scene, imported_mesh);
        mesh_keys.push(scene.add_mesh(mesh));
    }

    let mut node = Node::with_base_transform(mesh_keys, mat4_from_rows(&imported.transform));
    node.name.clone_from(&imported.name);
    let key = scene.spawn(node);

    for child in &imported.children {
        let child_key = instantiate_node(scene, child);
        scene.attach(key, child_key);
    }
    key
}

fn build_mesh(scene: &mut Scene, imported: &ImportedMesh) -> Mesh {
    let vertices = imported
        .vertices
        .iter()
        .map(|v| {
            Vertex::new(
                Vec3::from_array(v.position),
                Vec3::from_array(v.normal),
                Vec2::from_array(v.uv),
            )
        })
        .collect();

    let mut indices = Vec::with_capacity(imported.faces.len() * 3);
    for face in &imported.faces {
        indices.extend_from_slice(face);
    }

    let textures = imported
        .textures
        .iter()
        .map(|t| TextureBinding::new(t.sampler_name.clone(), t.texture_id))
        .collect();

    let mut mesh = Mesh::new(imported.name.clone(), vertices, indices, textures);

    for bone in &imported.bones {
        let fresh = mesh.bone_index(&bone.name).is_none();
        let index = mesh.register_bone(&mut scene.bones, &bone.name);
        if fresh {
            if let Some(bone_key) = mesh.bone_key(index) {
                scene.bones[bone_key].set_offset(mat4_from_rows(&bone.offset_matrix));
            }
        }

        for &(vertex_id, weight) in &bone.weights {
            if let Some(vertex) = mesh.vertices.get_mut(vertex_id as usize) {
                vertex.bones.add_influence(index as u32, weight);
            } else {
                log::warn!(
                    "import: bone '{}' references out-of-range vertex {vertex_id}",
                    bone.name
                );
            }
        }
    }
    mesh
}
