//! Scene graph and render traversal tests
//!
//! Tests for:
//! - World matrix composition down the hierarchy
//! - Traversal order (meshes before children, children in attachment order)
//! - Frame-scoped bone-slot allowlisting
//! - Name lookups
//! - Instantiation from imported model data

use glam::{Mat4, Vec3, Vec4};
use marrow::assets::{
    ImportedBone, ImportedMesh, ImportedModel, ImportedNode, ImportedVertex, instantiate,
    mat4_from_rows,
};
use marrow::render::{FrameContext, RecordingSink};
use marrow::scene::{Node, NodeKey, Scene};
use marrow::Mesh;

// ============================================================================
// Helpers
// ============================================================================

const EPSILON: f32 = 1e-5;

fn mat4_approx(a: &Mat4, b: &Mat4) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .all(|(x, y)| (x - y).abs() < EPSILON)
}

fn mesh_node(scene: &mut Scene, mesh_name: &str) -> NodeKey {
    let mesh = Mesh::new(mesh_name, Vec::new(), Vec::new(), Vec::new());
    let key = scene.add_mesh(mesh);
    scene.spawn(Node::new(vec![key]))
}

fn skinned_mesh_node(scene: &mut Scene, mesh_name: &str, bones: &[&str]) -> NodeKey {
    let mut mesh = Mesh::new(mesh_name, Vec::new(), Vec::new(), Vec::new());
    for name in bones {
        mesh.register_bone(&mut scene.bones, name);
    }
    let key = scene.add_mesh(mesh);
    scene.spawn(Node::new(vec![key]))
}

fn render_all(scene: &Scene, frame: &mut FrameContext) -> RecordingSink {
    let mut sink = RecordingSink::new();
    scene.render(&mut sink, frame);
    sink
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn world_matrices_compose_down_the_tree() {
    let mut scene = Scene::new();
    let root = mesh_node(&mut scene, "boat");
    let child = mesh_node(&mut scene, "tiger");

    scene
        .get_node_mut(root)
        .unwrap()
        .set_translation(Vec3::new(1.0, 0.0, 0.0));
    scene
        .get_node_mut(child)
        .unwrap()
        .set_translation(Vec3::new(0.0, 1.0, 0.0));

    scene.attach(root, child);
    scene.add_root(root);

    let mut frame = FrameContext::default();
    let sink = render_all(&scene, &mut frame);

    assert_eq!(sink.draws.len(), 2);
    assert!(mat4_approx(
        &sink.draws[0].model_matrix,
        &Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0))
    ));
    assert!(mat4_approx(
        &sink.draws[1].model_matrix,
        &Mat4::from_translation(Vec3::new(1.0, 1.0, 0.0))
    ));
}

#[test]
fn meshes_draw_before_children_in_attachment_order() {
    let mut scene = Scene::new();
    let root = mesh_node(&mut scene, "root");
    let first = mesh_node(&mut scene, "first");
    let second = mesh_node(&mut scene, "second");

    scene.attach(root, first);
    scene.attach(root, second);
    scene.add_root(root);

    let mut frame = FrameContext::default();
    let sink = render_all(&scene, &mut frame);

    let order: Vec<&str> = sink.draws.iter().map(|d| d.mesh_name.as_str()).collect();
    assert_eq!(order, vec!["root", "first", "second"]);
}

#[test]
fn detached_nodes_are_not_rendered() {
    let mut scene = Scene::new();
    let root = mesh_node(&mut scene, "root");
    let _orphan = mesh_node(&mut scene, "orphan");
    scene.add_root(root);

    let mut frame = FrameContext::default();
    let sink = render_all(&scene, &mut frame);
    assert_eq!(sink.draws.len(), 1);
}

#[test]
fn render_does_not_mutate_the_tree() {
    let mut scene = Scene::new();
    let root = mesh_node(&mut scene, "root");
    scene
        .get_node_mut(root)
        .unwrap()
        .set_orientation(Vec3::new(0.1, 0.2, 0.3));
    scene.add_root(root);

    let before = *scene.get_node(root).unwrap().local_matrix();
    let mut frame = FrameContext::default();
    render_all(&scene, &mut frame);
    render_all(&scene, &mut frame);

    assert!(mat4_approx(scene.get_node(root).unwrap().local_matrix(), &before));
}

#[test]
fn attach_rejects_cycles() {
    let mut scene = Scene::new();
    let a = mesh_node(&mut scene, "a");
    let b = mesh_node(&mut scene, "b");

    scene.attach(a, b);
    scene.attach(b, a);

    // The cycle-closing link was refused.
    assert!(scene.get_node(a).unwrap().parent().is_none());
    assert_eq!(scene.get_node(b).unwrap().children().len(), 0);
}

// ============================================================================
// Frame-scoped bone slots
// ============================================================================

#[test]
fn allowlisted_bones_get_dense_slots_in_traversal_order() {
    let mut scene = Scene::new();
    let root = skinned_mesh_node(&mut scene, "jeep", &["chassis", "wheel_fl", "wheel_fr"]);
    scene.add_root(root);

    let mut frame =
        FrameContext::new(["wheel_fl".to_owned(), "wheel_fr".to_owned()]);
    frame.begin_frame();
    let sink = render_all(&scene, &mut frame);

    // chassis is not render-relevant; the two wheels take slots 0 and
    // 1 in the order the mesh references them.
    assert_eq!(frame.slot_count(), 2);
    assert_eq!(frame.slot_names(), ["wheel_fl", "wheel_fr"]);
    let slots: Vec<usize> = sink.draws[0].bone_matrices.iter().map(|(s, _)| *s).collect();
    assert_eq!(slots, vec![0, 1]);
}

#[test]
fn same_bone_name_shares_a_slot_within_a_frame() {
    let mut scene = Scene::new();
    let root = skinned_mesh_node(&mut scene, "a", &["wheel"]);
    let child = skinned_mesh_node(&mut scene, "b", &["wheel"]);
    scene.attach(root, child);
    scene.add_root(root);

    let mut frame = FrameContext::new(["wheel".to_owned()]);
    frame.begin_frame();
    let sink = render_all(&scene, &mut frame);

    assert_eq!(frame.slot_count(), 1);
    assert_eq!(sink.draws[0].bone_matrices[0].0, 0);
    assert_eq!(sink.draws[1].bone_matrices[0].0, 0);
}

#[test]
fn begin_frame_resets_the_slot_index() {
    let mut scene = Scene::new();
    let root = skinned_mesh_node(&mut scene, "a", &["wheel"]);
    scene.add_root(root);

    let mut frame = FrameContext::new(["wheel".to_owned()]);
    frame.begin_frame();
    render_all(&scene, &mut frame);
    assert_eq!(frame.slot_count(), 1);

    frame.begin_frame();
    assert_eq!(frame.slot_count(), 0);
    render_all(&scene, &mut frame);
    assert_eq!(frame.slot_count(), 1);
}

#[test]
fn empty_allowlist_uploads_no_bones() {
    let mut scene = Scene::new();
    let root = skinned_mesh_node(&mut scene, "a", &["wheel"]);
    scene.add_root(root);

    let mut frame = FrameContext::default();
    frame.begin_frame();
    let sink = render_all(&scene, &mut frame);
    assert!(sink.draws[0].bone_matrices.is_empty());
}

// ============================================================================
// Name lookups
// ============================================================================

#[test]
fn find_node_searches_depth_first() {
    let mut scene = Scene::new();
    let root = scene.spawn(Node::new(Vec::new()));
    let child = scene.spawn(Node::new(Vec::new()));
    let grandchild = scene.spawn(Node::new(Vec::new()));

    scene.get_node_mut(root).unwrap().name = "root".to_owned();
    scene.get_node_mut(child).unwrap().name = "body".to_owned();
    scene.get_node_mut(grandchild).unwrap().name = "turret".to_owned();

    scene.attach(child, grandchild);
    scene.attach(root, child);

    assert_eq!(scene.find_node(root, "turret"), Some(grandchild));
    assert_eq!(scene.find_node(root, "body"), Some(child));
    assert_eq!(scene.find_node(root, "missing"), None);
    assert_eq!(scene.find_node(child, "root"), None);
}

#[test]
fn find_bone_searches_the_flattened_list() {
    let mut scene = Scene::new();
    let root = scene.spawn(Node::new(Vec::new()));
    let child = skinned_mesh_node(&mut scene, "m", &["hip", "knee"]);
    scene.attach(root, child);

    assert!(scene.find_bone(root, "knee").is_some());
    assert_eq!(scene.find_bone(root, "knee"), scene.find_bone(child, "knee"));
    assert!(scene.find_bone(root, "tail").is_none());
}

// ============================================================================
// Import instantiation
// ============================================================================

#[test]
fn mat4_from_rows_transposes() {
    let rows = [
        [1.0, 0.0, 0.0, 5.0],
        [0.0, 1.0, 0.0, -1.0],
        [0.0, 0.0, 1.0, 2.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    let m = mat4_from_rows(&rows);
    assert_eq!(m.w_axis, Vec4::new(5.0, -1.0, 2.0, 1.0));
    assert!(mat4_approx(&m, &Mat4::from_translation(Vec3::new(5.0, -1.0, 2.0))));
}

fn sample_model() -> ImportedModel {
    let mut root = ImportedNode::new("rig");
    root.transform = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 3.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];

    let mut body = ImportedMesh {
        name: "body".to_owned(),
        ..ImportedMesh::default()
    };
    body.vertices = vec![
        ImportedVertex {
            position: [0.0, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 0.0],
        },
        ImportedVertex {
            position: [1.0, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [1.0, 0.0],
        },
        ImportedVertex {
            position: [0.0, 1.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 1.0],
        },
    ];
    body.faces = vec![[0, 1, 2]];
    body.bones = vec![
        ImportedBone {
            name: "spine".to_owned(),
            offset_matrix: [
                [1.0, 0.0, 0.0, 7.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            weights: vec![(0, 0.6), (1, 0.4)],
        },
        // Same joint split across the import: merges into one binding,
        // keeping the first offset.
        ImportedBone {
            name: "spine".to_owned(),
            offset_matrix: IDENTITY_ROWS,
            weights: vec![(2, 1.0)],
        },
    ];
    root.meshes.push(body);

    let mut child = ImportedNode::new("tail");
    child.meshes.push(ImportedMesh {
        name: "tail".to_owned(),
        bones: vec![ImportedBone {
            name: "tail_1".to_owned(),
            offset_matrix: IDENTITY_ROWS,
            weights: Vec::new(),
        }],
        ..ImportedMesh::default()
    });
    root.children.push(child);

    ImportedModel { root }
}

const IDENTITY_ROWS: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

#[test]
fn instantiate_builds_the_tree() {
    let mut scene = Scene::new();
    let root = instantiate(&mut scene, &sample_model());

    assert_eq!(scene.nodes.len(), 2);
    assert_eq!(scene.meshes.len(), 2);
    let root_node = scene.get_node(root).unwrap();
    assert_eq!(root_node.name, "rig");
    assert_eq!(root_node.children().len(), 1);
    // Detached until the caller roots it.
    assert!(root_node.parent().is_none());

    // Row-major input: the translation sat in the fourth column.
    assert!(mat4_approx(
        root_node.base_transform(),
        &Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0))
    ));
}

#[test]
fn instantiate_merges_same_name_bones_within_a_mesh() {
    let mut scene = Scene::new();
    let root = instantiate(&mut scene, &sample_model());

    // One "spine" binding (merged) plus the child's "tail_1".
    assert_eq!(scene.bones.len(), 2);
    assert_eq!(scene.get_node(root).unwrap().bone_bindings().len(), 2);

    let spine = scene.find_bone(root, "spine").unwrap();
    // First registration won the offset; the identity duplicate did
    // not overwrite it.
    assert!(mat4_approx(
        &scene.bones[spine].offset_matrix,
        &Mat4::from_translation(Vec3::new(7.0, 0.0, 0.0))
    ));
}

#[test]
fn instantiate_assigns_vertex_weights() {
    let mut scene = Scene::new();
    let root = instantiate(&mut scene, &sample_model());
    let root_node = scene.get_node(root).unwrap();
    let mesh = scene.get_mesh(root_node.meshes()[0]).unwrap();

    assert_eq!(mesh.vertices[0].bones.weights[0], 0.6);
    assert_eq!(mesh.vertices[1].bones.weights[0], 0.4);
    // The merged duplicate's weight targets the same local index 0.
    assert_eq!(mesh.vertices[2].bones.weights[0], 1.0);
    assert_eq!(mesh.vertices[2].bones.indices[0], 0);
}
