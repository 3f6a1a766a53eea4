//! Hand-built meshes for scenes that don't go through a model loader.

use glam::{Vec2, Vec3};

use crate::resources::mesh::{Mesh, TextureBinding, Vertex};

/// A 1x1 square centered at the origin, facing -Z.
#[must_use]
pub fn square(textures: Vec<TextureBinding>) -> Mesh {
    let normal = Vec3::new(0.0, 0.0, -1.0);
    let vertices = vec![
        Vertex::new(Vec3::new(0.5, 0.5, 0.0), normal, Vec2::new(1.0, 0.0)),
        Vertex::new(Vec3::new(0.5, -0.5, 0.0), normal, Vec2::new(1.0, 1.0)),
        Vertex::new(Vec3::new(-0.5, -0.5, 0.0), normal, Vec2::new(0.0, 1.0)),
        Vertex::new(Vec3::new(-0.5, 0.5, 0.0), normal, Vec2::new(0.0, 0.0)),
    ];
    let indices = vec![3, 1, 2, 0, 1, 3];
    Mesh::new("square", vertices, indices, textures)
}

/// The upper-left half of the unit square.
#[must_use]
pub fn triangle(texture: TextureBinding) -> Mesh {
    let normal = Vec3::new(0.0, 0.0, 1.0);
    let vertices = vec![
        Vertex::new(Vec3::new(-0.5, -0.5, 0.0), normal, Vec2::new(0.0, 1.0)),
        Vertex::new(Vec3::new(-0.5, 0.5, 0.0), normal, Vec2::new(0.0, 0.0)),
        Vertex::new(Vec3::new(0.5, 0.5, 0.0), normal, Vec2::new(1.0, 0.0)),
    ];
    let indices = vec![2, 1, 0];
    Mesh::new("triangle", vertices, indices, vec![texture])
}

/// A 1x1x1 cube centered at the origin, one quad per face so normals
/// stay flat.
#[must_use]
pub fn cube(texture: TextureBinding) -> Mesh {
    // (face normal, four corners counter-clockwise seen from outside)
    const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [
                [-0.5, -0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, 0.5, 0.5],
                [-0.5, 0.5, 0.5],
            ],
        ),
        (
            [0.0, 0.0, -1.0],
            [
                [0.5, -0.5, -0.5],
                [-0.5, -0.5, -0.5],
                [-0.5, 0.5, -0.5],
                [0.5, 0.5, -0.5],
            ],
        ),
        (
            [1.0, 0.0, 0.0],
            [
                [0.5, -0.5, 0.5],
                [0.5, -0.5, -0.5],
                [0.5, 0.5, -0.5],
                [0.5, 0.5, 0.5],
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [-0.5, -0.5, 0.5],
                [-0.5, 0.5, 0.5],
                [-0.5, 0.5, -0.5],
            ],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                [-0.5, 0.5, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.5, -0.5],
                [-0.5, 0.5, -0.5],
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [0.5, -0.5, -0.5],
                [0.5, -0.5, 0.5],
                [-0.5, -0.5, 0.5],
            ],
        ),
    ];
    const UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in FACES {
        let base = vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(UVS) {
            vertices.push(Vertex::new(
                Vec3::from_array(*corner),
                Vec3::from_array(normal),
                Vec2::from_array(uv),
            ));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    Mesh::new("cube", vertices, indices, vec![texture])
}
