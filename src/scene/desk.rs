//! The compiled-in desk scene: one vertex table, one index buffer.

use crate::core::geometry::Vertex;
use crate::scene::material::MaterialKind::{self, Desk, Keyboard, Monitor, Mouse, Stand};
use crate::scene::mesh::Mesh;
use nalgebra::{Point3, Vector2, Vector3};
use std::ops::Range;

/// Logical parts of the scene, in index-buffer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubObject {
    MouseBody,
    ScrollWheel,
    LeftButton,
    RightButton,
    Plane,
    Monitor,
    Stand,
    Keyboard,
    LightBar,
}

impl SubObject {
    pub const ALL: [SubObject; 9] = [
        SubObject::MouseBody,
        SubObject::ScrollWheel,
        SubObject::LeftButton,
        SubObject::RightButton,
        SubObject::Plane,
        SubObject::Monitor,
        SubObject::Stand,
        SubObject::Keyboard,
        SubObject::LightBar,
    ];

    /// First vertex of this part and the triangle pattern, relative to it.
    fn layout(self) -> (u32, &'static [[u32; 3]]) {
        match self {
            SubObject::MouseBody => (0, &BOX),
            SubObject::ScrollWheel => (8, &TRIANGLE),
            SubObject::LeftButton => (11, &QUAD),
            SubObject::RightButton => (15, &QUAD),
            SubObject::Plane => (19, &PLANE),
            SubObject::Monitor => (23, &BOX),
            SubObject::Stand => (31, &BOX),
            SubObject::Keyboard => (39, &BOX),
            SubObject::LightBar => (47, &BOX),
        }
    }

    /// Slice of the scene index buffer that draws this part.
    pub fn index_range(self) -> Range<usize> {
        let start: usize = SubObject::ALL
            .iter()
            .take_while(|&&part| part != self)
            .map(|part| part.layout().1.len() * 3)
            .sum();
        start..start + self.layout().1.len() * 3
    }
}

/// Two triangles per face, six faces, over corners 0..4 (near quad) and 4..8 (far quad).
const BOX: [[u32; 3]; 12] = [
    [0, 1, 2], [0, 2, 3], // front
    [4, 5, 6], [4, 6, 7], // back
    [0, 4, 5], [0, 5, 1], // left
    [3, 7, 6], [3, 6, 2], // right
    [0, 3, 7], [0, 7, 4], // top
    [1, 2, 6], [1, 6, 5], // bottom
];
const QUAD: [[u32; 3]; 2] = [[0, 1, 2], [0, 2, 3]];
const PLANE: [[u32; 3]; 2] = [[0, 1, 2], [1, 2, 3]];
const TRIANGLE: [[u32; 3]; 1] = [[0, 1, 2]];

/// Position, UV and material of every vertex; normals are filled in by [`build_scene`].
#[rustfmt::skip]
const VERTICES: [([f32; 3], [f32; 2], MaterialKind); 55] = [
    // Mouse body
    ([-0.5, -0.2, -0.3], [1.0, 0.0], Mouse),
    ([ 0.5, -0.2, -0.3], [0.0, 0.0], Mouse),
    ([ 0.5,  0.2, -0.3], [0.0, 1.0], Mouse),
    ([-0.5,  0.2, -0.3], [1.0, 1.0], Mouse),
    ([-0.5, -0.2,  0.3], [0.0, 0.0], Mouse),
    ([ 0.5, -0.2,  0.3], [1.0, 0.0], Mouse),
    ([ 0.5,  0.2,  0.3], [1.0, 1.0], Mouse),
    ([-0.5,  0.2,  0.3], [0.0, 1.0], Mouse),
    // Scroll wheel
    ([ 0.3,  0.25, 0.0], [0.5, 1.0], Mouse),
    ([ 0.1,  0.15, 0.1], [0.0, 0.0], Mouse),
    ([ 0.5,  0.15, 0.1], [1.0, 0.0], Mouse),
    // Left button
    ([ 0.05, 0.15, 0.35], [0.0, 0.0], Mouse),
    ([-0.15, 0.15, 0.35], [1.0, 0.0], Mouse),
    ([-0.15, 0.0,  0.35], [1.0, 1.0], Mouse),
    ([ 0.05, 0.0,  0.35], [0.0, 1.0], Mouse),
    // Right button
    ([ 0.1,  0.15, 0.35], [0.0, 0.0], Mouse),
    ([ 0.3,  0.15, 0.35], [1.0, 0.0], Mouse),
    ([ 0.3,  0.0,  0.35], [1.0, 1.0], Mouse),
    ([ 0.1,  0.0,  0.35], [0.0, 1.0], Mouse),
    // Plane
    ([-3.5, -0.25, -3.3], [0.0, -0.01], Desk),
    ([ 3.5, -0.25, -3.3], [1.0, -0.01], Desk),
    ([-3.5, -0.25,  3.3], [1.0, -1.0],  Desk),
    ([ 3.5, -0.25,  3.3], [0.0, -1.0],  Desk),
    // Monitor
    ([-2.5, 0.3, -1.5], [0.0, 0.0], Monitor),
    ([ 2.5, 0.3, -1.5], [1.0, 1.0], Monitor),
    ([ 2.5, 2.6, -1.5], [1.0, 0.0], Monitor),
    ([-2.5, 2.6, -1.5], [0.0, 1.0], Monitor),
    ([-2.5, 0.3, -1.0], [0.0, 0.0], Monitor),
    ([ 2.5, 0.3, -1.0], [1.0, 1.0], Monitor),
    ([ 2.5, 2.6, -1.0], [1.0, 0.0], Monitor),
    ([-2.5, 2.6, -1.0], [0.0, 1.0], Monitor),
    // Stand
    ([-0.5, -0.3, -1.5], [0.0, -2.5], Stand),
    ([ 0.5, -0.3, -1.5], [1.0, -2.5], Stand),
    ([ 0.5,  0.3, -1.5], [1.0, -2.5], Stand),
    ([-0.5,  0.3, -1.5], [0.0, -2.5], Stand),
    ([-0.5, -0.3, -1.0], [0.0, -2.5], Stand),
    ([ 0.5, -0.3, -1.0], [1.0, -2.5], Stand),
    ([ 0.5,  0.3, -1.0], [1.0, -2.5], Stand),
    ([-0.5,  0.3, -1.0], [0.0, -2.5], Stand),
    // Keyboard
    ([-1.0, -0.3, 2.0], [1.0, 0.0], Keyboard),
    ([ 1.0, -0.3, 2.0], [0.0, 1.0], Keyboard),
    ([ 1.0,  0.0, 2.0], [0.0, 0.0], Keyboard),
    ([-1.0,  0.0, 2.0], [1.0, 0.0], Keyboard),
    ([-1.0, -0.3, 1.0], [1.0, 0.0], Keyboard),
    ([ 1.0, -0.3, 1.0], [0.0, 0.0], Keyboard),
    ([ 1.0,  0.0, 1.0], [0.0, 1.0], Keyboard),
    ([-1.0,  0.0, 1.0], [1.0, 0.0], Keyboard),
    // Light bar, painted with the stand texture
    ([-1.8, 2.5, -1.0], [0.0, -2.5], Stand),
    ([ 1.8, 2.5, -1.0], [1.0,  3.5], Stand),
    ([ 1.8, 2.7, -1.0], [1.0,  3.5], Stand),
    ([-1.8, 2.7, -1.0], [0.0,  3.5], Stand),
    ([-1.8, 2.5, -0.8], [0.0,  3.5], Stand),
    ([ 1.8, 2.5, -0.8], [1.0,  3.5], Stand),
    ([ 1.8, 2.7, -0.8], [1.0,  3.5], Stand),
    ([-1.8, 2.7, -0.8], [0.0,  3.5], Stand),
];

/// Normal shared by every vertex in the scene, taken from the ground plane's
/// edges (-1.5,-0.25,-1.3)→(1.5,-0.25,-1.3) and →(-1.5,-0.25,1.3).
///
/// Box faces other than the one facing this way shade as if they did; see DESIGN.md.
pub fn plane_normal() -> Vector3<f32> {
    let origin = Vector3::new(-1.5, -0.25, -1.3);
    let along_x = Vector3::new(1.5, -0.25, -1.3) - origin;
    let along_z = Vector3::new(-1.5, -0.25, 1.3) - origin;
    along_x.cross(&along_z).normalize()
}

/// Builds the whole scene as one mesh: 55 vertices, 67 triangles.
pub fn build_scene() -> Mesh {
    let normal = plane_normal();

    let vertices = VERTICES
        .iter()
        .map(|&(p, uv, material)| {
            Vertex::new(Point3::from(p), normal, Vector2::from(uv), material)
        })
        .collect();

    let indices = SubObject::ALL
        .iter()
        .flat_map(|part| {
            let (base, pattern) = part.layout();
            pattern.iter().flatten().map(move |&i| base + i)
        })
        .collect();

    Mesh::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_has_expected_size() {
        let mesh = build_scene();
        assert_eq!(mesh.vertices.len(), 55);
        assert_eq!(mesh.triangle_count(), 67);
        assert_eq!(mesh.indices.len(), 201);
    }

    #[test]
    fn every_index_is_in_bounds() {
        let mesh = build_scene();
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        assert_eq!(mesh.triangles().count(), mesh.triangle_count());
    }

    #[test]
    fn each_triangle_has_a_single_material() {
        let mesh = build_scene();
        for [a, b, c] in mesh.triangles() {
            assert_eq!(a.material, b.material);
            assert_eq!(b.material, c.material);
        }
    }

    #[test]
    fn index_ranges_tile_the_buffer() {
        let mut next = 0;
        for part in SubObject::ALL {
            let range = part.index_range();
            assert_eq!(range.start, next);
            next = range.end;
        }
        assert_eq!(next, build_scene().indices.len());
    }

    #[test]
    fn parts_keep_their_index_layout() {
        let mesh = build_scene();
        let wheel = &mesh.indices[SubObject::ScrollWheel.index_range()];
        assert_eq!(wheel, &[8, 9, 10]);
        let plane = &mesh.indices[SubObject::Plane.index_range()];
        assert_eq!(plane, &[19, 20, 21, 20, 21, 22]);
        let light_bar = &mesh.indices[SubObject::LightBar.index_range()];
        assert_eq!(&light_bar[..6], &[47, 48, 49, 47, 49, 50]);
        assert_eq!(&light_bar[light_bar.len() - 3..], &[48, 53, 52]);
    }

    #[test]
    fn parts_use_their_materials() {
        let mesh = build_scene();
        let material_of = |part: SubObject| {
            let first = mesh.indices[part.index_range().start] as usize;
            mesh.vertices[first].material
        };
        assert_eq!(material_of(SubObject::MouseBody), MaterialKind::Mouse);
        assert_eq!(material_of(SubObject::RightButton), MaterialKind::Mouse);
        assert_eq!(material_of(SubObject::Plane), MaterialKind::Desk);
        assert_eq!(material_of(SubObject::Monitor), MaterialKind::Monitor);
        assert_eq!(material_of(SubObject::Stand), MaterialKind::Stand);
        assert_eq!(material_of(SubObject::Keyboard), MaterialKind::Keyboard);
        assert_eq!(material_of(SubObject::LightBar), MaterialKind::Stand);
    }

    #[test]
    fn all_vertices_share_the_plane_normal() {
        let expected = Vector3::new(0.0, -1.0, 0.0);
        assert!((plane_normal() - expected).norm() < 1e-6);
        assert!(build_scene().vertices.iter().all(|v| v.normal == plane_normal()));
    }
}
