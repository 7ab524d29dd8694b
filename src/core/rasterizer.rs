use crate::core::framebuffer::FrameBuffer;
use crate::core::math::interpolation::Barycentric;
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::core::pipeline::Shader;
use nalgebra::{Point2, Vector4};
use rayon::prelude::*;

type ClipVertex<V> = (Vector4<f32>, V);

/// Clip planes as (axis, sign): a point is inside when `sign * p[axis] <= p.w`.
const CLIP_PLANES: [(usize, f32); 6] = [
    (0, 1.0),  // Right
    (0, -1.0), // Left
    (1, 1.0),  // Top
    (1, -1.0), // Bottom
    (2, 1.0),  // Far
    (2, -1.0), // Near
];

/// Draws triangles onto a [`FrameBuffer`]. Both faces are drawn; there is no culling.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rasterizer;

impl Rasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Rasterize a single triangle given clip-space coordinates and corresponding varyings.
    ///
    /// The triangle is clipped against the view frustum in homogeneous clip space
    /// (Sutherland–Hodgman) and the resulting convex polygon is drawn as a fan.
    pub fn rasterize_triangle<S: Shader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        clip_coords: &[Vector4<f32>; 3],
        varyings: &[S::Varying; 3],
    ) {
        let mut poly: Vec<ClipVertex<S::Varying>> = Vec::with_capacity(16);
        let mut scratch: Vec<ClipVertex<S::Varying>> = Vec::with_capacity(16);
        poly.extend(clip_coords.iter().copied().zip(varyings.iter().copied()));

        for &(axis, sign) in &CLIP_PLANES {
            if poly.is_empty() {
                return;
            }
            clip_polygon_against_plane(&poly, &mut scratch, axis, sign);
            std::mem::swap(&mut poly, &mut scratch);
        }

        if poly.len() < 3 {
            return;
        }

        let v0 = poly[0];
        for pair in poly[1..].windows(2) {
            let (v1, v2) = (pair[0], pair[1]);
            self.rasterize_clipped(
                framebuffer,
                shader,
                &[v0.0, v1.0, v2.0],
                &[v0.1, v1.1, v2.1],
            );
        }
    }

    /// Draws a triangle that is already inside the frustum:
    /// perspective division, viewport transform, depth test and shading.
    fn rasterize_clipped<S: Shader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        clip_coords: &[Vector4<f32>; 3],
        varyings: &[S::Varying; 3],
    ) {
        let width = framebuffer.buffer_width as f32;
        let height = framebuffer.buffer_height as f32;

        let mut screen = [Point2::origin(); 3];
        let mut ndc_z = [0.0; 3];
        let mut w = [0.0; 3];
        for i in 0..3 {
            if clip_coords[i].w.abs() < 1e-6 {
                return;
            }
            let ndc = apply_perspective_division(&clip_coords[i]);
            screen[i] = ndc_to_screen(ndc.x, ndc.y, width, height);
            ndc_z[i] = ndc.z;
            w[i] = clip_coords[i].w;
        }

        let (min_x, min_y, max_x, max_y) = bounding_box(&screen);
        if max_x < 0
            || max_y < 0
            || min_x >= framebuffer.buffer_width as i32
            || min_y >= framebuffer.buffer_height as i32
        {
            return;
        }

        let start_x = min_x.max(0) as usize;
        let end_x = max_x.min(framebuffer.buffer_width as i32 - 1) as usize;
        let start_y = min_y.max(0) as usize;
        let end_y = max_y.min(framebuffer.buffer_height as i32 - 1) as usize;

        (start_y..=end_y).into_par_iter().for_each(|y| {
            for x in start_x..=end_x {
                let center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                let Some(bary) = Barycentric::of(center, screen[0], screen[1], screen[2]) else {
                    continue;
                };
                if !bary.is_inside() {
                    continue;
                }

                // Skipped samples must leave the depth buffer untouched.
                let Some(corrected) = bary.perspective_corrected(w) else {
                    continue;
                };
                // NDC depth is affine in screen space; attributes are not.
                let depth = bary.blend(&ndc_z) * 0.5 + 0.5;
                if !framebuffer.depth_test_and_update(x, y, depth) {
                    continue;
                }

                let color = shader.fragment(corrected.blend(varyings));
                framebuffer.set_pixel_safe(x, y, color);
            }
        });
    }
}

/// Clips a polygon against one frustum plane, writing the result into `output`.
fn clip_polygon_against_plane<V: Copy + std::ops::Add<Output = V> + std::ops::Mul<f32, Output = V>>(
    input: &[ClipVertex<V>],
    output: &mut Vec<ClipVertex<V>>,
    axis: usize,
    sign: f32,
) {
    output.clear();
    let Some(&last) = input.last() else {
        return;
    };

    let is_inside = |p: &Vector4<f32>| sign * p[axis] <= p.w + 1e-6;

    let mut prev = last;
    let mut prev_inside = is_inside(&prev.0);
    for &curr in input {
        let curr_inside = is_inside(&curr.0);
        if curr_inside != prev_inside
            && let Some(hit) = intersect_edge_plane(prev, curr, axis, sign)
        {
            output.push(hit);
        }
        if curr_inside {
            output.push(curr);
        }
        prev = curr;
        prev_inside = curr_inside;
    }
}

/// Intersection of segment a→b with the plane `sign * p[axis] = p.w`,
/// interpolating position and varying alike.
#[inline(always)]
fn intersect_edge_plane<V: Copy + std::ops::Add<Output = V> + std::ops::Mul<f32, Output = V>>(
    a: ClipVertex<V>,
    b: ClipVertex<V>,
    axis: usize,
    sign: f32,
) -> Option<ClipVertex<V>> {
    let denom = sign * (b.0[axis] - a.0[axis]) - (b.0.w - a.0.w);
    if denom.abs() < 1e-9 {
        return None;
    }
    let t = (a.0.w - sign * a.0[axis]) / denom;
    if !t.is_finite() {
        return None;
    }
    Some((a.0 + (b.0 - a.0) * t, a.1 * (1.0 - t) + b.1 * t))
}

fn bounding_box(points: &[Point2<f32>; 3]) -> (i32, i32, i32, i32) {
    let min_x = points[0].x.min(points[1].x).min(points[2].x).floor() as i32;
    let min_y = points[0].y.min(points[1].y).min(points[2].y).floor() as i32;
    let max_x = points[0].x.max(points[1].x).max(points[2].x).ceil() as i32;
    let max_y = points[0].y.max(points[1].y).max(points[2].y).ceil() as i32;
    (min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Vertex;
    use nalgebra::Vector3;

    /// Passes positions straight through as clip coordinates and paints a flat color.
    struct Flat(Vector3<f32>);

    impl Shader for Flat {
        type Varying = f32;

        fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, f32) {
            (vertex.position.to_homogeneous(), 0.0)
        }

        fn fragment(&self, _varying: f32) -> Vector3<f32> {
            self.0
        }
    }

    fn clip(x: f32, y: f32, z: f32) -> Vector4<f32> {
        Vector4::new(x, y, z, 1.0)
    }

    #[test]
    fn covers_pixels_inside_the_triangle_only() {
        let fb = FrameBuffer::new(4, 4, 1);
        let red = Vector3::new(1.0, 0.0, 0.0);
        Rasterizer::new().rasterize_triangle(
            &fb,
            &Flat(red),
            &[clip(-1.0, -1.0, 0.0), clip(1.0, -1.0, 0.0), clip(-1.0, 1.0, 0.0)],
            &[0.0; 3],
        );
        // Bottom-left corner in screen space is (0, 3).
        assert_eq!(fb.get_pixel(0, 3), Some(red));
        assert_eq!(fb.get_pixel(3, 0), Some(Vector3::zeros()));
    }

    #[test]
    fn both_windings_are_drawn() {
        let fb = FrameBuffer::new(4, 4, 1);
        let green = Vector3::new(0.0, 1.0, 0.0);
        Rasterizer::new().rasterize_triangle(
            &fb,
            &Flat(green),
            &[clip(-1.0, -1.0, 0.0), clip(-1.0, 1.0, 0.0), clip(1.0, -1.0, 0.0)],
            &[0.0; 3],
        );
        assert_eq!(fb.get_pixel(0, 3), Some(green));
    }

    #[test]
    fn nearer_triangle_occludes_farther_one() {
        let fb = FrameBuffer::new(4, 4, 1);
        let near = Vector3::new(0.0, 0.0, 1.0);
        let far = Vector3::new(1.0, 1.0, 0.0);
        let full = |z| [clip(-1.0, -1.0, z), clip(3.0, -1.0, z), clip(-1.0, 3.0, z)];
        let r = Rasterizer::new();
        r.rasterize_triangle(&fb, &Flat(near), &full(-0.5), &[0.0; 3]);
        r.rasterize_triangle(&fb, &Flat(far), &full(0.5), &[0.0; 3]);
        assert_eq!(fb.get_pixel(1, 1), Some(near));
    }

    #[test]
    fn triangle_behind_the_camera_is_clipped_away() {
        let fb = FrameBuffer::new(4, 4, 1);
        let tri = [
            Vector4::new(0.0, 0.0, 2.0, -1.0),
            Vector4::new(1.0, 0.0, 2.0, -1.0),
            Vector4::new(0.0, 1.0, 2.0, -1.0),
        ];
        Rasterizer::new().rasterize_triangle(&fb, &Flat(Vector3::x()), &tri, &[0.0; 3]);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(fb.get_pixel(x, y), Some(Vector3::zeros()));
            }
        }
    }

    #[test]
    fn degenerate_perspective_weights_leave_depth_untouched() {
        // The middle vertex has w = -1, so at the pixel centre on the v1-v2 edge
        // the 1/w-weighted sum cancels to zero.
        let fb = FrameBuffer::new(1, 1, 1);
        let coords = [
            Vector4::new(-1.0, -1.0, 0.0, 1.0),
            Vector4::new(-1.0, 1.0, 0.0, -1.0),
            Vector4::new(-1.0, 1.0, 0.0, 1.0),
        ];
        Rasterizer::new().rasterize_clipped(&fb, &Flat(Vector3::x()), &coords, &[0.0; 3]);
        assert_eq!(fb.depth_at(0, 0), Some(f32::INFINITY));
        assert_eq!(fb.get_pixel(0, 0), Some(Vector3::zeros()));

        // A regular triangle still reaches the pixel afterwards.
        let blue = Vector3::z();
        Rasterizer::new().rasterize_clipped(
            &fb,
            &Flat(blue),
            &[clip(-1.0, -1.0, 0.5), clip(3.0, -1.0, 0.5), clip(-1.0, 3.0, 0.5)],
            &[0.0; 3],
        );
        assert_eq!(fb.get_pixel(0, 0), Some(blue));
    }
}
