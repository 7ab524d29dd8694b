use nalgebra::{Point2, Vector3};

const EPSILON: f32 = 1e-5;

/// Barycentric weights (alpha, beta, gamma) of a point relative to a screen-space triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric(pub Vector3<f32>);

impl Barycentric {
    /// Weights of `p` with respect to triangle (v1, v2, v3).
    ///
    /// Returns `None` if the triangle is degenerate (area is near zero).
    pub fn of(p: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>, v3: Point2<f32>) -> Option<Self> {
        let e1 = v2 - v1;
        let e2 = v3 - v1;
        let d = p - v1;

        let area_x2 = e1.x * e2.y - e1.y * e2.x;
        if area_x2.abs() < EPSILON {
            return None;
        }
        let inv_area_x2 = 1.0 / area_x2;

        let beta = (d.x * e2.y - d.y * e2.x) * inv_area_x2;
        let gamma = (e1.x * d.y - e1.y * d.x) * inv_area_x2;

        Some(Self(Vector3::new(1.0 - beta - gamma, beta, gamma)))
    }

    /// True when all three weights are non-negative (within tolerance).
    #[inline(always)]
    pub fn is_inside(&self) -> bool {
        self.0.iter().all(|&w| w >= -EPSILON)
    }

    /// Perspective-correct weights given the clip-space `w` of each vertex.
    ///
    /// Screen-space weights are divided by their vertex's `w` and renormalised.
    /// Returns `None` when the renormalisation would divide by ~0.
    pub fn perspective_corrected(&self, w: [f32; 3]) -> Option<Self> {
        let inv = w.map(|w| if w.abs() > EPSILON { 1.0 / w } else { 1.0 });
        let weighted = Vector3::new(self.0.x * inv[0], self.0.y * inv[1], self.0.z * inv[2]);

        let sum = weighted.sum();
        if sum.abs() < EPSILON {
            return None;
        }
        Some(Self(weighted / sum))
    }

    /// Blends three per-vertex values with these weights.
    #[inline]
    pub fn blend<T>(&self, values: &[T; 3]) -> T
    where
        T: Copy + std::ops::Add<Output = T> + std::ops::Mul<f32, Output = T>,
    {
        values[0] * self.0.x + values[1] * self.0.y + values[2] * self.0.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> [Point2<f32>; 3] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        ]
    }

    #[test]
    fn vertices_get_unit_weights() {
        let [a, b, c] = tri();
        let bary = Barycentric::of(b, a, b, c).unwrap();
        assert!((bary.0 - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn outside_point_is_rejected() {
        let [a, b, c] = tri();
        let bary = Barycentric::of(Point2::new(3.0, 3.0), a, b, c).unwrap();
        assert!(!bary.is_inside());
    }

    #[test]
    fn degenerate_triangle_has_no_weights() {
        let p = Point2::new(1.0, 1.0);
        assert!(Barycentric::of(p, p, Point2::new(2.0, 2.0), Point2::new(3.0, 3.0)).is_none());
    }

    #[test]
    fn equal_w_leaves_weights_unchanged() {
        let bary = Barycentric(Vector3::new(0.2, 0.3, 0.5));
        let corrected = bary.perspective_corrected([2.0, 2.0, 2.0]).unwrap();
        assert!((corrected.0 - bary.0).norm() < 1e-6);
    }

    #[test]
    fn nearer_vertex_gains_weight() {
        let bary = Barycentric(Vector3::new(0.5, 0.5, 0.0));
        let corrected = bary.perspective_corrected([1.0, 3.0, 1.0]).unwrap();
        assert!(corrected.0.x > 0.5);
        assert!((corrected.0.sum() - 1.0).abs() < 1e-6);
    }
}
