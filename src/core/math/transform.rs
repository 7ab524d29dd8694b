use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the handful of transformation matrices the desk scene needs.
/// Right-handed, column vectors, written out by hand.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// 3x3 rotation about the world Y axis.
    pub fn rotation_y3(angle_rad: f32) -> Matrix3<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix3::new(
            c,   0.0, s,
            0.0, 1.0, 0.0,
           -s,   0.0, c,
        )
    }

    /// Creates a uniform scaling matrix.
    pub fn scaling(factor: f32) -> Matrix4<f32> {
        Matrix4::new(
            factor, 0.0,    0.0,    0.0,
            0.0,    factor, 0.0,    0.0,
            0.0,    0.0,    factor, 0.0,
            0.0,    0.0,    0.0,    1.0,
        )
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a View matrix (Look-At, Right-Handed).
    /// Transforms world space coordinates to camera/view space.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        // In RHS, camera looks down -Z
        let z_axis = (eye - target).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        let rotation = Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        );

        rotation * Self::translation(&-eye.coords)
    }

    /// Creates a Perspective Projection matrix (Right-Handed).
    /// Maps view frustum to NDC [-1, 1].
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let nf = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,               0.0,
            0.0,              f,   0.0,               0.0,
            0.0,              0.0, (far + near) * nf, 2.0 * far * near * nf,
            0.0,              0.0, -1.0,              0.0,
        )
    }

    /// Matrix that carries object-space normals to world space:
    /// inverse-transpose of the model's upper 3x3.
    /// Falls back to the plain 3x3 if the model is singular.
    pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
        let linear: Matrix3<f32> = model.fixed_view::<3, 3>(0, 0).into_owned();
        linear
            .try_inverse()
            .map(|inv| inv.transpose())
            .unwrap_or(linear)
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Performs perspective division: Clip Space -> NDC.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Point3<f32> {
    let w = clip.w;
    if w.abs() > 1e-6 {
        Point3::new(clip.x / w, clip.y / w, clip.z / w)
    } else {
        Point3::origin()
    }
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - (ndc_y + 1.0) * 0.5) * height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_about_y_maps_x_to_minus_z() {
        let rotated = TransformFactory::rotation_y3(FRAC_PI_2) * Vector3::x();
        assert!((rotated - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let eye = Point3::new(0.0, 0.0, 7.0);
        let view = TransformFactory::view(&eye, &Point3::origin(), &Vector3::y());
        let at_eye = view * eye.to_homogeneous();
        assert!(at_eye.xyz().norm() < 1e-5);
    }

    #[test]
    fn normal_matrix_of_uniform_scale_keeps_direction() {
        let n = TransformFactory::normal_matrix(&TransformFactory::scaling(2.0)) * Vector3::y();
        assert!((n.normalize() - Vector3::y()).norm() < 1e-6);
    }

    #[test]
    fn ndc_corners_map_to_screen_corners() {
        let top_left = ndc_to_screen(-1.0, 1.0, 800.0, 600.0);
        assert_eq!(top_left, Point2::new(0.0, 0.0));
        let bottom_right = ndc_to_screen(1.0, -1.0, 800.0, 600.0);
        assert_eq!(bottom_right, Point2::new(800.0, 600.0));
    }
}
