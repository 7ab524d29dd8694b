use crate::core::geometry::Vertex;
use crate::core::math::transform::TransformFactory;
use crate::core::pipeline::Shader;
use crate::scene::material::{MaterialKind, TEXTURE_SLOTS};
use crate::scene::texture::{TextureBank, WrapMode};
use nalgebra::{Matrix3, Matrix4, Point3, Vector2, Vector3, Vector4};
use std::ops::{Add, Mul};

pub const AMBIENT_STRENGTH: f32 = 0.7;
pub const SPECULAR_INTENSITY: f32 = 1.0;
/// Specular exponent.
pub const HIGHLIGHT_SIZE: i32 = 10;

/// Data that needs to be interpolated across the triangle surface.
/// Passed from Vertex Shader -> Rasterizer -> Fragment Shader.
#[derive(Clone, Copy, Debug)]
pub struct PhongVarying {
    /// Normal vector in World Space.
    pub normal: Vector3<f32>,
    /// Position in World Space (needed for calculating View Vector and Light Vector).
    pub world_pos: Point3<f32>,
    /// Texture coordinates (UV), before UV scaling.
    pub uv: Vector2<f32>,
    /// Flat across the triangle, so it is carried rather than blended.
    pub material: MaterialKind,
}

// nalgebra's Point3 doesn't support Point3 + Point3, so go through coordinates.
impl Add for PhongVarying {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            normal: self.normal + other.normal,
            world_pos: Point3::from(self.world_pos.coords + other.world_pos.coords),
            uv: self.uv + other.uv,
            material: self.material,
        }
    }
}

impl Mul<f32> for PhongVarying {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            normal: self.normal * scalar,
            world_pos: Point3::from(self.world_pos.coords * scalar),
            uv: self.uv * scalar,
            material: self.material,
        }
    }
}

/// Mirror of `incident` about `normal` (GLSL `reflect`). `normal` must be unit length.
#[inline]
pub fn reflect(incident: &Vector3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * normal.dot(incident))
}

/// Light reaching the eye from a surface point, before it is tinted by the texel:
/// `ambient + diffuse + specular`, all in units of `light_color`.
pub fn phong_lighting(
    normal: &Vector3<f32>,
    frag_pos: &Point3<f32>,
    light_pos: &Point3<f32>,
    light_color: &Vector3<f32>,
    view_pos: &Point3<f32>,
) -> Vector3<f32> {
    let n = normal.normalize();
    let light_dir = (light_pos - frag_pos).normalize();
    let view_dir = (view_pos - frag_pos).normalize();

    let ambient = light_color * AMBIENT_STRENGTH;

    let diff = n.dot(&light_dir).max(0.0);
    let diffuse = light_color * diff;

    let reflect_dir = reflect(&-light_dir, &n);
    let spec = view_dir.dot(&reflect_dir).max(0.0).powi(HIGHLIGHT_SIZE);
    let specular = light_color * (SPECULAR_INTENSITY * spec);

    ambient + diffuse + specular
}

/// Textured Phong shading for the desk scene.
///
/// Each fragment samples the texture of its material at `uv * uv_scale`, using
/// that slot's wrap mode, and multiplies it by the Phong lighting term.
/// No tone mapping or gamma; values above 1 are clamped at presentation.
pub struct PhongShader<'a> {
    // Matrices
    pub model_matrix: Matrix4<f32>,
    pub view_matrix: Matrix4<f32>,
    pub projection_matrix: Matrix4<f32>,
    normal_matrix: Matrix3<f32>,

    // Lighting
    pub light_pos: Point3<f32>,
    pub light_color: Vector3<f32>,

    // Camera
    pub view_pos: Point3<f32>,

    // Texturing
    pub textures: &'a TextureBank,
    pub uv_scale: Vector2<f32>,
    pub wrap_modes: [WrapMode; TEXTURE_SLOTS],
}

impl<'a> PhongShader<'a> {
    pub fn new(
        model: Matrix4<f32>,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
        view_pos: Point3<f32>,
        textures: &'a TextureBank,
    ) -> Self {
        Self {
            model_matrix: model,
            view_matrix: view,
            projection_matrix: projection,
            normal_matrix: TransformFactory::normal_matrix(&model),
            light_pos: Point3::new(1.0, 0.5, 1.0),
            light_color: Vector3::new(1.0, 1.0, 1.0),
            view_pos,
            textures,
            uv_scale: Vector2::new(1.0, 1.0),
            wrap_modes: [WrapMode::Repeat; TEXTURE_SLOTS],
        }
    }

    /// Texel of `material` at the unscaled coordinate `uv`.
    pub fn sample_material(&self, material: MaterialKind, uv: Vector2<f32>) -> Vector3<f32> {
        let wrap = self.wrap_modes[material.slot()];
        self.textures
            .get(material)
            .sample(uv.component_mul(&self.uv_scale), wrap)
    }
}

impl Shader for PhongShader<'_> {
    type Varying = PhongVarying;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let world_pos = self.model_matrix.transform_point(&vertex.position);

        let mvp = self.projection_matrix * self.view_matrix * self.model_matrix;
        let clip_pos = mvp * vertex.position.to_homogeneous();

        let varying = PhongVarying {
            normal: self.normal_matrix * vertex.normal,
            world_pos,
            uv: vertex.texcoord,
            material: vertex.material,
        };

        (clip_pos, varying)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        let texel = self.sample_material(varying.material, varying.uv);
        let light = phong_lighting(
            &varying.normal,
            &varying.world_pos,
            &self.light_pos,
            &self.light_color,
            &self.view_pos,
        );
        light.component_mul(&texel)
    }
}
