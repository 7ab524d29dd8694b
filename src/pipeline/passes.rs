use crate::core::framebuffer::FrameBuffer;
use crate::core::math::transform::TransformFactory;
use crate::pipeline::renderer::Renderer;
use crate::pipeline::shaders::phong::PhongShader;
use crate::scene::mesh::Mesh;
use crate::scene::state::SceneState;
use crate::scene::texture::TextureBank;
use nalgebra::Vector3;
use rayon::prelude::*;

/// The scene is drawn at twice its modelled size, centred on the origin.
pub const MODEL_SCALE: f32 = 2.0;

/// Projection aspect ratio. Fixed at the initial window shape; resizing the
/// window stretches the image instead of widening the view.
pub const PROJECTION_ASPECT: f32 = 800.0 / 600.0;

pub const CLEAR_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// Builds the shader for the current state.
pub fn scene_shader<'a>(state: &SceneState, textures: &'a TextureBank) -> PhongShader<'a> {
    let camera = &state.camera;
    let mut shader = PhongShader::new(
        TransformFactory::scaling(MODEL_SCALE),
        camera.view_matrix(),
        camera.projection_matrix(PROJECTION_ASPECT),
        camera.position,
        textures,
    );
    shader.light_pos = state.light.position;
    shader.light_color = state.light.color();
    shader.uv_scale = state.uv_scale;
    shader.wrap_modes = state.sampler_wrap_modes();
    shader
}

/// Clears the target and draws `mesh` as seen from `state`.
pub fn render_frame(
    state: &SceneState,
    mesh: &Mesh,
    textures: &TextureBank,
    renderer: &mut Renderer,
) {
    renderer.clear(Vector3::from(CLEAR_COLOR));
    let shader = scene_shader(state, textures);
    renderer.draw_mesh(mesh, &shader);
}

/// Resolves the framebuffer into 0RGB pixels, clamping each channel to [0, 1].
pub fn post_process_to_buffer(framebuffer: &FrameBuffer, buffer: &mut [u32]) {
    buffer
        .par_chunks_mut(framebuffer.width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = framebuffer.get_pixel(x, y).map_or(0, pack_rgb);
            }
        });
}

#[inline]
fn pack_rgb(color: Vector3<f32>) -> u32 {
    let r = (color.x.clamp(0.0, 1.0) * 255.0) as u32;
    let g = (color.y.clamp(0.0, 1.0) * 255.0) as u32;
    let b = (color.z.clamp(0.0, 1.0) * 255.0) as u32;
    (255 << 24) | (r << 16) | (g << 8) | b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::Shader;
    use crate::pipeline::shaders::phong::PhongVarying;
    use crate::scene::desk::build_scene;
    use crate::scene::material::{MaterialKind, TEXTURE_SLOTS};
    use crate::scene::state::Command;
    use crate::scene::texture::Texture;
    use image::{DynamicImage, Rgb, RgbImage};
    use nalgebra::{Point3, Vector2};

    // Mouse red, desk green, monitor blue, stand yellow, keyboard cyan.
    const SLOT_COLORS: [[u8; 3]; TEXTURE_SLOTS] = [
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [255, 255, 0],
        [0, 255, 255],
    ];

    fn bank() -> TextureBank {
        TextureBank::from_textures(SLOT_COLORS.map(|c| {
            Texture::from_image(DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb(c))))
                .unwrap()
        }))
    }

    fn rendered(state: &SceneState) -> Renderer {
        let mut renderer = Renderer::new(40, 30, 1);
        render_frame(state, &build_scene(), &bank(), &mut renderer);
        renderer
    }

    #[test]
    fn pack_clamps_out_of_range_channels() {
        assert_eq!(pack_rgb(Vector3::new(2.0, -1.0, 1.0)), 0xFFFF00FF);
        assert_eq!(pack_rgb(Vector3::zeros()), 0xFF000000);
    }

    #[test]
    fn default_view_shows_the_mouse_in_front_of_the_monitor() {
        let renderer = rendered(&SceneState::default());
        let fb = &renderer.framebuffer;

        // Just above the centre: the mouse, red only.
        let mouse = fb.get_pixel(20, 13).unwrap();
        assert!(mouse.x > 0.0);
        assert_eq!((mouse.y, mouse.z), (0.0, 0.0));

        // Top of the frame: the monitor, blue only.
        let monitor = fb.get_pixel(20, 0).unwrap();
        assert!(monitor.z > 0.0);
        assert_eq!((monitor.x, monitor.y), (0.0, 0.0));
    }

    #[test]
    fn nothing_drawn_behind_the_camera() {
        let mut state = SceneState::default();
        // Turn around to face +Z, away from the whole scene.
        state.camera.process_mouse_movement(1800.0, 0.0);
        let renderer = rendered(&state);
        let mut buffer = vec![0u32; 40 * 30];
        post_process_to_buffer(&renderer.framebuffer, &mut buffer);
        assert!(buffer.iter().all(|&p| p == pack_rgb(Vector3::from(CLEAR_COLOR))));
    }

    #[test]
    fn post_process_covers_every_pixel() {
        let renderer = rendered(&SceneState::default());
        let mut buffer = vec![0u32; 40 * 30];
        post_process_to_buffer(&renderer.framebuffer, &mut buffer);
        assert!(buffer.iter().all(|&p| p >> 24 == 0xFF));
        assert!(buffer.iter().any(|&p| p != pack_rgb(Vector3::from(CLEAR_COLOR))));
    }

    #[test]
    fn startup_shading_below_the_light_is_ambient_times_scaled_mouse_texel() {
        let mut state = SceneState::default();
        state.apply(Command::PauseOrbit, 0.0);
        state.advance(1.0);
        assert_eq!(state.light.position, Point3::new(1.0, 0.5, 1.0));

        // Red, green / blue, white, top row first.
        let mut mouse = RgbImage::new(2, 2);
        mouse.put_pixel(0, 0, Rgb([255, 0, 0]));
        mouse.put_pixel(1, 0, Rgb([0, 255, 0]));
        mouse.put_pixel(0, 1, Rgb([0, 0, 255]));
        mouse.put_pixel(1, 1, Rgb([255, 255, 255]));
        let [_, desk, monitor, stand, keyboard] = SLOT_COLORS.map(|c| {
            Texture::from_image(DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb(c))))
                .unwrap()
        });
        let mouse = Texture::from_image(DynamicImage::ImageRgb8(mouse)).unwrap();
        let textures = TextureBank::from_textures([mouse, desk, monitor, stand, keyboard]);

        let shader = scene_shader(&state, &textures);
        assert_eq!(shader.uv_scale, Vector2::new(5.0, 5.0));

        // Facing away from the light and the eye at (0, 0, 7): no diffuse, no specular.
        let uv = Vector2::new(0.05, 0.15);
        let color = shader.fragment(PhongVarying {
            normal: Vector3::new(0.0, -1.0, 0.0),
            world_pos: Point3::origin(),
            uv,
            material: MaterialKind::Mouse,
        });

        // uv * 5 = (0.25, 0.75) lands on the centre of the top-left texel.
        let expected = Vector3::new(0.7, 0.0, 0.0);
        assert!((color - expected).norm() < 1e-3);

        let unscaled = textures.get(MaterialKind::Mouse).sample(uv, state.wrap_mode) * 0.7;
        assert!((color - unscaled).norm() > 0.1);
    }
}
