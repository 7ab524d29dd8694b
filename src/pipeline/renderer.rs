use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::Rasterizer;
use crate::scene::mesh::Mesh;
use nalgebra::Vector3;

/// The high-level renderer that orchestrates the pipeline stages.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    /// Creates a new renderer.
    /// sample_count: 1 for no AA, 2 for 2x2 SSAA, etc.
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height, sample_count),
        }
    }

    pub fn width(&self) -> usize {
        self.framebuffer.width
    }

    pub fn height(&self) -> usize {
        self.framebuffer.height
    }

    /// Clears color to `color` and depth to the far plane.
    pub fn clear(&mut self, color: Vector3<f32>) {
        self.framebuffer.clear(color);
    }

    /// Reallocates the framebuffer when the output size changed. Returns whether it did.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == self.framebuffer.width && height == self.framebuffer.height {
            return false;
        }
        let samples = self.framebuffer.sample_count;
        self.framebuffer = FrameBuffer::new(width, height, samples);
        true
    }

    /// Runs every triangle of `mesh` through `shader`.
    pub fn draw_mesh<S: Shader>(&mut self, mesh: &Mesh, shader: &S) {
        for [v0, v1, v2] in mesh.triangles() {
            let (pos0, var0) = shader.vertex(v0);
            let (pos1, var1) = shader.vertex(v1);
            let (pos2, var2) = shader.vertex(v2);

            self.rasterizer.rasterize_triangle(
                &self.framebuffer,
                shader,
                &[pos0, pos1, pos2],
                &[var0, var1, var2],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_keeps_the_sample_count() {
        let mut renderer = Renderer::new(8, 6, 2);
        assert!(!renderer.resize(8, 6));
        assert!(renderer.resize(16, 12));
        assert_eq!(renderer.width(), 16);
        assert_eq!(renderer.height(), 12);
        assert_eq!(renderer.framebuffer.buffer_width, 32);
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut renderer = Renderer::new(3, 2, 1);
        renderer.clear(Vector3::new(0.25, 0.5, 0.75));
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(
                    renderer.framebuffer.get_pixel(x, y),
                    Some(Vector3::new(0.25, 0.5, 0.75))
                );
            }
        }
    }
}
