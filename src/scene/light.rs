use crate::core::math::transform::TransformFactory;
use nalgebra::{Point3, Vector3};

/// The scene's single point light.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Point3<f32>,
    color: Vector3<f32>,
}

impl PointLight {
    pub fn new(position: Point3<f32>, color: Vector3<f32>) -> Self {
        Self { position, color }
    }

    pub fn color(&self) -> Vector3<f32> {
        self.color
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Point3::new(1.0, 0.5, 1.0), Vector3::new(1.0, 1.0, 1.0))
    }
}

/// Spins a light around the world Y axis through the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightOrbit {
    enabled: bool,
}

impl LightOrbit {
    /// Degrees per second.
    pub const ANGULAR_VELOCITY_DEG: f32 = 45.0;

    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Stops the orbit. Returns false if it was already stopped.
    pub fn pause(&mut self) -> bool {
        let changed = self.enabled;
        self.enabled = false;
        changed
    }

    /// Restarts the orbit. Returns false if it was already running.
    pub fn resume(&mut self) -> bool {
        let changed = !self.enabled;
        self.enabled = true;
        changed
    }

    /// Rotates `light` by `ANGULAR_VELOCITY_DEG * dt` when enabled.
    pub fn advance(&self, light: &mut PointLight, dt: f32) {
        if !self.enabled {
            return;
        }
        let angle = (Self::ANGULAR_VELOCITY_DEG * dt).to_radians();
        light.position = Point3::from(TransformFactory::rotation_y3(angle) * light.position.coords);
    }
}

impl Default for LightOrbit {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &Point3<f32>, b: &Point3<f32>) -> bool {
        (a - b).norm() < 1e-4
    }

    #[test]
    fn one_second_turns_forty_five_degrees() {
        let mut light = PointLight::new(Point3::new(1.0, 0.0, 0.0), Vector3::repeat(1.0));
        LightOrbit::new().advance(&mut light, 1.0);
        let expected = Point3::new(
            45f32.to_radians().cos(),
            0.0,
            -45f32.to_radians().sin(),
        );
        assert!(close(&light.position, &expected));
    }

    #[test]
    fn orbit_is_frame_rate_independent() {
        let orbit = LightOrbit::new();
        let mut coarse = PointLight::default();
        let mut fine = PointLight::default();

        orbit.advance(&mut coarse, 0.5);
        orbit.advance(&mut coarse, 0.5);
        for _ in 0..60 {
            orbit.advance(&mut fine, 1.0 / 60.0);
        }

        let mut direct = PointLight::default();
        orbit.advance(&mut direct, 1.0);

        assert!(close(&coarse.position, &direct.position));
        assert!(close(&fine.position, &direct.position));
    }

    #[test]
    fn orbit_keeps_height_and_radius() {
        let orbit = LightOrbit::new();
        let mut light = PointLight::default();
        let radius = light.position.xz().coords.norm();
        for dt in [0.016, 0.2, 1.7, 3.0] {
            orbit.advance(&mut light, dt);
        }
        assert!((light.position.y - 0.5).abs() < 1e-5);
        assert!((light.position.xz().coords.norm() - radius).abs() < 1e-5);
    }

    #[test]
    fn paused_orbit_freezes_the_light() {
        let mut orbit = LightOrbit::new();
        let mut light = PointLight::default();
        assert!(orbit.pause());
        orbit.advance(&mut light, 10.0);
        assert_eq!(light, PointLight::default());
    }

    #[test]
    fn toggles_are_idempotent() {
        let mut orbit = LightOrbit::new();
        assert!(orbit.is_enabled());
        assert!(!orbit.resume());
        assert!(orbit.is_enabled());

        assert!(orbit.pause());
        assert!(!orbit.pause());
        assert!(!orbit.is_enabled());

        assert!(orbit.resume());
        assert!(orbit.is_enabled());
    }

    #[test]
    fn light_color_defaults_to_white() {
        assert_eq!(PointLight::default().color(), Vector3::new(1.0, 1.0, 1.0));
    }
}
