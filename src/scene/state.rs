use crate::scene::camera::{Camera, CameraMovement};
use crate::scene::light::{LightOrbit, PointLight};
use crate::scene::material::TEXTURE_SLOTS;
use crate::scene::texture::WrapMode;
use log::info;
use nalgebra::Vector2;

/// Step applied to both UV scale axes by one increase/decrease action.
pub const UV_SCALE_STEP: f32 = 0.1;

/// One user action, already decoded from raw window input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move(CameraMovement),
    /// Cursor delta in pixels, `dy` positive upwards.
    Look { dx: f32, dy: f32 },
    Zoom(f32),
    SetWrapMode(WrapMode),
    IncreaseUvScale,
    DecreaseUvScale,
    PauseOrbit,
    ResumeOrbit,
}

/// Everything the frame loop mutates between frames.
#[derive(Debug, Clone)]
pub struct SceneState {
    pub camera: Camera,
    pub light: PointLight,
    pub orbit: LightOrbit,
    pub uv_scale: Vector2<f32>,
    /// Wrap mode of the mouse texture (slot 0).
    pub wrap_mode: WrapMode,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            light: PointLight::default(),
            orbit: LightOrbit::new(),
            uv_scale: Vector2::new(5.0, 5.0),
            wrap_mode: WrapMode::Repeat,
        }
    }
}

/// What applying one command did: whether the state changed, and the line
/// to report for it, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    pub changed: bool,
    pub message: Option<String>,
}

impl Outcome {
    fn silent(changed: bool) -> Self {
        Self {
            changed,
            message: None,
        }
    }

    fn reported(message: String) -> Self {
        Self {
            changed: true,
            message: Some(message),
        }
    }
}

pub fn wrap_mode_message(mode: WrapMode) -> String {
    format!("Current Texture Wrapping Mode: {}", mode)
}

pub fn uv_scale_message(scale: &Vector2<f32>) -> String {
    format!("Current scale ({:.1}, {:.1})", scale.x, scale.y)
}

impl SceneState {
    /// Applies `command` and logs its report line at `info`; `dt` is the frame
    /// time used by camera motion. Returns whether anything changed.
    pub fn apply(&mut self, command: Command, dt: f32) -> bool {
        let outcome = self.execute(command, dt);
        if let Some(message) = &outcome.message {
            info!("{}", message);
        }
        outcome.changed
    }

    /// Applies `command` without logging.
    pub fn execute(&mut self, command: Command, dt: f32) -> Outcome {
        match command {
            Command::Move(direction) => {
                self.camera.process_keyboard(direction, dt);
                Outcome::silent(true)
            }
            Command::Look { dx, dy } => {
                self.camera.process_mouse_movement(dx, dy);
                Outcome::silent(true)
            }
            Command::Zoom(dy) => {
                let before = self.camera.zoom;
                self.camera.process_mouse_scroll(dy);
                Outcome::silent(self.camera.zoom != before)
            }
            Command::SetWrapMode(mode) => self.set_wrap_mode(mode),
            Command::IncreaseUvScale => self.step_uv_scale(UV_SCALE_STEP),
            Command::DecreaseUvScale => self.step_uv_scale(-UV_SCALE_STEP),
            Command::PauseOrbit => Outcome::silent(self.orbit.pause()),
            Command::ResumeOrbit => Outcome::silent(self.orbit.resume()),
        }
    }

    /// Per-frame update that does not depend on input.
    pub fn advance(&mut self, dt: f32) {
        self.orbit.advance(&mut self.light, dt);
    }

    /// Wrap mode per texture slot. Only the mouse texture follows the user's choice.
    pub fn sampler_wrap_modes(&self) -> [WrapMode; TEXTURE_SLOTS] {
        let mut modes = [WrapMode::Repeat; TEXTURE_SLOTS];
        modes[0] = self.wrap_mode;
        modes
    }

    fn set_wrap_mode(&mut self, mode: WrapMode) -> Outcome {
        if self.wrap_mode == mode {
            return Outcome::silent(false);
        }
        self.wrap_mode = mode;
        Outcome::reported(wrap_mode_message(mode))
    }

    fn step_uv_scale(&mut self, delta: f32) -> Outcome {
        self.uv_scale.add_scalar_mut(delta);
        Outcome::reported(uv_scale_message(&self.uv_scale))
    }
}
