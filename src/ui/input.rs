use crate::scene::camera::CameraMovement;
use crate::scene::state::{Command, SceneState};
use crate::scene::texture::WrapMode;
use log::info;
use minifb::{Key, MouseButton, MouseMode, Window};

const MOVEMENT_KEYS: [(Key, CameraMovement); 6] = [
    (Key::W, CameraMovement::Forward),
    (Key::S, CameraMovement::Backward),
    (Key::A, CameraMovement::Left),
    (Key::D, CameraMovement::Right),
    (Key::Q, CameraMovement::Up),
    (Key::E, CameraMovement::Down),
];

const WRAP_KEYS: [(Key, WrapMode); 4] = [
    (Key::Key1, WrapMode::Repeat),
    (Key::Key2, WrapMode::MirroredRepeat),
    (Key::Key3, WrapMode::ClampToEdge),
    (Key::Key4, WrapMode::ClampToBorder),
];

const BUTTONS: [(MouseButton, &str); 3] = [
    (MouseButton::Left, "Left"),
    (MouseButton::Middle, "Middle"),
    (MouseButton::Right, "Right"),
];

/// Turns the held keys into commands for one frame.
///
/// Keys are level-triggered: a held `]` keeps growing the UV scale every frame.
/// `]` wins over `[`. Wrap-mode and orbit keys that would not change `state`
/// are skipped, so the next held key in the chain gets its turn.
pub fn keyboard_commands(is_down: impl Fn(Key) -> bool, state: &SceneState) -> Vec<Command> {
    let mut commands: Vec<Command> = MOVEMENT_KEYS
        .iter()
        .filter(|(key, _)| is_down(*key))
        .map(|&(_, dir)| Command::Move(dir))
        .collect();

    if let Some(&(_, mode)) = WRAP_KEYS
        .iter()
        .find(|(key, mode)| is_down(*key) && *mode != state.wrap_mode)
    {
        commands.push(Command::SetWrapMode(mode));
    }

    if is_down(Key::RightBracket) {
        commands.push(Command::IncreaseUvScale);
    } else if is_down(Key::LeftBracket) {
        commands.push(Command::DecreaseUvScale);
    }

    let orbiting = state.orbit.is_enabled();
    if is_down(Key::L) && !orbiting {
        commands.push(Command::ResumeOrbit);
    } else if is_down(Key::K) && orbiting {
        commands.push(Command::PauseOrbit);
    }

    commands
}

/// Mouse and keyboard state carried between frames.
#[derive(Debug, Default)]
pub struct InputController {
    last_mouse_pos: Option<(f32, f32)>,
    buttons_down: [bool; 3],
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quit_requested(window: &Window) -> bool {
        window.is_key_down(Key::Escape)
    }

    /// Collects this frame's commands from `window`, given the state they will apply to.
    pub fn poll(&mut self, window: &Window, state: &SceneState) -> Vec<Command> {
        let mut commands = keyboard_commands(|key| window.is_key_down(key), state);

        if let Some(pos) = window.get_mouse_pos(MouseMode::Pass) {
            commands.extend(self.look(pos));
        }

        if let Some((_, dy)) = window.get_scroll_wheel()
            && dy != 0.0
        {
            commands.push(Command::Zoom(dy));
        }

        for (i, (button, name)) in BUTTONS.iter().enumerate() {
            if let Some(pressed) = self.button_edge(i, window.get_mouse_down(*button)) {
                let action = if pressed { "pressed" } else { "released" };
                info!("{} mouse button {}", name, action);
            }
        }

        commands
    }

    /// Cursor delta since the last sample. The first sample only primes the position.
    /// Screen y grows downwards, so the returned `dy` is flipped.
    pub fn look(&mut self, (x, y): (f32, f32)) -> Option<Command> {
        let (last_x, last_y) = self.last_mouse_pos.replace((x, y))?;
        let (dx, dy) = (x - last_x, last_y - y);
        (dx != 0.0 || dy != 0.0).then_some(Command::Look { dx, dy })
    }

    /// Records the state of button `index`; returns `Some(pressed)` on a transition.
    fn button_edge(&mut self, index: usize, down: bool) -> Option<bool> {
        let was_down = std::mem::replace(&mut self.buttons_down[index], down);
        (was_down != down).then_some(down)
    }
}
