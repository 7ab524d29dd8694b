/// Number of texture slots the desk shader samples from.
pub const TEXTURE_SLOTS: usize = 5;

/// Which of the five scene textures a vertex is painted with.
///
/// Every vertex carries one of these, and all three vertices of a triangle
/// agree on it, so the value never needs interpolating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialKind {
    /// Mouse body, wheel and buttons. Also the fallback material.
    #[default]
    Mouse,
    Desk,
    Monitor,
    Stand,
    Keyboard,
}

/// Fixed slot table: index = texture unit, value = material bound there.
pub const SLOT_TABLE: [MaterialKind; TEXTURE_SLOTS] = [
    MaterialKind::Mouse,
    MaterialKind::Desk,
    MaterialKind::Monitor,
    MaterialKind::Stand,
    MaterialKind::Keyboard,
];

impl MaterialKind {
    /// Texture unit this material samples from.
    pub const fn slot(self) -> usize {
        match self {
            MaterialKind::Mouse => 0,
            MaterialKind::Desk => 1,
            MaterialKind::Monitor => 2,
            MaterialKind::Stand => 3,
            MaterialKind::Keyboard => 4,
        }
    }

    /// Image file loaded into this material's slot at startup.
    pub const fn file_name(self) -> &'static str {
        match self {
            MaterialKind::Mouse => "mouse.jpg",
            MaterialKind::Desk => "desk.jpg",
            MaterialKind::Monitor => "display.png",
            MaterialKind::Stand => "stand.jpg",
            MaterialKind::Keyboard => "keyboard.jpg",
        }
    }
}
