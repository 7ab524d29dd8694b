use crate::error::AppError;
use crate::scene::material::{MaterialKind, SLOT_TABLE, TEXTURE_SLOTS};
use image::DynamicImage;
use log::info;
use nalgebra::{Vector2, Vector3};
use std::fmt;
use std::path::Path;

/// How texel lookups outside the image are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    /// Out-of-range texels read [`WrapMode::border_color`].
    ClampToBorder,
}

impl WrapMode {
    /// Color read outside the image under `ClampToBorder`: magenta, alpha 1.
    pub fn border_color() -> Vector3<f32> {
        Vector3::new(1.0, 0.0, 1.0)
    }

    /// Maps a texel index on an axis of `size` texels to an in-range index,
    /// or `None` when the border color should be used instead.
    pub fn resolve(self, i: i32, size: i32) -> Option<i32> {
        match self {
            WrapMode::Repeat => Some(i.rem_euclid(size)),
            WrapMode::MirroredRepeat => {
                let m = i.rem_euclid(2 * size);
                Some(if m >= size { 2 * size - 1 - m } else { m })
            }
            WrapMode::ClampToEdge => Some(i.clamp(0, size - 1)),
            WrapMode::ClampToBorder => (0..size).contains(&i).then_some(i),
        }
    }
}

impl fmt::Display for WrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WrapMode::Repeat => "REPEAT",
            WrapMode::MirroredRepeat => "MIRRORED REPEAT",
            WrapMode::ClampToEdge => "CLAMP TO EDGE",
            WrapMode::ClampToBorder => "CLAMP TO BORDER",
        })
    }
}

/// Why an image could not become a [`Texture`].
#[derive(Debug)]
pub enum TextureError {
    /// Missing file or undecodable data.
    Decode(image::ImageError),
    /// Only 3- and 4-channel images are supported.
    UnsupportedChannels(u8),
    /// Zero width or height.
    Empty,
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Decode(e) => write!(f, "{}", e),
            TextureError::UnsupportedChannels(n) => {
                write!(f, "not implemented to handle image with {} channels", n)
            }
            TextureError::Empty => f.write_str("image has no pixels"),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::Decode(e)
    }
}

/// A decoded RGB texture, stored bottom row first.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    /// Channel count of the source image (3 or 4).
    pub channels: u8,
    texels: Vec<Vector3<f32>>,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path_ref = path.as_ref();
        let texture = Self::from_image(image::open(path_ref)?)?;

        info!(
            "Loaded texture: {:?} ({}x{}, {} channels)",
            path_ref, texture.width, texture.height, texture.channels
        );
        Ok(texture)
    }

    /// Converts a decoded image. Rows are flipped so that row 0 is the bottom of
    /// the picture, which is where `v = 0` samples.
    pub fn from_image(img: DynamicImage) -> Result<Self, TextureError> {
        let channels = img.color().channel_count();
        if channels != 3 && channels != 4 {
            return Err(TextureError::UnsupportedChannels(channels));
        }
        if img.width() == 0 || img.height() == 0 {
            return Err(TextureError::Empty);
        }

        let rgb = img.flipv().to_rgb8();
        let texels = rgb
            .pixels()
            .map(|p| Vector3::new(p[0], p[1], p[2]).map(|c| c as f32 / 255.0))
            .collect();

        Ok(Self {
            width: rgb.width(),
            height: rgb.height(),
            channels,
            texels,
        })
    }

    /// Texel at integer coordinates (row 0 = bottom), wrapped per `wrap`.
    pub fn texel(&self, x: i32, y: i32, wrap: WrapMode) -> Vector3<f32> {
        let w = self.width as i32;
        let h = self.height as i32;
        match (wrap.resolve(x, w), wrap.resolve(y, h)) {
            (Some(x), Some(y)) => self.texels[(y * w + x) as usize],
            _ => WrapMode::border_color(),
        }
    }

    /// Bilinear sample at `uv`; coordinates outside [0, 1] are handled by `wrap`.
    pub fn sample(&self, uv: Vector2<f32>, wrap: WrapMode) -> Vector3<f32> {
        // Texel centers sit at half-integers.
        let x = uv.x * self.width as f32 - 0.5;
        let y = uv.y * self.height as f32 - 0.5;

        let x0 = x.floor();
        let y0 = y.floor();
        let wx = x - x0;
        let wy = y - y0;
        let (x0, y0) = (x0 as i32, y0 as i32);

        let c00 = self.texel(x0, y0, wrap);
        let c10 = self.texel(x0 + 1, y0, wrap);
        let c01 = self.texel(x0, y0 + 1, wrap);
        let c11 = self.texel(x0 + 1, y0 + 1, wrap);

        let bottom = c00 * (1.0 - wx) + c10 * wx;
        let top = c01 * (1.0 - wx) + c11 * wx;
        bottom * (1.0 - wy) + top * wy
    }
}

/// The five scene textures, one per slot of [`SLOT_TABLE`].
#[derive(Debug, Clone)]
pub struct TextureBank {
    // Always TEXTURE_SLOTS long, in slot order.
    textures: Vec<Texture>,
}

impl TextureBank {
    pub fn from_textures(textures: [Texture; TEXTURE_SLOTS]) -> Self {
        Self {
            textures: Vec::from(textures),
        }
    }

    /// Loads every slot's file from `dir` in slot order, stopping at the first failure.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, AppError> {
        let mut textures = Vec::with_capacity(TEXTURE_SLOTS);
        for kind in SLOT_TABLE {
            let path = dir.as_ref().join(kind.file_name());
            let texture = Texture::load(&path).map_err(|source| AppError::Texture {
                path: path.clone(),
                source,
            })?;
            textures.push(texture);
        }
        Ok(Self { textures })
    }

    pub fn get(&self, kind: MaterialKind) -> &Texture {
        &self.textures[kind.slot()]
    }
}
