use crate::scene::texture::TextureError;
use std::fmt;
use std::path::PathBuf;

/// Fatal startup / shutdown failures. Nothing inside the frame loop produces one.
#[derive(Debug)]
pub enum AppError {
    /// The window could not be created or updated.
    Window(minifb::Error),
    /// A scene texture could not be turned into a [`Texture`](crate::scene::texture::Texture).
    Texture { path: PathBuf, source: TextureError },
    /// The headless frame could not be written.
    Output { path: PathBuf, source: image::ImageError },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Window(e) => write!(f, "window error: {}", e),
            AppError::Texture { path, source } => {
                write!(f, "failed to load texture {}: {}", path.display(), source)
            }
            AppError::Output { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Window(e) => Some(e),
            AppError::Texture { source, .. } => Some(source),
            AppError::Output { source, .. } => Some(source),
        }
    }
}

impl From<minifb::Error> for AppError {
    fn from(e: minifb::Error) -> Self {
        AppError::Window(e)
    }
}
