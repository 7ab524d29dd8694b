use clap::Parser;
use std::path::PathBuf;

/// Interactive textured desk scene.
#[derive(Parser, Debug)]
#[command(name = "desk-scene")]
#[command(about = "Software-rendered desk with Phong lighting and switchable texture wrapping")]
pub struct Cli {
    /// Directory holding mouse.jpg, desk.jpg, display.png, stand.jpg and keyboard.jpg
    #[arg(short, long, value_name = "DIR", default_value = "resources/textures")]
    pub textures: PathBuf,

    /// Supersampling factor per axis (1 = off)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub samples: u8,

    /// Render one frame to this PNG and exit instead of opening a window
    #[arg(long, value_name = "PNG")]
    pub headless: Option<PathBuf>,
}
