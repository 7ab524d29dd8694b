pub mod camera;
pub mod desk;
pub mod light;
pub mod material;
pub mod mesh;
pub mod state;
pub mod texture;
