pub mod camera;
pub mod color;
pub mod entity;
pub mod geometry;
pub mod light;
pub mod material;
pub mod scene;
pub mod texture;

pub use camera::Camera;
pub use color::Color;
pub use entity::{Entity, Shape};
pub use light::Light;
pub use material::Material;
pub use scene::Scene;
pub use texture::Texture;
