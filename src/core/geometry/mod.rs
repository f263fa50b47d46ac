mod mesh;
pub mod process;

pub use mesh::{Mesh, Tri, Vertex};
