use std::fmt::{self, Display, Formatter};

use glam::{EulerRot, IVec3, Mat4, Quat, Vec3};

use crate::core::geometry::Mesh;
use crate::core::Material;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Cube,
    Pyramid,
}

impl Shape {
    /// Number of face groups, i.e. how many per-face colors the shape takes.
    pub const fn face_count(&self) -> usize {
        match self {
            Shape::Cube => 6,
            Shape::Pyramid => 5,
        }
    }

    pub fn build_mesh(&self, size: f32) -> Mesh {
        match self {
            Shape::Cube => Mesh::cube(size),
            Shape::Pyramid => Mesh::pyramid(size),
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Cube => write!(f, "cube"),
            Shape::Pyramid => write!(f, "pyramid"),
        }
    }
}

/// One spinning primitive in the scene.
///
/// Everything but `rotation` is fixed at creation; each frame adds
/// `rotation_increment` to `rotation`.
#[derive(Clone, Debug)]
pub struct Entity {
    pub name: String,
    pub shape: Shape,
    pub size: f32,
    pub position: IVec3,
    /// Accumulated Euler angles (XYZ order), never wrapped.
    pub rotation: Vec3,
    pub rotation_increment: Vec3,
    pub material: Material,
    pub mesh: Mesh,
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {:.3} at {} spinning {:.4}, {})",
            self.name, self.shape, self.size, self.position, self.rotation_increment, self.material
        )
    }
}

impl Entity {
    pub fn new(
        name: String,
        shape: Shape,
        size: f32,
        position: IVec3,
        rotation_increment: Vec3,
        material: Material,
    ) -> Self {
        Self {
            mesh: shape.build_mesh(size),
            name,
            shape,
            size,
            position,
            rotation: Vec3::ZERO,
            rotation_increment,
            material,
        }
    }

    /// Advance the rotation by one frame's worth of increment.
    pub fn spin(&mut self) {
        self.rotation += self.rotation_increment;
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position.as_vec3())
    }
}
