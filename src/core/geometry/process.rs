use glam::Vec3;

use crate::core::geometry::mesh::{Mesh, Tri};

pub fn compute_normal(tri: &Tri, mesh: &Mesh) -> Vec3 {
    let v0 = mesh.vertices[tri.vertices[0]].pos;
    let v1 = mesh.vertices[tri.vertices[1]].pos;
    let v2 = mesh.vertices[tri.vertices[2]].pos;

    (v1 - v0).cross(v2 - v0).normalize_or_zero()
}

pub fn compute_face_normals(mesh: &mut Mesh) {
    let normals: Vec<Vec3> = mesh.tris.iter().map(|tri| compute_normal(tri, mesh)).collect();
    for (tri, normal) in mesh.tris.iter_mut().zip(normals) {
        tri.normal = normal;
    }
}
