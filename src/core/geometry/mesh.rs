use super::process;
use glam::{Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub pos: Vec3, // Position in model space
    pub uv: Vec2,  // Texture coordinates
}

#[derive(Debug, Clone)]
pub struct Tri {
    pub vertices: [usize; 3], // Indices into the vertex buffer, counter-clockwise from outside
    pub face: usize,          // Face group, also the material slot for per-face materials
    pub normal: Vec3,         // Model-space face normal
}

/// Indexed triangle mesh whose triangles are grouped into faces.
///
/// Face groups are numbered `0..face_count()` and are the contract between the
/// geometry and per-face materials: a mesh with N faces takes N colors.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub tris: Vec<Tri>,
    face_count: usize,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face_count(&self) -> usize {
        self.face_count
    }

    /// Axis-aligned cube centered on the origin.
    ///
    /// Faces: 0 = +x, 1 = -x, 2 = +y, 3 = -y, 4 = +z, 5 = -z.
    pub fn cube(edge: f32) -> Self {
        let h = edge * 0.5;
        let mut mesh = Mesh::new();
        #[rustfmt::skip]
        let quads = [
            [Vec3::new(h, -h, h),   Vec3::new(h, -h, -h),  Vec3::new(h, h, -h),  Vec3::new(h, h, h)],
            [Vec3::new(-h, -h, -h), Vec3::new(-h, -h, h),  Vec3::new(-h, h, h),  Vec3::new(-h, h, -h)],
            [Vec3::new(-h, h, h),   Vec3::new(h, h, h),    Vec3::new(h, h, -h),  Vec3::new(-h, h, -h)],
            [Vec3::new(-h, -h, -h), Vec3::new(h, -h, -h),  Vec3::new(h, -h, h),  Vec3::new(-h, -h, h)],
            [Vec3::new(-h, -h, h),  Vec3::new(h, -h, h),   Vec3::new(h, h, h),   Vec3::new(-h, h, h)],
            [Vec3::new(h, -h, -h),  Vec3::new(-h, -h, -h), Vec3::new(-h, h, -h), Vec3::new(h, h, -h)],
        ];
        for quad in quads {
            mesh.push_quad(quad, [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y]);
        }
        process::compute_face_normals(&mut mesh);
        mesh
    }

    /// Four-sided pyramid centered on the origin: square base of circumradius
    /// `edge / 2` at `y = -edge / 2`, apex at `y = edge / 2`.
    ///
    /// Faces: 0..=3 are the sides going around the apex, 4 is the base.
    pub fn pyramid(edge: f32) -> Self {
        let h = edge * 0.5;
        let radius = edge * 0.5;
        let corners: Vec<Vec3> = (0..4)
            .map(|i| {
                let theta = i as f32 * FRAC_PI_2;
                Vec3::new(radius * theta.sin(), -h, radius * theta.cos())
            })
            .collect();
        let apex = Vec3::new(0.0, h, 0.0);

        let mut mesh = Mesh::new();
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            mesh.push_tri(
                [a, b, apex],
                [Vec2::ZERO, Vec2::X, Vec2::new(0.5, 1.0)],
            );
        }

        let base_uv = |p: Vec3| Vec2::new(p.x / edge + 0.5, p.z / edge + 0.5);
        let base = [corners[0], corners[3], corners[2], corners[1]];
        mesh.push_quad(base, base.map(base_uv));

        process::compute_face_normals(&mut mesh);
        mesh
    }

    /// Appends one triangle as a new face group.
    fn push_tri(&mut self, corners: [Vec3; 3], uvs: [Vec2; 3]) {
        let first = self.vertices.len();
        for (pos, uv) in corners.into_iter().zip(uvs) {
            self.vertices.push(Vertex { pos, uv });
        }
        self.tris.push(Tri {
            vertices: [first, first + 1, first + 2],
            face: self.face_count,
            normal: Vec3::ZERO,
        });
        self.face_count += 1;
    }

    /// Appends a planar quad (counter-clockwise from outside) as one face group.
    fn push_quad(&mut self, corners: [Vec3; 4], uvs: [Vec2; 4]) {
        let first = self.vertices.len();
        for (pos, uv) in corners.into_iter().zip(uvs) {
            self.vertices.push(Vertex { pos, uv });
        }
        for offsets in [[0, 1, 2], [0, 2, 3]] {
            self.tris.push(Tri {
                vertices: offsets.map(|o| first + o),
                face: self.face_count,
                normal: Vec3::ZERO,
            });
        }
        self.face_count += 1;
    }
}
