use glam::{Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipVertex {
    pub position: Vec4,
    pub uv: Vec2,
}

impl ClipVertex {
    pub fn lerp(&self, other: &ClipVertex, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            uv: self.uv.lerp(other.uv, t),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ClipTriangle {
    pub vertices: [ClipVertex; 3],
}

/// The six view-frustum planes in clip space, as `dot(plane, position) >= 0`.
const FRUSTUM_PLANES: [Vec4; 6] = [
    Vec4::new(1.0, 0.0, 0.0, 1.0),  // left:   x >= -w
    Vec4::new(-1.0, 0.0, 0.0, 1.0), // right:  x <=  w
    Vec4::new(0.0, 1.0, 0.0, 1.0),  // bottom: y >= -w
    Vec4::new(0.0, -1.0, 0.0, 1.0), // top:    y <=  w
    Vec4::new(0.0, 0.0, 1.0, 1.0),  // near:   z >= -w
    Vec4::new(0.0, 0.0, -1.0, 1.0), // far:    z <=  w
];

pub struct Clipper;

impl Clipper {
    pub fn new() -> Self {
        Self
    }

    /// Clips against the view frustum, then drops degenerate and back-facing pieces.
    pub fn clip_triangle(&self, triangle: &ClipTriangle) -> Vec<ClipTriangle> {
        let mut triangles = vec![*triangle];

        for plane in FRUSTUM_PLANES {
            triangles = self.clip_against_plane(triangles, plane);
            if triangles.is_empty() {
                return triangles;
            }
        }

        triangles.retain(|t| !self.is_degenerate(t) && self.is_front_facing(t));
        triangles
    }

    fn is_degenerate(&self, triangle: &ClipTriangle) -> bool {
        let epsilon = 1e-12;
        (0..3).any(|i| {
            let j = (i + 1) % 3;
            let diff = triangle.vertices[i].position - triangle.vertices[j].position;
            diff.length_squared() < epsilon
        })
    }

    /// Counter-clockwise in NDC means facing the camera; everything else is culled. Only valid once the
    /// triangle is clipped, since every `w` is then positive.
    fn is_front_facing(&self, tri: &ClipTriangle) -> bool {
        let ndc = tri.vertices.map(|v| v.position.truncate() / v.position.w);
        let normal: Vec3 = (ndc[1] - ndc[0]).cross(ndc[2] - ndc[0]);
        normal.z > 0.0
    }

    fn clip_against_plane(&self, triangles: Vec<ClipTriangle>, plane: Vec4) -> Vec<ClipTriangle> {
        let mut result = Vec::with_capacity(triangles.len());

        for triangle in triangles {
            let distances = triangle.vertices.map(|v| plane.dot(v.position));
            let inside_count = distances.iter().filter(|&&d| d >= 0.0).count();

            match inside_count {
                0 => continue,
                3 => result.push(triangle),
                _ => result.extend(self.clip_triangle_against_plane(&triangle, distances)),
            }
        }

        result
    }

    /// Sutherland–Hodgman on a single triangle, fanning the resulting polygon.
    fn clip_triangle_against_plane(
        &self,
        triangle: &ClipTriangle,
        distances: [f32; 3],
    ) -> Vec<ClipTriangle> {
        let mut new_verts: Vec<ClipVertex> = Vec::with_capacity(4);
        for i in 0..3 {
            let j = (i + 1) % 3;

            let v0 = &triangle.vertices[i];
            let v1 = &triangle.vertices[j];
            let d0 = distances[i];
            let d1 = distances[j];

            if d0 >= 0.0 {
                new_verts.push(*v0);
            }

            if (d0 < 0.0) != (d1 < 0.0) {
                let t = d0 / (d0 - d1);
                new_verts.push(v0.lerp(v1, t));
            }
        }

        (1..new_verts.len().saturating_sub(1))
            .map(|i| ClipTriangle {
                vertices: [new_verts[0], new_verts[i], new_verts[i + 1]],
            })
            .collect()
    }
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(points: [Vec4; 3]) -> ClipTriangle {
        ClipTriangle {
            vertices: points.map(|position| ClipVertex {
                position,
                uv: Vec2::ZERO,
            }),
        }
    }

    #[test]
    fn inside_front_facing_triangle_passes_untouched() {
        let t = tri([
            Vec4::new(-0.5, -0.5, 0.0, 1.0),
            Vec4::new(0.5, -0.5, 0.0, 1.0),
            Vec4::new(0.0, 0.5, 0.0, 1.0),
        ]);
        let out = Clipper::new().clip_triangle(&t);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].vertices, t.vertices);
    }

    #[test]
    fn back_facing_triangle_is_culled() {
        let t = tri([
            Vec4::new(-0.5, -0.5, 0.0, 1.0),
            Vec4::new(0.0, 0.5, 0.0, 1.0),
            Vec4::new(0.5, -0.5, 0.0, 1.0),
        ]);
        assert!(Clipper::new().clip_triangle(&t).is_empty());
    }

    #[test]
    fn triangle_behind_near_plane_is_dropped() {
        let t = tri([
            Vec4::new(-0.5, -0.5, -2.0, 1.0),
            Vec4::new(0.5, -0.5, -2.0, 1.0),
            Vec4::new(0.0, 0.5, -2.0, 1.0),
        ]);
        assert!(Clipper::new().clip_triangle(&t).is_empty());
    }

    #[test]
    fn straddling_triangle_is_cut_to_the_frustum() {
        let t = tri([
            Vec4::new(-0.5, -0.5, 0.0, 1.0),
            Vec4::new(3.0, -0.5, 0.0, 1.0),
            Vec4::new(0.0, 0.5, 0.0, 1.0),
        ]);
        let out = Clipper::new().clip_triangle(&t);
        assert!(!out.is_empty());
        for piece in &out {
            for v in piece.vertices {
                assert!(v.position.x <= v.position.w + 1e-5);
            }
        }
    }
}
