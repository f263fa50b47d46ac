use crate::core::Scene;
use crate::pipeline::{Fragment, ProcessedGeometry};
use glam::Vec2;
use rayon::prelude::*;

pub struct Rasterizer {
    width: usize,
    height: usize,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Modifies the fragment buffer in place
    pub fn rasterize(
        &self,
        geometry: &[ProcessedGeometry],
        scene: &Scene,
        frags: &mut Vec<Fragment>,
    ) {
        frags.clear();
        frags.par_extend(
            geometry
                .par_iter()
                .flat_map_iter(|geo| self.rasterize_triangle(geo, scene)),
        );
        log::trace!(
            "Generated {} fragments from {} triangles",
            frags.len(),
            geometry.len()
        );
    }

    fn project_to_screen(&self, geo: &ProcessedGeometry) -> [ScreenVertex; 3] {
        geo.vertices.map(|v| {
            let inv_w = 1.0 / v.position.w;
            let ndc = v.position.truncate() * inv_w;
            ScreenVertex {
                pos: Vec2::new(
                    (ndc.x + 1.0) * 0.5 * self.width as f32,
                    (1.0 - ndc.y) * 0.5 * self.height as f32,
                ),
                depth: ndc.z,
                inv_w,
                uv_over_w: v.uv * inv_w,
            }
        })
    }

    /// Barycentric fill over the triangle's clamped bounding box, sampling at pixel centers.
    fn rasterize_triangle(&self, geo: &ProcessedGeometry, scene: &Scene) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        let Some(entity) = scene.entities.get(geo.entity_id) else {
            return fragments;
        };
        let verts = self.project_to_screen(geo);
        let (v0, v1, v2) = (verts[0].pos, verts[1].pos, verts[2].pos);

        let bbox_min = v0.min(v1).min(v2).max(Vec2::ZERO);
        let bbox_max = v0
            .max(v1)
            .max(v2)
            .min(Vec2::new(self.width as f32 - 1.0, self.height as f32 - 1.0));
        if bbox_min.x > bbox_max.x || bbox_min.y > bbox_max.y {
            return fragments;
        }

        for y in bbox_min.y as usize..=bbox_max.y as usize {
            for x in bbox_min.x as usize..=bbox_max.x as usize {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) = barycentric(p, v0, v1, v2) else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * verts[0].depth + w1 * verts[1].depth + w2 * verts[2].depth;
                let inv_w = w0 * verts[0].inv_w + w1 * verts[1].inv_w + w2 * verts[2].inv_w;
                let uv = (verts[0].uv_over_w * w0
                    + verts[1].uv_over_w * w1
                    + verts[2].uv_over_w * w2)
                    / inv_w;

                let base = entity.material.base_color(geo.face, uv);
                fragments.push(Fragment {
                    screen_pos: (x, y),
                    depth,
                    color: (base * geo.irradiance).clamped(),
                });
            }
        }

        fragments
    }
}

#[derive(Clone, Copy, Debug)]
struct ScreenVertex {
    pos: Vec2,
    depth: f32,
    inv_w: f32,
    uv_over_w: Vec2,
}

fn barycentric(p: Vec2, v0: Vec2, v1: Vec2, v2: Vec2) -> Option<(f32, f32, f32)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);
    if denom.abs() < 1e-10 {
        // Degenerate triangle
        return None;
    }
    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;
    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barycentric_weights_sum_to_one() {
        let (a, b, c) = (Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0));
        let (w0, w1, w2) = barycentric(Vec2::new(1.0, 1.0), a, b, c).unwrap();
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
        assert!((w1 - 0.25).abs() < 1e-6);
        assert!((w2 - 0.25).abs() < 1e-6);
    }

    #[test]
    fn barycentric_of_degenerate_is_none() {
        let p = Vec2::new(1.0, 1.0);
        assert!(barycentric(p, Vec2::ZERO, Vec2::ONE, Vec2::splat(2.0)).is_none());
    }
}
