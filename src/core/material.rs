use std::fmt::{Display, Formatter};
use std::sync::Arc;

use glam::Vec2;
use rand::Rng;

use crate::core::{Color, Texture};

/// Probability of picking the shared texture over per-face colors.
pub const TEXTURED_PROBABILITY: f64 = 0.5;

/// Surface appearance of one object.
#[derive(Debug, Clone)]
pub enum Material {
    /// One texture applied to every face.
    Textured(Arc<Texture>),
    /// One solid color per face group, in face-index order.
    FaceColors(Vec<Color>),
}

impl Material {
    /// Either the shared texture or `face_count` random colors, with equal odds.
    pub fn select<R: Rng + ?Sized>(rng: &mut R, face_count: usize, texture: &Arc<Texture>) -> Self {
        if rng.gen::<f64>() < TEXTURED_PROBABILITY {
            Material::Textured(Arc::clone(texture))
        } else {
            Material::FaceColors(
                (0..face_count)
                    .map(|_| Color::new(rng.gen(), rng.gen(), rng.gen()))
                    .collect(),
            )
        }
    }

    /// Unlit surface color of `face` at texture coordinate `uv`.
    pub fn base_color(&self, face: usize, uv: Vec2) -> Color {
        match self {
            Material::Textured(texture) => texture.sample(uv),
            Material::FaceColors(colors) => colors.get(face).copied().unwrap_or(Color::WHITE),
        }
    }

    pub fn is_textured(&self) -> bool {
        matches!(self, Material::Textured(_))
    }
}

impl Display for Material {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Material::Textured(texture) => write!(f, "Textured({})", texture.path),
            Material::FaceColors(colors) => {
                write!(f, "FaceColors[")?;
                for (i, c) in colors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "#{}", c.to_hex())?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn texture() -> Arc<Texture> {
        Arc::new(Texture::checkerboard(2, Color::WHITE, Color::BLACK))
    }

    #[test]
    fn multi_color_has_one_entry_per_face() {
        let mut rng = StdRng::seed_from_u64(7);
        let tex = texture();
        for face_count in [5, 6] {
            for _ in 0..200 {
                if let Material::FaceColors(colors) = Material::select(&mut rng, face_count, &tex) {
                    assert_eq!(colors.len(), face_count);
                    for c in colors {
                        for ch in [c.r, c.g, c.b] {
                            assert!((0.0..1.0).contains(&ch));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn textured_and_colored_split_evenly() {
        let mut rng = StdRng::seed_from_u64(42);
        let tex = texture();
        let trials = 10_000;
        let textured = (0..trials)
            .filter(|_| Material::select(&mut rng, 6, &tex).is_textured())
            .count();
        let ratio = textured as f64 / trials as f64;
        assert!((0.47..0.53).contains(&ratio), "textured ratio {}", ratio);
    }

    #[test]
    fn textured_material_shares_the_texture() {
        let mut rng = StdRng::seed_from_u64(1);
        let tex = texture();
        let shared = (0..50)
            .map(|_| Material::select(&mut rng, 6, &tex))
            .filter_map(|m| match m {
                Material::Textured(t) => Some(t),
                Material::FaceColors(_) => None,
            })
            .all(|t| Arc::ptr_eq(&t, &tex));
        assert!(shared);
    }

    #[test]
    fn face_colors_are_looked_up_by_face_index() {
        let m = Material::FaceColors(vec![Color::RED, Color::GREEN, Color::BLUE]);
        assert_eq!(m.base_color(1, Vec2::ZERO), Color::GREEN);
        assert_eq!(m.to_string(), "FaceColors[#ff0000, #00ff00, #0000ff]");
    }
}
