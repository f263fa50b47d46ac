use crate::core::Color;
use glam::Vec2;
use std::path::Path;
use std::sync::Arc;

/// Represents a loaded texture with sampling capabilities
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub data: Arc<Vec<Color>>,
    pub path: String,
}

impl Texture {
    /// Load a texture from a file path
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let img = image::open(path)
            .map_err(|e| format!("Failed to load texture '{}': {}", path.display(), e))?;

        let rgb_img = img.to_rgb8();
        let (width, height) = rgb_img.dimensions();
        if width == 0 || height == 0 {
            return Err(format!("Texture '{}' has no pixels", path.display()));
        }

        let color_data = rgb_img
            .pixels()
            .map(|pixel| Color::from_rgb8(pixel[0], pixel[1], pixel[2]))
            .collect();

        Ok(Texture {
            width,
            height,
            data: Arc::new(color_data),
            path: path.display().to_string(),
        })
    }

    /// Loads `path`, falling back to [`Texture::checkerboard`] when the file is
    /// missing or unreadable so textured objects stay visible.
    pub fn load_or_placeholder(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(texture) => {
                log::info!(
                    "Loaded texture {} ({}x{})",
                    texture.path,
                    texture.width,
                    texture.height
                );
                texture
            }
            Err(e) => {
                log::warn!("{}; using placeholder texture", e);
                Self::checkerboard(8, Color::WHITE, Color::GRAY)
            }
        }
    }

    /// Square `cells`x`cells` checker pattern, one texel per cell.
    pub fn checkerboard(cells: u32, a: Color, b: Color) -> Self {
        let cells = cells.max(1);
        let data = (0..cells * cells)
            .map(|i| {
                let (x, y) = (i % cells, i / cells);
                if (x + y) % 2 == 0 {
                    a
                } else {
                    b
                }
            })
            .collect();
        Texture {
            width: cells,
            height: cells,
            data: Arc::new(data),
            path: "placeholder_checkerboard".to_string(),
        }
    }

    /// Sample the texture at UV coordinates using bilinear filtering
    pub fn sample(&self, uv: Vec2) -> Color {
        // v runs bottom to top, image rows top to bottom
        let u = wrap_uv(uv.x);
        let v = wrap_uv(1.0 - uv.y);
        self.sample_bilinear(u, v)
    }

    fn sample_bilinear(&self, u: f32, v: f32) -> Color {
        let x_f = u * (self.width - 1) as f32;
        let y_f = v * (self.height - 1) as f32;

        let x0 = x_f.floor() as u32;
        let y0 = y_f.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let dx = x_f - x0 as f32;
        let dy = y_f - y0 as f32;

        let c00 = self.data[(y0 * self.width + x0) as usize];
        let c10 = self.data[(y0 * self.width + x1) as usize];
        let c01 = self.data[(y1 * self.width + x0) as usize];
        let c11 = self.data[(y1 * self.width + x1) as usize];

        let c0 = c00.lerp(&c10, dx);
        let c1 = c01.lerp(&c11, dx);
        c0.lerp(&c1, dy)
    }
}

fn wrap_uv(value: f32) -> f32 {
    value.rem_euclid(1.0)
}
