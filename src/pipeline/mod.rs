use crate::core::{Color, Scene};
use glam::Vec4;
use minifb::Window;

mod buffer;
mod clipper;
mod rasterizer;

pub use buffer::FrameBuffer;
pub use clipper::{ClipTriangle, ClipVertex, Clipper};
pub use rasterizer::Rasterizer;

/// Background every frame starts from.
pub const CLEAR_COLOR: Color = Color::WHITE;

/// Geometry -> raster -> fragment stages drawing a [`Scene`] into a [`FrameBuffer`].
pub struct Pipeline {
    pub width: usize,
    pub height: usize,
    buffer: FrameBuffer,
    clipper: Clipper,
    rasterizer: Rasterizer,
    geometry: Vec<ProcessedGeometry>,
    fragments: Vec<Fragment>,
}

impl Pipeline {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buffer: FrameBuffer::new(width, height),
            clipper: Clipper::new(),
            rasterizer: Rasterizer::new(width, height),
            geometry: Vec::with_capacity(1024),
            fragments: Vec::with_capacity(width * height),
        }
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn render_frame(&mut self, scene: &Scene) {
        self.buffer.clear(CLEAR_COLOR);
        self.process_geometry(scene);
        self.rasterizer
            .rasterize(&self.geometry, scene, &mut self.fragments);
        self.process_fragments();
    }

    pub fn present(&self, window: &mut Window) -> Result<(), minifb::Error> {
        self.buffer.present_window(window)
    }

    /// Transforms every triangle into clip space, lights it per face and clips it.
    fn process_geometry(&mut self, scene: &Scene) {
        self.geometry.clear();
        let view_proj = scene.camera.view_projection();
        let light = scene.light();

        for (entity_id, entity) in scene.entities.iter().enumerate() {
            let mvp = view_proj * entity.model_matrix();
            let orientation = entity.orientation();
            let mesh = &entity.mesh;

            for tri in &mesh.tris {
                let world_normal = (orientation * tri.normal).normalize_or_zero();
                let irradiance = light
                    .map(|l| l.irradiance(world_normal))
                    .unwrap_or(Color::BLACK);

                let clip = ClipTriangle {
                    vertices: tri.vertices.map(|i| {
                        let v = &mesh.vertices[i];
                        ClipVertex {
                            position: mvp * Vec4::from((v.pos, 1.0)),
                            uv: v.uv,
                        }
                    }),
                };

                self.geometry.extend(
                    self.clipper
                        .clip_triangle(&clip)
                        .into_iter()
                        .map(|t| ProcessedGeometry {
                            entity_id,
                            face: tri.face,
                            vertices: t.vertices,
                            irradiance,
                        }),
                );
            }
        }
    }

    fn process_fragments(&mut self) {
        for fragment in &self.fragments {
            self.buffer
                .set_pixel(fragment.screen_pos, fragment.depth, fragment.color);
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProcessedGeometry {
    /// Index into the Scene's entity buffer
    pub entity_id: usize,
    /// Face group of the source triangle, selects the material slot
    pub face: usize,
    /// Clipped vertices in clip space (MVP applied)
    pub vertices: [ClipVertex; 3],
    /// Light arriving at this face, multiplied into every fragment
    pub irradiance: Color,
}

#[derive(Clone, Debug)]
pub struct Fragment {
    pub screen_pos: (usize, usize),
    pub depth: f32,
    pub color: Color,
}
