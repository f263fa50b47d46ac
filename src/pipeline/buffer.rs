use crate::core::Color;
use minifb::Window;
use rayon::slice::ParallelSliceMut;
use rayon::iter::ParallelIterator;

/// Color + depth target the rasterizer writes into, in minifb's 0x00RRGGBB layout.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    pub depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let buf_size = width * height;
        FrameBuffer {
            width,
            height,
            data: vec![0; buf_size],
            depth: vec![f32::INFINITY; buf_size],
        }
    }

    pub fn clear(&mut self, color: Color) {
        let clear = color.to_u32();
        self.data.par_chunks_mut(1024).for_each(|chunk| chunk.fill(clear));
        self.depth
            .par_chunks_mut(1024)
            .for_each(|chunk| chunk.fill(f32::INFINITY));
    }

    /// Writes `color` if `depth` is closer than what the pixel already holds.
    pub fn set_pixel(&mut self, pos: (usize, usize), depth: f32, color: Color) {
        if pos.0 < self.width && pos.1 < self.height {
            let index = pos.0 + pos.1 * self.width;
            if depth < self.depth[index] {
                self.data[index] = color.to_u32();
                self.depth[index] = depth;
            }
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.data[x + y * self.width])
    }

    pub fn present_window(&self, window: &mut Window) -> Result<(), minifb::Error> {
        window.update_with_buffer(&self.data, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_keeps_nearest() {
        let mut buf = FrameBuffer::new(4, 4);
        buf.clear(Color::WHITE);
        buf.set_pixel((1, 2), 0.5, Color::RED);
        buf.set_pixel((1, 2), 0.8, Color::BLUE);
        assert_eq!(buf.pixel(1, 2), Some(Color::RED.to_u32()));
        buf.set_pixel((1, 2), 0.1, Color::GREEN);
        assert_eq!(buf.pixel(1, 2), Some(Color::GREEN.to_u32()));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut buf = FrameBuffer::new(2, 2);
        buf.clear(Color::WHITE);
        buf.set_pixel((5, 0), 0.0, Color::RED);
        assert!(buf.data.iter().all(|&p| p == Color::WHITE.to_u32()));
        assert_eq!(buf.pixel(2, 0), None);
    }

    #[test]
    fn clear_resets_depth() {
        let mut buf = FrameBuffer::new(2, 2);
        buf.set_pixel((0, 0), 0.3, Color::RED);
        buf.clear(Color::BLACK);
        assert_eq!(buf.pixel(0, 0), Some(0));
        assert!(buf.depth.iter().all(|d| d.is_infinite()));
    }
}
