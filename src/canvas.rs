use std::fmt;
use std::sync::Arc;

use egui::{Color32, ColorImage, Pos2};
use image::{Rgba, RgbaImage};

pub const BACKGROUND: Color32 = Color32::WHITE;

/// Saved copy of the canvas pixels, taken before a shape preview and restored on every move.
///
/// Cloning is cheap; the pixel buffer is shared.
#[derive(Clone)]
pub struct Snapshot(Arc<RgbaImage>);

impl Snapshot {
    pub fn new(pixels: RgbaImage) -> Self {
        Self(Arc::new(pixels))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.0
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("size", &format!("{}x{}", self.width(), self.height()))
            .finish()
    }
}

/// Stamp shape used when laying down a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nib {
    Round,
    Square,
}

/// The raster surface the tools paint into.
pub struct Canvas {
    pixels: RgbaImage,
    /// Bumped on every pixel change so the texture upload can be skipped when nothing changed
    version: u64,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("size", &format!("{}x{}", self.width(), self.height()))
            .field("version", &self.version)
            .finish()
    }
}

fn rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, rgba(BACKGROUND)),
            version: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        (x < self.width() && y < self.height()).then(|| {
            let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
            Color32::from_rgba_unmultiplied(r, g, b, a)
        })
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Grows or shrinks the canvas, keeping the overlapping top-left pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width() && height == self.height() {
            return;
        }
        let mut resized = RgbaImage::from_pixel(width, height, rgba(BACKGROUND));
        for (x, y, pixel) in self.pixels.enumerate_pixels() {
            if x < width && y < height {
                resized.put_pixel(x, y, *pixel);
            }
        }
        self.pixels = resized;
        self.touch();
    }

    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = rgba(BACKGROUND);
        }
        self.touch();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.pixels.clone())
    }

    /// Puts the snapshot's pixels back. A snapshot of a different size is
    /// copied into the overlapping region only.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.width() == self.width() && snapshot.height() == self.height() {
            self.pixels.clone_from(snapshot.pixels());
        } else {
            log::warn!(
                "Restoring {}x{} snapshot onto {}x{} canvas",
                snapshot.width(),
                snapshot.height(),
                self.width(),
                self.height()
            );
            self.pixels = RgbaImage::from_pixel(self.width(), self.height(), rgba(BACKGROUND));
            for (x, y, pixel) in snapshot.pixels().enumerate_pixels() {
                if x < self.width() && y < self.height() {
                    self.pixels.put_pixel(x, y, *pixel);
                }
            }
        }
        self.touch();
    }

    fn stamp(&mut self, center: Pos2, size: f32, nib: Nib, color: Rgba<u8>) {
        let radius = (size / 2.0).max(0.5);
        let min_x = (center.x - radius).floor().max(0.0) as i64;
        let min_y = (center.y - radius).floor().max(0.0) as i64;
        let max_x = ((center.x + radius).ceil() as i64).min(self.width() as i64 - 1);
        let max_y = ((center.y + radius).ceil() as i64).min(self.height() as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let inside = match nib {
                    Nib::Round => dx * dx + dy * dy <= radius * radius,
                    Nib::Square => dx.abs() <= radius && dy.abs() <= radius,
                };
                if inside {
                    self.pixels.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    fn stamp_line(&mut self, from: Pos2, to: Pos2, size: f32, nib: Nib, color: Rgba<u8>) {
        let distance = from.distance(to);
        // Half a nib apart keeps the stroke continuous without overdrawing too much
        let spacing = (size / 4.0).max(0.5);
        let steps = (distance / spacing).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(from.lerp(to, t), size, nib, color);
        }
    }

    /// Paints a stroke segment from `from` to `to`.
    pub fn draw_segment(&mut self, from: Pos2, to: Pos2, size: f32, nib: Nib, color: Color32) {
        self.stamp_line(from, to, size, nib, rgba(color));
        self.touch();
    }

    /// Paints the segment with the background color.
    pub fn erase_segment(&mut self, from: Pos2, to: Pos2, size: f32) {
        self.stamp_line(from, to, size, Nib::Round, rgba(BACKGROUND));
        self.touch();
    }

    /// Outlines the axis-aligned rectangle spanned by two corners.
    pub fn draw_rectangle(&mut self, corner: Pos2, opposite: Pos2, size: f32, color: Color32) {
        let color = rgba(color);
        let top_right = Pos2::new(opposite.x, corner.y);
        let bottom_left = Pos2::new(corner.x, opposite.y);
        self.stamp_line(corner, top_right, size, Nib::Square, color);
        self.stamp_line(top_right, opposite, size, Nib::Square, color);
        self.stamp_line(opposite, bottom_left, size, Nib::Square, color);
        self.stamp_line(bottom_left, corner, size, Nib::Square, color);
        self.touch();
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_new_canvas_is_blank() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.pixel(0, 0), Some(BACKGROUND));
        assert_eq!(canvas.pixel(3, 2), Some(BACKGROUND));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_segment_paints_along_line() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw_segment(pos2(2.0, 10.0), pos2(18.0, 10.0), 2.0, Nib::Round, Color32::RED);

        assert_eq!(canvas.pixel(10, 9), Some(Color32::RED));
        assert_eq!(canvas.pixel(10, 0), Some(BACKGROUND));
    }

    #[test]
    fn test_erase_restores_background() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw_segment(pos2(0.0, 5.0), pos2(20.0, 5.0), 4.0, Nib::Square, Color32::BLACK);
        assert_eq!(canvas.pixel(10, 5), Some(Color32::BLACK));

        canvas.erase_segment(pos2(0.0, 5.0), pos2(20.0, 5.0), 8.0);
        assert_eq!(canvas.pixel(10, 5), Some(BACKGROUND));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut canvas = Canvas::new(16, 16);
        let snapshot = canvas.snapshot();

        canvas.draw_rectangle(pos2(2.0, 2.0), pos2(12.0, 12.0), 1.0, Color32::BLUE);
        assert_eq!(canvas.pixel(7, 2), Some(Color32::BLUE));

        canvas.restore(&snapshot);
        assert_eq!(canvas.pixel(7, 2), Some(BACKGROUND));
        assert_eq!(canvas.snapshot(), snapshot);
    }

    #[test]
    fn test_stamp_clips_to_bounds() {
        let mut canvas = Canvas::new(8, 8);
        canvas.draw_segment(pos2(-5.0, -5.0), pos2(0.0, 0.0), 6.0, Nib::Round, Color32::GREEN);
        assert_eq!(canvas.pixel(0, 0), Some(Color32::GREEN));
    }

    #[test]
    fn test_resize_keeps_overlap() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_segment(pos2(1.0, 1.0), pos2(1.0, 1.0), 2.0, Nib::Square, Color32::RED);
        let before = canvas.version();

        canvas.resize(4, 30);
        assert_eq!((canvas.width(), canvas.height()), (4, 30));
        assert_eq!(canvas.pixel(1, 1), Some(Color32::RED));
        assert_eq!(canvas.pixel(1, 20), Some(BACKGROUND));
        assert!(canvas.version() > before);
    }
}
