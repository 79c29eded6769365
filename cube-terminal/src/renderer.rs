/// ASCII line rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use cube_core::Frame;
use nalgebra::Point3;
use std::io::Write;

use crate::layout::Viewport;

/// ASCII renderer that draws wireframes and text into a cell grid
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear_region(&mut self, region: Viewport) {
        for y in region.y..region.bottom().min(self.height) {
            for x in region.x..region.right().min(self.width) {
                let idx = y * self.width + x;
                self.depth_buffer[idx] = f32::INFINITY;
                self.char_buffer[idx] = ' ';
                self.color_buffer[idx] = Color::Reset;
            }
        }
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Write `text` starting at a cell, cut off at the right edge
    pub fn put_str(&mut self, x: usize, y: usize, text: &str, color: Color) {
        if y >= self.height {
            return;
        }
        for (offset, c) in text.chars().enumerate() {
            let col = x + offset;
            if col >= self.width {
                break;
            }
            let idx = y * self.width + col;
            self.char_buffer[idx] = c;
            self.color_buffer[idx] = color;
            self.depth_buffer[idx] = f32::NEG_INFINITY;
        }
    }

    /// Project every edge of the frame's wireframe into `region`
    pub fn draw_wireframe(&mut self, region: Viewport, frame: &Frame<'_>) {
        let [r, g, b] = frame.color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        let color = Color::Rgb { r, g, b };

        for (from, to) in frame.wireframe.segments() {
            let project = |p: Point3<f32>| {
                frame
                    .camera
                    .project_to_screen(&p, &frame.model, region.width as u32, region.height as u32)
            };
            if let (Some(start), Some(end)) = (project(from), project(to)) {
                self.draw_line(region, start, end, color);
            }
        }
    }

    fn draw_line(&mut self, region: Viewport, a: (f32, f32, f32), b: (f32, f32, f32), color: Color) {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let character = line_char(dx, dy);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = a.0 + dx * t;
            let y = a.1 + dy * t;
            let depth = a.2 + (b.2 - a.2) * t;

            if x < 0.0 || y < 0.0 || x >= region.width as f32 || y >= region.height as f32 {
                continue;
            }
            let col = region.x + x as usize;
            let row = region.y + y as usize;
            if col >= self.width || row >= self.height {
                continue;
            }

            let idx = row * self.width + col;
            if depth < self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.char_buffer[idx] = character;
                self.color_buffer[idx] = color;
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick the glyph closest to a line's on-screen slope
///
/// Cells are about twice as tall as wide, so vertical distance counts double.
fn line_char(dx: f32, dy: f32) -> char {
    let horizontal = dx.abs();
    let vertical = dy.abs() * 2.0;

    if horizontal > vertical * 2.0 {
        '-'
    } else if vertical > horizontal * 2.0 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::{SurfaceConfig, SurfaceScene};

    #[test]
    fn test_line_chars() {
        assert_eq!(line_char(10.0, 0.0), '-');
        assert_eq!(line_char(0.0, 5.0), '|');
        assert_eq!(line_char(4.0, 2.0), '\\');
        assert_eq!(line_char(4.0, -2.0), '/');
    }

    #[test]
    fn test_put_str_clips_at_edge() {
        let mut renderer = AsciiRenderer::new(5, 2);
        renderer.put_str(3, 1, "abc", Color::White);
        assert_eq!(renderer.char_at(3, 1), Some('a'));
        assert_eq!(renderer.char_at(4, 1), Some('b'));
        assert_eq!(renderer.char_at(5, 1), None);
    }

    #[test]
    fn test_wireframe_stays_in_region() {
        let scene = SurfaceScene::new(SurfaceConfig::default()).unwrap();
        let mut renderer = AsciiRenderer::new(60, 20);
        let region = Viewport::new(10, 2, 20, 10);

        renderer.draw_wireframe(region, &scene.frame());

        let mut drawn = 0;
        for y in 0..20 {
            for x in 0..60 {
                if renderer.char_at(x, y) != Some(' ') {
                    assert!(region.contains(x, y), "stray cell at {x},{y}");
                    drawn += 1;
                }
            }
        }
        assert!(drawn > 0);

        renderer.clear_region(region);
        assert!((0..20).all(|y| (0..60).all(|x| renderer.char_at(x, y) == Some(' '))));
    }
}
