use crate::color::Color;
use std::f64::consts::PI;

/// Logical width of the drawing surface
pub const CANVAS_WIDTH: usize = 800;
/// Logical height of the drawing surface
pub const CANVAS_HEIGHT: usize = 300;

/// Lines reaching further than this from the origin are not rasterized
const MAX_COORD: f64 = 1.0e5;
/// Upper bound on the polyline used to approximate a circle
const MAX_CIRCLE_SEGMENTS: usize = 4 * (CANVAS_WIDTH + CANVAS_HEIGHT);

/// Line color and thickness; weights below 1.0 are drawn as partial coverage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub weight: f64,
}

impl Stroke {
    pub fn new(color: Color, weight: f64) -> Self {
        Stroke { color, weight }
    }
}

/// Where a text label's position sits relative to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Center,
    TopLeft,
}

/// Text queued on the surface; the presenter decides how to rasterize it
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: Color,
    pub size: f64,
    pub anchor: TextAnchor,
}

/// RGBA pixel buffer plus a text layer
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixel_data: Vec<u8>,
    labels: Vec<TextLabel>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            pixel_data: vec![0u8; width * height * 4],
            labels: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_data(&self) -> &[u8] {
        &self.pixel_data
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Color of the pixel at (x, y), or `None` outside the surface
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 4;
        Some(Color {
            r: self.pixel_data[offset],
            g: self.pixel_data[offset + 1],
            b: self.pixel_data[offset + 2],
            a: self.pixel_data[offset + 3],
        })
    }

    /// Fills every pixel and drops all queued text
    pub fn background(&mut self, color: Color) {
        let (r, g, b, a) = color.as_rgba8();
        for chunk in self.pixel_data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[r, g, b, a]);
        }
        self.labels.clear();
    }

    fn plot(&mut self, x: isize, y: isize, stroke: &Stroke) {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return;
        }
        let offset = (y as usize * self.width + x as usize) * 4;
        let color = if stroke.weight >= 1.0 {
            stroke.color
        } else {
            let base = Color {
                r: self.pixel_data[offset],
                g: self.pixel_data[offset + 1],
                b: self.pixel_data[offset + 2],
                a: self.pixel_data[offset + 3],
            };
            stroke.color.blend_over(base, stroke.weight)
        };
        let (r, g, b, a) = color.as_rgba8();
        self.pixel_data[offset] = r;
        self.pixel_data[offset + 1] = g;
        self.pixel_data[offset + 2] = b;
        self.pixel_data[offset + 3] = a;
    }

    /// Draws a line between two points using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, stroke: &Stroke) {
        if stroke.weight <= 0.0 || ![x0, y0, x1, y1].iter().all(|v| v.abs() <= MAX_COORD) {
            return;
        }
        let (mut x0, mut y0, x1, y1) = (
            x0.round() as isize,
            y0.round() as isize,
            x1.round() as isize,
            y1.round() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        loop {
            self.plot(x0, y0, stroke);

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Outline of an axis-aligned rectangle
    pub fn draw_rect(&mut self, left: f64, top: f64, width: f64, height: f64, stroke: &Stroke) {
        let right = left + width - 1.0;
        let bottom = top + height - 1.0;
        self.draw_line(left, top, right, top, stroke);
        self.draw_line(right, top, right, bottom, stroke);
        self.draw_line(right, bottom, left, bottom, stroke);
        self.draw_line(left, bottom, left, top, stroke);
    }

    /// Outline of a circle given its center and diameter
    pub fn draw_circle(&mut self, cx: f64, cy: f64, diameter: f64, stroke: &Stroke) {
        let r = diameter.abs() / 2.0;
        if ![cx - r, cx + r, cy - r, cy + r].iter().all(|v| v.abs() <= MAX_COORD) {
            return;
        }
        let segments = ((PI * diameter.abs()).ceil() as usize)
            .clamp(16, MAX_CIRCLE_SEGMENTS)
            .next_multiple_of(4);
        let points: Vec<[f64; 2]> = (0..=segments)
            .map(|i| {
                let t = 2.0 * PI * i as f64 / segments as f64;
                [cx + r * t.cos(), cy + r * t.sin()]
            })
            .collect();
        self.draw_polyline(&points, stroke);
    }

    /// Connects consecutive points as an open path
    pub fn draw_polyline(&mut self, points: &[[f64; 2]], stroke: &Stroke) {
        for pair in points.windows(2) {
            self.draw_line(pair[0][0], pair[0][1], pair[1][0], pair[1][1], stroke);
        }
    }

    pub fn draw_text(&mut self, label: TextLabel) {
        self.labels.push(label);
    }
}
