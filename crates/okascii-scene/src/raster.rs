//! Software rasterizer producing a luminance buffer.

use glam::Vec3;

/// A luminance buffer with a depth buffer alongside.
///
/// Coordinates are in raster cells with the origin at the top-left. Screen
/// space points carry normalized device depth in `z`; smaller is closer.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    luma: Vec<f32>,
    depth: Vec<f32>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            luma: vec![0.0; width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.luma.resize(width * height, 0.0);
        self.depth.resize(width * height, f32::INFINITY);
        self.clear();
    }

    pub fn clear(&mut self) {
        self.luma.fill(0.0);
        self.depth.fill(f32::INFINITY);
    }

    /// Luminance at a cell, 0.0 outside the buffer.
    pub fn luma(&self, x: usize, y: usize) -> f32 {
        if x < self.width && y < self.height {
            self.luma[y * self.width + x]
        } else {
            0.0
        }
    }

    fn write(&mut self, x: usize, y: usize, z: f32, luma: f32) {
        let idx = y * self.width + x;
        if z < self.depth[idx] {
            self.depth[idx] = z;
            self.luma[idx] = luma;
        }
    }

    /// Plot a single point.
    pub fn plot(&mut self, p: Vec3, luma: f32) {
        if p.x < 0.0 || p.y < 0.0 {
            return;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        if x < self.width && y < self.height {
            self.write(x, y, p.z, luma);
        }
    }

    /// Draw a depth-tested line by sampling it once per cell step.
    ///
    /// The segment is clipped to the buffer first, so only the visible part
    /// is stepped.
    pub fn draw_line(&mut self, a: Vec3, b: Vec3, luma: f32) {
        let Some((a, b)) = self.clip(a, b) else {
            return;
        };
        let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            self.plot(a.lerp(b, i as f32 / steps as f32), luma);
        }
    }

    /// Liang-Barsky clip of a segment against `[0, width] x [0, height]`.
    fn clip(&self, a: Vec3, b: Vec3) -> Option<(Vec3, Vec3)> {
        let d = b - a;
        let (w, h) = (self.width as f32, self.height as f32);
        let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
        for (p, q) in [(-d.x, a.x), (d.x, w - a.x), (-d.y, a.y), (d.y, h - a.y)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }
        Some((a + d * t0, a + d * t1))
    }

    /// Fill a triangle of either winding, sampling cell centres.
    pub fn fill_triangle(&mut self, [a, b, c]: [Vec3; 3], luma: f32) {
        let area = edge(a, b, c.x, c.y);
        if area.abs() < f32::EPSILON {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as isize;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as isize;
        let max_x = (a.x.max(b.x).max(c.x).ceil() as isize).min(self.width as isize - 1);
        let max_y = (a.y.max(b.y).max(c.y).ceil() as isize).min(self.height as isize - 1);

        for y in min_y..=max_y {
            let py = y as f32 + 0.5;
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let w0 = edge(b, c, px, py) / area;
                let w1 = edge(c, a, px, py) / area;
                let w2 = edge(a, b, px, py) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let z = w0 * a.z + w1 * b.z + w2 * c.z;
                self.write(x as usize, y as usize, z, luma);
            }
        }
    }
}

/// Twice the signed area of the triangle `(a, b, p)`.
fn edge(a: Vec3, b: Vec3, px: f32, py: f32) -> f32 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}
