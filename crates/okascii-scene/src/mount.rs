//! The terminal region a backdrop renders into.
//!
//! A [`MountPoint`] plays the part of a sized page container: it knows its
//! size in pixels and holds the glyph layers attached by post effects. Each
//! layer is painted on top of the previous ones.

use okascii_core::{AsciiStyle, Rgb};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Nominal width of one terminal cell in surface pixels.
pub const CELL_WIDTH_PX: u32 = 8;

/// Nominal height of one terminal cell in surface pixels.
pub const CELL_HEIGHT_PX: u32 = 16;

/// Period of the scanline sweep.
const SCANLINE_PERIOD_MS: u64 = 8000;

/// Brightness of the rows dimmed by scanlines.
const SCANLINE_DIM: f32 = 0.6;

/// Handle to a layer attached to a [`MountPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

/// Row-major grid of glyphs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphGrid {
    cols: usize,
    rows: usize,
    glyphs: Vec<char>,
}

impl GlyphGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            glyphs: vec![' '; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.glyphs[row * self.cols + col])
    }

    pub fn set(&mut self, col: usize, row: usize, glyph: char) {
        if col < self.cols && row < self.rows {
            self.glyphs[row * self.cols + col] = glyph;
        }
    }

    /// One string per row.
    pub fn lines(&self) -> Vec<String> {
        self.glyphs
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().collect())
            .collect()
    }

    /// Nearest-neighbour sample for a `width x height` cell area.
    fn sample(&self, x: u16, y: u16, width: u16, height: u16) -> char {
        if self.cols == 0 || self.rows == 0 {
            return ' ';
        }
        let col = x as usize * self.cols / width.max(1) as usize;
        let row = y as usize * self.rows / height.max(1) as usize;
        self.get(col, row).unwrap_or(' ')
    }
}

/// How a layer is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStyle {
    pub color: Rgb,
    pub opacity: f32,
    pub transparent_background: bool,
    pub offset: (u16, u16),
    pub scanlines: bool,
}

impl From<&AsciiStyle> for LayerStyle {
    fn from(style: &AsciiStyle) -> Self {
        Self {
            color: style.color,
            opacity: style.opacity,
            transparent_background: style.transparent_background,
            offset: style.offset,
            scanlines: style.scanlines,
        }
    }
}

/// A glyph layer attached to a mount point.
#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    pub style: LayerStyle,
    grid: GlyphGrid,
    elapsed_ms: u64,
}

impl Layer {
    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn grid(&self) -> &GlyphGrid {
        &self.grid
    }

    /// Replace the glyphs shown by this layer.
    pub fn present(&mut self, grid: GlyphGrid, elapsed_ms: u64) {
        self.grid = grid;
        self.elapsed_ms = elapsed_ms;
    }

    fn row_style(&self, row: u16, height: u16) -> Style {
        let mut factor = self.style.opacity;
        let mut style = Style::new();
        if self.style.scanlines {
            let sweep = (self.elapsed_ms % SCANLINE_PERIOD_MS) * height as u64 / SCANLINE_PERIOD_MS;
            if row as u64 == sweep {
                factor = 1.0;
                style = style.add_modifier(Modifier::BOLD);
            } else if row % 3 == 0 {
                factor *= SCANLINE_DIM;
            }
        }
        style.fg(self.style.color.faded(factor).into())
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let (dx, dy) = self.style.offset;
        let area = Rect::new(
            area.x.saturating_add(dx),
            area.y.saturating_add(dy),
            area.width.saturating_sub(dx),
            area.height.saturating_sub(dy),
        )
        .intersection(frame.area());
        if area.is_empty() {
            return;
        }

        let blank = if self.style.transparent_background {
            Span::raw(" ")
        } else {
            Span::styled(" ", Style::new().bg(Color::Black))
        };

        let lines: Vec<Line> = (0..area.height)
            .map(|y| {
                let style = self.row_style(y, area.height);
                let style = if self.style.transparent_background {
                    style
                } else {
                    style.bg(Color::Black)
                };
                let spans: Vec<Span> = (0..area.width)
                    .map(|x| match self.grid.sample(x, y, area.width, area.height) {
                        ' ' => blank.clone(),
                        ch => Span::styled(ch.to_string(), style),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// A sized surface that glyph layers are attached to.
#[derive(Debug, Default)]
pub struct MountPoint {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    next_id: u64,
}

impl MountPoint {
    /// A surface of `width x height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// A surface covering `cols x rows` terminal cells.
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        let (width, height) = cells_to_pixels(cols, rows);
        Self::new(width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether a scene can be built on this surface yet.
    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Insert a new, empty layer on top.
    pub fn attach(&mut self, style: LayerStyle) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push(Layer {
            id,
            style,
            grid: GlyphGrid::default(),
            elapsed_ms: 0,
        });
        id
    }

    /// Remove a layer. Returns `false` if it was not attached.
    pub fn detach(&mut self, id: LayerId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        self.layers.len() != before
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    /// Paint every layer into `area`, bottom first.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        for layer in &self.layers {
            layer.render(frame, area);
        }
    }
}

/// Surface size in pixels for a block of terminal cells.
pub fn cells_to_pixels(cols: u16, rows: u16) -> (u32, u32) {
    (cols as u32 * CELL_WIDTH_PX, rows as u32 * CELL_HEIGHT_PX)
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn style() -> LayerStyle {
        LayerStyle::from(&AsciiStyle::default())
    }

    fn grid(rows: &[&str]) -> GlyphGrid {
        let cols = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut grid = GlyphGrid::new(cols, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                grid.set(x, y, ch);
            }
        }
        grid
    }

    #[test]
    fn test_attach_and_detach() {
        let mut mount = MountPoint::from_cells(10, 4);
        assert_eq!((mount.width(), mount.height()), (80, 64));

        let first = mount.attach(style());
        let second = mount.attach(style());
        assert_ne!(first, second);
        assert_eq!(mount.layer_count(), 2);

        assert!(mount.detach(first));
        assert!(!mount.detach(first));
        assert_eq!(mount.layer_count(), 1);
        assert!(mount.layer(second).is_some());
    }

    #[test]
    fn test_not_ready_without_area() {
        assert!(!MountPoint::new(0, 100).is_ready());
        assert!(MountPoint::new(1, 1).is_ready());
    }

    #[test]
    fn test_grid_lines() {
        let grid = grid(&["ab", "cd"]);
        assert_eq!(grid.lines(), vec!["ab".to_string(), "cd".to_string()]);
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_render_scales_grid_to_area() {
        let mut mount = MountPoint::from_cells(4, 2);
        let id = mount.attach(style());
        if let Some(layer) = mount.layer_mut(id) {
            layer.present(grid(&["#.", "@ "]), 0);
        }

        let mut terminal = Terminal::new(TestBackend::new(4, 2)).expect("test backend");
        terminal
            .draw(|frame| mount.render(frame, frame.area()))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String { (0..4).map(|x| buffer[(x, y)].symbol()).collect() };
        assert_eq!(row(0), "##..");
        assert_eq!(row(1), "@@  ");

        let expected = Color::from(Rgb::new(0x4a, 0x9e, 0xff).faded(0.8));
        assert_eq!(buffer[(0, 0)].fg, expected);
    }

    #[test]
    fn test_offset_shifts_layer() {
        let mut mount = MountPoint::from_cells(3, 2);
        let id = mount.attach(LayerStyle {
            offset: (1, 1),
            ..style()
        });
        if let Some(layer) = mount.layer_mut(id) {
            layer.present(grid(&["xy"]), 0);
        }

        let mut terminal = Terminal::new(TestBackend::new(3, 2)).expect("test backend");
        terminal
            .draw(|frame| mount.render(frame, frame.area()))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), " ");
        assert_eq!(buffer[(1, 1)].symbol(), "x");
        assert_eq!(buffer[(2, 1)].symbol(), "y");
    }

    #[test]
    fn test_scanlines_dim_every_third_row() {
        let mut mount = MountPoint::from_cells(1, 4);
        let id = mount.attach(LayerStyle {
            scanlines: true,
            opacity: 1.0,
            color: Rgb::WHITE,
            ..style()
        });
        if let Some(layer) = mount.layer_mut(id) {
            layer.present(grid(&["#", "#", "#", "#"]), 4000);
        }

        let mut terminal = Terminal::new(TestBackend::new(1, 4)).expect("test backend");
        terminal
            .draw(|frame| mount.render(frame, frame.area()))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        // Sweep is on row 2 at half the period.
        assert_eq!(buffer[(0, 0)].fg, Color::from(Rgb::WHITE.faded(SCANLINE_DIM)));
        assert_eq!(buffer[(0, 1)].fg, Color::from(Rgb::WHITE));
        assert!(buffer[(0, 2)].modifier.contains(Modifier::BOLD));
        assert_eq!(buffer[(0, 3)].fg, Color::from(Rgb::WHITE.faded(SCANLINE_DIM)));
    }
}
