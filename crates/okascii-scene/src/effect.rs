//! ASCII post effect.
//!
//! Rasterizes the scene at a reduced resolution and maps each cell's
//! luminance onto a character ramp. The result is presented on a glyph layer
//! of the mount point the effect was attached to.

use okascii_core::AsciiStyle;
use tracing::debug;

use crate::mount::{GlyphGrid, LayerId, LayerStyle, MountPoint};
use crate::raster::Raster;
use crate::scene::SceneHost;

/// Terminal glyphs are about twice as tall as they are wide.
pub const GLYPH_ASPECT: f32 = 0.5;

/// Glyph grid dimensions for a surface of `width x height` pixels.
pub fn grid_size(width: u32, height: u32, resolution: f32) -> (usize, usize) {
    let cols = (width as f32 * resolution).floor() as usize;
    let rows = (height as f32 * resolution * GLYPH_ASPECT).floor() as usize;
    (cols.max(1), rows.max(1))
}

/// Turns rendered frames into glyphs on one mount point layer.
#[derive(Debug)]
pub struct PostEffectRenderer {
    ramp: Vec<char>,
    invert: bool,
    resolution: f32,
    raster: Raster,
    layer: LayerId,
}

impl PostEffectRenderer {
    /// Attach a new glyph layer to `mount`, sized to its surface.
    pub fn attach(style: &AsciiStyle, mount: &mut MountPoint) -> Self {
        let resolution = style.effective_resolution();
        let (cols, rows) = grid_size(mount.width(), mount.height(), resolution);
        let layer = mount.attach(LayerStyle::from(style));
        debug!(cols, rows, "ascii effect attached");
        Self {
            ramp: style.ramp.chars().collect(),
            invert: style.invert,
            resolution,
            raster: Raster::new(cols, rows),
            layer,
        }
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// Current glyph grid dimensions.
    pub fn grid_size(&self) -> (usize, usize) {
        (self.raster.width(), self.raster.height())
    }

    /// Match the glyph grid to a new surface size.
    pub fn set_size(&mut self, width: u32, height: u32) {
        let (cols, rows) = grid_size(width, height, self.resolution);
        self.raster.resize(cols, rows);
    }

    /// Glyph for a luminance in `[0, 1]`.
    pub fn glyph_for(&self, luma: f32) -> char {
        let Some(last) = self.ramp.len().checked_sub(1) else {
            return ' ';
        };
        let luma = luma.clamp(0.0, 1.0);
        let index = (((1.0 - luma) * last as f32).floor() as usize).min(last);
        let index = if self.invert { last - index } else { index };
        self.ramp[index]
    }

    /// Render the scene and present the glyphs on this effect's layer.
    pub fn render(&mut self, host: &SceneHost, mount: &mut MountPoint, elapsed_ms: u64) {
        self.raster.clear();
        host.rasterize(&mut self.raster);

        let (cols, rows) = self.grid_size();
        let mut grid = GlyphGrid::new(cols, rows);
        for row in 0..rows {
            for col in 0..cols {
                grid.set(col, row, self.glyph_for(self.raster.luma(col, row)));
            }
        }

        if let Some(layer) = mount.layer_mut(self.layer) {
            layer.present(grid, elapsed_ms);
        }
    }

    /// Remove this effect's layer from `mount`.
    pub fn detach(self, mount: &mut MountPoint) -> bool {
        let removed = mount.detach(self.layer);
        debug!(removed, "ascii effect detached");
        removed
    }
}
