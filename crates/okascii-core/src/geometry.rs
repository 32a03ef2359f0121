//! Geometry selectors and size parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive mesh shapes a backdrop can draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeometryKind {
    Sphere,
    Torus,
    #[default]
    TorusKnot,
    Box,
    Tetrahedron,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 5] = [
        GeometryKind::Sphere,
        GeometryKind::Torus,
        GeometryKind::TorusKnot,
        GeometryKind::Box,
        GeometryKind::Tetrahedron,
    ];
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryKind::Sphere => "sphere",
            GeometryKind::Torus => "torus",
            GeometryKind::TorusKnot => "torus-knot",
            GeometryKind::Box => "box",
            GeometryKind::Tetrahedron => "tetrahedron",
        };
        f.write_str(name)
    }
}

/// Size parameters for a primitive.
///
/// Each shape reads the fields that make sense for it:
///
/// | shape        | `size`         | `tube`      | `radial_segments` | `tubular_segments` |
/// |--------------|----------------|-------------|-------------------|--------------------|
/// | sphere       | radius         | -           | height segments   | width segments     |
/// | torus        | ring radius    | tube radius | around the tube   | around the ring    |
/// | torus knot   | knot radius    | tube radius | around the tube   | along the knot     |
/// | box          | edge length    | -           | -                 | -                  |
/// | tetrahedron  | circumradius   | -           | -                 | -                  |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeParams {
    pub size: f32,
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
}

impl SizeParams {
    /// Full-scene sizes used by the single rotating solid backdrops.
    pub fn for_kind(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Sphere => Self {
                size: 300.0,
                tube: 0.0,
                radial_segments: 32,
                tubular_segments: 32,
            },
            GeometryKind::Torus => Self {
                size: 300.0,
                tube: 120.0,
                radial_segments: 16,
                tubular_segments: 100,
            },
            GeometryKind::TorusKnot => Self {
                size: 300.0,
                tube: 90.0,
                radial_segments: 16,
                tubular_segments: 100,
            },
            GeometryKind::Box => Self {
                size: 400.0,
                tube: 0.0,
                radial_segments: 1,
                tubular_segments: 1,
            },
            GeometryKind::Tetrahedron => Self {
                size: 350.0,
                tube: 0.0,
                radial_segments: 1,
                tubular_segments: 1,
            },
        }
    }

    /// Small, low-detail sizes for particles and graph nodes.
    pub fn small(kind: GeometryKind, size: f32) -> Self {
        let full = Self::for_kind(kind);
        let scale = size / full.size;
        Self {
            size,
            tube: full.tube * scale,
            radial_segments: full.radial_segments.min(6),
            tubular_segments: full.tubular_segments.min(12),
        }
    }
}

impl Default for SizeParams {
    fn default() -> Self {
        Self::for_kind(GeometryKind::default())
    }
}
