//! Primitive mesh generation.
//!
//! The parametric shapes follow the usual tessellation of a UV grid wrapped
//! around the surface, two triangles per grid cell.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use okascii_core::{GeometryKind, SizeParams};

/// An indexed triangle mesh in object space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Iterate the triangles as vertex positions.
    pub fn faces(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.triangles.iter().map(|[a, b, c]| {
            [
                self.vertices[*a as usize],
                self.vertices[*b as usize],
                self.vertices[*c as usize],
            ]
        })
    }

    /// Largest distance of any vertex from the origin.
    pub fn radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.length())
            .fold(0.0, f32::max)
    }
}

/// Build the mesh for `kind` at the given size.
pub fn make_geometry(kind: GeometryKind, size: &SizeParams) -> Mesh {
    match kind {
        GeometryKind::Sphere => sphere(
            size.size,
            size.tubular_segments.max(3),
            size.radial_segments.max(2),
        ),
        GeometryKind::Torus => torus(
            size.size,
            size.tube,
            size.radial_segments.max(2),
            size.tubular_segments.max(3),
        ),
        GeometryKind::TorusKnot => torus_knot(
            size.size,
            size.tube,
            size.tubular_segments.max(3),
            size.radial_segments.max(3),
            2,
            3,
        ),
        GeometryKind::Box => cuboid(size.size),
        GeometryKind::Tetrahedron => tetrahedron(size.size),
    }
}

/// Triangulate a `(columns + 1) x (rows + 1)` vertex grid stored row-major.
fn grid_triangles(columns: u32, rows: u32) -> Vec<[u32; 3]> {
    let stride = columns + 1;
    let mut triangles = Vec::with_capacity((columns * rows * 2) as usize);
    for row in 0..rows {
        for col in 0..columns {
            let a = row * stride + col;
            let b = a + stride;
            let c = b + 1;
            let d = a + 1;
            triangles.push([a, b, d]);
            triangles.push([b, c, d]);
        }
    }
    triangles
}

fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let mut vertices = Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            vertices.push(Vec3::new(
                -radius * (u * TAU).cos() * (v * PI).sin(),
                radius * (v * PI).cos(),
                radius * (u * TAU).sin() * (v * PI).sin(),
            ));
        }
    }
    Mesh {
        vertices,
        triangles: grid_triangles(width_segments, height_segments),
    }
}

fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let mut vertices =
        Vec::with_capacity(((radial_segments + 1) * (tubular_segments + 1)) as usize);
    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let ring = radius + tube * v.cos();
            vertices.push(Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin()));
        }
    }
    Mesh {
        vertices,
        triangles: grid_triangles(tubular_segments, radial_segments),
    }
}

fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> Mesh {
    let curve = |u: f32| {
        let q_over_p = q as f32 / p as f32 * u;
        let cs = q_over_p.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * q_over_p.sin() * 0.5,
        )
    };

    let mut vertices =
        Vec::with_capacity(((radial_segments + 1) * (tubular_segments + 1)) as usize);
    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p as f32 * TAU;
        let p1 = curve(u);
        let p2 = curve(u + 0.01);

        // Frenet-style frame along the knot
        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1).normalize_or_zero();
        let normal = binormal.cross(tangent).normalize_or_zero();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            vertices.push(p1 + normal * cx + binormal * cy);
        }
    }
    Mesh {
        vertices,
        triangles: grid_triangles(radial_segments, tubular_segments),
    }
}

fn cuboid(edge: f32) -> Mesh {
    block(Vec3::splat(edge))
}

/// Axis-aligned box centred on the origin with the given edge lengths.
pub fn block(size: Vec3) -> Mesh {
    let Vec3 { x, y, z } = size / 2.0;
    let vertices = vec![
        Vec3::new(-x, -y, -z),
        Vec3::new(x, -y, -z),
        Vec3::new(x, y, -z),
        Vec3::new(-x, y, -z),
        Vec3::new(-x, -y, z),
        Vec3::new(x, -y, z),
        Vec3::new(x, y, z),
        Vec3::new(-x, y, z),
    ];
    let triangles = vec![
        [4, 5, 6],
        [4, 6, 7],
        [1, 0, 3],
        [1, 3, 2],
        [5, 1, 2],
        [5, 2, 6],
        [0, 4, 7],
        [0, 7, 3],
        [7, 6, 2],
        [7, 2, 3],
        [0, 1, 5],
        [0, 5, 4],
    ];
    Mesh {
        vertices,
        triangles,
    }
}

fn tetrahedron(radius: f32) -> Mesh {
    let vertices = [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
    ]
    .into_iter()
    .map(|v| v.normalize() * radius)
    .collect();
    Mesh {
        vertices,
        triangles: vec![[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]],
    }
}
