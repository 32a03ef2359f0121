//! The 8-bit rocket shown over the starfield (stateless).
//!
//! Parts are laid out in rocket pixels with `y` pointing down the body, nose
//! at negative `y`. Every frame the whole rocket is offset by a shake
//! keyframe and the exhaust is stretched by the flame flicker, then tilted
//! and scaled onto the star plane.

use glam::{Vec2, Vec3};
use okascii_core::RocketConfig;
use tracing::debug;

use crate::geometry::block;
use crate::scene::{ObjectId, Scene, Transform};

/// Shake offsets in rocket pixels at 0 %, 25 %, 50 % and 75 % of a cycle.
pub const SHAKE_KEYFRAMES: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(-2.0, 2.0),
    Vec2::new(2.0, -1.0),
    Vec2::new(1.0, 1.0),
];

/// Flame length at rest and at the peak of a flicker, in rocket pixels.
pub const FLAME_LENGTH: (f32, f32) = (16.0, 24.0);

/// Where the exhaust leaves the body.
const FLAME_TOP: f32 = 24.0;

/// Flame columns across the nozzle and their brightness.
const FLAME_COLUMNS: [(f32, f32); 3] = [(-6.0, 0.85), (0.0, 1.0), (6.0, 0.85)];

/// Window glass is drawn darker than the hull.
const WINDOW_BRIGHTNESS: f32 = 0.15;

/// Hull thickness towards the camera, in rocket pixels.
const DEPTH: f32 = 8.0;

/// Hull blocks as `(centre, size)` in rocket pixels.
const HULL: [(Vec2, Vec2); 4] = [
    // body
    (Vec2::new(0.0, 0.0), Vec2::new(24.0, 48.0)),
    // nose
    (Vec2::new(0.0, -28.0), Vec2::new(8.0, 8.0)),
    // fins
    (Vec2::new(-16.0, 24.0), Vec2::new(8.0, 16.0)),
    (Vec2::new(16.0, 24.0), Vec2::new(8.0, 16.0)),
];

const WINDOWS: [Vec2; 2] = [Vec2::new(0.0, -12.0), Vec2::new(0.0, 4.0)];

/// CSS-style ease-in-out on `[0, 1]`.
fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Fraction of the way through a cycle of `period_ms`.
fn cycle(elapsed_ms: u64, period_ms: u64) -> f32 {
    let period = period_ms.max(1);
    (elapsed_ms % period) as f32 / period as f32
}

/// Shake offset at `elapsed_ms`, eased between [`SHAKE_KEYFRAMES`].
pub fn rocket_shake(elapsed_ms: u64, period_ms: u64) -> Vec2 {
    let phase = cycle(elapsed_ms, period_ms) * SHAKE_KEYFRAMES.len() as f32;
    let index = (phase.floor() as usize).min(SHAKE_KEYFRAMES.len() - 1);
    let from = SHAKE_KEYFRAMES[index];
    let to = SHAKE_KEYFRAMES[(index + 1) % SHAKE_KEYFRAMES.len()];
    from.lerp(to, ease_in_out(phase - index as f32))
}

/// Flame length at `elapsed_ms`: rest, peak at half a cycle, rest again.
pub fn flame_length(elapsed_ms: u64, period_ms: u64) -> f32 {
    let t = cycle(elapsed_ms, period_ms);
    let swing = 1.0 - (2.0 * t - 1.0).abs();
    let (rest, peak) = FLAME_LENGTH;
    rest + (peak - rest) * ease_in_out(swing)
}

#[derive(Debug, Clone, PartialEq)]
struct Part {
    object: ObjectId,
    centre: Vec2,
    z: f32,
}

#[derive(Debug)]
pub struct Rocket {
    config: RocketConfig,
    parts: Vec<Part>,
    flames: Vec<(ObjectId, f32)>,
}

impl Rocket {
    pub fn build(config: &RocketConfig, scene: &mut Scene) -> Self {
        let mut rocket = Self {
            config: *config,
            parts: Vec::new(),
            flames: Vec::new(),
        };
        let tilt = rocket.tilt();

        for (centre, size) in HULL {
            let mesh = block(size.extend(DEPTH) * config.pixel);
            let transform = Transform {
                rotation: Vec3::new(0.0, 0.0, tilt),
                ..Transform::at(rocket.to_plane(centre, 0.0))
            };
            rocket.parts.push(Part {
                object: scene.add_mesh(mesh, transform),
                centre,
                z: 0.0,
            });
        }

        let glass = (DEPTH / 2.0 + 0.5) * config.pixel;
        for centre in WINDOWS {
            rocket.parts.push(Part {
                object: scene.add_point(rocket.to_plane(centre, glass), WINDOW_BRIGHTNESS),
                centre,
                z: glass,
            });
        }

        for (x, brightness) in FLAME_COLUMNS {
            let (start, end) = rocket.flame(x, Vec2::ZERO, FLAME_LENGTH.0);
            rocket.flames.push((scene.add_segment(start, end, brightness), x));
        }

        debug!(parts = rocket.parts.len(), flames = rocket.flames.len(), "rocket built");
        rocket
    }

    /// Rotation about Z; a positive tilt leans the nose clockwise.
    fn tilt(&self) -> f32 {
        -self.config.tilt_degrees.to_radians()
    }

    /// Place a rocket pixel on the star plane.
    pub fn to_plane(&self, local: Vec2, z: f32) -> Vec3 {
        let up = Vec2::new(local.x, -local.y) * self.config.pixel;
        let turned = Vec2::from_angle(self.tilt()).rotate(up);
        let [x, y] = self.config.position;
        Vec3::new(x + turned.x, y + turned.y, z)
    }

    fn flame(&self, x: f32, shake: Vec2, length: f32) -> (Vec3, Vec3) {
        (
            self.to_plane(Vec2::new(x, FLAME_TOP) + shake, 0.0),
            self.to_plane(Vec2::new(x, FLAME_TOP + length) + shake, 0.0),
        )
    }

    pub fn update(&self, scene: &mut Scene, elapsed_ms: u64) {
        let shake = rocket_shake(elapsed_ms, self.config.shake_period_ms);
        for part in &self.parts {
            let position = self.to_plane(part.centre + shake, part.z);
            if let Some(transform) = scene.transform_mut(part.object) {
                transform.position = position;
            }
        }

        let length = flame_length(elapsed_ms, self.config.flicker_period_ms);
        for &(object, x) in &self.flames {
            let (start, end) = self.flame(x, shake, length);
            scene.set_segment(object, start, end);
        }
    }
}
