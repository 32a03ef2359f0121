//! Packets travelling along horizontal lanes (stateful).

use glam::Vec3;
use okascii_core::{LaneConfig, ParticleKind, SizeParams};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::geometry::make_geometry;
use crate::scene::{ObjectId, Scene, Transform};

/// Lane Y coordinates centred on zero.
pub fn lane_positions(lane_count: usize, spacing: f32) -> Vec<f32> {
    let centre = (lane_count as f32 - 1.0) / 2.0;
    (0..lane_count)
        .map(|i| (i as f32 - centre) * spacing)
        .collect()
}

/// Pick the entry whose cumulative weight first exceeds `draw`.
///
/// `draw` is expected in `[0, total weight)`. Anything past the end of the
/// table selects the last entry.
pub fn pick_kind(kinds: &[ParticleKind], draw: f32) -> Option<&ParticleKind> {
    let mut cumulative = 0.0;
    for kind in kinds {
        cumulative += kind.weight;
        if draw < cumulative {
            return Some(kind);
        }
    }
    kinds.last()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub object: ObjectId,
    pub lane: usize,
    pub speed: f32,
    pub x: f32,
}

/// Horizontal extent and lane change policy shared by every particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneBounds {
    pub left: f32,
    pub right: f32,
    pub lane_count: usize,
    pub relane_probability: f32,
}

impl From<&LaneConfig> for LaneBounds {
    fn from(config: &LaneConfig) -> Self {
        Self {
            left: config.left,
            right: config.right,
            lane_count: config.lane_count,
            relane_probability: config.relane_probability,
        }
    }
}

/// Move a particle right by its speed. Returns whether it wrapped.
///
/// A particle past the right edge restarts exactly on the left edge and with
/// `relane_probability` moves to a uniformly chosen lane.
pub fn advance_particle(particle: &mut Particle, bounds: &LaneBounds, rng: &mut impl Rng) -> bool {
    particle.x += particle.speed;
    if particle.x <= bounds.right {
        return false;
    }
    particle.x = bounds.left;
    if rng.gen_bool(bounds.relane_probability as f64) {
        particle.lane = rng.gen_range(0..bounds.lane_count);
    }
    true
}

#[derive(Debug)]
pub struct LaneParticleAnimator {
    lanes: Vec<f32>,
    particles: Vec<Particle>,
    bounds: LaneBounds,
    spin: f32,
    rng: StdRng,
}

impl LaneParticleAnimator {
    pub fn build(config: &LaneConfig, scene: &mut Scene, mut rng: StdRng) -> Self {
        let lanes = lane_positions(config.lane_count, config.lane_spacing);
        let total_weight: f32 = config.kinds.iter().map(|kind| kind.weight).sum();

        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            let draw = rng.gen_range(0.0..total_weight);
            let Some(kind) = pick_kind(&config.kinds, draw) else {
                break;
            };
            let lane = rng.gen_range(0..lanes.len());
            let x = rng.gen_range(config.left..config.right);
            let speed = rng.gen_range(kind.speed.min..kind.speed.max);
            let mesh = make_geometry(kind.geometry, &SizeParams::small(kind.geometry, kind.size));
            let object = scene.add_mesh(mesh, Transform::at(Vec3::new(x, lanes[lane], 0.0)));
            particles.push(Particle {
                object,
                lane,
                speed,
                x,
            });
        }

        debug!(
            lanes = lanes.len(),
            particles = particles.len(),
            "lane particles built"
        );

        Self {
            lanes,
            particles,
            bounds: LaneBounds::from(config),
            spin: config.spin,
            rng,
        }
    }

    pub fn lanes(&self) -> &[f32] {
        &self.lanes
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance one frame.
    pub fn update(&mut self, scene: &mut Scene) {
        for particle in &mut self.particles {
            advance_particle(particle, &self.bounds, &mut self.rng);
            if let Some(transform) = scene.transform_mut(particle.object) {
                transform.position = Vec3::new(particle.x, self.lanes[particle.lane], 0.0);
                transform.rotation.x += self.spin;
                transform.rotation.y += self.spin;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use okascii_core::{GeometryKind, SpeedRange};
    use rand::SeedableRng;

    use super::*;

    fn bounds(relane_probability: f32) -> LaneBounds {
        LaneBounds {
            left: -12.0,
            right: 12.0,
            lane_count: 5,
            relane_probability,
        }
    }

    fn particle(x: f32, speed: f32) -> Particle {
        Particle {
            object: Scene::new().add_point(Vec3::ZERO, 1.0),
            lane: 2,
            speed,
            x,
        }
    }

    #[test]
    fn test_lane_positions_centred() {
        assert_eq!(lane_positions(5, 1.5), vec![-3.0, -1.5, 0.0, 1.5, 3.0]);
        assert_eq!(lane_positions(2, 1.0), vec![-0.5, 0.5]);
        assert_eq!(lane_positions(1, 4.0), vec![0.0]);
    }

    #[test]
    fn test_pick_kind_uses_cumulative_weights() {
        let kinds = LaneConfig::default().kinds;
        assert_eq!(pick_kind(&kinds, 0.0).map(|k| k.geometry), Some(GeometryKind::Box));
        assert_eq!(pick_kind(&kinds, 0.49).map(|k| k.geometry), Some(GeometryKind::Box));
        assert_eq!(pick_kind(&kinds, 0.5).map(|k| k.geometry), Some(GeometryKind::Sphere));
        assert_eq!(
            pick_kind(&kinds, 0.85).map(|k| k.geometry),
            Some(GeometryKind::Tetrahedron)
        );
        assert_eq!(
            pick_kind(&kinds, 5.0).map(|k| k.geometry),
            Some(GeometryKind::Tetrahedron)
        );
        assert!(pick_kind(&[], 0.0).is_none());
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let kinds = vec![
            ParticleKind {
                geometry: GeometryKind::Box,
                size: 1.0,
                speed: SpeedRange::new(0.1, 0.2),
                weight: 3.0,
            },
            ParticleKind {
                geometry: GeometryKind::Sphere,
                size: 1.0,
                speed: SpeedRange::new(0.1, 0.2),
                weight: 1.0,
            },
        ];
        assert_eq!(pick_kind(&kinds, 2.9).map(|k| k.geometry), Some(GeometryKind::Box));
        assert_eq!(pick_kind(&kinds, 3.5).map(|k| k.geometry), Some(GeometryKind::Sphere));
    }

    #[test]
    fn test_fast_particle_resets_to_left_exactly() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut particle = particle(10.0, 5.0);
        assert!(advance_particle(&mut particle, &bounds(0.3), &mut rng));
        assert_eq!(particle.x, -12.0);
    }

    #[test]
    fn test_particle_on_boundary_does_not_wrap() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut particle = particle(11.0, 1.0);
        assert!(!advance_particle(&mut particle, &bounds(1.0), &mut rng));
        assert_eq!(particle.x, 12.0);
        assert_eq!(particle.lane, 2);
    }

    #[test]
    fn test_relane_only_on_wrap() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut particle = particle(0.0, 0.1);
        advance_particle(&mut particle, &bounds(1.0), &mut rng);
        assert_eq!(particle.lane, 2);

        let mut stays = particle.clone();
        stays.x = 12.0;
        advance_particle(&mut stays, &bounds(0.0), &mut rng);
        assert_eq!(stays.lane, 2);
        assert_eq!(stays.x, -12.0);
    }

    #[test]
    fn test_build_places_particles_on_lanes() {
        let config = LaneConfig::default();
        let mut scene = Scene::new();
        let animator = LaneParticleAnimator::build(&config, &mut scene, StdRng::seed_from_u64(8));
        assert_eq!(animator.particles().len(), 40);
        assert_eq!(scene.len(), 40);
        for particle in animator.particles() {
            assert!(particle.lane < 5);
            assert!((-12.0..12.0).contains(&particle.x));
            assert!((0.05..0.2).contains(&particle.speed));
            let object = scene.object(particle.object).expect("particle mesh");
            assert_eq!(object.transform.position.y, animator.lanes()[particle.lane]);
        }
    }

    #[test]
    fn test_relane_moves_mesh_in_same_frame() {
        let config = LaneConfig {
            relane_probability: 1.0,
            ..Default::default()
        };
        let mut scene = Scene::new();
        let mut animator =
            LaneParticleAnimator::build(&config, &mut scene, StdRng::seed_from_u64(3));
        animator.particles[0].x = config.right;
        animator.update(&mut scene);

        let particle = &animator.particles()[0];
        assert_eq!(particle.x, config.left);
        let object = scene.object(particle.object).expect("particle mesh");
        assert_eq!(object.transform.position.x, config.left);
        assert_eq!(object.transform.position.y, animator.lanes()[particle.lane]);
    }

    #[test]
    fn test_update_keeps_particles_in_bounds() {
        let config = LaneConfig::default();
        let mut scene = Scene::new();
        let mut animator =
            LaneParticleAnimator::build(&config, &mut scene, StdRng::seed_from_u64(8));
        for _ in 0..1000 {
            animator.update(&mut scene);
            for particle in animator.particles() {
                assert!((-12.0..=12.0).contains(&particle.x));
                let object = scene.object(particle.object).expect("particle mesh");
                assert_eq!(object.transform.position.x, particle.x);
                assert_eq!(object.transform.position.y, animator.lanes()[particle.lane]);
            }
        }
    }
}
