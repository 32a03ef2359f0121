//! Parallax starfield (stateless).
//!
//! Each layer drifts diagonally across a plane facing the camera, wrapping at
//! the edges. Nearer layers move faster and shine brighter. An optional
//! [`Rocket`] flies in front of the stars.

use glam::{Vec2, Vec3};
use okascii_core::{ParallaxConfig, StarLayer};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use super::rocket::Rocket;
use crate::scene::{ObjectId, Scene};

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub object: ObjectId,
    /// Normalized start position in `[0, 1)^2`.
    pub base: Vec2,
    pub layer: usize,
}

/// Wrap into `[0, 1)`.
fn wrap_unit(value: f32) -> f32 {
    let wrapped = value.rem_euclid(1.0);
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Normalized position of a star at `elapsed_ms`.
pub fn star_position(base: Vec2, elapsed_ms: u64, period_ms: u64) -> Vec2 {
    let period = period_ms.max(1);
    let t = (elapsed_ms % period) as f32 / period as f32;
    Vec2::new(wrap_unit(base.x - t), wrap_unit(base.y + t))
}

#[derive(Debug)]
pub struct ParallaxStarfieldAnimator {
    stars: Vec<Star>,
    layers: Vec<StarLayer>,
    width: f32,
    height: f32,
    rocket: Option<Rocket>,
}

impl ParallaxStarfieldAnimator {
    pub fn build(config: &ParallaxConfig, scene: &mut Scene, mut rng: StdRng) -> Self {
        let mut animator = Self {
            stars: Vec::new(),
            layers: config.layers.clone(),
            width: config.width,
            height: config.height,
            rocket: None,
        };
        for (index, layer) in config.layers.iter().enumerate() {
            for _ in 0..layer.count {
                let base = Vec2::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));
                let object = scene.add_point(animator.to_plane(base), layer.brightness);
                animator.stars.push(Star {
                    object,
                    base,
                    layer: index,
                });
            }
        }
        animator.rocket = config.rocket.as_ref().map(|rocket| Rocket::build(rocket, scene));
        debug!(stars = animator.stars.len(), "starfield built");
        animator
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn rocket(&self) -> Option<&Rocket> {
        self.rocket.as_ref()
    }

    /// Map a normalized position onto the star plane, `(0, 0)` top-left.
    fn to_plane(&self, position: Vec2) -> Vec3 {
        Vec3::new(
            (position.x - 0.5) * self.width,
            (0.5 - position.y) * self.height,
            0.0,
        )
    }

    pub fn update(&self, scene: &mut Scene, elapsed_ms: u64) {
        for star in &self.stars {
            let period = self.layers[star.layer].period_ms;
            let position = self.to_plane(star_position(star.base, elapsed_ms, period));
            if let Some(transform) = scene.transform_mut(star.object) {
                transform.position = position;
            }
        }
        if let Some(rocket) = &self.rocket {
            rocket.update(scene, elapsed_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_star_position_drifts_and_wraps() {
        let base = Vec2::new(0.25, 0.5);
        assert_eq!(star_position(base, 0, 1000), base);
        assert_eq!(star_position(base, 250, 1000), Vec2::new(0.0, 0.75));
        assert_eq!(star_position(base, 500, 1000), Vec2::new(0.75, 0.0));
        assert_eq!(star_position(base, 1000, 1000), base);
    }

    #[test]
    fn test_position_is_pure() {
        let base = Vec2::new(0.1, 0.9);
        let first = star_position(base, 987_654, 15_000);
        assert_eq!(star_position(base, 987_654, 15_000), first);
        assert!((0.0..1.0).contains(&first.x));
        assert!((0.0..1.0).contains(&first.y));
    }

    #[test]
    fn test_build_creates_every_layer() {
        let config = ParallaxConfig::default();
        let mut scene = Scene::new();
        let field = ParallaxStarfieldAnimator::build(&config, &mut scene, StdRng::seed_from_u64(4));
        assert_eq!(field.stars().len(), 75);
        assert_eq!(scene.len(), 75 + 9);
        assert!(field.rocket().is_some());
        assert_eq!(field.stars().iter().filter(|s| s.layer == 2).count(), 15);

        let near = field.stars().iter().find(|s| s.layer == 2).expect("near star");
        assert_eq!(scene.object(near.object).map(|o| o.brightness), Some(1.0));
    }

    #[test]
    fn test_update_keeps_stars_on_plane() {
        let config = ParallaxConfig::default();
        let mut scene = Scene::new();
        let field = ParallaxStarfieldAnimator::build(&config, &mut scene, StdRng::seed_from_u64(4));
        field.update(&mut scene, 12_345);
        for star in field.stars() {
            let position = scene.object(star.object).expect("star").transform.position;
            assert!(position.x.abs() <= 12.0 && position.y.abs() <= 7.0);
            assert_eq!(position.z, 0.0);
        }
    }

    #[test]
    fn test_starfield_without_rocket() {
        let config = ParallaxConfig {
            rocket: None,
            ..Default::default()
        };
        let mut scene = Scene::new();
        let field = ParallaxStarfieldAnimator::build(&config, &mut scene, StdRng::seed_from_u64(4));
        assert!(field.rocket().is_none());
        assert_eq!(scene.len(), 75);
        field.update(&mut scene, 1_000);
    }
}
