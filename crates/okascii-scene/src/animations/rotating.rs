//! Single solid spinning about its centre (stateless).

use std::f64::consts::TAU;

use glam::Vec3;
use okascii_core::{Bob, RotationSpeed, SolidConfig};

use crate::geometry::make_geometry;
use crate::scene::{ObjectId, Scene, Transform};

/// Drives one mesh from elapsed time alone.
#[derive(Debug, Clone)]
pub struct RotatingSolidAnimator {
    object: ObjectId,
    rotation_speed: RotationSpeed,
    bob: Option<Bob>,
}

impl RotatingSolidAnimator {
    /// Add the configured mesh to `scene` at the origin.
    pub fn build(config: &SolidConfig, scene: &mut Scene) -> Self {
        let mesh = make_geometry(config.geometry, &config.size);
        let object = scene.add_mesh(mesh, Transform::IDENTITY);
        Self {
            object,
            rotation_speed: config.rotation_speed,
            bob: config.bob,
        }
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    /// Transform of the mesh at `elapsed_ms`.
    ///
    /// Angles are reduced modulo a full turn in double precision so long
    /// runs do not lose float precision.
    pub fn transform_at(&self, elapsed_ms: u64) -> Transform {
        let t = elapsed_ms as f64;
        let angle = |speed: f32| ((t * speed as f64) % TAU) as f32;
        let rotation = Vec3::new(
            angle(self.rotation_speed.x),
            angle(self.rotation_speed.y),
            angle(self.rotation_speed.z),
        );
        let y = self
            .bob
            .map(|bob| ((t * bob.frequency as f64).sin().abs() * bob.amplitude as f64) as f32)
            .unwrap_or(0.0);
        Transform {
            position: Vec3::new(0.0, y, 0.0),
            rotation,
            ..Transform::IDENTITY
        }
    }

    pub fn update(&self, scene: &mut Scene, elapsed_ms: u64) {
        if let Some(transform) = scene.transform_mut(self.object) {
            *transform = self.transform_at(elapsed_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator(bob: Option<Bob>) -> (RotatingSolidAnimator, Scene) {
        let mut scene = Scene::new();
        let config = SolidConfig {
            bob,
            ..SolidConfig::default()
        };
        (RotatingSolidAnimator::build(&config, &mut scene), scene)
    }

    #[test]
    fn test_rotation_is_absolute() {
        let (animator, _) = animator(None);
        let transform = animator.transform_at(1000);
        assert!((transform.rotation.x - 0.3).abs() < 1e-6);
        assert!((transform.rotation.y - 0.4).abs() < 1e-6);
        assert!((transform.rotation.z - 0.2).abs() < 1e-6);
        assert_eq!(transform.position, Vec3::ZERO);
        assert_eq!(animator.transform_at(0).rotation, Vec3::ZERO);
    }

    #[test]
    fn test_transform_is_pure() {
        let (animator, mut scene) = animator(None);
        let first = animator.transform_at(123_456);
        animator.update(&mut scene, 10);
        animator.update(&mut scene, 999_999);
        assert_eq!(animator.transform_at(123_456), first);
    }

    #[test]
    fn test_update_applies_transform() {
        let (animator, mut scene) = animator(None);
        animator.update(&mut scene, 5000);
        let object = scene.object(animator.object()).expect("mesh added");
        assert_eq!(object.transform, animator.transform_at(5000));
    }

    #[test]
    fn test_bob_stays_above_origin() {
        let (animator, _) = animator(Some(Bob {
            amplitude: 50.0,
            frequency: 0.0005,
        }));
        for elapsed in [0, 1000, 3141, 6283, 9000] {
            let y = animator.transform_at(elapsed).position.y;
            assert!((0.0..=50.0).contains(&y), "y = {y} at {elapsed}");
        }
        let peak = animator.transform_at(3142).position.y;
        assert!((peak - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_long_runs_stay_in_range() {
        let (animator, _) = animator(None);
        let rotation = animator.transform_at(u32::MAX as u64 * 10).rotation;
        for angle in rotation.to_array() {
            assert!((0.0..std::f32::consts::TAU + 1e-3).contains(&angle));
        }
    }
}
