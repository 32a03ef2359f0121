//! Animators that drive a backdrop's scene.
//!
//! Solids, the starfield and its rocket are stateless: every frame is
//! computed from elapsed time. The node graph and the lanes keep per-object
//! state and advance once per frame.

pub mod lanes;
pub mod node_graph;
pub mod parallax;
pub mod rocket;
pub mod rotating;

use okascii_core::AnimationConfig;
use rand::rngs::StdRng;

use crate::scene::Scene;

pub use lanes::LaneParticleAnimator;
pub use node_graph::NodeGraphAnimator;
pub use parallax::ParallaxStarfieldAnimator;
pub use rocket::Rocket;
pub use rotating::RotatingSolidAnimator;

/// The animator selected by a backdrop's configuration.
#[derive(Debug)]
pub enum Animation {
    Solid(RotatingSolidAnimator),
    Graph(NodeGraphAnimator),
    Lanes(LaneParticleAnimator),
    Parallax(ParallaxStarfieldAnimator),
}

impl Animation {
    /// Populate `scene` for `config`.
    pub fn build(config: &AnimationConfig, scene: &mut Scene, rng: StdRng) -> Self {
        match config {
            AnimationConfig::Solid(solid) => {
                Animation::Solid(RotatingSolidAnimator::build(solid, scene))
            }
            AnimationConfig::Graph(graph) => {
                Animation::Graph(NodeGraphAnimator::build(graph, scene, rng))
            }
            AnimationConfig::Lanes(lanes) => {
                Animation::Lanes(LaneParticleAnimator::build(lanes, scene, rng))
            }
            AnimationConfig::Parallax(parallax) => {
                Animation::Parallax(ParallaxStarfieldAnimator::build(parallax, scene, rng))
            }
        }
    }

    /// Apply this frame's transforms.
    pub fn update(&mut self, scene: &mut Scene, elapsed_ms: u64) {
        match self {
            Animation::Solid(solid) => solid.update(scene, elapsed_ms),
            Animation::Graph(graph) => graph.update(scene),
            Animation::Lanes(lanes) => lanes.update(scene),
            Animation::Parallax(parallax) => parallax.update(scene, elapsed_ms),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Animation::Solid(_) => "solid",
            Animation::Graph(_) => "graph",
            Animation::Lanes(_) => "lanes",
            Animation::Parallax(_) => "parallax",
        }
    }
}
