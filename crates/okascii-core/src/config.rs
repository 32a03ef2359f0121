//! Backdrop configuration record.
//!
//! Every option a backdrop accepts is spelled out here with its default.
//! A configuration is checked once with [`BackdropConfig::validate`] before a
//! backdrop is mounted; nothing downstream re-checks it.

use crate::{CLASSIC_RAMP, ConfigError, GeometryKind, Rgb, SizeParams};

/// Character ramp ordered from empty to full density.
pub const DEFAULT_RAMP: &str = CLASSIC_RAMP;

/// Upper bound applied to the sampling resolution.
pub const MAX_RESOLUTION: f32 = 0.15;

/// How the rendered frame is turned into glyphs and painted.
#[derive(Debug, Clone, PartialEq)]
pub struct AsciiStyle {
    /// Glyphs ordered from empty to full. Default: [`DEFAULT_RAMP`].
    pub ramp: String,
    /// Map bright pixels to the dense end of the ramp. Default: `true`.
    pub invert: bool,
    /// Fraction of surface pixels sampled per glyph. Smaller values give
    /// fewer, larger glyphs. Clamped to [`MAX_RESOLUTION`]. Default: `0.12`.
    pub resolution: f32,
    /// Glyph colour. Default: `#4a9eff`.
    pub color: Rgb,
    /// Glyph opacity; the colour is faded towards black. Default: `0.8`.
    pub opacity: f32,
    /// Leave the background untouched instead of painting it black.
    /// Default: `true`.
    pub transparent_background: bool,
    /// Overlay offset from the top-left of the mount point, in cells.
    /// Default: `(0, 0)`.
    pub offset: (u16, u16),
    /// Dim every third row and sweep a highlight line. Default: `false`.
    pub scanlines: bool,
}

impl Default for AsciiStyle {
    fn default() -> Self {
        Self {
            ramp: DEFAULT_RAMP.to_string(),
            invert: true,
            resolution: 0.12,
            color: Rgb::new(0x4a, 0x9e, 0xff),
            opacity: 0.8,
            transparent_background: true,
            offset: (0, 0),
            scanlines: false,
        }
    }
}

impl AsciiStyle {
    /// Resolution actually used for sampling.
    pub fn effective_resolution(&self) -> f32 {
        self.resolution.min(MAX_RESOLUTION)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ramp.is_empty() {
            return Err(ConfigError::EmptyRamp);
        }
        if !(self.resolution > 0.0 && self.resolution <= 1.0) {
            return Err(ConfigError::Resolution(self.resolution));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::Opacity(self.opacity));
        }
        Ok(())
    }
}

/// Perspective camera placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Camera position. The camera looks straight down -Z.
    pub position: [f32; 3],
}

impl CameraRig {
    /// Framing for the full-size rotating solids.
    pub fn solid() -> Self {
        Self {
            fov_degrees: 70.0,
            near: 1.0,
            far: 2000.0,
            position: [0.0, 250.0, 1000.0],
        }
    }

    /// Framing for the small-unit particle scenes.
    pub fn particles(distance: f32) -> Self {
        Self {
            fov_degrees: 70.0,
            near: 0.1,
            far: 100.0,
            position: [0.0, 0.0, distance],
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::solid()
    }
}

/// A strong key light and a weaker fill light at opposing corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub key_position: [f32; 3],
    pub key_intensity: f32,
    pub fill_position: [f32; 3],
    pub fill_intensity: f32,
}

impl LightRig {
    /// Key light at `(d, d, d)` with intensity 3, fill at `(-d, -d, -d)` with
    /// intensity 1.
    pub fn corners(distance: f32) -> Self {
        Self {
            key_position: [distance; 3],
            key_intensity: 3.0,
            fill_position: [-distance; 3],
            fill_intensity: 1.0,
        }
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::corners(500.0)
    }
}

/// Angular speed per axis in radians per millisecond.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationSpeed {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationSpeed {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Vertical bob: `y = |sin(elapsed_ms * frequency)| * amplitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bob {
    pub amplitude: f32,
    pub frequency: f32,
}

/// Half-open speed range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > 0.0 && self.min < self.max && self.max.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::SpeedRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// A single mesh rotating about its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidConfig {
    /// Default: torus knot.
    pub geometry: GeometryKind,
    /// Default: [`SizeParams::for_kind`] of the geometry.
    pub size: SizeParams,
    /// Default: `(0.0003, 0.0004, 0.0002)` rad/ms.
    pub rotation_speed: RotationSpeed,
    /// Default: none.
    pub bob: Option<Bob>,
}

impl Default for SolidConfig {
    fn default() -> Self {
        let geometry = GeometryKind::TorusKnot;
        Self {
            geometry,
            size: SizeParams::for_kind(geometry),
            rotation_speed: RotationSpeed::new(0.0003, 0.0004, 0.0002),
            bob: None,
        }
    }
}

/// Random node graph with travelling pulses.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    /// Default: 15.
    pub node_count: usize,
    /// Default: 25.
    pub flow_count: usize,
    /// Side length of the cube nodes are placed in. Default: 10.
    pub bounds: f32,
    /// Default: 2.
    pub min_connections: usize,
    /// Default: 4.
    pub max_connections: usize,
    /// Attempts per connection before it is skipped. Default: 20.
    pub max_attempts: usize,
    /// Chance a finished pulse moves on to the next edge. Default: 0.3.
    pub reroute_probability: f32,
    /// Progress gained per frame. Default: `[0.005, 0.02)`.
    pub flow_speed: SpeedRange,
    /// Default: 0.3.
    pub node_size: f32,
    /// Node self-rotation per frame, radians. Default: 0.01.
    pub node_spin: f32,
    /// Whole-scene rotation per frame about Y, radians. Default: 0.001.
    pub scene_spin: f32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_count: 15,
            flow_count: 25,
            bounds: 10.0,
            min_connections: 2,
            max_connections: 4,
            max_attempts: 20,
            reroute_probability: 0.3,
            flow_speed: SpeedRange::new(0.005, 0.02),
            node_size: 0.3,
            node_spin: 0.01,
            scene_spin: 0.001,
        }
    }
}

/// One entry of the weighted particle type table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleKind {
    pub geometry: GeometryKind,
    pub size: f32,
    pub speed: SpeedRange,
    /// Relative weight; the table does not need to sum to one.
    pub weight: f32,
}

/// Packets travelling along horizontal lanes.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneConfig {
    /// Default: 5.
    pub lane_count: usize,
    /// Vertical distance between lanes. Default: 1.5.
    pub lane_spacing: f32,
    /// Default: 40.
    pub particle_count: usize,
    /// Default: -12.
    pub left: f32,
    /// Default: 12.
    pub right: f32,
    /// Chance a wrapping particle changes lane. Default: 0.3.
    pub relane_probability: f32,
    /// Default: small boxes, spheres and tetrahedra weighted 5:3:2.
    pub kinds: Vec<ParticleKind>,
    /// Particle self-rotation per frame, radians. Default: 0.02.
    pub spin: f32,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            lane_count: 5,
            lane_spacing: 1.5,
            particle_count: 40,
            left: -12.0,
            right: 12.0,
            relane_probability: 0.3,
            kinds: vec![
                ParticleKind {
                    geometry: GeometryKind::Box,
                    size: 0.4,
                    speed: SpeedRange::new(0.05, 0.1),
                    weight: 0.5,
                },
                ParticleKind {
                    geometry: GeometryKind::Sphere,
                    size: 0.25,
                    speed: SpeedRange::new(0.08, 0.15),
                    weight: 0.3,
                },
                ParticleKind {
                    geometry: GeometryKind::Tetrahedron,
                    size: 0.35,
                    speed: SpeedRange::new(0.12, 0.2),
                    weight: 0.2,
                },
            ],
            spin: 0.02,
        }
    }
}

/// One depth layer of the parallax starfield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarLayer {
    pub count: usize,
    /// Time for a star to cross the whole field once.
    pub period_ms: u64,
    pub brightness: f32,
}

/// An 8-bit rocket flying over the starfield.
///
/// The rocket is drawn in its own pixel grid (body 24 x 48 pixels, nose up)
/// and placed on the star plane with [`RocketConfig::pixel`] scene units per
/// pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketConfig {
    /// Centre of the rocket on the star plane. Default: `(6, 2)`.
    pub position: [f32; 2],
    /// Scene units per rocket pixel. Default: 0.06.
    pub pixel: f32,
    /// Clockwise tilt from upright. Default: 45.
    pub tilt_degrees: f32,
    /// One full shake cycle. Default: 500 ms.
    pub shake_period_ms: u64,
    /// One full flame flicker. Default: 300 ms.
    pub flicker_period_ms: u64,
}

impl Default for RocketConfig {
    fn default() -> Self {
        Self {
            position: [6.0, 2.0],
            pixel: 0.06,
            tilt_degrees: 45.0,
            shake_period_ms: 500,
            flicker_period_ms: 300,
        }
    }
}

/// Diagonally drifting star layers.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxConfig {
    /// Default: far (40, 40 s, 0.3), mid (20, 25 s, 0.45), near (15, 15 s, 1.0).
    pub layers: Vec<StarLayer>,
    /// Size of the star plane in scene units. Default: 24 x 14.
    pub width: f32,
    pub height: f32,
    /// Default: a rocket right of centre.
    pub rocket: Option<RocketConfig>,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            layers: vec![
                StarLayer {
                    count: 40,
                    period_ms: 40_000,
                    brightness: 0.3,
                },
                StarLayer {
                    count: 20,
                    period_ms: 25_000,
                    brightness: 0.45,
                },
                StarLayer {
                    count: 15,
                    period_ms: 15_000,
                    brightness: 1.0,
                },
            ],
            width: 24.0,
            height: 14.0,
            rocket: Some(RocketConfig::default()),
        }
    }
}

/// Which animator drives the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationConfig {
    Solid(SolidConfig),
    Graph(GraphConfig),
    Lanes(LaneConfig),
    Parallax(ParallaxConfig),
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig::Solid(SolidConfig::default())
    }
}

/// Complete description of one backdrop instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackdropConfig {
    pub animation: AnimationConfig,
    pub style: AsciiStyle,
    pub camera: CameraRig,
    pub lights: LightRig,
    /// Seed for procedural generation; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl BackdropConfig {
    /// Check every option against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.style.validate()?;
        match &self.animation {
            AnimationConfig::Solid(solid) => positive("geometry size", solid.size.size),
            AnimationConfig::Graph(graph) => validate_graph(graph),
            AnimationConfig::Lanes(lanes) => validate_lanes(lanes),
            AnimationConfig::Parallax(parallax) => validate_parallax(parallax),
        }
    }
}

fn probability(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

fn at_least(name: &'static str, min: usize, value: usize) -> Result<(), ConfigError> {
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::TooSmall { name, min, value })
    }
}

fn validate_graph(graph: &GraphConfig) -> Result<(), ConfigError> {
    at_least("node_count", 1, graph.node_count)?;
    at_least("max_attempts", 1, graph.max_attempts)?;
    if graph.min_connections > graph.max_connections {
        return Err(ConfigError::ConnectionRange {
            min: graph.min_connections,
            max: graph.max_connections,
        });
    }
    positive("bounds", graph.bounds)?;
    positive("node_size", graph.node_size)?;
    probability("reroute_probability", graph.reroute_probability)?;
    graph.flow_speed.validate("flow")
}

fn validate_lanes(lanes: &LaneConfig) -> Result<(), ConfigError> {
    at_least("lane_count", 1, lanes.lane_count)?;
    positive("lane_spacing", lanes.lane_spacing)?;
    let span = lanes.right - lanes.left;
    if !(span > 0.0 && span.is_finite()) {
        return Err(ConfigError::Boundary {
            left: lanes.left,
            right: lanes.right,
        });
    }
    probability("relane_probability", lanes.relane_probability)?;
    if lanes.kinds.is_empty() {
        return Err(ConfigError::EmptyParticleTable);
    }
    for kind in &lanes.kinds {
        positive("particle weight", kind.weight)?;
        positive("particle size", kind.size)?;
        kind.speed.validate("particle")?;
    }
    let total_weight: f32 = lanes.kinds.iter().map(|kind| kind.weight).sum();
    positive("total particle weight", total_weight)
}

fn validate_parallax(parallax: &ParallaxConfig) -> Result<(), ConfigError> {
    positive("starfield width", parallax.width)?;
    positive("starfield height", parallax.height)?;
    for layer in &parallax.layers {
        at_least("star layer period_ms", 1, layer.period_ms as usize)?;
        probability("star brightness", layer.brightness)?;
    }
    if let Some(rocket) = &parallax.rocket {
        positive("rocket pixel", rocket.pixel)?;
        finite("rocket tilt", rocket.tilt_degrees)?;
        for coordinate in rocket.position {
            finite("rocket position", coordinate)?;
        }
        at_least("rocket shake_period_ms", 1, rocket.shake_period_ms as usize)?;
        at_least("rocket flicker_period_ms", 1, rocket.flicker_period_ms as usize)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let mut config = BackdropConfig::default();
        assert_eq!(config.validate(), Ok(()));

        config.animation = AnimationConfig::Graph(GraphConfig::default());
        assert_eq!(config.validate(), Ok(()));

        config.animation = AnimationConfig::Lanes(LaneConfig::default());
        assert_eq!(config.validate(), Ok(()));

        config.animation = AnimationConfig::Parallax(ParallaxConfig::default());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_style_validation() {
        let mut config = BackdropConfig::default();
        config.style.ramp.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyRamp));

        let mut config = BackdropConfig::default();
        config.style.resolution = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::Resolution(0.0)));

        let mut config = BackdropConfig::default();
        config.style.opacity = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::Opacity(1.5)));
    }

    #[test]
    fn test_resolution_is_clamped() {
        let style = AsciiStyle {
            resolution: 0.2,
            ..Default::default()
        };
        assert_eq!(style.effective_resolution(), MAX_RESOLUTION);

        let style = AsciiStyle {
            resolution: 0.12,
            ..Default::default()
        };
        assert_eq!(style.effective_resolution(), 0.12);
    }

    #[test]
    fn test_graph_validation() {
        let graph = GraphConfig {
            reroute_probability: 1.2,
            ..Default::default()
        };
        let config = BackdropConfig {
            animation: AnimationConfig::Graph(graph),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Probability { value, .. }) if value == 1.2
        ));

        let graph = GraphConfig {
            min_connections: 5,
            ..Default::default()
        };
        let config = BackdropConfig {
            animation: AnimationConfig::Graph(graph),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ConnectionRange { min: 5, max: 4 })
        );

        let graph = GraphConfig {
            flow_speed: SpeedRange::new(0.02, 0.02),
            ..Default::default()
        };
        let config = BackdropConfig {
            animation: AnimationConfig::Graph(graph),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedRange { .. })
        ));

        for bounds in [f32::INFINITY, f32::NAN] {
            let graph = GraphConfig {
                bounds,
                ..Default::default()
            };
            let config = BackdropConfig {
                animation: AnimationConfig::Graph(graph),
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NotPositive { name: "bounds", .. })
            ));
        }

        let graph = GraphConfig {
            flow_speed: SpeedRange::new(0.005, f32::INFINITY),
            ..Default::default()
        };
        let config = BackdropConfig {
            animation: AnimationConfig::Graph(graph),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedRange { .. })
        ));
    }

    #[test]
    fn test_lane_validation() {
        let lanes = LaneConfig {
            left: 5.0,
            right: 5.0,
            ..Default::default()
        };
        let config = BackdropConfig {
            animation: AnimationConfig::Lanes(lanes),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Boundary {
                left: 5.0,
                right: 5.0
            })
        );

        let lanes = LaneConfig {
            kinds: Vec::new(),
            ..Default::default()
        };
        let config = BackdropConfig {
            animation: AnimationConfig::Lanes(lanes),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyParticleTable));
    }

    #[test]
    fn test_rocket_validation() {
        let with_rocket = |rocket: RocketConfig| BackdropConfig {
            animation: AnimationConfig::Parallax(ParallaxConfig {
                rocket: Some(rocket),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(with_rocket(RocketConfig::default()).validate(), Ok(()));

        let config = with_rocket(RocketConfig {
            tilt_degrees: f32::NAN,
            ..Default::default()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { name: "rocket tilt", .. })
        ));

        let config = with_rocket(RocketConfig {
            shake_period_ms: 0,
            ..Default::default()
        });
        assert!(matches!(config.validate(), Err(ConfigError::TooSmall { .. })));

        let config = with_rocket(RocketConfig {
            pixel: 0.0,
            ..Default::default()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { .. })
        ));
    }

    #[test]
    fn test_lane_validation_rejects_non_finite() {
        let lanes_with = |left: f32, right: f32| BackdropConfig {
            animation: AnimationConfig::Lanes(LaneConfig {
                left,
                right,
                ..Default::default()
            }),
            ..Default::default()
        };
        for (left, right) in [
            (f32::NEG_INFINITY, 12.0),
            (-12.0, f32::INFINITY),
            (f32::NAN, 12.0),
            (-12.0, f32::NAN),
            (-f32::MAX, f32::MAX),
        ] {
            assert!(
                matches!(
                    lanes_with(left, right).validate(),
                    Err(ConfigError::Boundary { .. })
                ),
                "{left}..{right}"
            );
        }

        let mut lanes = LaneConfig::default();
        lanes.kinds[0].speed = SpeedRange::new(0.05, f32::INFINITY);
        let config = BackdropConfig {
            animation: AnimationConfig::Lanes(lanes),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedRange { .. })
        ));

        let mut lanes = LaneConfig::default();
        for kind in &mut lanes.kinds {
            kind.weight = f32::MAX;
        }
        let config = BackdropConfig {
            animation: AnimationConfig::Lanes(lanes),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                name: "total particle weight",
                ..
            })
        ));
    }
}
