//! Named backdrop presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    AnimationConfig, AsciiStyle, BackdropConfig, Bob, CameraRig, ConfigError, GeometryKind,
    GraphConfig, LaneConfig, LightRig, ParallaxConfig, Rgb, RotationSpeed, SizeParams,
    SolidConfig,
};

/// Backdrops shipped with okascii.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Blue torus knot.
    #[default]
    Stream,
    /// Green torus.
    Flow,
    /// Yellow sphere.
    Deploy,
    /// Larger torus knot that bobs up and down, with scanlines.
    Hero,
    /// Random node graph with travelling pulses.
    Graph,
    /// Packets travelling along lanes.
    Packets,
    /// Parallax starfield with a shaking rocket.
    Engine,
}

impl Preset {
    pub const ALL: [Preset; 7] = [
        Preset::Stream,
        Preset::Flow,
        Preset::Deploy,
        Preset::Hero,
        Preset::Graph,
        Preset::Packets,
        Preset::Engine,
    ];

    /// Cycle to the next preset.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous preset.
    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Short name used in config files and the status line.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Stream => "stream",
            Preset::Flow => "flow",
            Preset::Deploy => "deploy",
            Preset::Hero => "hero",
            Preset::Graph => "graph",
            Preset::Packets => "packets",
            Preset::Engine => "engine",
        }
    }

    /// Build the full configuration for this preset.
    pub fn config(self) -> BackdropConfig {
        match self {
            Preset::Stream => solid(
                GeometryKind::TorusKnot,
                "#4a9eff",
                RotationSpeed::new(0.0003, 0.0004, 0.0002),
            ),
            Preset::Flow => solid(
                GeometryKind::Torus,
                "#82ca9d",
                RotationSpeed::new(0.0002, 0.0005, 0.0001),
            ),
            Preset::Deploy => solid(
                GeometryKind::Sphere,
                "#ffc658",
                RotationSpeed::new(0.0001, 0.0003, 0.0004),
            ),
            Preset::Hero => {
                let geometry = GeometryKind::TorusKnot;
                BackdropConfig {
                    animation: AnimationConfig::Solid(SolidConfig {
                        geometry,
                        size: SizeParams {
                            size: 200.0,
                            tube: 60.0,
                            ..SizeParams::for_kind(geometry)
                        },
                        rotation_speed: RotationSpeed::new(0.0003, 0.0004, 0.0002),
                        bob: Some(Bob {
                            amplitude: 50.0,
                            frequency: 0.0005,
                        }),
                    }),
                    style: AsciiStyle {
                        resolution: 0.15,
                        scanlines: true,
                        ..AsciiStyle::default()
                    },
                    camera: CameraRig {
                        position: [0.0, 150.0, 800.0],
                        ..CameraRig::solid()
                    },
                    ..BackdropConfig::default()
                }
            }
            Preset::Graph => BackdropConfig {
                animation: AnimationConfig::Graph(GraphConfig::default()),
                style: style("#82ca9d"),
                camera: CameraRig::particles(15.0),
                lights: LightRig::corners(10.0),
                seed: None,
            },
            Preset::Packets => BackdropConfig {
                animation: AnimationConfig::Lanes(LaneConfig::default()),
                style: style("#ff8042"),
                camera: CameraRig::particles(15.0),
                lights: LightRig::corners(10.0),
                seed: None,
            },
            Preset::Engine => BackdropConfig {
                animation: AnimationConfig::Parallax(ParallaxConfig::default()),
                style: style("#7ec0ee"),
                camera: CameraRig::particles(10.0),
                lights: LightRig::corners(10.0),
                seed: None,
            },
        }
    }
}

fn style(hex: &str) -> AsciiStyle {
    AsciiStyle {
        color: hex.parse().unwrap_or(Rgb::WHITE),
        ..AsciiStyle::default()
    }
}

fn solid(geometry: GeometryKind, hex: &str, rotation_speed: RotationSpeed) -> BackdropConfig {
    BackdropConfig {
        animation: AnimationConfig::Solid(SolidConfig {
            geometry,
            size: SizeParams::for_kind(geometry),
            rotation_speed,
            bob: None,
        }),
        style: style(hex),
        ..BackdropConfig::default()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}
