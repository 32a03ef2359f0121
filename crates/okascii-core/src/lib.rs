//! Core types shared by the okascii crates.
//!
//! Everything a backdrop needs to know before it is mounted lives here: the
//! configuration record and its validation, colours, geometry selectors and
//! the named presets used by the showcase binary.

mod chars;
mod color;
mod config;
mod error;
mod geometry;
mod preset;

pub use chars::{BLOCK_RAMP, CLASSIC_RAMP, DETAILED_RAMP, DOT_RAMP, NAMED_RAMPS, named_ramp};
pub use color::Rgb;
pub use config::{
    AnimationConfig, AsciiStyle, BackdropConfig, Bob, CameraRig, DEFAULT_RAMP, GraphConfig,
    LaneConfig, LightRig, MAX_RESOLUTION, ParallaxConfig, ParticleKind, RocketConfig,
    RotationSpeed, SolidConfig, SpeedRange, StarLayer,
};
pub use error::ConfigError;
pub use geometry::{GeometryKind, SizeParams};
pub use preset::Preset;
