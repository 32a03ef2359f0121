//! Animated ASCII backdrops for the terminal.
//!
//! A backdrop is a small 3D scene (rotating solids, a node graph with
//! travelling pulses, packets on lanes or a parallax starfield) that is
//! rasterized in software and painted as characters onto a glyph layer of a
//! [`MountPoint`]. The caller owns the render loop and calls
//! [`AnimatedBackdrop::frame`] once per frame.

pub mod animations;
mod backdrop;
mod clock;
mod effect;
mod geometry;
mod mount;
mod raster;
mod scene;
mod schedule;

pub use animations::Animation;
pub use backdrop::AnimatedBackdrop;
pub use clock::{Clock, ManualClock, SystemClock};
pub use effect::{GLYPH_ASPECT, PostEffectRenderer, grid_size};
pub use geometry::{Mesh, block, make_geometry};
pub use mount::{
    CELL_HEIGHT_PX, CELL_WIDTH_PX, GlyphGrid, Layer, LayerId, LayerStyle, MountPoint,
    cells_to_pixels,
};
pub use raster::Raster;
pub use scene::{Camera, ObjectId, PointLight, Primitive, Scene, SceneHost, SceneObject, Transform};
pub use schedule::{CancelToken, FrameRegistration, FrameScheduler, frame_interval};
