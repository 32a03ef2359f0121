//! Frame registrations and cancellation.
//!
//! The render loop is owned by the caller. A mounted backdrop holds a
//! [`FrameRegistration`] from the caller's [`FrameScheduler`]; cancelling it
//! stops every later frame from doing any work.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::debug;

/// Shared flag telling a loop or frame callback to stop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A live claim on per-frame callbacks.
#[derive(Debug)]
pub struct FrameRegistration {
    id: u64,
    token: CancelToken,
}

impl FrameRegistration {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Hands out frame registrations and tracks which are still live.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    live: Vec<(u64, CancelToken)>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> FrameRegistration {
        let id = self.next_id;
        self.next_id += 1;
        let token = CancelToken::new();
        self.live.push((id, token.clone()));
        debug!(id, "frame callback registered");
        FrameRegistration { id, token }
    }

    /// Cancel a registration. Its frames stop immediately.
    pub fn cancel(&mut self, registration: &FrameRegistration) {
        registration.token.cancel();
        self.live.retain(|(id, _)| *id != registration.id);
        debug!(id = registration.id, "frame callback cancelled");
    }

    /// Number of registrations that have not been cancelled.
    pub fn active_count(&self) -> usize {
        self.live
            .iter()
            .filter(|(_, token)| !token.is_cancelled())
            .count()
    }
}

/// Time between frames at `fps` frames per second.
pub fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}
