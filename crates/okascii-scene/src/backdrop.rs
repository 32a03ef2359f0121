//! A mounted backdrop and its frame loop state.

use okascii_core::{BackdropConfig, ConfigError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::animations::Animation;
use crate::clock::Clock;
use crate::effect::PostEffectRenderer;
use crate::mount::{LayerId, MountPoint};
use crate::scene::SceneHost;
use crate::schedule::{FrameRegistration, FrameScheduler};

#[derive(Debug)]
enum LoopState {
    Running(FrameRegistration),
    Stopped,
}

/// Everything one mounted backdrop owns.
///
/// Built by [`AnimatedBackdrop::mount`], driven by calling
/// [`AnimatedBackdrop::frame`] once per frame, and torn down with
/// [`AnimatedBackdrop::unmount`].
#[derive(Debug)]
pub struct AnimatedBackdrop {
    host: SceneHost,
    effect: PostEffectRenderer,
    animation: Animation,
    state: LoopState,
    started_ms: Option<u64>,
    seed: u64,
}

impl AnimatedBackdrop {
    /// Build the scene, attach the effect layer and register for frames.
    ///
    /// Returns `Ok(None)` while `mount` has no area; nothing is attached or
    /// registered in that case and the caller should try again after the
    /// next resize.
    pub fn mount(
        config: &BackdropConfig,
        mount: &mut MountPoint,
        scheduler: &mut FrameScheduler,
    ) -> Result<Option<Self>, ConfigError> {
        config.validate()?;
        let Some(mut host) = SceneHost::new(config, mount.width(), mount.height()) else {
            debug!(
                width = mount.width(),
                height = mount.height(),
                "mount point not ready"
            );
            return Ok(None);
        };

        let seed = config.seed.unwrap_or_else(rand::random);
        let animation = Animation::build(
            &config.animation,
            host.scene_mut(),
            StdRng::seed_from_u64(seed),
        );
        let effect = PostEffectRenderer::attach(&config.style, mount);
        let registration = scheduler.register();

        debug!(
            animation = animation.name(),
            seed,
            objects = host.scene().len(),
            "backdrop mounted"
        );

        Ok(Some(Self {
            host,
            effect,
            animation,
            state: LoopState::Running(registration),
            started_ms: None,
            seed,
        }))
    }

    /// Update and render one frame. Returns `false` once stopped.
    ///
    /// Elapsed time is measured from the first frame.
    pub fn frame(&mut self, mount: &mut MountPoint, clock: &impl Clock) -> bool {
        let LoopState::Running(registration) = &self.state else {
            return false;
        };
        if registration.is_cancelled() {
            self.state = LoopState::Stopped;
            return false;
        }

        let now = clock.now_ms();
        let elapsed_ms = now.saturating_sub(*self.started_ms.get_or_insert(now));
        self.animation.update(self.host.scene_mut(), elapsed_ms);
        self.effect.render(&self.host, mount, elapsed_ms);
        true
    }

    /// Follow a mount point resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!(width, height, "ignoring resize to empty surface");
            return;
        }
        self.host.resize(width, height);
        self.effect.set_size(width, height);
    }

    /// Cancel the frame registration. Later frames do nothing.
    pub fn stop(&mut self, scheduler: &mut FrameScheduler) {
        if let LoopState::Running(registration) = &self.state {
            scheduler.cancel(registration);
        }
        self.state = LoopState::Stopped;
    }

    pub fn is_running(&self) -> bool {
        match &self.state {
            LoopState::Running(registration) => !registration.is_cancelled(),
            LoopState::Stopped => false,
        }
    }

    /// Stop, detach the glyph layer and release the scene.
    ///
    /// Returns how many scene objects were released.
    pub fn unmount(mut self, mount: &mut MountPoint, scheduler: &mut FrameScheduler) -> usize {
        self.stop(scheduler);
        self.effect.detach(mount);
        let released = self.host.dispose();
        debug!(released, "backdrop unmounted");
        released
    }

    pub fn host(&self) -> &SceneHost {
        &self.host
    }

    pub fn effect(&self) -> &PostEffectRenderer {
        &self.effect
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn layer(&self) -> LayerId {
        self.effect.layer()
    }

    /// Seed the procedural content was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
