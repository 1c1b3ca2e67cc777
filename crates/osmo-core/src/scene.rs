//! The two mountable scenes. Each owns its field, clock, cursor and RNG;
//! nothing is shared between instances.

use crate::config::{MotionConfig, OrbConfig, StarfieldConfig};
use crate::error::ConfigError;
use crate::frame::Scene;
use crate::interaction::{Cursor, InteractionSink};
use crate::motion::{MotionPolicy, Viewport};
use crate::orb::{OrbFrame, OrbitRing};
use crate::render;
use crate::starfield::{Starfield, StarfieldFrame};
use crate::surface::DrawingSurface;
use crate::time::SceneClock;
use crate::transition::{TransitionEvent, TransitionMachine, TransitionState};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Scene time for an event at `now_ms`, without advancing the clock.
fn event_time(clock: &SceneClock, now_ms: f64) -> f32 {
    match clock {
        SceneClock::Settled { elapsed } => *elapsed,
        SceneClock::Running { start_ms, .. } => start_ms
            .map(|start| ((now_ms - start).max(0.0) / 1000.0) as f32)
            .unwrap_or(0.0),
    }
}

pub struct StarfieldScene {
    field: Starfield,
    clock: SceneClock,
    cursor: Cursor,
    policy: MotionPolicy,
    motion: MotionConfig,
    rng: StdRng,
}

impl StarfieldScene {
    pub fn new(
        config: StarfieldConfig,
        motion: MotionConfig,
        viewport: Viewport,
        policy: MotionPolicy,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = policy.star_count(&motion, viewport);
        let clock = policy.clock(config.settled_elapsed());
        let field = Starfield::new(config, viewport, count, policy.is_reduced(), &mut rng)?;
        log::info!(
            "[starfield] mounted stars={} viewport={}x{} policy={:?}",
            field.len(),
            viewport.width,
            viewport.height,
            policy
        );
        Ok(Self {
            field,
            clock,
            cursor: Cursor::OFF_SCENE,
            policy,
            motion,
            rng,
        })
    }

    pub fn field(&self) -> &Starfield {
        &self.field
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn policy(&self) -> MotionPolicy {
        self.policy
    }

    /// Advance the clock to `now_ms` and compute the frame.
    pub fn snapshot(&mut self, now_ms: f64) -> StarfieldFrame {
        let time = self.clock.advance(now_ms);
        self.field.update(time.elapsed, self.cursor)
    }
}

impl Scene for StarfieldScene {
    fn is_continuous(&self) -> bool {
        !self.policy.is_reduced()
    }

    fn surface_size(&self) -> (f32, f32) {
        let vp = self.field.viewport();
        (vp.width, vp.height)
    }

    fn render_frame(&mut self, now_ms: f64, surface: &mut dyn DrawingSurface) {
        let frame = self.snapshot(now_ms);
        render::render_starfield(surface, &frame);
    }

    fn needs_rebuild(&self, viewport: Viewport) -> bool {
        viewport != self.field.viewport() || self.policy.star_count(&self.motion, viewport) != self.field.len()
    }

    fn rebuild(&mut self, viewport: Viewport) {
        let count = self.policy.star_count(&self.motion, viewport);
        self.field.rebuild(viewport, count, &mut self.rng);
        log::info!(
            "[starfield] rebuilt stars={} viewport={}x{}",
            count,
            viewport.width,
            viewport.height
        );
    }

    fn teardown(&mut self) {
        self.field.clear();
        self.cursor = Cursor::OFF_SCENE;
        log::debug!("[starfield] torn down");
    }
}

impl InteractionSink for StarfieldScene {
    fn pointer_enter(&mut self, _now_ms: f64) {}

    fn pointer_leave(&mut self, _now_ms: f64) {
        self.cursor = Cursor::OFF_SCENE;
    }

    fn pointer_move(&mut self, pos: Vec2, _now_ms: f64) {
        self.cursor = Cursor::at(pos);
    }

    fn click(&mut self, _now_ms: f64) {}
}

pub struct OrbScene {
    ring: OrbitRing,
    machine: TransitionMachine,
    clock: SceneClock,
    cursor: Cursor,
    policy: MotionPolicy,
    motion: MotionConfig,
    rng: StdRng,
}

impl OrbScene {
    pub fn new(
        config: OrbConfig,
        motion: MotionConfig,
        viewport: Viewport,
        policy: MotionPolicy,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = policy.orb_count(&motion, viewport);
        let clock = policy.clock(config.settled_elapsed());
        let machine = TransitionMachine::new(config.scatter_out_secs, config.reform_secs);
        let ring = OrbitRing::new(config, count, policy.is_reduced(), &mut rng)?;
        log::info!("[orb] mounted particles={} policy={:?}", ring.len(), policy);
        Ok(Self {
            ring,
            machine,
            clock,
            cursor: Cursor::OFF_SCENE,
            policy,
            motion,
            rng,
        })
    }

    pub fn ring(&self) -> &OrbitRing {
        &self.ring
    }

    pub fn machine(&self) -> &TransitionMachine {
        &self.machine
    }

    pub fn state(&self) -> TransitionState {
        self.machine.state()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn snapshot(&mut self, now_ms: f64) -> OrbFrame {
        let time = self.clock.advance(now_ms);
        self.machine.advance(time.elapsed);
        self.ring.update(time, &self.machine)
    }

    fn transition(&mut self, event: TransitionEvent, now_ms: f64) {
        // Without a frame loop nothing would ever resolve the new state.
        if self.policy.is_reduced() {
            return;
        }
        let now = event_time(&self.clock, now_ms);
        self.machine.advance(now);
        self.machine.handle(event, now);
    }
}

impl Scene for OrbScene {
    fn is_continuous(&self) -> bool {
        !self.policy.is_reduced()
    }

    fn surface_size(&self) -> (f32, f32) {
        let size = self.ring.config().canvas_size;
        (size, size)
    }

    fn render_frame(&mut self, now_ms: f64, surface: &mut dyn DrawingSurface) {
        let frame = self.snapshot(now_ms);
        render::render_orb(surface, &frame);
    }

    /// The canvas never changes size; only a breakpoint crossing that
    /// changes the target population triggers a rebuild.
    fn needs_rebuild(&self, viewport: Viewport) -> bool {
        self.policy.orb_count(&self.motion, viewport) != self.ring.len()
    }

    fn rebuild(&mut self, viewport: Viewport) {
        let count = self.policy.orb_count(&self.motion, viewport);
        self.ring.rebuild(count, &mut self.rng);
        log::info!("[orb] rebuilt particles={}", count);
    }

    fn teardown(&mut self) {
        self.ring.clear();
        self.cursor = Cursor::OFF_SCENE;
        log::debug!("[orb] torn down");
    }
}

impl InteractionSink for OrbScene {
    fn pointer_enter(&mut self, now_ms: f64) {
        self.transition(TransitionEvent::PointerEnter, now_ms);
    }

    fn pointer_leave(&mut self, now_ms: f64) {
        self.cursor = Cursor::OFF_SCENE;
        self.transition(TransitionEvent::PointerLeave, now_ms);
    }

    fn pointer_move(&mut self, pos: Vec2, _now_ms: f64) {
        self.cursor = Cursor::at(pos);
    }

    fn click(&mut self, now_ms: f64) {
        self.transition(TransitionEvent::Click, now_ms);
    }
}
