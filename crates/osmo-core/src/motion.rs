use crate::config::MotionConfig;
use crate::time::SceneClock;

/// Host viewport in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: clean(width),
            height: clean(height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// How a scene produces frames, decided once from the motion preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionPolicy {
    /// Frame loop on the host scheduler.
    Continuous,
    /// One synchronous frame at a settled timestamp, no loop.
    SingleFrame,
}

impl MotionPolicy {
    pub fn from_preference(prefers_reduced_motion: bool) -> Self {
        if prefers_reduced_motion {
            MotionPolicy::SingleFrame
        } else {
            MotionPolicy::Continuous
        }
    }

    pub fn is_reduced(&self) -> bool {
        matches!(self, MotionPolicy::SingleFrame)
    }

    pub fn star_count(&self, config: &MotionConfig, viewport: Viewport) -> usize {
        config
            .stars
            .resolve(viewport.width, config.narrow_max_width, self.is_reduced())
    }

    pub fn orb_count(&self, config: &MotionConfig, viewport: Viewport) -> usize {
        config
            .orb
            .resolve(viewport.width, config.narrow_max_width, self.is_reduced())
    }

    /// Clock for a scene whose timelines all resolve by `settled_elapsed`.
    pub fn clock(&self, settled_elapsed: f32) -> SceneClock {
        match self {
            MotionPolicy::Continuous => SceneClock::running(),
            MotionPolicy::SingleFrame => SceneClock::settled(settled_elapsed),
        }
    }
}
