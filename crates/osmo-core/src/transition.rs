//! Interaction mode of the orb.
//!
//! ```text
//! Idle --enter--> Hovered --leave--> Idle
//! Idle | Hovered --click--> Scattering --(scatter_out elapsed)--> Reforming
//! Reforming --(reform elapsed)--> Hovered if the pointer is inside, else Idle
//! ```
//!
//! Clicks during a scatter or reform are dropped, not queued. Enter and
//! leave never interrupt a scatter; they only update where the pointer is,
//! which decides the state the reform lands in.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionState {
    Idle,
    Hovered,
    Scattering,
    Reforming,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionEvent {
    PointerEnter,
    PointerLeave,
    Click,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionMachine {
    state: TransitionState,
    entered_at: f32,
    pointer_inside: bool,
    scatter_out_secs: f32,
    reform_secs: f32,
}

impl TransitionMachine {
    pub fn new(scatter_out_secs: f32, reform_secs: f32) -> Self {
        Self {
            state: TransitionState::Idle,
            entered_at: 0.0,
            pointer_inside: false,
            scatter_out_secs,
            reform_secs,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Scene time at which the current state was entered.
    pub fn entered_at(&self) -> f32 {
        self.entered_at
    }

    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// Clamped 0..1 progress through the current timed state; 0 for untimed ones.
    pub fn progress(&self, now: f32) -> f32 {
        let span = match self.state {
            TransitionState::Scattering => self.scatter_out_secs,
            TransitionState::Reforming => self.reform_secs,
            TransitionState::Idle | TransitionState::Hovered => return 0.0,
        };
        ((now - self.entered_at) / span).clamp(0.0, 1.0)
    }

    /// Apply a pointer event. Returns whether the state changed.
    pub fn handle(&mut self, event: TransitionEvent, now: f32) -> bool {
        use TransitionState::*;
        match event {
            TransitionEvent::PointerEnter => self.pointer_inside = true,
            TransitionEvent::PointerLeave => self.pointer_inside = false,
            TransitionEvent::Click => {}
        }
        let next = match (self.state, event) {
            (Idle, TransitionEvent::PointerEnter) => Hovered,
            (Hovered, TransitionEvent::PointerLeave) => Idle,
            (Idle | Hovered, TransitionEvent::Click) => Scattering,
            (state, TransitionEvent::Click) => {
                log::debug!("[orb] click ignored while {:?}", state);
                return false;
            }
            _ => return false,
        };
        self.enter(next, now);
        true
    }

    /// Apply timed auto-transitions. A long gap between ticks can walk
    /// through both timed states in one call; entry times stay on the
    /// nominal schedule rather than the tick time.
    pub fn advance(&mut self, now: f32) {
        loop {
            match self.state {
                TransitionState::Scattering if now - self.entered_at >= self.scatter_out_secs => {
                    let at = self.entered_at + self.scatter_out_secs;
                    self.enter(TransitionState::Reforming, at);
                }
                TransitionState::Reforming if now - self.entered_at >= self.reform_secs => {
                    let at = self.entered_at + self.reform_secs;
                    let rest = if self.pointer_inside {
                        TransitionState::Hovered
                    } else {
                        TransitionState::Idle
                    };
                    self.enter(rest, at);
                }
                _ => break,
            }
        }
    }

    fn enter(&mut self, state: TransitionState, at: f32) {
        self.state = state;
        self.entered_at = at;
    }
}
