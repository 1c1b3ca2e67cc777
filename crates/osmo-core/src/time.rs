//! Scene clock and frame scheduling.
//!
//! Timing is always derived from wall-clock timestamps handed in by the
//! host (milliseconds, monotonic), never from tick counts, so behaviour is
//! the same at 30, 60 or 144 Hz and survives dropped frames.

use crate::constants::{MAX_FRAME_DELTA_SECS, MAX_SUBSTEP_SECS};
use std::cell::RefCell;

/// Time values for one tick, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the scene's first frame.
    pub elapsed: f32,
    /// Seconds since the previous frame, clamped to `MAX_FRAME_DELTA_SECS`.
    pub dt: f32,
}

/// Per-scene clock.
///
/// `Running` anchors to the first timestamp it sees. `Settled` ignores the
/// host clock and always reports one fixed elapsed time (reduced motion).
#[derive(Clone, Debug, PartialEq)]
pub enum SceneClock {
    Running {
        start_ms: Option<f64>,
        last_ms: Option<f64>,
    },
    Settled {
        elapsed: f32,
    },
}

impl SceneClock {
    pub fn running() -> Self {
        SceneClock::Running {
            start_ms: None,
            last_ms: None,
        }
    }

    pub fn settled(elapsed: f32) -> Self {
        SceneClock::Settled { elapsed }
    }

    /// Advance to `now_ms`. Timestamps that go backwards yield `dt = 0`.
    pub fn advance(&mut self, now_ms: f64) -> FrameTime {
        match self {
            SceneClock::Settled { elapsed } => FrameTime {
                elapsed: *elapsed,
                dt: 0.0,
            },
            SceneClock::Running { start_ms, last_ms } => {
                let start = *start_ms.get_or_insert(now_ms);
                let dt_ms = last_ms.map(|last| now_ms - last).unwrap_or(0.0);
                *last_ms = Some(now_ms);
                FrameTime {
                    elapsed: ((now_ms - start).max(0.0) / 1000.0) as f32,
                    dt: ((dt_ms.max(0.0) / 1000.0) as f32).min(MAX_FRAME_DELTA_SECS),
                }
            }
        }
    }
}

/// Split `dt` into equal sub-steps no longer than `MAX_SUBSTEP_SECS`.
pub fn substeps(dt: f32) -> (u32, f32) {
    if !(dt.is_finite() && dt > 0.0) {
        return (0, 0.0);
    }
    let n = (dt / MAX_SUBSTEP_SECS).ceil().max(1.0) as u32;
    (n, dt / n as f32)
}

/// Opaque id of a registered frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Frame callback; receives the host's timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Per-display-frame scheduler (`requestAnimationFrame` in a browser).
///
/// Callbacks are one-shot; a loop re-registers from inside its callback.
pub trait FrameScheduler {
    /// Returns `None` when the host refuses the registration.
    fn register(&self, callback: FrameCallback) -> Option<FrameHandle>;
    fn cancel(&self, handle: FrameHandle);
}

/// Scheduler driven by hand: time is injected and frames fire on request.
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    next_id: RefCell<i32>,
    registrations: RefCell<u32>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Total number of `register` calls so far.
    pub fn registrations(&self) -> u32 {
        *self.registrations.borrow()
    }

    /// Run every callback pending at call time. Callbacks registered while
    /// firing wait for the next call. Returns how many ran.
    pub fn fire(&self, now_ms: f64) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let n = due.len();
        for (_, cb) in due {
            cb(now_ms);
        }
        n
    }

    /// Fire one frame every `step_ms` for `frames` frames, starting at `start_ms`.
    pub fn run(&self, start_ms: f64, step_ms: f64, frames: u32) -> f64 {
        let mut t = start_ms;
        for _ in 0..frames {
            self.fire(t);
            t += step_ms;
        }
        t
    }
}

impl FrameScheduler for ManualScheduler {
    fn register(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let mut id = self.next_id.borrow_mut();
        *id += 1;
        let handle = FrameHandle(*id);
        *self.registrations.borrow_mut() += 1;
        self.pending.borrow_mut().push((handle, callback));
        Some(handle)
    }

    fn cancel(&self, handle: FrameHandle) {
        self.pending.borrow_mut().retain(|(h, _)| *h != handle);
    }
}
