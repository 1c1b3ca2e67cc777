//! Frame loop: one scene, one surface, one scheduler.
//!
//! A tick renders synchronously and only then re-registers, so ticks never
//! overlap. Under a single-frame policy nothing is ever registered.
//!
//! Resizes that arrive while a frame is pending are coalesced: the latest
//! viewport is applied at the start of that frame and the registration is
//! left alone. Only teardown cancels.

use crate::motion::Viewport;
use crate::surface::DrawingSurface;
use crate::time::{FrameHandle, FrameScheduler};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A mountable effect driven by `SceneRunner`.
pub trait Scene {
    /// `false` means one settled frame and no loop.
    fn is_continuous(&self) -> bool;
    /// Backing size the surface must have, in CSS pixels.
    fn surface_size(&self) -> (f32, f32);
    fn render_frame(&mut self, now_ms: f64, surface: &mut dyn DrawingSurface);
    fn needs_rebuild(&self, viewport: Viewport) -> bool;
    /// Replace the population for `viewport`, fully built before it is swapped in.
    fn rebuild(&mut self, viewport: Viewport);
    fn teardown(&mut self);
}

pub struct FrameLoop<S, D> {
    scene: S,
    surface: D,
    pending: Option<FrameHandle>,
    pending_viewport: Option<Viewport>,
    frames: u64,
    torn_down: bool,
}

impl<S: Scene, D: DrawingSurface> FrameLoop<S, D> {
    pub fn new(scene: S, surface: D) -> Self {
        Self {
            scene,
            surface,
            pending: None,
            pending_viewport: None,
            frames: 0,
            torn_down: false,
        }
    }

    fn tick(&mut self, now_ms: f64) {
        if self.torn_down {
            return;
        }
        if let Some(viewport) = self.pending_viewport.take() {
            self.apply_viewport(viewport);
        }
        self.scene.render_frame(now_ms, &mut self.surface);
        self.frames += 1;
    }

    /// Rebuild for `viewport` if the scene needs it. Returns whether it did.
    fn apply_viewport(&mut self, viewport: Viewport) -> bool {
        if !self.scene.needs_rebuild(viewport) {
            return false;
        }
        self.scene.rebuild(viewport);
        self.sync_surface_size();
        true
    }

    fn sync_surface_size(&mut self) {
        let (w, h) = self.scene.surface_size();
        self.surface.set_size(w, h);
    }
}

/// Cloneable handle to a running scene. Frame callbacks hold only a weak
/// reference, so dropping every `SceneRunner` ends the loop.
pub struct SceneRunner<S, D> {
    shared: Rc<RefCell<FrameLoop<S, D>>>,
    scheduler: Rc<dyn FrameScheduler>,
}

impl<S, D> Clone for SceneRunner<S, D> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            scheduler: Rc::clone(&self.scheduler),
        }
    }
}

impl<S: Scene + 'static, D: DrawingSurface + 'static> SceneRunner<S, D> {
    pub fn new(scene: S, surface: D, scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            shared: Rc::new(RefCell::new(FrameLoop::new(scene, surface))),
            scheduler,
        }
    }

    /// Size the surface, then either register the loop or render the one
    /// settled frame synchronously at `now_ms`.
    pub fn start(&self, now_ms: f64) {
        let continuous = {
            let mut lp = self.shared.borrow_mut();
            if lp.torn_down {
                return;
            }
            lp.sync_surface_size();
            lp.scene.is_continuous()
        };
        if continuous {
            if self.shared.borrow().pending.is_none() {
                schedule(&self.shared, &self.scheduler);
            }
        } else {
            self.shared.borrow_mut().tick(now_ms);
        }
    }

    /// Rebuild on a bounds-changing resize. With a frame pending the new
    /// viewport waits for that frame; otherwise the scene is rebuilt now and
    /// the loop (or the settled frame) restarts.
    pub fn resize(&self, viewport: Viewport, now_ms: f64) {
        let rebuilt = {
            let mut lp = self.shared.borrow_mut();
            if lp.torn_down {
                return;
            }
            if lp.pending.is_some() {
                lp.pending_viewport = Some(viewport);
                return;
            }
            lp.apply_viewport(viewport)
        };
        if rebuilt {
            self.start(now_ms);
        }
    }

    pub fn teardown(&self) {
        self.cancel_pending();
        let mut lp = self.shared.borrow_mut();
        lp.pending_viewport = None;
        if !lp.torn_down {
            lp.torn_down = true;
            lp.scene.teardown();
        }
    }

    /// Run `f` against the scene between ticks (pointer events).
    pub fn with_scene<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.shared.borrow_mut().scene)
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        f(&mut self.shared.borrow_mut().surface)
    }

    pub fn frames(&self) -> u64 {
        self.shared.borrow().frames
    }

    pub fn is_scheduled(&self) -> bool {
        self.shared.borrow().pending.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.shared.borrow().torn_down
    }

    fn cancel_pending(&self) {
        let pending = self.shared.borrow_mut().pending.take();
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
    }
}

fn schedule<S: Scene + 'static, D: DrawingSurface + 'static>(
    shared: &Rc<RefCell<FrameLoop<S, D>>>,
    scheduler: &Rc<dyn FrameScheduler>,
) {
    let weak: Weak<RefCell<FrameLoop<S, D>>> = Rc::downgrade(shared);
    let sched = Rc::clone(scheduler);
    let handle = scheduler.register(Box::new(move |now_ms: f64| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        {
            let mut lp = shared.borrow_mut();
            lp.pending = None;
            if lp.torn_down {
                return;
            }
            lp.tick(now_ms);
        }
        schedule(&shared, &sched);
    }));
    if handle.is_none() {
        log::error!("[frame] scheduler refused frame registration");
    }
    shared.borrow_mut().pending = handle;
}
