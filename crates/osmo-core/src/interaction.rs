use glam::Vec2;

/// Shared pointer coordinate in scene-local space; `None` is off-scene.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor(Option<Vec2>);

impl Cursor {
    pub const OFF_SCENE: Cursor = Cursor(None);

    pub fn at(pos: Vec2) -> Self {
        // A non-finite coordinate would poison every distance computed from it.
        if pos.is_finite() {
            Cursor(Some(pos))
        } else {
            Cursor(None)
        }
    }

    pub fn position(&self) -> Option<Vec2> {
        self.0
    }

    pub fn is_on_scene(&self) -> bool {
        self.0.is_some()
    }
}

/// Pointer input a scene reacts to. Coordinates are scene-local.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Enter,
    Leave,
    Move(Vec2),
    Click,
}

/// Receiver of discrete pointer events. `now_ms` is the host clock at the
/// time of the event, on the same timeline as frame timestamps.
pub trait InteractionSink {
    fn pointer_enter(&mut self, now_ms: f64);
    fn pointer_leave(&mut self, now_ms: f64);
    fn pointer_move(&mut self, pos: Vec2, now_ms: f64);
    fn click(&mut self, now_ms: f64);

    fn dispatch(&mut self, input: PointerInput, now_ms: f64) {
        match input {
            PointerInput::Enter => self.pointer_enter(now_ms),
            PointerInput::Leave => self.pointer_leave(now_ms),
            PointerInput::Move(pos) => self.pointer_move(pos, now_ms),
            PointerInput::Click => self.click(now_ms),
        }
    }
}
