pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod interaction;
pub mod motion;
pub mod noise;
pub mod orb;
pub mod render;
pub mod scene;
pub mod starfield;
pub mod surface;
pub mod time;
pub mod transition;

pub use config::*;
pub use error::ConfigError;
pub use frame::{Scene, SceneRunner};
pub use interaction::{Cursor, InteractionSink, PointerInput};
pub use motion::{MotionPolicy, Viewport};
pub use orb::{OrbFrame, OrbitRing};
pub use scene::{OrbScene, StarfieldScene};
pub use starfield::{Starfield, StarfieldFrame};
pub use surface::{DrawingSurface, RecordingSurface, Rgba};
pub use time::{FrameHandle, FrameScheduler, FrameTime, ManualScheduler, SceneClock};
pub use transition::{TransitionEvent, TransitionMachine, TransitionState};
