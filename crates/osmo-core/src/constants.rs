// Shared tuning constants for both scenes. Per-scene config structs take
// their defaults from here.

// Population sizing
pub const NARROW_VIEWPORT_MAX_WIDTH: f32 = 768.0; // below this width a viewport counts as narrow
pub const STAR_COUNT_WIDE: i32 = 120;
pub const STAR_COUNT_NARROW: i32 = 80;
pub const STAR_COUNT_REDUCED: i32 = 0; // reduced motion disables the starfield outright
pub const ORB_COUNT_WIDE: i32 = 150;
pub const ORB_COUNT_NARROW: i32 = 100;
pub const ORB_COUNT_REDUCED: i32 = 50;

// Starfield: per-star sampling ranges
pub const STAR_SIZE: (f32, f32) = (0.6, 2.8);
pub const STAR_BRIGHTNESS: (f32, f32) = (0.3, 1.0);
pub const STAR_PULSE_SPEED: (f32, f32) = (0.5, 2.5); // rad/s
pub const STAR_DRIFT_SPEED: (f32, f32) = (0.1, 0.5); // rad/s
pub const STAR_HUE: (f32, f32) = (0.55, 0.75); // turns
pub const STAR_REVEAL_DELAY_MAX: f32 = 2.5; // seconds
pub const STAR_REVEAL_DURATION: f32 = 0.6; // seconds

// Starfield: motion
pub const STAR_DRIFT_AMPLITUDE: f32 = 2.0;
pub const STAR_DRIFT_Y_RATIO: f32 = 0.7; // y drift frequency relative to x
pub const STAR_PULSE_BASE: f32 = 0.65;
pub const STAR_PULSE_SPAN: f32 = 0.35;

// Pointer repulsion
pub const REPEL_RADIUS: f32 = 150.0;
pub const REPEL_STRENGTH: f32 = 40.0; // push at zero distance (before the guard)

// Constellation links
pub const LINK_MAX_DISTANCE: f32 = 100.0;
pub const LINK_MAX_PER_STAR: usize = 6;
pub const LINK_MAX_ALPHA: f32 = 0.08;
pub const LINK_FADE_DELAY: f32 = 2.0; // seconds after field start
pub const LINK_FADE_DURATION: f32 = 1.0;
pub const LINK_WIDTH: f32 = 1.0;

// Nebula
pub const NEBULA_RADIUS_FRACTION: f32 = 0.3; // of min(width, height)
pub const NEBULA_BREATH_SPEED: f32 = 0.5; // rad/s
pub const NEBULA_BREATH_AMOUNT: f32 = 0.1;
pub const NEBULA_WANDER: f32 = 0.1; // fraction of the viewport

// Cursor glow
pub const CURSOR_GLOW_RADIUS: f32 = 60.0;

// Particle gradients
pub const GLOW_RADIUS_SCALE: f32 = 6.0;
pub const CORE_RADIUS_SCALE: f32 = 1.5;
pub const GLOW_PEAK_ALPHA: f32 = 0.12;
pub const GLOW_MID_ALPHA: f32 = 0.04;
pub const CORE_MID_ALPHA: f32 = 0.3;

// Orb geometry
pub const ORB_CANVAS_SIZE: f32 = 220.0;
pub const ORB_RING_BANDS: [(f32, f32); 3] = [(33.0, 60.0), (60.0, 88.0), (88.0, 110.0)];
pub const ORB_ANGLE_JITTER: f32 = 0.5; // radians
pub const ORB_SIZE: (f32, f32) = (0.8, 2.2);
pub const ORB_BRIGHTNESS: (f32, f32) = (0.4, 0.9);
pub const ORB_ORBIT_SPEED: (f32, f32) = (0.3, 0.9); // magnitude, sign is random

// Orb dynamics
pub const BREATH_AMPLITUDE: f32 = 0.12;
pub const BREATH_SPEED: f32 = 0.5; // rad/s
pub const ORB_PULSE_AMOUNT: f32 = 0.1;
pub const HOVER_OFFSET: f32 = 8.0;
pub const SCATTER_DISTANCE: f32 = 22.0;
pub const SCATTER_RIPPLE: f32 = 5.0;
pub const SCATTER_ANGLE_GAIN: f32 = 0.01; // radians per unit of outward offset
pub const SCATTER_OUT_SECS: f32 = 0.4;
pub const REFORM_SECS: f32 = 0.6;
pub const NOISE_STRENGTH: f32 = 6.0;
pub const NOISE_SPEED: f32 = 0.12;
pub const WARMUP_SECS: f32 = 1.2;
pub const BOB_PRIMARY: (f32, f32) = (0.6, 2.0); // (rad/s, px)
pub const BOB_SECONDARY: (f32, f32) = (1.1, 1.0);

// Spring integrator
pub const SPRING_OMEGA: f32 = 8.0; // natural frequency, rad/s
pub const SPRING_DAMPING_RATIO: f32 = 1.0; // critical
pub const MAX_FRAME_DELTA_SECS: f32 = 0.1; // clamp after stalls
pub const MAX_SUBSTEP_SECS: f32 = 1.0 / 120.0;

// Reduced motion: settled timestamp lower bound, past every fade
pub const SETTLED_MIN_SECS: f32 = 3.0;
