// DOM mount points and browser queries.
// The page may override the ids by calling the exported mount functions
// directly; these are what the start hook looks for.

// Element that receives the full-viewport starfield canvas
pub const COSMIC_BG_CONTAINER_ID: &str = "cosmic-bg";

// Existing canvas the orb draws into
pub const PARTICLE_ORB_CANVAS_ID: &str = "particle-orb";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub const CONTEXT_2D: &str = "2d";

// Inline style for the generated background canvas
pub const COSMIC_BG_CANVAS_STYLE: &str = "display:block;width:100%;height:100%;";

// Listener event names
pub const EV_POINTER_ENTER: &str = "pointerenter";
pub const EV_POINTER_LEAVE: &str = "pointerleave";
pub const EV_POINTER_MOVE: &str = "pointermove";
pub const EV_CLICK: &str = "click";
pub const EV_RESIZE: &str = "resize";
