//! Animation constants and tuning parameters.

/// Host frame rate (Hz).
pub const FRAME_RATE: u32 = 60;

/// Seconds per frame.
pub const DT: f64 = 1.0 / FRAME_RATE as f64;

// --- Viewport ---

pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 720.0;

/// Flat map scale is viewport width divided by this.
pub const FLAT_SCALE_DIVISOR: f64 = 6.5;

/// Globe radius in pixels is viewport width divided by this.
pub const GLOBE_SCALE_DIVISOR: f64 = 5.0;

// --- Clipping ---

/// Clip angle of the flat map (degrees). Just under 180° so nothing is cut.
pub const FLAT_CLIP_ANGLE: f64 = 179.999;

/// Clip angle of the globe (degrees): the visible hemisphere.
pub const GLOBE_CLIP_ANGLE: f64 = 90.0;

// --- Phase timing ---

/// Duration of the flat → globe morph (seconds).
pub const MORPH_DURATION_SECS: f64 = 1.2;

/// Duration of the great-circle flight (seconds).
pub const FLIGHT_DURATION_SECS: f64 = 1.6;

// --- Heading ---

/// Eased progress after which the marker heading stops updating.
/// Near the end the target sits on the screen center and the angle is undefined.
pub const HEADING_FREEZE_PROGRESS: f64 = 0.95;

/// Minimum screen distance (px) between center and target to recompute heading mid-flight.
pub const HEADING_MIN_SCREEN_DISTANCE: f64 = 5.0;

/// Minimum screen distance (px) for the initial heading to come from screen space.
pub const INITIAL_HEADING_MIN_SCREEN_DISTANCE: f64 = 1.0;

/// The marker glyph points this many degrees clockwise of the +x axis at rest.
pub const MARKER_GLYPH_OFFSET_DEG: f64 = 45.0;

// --- Geometry ---

/// Mean Earth radius (km), IUGG.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Tolerance (degrees of arc) under which two coordinates count as the same point.
pub const COORD_TOLERANCE_DEG: f64 = 1e-9;
