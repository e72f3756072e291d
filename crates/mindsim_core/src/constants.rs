// Simulation constants. Lengths are in the boundary's local units (a mind's
// unit sphere, or the demo container's radius), time in seconds.

/// Gap kept between a body's surface and the boundary, in world units
pub const BOUNDARY_MARGIN: f32 = 0.01;

/// Default coefficient of restitution for reflections and pair impulses
pub const DEFAULT_RESTITUTION: f32 = 1.0;

/// Allowed restitution range (elastic to slightly damped)
pub const MIN_RESTITUTION: f32 = 0.9;
pub const MAX_RESTITUTION: f32 = 1.0;

/// Largest frame delta a single step integrates (avoids tunnelling on frame hitches)
pub const MAX_DT: f32 = 0.033;

/// Fastest a scene runs relative to wall-clock time. Each unit of speed-up is
/// one extra substep per frame.
pub const MAX_TIME_SCALE: f32 = 8.0;

/// Rejection-sampling attempts when placing a body at random inside the boundary
pub const PLACEMENT_ATTEMPTS: u32 = 32;

/// Smallest scale factor used in containment math
pub const MIN_SCALE_FACTOR: f32 = 1e-4;

/// Mental sphere radius inside a mind (mind-local units)
pub const MENTAL_RADIUS: f32 = 0.06;

/// Mental cruising speed inside a mind (mind-local units per second)
pub const MENTAL_CRUISE_SPEED: f32 = 0.25;

/// Demo container ball defaults
pub const DEMO_BOUNDARY_RADIUS: f32 = 0.9;
pub const DEMO_BALL_RADIUS: f32 = 0.06;
pub const DEMO_MIN_SPEED: f32 = 0.2;
pub const DEMO_MAX_SPEED: f32 = 0.8;
