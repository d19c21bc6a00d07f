//! Bouncing Balls - balls bouncing inside a circle under gravity
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vector math, ball physics, frame driving)
//! - `display`: Adapter from world-space physics state to drawable circles
//! - `settings`: Presentation preferences (persisted as JSON)

pub mod display;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{Ball, FrameClock, Vector2, World};

/// Simulation constants
///
/// Distances are in world units, times in milliseconds unless noted.
/// Physical parameters are fixed; only presentation is configurable.
pub mod consts {
    /// Gravitational acceleration (world units/s², +y is down)
    pub const GRAVITY: f64 = 9.8;

    /// Bounding circle radius, centered at the origin
    pub const BOUNDARY_RADIUS: f64 = 2.0;
    /// Balls are placed this far inside the wall on contact so the next
    /// tick does not detect the same touch again
    pub const CONTACT_EPSILON: f64 = 0.01;
    /// Substitute for a zero squared displacement in the contact solve
    pub const DEGENERATE_DENOMINATOR: f64 = 0.001;

    /// Longest step the simulation will take in one frame (60 Hz)
    pub const MAX_FRAME_MS: f64 = 1000.0 / 60.0;

    /// Fixed ball population
    pub const BALL_COUNT: usize = 10;
    /// Smallest ball radius
    pub const BALL_RADIUS_MIN: f64 = 0.15;
    /// Random extra radius added on top of the minimum, in [0, spread)
    pub const BALL_RADIUS_SPREAD: f64 = 0.1;

    /// Default display scale (pixels per world unit)
    pub const PIXELS_PER_UNIT: f32 = 100.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> Vector2 {
    Vector2::new(r * theta.cos(), r * theta.sin())
}
