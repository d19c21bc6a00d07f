//! Deterministic simulation module
//!
//! All physics lives here. This module must stay free of rendering and
//! platform code:
//! - Elapsed time is passed in, never sampled
//! - Seeded RNG only
//! - Balls tick in fixed array order

pub mod ball;
pub mod boundary;
pub mod clock;
pub mod state;
pub mod vector;

pub use ball::{Ball, TickReport};
pub use boundary::{contact_fraction, impact_correction, penetrates, reflect_off_wall};
pub use clock::{FrameClock, clamp_frame_ms};
pub use state::{FrameReport, RngState, World};
pub use vector::Vector2;
