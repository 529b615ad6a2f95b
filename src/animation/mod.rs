//! # Animation
//!
//! Time, the ghost lights that move with it, and the frame loop that ties
//! the scene, camera and renderer together.

pub mod clock;
pub mod driver;
pub mod ghost;

pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::{AnimationDriver, FixedFrames, FrameScheduler};
pub use ghost::{GhostLight, GhostOrbit};
