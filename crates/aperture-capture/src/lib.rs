//! Aperture Capture - Camera sessions
//!
//! A capture session lives from the moment the capture surface opens
//! until it is torn down. It owns the device handle exclusively: the
//! handle is acquired once, moves into the capture task while a shot is
//! in flight, and is released exactly once on teardown.

pub mod device;
pub mod frame;
pub mod session;
pub mod sim;

pub use device::*;
pub use frame::*;
pub use session::*;
pub use sim::*;
