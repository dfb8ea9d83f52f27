//! Aperture Profile - Screen controller and view state
//!
//! Sequences the avatar workflow: mount, capture surface lifecycle,
//! shutter presses, persistence, and the ordered view-state transitions
//! that keep the screen consistent while device work completes.

pub mod controller;
pub mod profile;
pub mod transitions;
pub mod view;

pub use controller::*;
pub use profile::*;
pub use transitions::*;
pub use view::*;
