//! Aperture Access - Camera permission gating
//!
//! Wraps the platform permission prompt behind a gate that resolves each
//! capability at most once per mount and fails closed when the platform
//! API errors.

pub mod backend;
pub mod gate;

pub use backend::*;
pub use gate::*;
