//! Aperture Store - Avatar persistence
//!
//! A single well-known slot holds the captured avatar as a textual data
//! URI. The store normalizes on both paths: bare payloads are prefixed on
//! write, and legacy values persisted without a prefix are prefixed on
//! read.

pub mod slot;
pub mod store;

pub use slot::*;
pub use store::*;
