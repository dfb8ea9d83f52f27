//! Aperture Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout the avatar capture
//! stack:
//! - Identifiers (SessionId, HandleId)
//! - Encoded images and data-URI normalization
//! - Camera capability and permission states
//! - Error taxonomy shared by every layer

pub mod id;
pub mod image;
pub mod permission;
pub mod error;

pub use id::*;
pub use image::*;
pub use permission::*;
pub use error::*;
