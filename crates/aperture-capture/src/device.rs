//! Camera device boundary
//!
//! A camera is reached through an acquire / capture / release trio. The
//! handle returned by `acquire` is exclusively owned: it lives in exactly
//! one place at a time and is given back through `release`.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;

use aperture_core::{ApertureResult, HandleId};

/// Which way the device faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraFacing {
    /// Selfie orientation, the profile screen default.
    #[default]
    Front,
    Back,
}

/// Options applied to a capture session and its shots.
#[derive(Clone, Copy, Debug)]
pub struct CaptureOptions {
    /// Ask the device for base64-friendly output.
    pub base64: bool,

    /// Device orientation to acquire.
    pub facing: CameraFacing,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        CaptureOptions {
            base64: true,
            facing: CameraFacing::Front,
        }
    }
}

/// A camera that can hand out capture handles.
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Acquire an exclusive live handle on the device.
    async fn acquire(&self, facing: CameraFacing) -> ApertureResult<Box<dyn DeviceHandle>>;
}

/// Exclusive live reference to an acquired camera.
///
/// `capture` takes `&mut self`: a handle serves one shot at a time.
/// `release` is idempotent and must also run when an unreleased handle is
/// dropped, so device ownership cannot leak.
#[async_trait]
pub trait DeviceHandle: Send {
    /// Identity of this acquisition.
    fn id(&self) -> HandleId;

    /// Take one frame from the device.
    async fn capture(&mut self, options: &CaptureOptions) -> ApertureResult<Bytes>;

    /// Give the device back. Safe to call more than once.
    fn release(&mut self);
}

impl fmt::Debug for dyn DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceHandle({:?})", self.id())
    }
}
