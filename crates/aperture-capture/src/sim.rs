//! Simulated camera device
//!
//! Drives the capture stack in tests and demos: scripted shot outcomes,
//! handle accounting with a max-live watermark, and shots that stay open
//! until a trigger fires.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use aperture_core::{ApertureError, ApertureResult, HandleId};

use crate::device::{CameraDevice, CameraFacing, CaptureOptions, DeviceHandle};

/// Scripted outcome for one shutter press.
pub enum Shot {
    /// Resolve immediately with this payload.
    Ok(Bytes),
    /// Fail immediately with this message.
    Fail(String),
    /// Stay open until the trigger fires, then resolve with its payload.
    Pending(oneshot::Receiver<Bytes>),
}

impl Shot {
    pub fn ok(payload: impl Into<Bytes>) -> Self {
        Shot::Ok(payload.into())
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Shot::Fail(message.into())
    }

    /// A shot held open until the returned trigger is fired.
    pub fn pending() -> (Self, oneshot::Sender<Bytes>) {
        let (trigger, held) = oneshot::channel();
        (Shot::Pending(held), trigger)
    }
}

#[derive(Default)]
struct SimState {
    shots: VecDeque<Shot>,
    live_handles: usize,
    max_live: usize,
    handles_issued: u64,
    refuse_acquire: bool,
}

/// Simulated camera with scripted shots and handle accounting.
///
/// Unscripted shots resolve with a small random payload, so the camera
/// works out of the box in demos.
#[derive(Clone, Default)]
pub struct SimCamera {
    state: Arc<Mutex<SimState>>,
}

impl SimCamera {
    pub fn new() -> Self {
        SimCamera::default()
    }

    /// Queue the outcome for the next shutter press.
    pub fn push_shot(&self, shot: Shot) {
        self.state.lock().shots.push_back(shot);
    }

    /// Make future acquisitions fail.
    pub fn refuse_acquisitions(&self, refuse: bool) {
        self.state.lock().refuse_acquire = refuse;
    }

    /// Handles currently live.
    pub fn live_handles(&self) -> usize {
        self.state.lock().live_handles
    }

    /// Most handles ever live at once.
    pub fn max_live_handles(&self) -> usize {
        self.state.lock().max_live
    }

    /// Total handles ever issued.
    pub fn handles_issued(&self) -> u64 {
        self.state.lock().handles_issued
    }
}

#[async_trait]
impl CameraDevice for SimCamera {
    async fn acquire(&self, _facing: CameraFacing) -> ApertureResult<Box<dyn DeviceHandle>> {
        let mut state = self.state.lock();
        if state.refuse_acquire {
            return Err(ApertureError::CaptureFailed(
                "camera unavailable".to_string(),
            ));
        }
        state.handles_issued += 1;
        state.live_handles += 1;
        state.max_live = state.max_live.max(state.live_handles);
        let id = HandleId::new(state.handles_issued);
        drop(state);

        Ok(Box::new(SimHandle {
            id,
            camera: self.state.clone(),
            released: false,
        }))
    }
}

/// Exclusive handle issued by a `SimCamera`.
pub struct SimHandle {
    id: HandleId,
    camera: Arc<Mutex<SimState>>,
    released: bool,
}

#[async_trait]
impl DeviceHandle for SimHandle {
    fn id(&self) -> HandleId {
        self.id
    }

    async fn capture(&mut self, _options: &CaptureOptions) -> ApertureResult<Bytes> {
        if self.released {
            return Err(ApertureError::NoDeviceHandle);
        }

        let shot = self.camera.lock().shots.pop_front();
        match shot {
            Some(Shot::Ok(payload)) => Ok(payload),
            Some(Shot::Fail(message)) => Err(ApertureError::CaptureFailed(message)),
            Some(Shot::Pending(held)) => held
                .await
                .map_err(|_| ApertureError::CaptureFailed("shot abandoned".to_string())),
            None => {
                let noise: [u8; 16] = rand::random();
                Ok(Bytes::copy_from_slice(&noise))
            }
        }
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            let mut state = self.camera.lock();
            state.live_handles = state.live_handles.saturating_sub(1);
        }
    }
}

impl Drop for SimHandle {
    fn drop(&mut self) {
        // An unreleased handle still gives the device back.
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handle_accounting_and_watermark() {
        let camera = SimCamera::new();
        let mut first = camera.acquire(CameraFacing::Front).await.unwrap();
        let mut second = camera.acquire(CameraFacing::Front).await.unwrap();

        assert_eq!(camera.live_handles(), 2);
        assert_eq!(camera.max_live_handles(), 2);
        assert_ne!(first.id(), second.id());

        first.release();
        second.release();
        assert_eq!(camera.live_handles(), 0);
        // The watermark keeps the historical maximum.
        assert_eq!(camera.max_live_handles(), 2);
    }

    #[tokio::test]
    async fn test_release_is_idempotent() {
        let camera = SimCamera::new();
        let mut handle = camera.acquire(CameraFacing::Front).await.unwrap();
        handle.release();
        handle.release();
        assert_eq!(camera.live_handles(), 0);
    }

    #[tokio::test]
    async fn test_drop_releases() {
        let camera = SimCamera::new();
        {
            let _handle = camera.acquire(CameraFacing::Front).await.unwrap();
            assert_eq!(camera.live_handles(), 1);
        }
        assert_eq!(camera.live_handles(), 0);
    }

    #[tokio::test]
    async fn test_scripted_shots_in_order() {
        let camera = SimCamera::new();
        camera.push_shot(Shot::ok("first"));
        camera.push_shot(Shot::fail("lens cap on"));

        let mut handle = camera.acquire(CameraFacing::Front).await.unwrap();
        let options = CaptureOptions::default();

        let payload = handle.capture(&options).await.unwrap();
        assert_eq!(payload, Bytes::from_static(b"first"));

        let err = handle.capture(&options).await.unwrap_err();
        assert!(matches!(err, ApertureError::CaptureFailed(_)));
    }

    #[tokio::test]
    async fn test_pending_shot_resolves_on_trigger() {
        let camera = SimCamera::new();
        let (shot, trigger) = Shot::pending();
        camera.push_shot(shot);

        let mut handle = camera.acquire(CameraFacing::Front).await.unwrap();
        let task = tokio::spawn(async move {
            handle.capture(&CaptureOptions::default()).await
        });

        trigger.send(Bytes::from_static(b"late")).unwrap();
        let payload = task.await.unwrap().unwrap();
        assert_eq!(payload, Bytes::from_static(b"late"));
    }

    #[tokio::test]
    async fn test_refused_acquisition() {
        let camera = SimCamera::new();
        camera.refuse_acquisitions(true);
        let err = camera.acquire(CameraFacing::Front).await.unwrap_err();
        assert!(matches!(err, ApertureError::CaptureFailed(_)));
        assert_eq!(camera.live_handles(), 0);
    }

    #[tokio::test]
    async fn test_unscripted_shot_has_payload() {
        let camera = SimCamera::new();
        let mut handle = camera.acquire(CameraFacing::Front).await.unwrap();
        let payload = handle.capture(&CaptureOptions::default()).await.unwrap();
        assert!(!payload.is_empty());
    }
}
