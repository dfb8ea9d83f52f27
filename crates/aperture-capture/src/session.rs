//! Capture session state machine
//!
//! A session exists from the moment the capture surface opens until it is
//! torn down. The device handle is exclusively owned: `start_capture`
//! moves it out into the capture task, `finish_capture` moves it back,
//! and `close` releases it. Closing is idempotent and is the only way a
//! session ends.

use std::fmt;

use aperture_core::{ApertureError, ApertureResult, SessionId};

use crate::device::{CaptureOptions, DeviceHandle};

/// Lifecycle states of a capture session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Created, surface not yet opened.
    Idle,
    /// Surface open; waiting for or holding a live handle.
    AwaitingHandle,
    /// A capture is in flight; the handle has moved into the task.
    Capturing,
    /// The last capture produced a frame.
    Succeeded,
    /// The last capture failed; another attempt is possible.
    Failed,
    /// Torn down. Terminal.
    Closed,
}

/// One opening of the capture surface.
pub struct CaptureSession {
    id: SessionId,
    state: SessionState,
    options: CaptureOptions,
    handle: Option<Box<dyn DeviceHandle>>,
}

impl CaptureSession {
    pub fn new(id: SessionId, options: CaptureOptions) -> Self {
        CaptureSession {
            id,
            state: SessionState::Idle,
            options,
            handle: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn options(&self) -> &CaptureOptions {
        &self.options
    }

    /// Whether a live handle is bound and a shot could start now.
    pub fn is_ready(&self) -> bool {
        self.handle.is_some() && self.state != SessionState::Closed
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Mark the surface open; the session now awaits its handle.
    pub fn begin_open(&mut self) -> ApertureResult<()> {
        match self.state {
            SessionState::Closed => Err(ApertureError::SessionClosed),
            SessionState::Idle => {
                self.state = SessionState::AwaitingHandle;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Bind the acquired device handle, making the session ready.
    ///
    /// On a closed session the handle is released on the spot and
    /// `SessionClosed` returned; acquisition lost the race with teardown.
    pub fn bind_handle(&mut self, handle: Box<dyn DeviceHandle>) -> ApertureResult<()> {
        if self.state == SessionState::Closed {
            let mut handle = handle;
            handle.release();
            return Err(ApertureError::SessionClosed);
        }

        if let Some(mut old) = self.handle.replace(handle) {
            // A session holds at most one live handle.
            old.release();
        }
        if matches!(self.state, SessionState::Idle | SessionState::Failed) {
            self.state = SessionState::AwaitingHandle;
        }
        Ok(())
    }

    /// Move the handle out for an in-flight capture.
    ///
    /// The session keeps no reference while the shot runs; the handle
    /// travels with the capture task and comes back through
    /// `finish_capture`.
    pub fn start_capture(&mut self) -> ApertureResult<Box<dyn DeviceHandle>> {
        if self.state == SessionState::Closed {
            return Err(ApertureError::SessionClosed);
        }
        match self.handle.take() {
            Some(handle) => {
                self.state = SessionState::Capturing;
                Ok(handle)
            }
            None => Err(ApertureError::NoDeviceHandle),
        }
    }

    /// Record a capture outcome and take the handle back.
    ///
    /// If the session was closed while the shot was in flight the handle
    /// is released immediately and the terminal state is kept. On failure
    /// the session is ready for another attempt.
    pub fn finish_capture(&mut self, handle: Box<dyn DeviceHandle>, succeeded: bool) {
        if self.state == SessionState::Closed {
            let mut handle = handle;
            handle.release();
            return;
        }

        if let Some(mut old) = self.handle.replace(handle) {
            old.release();
        }
        self.state = if succeeded {
            SessionState::Succeeded
        } else {
            SessionState::Failed
        };
    }

    /// Tear the session down, releasing any held handle. Idempotent.
    pub fn close(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.release();
        }
        self.state = SessionState::Closed;
    }
}

impl fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CaptureSession({:?}, {:?}, handle: {})",
            self.id,
            self.state,
            if self.handle.is_some() { "live" } else { "none" }
        )
    }
}
