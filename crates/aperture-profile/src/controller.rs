//! Profile screen controller
//!
//! Owns the view state and sequences every asynchronous operation of the
//! avatar workflow on one logical thread: mount, capture surface open and
//! close, shutter presses, and the completion events of device work.
//! Spawned tasks only talk to the device and send events back; every view
//! mutation happens here.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use aperture_access::PermissionGate;
use aperture_capture::{
    CameraDevice, CaptureOptions, CaptureSession, CapturedFrame, DeviceHandle,
};
use aperture_core::{ApertureError, ApertureResult, EncodedImage, SessionId};
use aperture_store::ImageStore;

use crate::profile::Profile;
use crate::transitions::{TransitionTimings, Transitions};
use crate::view::{AvatarImage, ProfileViewState};

/// Completion events sent by spawned device tasks.
///
/// A handle always travels with its event, so device ownership never
/// parks inside a finished task.
pub enum ProfileEvent {
    /// Device acquisition finished for `session`.
    HandleReady {
        session: SessionId,
        outcome: ApertureResult<Box<dyn DeviceHandle>>,
    },
    /// An in-flight shot finished for `session`.
    CaptureFinished {
        session: SessionId,
        handle: Box<dyn DeviceHandle>,
        outcome: ApertureResult<CapturedFrame>,
    },
}

impl fmt::Debug for ProfileEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileEvent::HandleReady { session, outcome } => {
                write!(
                    f,
                    "HandleReady({:?}, {})",
                    session,
                    if outcome.is_ok() { "ok" } else { "err" }
                )
            }
            ProfileEvent::CaptureFinished {
                session, outcome, ..
            } => {
                write!(
                    f,
                    "CaptureFinished({:?}, {})",
                    session,
                    if outcome.is_ok() { "ok" } else { "err" }
                )
            }
        }
    }
}

/// Controller configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControllerConfig {
    /// Transition timings the controller awaits.
    pub timings: TransitionTimings,

    /// Options applied to capture sessions.
    pub capture: CaptureOptions,
}

/// Counters for the avatar workflow.
#[derive(Clone, Debug, Default)]
pub struct ProfileStats {
    pub sessions_opened: u64,
    pub captures_started: u64,
    pub captures_succeeded: u64,
    pub captures_failed: u64,
    pub stale_results_discarded: u64,
    pub avatar_refreshes: u64,
    pub persistence_fallbacks: u64,
}

/// Profile screen controller.
pub struct ProfileController {
    profile: Profile,
    view: ProfileViewState,
    gate: Arc<PermissionGate>,
    store: Arc<ImageStore>,
    camera: Arc<dyn CameraDevice>,
    transitions: Transitions,
    capture_options: CaptureOptions,
    /// Active capture session, at most one.
    session: Option<CaptureSession>,
    /// Next session id to allocate.
    next_session: SessionId,
    events_tx: mpsc::UnboundedSender<ProfileEvent>,
    events_rx: mpsc::UnboundedReceiver<ProfileEvent>,
    stats: ProfileStats,
}

impl ProfileController {
    pub fn new(
        profile: Profile,
        gate: Arc<PermissionGate>,
        store: Arc<ImageStore>,
        camera: Arc<dyn CameraDevice>,
    ) -> Self {
        Self::with_config(profile, gate, store, camera, ControllerConfig::default())
    }

    pub fn with_config(
        profile: Profile,
        gate: Arc<PermissionGate>,
        store: Arc<ImageStore>,
        camera: Arc<dyn CameraDevice>,
        config: ControllerConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        ProfileController {
            profile,
            view: ProfileViewState::default(),
            gate,
            store,
            camera,
            transitions: Transitions::new(config.timings),
            capture_options: config.capture,
            session: None,
            next_session: SessionId::new(1),
            events_tx,
            events_rx,
            stats: ProfileStats::default(),
        }
    }

    pub fn view(&self) -> &ProfileViewState {
        &self.view
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn stats(&self) -> &ProfileStats {
        &self.stats
    }

    /// Id of the active capture session, if one exists.
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id())
    }

    /// URI the avatar renders right now. Never blank.
    pub fn avatar_uri(&self) -> &str {
        self.view.avatar.resolve(&self.profile.picture)
    }

    /// Mount the screen.
    ///
    /// The entrance transition, the stored-avatar read, and the camera
    /// permission prompt run concurrently; `loading` clears only after
    /// the avatar resolution completed, image or placeholder.
    pub async fn mount(&mut self) {
        self.view.loading = true;

        let store = self.store.clone();
        let gate = self.gate.clone();
        let transitions = self.transitions;
        let (_, stored, permission) = tokio::join!(
            transitions.entrance(),
            store.get(),
            gate.request_camera_access(),
        );

        self.view.permission = permission;
        self.apply_avatar_resolution(stored);
        self.view.loading = false;
        info!("profile mounted, permission {}", permission);
    }

    /// Single entry point of the capture surface protocol.
    pub async fn set_camera_open(&mut self, open: bool) {
        if open {
            self.open_camera().await;
        } else {
            self.close_camera().await;
        }
    }

    /// Trigger a shot on the active session.
    ///
    /// Ignored while the surface is closed, the handle is not live yet,
    /// or a shot is already in flight; the surface gates its shutter the
    /// same way.
    pub fn press_shutter(&mut self) {
        if !self.view.can_capture() {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let id = session.id();
        let handle = match session.start_capture() {
            Ok(handle) => handle,
            Err(err) => {
                debug!("shutter ignored: {}", err);
                return;
            }
        };

        self.view.alert = None;
        self.view.capture_busy = true;
        self.stats.captures_started += 1;

        let options = *session.options();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let mut handle = handle;
            let outcome = handle
                .capture(&options)
                .await
                .map(|data| CapturedFrame::new(id, data));
            let _ = events.send(ProfileEvent::CaptureFinished {
                session: id,
                handle,
                outcome,
            });
        });
    }

    /// Apply the next completion event.
    ///
    /// Suspends until one arrives; returns false once the channel can
    /// never produce another event.
    pub async fn process_next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.apply_event(event).await;
                true
            }
            None => false,
        }
    }

    /// Drain events until the queue stays quiet for `window`.
    pub async fn process_events_for(&mut self, window: Duration) {
        loop {
            match tokio::time::timeout(window, self.events_rx.recv()).await {
                Ok(Some(event)) => self.apply_event(event).await,
                Ok(None) | Err(_) => return,
            }
        }
    }

    async fn apply_event(&mut self, event: ProfileEvent) {
        debug!("applying {:?}", event);
        match event {
            ProfileEvent::HandleReady { session, outcome } => {
                self.apply_handle_ready(session, outcome).await;
            }
            ProfileEvent::CaptureFinished {
                session,
                handle,
                outcome,
            } => {
                self.apply_capture_finished(session, handle, outcome).await;
            }
        }
    }

    async fn open_camera(&mut self) {
        // Opening while open is a no-op; at most one session exists.
        if self.view.camera_open {
            return;
        }
        if let Err(err) = self.try_open_capture().await {
            debug!("capture surface not opened: {}", err);
        }
    }

    async fn try_open_capture(&mut self) -> ApertureResult<()> {
        let permission = self.gate.request_camera_access().await;
        self.view.permission = permission;
        if !permission.is_granted() {
            return Err(ApertureError::PermissionDenied);
        }

        let id = self.next_session;
        self.next_session = self.next_session.next();

        let mut session = CaptureSession::new(id, self.capture_options);
        session.begin_open()?;
        self.session = Some(session);
        self.view.camera_open = true;
        self.view.alert = None;
        self.stats.sessions_opened += 1;
        info!("capture session {} opened", id);

        // Acquisition runs off the control thread; the handle arrives as
        // an event tagged with the session id.
        let camera = self.camera.clone();
        let facing = self.capture_options.facing;
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = camera.acquire(facing).await;
            let _ = events.send(ProfileEvent::HandleReady {
                session: id,
                outcome,
            });
        });
        Ok(())
    }

    async fn close_camera(&mut self) {
        if !self.view.camera_open {
            return;
        }

        // Teardown first: the session and its handle reference are
        // invalid from this moment, whatever is still in flight.
        if let Some(mut session) = self.session.take() {
            session.close();
            info!("capture session {} closed", session.id());
        }
        self.view.capture_busy = false;

        self.transitions.modal_exit().await;
        self.view.camera_open = false;

        // The slot may hold a value written before this closing.
        self.refresh_avatar().await;
    }

    async fn apply_handle_ready(
        &mut self,
        session_id: SessionId,
        outcome: ApertureResult<Box<dyn DeviceHandle>>,
    ) {
        let is_current = self
            .session
            .as_ref()
            .map_or(false, |s| s.id() == session_id);
        if !is_current {
            // The surface closed while the device was coming online.
            if let Ok(mut handle) = outcome {
                handle.release();
            }
            self.stats.stale_results_discarded += 1;
            debug!("discarded handle for stale session {}", session_id);
            return;
        }

        match outcome {
            Ok(handle) => {
                if let Some(session) = self.session.as_mut() {
                    if session.bind_handle(handle).is_err() {
                        self.stats.stale_results_discarded += 1;
                    }
                }
            }
            Err(err) => {
                // The device never came online; roll the surface back
                // closed instead of leaving a dead preview.
                warn!("device acquisition failed: {}", err);
                self.view.alert = Some(err.to_string());
                if let Some(mut session) = self.session.take() {
                    session.close();
                }
                self.view.camera_open = false;
                self.view.capture_busy = false;
            }
        }
    }

    async fn apply_capture_finished(
        &mut self,
        session_id: SessionId,
        handle: Box<dyn DeviceHandle>,
        outcome: ApertureResult<CapturedFrame>,
    ) {
        let is_current = self
            .session
            .as_ref()
            .map_or(false, |s| s.id() == session_id);
        if !is_current {
            // The session was torn down while the shot was in flight; a
            // late result is neither persisted nor surfaced.
            let mut handle = handle;
            handle.release();
            self.stats.stale_results_discarded += 1;
            debug!("discarded capture for stale session {}", session_id);
            return;
        }

        match outcome {
            Ok(frame) => self.finish_capture_success(session_id, handle, frame).await,
            Err(err) => {
                if let Some(session) = self.session.as_mut() {
                    session.finish_capture(handle, false);
                }
                warn!("capture failed: {}", err);
                self.view.alert = Some(err.to_string());
                self.view.capture_busy = false;
                self.stats.captures_failed += 1;
            }
        }
    }

    async fn finish_capture_success(
        &mut self,
        session_id: SessionId,
        handle: Box<dyn DeviceHandle>,
        frame: CapturedFrame,
    ) {
        // Persist before anything becomes user visible; the store is the
        // single source of truth for what the avatar shows.
        if let Err(err) = self.store.set_raw(&frame.base64_payload()).await {
            warn!("persisting capture failed: {}", err);
            if let Some(session) = self.session.as_mut() {
                session.finish_capture(handle, false);
            }
            self.view.alert = Some(err.to_string());
            self.view.capture_busy = false;
            self.stats.captures_failed += 1;
            return;
        }

        if let Some(session) = self.session.as_mut() {
            session.finish_capture(handle, true);
        }
        self.view.capture_busy = false;
        self.stats.captures_succeeded += 1;
        info!("capture for session {} persisted", session_id);

        // Success dismisses the surface; the avatar refresh inside reads
        // the store sequenced after the write above.
        self.close_camera().await;
    }

    async fn refresh_avatar(&mut self) {
        let resolved = self.store.get().await;
        self.apply_avatar_resolution(resolved);
    }

    fn apply_avatar_resolution(&mut self, resolved: ApertureResult<Option<EncodedImage>>) {
        match resolved {
            Ok(Some(image)) => {
                self.view.avatar = AvatarImage::Captured(image);
                self.stats.avatar_refreshes += 1;
            }
            Ok(None) => {
                self.view.avatar = AvatarImage::Placeholder;
                self.stats.avatar_refreshes += 1;
            }
            Err(err) => {
                // Keep the last in-memory avatar on a failed read.
                warn!("avatar refresh failed: {}", err);
                self.stats.persistence_fallbacks += 1;
            }
        }
    }
}
