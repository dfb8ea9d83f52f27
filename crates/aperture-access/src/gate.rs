//! Prompt-at-most-once permission gate

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use aperture_core::{ApertureError, ApertureResult, Capability, PermissionState};

use crate::backend::PermissionBackend;

/// Caches capability resolutions for the lifetime of one screen mount.
///
/// The first request per capability prompts the backend; every later
/// request returns the cached resolution. A backend failure resolves the
/// capability as `Denied` - the gate never fails open. Re-prompting
/// requires constructing a fresh gate.
pub struct PermissionGate {
    backend: Arc<dyn PermissionBackend>,
    resolved: Mutex<HashMap<Capability, PermissionState>>,
}

impl PermissionGate {
    pub fn new(backend: Arc<dyn PermissionBackend>) -> Self {
        PermissionGate {
            backend,
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// Request camera access, prompting at most once.
    pub async fn request_camera_access(&self) -> PermissionState {
        self.request(Capability::Camera).await
    }

    /// Request a capability, prompting at most once.
    ///
    /// The cache lock is held across the backend await so concurrent
    /// callers cannot race a second prompt.
    pub async fn request(&self, capability: Capability) -> PermissionState {
        let mut resolved = self.resolved.lock().await;
        if let Some(&state) = resolved.get(&capability) {
            return state;
        }

        let state = match self.backend.request(capability).await {
            Ok(state) => state,
            Err(err) => {
                warn!("{} prompt failed, resolving denied: {}", capability, err);
                PermissionState::Denied
            }
        };
        resolved.insert(capability, state);
        state
    }

    /// Cached resolution, `Unknown` if the capability was never requested.
    pub async fn state(&self, capability: Capability) -> PermissionState {
        self.resolved
            .lock()
            .await
            .get(&capability)
            .copied()
            .unwrap_or_default()
    }

    /// Guard form: `Err(PermissionDenied)` unless the camera resolves granted.
    pub async fn require_camera(&self) -> ApertureResult<()> {
        if self.request_camera_access().await.is_granted() {
            Ok(())
        } else {
            Err(ApertureError::PermissionDenied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SimPermissions;

    #[tokio::test]
    async fn test_prompts_at_most_once() {
        let backend = Arc::new(SimPermissions::granting());
        let gate = PermissionGate::new(backend.clone());

        assert_eq!(gate.state(Capability::Camera).await, PermissionState::Unknown);
        for _ in 0..3 {
            let state = gate.request_camera_access().await;
            assert_eq!(state, PermissionState::Granted);
        }
        assert_eq!(backend.prompt_count(), 1);
        assert_eq!(gate.state(Capability::Camera).await, PermissionState::Granted);
    }

    #[tokio::test]
    async fn test_backend_failure_resolves_denied() {
        let backend = Arc::new(SimPermissions::failing());
        let gate = PermissionGate::new(backend.clone());

        assert_eq!(gate.request_camera_access().await, PermissionState::Denied);
        // The failure is cached as a denial, not retried.
        assert_eq!(gate.request_camera_access().await, PermissionState::Denied);
        assert_eq!(backend.prompt_count(), 1);
    }

    #[tokio::test]
    async fn test_denied_resolution_is_sticky() {
        let gate = PermissionGate::new(Arc::new(SimPermissions::denying()));
        assert_eq!(gate.request_camera_access().await, PermissionState::Denied);
        assert_eq!(gate.state(Capability::Camera).await, PermissionState::Denied);
    }

    #[tokio::test]
    async fn test_require_camera_guard() {
        let gate = PermissionGate::new(Arc::new(SimPermissions::granting()));
        assert!(gate.require_camera().await.is_ok());

        let gate = PermissionGate::new(Arc::new(SimPermissions::denying()));
        let err = gate.require_camera().await.unwrap_err();
        assert!(matches!(err, ApertureError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_prompt() {
        let backend = Arc::new(SimPermissions::granting());
        let gate = Arc::new(PermissionGate::new(backend.clone()));

        let a = tokio::spawn({
            let gate = gate.clone();
            async move { gate.request_camera_access().await }
        });
        let b = tokio::spawn({
            let gate = gate.clone();
            async move { gate.request_camera_access().await }
        });

        assert_eq!(a.await.unwrap(), PermissionState::Granted);
        assert_eq!(b.await.unwrap(), PermissionState::Granted);
        assert_eq!(backend.prompt_count(), 1);
    }
}
