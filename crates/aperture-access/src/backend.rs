//! Platform permission boundary
//!
//! `PermissionBackend` abstracts the OS-level capability prompt. The
//! request may suspend on interactive UI; implementations report platform
//! failures as errors and leave the degradation policy to the gate.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use aperture_core::{ApertureError, ApertureResult, Capability, PermissionState};

/// Resolves capability prompts against the platform.
#[async_trait]
pub trait PermissionBackend: Send + Sync {
    async fn request(&self, capability: Capability) -> ApertureResult<PermissionState>;
}

/// Simulated permission backend for tests and demos.
///
/// Serves a fixed response (or a platform-level failure) and counts how
/// many prompts it has been asked to show.
pub struct SimPermissions {
    response: PermissionState,
    failing: bool,
    prompts: AtomicUsize,
}

impl SimPermissions {
    /// Backend that resolves every prompt with `response`.
    pub fn with_response(response: PermissionState) -> Self {
        SimPermissions {
            response,
            failing: false,
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn granting() -> Self {
        Self::with_response(PermissionState::Granted)
    }

    pub fn denying() -> Self {
        Self::with_response(PermissionState::Denied)
    }

    /// Backend whose prompts fail at the platform level.
    pub fn failing() -> Self {
        SimPermissions {
            response: PermissionState::Unknown,
            failing: true,
            prompts: AtomicUsize::new(0),
        }
    }

    /// Number of prompts served so far.
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionBackend for SimPermissions {
    async fn request(&self, capability: Capability) -> ApertureResult<PermissionState> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(ApertureError::PermissionQueryFailed(format!(
                "{} prompt unavailable",
                capability
            )));
        }
        Ok(self.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_response_and_prompt_count() {
        let backend = SimPermissions::granting();
        assert_eq!(backend.prompt_count(), 0);

        let state = backend.request(Capability::Camera).await.unwrap();
        assert_eq!(state, PermissionState::Granted);
        assert_eq!(backend.prompt_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_backend_reports_query_failure() {
        let backend = SimPermissions::failing();
        let err = backend.request(Capability::Camera).await.unwrap_err();
        assert!(matches!(err, ApertureError::PermissionQueryFailed(_)));
        assert_eq!(backend.prompt_count(), 1);
    }
}
