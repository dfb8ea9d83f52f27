//! Camera capability and permission resolution states
//!
//! A capability is resolved at most once per gate lifetime. Consumers only
//! ever read the resolved state; re-prompting requires a fresh gate.

use std::fmt;

/// Notice rendered by the capture surface when access is not granted.
pub const NO_ACCESS_NOTICE: &str = "No access to camera";

/// Device capabilities the profile screen can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Camera,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Camera => write!(f, "camera"),
        }
    }
}

/// Resolution state of a capability request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionState {
    /// No prompt has resolved yet.
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl PermissionState {
    #[inline]
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionState::Granted)
    }

    /// Whether a prompt has resolved, either way.
    #[inline]
    pub fn is_resolved(self) -> bool {
        !matches!(self, PermissionState::Unknown)
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PermissionState::Unknown => "unknown",
            PermissionState::Granted => "granted",
            PermissionState::Denied => "denied",
        };
        write!(f, "{}", label)
    }
}
