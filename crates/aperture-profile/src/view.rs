//! Profile view state
//!
//! Everything the profile screen renders, owned exclusively by the
//! controller. Fields change only when an operation completes, never
//! speculatively.

use aperture_core::{EncodedImage, PermissionState, NO_ACCESS_NOTICE};

/// The avatar the profile header shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AvatarImage {
    /// No captured avatar; the profile's fixed remote picture shows.
    #[default]
    Placeholder,
    /// A captured avatar read back from the store.
    Captured(EncodedImage),
}

impl AvatarImage {
    /// URI to display, falling back to the given placeholder. Never blank.
    pub fn resolve<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self {
            AvatarImage::Placeholder => placeholder,
            AvatarImage::Captured(image) => image.as_uri(),
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self, AvatarImage::Captured(_))
    }
}

/// Renderable state of the profile screen.
#[derive(Clone, Debug)]
pub struct ProfileViewState {
    /// Initial avatar resolution still running.
    pub loading: bool,

    /// Capture surface (modal) open.
    pub camera_open: bool,

    /// Avatar to render.
    pub avatar: AvatarImage,

    /// A shot is in flight; the shutter is hidden.
    pub capture_busy: bool,

    /// Camera permission as last resolved.
    pub permission: PermissionState,

    /// Transient capture error, shown as an alert.
    pub alert: Option<String>,
}

impl Default for ProfileViewState {
    fn default() -> Self {
        ProfileViewState {
            // The screen starts loading until the first avatar resolution.
            loading: true,
            camera_open: false,
            avatar: AvatarImage::Placeholder,
            capture_busy: false,
            permission: PermissionState::Unknown,
            alert: None,
        }
    }
}

impl ProfileViewState {
    /// Static notice shown instead of the preview when access is denied.
    pub fn access_notice(&self) -> Option<&'static str> {
        if self.permission == PermissionState::Denied {
            Some(NO_ACCESS_NOTICE)
        } else {
            None
        }
    }

    /// Whether the shutter control is offered at all.
    pub fn can_capture(&self) -> bool {
        self.camera_open && !self.capture_busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_resolution_never_blank() {
        let placeholder = "https://example.com/fallback.png";
        assert_eq!(AvatarImage::Placeholder.resolve(placeholder), placeholder);

        let captured = AvatarImage::Captured(EncodedImage::from_payload("QUJD"));
        assert_eq!(captured.resolve(placeholder), "data:image/jpg;base64,QUJD");
        assert!(captured.is_captured());
    }

    #[test]
    fn test_view_starts_loading() {
        let view = ProfileViewState::default();
        assert!(view.loading);
        assert!(!view.camera_open);
        assert_eq!(view.avatar, AvatarImage::Placeholder);
    }

    #[test]
    fn test_access_notice_only_when_denied() {
        let mut view = ProfileViewState::default();
        assert_eq!(view.access_notice(), None);

        view.permission = PermissionState::Denied;
        assert_eq!(view.access_notice(), Some("No access to camera"));

        view.permission = PermissionState::Granted;
        assert_eq!(view.access_notice(), None);
    }

    #[test]
    fn test_shutter_gating() {
        let mut view = ProfileViewState::default();
        assert!(!view.can_capture());

        view.camera_open = true;
        assert!(view.can_capture());

        view.capture_busy = true;
        assert!(!view.can_capture());
    }
}
