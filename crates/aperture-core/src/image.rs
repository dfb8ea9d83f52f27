//! Encoded avatar images and data-URI normalization
//!
//! Avatars are persisted as textual data URIs. A value can enter the
//! system in three shapes: a bare base64 payload fresh from a capture, an
//! already-prefixed URI read back from storage, or an empty payload.
//! `EncodedImage::normalize` is total over all three, so everything
//! downstream of the store sees a uniformly prefixed value.

use std::fmt;

/// Well-known persistence key for the profile avatar slot.
pub const USER_IMAGE_KEY: &str = "userImage";

/// Encoding prefix applied to captured JPEG payloads.
pub const JPEG_BASE64_PREFIX: &str = "data:image/jpg;base64,";

/// Marker separating the media type from the base64 payload in a data URI.
const BASE64_MARKER: &str = ";base64,";

/// Remote placeholder shown while no captured avatar is persisted.
pub const DEFAULT_AVATAR_URL: &str =
    "https://secure.gravatar.com/avatar/00000000000000000000000000000000?d=mm";

/// A data-URI image value whose prefix is guaranteed present.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Normalize a raw stored or captured value into a prefixed data URI.
    ///
    /// An existing `data:...;base64,` URI is kept as-is regardless of
    /// media type. Anything else is treated as a bare base64 payload and
    /// prefixed, so an empty payload yields the bare JPEG prefix.
    pub fn normalize(raw: &str) -> Self {
        if Self::is_data_uri(raw) {
            EncodedImage(raw.to_string())
        } else {
            EncodedImage(format!("{}{}", JPEG_BASE64_PREFIX, raw))
        }
    }

    /// Build an image directly from a base64 payload.
    pub fn from_payload(payload: &str) -> Self {
        EncodedImage(format!("{}{}", JPEG_BASE64_PREFIX, payload))
    }

    /// Whether a value already carries a base64 data-URI prefix.
    ///
    /// This checks the URI shape, not a substring: the word "base64" is
    /// itself valid base64 text and may occur inside a bare payload.
    #[inline]
    pub fn is_data_uri(value: &str) -> bool {
        value.starts_with("data:") && value.contains(BASE64_MARKER)
    }

    /// The full data URI.
    #[inline]
    pub fn as_uri(&self) -> &str {
        &self.0
    }

    /// The base64 payload after the encoding marker.
    pub fn payload(&self) -> &str {
        match self.0.find(BASE64_MARKER) {
            Some(at) => &self.0[at + BASE64_MARKER.len()..],
            None => &self.0,
        }
    }

    /// Consume the image, yielding the full data URI.
    #[inline]
    pub fn into_uri(self) -> String {
        self.0
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The payload can be large; report its size instead of dumping it.
        write!(f, "Image({}B)", self.0.len())
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
