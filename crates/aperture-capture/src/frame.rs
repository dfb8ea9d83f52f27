//! Captured frames

use std::fmt;
use std::time::SystemTime;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;

use aperture_core::{EncodedImage, SessionId};

/// A single frame taken by a capture session.
#[derive(Clone)]
pub struct CapturedFrame {
    /// Session the frame belongs to; late frames are matched by this id.
    pub session: SessionId,

    /// Wall-clock time of the shot.
    pub taken_at: SystemTime,

    /// Raw frame data.
    pub data: Bytes,
}

impl CapturedFrame {
    pub fn new(session: SessionId, data: Bytes) -> Self {
        CapturedFrame {
            session,
            taken_at: SystemTime::now(),
            data,
        }
    }

    /// Base64 view of the frame data, the shape the store persists.
    pub fn base64_payload(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// The frame as a prefixed data URI.
    pub fn to_image(&self) -> EncodedImage {
        EncodedImage::from_payload(&self.base64_payload())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for CapturedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({:?}, {}B)", self.session, self.data.len())
    }
}
