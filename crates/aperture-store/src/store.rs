//! Single-slot avatar image store

use std::sync::Arc;

use tracing::debug;

use aperture_core::{ApertureResult, EncodedImage, USER_IMAGE_KEY};

use crate::slot::SlotBackend;

/// Persists the profile avatar in a single well-known slot.
///
/// Normalization happens store-side. A value that entered storage without
/// its encoding prefix is prefixed on the way out, so consumers never see
/// a bare payload regardless of what was written historically.
pub struct ImageStore {
    backend: Arc<dyn SlotBackend>,
}

impl ImageStore {
    pub fn new(backend: Arc<dyn SlotBackend>) -> Self {
        ImageStore { backend }
    }

    /// The well-known slot key.
    pub fn key(&self) -> &'static str {
        USER_IMAGE_KEY
    }

    /// Read the persisted avatar, normalized; `None` when the slot is empty.
    pub async fn get(&self) -> ApertureResult<Option<EncodedImage>> {
        let value = self.backend.read(USER_IMAGE_KEY).await?;
        Ok(value.map(|raw| EncodedImage::normalize(&raw)))
    }

    /// Persist a captured payload as a prefixed data URI.
    ///
    /// Already-prefixed input is stored as-is. Each write overwrites the
    /// slot; there is no history.
    pub async fn set_raw(&self, raw: &str) -> ApertureResult<()> {
        let image = EncodedImage::normalize(raw);
        debug!("persisting avatar, {} bytes", image.as_uri().len());
        self.backend.write(USER_IMAGE_KEY, image.as_uri()).await
    }
}
