//! View transition timing
//!
//! The controller sequences two transitions: the contact-card entrance
//! fade after mount and the modal settle time on dismissal. Both are
//! plain awaits so ordering guarantees read directly from the code.

use std::time::Duration;

use tokio::time::sleep;

/// Durations of the view transitions the controller awaits.
#[derive(Clone, Copy, Debug)]
pub struct TransitionTimings {
    /// Contact-card fade-in after mount.
    pub entrance: Duration,

    /// Modal settle time before the surface counts as closed.
    pub modal_exit: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        TransitionTimings {
            entrance: Duration::from_millis(600),
            modal_exit: Duration::from_millis(200),
        }
    }
}

impl TransitionTimings {
    /// Zero-length timings for tests.
    pub fn instant() -> Self {
        TransitionTimings {
            entrance: Duration::ZERO,
            modal_exit: Duration::ZERO,
        }
    }
}

/// Awaitable transitions with configured timings.
#[derive(Clone, Copy, Debug, Default)]
pub struct Transitions {
    timings: TransitionTimings,
}

impl Transitions {
    pub fn new(timings: TransitionTimings) -> Self {
        Transitions { timings }
    }

    pub fn timings(&self) -> TransitionTimings {
        self.timings
    }

    /// Entrance fade; resolves when the contact card is fully visible.
    pub async fn entrance(&self) {
        sleep(self.timings.entrance).await;
    }

    /// Modal dismissal; resolves when the capture surface has settled out.
    pub async fn modal_exit(&self) {
        sleep(self.timings.modal_exit).await;
    }
}
