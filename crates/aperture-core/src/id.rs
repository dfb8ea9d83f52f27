//! Identity types for the avatar capture stack
//!
//! Session and handle identifiers are small monotonic sequence numbers.
//! They exist so that results arriving from asynchronous device work can
//! be matched against the session that is still current, and discarded
//! when it is not.

use std::fmt;

/// Capture session identity - one per opening of the capture surface
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl SessionId {
    pub const ZERO: SessionId = SessionId(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        SessionId(id)
    }

    /// The id that follows this one in allocation order.
    #[inline]
    pub fn next(self) -> Self {
        SessionId(self.0 + 1)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Device handle identity - one per acquisition from a camera device
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HandleId(pub u64);

impl HandleId {
    pub const ZERO: HandleId = HandleId(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        HandleId(id)
    }
}

impl fmt::Debug for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
