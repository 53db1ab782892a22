//! Typed handles used across the engine, simulator, and protocol APIs.
//!
//! Handles are registration-order indexes into the network setup. Two
//! handles are the same participant or message exactly when they are
//! equal; content equality plays no role in identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A sub-slot instant in `[0, tics_per_slot)` ordering transmission
/// starts within a slot.
pub type Tic = usize;

/// Monotone slot counter, incremented once per driver step.
pub type SlotNumber = usize;

/// Handle of a registered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Create a handle from a registration index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The registration index backing this handle.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component #{}", self.0)
    }
}

/// Handle of a registered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(usize);

impl MessageId {
    /// Create a handle from a registration index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The registration index backing this handle.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "message #{}", self.0)
    }
}
