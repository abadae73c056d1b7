//! # Field identifiers and attribute freshness
//!
//! Every cached attribute is an [`Attribute<T>`]: the last value received for
//! it plus a [`FieldState`] describing whether the most recent message touched
//! it. Caches never fall back to defaults between messages; the only way back
//! to `Uninitialized` is an explicit clear.
//!
//! ```text
//!                set()                 demote()
//! Uninitialized ──────▶ Modified ◀────────────▶ Unmodified
//!       ▲                           set()            │
//!       └──────────────── clear() ───────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dictionary-assigned field identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FieldId(pub u16);

impl FieldId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u16> for FieldId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fid#{}", self.0)
    }
}

/// Freshness of a cached attribute relative to the last processed message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldState {
    /// Never received since the cache was created or cleared
    #[default]
    Uninitialized,
    /// Assigned by the most recently processed message
    Modified,
    /// Holds a value from an earlier message
    Unmodified,
}

impl FieldState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Modified => "Modified",
            Self::Unmodified => "Unmodified",
        }
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One cached attribute: value plus freshness
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute<T> {
    value: T,
    state: FieldState,
}

impl<T> Attribute<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn is_modified(&self) -> bool {
        self.state == FieldState::Modified
    }

    pub fn is_initialized(&self) -> bool {
        self.state != FieldState::Uninitialized
    }

    /// Assign a value and mark it Modified
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.state = FieldState::Modified;
    }

    /// Start of a new message: Modified becomes Unmodified
    #[inline]
    pub fn demote(&mut self) {
        if self.state == FieldState::Modified {
            self.state = FieldState::Unmodified;
        }
    }

    /// Value if it was ever received
    pub fn get(&self) -> Option<&T> {
        self.is_initialized().then_some(&self.value)
    }
}

impl<T: Default> Attribute<T> {
    pub fn clear(&mut self) {
        self.value = T::default();
        self.state = FieldState::Uninitialized;
    }
}

impl<T: PartialEq> Attribute<T> {
    /// Assign only when the value differs from the cached one
    ///
    /// Returns whether an assignment happened. An unchanged value keeps its
    /// current state.
    pub fn set_if_changed(&mut self, value: T) -> bool {
        if self.is_initialized() && self.value == value {
            return false;
        }
        self.set(value);
        true
    }
}

impl<T: Copy> Attribute<T> {
    pub fn copied(&self) -> T {
        self.value
    }
}
