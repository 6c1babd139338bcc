//! Session parameters: use case behavior control.
//!
//! [`SessionParams`] groups the static switches that control how
//! [`ChairSession`](crate::use_cases::chair_session::ChairSession) treats
//! persistence. These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Write a snapshot after every persistent change
    pub autosave: bool,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self { autosave: true }
    }
}

impl SessionParams {
    // ==================== Builder Methods ====================

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }
}
