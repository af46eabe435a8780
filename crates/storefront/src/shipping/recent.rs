//! Recently queried postal codes.

use serde::{Deserialize, Serialize};
use vitrine_core::PostalCode;

const CAPACITY: usize = 3;

/// Bounded most-recent-first list of queried postal codes, deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentCodes(Vec<PostalCode>);

impl RecentCodes {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a successful lookup. A code already present stays where it is;
    /// a new code goes to the front and the list is trimmed to capacity.
    pub fn record(&mut self, code: PostalCode) {
        if self.0.contains(&code) {
            return;
        }
        self.0.insert(0, code);
        self.0.truncate(CAPACITY);
    }

    /// Codes, most recent first.
    #[must_use]
    pub fn codes(&self) -> &[PostalCode] {
        &self.0
    }
}
