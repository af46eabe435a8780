//! Per-session selection memory.
//!
//! Snapshot of the shopper's page state (selected options, quantity,
//! shipping inputs) persisted under one key so a reload within fifteen
//! minutes restores where they left off. Only the selected shipping option's
//! id is stored; option lists are regenerated from the next estimate, never
//! replayed.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vitrine_core::PostalCode;

use crate::shipping::{RecentCodes, ShippingOptionId};
use crate::store::KeyValueStore;
use crate::variant::Selection;

/// Fixed store key for session memory.
pub const SESSION_STORAGE_KEY: &str = "productSelections";

/// How long a saved session stays restorable.
const FRESHNESS_MINUTES: i64 = 15;

/// Everything worth restoring on the next page view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMemory {
    /// Option name to chosen value.
    #[serde(default)]
    pub selection: Selection,
    /// Chosen purchase quantity.
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Wishlist toggle.
    #[serde(default)]
    pub favorite: bool,
    /// Last postal code the shopper estimated shipping for.
    #[serde(default)]
    pub postal_code: Option<PostalCode>,
    /// Base cost of that estimate, in BRL.
    #[serde(default)]
    pub shipping_cost: Option<Decimal>,
    /// Id only; the full option is regenerated per estimate.
    #[serde(default)]
    pub selected_shipping: Option<ShippingOptionId>,
    #[serde(default)]
    pub recent_codes: RecentCodes,
    /// When this snapshot was written.
    pub saved_at: DateTime<Utc>,
}

impl SessionMemory {
    /// Whether the snapshot is still within the freshness window at `now`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.saved_at < Duration::minutes(FRESHNESS_MINUTES)
    }

    /// Persist the snapshot, stamping it with `now`. Write failures are
    /// logged and absorbed.
    pub fn save<S: KeyValueStore>(&mut self, store: &mut S, now: DateTime<Utc>) {
        self.saved_at = now;

        match serde_json::to_string(self) {
            Ok(raw) => {
                if let Err(error) = store.set(SESSION_STORAGE_KEY, &raw) {
                    warn!(%error, "failed to persist session memory");
                }
            }
            Err(error) => warn!(%error, "failed to serialize session memory"),
        }
    }

    /// Restore the snapshot if one exists and is fresh at `now`.
    ///
    /// A stale snapshot is ignored, not deleted. Absent, malformed, or
    /// unreadable state restores nothing.
    #[must_use]
    pub fn load<S: KeyValueStore>(store: &S, now: DateTime<Utc>) -> Option<Self> {
        let raw = match store.get(SESSION_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                warn!(%error, "failed to read session memory");
                return None;
            }
        };

        let memory: Self = match serde_json::from_str(&raw) {
            Ok(memory) => memory,
            Err(error) => {
                warn!(%error, "stored session memory is malformed");
                return None;
            }
        };

        if !memory.is_fresh(now) {
            debug!(saved_at = %memory.saved_at, "session memory is stale");
            return None;
        }

        Some(memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::store::MemoryStore;

    fn sample() -> SessionMemory {
        let mut selection = Selection::new();
        selection.insert("Cor".to_string(), "Preto".to_string());

        let mut recent_codes = RecentCodes::new();
        recent_codes.record(PostalCode::parse("01310930").unwrap());

        SessionMemory {
            selection,
            quantity: Some(2),
            favorite: true,
            postal_code: Some(PostalCode::parse("01310930").unwrap()),
            shipping_cost: Some(Decimal::from(10)),
            selected_shipping: Some(ShippingOptionId::Express),
            recent_codes,
            saved_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_then_load_within_window() {
        let mut store = MemoryStore::new();
        let now = Utc::now();

        let mut memory = sample();
        memory.save(&mut store, now);

        let restored = SessionMemory::load(&store, now + Duration::minutes(14)).unwrap();
        assert_eq!(restored.selection, memory.selection);
        assert_eq!(restored.selected_shipping, Some(ShippingOptionId::Express));
        assert_eq!(restored.recent_codes, memory.recent_codes);
    }

    #[test]
    fn test_stale_snapshot_is_ignored_not_deleted() {
        let mut store = MemoryStore::new();
        let now = Utc::now();

        sample().save(&mut store, now);

        assert!(SessionMemory::load(&store, now + Duration::minutes(15)).is_none());
        // Still on disk
        assert!(store.get(SESSION_STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_absent_and_malformed_restore_nothing() {
        let store = MemoryStore::new();
        assert!(SessionMemory::load(&store, Utc::now()).is_none());

        let mut store = MemoryStore::new();
        store.set(SESSION_STORAGE_KEY, "not json").unwrap();
        assert!(SessionMemory::load(&store, Utc::now()).is_none());
    }

    #[test]
    fn test_missing_fields_default() {
        let mut store = MemoryStore::new();
        let raw = serde_json::json!({ "saved_at": Utc::now() }).to_string();
        store.set(SESSION_STORAGE_KEY, &raw).unwrap();

        let restored = SessionMemory::load(&store, Utc::now()).unwrap();
        assert!(restored.selection.is_empty());
        assert_eq!(restored.quantity, None);
        assert!(!restored.favorite);
    }
}
