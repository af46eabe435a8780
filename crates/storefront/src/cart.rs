//! Cart aggregation.
//!
//! The aggregator owns the authoritative list of cart lines for a session.
//! Lines are identified by the composite (product, size, color) key, so two
//! additions of the same variant merge into one line. Every mutation
//! persists the full line list to the key-value store; the derived total
//! count is recomputed on read and never stored, so it cannot drift.
//!
//! Mutations take `&mut self`: the exclusive borrow serializes them, so no
//! interleaved read-modify-write can lose an update.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use vitrine_core::{Price, ProductId};

use crate::store::KeyValueStore;

/// Fixed store key for the persisted cart.
pub const CART_STORAGE_KEY: &str = "cart";

// =============================================================================
// Line types
// =============================================================================

/// Composite identity of a cart line.
///
/// Identity is (product, size, color) - not a generated id - so repeat
/// additions of the same variant-describing attributes merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// One aggregated cart entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line belongs to.
    pub product_id: ProductId,
    /// Selected size, if the product has a size axis.
    pub size: Option<String>,
    /// Selected color, if the product has a color axis.
    pub color: Option<String>,
    /// Display title.
    pub title: String,
    /// Display image.
    pub image_url: Option<String>,
    /// Unit price at the time of addition.
    pub unit_price: Price,
    /// Always >= 1; a decrement below 1 removes the line instead.
    pub quantity: u32,
}

impl CartLine {
    /// The line's composite identity.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Quantity times unit price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.amount * Decimal::from(self.quantity)
    }
}

// =============================================================================
// CartAggregator
// =============================================================================

/// Authoritative cart state with merge-by-identity and persistence.
#[derive(Debug)]
pub struct CartAggregator<S: KeyValueStore> {
    store: S,
    lines: Vec<CartLine>,
}

impl<S: KeyValueStore> CartAggregator<S> {
    /// Load the cart from the store, starting empty if the stored state is
    /// absent, malformed, or unreadable. Persistence failures never prevent
    /// the cart from functioning.
    pub fn load(store: S) -> Self {
        let lines = match store.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(lines) => lines,
                Err(error) => {
                    warn!(%error, "stored cart is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(%error, "failed to read stored cart, starting empty");
                Vec::new()
            }
        };

        Self { store, lines }
    }

    /// Add a line, merging into an existing line with the same identity.
    ///
    /// A zero incoming quantity is clamped to 1. New lines append in
    /// insertion order, which is user-visible and stable across reloads.
    pub fn add(&mut self, line: CartLine) {
        let quantity = line.quantity.max(1);
        let key = line.key();

        if let Some(existing) = self.lines.iter_mut().find(|l| l.key() == key) {
            // Saturate rather than wrap; a wrapped sum could land on 0
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { quantity, ..line });
        }

        self.persist();
    }

    /// Delete the line with this identity. No-op if absent.
    pub fn remove(&mut self, key: &LineKey) {
        let before = self.lines.len();
        self.lines.retain(|line| line.key() != *key);

        if self.lines.len() != before {
            self.persist();
        }
    }

    /// Overwrite a line's quantity. A quantity below 1 removes the line.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) {
        if quantity < 1 {
            self.remove(key);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.key() == *key) {
            line.quantity = quantity;
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of all line quantities. Recomputed on every call.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Consume the aggregator, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.lines) {
            Ok(raw) => {
                if let Err(error) = self.store.set(CART_STORAGE_KEY, &raw) {
                    warn!(%error, "failed to persist cart; in-memory state unaffected");
                }
            }
            Err(error) => {
                warn!(%error, "failed to serialize cart");
            }
        }
    }
}
