//! Shipping option generation.
//!
//! Options derive entirely from the base cost: express is double, same-day
//! is triple and only offered for close deliveries, and a free option always
//! closes the list. Lead-time labels come from the delivery tier.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stable identifier for a shipping option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingOptionId {
    Standard,
    Express,
    SameDay,
    Free,
}

impl ShippingOptionId {
    /// Display name shown to the shopper.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Padrão",
            Self::Express => "Expressa",
            Self::SameDay => "Hoje",
            Self::Free => "Grátis",
        }
    }
}

/// Delivery distance tier, derived from the base cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryTier {
    Close,
    Medium,
    Far,
}

impl DeliveryTier {
    /// Tier for a base cost. Thresholds are inclusive.
    #[must_use]
    pub fn for_cost(base_cost: Decimal) -> Self {
        if base_cost <= Decimal::from(15) {
            Self::Close
        } else if base_cost <= Decimal::from(25) {
            Self::Medium
        } else {
            Self::Far
        }
    }

    const fn standard_lead(self) -> &'static str {
        match self {
            Self::Close => "2-3 dias úteis",
            Self::Medium => "3-5 dias úteis",
            Self::Far => "5-8 dias úteis",
        }
    }

    const fn express_lead(self) -> &'static str {
        match self {
            Self::Close => "1 dia útil",
            Self::Medium => "2 dias úteis",
            Self::Far => "3-4 dias úteis",
        }
    }
}

/// One offered shipping method.
///
/// Not deserializable on purpose: options are regenerated per estimate, only
/// a [`ShippingOptionId`] is ever persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingOption {
    pub id: ShippingOptionId,
    /// Cost in BRL.
    pub price: Decimal,
    /// Human lead-time estimate.
    pub lead_time: &'static str,
}

/// Build the option list for a base cost.
///
/// Same-day appears only in the close tier, between express and free. Free
/// is always last.
#[must_use]
pub fn shipping_options(base_cost: Decimal) -> Vec<ShippingOption> {
    let tier = DeliveryTier::for_cost(base_cost);

    let mut options = vec![
        ShippingOption {
            id: ShippingOptionId::Standard,
            price: base_cost,
            lead_time: tier.standard_lead(),
        },
        ShippingOption {
            id: ShippingOptionId::Express,
            price: base_cost * Decimal::from(2),
            lead_time: tier.express_lead(),
        },
    ];

    if tier == DeliveryTier::Close {
        options.push(ShippingOption {
            id: ShippingOptionId::SameDay,
            price: base_cost * Decimal::from(3),
            lead_time: "Hoje, se pedido até 12h",
        });
    }

    options.push(ShippingOption {
        id: ShippingOptionId::Free,
        price: Decimal::ZERO,
        lead_time: "7-10 dias úteis",
    });

    options
}
