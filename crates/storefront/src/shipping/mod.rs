//! Shipping cost estimator.
//!
//! Pipeline: validate the raw postal code, resolve it to an address through
//! ViaCEP, price the destination, and derive the offered shipping options.
//! Format validation happens before the lookup, so malformed input never
//! reaches the network.

mod cost;
mod geo;
mod lookup;
mod options;
mod recent;

pub use cost::{base_cost, Region};
pub use geo::{
    city_coordinates, haversine_km, is_capital, nearest_center_km, Coordinates,
    DistributionCenter, DISTRIBUTION_CENTERS,
};
pub use lookup::{Address, AddressLookup, ViaCepClient};
pub use options::{shipping_options, DeliveryTier, ShippingOption, ShippingOptionId};
pub use recent::RecentCodes;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use vitrine_core::{PostalCode, PostalCodeError};

/// Errors from a shipping estimate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShippingError {
    /// The input is not a well-formed postal code.
    #[error(transparent)]
    InvalidFormat(#[from] PostalCodeError),

    /// Well-formed code the address service does not know.
    #[error("postal code {0} not found")]
    NotFound(PostalCode),

    /// The address service could not be reached or answered garbage.
    #[error("address lookup failed: {0}")]
    LookupFailed(String),
}

impl ShippingError {
    /// Shopper-facing message in Portuguese.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidFormat(_) => "Digite um CEP válido",
            Self::NotFound(_) => "CEP não encontrado",
            Self::LookupFailed(_) => "Falha ao buscar o CEP. Tente novamente.",
        }
    }
}

/// A complete shipping estimate for one destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingQuote {
    pub address: Address,
    /// Standard-tier cost the other options derive from, in BRL.
    pub base_cost: Decimal,
    /// Offered methods, free always last.
    pub options: Vec<ShippingOption>,
}

impl ShippingQuote {
    /// Default pre-selected option.
    #[must_use]
    pub const fn default_option(&self) -> ShippingOptionId {
        ShippingOptionId::Standard
    }
}

/// Shipping estimator over an address lookup backend.
#[derive(Debug, Clone)]
pub struct ShippingEstimator<L> {
    lookup: L,
}

impl<L: AddressLookup> ShippingEstimator<L> {
    pub const fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Estimate shipping for a raw postal code as the shopper typed it.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::InvalidFormat`] without touching the network
    /// when the input does not contain exactly eight digits, and propagates
    /// lookup failures otherwise.
    pub async fn estimate(&self, raw_code: &str) -> Result<ShippingQuote, ShippingError> {
        let code = PostalCode::parse(raw_code)?;
        let address = self.lookup.lookup(&code).await?;

        let base_cost = cost::base_cost(&address.city, &address.state);
        debug!(code = %code, city = %address.city, %base_cost, "shipping estimate");

        Ok(ShippingQuote {
            options: options::shipping_options(base_cost),
            address,
            base_cost,
        })
    }
}
