//! ViaCEP address lookup.
//!
//! The estimator only needs city, state, and the display address, so the
//! lookup is a small trait with the HTTP client as one implementation. Tests
//! substitute an in-memory lookup.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use vitrine_core::PostalCode;

use super::ShippingError;

/// Resolved address for a postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub postal_code: PostalCode,
    /// Street, may be empty for broad postal codes.
    pub street: String,
    /// Neighborhood, may be empty.
    pub neighborhood: String,
    pub city: String,
    /// Two-letter state code.
    pub state: String,
}

impl Address {
    /// Single-line display form, street and neighborhood omitted when empty.
    #[must_use]
    pub fn display_line(&self) -> String {
        let mut line = String::new();
        if !self.street.is_empty() {
            line.push_str(&self.street);
        }
        if !self.neighborhood.is_empty() {
            if !line.is_empty() {
                line.push_str(" - ");
            }
            line.push_str(&self.neighborhood);
        }
        if !line.is_empty() {
            line.push_str(", ");
        }
        line.push_str(&format!("{} - {}", self.city, self.state));
        line
    }
}

/// Resolves a postal code to an address.
#[allow(async_fn_in_trait)]
pub trait AddressLookup {
    /// Look up a postal code.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::NotFound`] for a well-formed code the
    /// service does not know, and [`ShippingError::LookupFailed`] for
    /// transport failures.
    async fn lookup(&self, code: &PostalCode) -> Result<Address, ShippingError>;
}

// =============================================================================
// ViaCEP client
// =============================================================================

/// Wire format of a ViaCEP response.
///
/// An unknown code returns `{"erro": true}` with every address field absent;
/// the service has also historically sent `"erro": "true"` as a string.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default, deserialize_with = "bool_or_string")]
    erro: bool,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

fn bool_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s == "true",
    })
}

/// HTTP client for the public ViaCEP service.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    /// Create a client against a ViaCEP-compatible base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn lookup_url(&self, code: &PostalCode) -> String {
        format!("{}/ws/{}/json/", self.base_url.trim_end_matches('/'), code.as_str())
    }
}

impl AddressLookup for ViaCepClient {
    async fn lookup(&self, code: &PostalCode) -> Result<Address, ShippingError> {
        let url = self.lookup_url(code);
        debug!(%url, "looking up postal code");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| ShippingError::LookupFailed(e.to_string()))?;

        let body: ViaCepResponse = response
            .json()
            .await
            .map_err(|e| ShippingError::LookupFailed(e.to_string()))?;

        if body.erro {
            return Err(ShippingError::NotFound(code.clone()));
        }

        Ok(Address {
            postal_code: code.clone(),
            street: body.logradouro,
            neighborhood: body.bairro,
            city: body.localidade,
            state: body.uf,
        })
    }
}
