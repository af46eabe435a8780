//! Conversion from the raw catalog wire format to domain types.
//!
//! The catalog CDN serves an opaque JSON document per product:
//!
//! ```json
//! {
//!   "id": 1,
//!   "title": "Tênis Esportivo XYZ",
//!   "image_url": "https://...",
//!   "options": ["Tamanho", "Cor"],
//!   "values": [["37", "38"], ["Preto", "Branco"]],
//!   "variants": [
//!     { "id": 10, "values": ["37", "Preto"], "price": "299.90",
//!       "inventory_quantity": 3, "image_url": "https://..." }
//!   ]
//! }
//! ```
//!
//! `price` arrives as either a string or a number; both parse to `Decimal`.
//! Conversion enforces the snapshot invariants and fails with
//! [`CatalogError::Invalid`] on inconsistent data.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Deserialize;
use vitrine_core::{Price, ProductId, VariantId};

use super::types::{CatalogSnapshot, ProductOption, Variant};
use super::CatalogError;

/// Raw product document as served by the catalog CDN.
#[derive(Debug, Deserialize)]
pub struct RawProduct {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
    #[serde(default)]
    pub variants: Vec<RawVariant>,
}

/// Raw variant record.
#[derive(Debug, Deserialize)]
pub struct RawVariant {
    pub id: i64,
    pub values: Vec<String>,
    pub price: RawPrice,
    #[serde(default)]
    pub inventory_quantity: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Price as it appears on the wire: string or number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Text(String),
    Number(f64),
}

impl RawPrice {
    fn to_decimal(&self) -> Result<Decimal, CatalogError> {
        match self {
            Self::Text(s) => s
                .trim()
                .parse::<Decimal>()
                .map_err(|e| CatalogError::Invalid(format!("price {s:?}: {e}"))),
            Self::Number(n) => Decimal::from_f64_retain(*n)
                .ok_or_else(|| CatalogError::Invalid(format!("price {n} is not representable"))),
        }
        .map(|d| d.round_dp(2))
    }
}

impl TryFrom<RawProduct> for CatalogSnapshot {
    type Error = CatalogError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        if raw.options.len() != raw.values.len() {
            return Err(CatalogError::Invalid(format!(
                "{} options but {} value lists",
                raw.options.len(),
                raw.values.len()
            )));
        }

        let options: Vec<ProductOption> = raw
            .options
            .into_iter()
            .zip(raw.values)
            .map(|(name, values)| ProductOption { name, values })
            .collect();

        if raw.variants.is_empty() {
            return Err(CatalogError::Invalid("catalog has no variants".to_string()));
        }

        let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(raw.variants.len());
        let mut variants = Vec::with_capacity(raw.variants.len());

        for variant in raw.variants {
            if variant.values.len() != options.len() {
                return Err(CatalogError::Invalid(format!(
                    "variant {} has {} values for {} options",
                    variant.id,
                    variant.values.len(),
                    options.len()
                )));
            }

            for (value, option) in variant.values.iter().zip(&options) {
                if !option.permits(value) {
                    return Err(CatalogError::Invalid(format!(
                        "variant {} value {value:?} is not permitted for option {:?}",
                        variant.id, option.name
                    )));
                }
            }

            // Value vectors are the resolution key; they must be unique
            if !seen.insert(variant.values.clone()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate variant value vector {:?}",
                    variant.values
                )));
            }

            let amount = variant.price.to_decimal()?;
            if amount.is_sign_negative() {
                return Err(CatalogError::Invalid(format!(
                    "variant {} has negative price {amount}",
                    variant.id
                )));
            }

            variants.push(Variant {
                id: VariantId::new(variant.id),
                values: variant.values,
                price: Price::brl(amount),
                inventory_quantity: variant.inventory_quantity.max(0),
                image_url: variant.image_url,
            });
        }

        Ok(Self {
            id: ProductId::new(raw.id),
            title: raw.title,
            image_url: raw.image_url,
            options,
            variants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "title": "Tênis Esportivo XYZ",
            "image_url": "https://cdn.example/base.jpg",
            "options": ["Tamanho", "Cor"],
            "values": [["37", "38"], ["Preto", "Branco"]],
            "variants": [
                { "id": 11, "values": ["37", "Preto"], "price": "299.90",
                  "inventory_quantity": 3 },
                { "id": 12, "values": ["37", "Branco"], "price": 279.9,
                  "inventory_quantity": 0,
                  "image_url": "https://cdn.example/branco.jpg" },
                { "id": 13, "values": ["38", "Preto"], "price": "299.90",
                  "inventory_quantity": 5 }
            ]
        })
    }

    fn parse(value: serde_json::Value) -> Result<CatalogSnapshot, CatalogError> {
        let raw: RawProduct = serde_json::from_value(value).unwrap();
        CatalogSnapshot::try_from(raw)
    }

    #[test]
    fn test_parse_sample_product() {
        let snapshot = parse(sample_json()).unwrap();

        assert_eq!(snapshot.id, ProductId::new(1));
        assert_eq!(snapshot.title, "Tênis Esportivo XYZ");
        assert_eq!(snapshot.options.len(), 2);
        assert_eq!(snapshot.options[0].name, "Tamanho");
        assert_eq!(snapshot.variants.len(), 3);
    }

    #[test]
    fn test_price_parses_from_string_and_number() {
        let snapshot = parse(sample_json()).unwrap();

        assert_eq!(snapshot.variants[0].price.amount, "299.90".parse().unwrap());
        // Numeric 279.9 rounds to two decimal places
        assert_eq!(snapshot.variants[1].price.amount, "279.90".parse().unwrap());
    }

    #[test]
    fn test_variant_image_override_preserved() {
        let snapshot = parse(sample_json()).unwrap();
        assert_eq!(
            snapshot.variants[1].image_url.as_deref(),
            Some("https://cdn.example/branco.jpg")
        );
        assert_eq!(snapshot.variants[0].image_url, None);
    }

    #[test]
    fn test_duplicate_value_vector_rejected() {
        let mut value = sample_json();
        value["variants"][2]["values"] = serde_json::json!(["37", "Preto"]);
        let err = parse(value).unwrap_err();
        assert!(err.to_string().contains("duplicate variant value vector"));
    }

    #[test]
    fn test_mismatched_value_lists_rejected() {
        let mut value = sample_json();
        value["values"] = serde_json::json!([["37", "38"]]);
        assert!(parse(value).is_err());
    }

    #[test]
    fn test_unpermitted_value_rejected() {
        let mut value = sample_json();
        value["variants"][0]["values"] = serde_json::json!(["37", "Verde"]);
        let err = parse(value).unwrap_err();
        assert!(err.to_string().contains("not permitted"));
    }

    #[test]
    fn test_negative_inventory_clamped_to_zero() {
        let mut value = sample_json();
        value["variants"][0]["inventory_quantity"] = serde_json::json!(-2);
        let snapshot = parse(value).unwrap();
        assert_eq!(snapshot.variants[0].inventory_quantity, 0);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut value = sample_json();
        value["variants"][0]["price"] = serde_json::json!("-1.00");
        assert!(parse(value).is_err());
    }

    #[test]
    fn test_empty_variant_list_rejected() {
        let mut value = sample_json();
        value["variants"] = serde_json::json!([]);
        let err = parse(value).unwrap_err();
        assert!(err.to_string().contains("no variants"));
    }
}
