//! End-to-end product page flows without network collaborators.
//!
//! Exercises the pieces the way a page session would: restore session
//! memory, pick options, resolve a variant, add it to the cart, estimate
//! shipping, and persist everything through one store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use vitrine_core::{PostalCode, Price, ProductId, VariantId};
use vitrine_storefront::cart::{CartAggregator, CartLine};
use vitrine_storefront::catalog::{CatalogSnapshot, ProductOption, Variant};
use vitrine_storefront::session::SessionMemory;
use vitrine_storefront::shipping::{
    Address, AddressLookup, RecentCodes, ShippingError, ShippingEstimator, ShippingOptionId,
};
use vitrine_storefront::store::MemoryStore;
use vitrine_storefront::variant::{Availability, SelectionModel};

fn sneaker_catalog() -> Arc<CatalogSnapshot> {
    let variant = |id: i64, size: &str, color: &str, price: &str, stock: i64| Variant {
        id: VariantId::new(id),
        values: vec![size.to_string(), color.to_string()],
        price: Price::brl(price.parse().unwrap()),
        inventory_quantity: stock,
        image_url: None,
    };

    Arc::new(CatalogSnapshot {
        id: ProductId::new(1),
        title: "Tênis Esportivo XYZ".to_string(),
        image_url: "https://cdn.example/base.jpg".to_string(),
        options: vec![
            ProductOption {
                name: "Tamanho".to_string(),
                values: vec!["37".to_string(), "38".to_string()],
            },
            ProductOption {
                name: "Cor".to_string(),
                values: vec!["Preto".to_string(), "Azul".to_string()],
            },
        ],
        variants: vec![
            variant(11, "37", "Preto", "299.90", 3),
            variant(12, "37", "Azul", "279.90", 0),
            variant(13, "38", "Preto", "299.90", 5),
            variant(14, "38", "Azul", "279.90", 2),
        ],
    })
}

/// Canned ViaCEP stand-in that counts lookups.
struct FakeViaCep {
    calls: AtomicUsize,
}

impl FakeViaCep {
    fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }
}

impl AddressLookup for &FakeViaCep {
    async fn lookup(&self, code: &PostalCode) -> Result<Address, ShippingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match code.as_str() {
            "01310930" => Ok(Address {
                postal_code: code.clone(),
                street: "Avenida Paulista".to_string(),
                neighborhood: "Bela Vista".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
            }),
            _ => Err(ShippingError::NotFound(code.clone())),
        }
    }
}

#[test]
fn missing_size_blocks_purchase_until_selected() {
    let model = SelectionModel::new(sneaker_catalog());
    model.select("Cor", "Preto").unwrap();

    let resolution = model.resolution();
    assert_eq!(
        resolution.availability(),
        Availability::Incomplete(vec!["Tamanho".to_string()])
    );
    assert!(!resolution.availability().purchasable());

    model.select("Tamanho", "38").unwrap();
    let resolution = model.resolution();
    assert_eq!(resolution.availability(), Availability::InStock(5));
    assert_eq!(
        resolution.price(),
        Some(Price::brl("299.90".parse().unwrap()))
    );
}

#[tokio::test]
async fn paulista_estimate_offers_standard_and_free() {
    let lookup = FakeViaCep::new();
    let estimator = ShippingEstimator::new(&lookup);
    let quote = estimator.estimate("01310-930").await.unwrap();

    assert_eq!(quote.address.city, "São Paulo");
    // Capital on top of a distribution center: discounted to the base cost
    assert_eq!(quote.base_cost, Decimal::from(10));

    let ids: Vec<_> = quote.options.iter().map(|o| o.id).collect();
    assert!(ids.contains(&ShippingOptionId::Standard));
    assert_eq!(ids.last(), Some(&ShippingOptionId::Free));
    assert_eq!(quote.options.last().unwrap().price, Decimal::ZERO);
    assert_eq!(quote.default_option(), ShippingOptionId::Standard);
}

#[tokio::test]
async fn malformed_cep_never_reaches_the_lookup() {
    let lookup = FakeViaCep::new();
    let estimator = ShippingEstimator::new(&lookup);

    let err = estimator.estimate("abc").await.unwrap_err();
    assert!(matches!(err, ShippingError::InvalidFormat(_)));
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);

    // Too few digits is also rejected locally
    let err = estimator.estimate("0131-093").await.unwrap_err();
    assert!(matches!(err, ShippingError::InvalidFormat(_)));
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_cep_reports_not_found() {
    let lookup = FakeViaCep::new();
    let estimator = ShippingEstimator::new(&lookup);

    let err = estimator.estimate("99999-999").await.unwrap_err();
    assert_eq!(err.user_message(), "CEP não encontrado");
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn cart_flow_merges_and_survives_reload() {
    let catalog = sneaker_catalog();
    let model = SelectionModel::new(Arc::clone(&catalog));
    model.select("Tamanho", "38").unwrap();
    model.select("Cor", "Preto").unwrap();

    let resolution = model.resolution();
    let matched = resolution.exact().unwrap();

    let line = CartLine {
        product_id: catalog.id,
        size: Some("38".to_string()),
        color: Some("Preto".to_string()),
        title: catalog.title.clone(),
        image_url: Some(catalog.image_url.clone()),
        unit_price: matched.price,
        quantity: 1,
    };

    let mut cart = CartAggregator::load(MemoryStore::new());
    cart.add(line.clone());
    cart.add(CartLine { quantity: 2, ..line });
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.total_count(), 3);

    // Same store, fresh aggregator: the page was reloaded
    let reloaded = CartAggregator::load(cart.into_store());
    assert_eq!(reloaded.total_count(), 3);
    assert_eq!(
        reloaded.subtotal(),
        "899.70".parse::<Decimal>().unwrap()
    );
}

#[test]
fn session_memory_restores_selection_within_window() {
    let catalog = sneaker_catalog();
    let mut store = MemoryStore::new();
    let now = Utc::now();

    let model = SelectionModel::new(Arc::clone(&catalog));
    model.select("Tamanho", "37").unwrap();
    model.select("Cor", "Azul").unwrap();

    let mut recent_codes = RecentCodes::new();
    recent_codes.record(PostalCode::parse("01310930").unwrap());

    let mut memory = SessionMemory {
        selection: model.current(),
        quantity: Some(1),
        selected_shipping: Some(ShippingOptionId::Standard),
        recent_codes,
        ..SessionMemory::default()
    };
    memory.save(&mut store, now);

    // Ten minutes later the selection comes back
    let restored = SessionMemory::load(&store, now + Duration::minutes(10)).unwrap();
    let model = SelectionModel::new(Arc::clone(&catalog));
    model.restore(restored.selection);
    assert_eq!(model.resolution().availability(), Availability::OutOfStock);

    // Twenty minutes later it does not
    assert!(SessionMemory::load(&store, now + Duration::minutes(20)).is_none());
}
