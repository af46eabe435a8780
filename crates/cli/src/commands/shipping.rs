//! Shipping estimate commands.

use vitrine_core::Price;
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::shipping::{ShippingError, ShippingEstimator, ViaCepClient};

/// Quote shipping options for a raw CEP and print them.
#[allow(clippy::print_stdout)]
pub async fn estimate(config: &StorefrontConfig, cep: &str) -> Result<(), ShippingError> {
    let estimator = ShippingEstimator::new(ViaCepClient::new(&config.viacep_base_url));

    let quote = match estimator.estimate(cep).await {
        Ok(quote) => quote,
        Err(error) => {
            println!("{}", error.user_message());
            return Err(error);
        }
    };

    println!(
        "{} ({})",
        quote.address.display_line(),
        quote.address.postal_code
    );

    for option in &quote.options {
        let price = if option.price.is_zero() {
            "Grátis".to_string()
        } else {
            Price::brl(option.price).display()
        };
        println!("  {:<10} {:<12} {}", option.id.label(), price, option.lead_time);
    }

    Ok(())
}
