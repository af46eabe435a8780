//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are decimal-precise and expected to be non-negative with at most
/// two fraction digits. The storefront trades in Brazilian Real, so BRL is
/// the default currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a BRL price.
    #[must_use]
    pub const fn brl(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::BRL)
    }

    /// Format for display using the currency's locale conventions
    /// (e.g., `R$ 1.299,90` for BRL).
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{} {}",
            self.currency_code.symbol(),
            format_amount(self.amount, self.currency_code)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "$",
        }
    }

    /// ISO 4217 code string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BRL => "BRL",
            Self::USD => "USD",
        }
    }
}

/// Format a decimal amount with two fraction digits and locale separators.
fn format_amount(amount: Decimal, currency: CurrencyCode) -> String {
    let plain = format!("{:.2}", amount.round_dp(2));
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let (sign, digits) = integer
        .strip_prefix('-')
        .map_or(("", integer), |rest| ("-", rest));

    // Group the integer digits in threes from the right
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        let remaining = digits.len() - i;
        if i > 0 && remaining % 3 == 0 {
            grouped.push(match currency {
                CurrencyCode::BRL => '.',
                CurrencyCode::USD => ',',
            });
        }
        grouped.push(c);
    }

    let decimal_sep = match currency {
        CurrencyCode::BRL => ',',
        CurrencyCode::USD => '.',
    };

    format!("{sign}{grouped}{decimal_sep}{fraction}")
}
