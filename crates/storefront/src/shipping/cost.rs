//! Shipping cost model.
//!
//! Two pricing paths. When the destination city has known coordinates, the
//! cost is base + a surcharge keyed on the distance to the nearest
//! distribution center, minus the capital discount (floored at the base).
//! Otherwise a flat per-region cost applies, derived from the two-letter
//! state code, with no discount.

use rust_decimal::Decimal;

use super::geo::{self, city_coordinates};

const BASE_COST: u32 = 10;
const CAPITAL_DISCOUNT: u32 = 5;
const UNKNOWN_REGION_COST: u32 = 35;

/// Brazilian macro-region, derived from the state code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Southeast,
    South,
    Midwest,
    Northeast,
    North,
}

impl Region {
    /// Region for a two-letter state code, `None` for unrecognized codes.
    #[must_use]
    pub fn from_state(uf: &str) -> Option<Self> {
        match uf {
            "SP" | "RJ" | "MG" | "ES" => Some(Self::Southeast),
            "PR" | "SC" | "RS" => Some(Self::South),
            "MT" | "MS" | "GO" | "DF" => Some(Self::Midwest),
            "BA" | "SE" | "AL" | "PE" | "PB" | "RN" | "CE" | "PI" | "MA" => Some(Self::Northeast),
            "AM" | "PA" | "AC" | "RO" | "RR" | "AP" | "TO" => Some(Self::North),
            _ => None,
        }
    }

    /// Flat fallback cost when the destination city has no coordinates.
    #[must_use]
    pub const fn flat_cost(self) -> u32 {
        match self {
            Self::Southeast => 15,
            Self::South | Self::Midwest => 20,
            Self::Northeast => 25,
            Self::North => 30,
        }
    }
}

/// Surcharge for the distance to the nearest distribution center.
/// Half-open bands; exactly 100 km falls in the second band.
const fn distance_surcharge(km: f64) -> u32 {
    if km < 100.0 {
        5
    } else if km < 300.0 {
        10
    } else if km < 600.0 {
        20
    } else if km < 1000.0 {
        30
    } else if km < 2000.0 {
        40
    } else {
        50
    }
}

/// Base shipping cost for a destination, in BRL.
///
/// The coordinate path takes precedence over the regional fallback whenever
/// the city is in the table, regardless of state.
#[must_use]
pub fn base_cost(city: &str, uf: &str) -> Decimal {
    let cost = match city_coordinates(city) {
        Some(coordinates) => {
            let distance = geo::nearest_center_km(coordinates);
            let discount = if geo::is_capital(city) { CAPITAL_DISCOUNT } else { 0 };
            (BASE_COST + distance_surcharge(distance))
                .saturating_sub(discount)
                .max(BASE_COST)
        }
        None => Region::from_state(uf).map_or(UNKNOWN_REGION_COST, Region::flat_cost),
    };

    Decimal::from(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(city: &str, uf: &str) -> Decimal {
        base_cost(city, uf)
    }

    #[test]
    fn test_center_city_floors_at_base() {
        // Distance 0 -> surcharge 5, capital discount 5: 10 + 5 - 5 = 10
        assert_eq!(cost("São Paulo", "SP"), Decimal::from(10));
        assert_eq!(cost("Rio de Janeiro", "RJ"), Decimal::from(10));
    }

    #[test]
    fn test_curitiba_uses_medium_band() {
        // ~340 km to São Paulo: 10 + 20 - 5 = 25
        assert_eq!(cost("Curitiba", "PR"), Decimal::from(25));
    }

    #[test]
    fn test_manaus_uses_far_band() {
        // Over 2000 km from every center: 10 + 50 - 5 = 55
        assert_eq!(cost("Manaus", "AM"), Decimal::from(55));
    }

    #[test]
    fn test_unknown_city_falls_back_to_region() {
        assert_eq!(cost("Campinas", "SP"), Decimal::from(15));
        assert_eq!(cost("Joinville", "SC"), Decimal::from(20));
        assert_eq!(cost("Cuiabá", "MT"), Decimal::from(20));
        assert_eq!(cost("Caruaru", "PE"), Decimal::from(25));
        assert_eq!(cost("Santarém", "PA"), Decimal::from(30));
    }

    #[test]
    fn test_unknown_state_gets_default_cost() {
        assert_eq!(cost("Cidade Fantasma", "XX"), Decimal::from(35));
    }

    #[test]
    fn test_known_city_wins_over_state_fallback() {
        // Even with a bogus state code the coordinate path applies
        assert_eq!(cost("Florianópolis", "XX"), cost("Florianópolis", "SC"));
    }

    #[test]
    fn test_surcharge_is_monotone_in_distance() {
        let distances = [0.0, 50.0, 99.9, 100.0, 299.0, 300.0, 599.0, 600.0, 999.0, 1000.0, 1999.0, 2000.0, 5000.0];
        let mut last = 0;
        for d in distances {
            let surcharge = distance_surcharge(d);
            assert!(surcharge >= last, "surcharge dropped at {d} km");
            last = surcharge;
        }
    }

    #[test]
    fn test_region_from_state_covers_all_ufs() {
        assert_eq!(Region::from_state("ES"), Some(Region::Southeast));
        assert_eq!(Region::from_state("RS"), Some(Region::South));
        assert_eq!(Region::from_state("DF"), Some(Region::Midwest));
        assert_eq!(Region::from_state("MA"), Some(Region::Northeast));
        assert_eq!(Region::from_state("TO"), Some(Region::North));
        assert_eq!(Region::from_state("ZZ"), None);
    }
}
