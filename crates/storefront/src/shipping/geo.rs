//! Geographic tables and distance math for shipping estimates.
//!
//! All tables are compiled in: three distribution centers and a short list
//! of cities with known coordinates. City names match ViaCEP's `localidade`
//! field verbatim, accents included.

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A warehouse that orders ship from.
#[derive(Debug, Clone, Copy)]
pub struct DistributionCenter {
    pub city: &'static str,
    pub state: &'static str,
    pub location: Coordinates,
}

/// Warehouses orders ship from, all in the Southeast.
pub const DISTRIBUTION_CENTERS: [DistributionCenter; 3] = [
    DistributionCenter {
        city: "São Paulo",
        state: "SP",
        location: Coordinates { lat: -23.5505, lng: -46.6333 },
    },
    DistributionCenter {
        city: "Belo Horizonte",
        state: "MG",
        location: Coordinates { lat: -19.9167, lng: -43.9345 },
    },
    DistributionCenter {
        city: "Rio de Janeiro",
        state: "RJ",
        location: Coordinates { lat: -22.9068, lng: -43.1729 },
    },
];

/// Cities with known coordinates, for distance-based pricing.
const CITY_COORDINATES: [(&str, Coordinates); 13] = [
    ("São Paulo", Coordinates { lat: -23.5505, lng: -46.6333 }),
    ("Rio de Janeiro", Coordinates { lat: -22.9068, lng: -43.1729 }),
    ("Belo Horizonte", Coordinates { lat: -19.9167, lng: -43.9345 }),
    ("Brasília", Coordinates { lat: -15.7801, lng: -47.9292 }),
    ("Salvador", Coordinates { lat: -12.9714, lng: -38.5014 }),
    ("Fortaleza", Coordinates { lat: -3.7319, lng: -38.5267 }),
    ("Recife", Coordinates { lat: -8.0579, lng: -34.8829 }),
    ("Porto Alegre", Coordinates { lat: -30.0330, lng: -51.2300 }),
    ("Curitiba", Coordinates { lat: -25.4290, lng: -49.2671 }),
    ("Manaus", Coordinates { lat: -3.1190, lng: -60.0217 }),
    ("Belém", Coordinates { lat: -1.4558, lng: -48.4902 }),
    ("Goiânia", Coordinates { lat: -16.6799, lng: -49.2550 }),
    ("Florianópolis", Coordinates { lat: -27.5969, lng: -48.5495 }),
];

/// Capital cities eligible for the flat discount.
const CAPITAL_CITIES: [&str; 13] = [
    "São Paulo",
    "Rio de Janeiro",
    "Belo Horizonte",
    "Brasília",
    "Salvador",
    "Fortaleza",
    "Recife",
    "Porto Alegre",
    "Curitiba",
    "Manaus",
    "Belém",
    "Goiânia",
    "Florianópolis",
];

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers (haversine).
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Coordinates for a city, if it is in the compiled-in table. Exact name
/// match against ViaCEP's `localidade` spelling.
#[must_use]
pub fn city_coordinates(city: &str) -> Option<Coordinates> {
    CITY_COORDINATES
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, coordinates)| *coordinates)
}

/// Whether a city qualifies for the capital discount.
#[must_use]
pub fn is_capital(city: &str) -> bool {
    CAPITAL_CITIES.contains(&city)
}

/// Distance from a point to the nearest distribution center, in kilometers.
#[must_use]
pub fn nearest_center_km(from: Coordinates) -> f64 {
    DISTRIBUTION_CENTERS
        .iter()
        .map(|center| haversine_km(from, center.location))
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_for_same_point() {
        let sp = city_coordinates("São Paulo").unwrap();
        assert!(haversine_km(sp, sp) < f64::EPSILON);
    }

    #[test]
    fn test_haversine_is_symmetric() {
        for (_, a) in &CITY_COORDINATES {
            for (_, b) in &CITY_COORDINATES {
                assert!((haversine_km(*a, *b) - haversine_km(*b, *a)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_haversine_sp_to_rio_roughly_360km() {
        let sp = city_coordinates("São Paulo").unwrap();
        let rio = city_coordinates("Rio de Janeiro").unwrap();
        let d = haversine_km(sp, rio);
        assert!((350.0..370.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_city_lookup_requires_exact_spelling() {
        assert!(city_coordinates("Brasília").is_some());
        assert!(city_coordinates("Brasilia").is_none());
        assert!(city_coordinates("Campinas").is_none());
    }

    #[test]
    fn test_nearest_center_is_zero_for_center_city() {
        let bh = city_coordinates("Belo Horizonte").unwrap();
        assert!(nearest_center_km(bh) < f64::EPSILON);
    }

    #[test]
    fn test_nearest_center_picks_closest_of_three() {
        // Curitiba is much closer to São Paulo than to the other two centers
        let curitiba = city_coordinates("Curitiba").unwrap();
        let to_sp = haversine_km(curitiba, DISTRIBUTION_CENTERS[0].location);
        assert!((nearest_center_km(curitiba) - to_sp).abs() < f64::EPSILON);
    }

    #[test]
    fn test_every_known_city_is_a_capital() {
        for (city, _) in &CITY_COORDINATES {
            assert!(is_capital(city), "{city} missing from capital list");
        }
        assert!(!is_capital("Campinas"));
    }
}
