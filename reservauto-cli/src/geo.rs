//! Great-circle distance between coordinate pairs.

/// Mean Earth radius in kilometers (IUGG).
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A point on the Earth's surface, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Great-circle (haversine) distance between two points, in kilometers.
///
/// The result is deliberately unrounded; precision is a presentation
/// concern.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONTREAL: Coordinates = Coordinates {
        latitude: 45.5017,
        longitude: -73.5673,
    };
    const QUEBEC_CITY: Coordinates = Coordinates {
        latitude: 46.8139,
        longitude: -71.2080,
    };

    #[test]
    fn zero_for_identical_points() {
        assert_eq!(distance_km(MONTREAL, MONTREAL), 0.0);
    }

    #[test]
    fn montreal_to_quebec_city() {
        let d = distance_km(MONTREAL, QUEBEC_CITY);
        // Roughly 233 km as the crow flies.
        assert!((d - 233.0).abs() < 1.5, "got {d}");
    }

    #[test]
    fn small_offsets_stay_small() {
        let nearby = Coordinates {
            latitude: MONTREAL.latitude + 0.001,
            longitude: MONTREAL.longitude,
        };
        let d = distance_km(MONTREAL, nearby);
        assert!(d > 0.0 && d < 0.2, "got {d}");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinate_strategy() -> impl Strategy<Value = Coordinates> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(latitude, longitude)| Coordinates {
            latitude,
            longitude,
        })
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in coordinate_strategy(), b in coordinate_strategy()) {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            prop_assert!((ab - ba).abs() < 1e-9, "asymmetric: {} vs {}", ab, ba);
        }

        #[test]
        fn distance_is_zero_from_a_point_to_itself(a in coordinate_strategy()) {
            prop_assert!(distance_km(a, a).abs() < 1e-9);
        }

        #[test]
        fn distance_is_non_negative(a in coordinate_strategy(), b in coordinate_strategy()) {
            prop_assert!(distance_km(a, b) >= 0.0);
        }
    }
}
