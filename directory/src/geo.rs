//! Great-circle distance.

use wayfare_core::GeoPoint;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Haversine great-circle distance between two points, in kilometers.
#[must_use]
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
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

    #[test]
    fn zero_distance_to_self() {
        let p = GeoPoint::new(25.20, 55.27);
        assert!(haversine_km(&p, &p) < 1e-9);
    }

    #[test]
    fn dubai_to_abu_dhabi_is_about_120_km() {
        let dubai = GeoPoint::new(25.20, 55.27);
        let abu_dhabi = GeoPoint::new(24.47, 54.37);
        let d = haversine_km(&dubai, &abu_dhabi);
        assert!((115.0..130.0).contains(&d), "got {d}");
    }
}
