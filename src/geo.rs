//! Great-circle distance between two locations.

use crate::model::Location;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between `a` and `b`, in kilometers.
pub fn distance_km(a: Location, b: Location) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Short display form: metres under one kilometer, otherwise one decimal of km.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0}m", km * 1000.0)
    } else {
        format!("{km:.1}km")
    }
}
