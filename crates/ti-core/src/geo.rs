//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f32` latitude/longitude.  At the equator this gives ~1 m
//! precision, which is enough for sampling nodes around a city centre.

/// A WGS-84 geographic coordinate stored as single-precision floats.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f32,
    pub lon: f32,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f32 {
        const R: f32 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }

    /// Half-extent in degrees `(d_lat, d_lon)` of a box that contains every
    /// point within `radius_m` of `self`.  Used to pre-filter R-tree queries
    /// before the exact haversine check.
    pub fn degree_extent(self, radius_m: f32) -> (f32, f32) {
        const M_PER_DEG_LAT: f32 = 111_195.0;
        let d_lat = radius_m / M_PER_DEG_LAT;
        let cos_lat = self.lat.to_radians().cos().abs().max(1e-6);
        let d_lon = (radius_m / (M_PER_DEG_LAT * cos_lat)).min(180.0);
        (d_lat, d_lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
