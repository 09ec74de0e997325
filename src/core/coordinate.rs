//! Geografische Koordinate (WGS84, Grad) und Abstandsberechnung.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Mittlerer Erdradius in Metern (Haversine).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Längen-/Breitengrad-Paar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    /// Längengrad
    pub lng: f64,
    /// Breitengrad
    pub lat: f64,
}

impl LngLat {
    /// Erstellt eine neue Koordinate.
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Großkreis-Abstand zu `other` in Metern.
    pub fn distance_to(&self, other: &LngLat) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_phi = (other.lat - self.lat).to_radians();
        let d_lambda = (other.lng - self.lng).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Roh-Beschriftung `"lat, lng"` mit fünf Nachkommastellen.
    ///
    /// Dient als Platzhalter, solange kein Reverse-Geocoding-Ergebnis vorliegt,
    /// und als Fallback, wenn kein Provider einen nahen Treffer liefert.
    pub fn label(&self) -> String {
        format!("{:.5}, {:.5}", self.lat, self.lng)
    }

    /// Planare Darstellung (x = lng, y = lat).
    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.lng, self.lat)
    }

    /// Gegenstück zu [`LngLat::to_dvec2`].
    pub fn from_dvec2(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }

    /// Prüft, ob beide Werte im gültigen WGS84-Bereich liegen.
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_ein_breitengrad() {
        let a = LngLat::new(4.0, 51.0);
        let b = LngLat::new(4.0, 52.0);
        // 1° Breite ≈ 111.2 km
        assert_relative_eq!(a.distance_to(&b), 111_195.0, max_relative = 1e-3);
        assert_relative_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_label_format() {
        assert_eq!(LngLat::new(4.1, 51.05).label(), "51.05000, 4.10000");
    }

    #[test]
    fn test_is_valid() {
        assert!(LngLat::new(4.0, 51.0).is_valid());
        assert!(!LngLat::new(200.0, 51.0).is_valid());
        assert!(!LngLat::new(f64::NAN, 0.0).is_valid());
    }
}
