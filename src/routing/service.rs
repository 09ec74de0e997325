//! Vertrag des Routing-Backends.

use crate::core::{LngLat, Profile, SegmentData};
use crate::shared::{ServiceError, MAX_ALTERNATIVES};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Antwort des Routing-Backends.
///
/// Mit angeforderten Alternativen ist die Antwort nach `profile + altIndex`
/// indiziert (`"car0"` = Hauptroute, `"car1"`..`"car3"` = Alternativen),
/// für ein einfaches Zwei-Punkt-Segment kommt ein einzelnes Ergebnis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteResponse {
    /// Nach `profile + altIndex` indizierte Routen
    Keyed(IndexMap<String, SegmentData>),
    /// Einzelnes Segment ohne Schlüssel
    Single(SegmentData),
}

impl RouteResponse {
    /// Hauptroute der Antwort (Schlüssel `profile0` bzw. das einzelne Segment).
    pub fn primary(&self, profile: &Profile) -> Option<&SegmentData> {
        match self {
            RouteResponse::Keyed(map) => map.get(&profile.alternative_key(0)),
            RouteResponse::Single(data) => Some(data),
        }
    }

    /// Alternativrouten in Schlüssel-Reihenfolge (`profile1`..`profile3`).
    pub fn alternatives(&self, profile: &Profile) -> Vec<SegmentData> {
        match self {
            RouteResponse::Keyed(map) => (1..=MAX_ALTERNATIVES)
                .filter_map(|alt| map.get(&profile.alternative_key(alt)).cloned())
                .collect(),
            RouteResponse::Single(_) => Vec::new(),
        }
    }
}

/// Routing-Backend (opak, z.B. HTTP-Dienst).
#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Berechnet eine Route zwischen zwei Koordinaten.
    ///
    /// Mit `alternatives = true` darf das Backend bis zu drei Alternativen
    /// als `RouteResponse::Keyed` liefern.
    async fn get_route(
        &self,
        origin: LngLat,
        destination: LngLat,
        profile: &Profile,
        alternatives: bool,
    ) -> Result<RouteResponse, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(distance_m: f64) -> SegmentData {
        SegmentData {
            distance_m,
            ..Default::default()
        }
    }

    #[test]
    fn test_keyed_response_splits_primary_and_alternatives() {
        let profile = Profile::new("bike");
        let mut map = IndexMap::new();
        map.insert("bike0".to_string(), seg(1.0));
        map.insert("bike2".to_string(), seg(3.0));
        map.insert("bike1".to_string(), seg(2.0));
        map.insert("car1".to_string(), seg(99.0));
        let response = RouteResponse::Keyed(map);

        assert_eq!(response.primary(&profile).map(|s| s.distance_m), Some(1.0));
        let alts: Vec<f64> = response
            .alternatives(&profile)
            .iter()
            .map(|s| s.distance_m)
            .collect();
        assert_eq!(alts, vec![2.0, 3.0]);
    }

    #[test]
    fn test_single_response_has_no_alternatives() {
        let profile = Profile::new("car");
        let response = RouteResponse::Single(seg(5.0));
        assert_eq!(response.primary(&profile).map(|s| s.distance_m), Some(5.0));
        assert!(response.alternatives(&profile).is_empty());
    }

    #[test]
    fn test_keyed_response_from_json() {
        let json = r#"{"car0": {"geometry": [], "distance_m": 10.0, "duration_s": 1.0}}"#;
        let response: RouteResponse = serde_json::from_str(json).expect("JSON sollte parsen");
        let profile = Profile::new("car");
        assert_eq!(response.primary(&profile).map(|s| s.distance_m), Some(10.0));
    }
}
