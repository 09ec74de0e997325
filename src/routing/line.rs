//! Offline-Router: gerade Linie zwischen zwei Punkten.
//!
//! Kein echtes Routing, sondern eine Luftlinie mit profilabhängiger
//! Fahrzeit. Wird vom Demo-Runner und in Tests als Backend verwendet.

use super::{RouteResponse, RoutingService};
use crate::core::{LngLat, Profile, SegmentData};
use crate::shared::{ServiceError, SessionOptions};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Anzahl Stützpunkte der Luftlinie (inkl. Start und Ende).
const LINE_POINTS: usize = 8;

/// Luftlinien-Router mit Geschwindigkeit je Profil
#[derive(Debug, Clone)]
pub struct LineRoutingService {
    speeds_kmh: BTreeMap<String, f64>,
}

impl LineRoutingService {
    /// Erstellt den Router mit den Profil-Geschwindigkeiten aus den Optionen.
    pub fn new(options: &SessionOptions) -> Self {
        Self {
            speeds_kmh: options.profile_speeds_kmh.clone(),
        }
    }

    fn segment(&self, origin: LngLat, destination: LngLat, speed_kmh: f64) -> SegmentData {
        let a = origin.to_dvec2();
        let b = destination.to_dvec2();
        let geometry = (0..LINE_POINTS)
            .map(|i| LngLat::from_dvec2(a.lerp(b, i as f64 / (LINE_POINTS - 1) as f64)))
            .collect();
        let distance_m = origin.distance_to(&destination);

        SegmentData {
            geometry,
            distance_m,
            duration_s: distance_m / (speed_kmh / 3.6),
            description: format!("{:.1} km Luftlinie", distance_m / 1000.0),
        }
    }
}

#[async_trait]
impl RoutingService for LineRoutingService {
    async fn get_route(
        &self,
        origin: LngLat,
        destination: LngLat,
        profile: &Profile,
        alternatives: bool,
    ) -> Result<RouteResponse, ServiceError> {
        let speed = self
            .speeds_kmh
            .get(profile.as_str())
            .copied()
            .filter(|kmh| *kmh > 0.0)
            .ok_or_else(|| ServiceError::Unsupported(format!("Profil '{}'", profile)))?;

        let data = self.segment(origin, destination, speed);
        if alternatives {
            // Luftlinie hat keine Alternativen: nur die Hauptroute unter `profile0`
            let mut keyed = IndexMap::new();
            keyed.insert(profile.alternative_key(0), data);
            Ok(RouteResponse::Keyed(keyed))
        } else {
            Ok(RouteResponse::Single(data))
        }
    }
}
