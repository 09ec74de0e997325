//! Wegpunkte einer Routing-Session.

use super::LngLat;
use serde::{Deserialize, Serialize};

/// Ein Wegpunkt (Start, Zwischenziel oder Ziel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Eindeutige, monoton vergebene ID (stabil bei Umsortierung)
    pub id: u64,
    /// Anzeigetext (Adresse, Ortsname oder Roh-Koordinate)
    pub description: String,
    /// Aufgelöste Position, `None` = noch offen
    pub coordinate: Option<LngLat>,
    /// Wegpunkt steht für den aktuellen Standort des Nutzers
    #[serde(default)]
    pub is_user_location: bool,
}

impl Waypoint {
    /// Erstellt einen leeren, unaufgelösten Wegpunkt.
    pub fn blank(id: u64) -> Self {
        Self {
            id,
            description: String::new(),
            coordinate: None,
            is_user_location: false,
        }
    }

    /// Erzeugt einen Wegpunkt aus einer Vorgabe und vergibt die ID.
    pub fn from_seed(id: u64, seed: WaypointSeed) -> Self {
        Self {
            id,
            description: seed.description,
            coordinate: seed.coordinate,
            is_user_location: seed.is_user_location,
        }
    }

    /// `true`, wenn eine Koordinate vorliegt.
    pub fn is_resolved(&self) -> bool {
        self.coordinate.is_some()
    }

    /// Setzt den Wegpunkt in-place auf leer zurück (ID bleibt erhalten).
    pub fn clear(&mut self) {
        self.description.clear();
        self.coordinate = None;
        self.is_user_location = false;
    }
}

/// Startvorgabe für einen Wegpunkt (ohne ID, z.B. aus Konfiguration oder Demo-Skript).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaypointSeed {
    /// Anzeigetext
    #[serde(default)]
    pub description: String,
    /// Optionale Startkoordinate
    #[serde(default)]
    pub coordinate: Option<LngLat>,
    /// Soll mit dem Nutzer-Standort befüllt werden
    #[serde(default)]
    pub is_user_location: bool,
}

/// Unveränderliche Sicherung eines Wegpunkts während einer aktiven Suche.
///
/// Wird bei `beginSearch` erfasst und genau einmal verbraucht: beim Abbrechen
/// per [`WaypointSnapshot::restore`], beim Bestätigen durch Verwerfen.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointSnapshot(Waypoint);

impl WaypointSnapshot {
    /// Erfasst den aktuellen Zustand eines Wegpunkts.
    pub fn capture(waypoint: &Waypoint) -> Self {
        Self(waypoint.clone())
    }

    /// ID des gesicherten Wegpunkts.
    pub fn waypoint_id(&self) -> u64 {
        self.0.id
    }

    /// Verbraucht die Sicherung und liefert den ursprünglichen Wegpunkt.
    pub fn restore(self) -> Waypoint {
        self.0
    }
}
