//! Geocoding-Kandidaten und Routing-Profil.

use super::LngLat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kandidat aus einer Vorwärts-Suche (Text → Koordinate)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Anzeigetext
    pub description: String,
    /// Position des Treffers
    pub coordinate: LngLat,
    /// Trefferart laut Provider (z.B. "street", "commune")
    #[serde(rename = "type")]
    pub kind: String,
    /// Relevanz, höher = besser
    pub score: f64,
}

/// Kandidat aus einer Rückwärts-Suche (Koordinate → Text)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseResult {
    /// Anzeigetext
    pub description: String,
    /// Position des Treffers
    pub coordinate: LngLat,
    /// Abstand zur angefragten Koordinate in Metern
    pub distance: f64,
}

/// Routing-Profil (z.B. "car", "bike", "foot")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(String);

impl Profile {
    /// Erstellt ein Profil aus seinem Namen.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Profilname.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true`, wenn kein Profil gesetzt ist.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Schlüssel einer Routing-Antwort: `profile + altIndex` (0 = Hauptroute).
    pub fn alternative_key(&self, alt_index: usize) -> String {
        format!("{}{}", self.0, alt_index)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Profile {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Profile {
    fn from(name: String) -> Self {
        Self(name)
    }
}
