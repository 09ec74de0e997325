//! Offline-Provider auf Basis einer festen Ortsliste.

use super::GeocodingProvider;
use crate::core::{LngLat, ReverseResult, SearchResult};
use crate::shared::ServiceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Maximale Anzahl Rückwärts-Treffer pro Anfrage.
const MAX_REVERSE_CANDIDATES: usize = 3;

/// Ein bekannter Ort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Anzeigename
    pub name: String,
    /// Position
    pub coordinate: LngLat,
    /// Trefferart (z.B. "street", "commune")
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Gewichtung 0.0..=1.0, skaliert den Score
    #[serde(default = "default_importance")]
    pub importance: f64,
}

fn default_kind() -> String {
    "place".to_string()
}

fn default_importance() -> f64 {
    1.0
}

/// Gazetteer: Textsuche und Nächster-Nachbar über eine Ortsliste
#[derive(Debug, Clone)]
pub struct GazetteerProvider {
    name: String,
    places: Vec<Place>,
}

impl GazetteerProvider {
    /// Erstellt einen Gazetteer mit Namen und Ortsliste.
    pub fn new(name: impl Into<String>, places: Vec<Place>) -> Self {
        Self {
            name: name.into(),
            places,
        }
    }

    /// Score eines Ortes zur Anfrage: exakt 1.0, Präfix 0.8, enthalten 0.5.
    fn match_score(place: &Place, query: &str) -> Option<f64> {
        let name = place.name.to_lowercase();
        let base = if name == query {
            1.0
        } else if name.starts_with(query) {
            0.8
        } else if name.contains(query) {
            0.5
        } else {
            return None;
        };
        Some(base * place.importance.clamp(0.0, 1.0))
    }
}

#[async_trait]
impl GeocodingProvider for GazetteerProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn forward(&self, query: &str) -> Result<Vec<SearchResult>, ServiceError> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut results: Vec<SearchResult> = self
            .places
            .iter()
            .filter_map(|place| {
                Self::match_score(place, &query).map(|score| SearchResult {
                    description: place.name.clone(),
                    coordinate: place.coordinate,
                    kind: place.kind.clone(),
                    score,
                })
            })
            .collect();
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(results)
    }

    async fn reverse(&self, coordinate: LngLat) -> Result<Vec<ReverseResult>, ServiceError> {
        let mut results: Vec<ReverseResult> = self
            .places
            .iter()
            .map(|place| ReverseResult {
                description: place.name.clone(),
                coordinate: place.coordinate,
                distance: coordinate.distance_to(&place.coordinate),
            })
            .collect();
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results.truncate(MAX_REVERSE_CANDIDATES);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gazetteer() -> GazetteerProvider {
        GazetteerProvider::new(
            "test",
            vec![
                Place {
                    name: "Antwerpen".into(),
                    coordinate: LngLat::new(4.40, 51.22),
                    kind: "commune".into(),
                    importance: 1.0,
                },
                Place {
                    name: "Antwerpsestraat".into(),
                    coordinate: LngLat::new(4.30, 51.00),
                    kind: "street".into(),
                    importance: 0.5,
                },
            ],
        )
    }

    #[tokio::test]
    async fn test_forward_scores_exact_over_prefix() {
        let results = gazetteer().forward("antwerpen").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 1.0);

        let results = gazetteer().forward("Antw").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].description, "Antwerpen");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_forward_empty_query() {
        assert!(gazetteer().forward("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reverse_sorted_by_distance() {
        let results = gazetteer().reverse(LngLat::new(4.31, 51.01)).await.unwrap();
        assert_eq!(results[0].description, "Antwerpsestraat");
        assert!(results[0].distance < results[1].distance);
    }
}
