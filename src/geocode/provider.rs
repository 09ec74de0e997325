//! Vertrag eines Geocoding-Providers.

use crate::core::{LngLat, ReverseResult, SearchResult};
use crate::shared::ServiceError;
use async_trait::async_trait;

/// Geocoding-Provider (Vorwärts- und Rückwärtssuche).
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Name für Logging.
    fn name(&self) -> &str;

    /// Sucht Kandidaten zu einem Freitext.
    async fn forward(&self, query: &str) -> Result<Vec<SearchResult>, ServiceError>;

    /// Sucht Beschreibungen zu einer Koordinate, inkl. Abstand je Treffer.
    async fn reverse(&self, coordinate: LngLat) -> Result<Vec<ReverseResult>, ServiceError>;
}
