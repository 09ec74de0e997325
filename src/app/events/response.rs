use crate::core::{LngLat, ReverseResult, SearchResult};
use crate::routing::RouteResponse;

/// Antworten der externen Dienste, vom Scheduler an die Session zurückgereicht.
#[derive(Debug, Clone)]
pub(crate) enum ServiceResponse {
    /// Vorwärtssuche beantwortet
    ForwardGeocoded {
        query: String,
        results: Vec<SearchResult>,
    },
    /// Vorwärtssuche fehlgeschlagen (gibt den Slot frei)
    ForwardGeocodeFailed { query: String },
    /// Rückwärtssuche für einen Wegpunkt beantwortet
    ReverseGeocoded {
        waypoint_id: u64,
        coordinate: LngLat,
        results: Vec<ReverseResult>,
    },
    /// Routing für ein Segment beantwortet
    RouteComputed {
        sequence: u64,
        segment_index: usize,
        response: RouteResponse,
    },
}
