//! Core-Domänentypen: Koordinaten, Wegpunkte, Routen, Suchtreffer.

pub mod coordinate;
pub mod route;
pub mod search;
/// Wegpunkt-Datenmodell
///
/// - Waypoint: Start, Zwischenziel oder Ziel mit stabiler ID
/// - WaypointSeed: Vorgabe ohne ID (Konfiguration/Skript)
/// - WaypointSnapshot: Sicherung während einer aktiven Suche
pub mod waypoint;

pub use coordinate::LngLat;
pub use route::{Route, RouteError, RouteSummary, SegmentData};
pub use search::{Profile, ReverseResult, SearchResult};
pub use waypoint::{Waypoint, WaypointSeed, WaypointSnapshot};
