//! Trip Planner Library.
//! Zustandsautomat einer Routenplanung (Wegpunkte, Suche, Routen) samt
//! Scheduler und Offline-Kollaborateuren, exportiert für Binary, Tests und Benches.

pub mod app;
pub mod core;
pub mod geocode;
pub mod routing;
pub mod runtime;
pub mod shared;

pub use app::{
    ChannelSink, CollectingSink, LogSink, RoutingSession, SessionCommand, SessionIntent,
    SessionState, SessionView, StateDiff, StateSink, ViewKind,
};
pub use core::{
    LngLat, Profile, ReverseResult, Route, RouteSummary, SearchResult, SegmentData, Waypoint,
    WaypointSeed,
};
pub use geocode::{GazetteerProvider, GeocodeFallbackChain, GeocodingProvider, Place};
pub use routing::{LineRoutingService, RouteResponse, RoutingService};
pub use runtime::{SessionHandle, SessionRuntime};
pub use shared::{ServiceError, SessionOptions};
