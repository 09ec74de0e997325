//! Feature-Handler für SessionCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod geocode;
pub mod routes;
pub mod search;
pub mod user_location;
pub mod view;
pub mod waypoints;
