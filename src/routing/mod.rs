//! Routing-Kollaborateure: Backend-Vertrag und Offline-Router.

mod line;
mod service;

pub use line::LineRoutingService;
pub use service::{RouteResponse, RoutingService};
