//! Application-Layer: Session-State, Events, Controller und Handler.

pub mod command_log;
pub mod controller;
mod diff;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod requests;
mod session;
mod sink;
/// Session State
///
/// Ansicht als Tagged Union, Wegpunkte/Routen per Copy-on-Write, ausstehende Arbeit.
pub mod state;

pub use command_log::CommandLog;
pub use controller::SessionController;
pub(crate) use events::ServiceResponse;
pub use events::{SessionCommand, SessionIntent};
pub use diff::{Snapshot, StateDiff};
pub use requests::{ForwardRequest, ReverseRequest, RouteRequest};
pub use session::RoutingSession;
pub use sink::{ChannelSink, CollectingSink, LogSink, StateSink};
pub use state::{ActiveSearch, PendingWork, SessionState, SessionView, ViewKind};
