//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Konfiguration und Fehlertyp, die von `app`, `geocode`,
//! `routing` und `runtime` gemeinsam genutzt werden.

mod error;
pub mod options;

pub use error::ServiceError;
pub use options::SessionOptions;
pub use options::{MAX_ALTERNATIVES, TICK_INTERVAL_MS};
