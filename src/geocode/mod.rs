//! Geocoding-Kollaborateure: Provider-Vertrag, Fallback-Kette, Offline-Gazetteer.

mod fallback;
mod gazetteer;
mod provider;

pub use fallback::{ChainEntry, GeocodeFallbackChain, MergeFn, ReverseAcceptFn};
pub use gazetteer::{GazetteerProvider, Place};
pub use provider::GeocodingProvider;
