//! Handler für Ansicht und Fokus.

use crate::app::{SessionState, ViewKind};

/// Leitet die Ansicht aus den Wegpunkten ab. Eine aktive Suche bleibt bestehen.
pub fn recompute(state: &mut SessionState) {
    if state.view_kind() == ViewKind::Search {
        return;
    }
    let next = state.derived_view();
    if next != state.view {
        log::debug!("Ansicht: {:?} -> {:?}", state.view_kind(), next.kind());
        state.view = next;
    }
}

/// Setzt den Eingabefokus.
pub fn set_focus(state: &mut SessionState, index: Option<usize>) {
    state.focus_index = index.filter(|i| *i < state.waypoints.len());
}
