//! Handler für die Wegpunkt-Suche.

use crate::app::{ActiveSearch, SessionState, SessionView};
use crate::core::WaypointSnapshot;
use std::sync::Arc;

/// Beginnt eine Suche: sichert den Wegpunkt, leert die Beschreibung.
///
/// Die Koordinate bleibt stehen, damit die Route bis zur Bestätigung sichtbar ist.
pub fn begin(state: &mut SessionState, index: usize) -> anyhow::Result<()> {
    let backup = state
        .waypoints
        .get(index)
        .map(WaypointSnapshot::capture)
        .ok_or_else(|| anyhow::anyhow!("Wegpunkt-Index {} außerhalb", index))?;

    let waypoint = &mut state.waypoints_mut()[index];
    waypoint.description.clear();
    waypoint.is_user_location = false;

    state.view = SessionView::Search(ActiveSearch::new(index, backup));
    state.focus_index = Some(index);
    state.pending.forward_query = None;
    log::debug!("Suche für Wegpunkt {} begonnen", index);
    Ok(())
}

/// Entnimmt die aktive Suche; bei anderer Ansicht bleibt diese unverändert.
fn take_active_search(state: &mut SessionState) -> anyhow::Result<ActiveSearch> {
    match std::mem::take(&mut state.view) {
        SessionView::Search(search) => Ok(search),
        other => {
            state.view = other;
            anyhow::bail!("Keine aktive Suche")
        }
    }
}

/// Bricht die Suche ab und schreibt die Sicherung zurück.
pub fn restore_backup(state: &mut SessionState) -> anyhow::Result<()> {
    let search = take_active_search(state)?;
    let index = search.index;
    let restored = search.into_backup().restore();

    let slot = state
        .waypoints_mut()
        .get_mut(index)
        .ok_or_else(|| anyhow::anyhow!("Such-Index {} außerhalb", index))?;
    let moved = slot.coordinate != restored.coordinate;
    *slot = restored;

    if moved {
        state.invalidate_adjacent(index);
    }
    if moved || state.has_dirty_adjacent(index) {
        state.request_route_recompute();
    }

    state.pending.forward_query = None;
    state.view = state.derived_view();
    log::debug!("Suche für Wegpunkt {} abgebrochen", index);
    Ok(())
}

/// Bestätigt die Suche; die Sicherung wird verworfen.
pub fn confirm(state: &mut SessionState) -> anyhow::Result<()> {
    let search = take_active_search(state)?;
    state.pending.forward_query = None;
    state.view = state.derived_view();
    log::debug!("Suche für Wegpunkt {} bestätigt", search.index);
    Ok(())
}

/// Setzt den Suchtext. Leerer Text leert die Treffer ohne neue Anfrage.
pub fn set_query(state: &mut SessionState, query: String) -> anyhow::Result<()> {
    let search = state
        .active_search_mut()
        .ok_or_else(|| anyhow::anyhow!("Suchtext ohne aktive Suche"))?;
    search.query = query.clone();

    if query.trim().is_empty() {
        search.results = Arc::new(Vec::new());
        state.pending.forward_query = None;
    } else {
        state.pending.forward_query = Some(query);
    }
    Ok(())
}

/// Übernimmt einen Suchtreffer in den aktiven Wegpunkt.
pub fn apply_result(state: &mut SessionState, result_index: usize) -> anyhow::Result<()> {
    let search = state
        .active_search()
        .ok_or_else(|| anyhow::anyhow!("Trefferauswahl ohne aktive Suche"))?;
    let index = search.index;
    let result = search
        .results
        .get(result_index)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Treffer {} existiert nicht", result_index))?;

    let waypoint = state
        .waypoints_mut()
        .get_mut(index)
        .ok_or_else(|| anyhow::anyhow!("Such-Index {} außerhalb", index))?;
    waypoint.description = result.description;
    waypoint.coordinate = Some(result.coordinate);
    waypoint.is_user_location = false;

    state.invalidate_adjacent(index);
    Ok(())
}
