//! Handler für Wegpunkt-Operationen.

use crate::app::{SessionState, SessionView};
use crate::core::{LngLat, Waypoint};

/// Entfernt einen Wegpunkt, bei nur zwei Wegpunkten wird er geleert.
///
/// Betrifft es den Wegpunkt einer aktiven Suche, endet die Suche und die
/// Sicherung wird verworfen.
pub fn remove_or_clear(state: &mut SessionState, index: usize) -> anyhow::Result<()> {
    let count = state.waypoints.len();
    anyhow::ensure!(
        index < count,
        "Wegpunkt-Index {} außerhalb ({} Wegpunkte)",
        index,
        count
    );
    let ends_search = state.active_search().is_some_and(|s| s.index == index);

    if count <= 2 {
        state.waypoints_mut()[index].clear();
        state.invalidate_adjacent(index);
        log::info!("Wegpunkt {} geleert", index);
    } else {
        let removed = state.waypoints_mut().remove(index);
        state.primary_route_mut().remove_at(index);
        state.drop_alternatives();
        state.shift_indices_after_remove(index);
        // Zwei Wegpunkte: neu anfragen, damit Alternativen mitkommen
        if state.waypoints.len() == 2 {
            state.invalidate_adjacent(0);
        }
        log::info!("Wegpunkt {} (ID {}) entfernt", index, removed.id);
    }

    if ends_search {
        state.view = SessionView::Start;
    }
    Ok(())
}

/// Hängt einen leeren Wegpunkt an.
pub fn append(state: &mut SessionState) {
    let id = state.mint_waypoint_id();
    state.waypoints_mut().push(Waypoint::blank(id));
    let index = state.waypoints.len() - 1;
    state.primary_route_mut().insert_at(index);
    state.drop_alternatives();
    log::debug!("Wegpunkt {} (ID {}) angehängt", index, id);
}

/// Fügt einen Wegpunkt mit Koordinate an `index` ein.
pub fn insert(state: &mut SessionState, index: usize, coordinate: LngLat) -> anyhow::Result<()> {
    anyhow::ensure!(
        index <= state.waypoints.len(),
        "Einfüge-Index {} außerhalb",
        index
    );
    let id = state.mint_waypoint_id();
    let mut waypoint = Waypoint::blank(id);
    waypoint.coordinate = Some(coordinate);
    waypoint.description = coordinate.label();

    state.waypoints_mut().insert(index, waypoint);
    state.primary_route_mut().insert_at(index);
    state.invalidate_adjacent(index);
    state.drop_alternatives();
    state.shift_indices_after_insert(index);
    log::info!("Wegpunkt {} (ID {}) eingefügt", index, id);
    Ok(())
}

/// Setzt die Koordinate eines Wegpunkts; die Beschreibung wird zum Platzhalter.
pub fn place(state: &mut SessionState, index: usize, coordinate: LngLat) -> anyhow::Result<()> {
    let waypoint = state
        .waypoints_mut()
        .get_mut(index)
        .ok_or_else(|| anyhow::anyhow!("Wegpunkt-Index {} außerhalb", index))?;
    waypoint.coordinate = Some(coordinate);
    waypoint.description = coordinate.label();
    waypoint.is_user_location = false;

    state.invalidate_adjacent(index);
    Ok(())
}

/// Tauscht die ersten beiden Wegpunkte.
pub fn swap_first_two(state: &mut SessionState) -> anyhow::Result<()> {
    anyhow::ensure!(state.waypoints.len() >= 2, "Zu wenige Wegpunkte zum Tauschen");
    state.waypoints_mut().swap(0, 1);
    state.focus_index = match state.focus_index {
        Some(0) => Some(1),
        Some(1) => Some(0),
        other => other,
    };
    Ok(())
}

/// Nächsten rohen Karten-Klick als Drag-Artefakt markieren.
pub fn suppress_next_click(state: &mut SessionState) {
    state.suppress_next_map_click = true;
}

/// Unterdrückten Karten-Klick verbrauchen.
pub fn consume_suppressed_click(state: &mut SessionState) {
    log::debug!("Karten-Klick nach Drag ignoriert");
    state.suppress_next_map_click = false;
}
