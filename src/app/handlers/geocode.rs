//! Handler für Ergebnisse der Vorwärts- und Rückwärtssuche.

use crate::app::SessionState;
use crate::core::SearchResult;
use std::sync::Arc;

/// Ersetzt die Trefferliste der aktiven Suche.
pub fn apply_forward_results(
    state: &mut SessionState,
    results: Vec<SearchResult>,
) -> anyhow::Result<()> {
    let search = state
        .active_search_mut()
        .ok_or_else(|| anyhow::anyhow!("Suchtreffer ohne aktive Suche"))?;
    log::debug!("{} Suchtreffer für '{}'", results.len(), search.query);
    search.results = Arc::new(results);
    Ok(())
}

/// Gibt den Slot der Vorwärtssuche frei.
pub fn finish_forward(state: &mut SessionState) {
    state.pending.forward_in_flight = false;
}

/// Merkt einen Wegpunkt samt aktueller Koordinate für die Rückwärtssuche vor.
///
/// Pro ID gibt es höchstens einen Eintrag; ein erneutes Vormerken aktualisiert
/// nur dessen Koordinate.
pub fn enqueue_reverse(state: &mut SessionState, index: usize) -> anyhow::Result<()> {
    let waypoint = state
        .waypoints
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("Wegpunkt-Index {} außerhalb", index))?;
    let Some(coordinate) = waypoint.coordinate else {
        log::debug!("Wegpunkt {} ohne Koordinate, keine Rückwärtssuche", waypoint.id);
        return Ok(());
    };
    let id = waypoint.id;

    let queue = &mut state.pending.reverse_queue;
    match queue.iter_mut().find(|(queued, _)| *queued == id) {
        Some(entry) => entry.1 = coordinate,
        None => queue.push_back((id, coordinate)),
    }
    Ok(())
}

/// Übernimmt die Beschreibung aus der Rückwärtssuche.
pub fn apply_reverse_description(
    state: &mut SessionState,
    index: usize,
    description: String,
) -> anyhow::Result<()> {
    let waypoint = state
        .waypoints_mut()
        .get_mut(index)
        .ok_or_else(|| anyhow::anyhow!("Wegpunkt-Index {} außerhalb", index))?;
    waypoint.description = description;
    Ok(())
}
