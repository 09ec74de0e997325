//! Handler für den Nutzer-Standort.

use crate::app::SessionState;
use crate::core::LngLat;

/// Fordert den Standort beim Host an.
pub fn request(state: &mut SessionState) {
    state.user_location_requested = true;
}

/// Setzt einen Wegpunkt auf den ermittelten Standort.
pub fn set(state: &mut SessionState, index: usize, coordinate: LngLat) -> anyhow::Result<()> {
    let label = state.options.user_location_label.clone();
    let waypoint = state
        .waypoints_mut()
        .get_mut(index)
        .ok_or_else(|| anyhow::anyhow!("Wegpunkt-Index {} außerhalb", index))?;
    waypoint.coordinate = Some(coordinate);
    waypoint.description = label;
    waypoint.is_user_location = true;

    state.invalidate_adjacent(index);
    state.user_location_requested = false;
    state.user_location_available = true;
    log::info!("Nutzer-Standort für Wegpunkt {} übernommen", index);
    Ok(())
}

/// Markiert den Standort als nicht verfügbar.
pub fn mark_failed(state: &mut SessionState) {
    log::warn!("Nutzer-Standort nicht verfügbar");
    state.user_location_requested = false;
    state.user_location_available = false;
}
