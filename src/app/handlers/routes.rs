//! Handler für Profil und Routen-Segmente.

use crate::app::SessionState;
use crate::core::{Profile, Route, SegmentData};
use std::sync::Arc;

/// Setzt das Routing-Profil.
pub fn set_profile(state: &mut SessionState, profile: Profile) {
    if profile.is_empty() {
        log::warn!("Leeres Routing-Profil gesetzt, Routing pausiert");
    } else {
        log::info!("Routing-Profil: {}", profile);
    }
    state.profile = profile;
}

/// Verwirft alle Segmente und Alternativen.
pub fn clear_all_segments(state: &mut SessionState) {
    let segment_count = state.waypoints.len().saturating_sub(1);
    state.routes = Arc::new(vec![Route::with_segment_count(segment_count)]);
}

/// Fordert eine Neuberechnung an.
pub fn request_recompute(state: &mut SessionState) {
    state.request_route_recompute();
}

/// Invalidiert die an einen Wegpunkt angrenzenden Segmente.
pub fn invalidate_adjacent(state: &mut SessionState, index: usize) -> anyhow::Result<()> {
    anyhow::ensure!(
        index < state.waypoints.len(),
        "Wegpunkt-Index {} außerhalb",
        index
    );
    state.invalidate_adjacent(index);
    Ok(())
}

/// Übernimmt ein berechnetes Segment der Hauptroute.
pub fn apply_segment(
    state: &mut SessionState,
    segment_index: usize,
    data: SegmentData,
) -> anyhow::Result<()> {
    log::debug!(
        "Segment {} berechnet: {:.0} m, {:.0} s",
        segment_index,
        data.distance_m,
        data.duration_s
    );
    state.primary_route_mut().set_segment(segment_index, data)?;
    Ok(())
}

/// Übernimmt Hauptroute und Alternativen (nur bei genau zwei Wegpunkten).
///
/// Alternativen ersetzen `routes[1..]` vollständig.
pub fn apply_alternatives(
    state: &mut SessionState,
    primary: SegmentData,
    alternatives: Vec<SegmentData>,
) -> anyhow::Result<()> {
    let description = primary.description.clone();
    state.primary_route_mut().set_segment(0, primary)?;

    let alternative_count = alternatives.len();
    let routes = state.routes_mut();
    routes[0].description = description;
    routes.truncate(1);
    routes.extend(alternatives.into_iter().map(Route::single));

    log::debug!("Hauptroute mit {} Alternative(n) übernommen", alternative_count);
    Ok(())
}
