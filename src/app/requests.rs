//! Entnahme ausstehender Arbeit als Dienst-Anfragen.
//!
//! Der Scheduler ruft die `take_*`-Funktionen pro Tick auf; sie verbrauchen
//! die Pending-Flags in `SessionState::pending`.

use super::{SessionState, ViewKind};
use crate::core::{LngLat, Profile};

/// Routing-Anfrage für ein Segment der Hauptroute
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    /// Routing-Sequenz zum Zeitpunkt der Anfrage
    pub sequence: u64,
    /// Segment-Index (= Index des Start-Wegpunkts)
    pub segment_index: usize,
    pub origin: LngLat,
    pub destination: LngLat,
    pub profile: Profile,
    /// Alternativen anfordern (nur bei genau zwei Wegpunkten)
    pub alternatives: bool,
}

/// Vorwärtssuche für den aktuellen Suchtext
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardRequest {
    pub query: String,
}

/// Rückwärtssuche für einen Wegpunkt
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseRequest {
    pub waypoint_id: u64,
    pub coordinate: LngLat,
}

/// Liefert Anfragen für alle dirty Segmente mit aufgelösten Endpunkten.
pub fn take_route_requests(state: &mut SessionState) -> Vec<RouteRequest> {
    if !state.pending.route {
        return Vec::new();
    }
    state.pending.route = false;

    if state.profile.is_empty() {
        log::error!("Kein Routing-Profil gesetzt, Neuberechnung übersprungen");
        return Vec::new();
    }
    let Some(route) = state.primary_route() else {
        return Vec::new();
    };

    let alternatives = state.waypoints.len() == 2;
    let sequence = state.pending.route_sequence;
    state
        .waypoints
        .windows(2)
        .enumerate()
        .filter(|(segment_index, _)| route.is_dirty(*segment_index))
        .filter_map(|(segment_index, pair)| {
            Some(RouteRequest {
                sequence,
                segment_index,
                origin: pair[0].coordinate?,
                destination: pair[1].coordinate?,
                profile: state.profile.clone(),
                alternatives,
            })
        })
        .collect()
}

/// Liefert den nächsten Suchtext, sofern keine Vorwärtssuche unterwegs ist.
pub fn take_forward_request(state: &mut SessionState) -> Option<ForwardRequest> {
    if state.pending.forward_in_flight {
        return None;
    }
    let query = state.pending.forward_query.take()?;
    state.pending.forward_in_flight = true;
    Some(ForwardRequest { query })
}

/// Liefert die nächste Rückwärtssuche (FIFO).
///
/// Während einer Suche wird nichts entnommen, da Beschreibungen dort nicht
/// übernommen werden. Einträge für entfernte Wegpunkte oder solche, die seit
/// dem Vormerken anders gesetzt wurden (z.B. per Suchtreffer), werden verworfen.
pub fn take_reverse_request(state: &mut SessionState) -> Option<ReverseRequest> {
    if state.view_kind() == ViewKind::Search {
        return None;
    }
    while let Some((waypoint_id, queued)) = state.pending.reverse_queue.pop_front() {
        let current = state
            .index_of(waypoint_id)
            .and_then(|index| state.waypoints[index].coordinate);
        if current == Some(queued) {
            return Some(ReverseRequest {
                waypoint_id,
                coordinate: queued,
            });
        }
        log::debug!(
            "Rückwärtssuche für Wegpunkt {} übersprungen: entfernt oder verschoben",
            waypoint_id
        );
    }
    None
}
