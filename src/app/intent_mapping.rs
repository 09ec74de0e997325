//! Mapping von Session-Intents und Dienst-Antworten auf mutierende Commands.
//!
//! Vorbedingungen (Ansicht, Indizes, Sequenzen) werden hier geprüft. Eine
//! Verletzung ergibt eine leere Command-Liste und eine Warnung im Log.

use super::{
    ServiceResponse, SessionCommand, SessionIntent, SessionState, SessionView, ViewKind,
};
use crate::core::LngLat;

const ANY_VIEW: &[ViewKind] = &[ViewKind::Start, ViewKind::Search, ViewKind::Routes];
const START_OR_ROUTES: &[ViewKind] = &[ViewKind::Start, ViewKind::Routes];
const SEARCH_OR_ROUTES: &[ViewKind] = &[ViewKind::Search, ViewKind::Routes];
const SEARCH_ONLY: &[ViewKind] = &[ViewKind::Search];

/// Prüft, ob die aktuelle Ansicht eine der erlaubten ist.
fn view_allows(state: &SessionState, allowed: &[ViewKind], event: &str) -> bool {
    let current = state.view_kind();
    if allowed.contains(&current) {
        true
    } else {
        log::warn!(
            "{} ignoriert: Ansicht {:?}, erwartet {:?}",
            event,
            current,
            allowed
        );
        false
    }
}

/// Prüft einen Wegpunkt-Index (`inclusive` erlaubt `index == len` zum Anhängen).
fn index_allows(state: &SessionState, index: usize, inclusive: bool, event: &str) -> bool {
    let len = state.waypoints.len();
    let ok = if inclusive { index <= len } else { index < len };
    if !ok {
        log::warn!(
            "{} ignoriert: Index {} außerhalb ({} Wegpunkte)",
            event,
            index,
            len
        );
    }
    ok
}

fn coordinate_allows(coordinate: &LngLat, event: &str) -> bool {
    if !coordinate.is_valid() {
        log::warn!("{} ignoriert: ungültige Koordinate {:?}", event, coordinate);
        return false;
    }
    true
}

/// Commands, die einen Wegpunkt neu positionieren und alles Abhängige anstoßen.
fn place_commands(index: usize, coordinate: LngLat) -> [SessionCommand; 4] {
    [
        SessionCommand::PlaceWaypoint { index, coordinate },
        SessionCommand::RecomputeView,
        SessionCommand::RequestRouteRecompute,
        SessionCommand::EnqueueReverseGeocode { index },
    ]
}

/// Übersetzt einen `SessionIntent` in eine Sequenz ausführbarer `SessionCommand`s.
pub fn map_intent_to_commands(state: &SessionState, intent: SessionIntent) -> Vec<SessionCommand> {
    match intent {
        SessionIntent::ProfileSelected { profile } => vec![
            SessionCommand::SetProfile { profile },
            SessionCommand::ClearAllSegments,
            SessionCommand::RequestRouteRecompute,
        ],
        SessionIntent::SearchRequested { index } => {
            if !view_allows(state, START_OR_ROUTES, "SearchRequested")
                || !index_allows(state, index, false, "SearchRequested")
            {
                return Vec::new();
            }
            vec![SessionCommand::BeginSearch { index }]
        }
        SessionIntent::RemoveOrClearRequested { index } => {
            if !view_allows(state, ANY_VIEW, "RemoveOrClearRequested")
                || !index_allows(state, index, false, "RemoveOrClearRequested")
            {
                return Vec::new();
            }
            vec![
                SessionCommand::RemoveOrClearWaypoint { index },
                SessionCommand::RecomputeView,
                SessionCommand::RequestRouteRecompute,
            ]
        }
        SessionIntent::AddWaypointRequested => {
            if !view_allows(state, ANY_VIEW, "AddWaypointRequested") {
                return Vec::new();
            }
            let mut commands = Vec::with_capacity(3);
            if state.view_kind() == ViewKind::Search {
                commands.push(SessionCommand::RestoreSearchBackup);
            }
            commands.push(SessionCommand::AppendWaypoint);
            commands.push(SessionCommand::RecomputeView);
            commands
        }
        SessionIntent::MapLoaded => {
            let wants_location = state.view_kind() == ViewKind::Start
                && state.waypoints.iter().any(|w| w.is_user_location);
            if wants_location {
                vec![SessionCommand::RequestUserLocation]
            } else {
                Vec::new()
            }
        }
        SessionIntent::InsertWaypointRequested { index, coordinate } => {
            if !view_allows(state, SEARCH_OR_ROUTES, "InsertWaypointRequested")
                || !index_allows(state, index, true, "InsertWaypointRequested")
                || !coordinate_allows(&coordinate, "InsertWaypointRequested")
            {
                return Vec::new();
            }
            let mut commands = Vec::with_capacity(6);
            if state.view_kind() == ViewKind::Search {
                commands.push(SessionCommand::RestoreSearchBackup);
            }
            commands.extend([
                SessionCommand::InsertWaypoint { index, coordinate },
                SessionCommand::RecomputeView,
                SessionCommand::RequestRouteRecompute,
                SessionCommand::EnqueueReverseGeocode { index },
                SessionCommand::SuppressNextMapClick,
            ]);
            commands
        }
        SessionIntent::MapClicked { coordinate } => {
            if state.suppress_next_map_click {
                return vec![SessionCommand::ConsumeSuppressedMapClick];
            }
            if !view_allows(state, ANY_VIEW, "MapClicked")
                || !coordinate_allows(&coordinate, "MapClicked")
            {
                return Vec::new();
            }

            if let Some(search) = state.active_search() {
                let index = search.index;
                let mut commands = Vec::with_capacity(5);
                commands.push(SessionCommand::PlaceWaypoint { index, coordinate });
                commands.push(SessionCommand::ConfirmSearch);
                commands.extend(place_commands(index, coordinate).into_iter().skip(1));
                return commands;
            }

            match state.waypoints.iter().position(|w| !w.is_resolved()) {
                Some(index) => place_commands(index, coordinate).to_vec(),
                None => {
                    let index = state.waypoints.len();
                    let mut commands = vec![SessionCommand::AppendWaypoint];
                    commands.extend(place_commands(index, coordinate));
                    commands
                }
            }
        }
        SessionIntent::SwitchFirstTwoRequested => {
            if !view_allows(state, START_OR_ROUTES, "SwitchFirstTwoRequested") {
                return Vec::new();
            }
            vec![
                SessionCommand::SwapFirstTwo,
                SessionCommand::ClearAllSegments,
                SessionCommand::RecomputeView,
                SessionCommand::RequestRouteRecompute,
            ]
        }
        SessionIntent::SearchInputChanged { text } => {
            if !view_allows(state, SEARCH_ONLY, "SearchInputChanged") {
                return Vec::new();
            }
            vec![SessionCommand::SetSearchQuery { query: text }]
        }
        SessionIntent::SearchCancelled => {
            if !view_allows(state, SEARCH_ONLY, "SearchCancelled") {
                return Vec::new();
            }
            vec![
                SessionCommand::RestoreSearchBackup,
                SessionCommand::RecomputeView,
            ]
        }
        SessionIntent::SearchResultSelected { result_index } => {
            if !view_allows(state, SEARCH_ONLY, "SearchResultSelected") {
                return Vec::new();
            }
            let Some(search) = state.active_search() else {
                return Vec::new();
            };
            if result_index >= search.results.len() {
                log::warn!(
                    "SearchResultSelected ignoriert: Treffer {} von {}",
                    result_index,
                    search.results.len()
                );
                return Vec::new();
            }
            let index = search.index;
            vec![
                SessionCommand::ApplySearchResult { result_index },
                SessionCommand::ConfirmSearch,
                SessionCommand::SetFocus { index: Some(index) },
                SessionCommand::RecomputeView,
                SessionCommand::RequestRouteRecompute,
            ]
        }
        SessionIntent::UserLocationSelected => {
            if !view_allows(state, SEARCH_ONLY, "UserLocationSelected") {
                return Vec::new();
            }
            let Some(search) = state.active_search() else {
                return Vec::new();
            };
            vec![
                SessionCommand::InvalidateAdjacent {
                    index: search.index,
                },
                SessionCommand::RequestUserLocation,
            ]
        }
        SessionIntent::UserLocationResolved { coordinate } => {
            if !coordinate_allows(&coordinate, "UserLocationResolved") {
                return Vec::new();
            }
            let (index, confirm) = match &state.view {
                SessionView::Search(search) => (search.index, true),
                SessionView::Start | SessionView::Routes => {
                    match state.waypoints.iter().position(|w| w.is_user_location) {
                        Some(index) => (index, false),
                        None => {
                            log::warn!(
                                "UserLocationResolved ignoriert: kein Wegpunkt erwartet den Standort"
                            );
                            return Vec::new();
                        }
                    }
                }
            };
            let mut commands = Vec::with_capacity(5);
            commands.push(SessionCommand::SetUserLocation { index, coordinate });
            if confirm {
                commands.push(SessionCommand::ConfirmSearch);
            }
            commands.extend([
                SessionCommand::RecomputeView,
                SessionCommand::RequestRouteRecompute,
                SessionCommand::EnqueueReverseGeocode { index },
            ]);
            commands
        }
        SessionIntent::UserLocationFailed => {
            if !state.user_location_requested {
                log::warn!("UserLocationFailed ignoriert: kein Standort angefordert");
                return Vec::new();
            }
            vec![SessionCommand::MarkUserLocationFailed]
        }
        SessionIntent::LocationUpdated { id, coordinate } => {
            if !coordinate_allows(&coordinate, "LocationUpdated") {
                return Vec::new();
            }
            let Some(index) = state.index_of(id) else {
                log::warn!("LocationUpdated ignoriert: Wegpunkt-ID {} unbekannt", id);
                return Vec::new();
            };
            let mut commands = Vec::with_capacity(5);
            if state.active_search().is_some_and(|s| s.index == index) {
                commands.push(SessionCommand::RestoreSearchBackup);
            }
            commands.extend(place_commands(index, coordinate));
            commands
        }
    }
}

/// Übersetzt eine Dienst-Antwort in Commands.
///
/// Antworten, die nicht mehr zum aktuellen Zustand passen, werden verworfen.
pub(crate) fn map_response_to_commands(
    state: &SessionState,
    response: ServiceResponse,
) -> Vec<SessionCommand> {
    match response {
        ServiceResponse::ForwardGeocoded { query, results } => {
            // Nur ein Slot: auch Treffer eines inzwischen überholten Suchtexts
            // werden übernommen, der nächste Tick ersetzt sie.
            if state.view_kind() != ViewKind::Search {
                log::debug!("Suchtreffer für '{}' verworfen: keine aktive Suche", query);
                return vec![SessionCommand::FinishForwardGeocode];
            }
            vec![
                SessionCommand::ApplyForwardResults { results },
                SessionCommand::FinishForwardGeocode,
            ]
        }
        ServiceResponse::ForwardGeocodeFailed { query } => {
            log::debug!("Vorwärtssuche für '{}' ohne Ergebnis beendet", query);
            vec![SessionCommand::FinishForwardGeocode]
        }
        ServiceResponse::ReverseGeocoded {
            waypoint_id,
            coordinate,
            results,
        } => {
            if !view_allows(state, START_OR_ROUTES, "ReverseGeocoded") {
                return Vec::new();
            }
            let Some(index) = state.index_of(waypoint_id) else {
                log::debug!("Rückwärtssuche verworfen: Wegpunkt {} entfernt", waypoint_id);
                return Vec::new();
            };
            if state.waypoints[index].coordinate != Some(coordinate) {
                log::debug!(
                    "Rückwärtssuche verworfen: Wegpunkt {} wurde verschoben",
                    waypoint_id
                );
                return Vec::new();
            }
            let description = results
                .into_iter()
                .next()
                .map(|r| r.description)
                .unwrap_or_else(|| coordinate.label());
            vec![SessionCommand::ApplyReverseDescription { index, description }]
        }
        ServiceResponse::RouteComputed {
            sequence,
            segment_index,
            response,
        } => {
            if sequence != state.pending.route_sequence {
                log::debug!(
                    "Routing-Ergebnis für Segment {} verworfen: Sequenz {} ≠ {}",
                    segment_index,
                    sequence,
                    state.pending.route_sequence
                );
                return Vec::new();
            }
            let segment_count = state.primary_route().map_or(0, |r| r.segment_count());
            if segment_index >= segment_count {
                log::warn!(
                    "Routing-Ergebnis verworfen: Segment {} außerhalb ({} Segmente)",
                    segment_index,
                    segment_count
                );
                return Vec::new();
            }
            let Some(primary) = response.primary(&state.profile).cloned() else {
                log::warn!(
                    "Routing-Antwort ohne Hauptroute für Profil '{}'",
                    state.profile
                );
                return Vec::new();
            };
            if state.waypoints.len() == 2 {
                vec![SessionCommand::ApplyAlternatives {
                    primary,
                    alternatives: response.alternatives(&state.profile),
                }]
            } else {
                vec![SessionCommand::ApplyRouteSegment {
                    segment_index,
                    data: primary,
                }]
            }
        }
    }
}
