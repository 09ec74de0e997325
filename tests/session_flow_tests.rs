use std::sync::Arc;
use trip_planner::app::SessionController;
use trip_planner::{
    CollectingSink, LngLat, Profile, RoutingSession, SessionIntent, SessionOptions, SessionState,
    SessionView, ViewKind, WaypointSeed,
};

fn resolved(lng: f64, lat: f64) -> WaypointSeed {
    WaypointSeed {
        description: format!("{lng}/{lat}"),
        coordinate: Some(LngLat::new(lng, lat)),
        is_user_location: false,
    }
}

fn new_session(seeds: Vec<WaypointSeed>) -> (RoutingSession, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    let session = RoutingSession::new(
        seeds,
        Profile::new("car"),
        SessionOptions::default(),
        sink.clone(),
    );
    (session, sink)
}

#[test]
fn test_map_clicked_logs_command_names() {
    let mut controller = SessionController::new();
    let mut state = SessionState::new(Vec::new(), Profile::new("car"), SessionOptions::default());

    controller
        .handle_intent(
            &mut state,
            SessionIntent::MapClicked {
                coordinate: LngLat::new(4.0, 51.0),
            },
        )
        .expect("MapClicked sollte ohne Fehler durchlaufen");

    assert_eq!(
        state.command_log.entries(),
        &[
            "PlaceWaypoint",
            "RecomputeView",
            "RequestRouteRecompute",
            "EnqueueReverseGeocode"
        ]
    );
    assert!(state.waypoints[0].is_resolved());
}

#[test]
fn test_ignored_intent_logs_nothing() {
    let mut controller = SessionController::new();
    let mut state = SessionState::new(Vec::new(), Profile::new("car"), SessionOptions::default());

    controller
        .handle_intent(&mut state, SessionIntent::SearchCancelled)
        .expect("Ignorierte Intents sind kein Fehler");

    assert!(state.command_log.is_empty());
}

#[test]
fn test_first_click_keeps_start_second_click_enables_routes() {
    let (mut session, _sink) = new_session(Vec::new());

    session.map_clicked(LngLat::new(4.0, 51.0));
    assert!(session.state().waypoints[0].is_resolved());
    assert_eq!(session.state().view, SessionView::Start);

    session.map_clicked(LngLat::new(4.1, 51.1));
    assert!(session.state().waypoints[1].is_resolved());
    assert_eq!(session.state().view, SessionView::Routes);

    let requests = session.take_route_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].segment_index, 0);
    assert_eq!(requests[0].origin, LngLat::new(4.0, 51.0));
    assert_eq!(requests[0].destination, LngLat::new(4.1, 51.1));
}

#[test]
fn test_click_placeholder_is_coordinate_label() {
    let (mut session, _sink) = new_session(Vec::new());
    let coordinate = LngLat::new(4.0, 51.0);

    session.map_clicked(coordinate);

    assert_eq!(session.state().waypoints[0].description, "51.00000, 4.00000");
}

#[test]
fn test_switch_first_two_swaps_and_requests_recompute() {
    let (mut session, _sink) = new_session(vec![resolved(4.0, 51.0), resolved(4.1, 51.1)]);
    let ids: Vec<u64> = session.state().waypoints.iter().map(|w| w.id).collect();
    session.take_route_requests();

    session.switch_first_two();

    let swapped: Vec<u64> = session.state().waypoints.iter().map(|w| w.id).collect();
    assert_eq!(swapped, vec![ids[1], ids[0]]);
    let requests = session.take_route_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].origin, LngLat::new(4.1, 51.1));
}

#[test]
fn test_remove_middle_waypoint_marks_joined_segment_dirty() {
    let (mut session, _sink) = new_session(vec![
        resolved(4.0, 51.0),
        resolved(4.1, 51.1),
        resolved(4.2, 51.2),
    ]);

    session.remove_or_clear(1);

    let state = session.state();
    assert_eq!(state.waypoints.len(), 2);
    assert_eq!(state.routes[0].segment_count(), 1);
    assert!(state.routes[0].is_dirty(0));
    assert_eq!(state.view_kind(), ViewKind::Routes);
}

#[test]
fn test_remove_or_clear_never_drops_below_two() {
    let (mut session, _sink) = new_session(vec![resolved(4.0, 51.0), resolved(4.1, 51.1)]);

    for _ in 0..5 {
        session.remove_or_clear(0);
        session.remove_or_clear(1);
    }

    assert_eq!(session.state().waypoints.len(), 2);
    assert!(session.state().waypoints.iter().all(|w| !w.is_resolved()));
    assert_eq!(session.state().view_kind(), ViewKind::Start);
}

#[test]
fn test_add_during_search_restores_backup_and_starts() {
    let (mut session, _sink) = new_session(vec![resolved(4.0, 51.0), resolved(4.1, 51.1)]);
    let original = session.state().waypoints[0].clone();
    session.begin_search(0);

    session.add();

    let state = session.state();
    assert_eq!(state.waypoints[0], original);
    assert_eq!(state.waypoints.len(), 3);
    assert_eq!(state.view_kind(), ViewKind::Start);
}

#[test]
fn test_update_location_during_search_restores_then_moves() {
    let (mut session, _sink) = new_session(vec![resolved(4.0, 51.0), resolved(4.1, 51.1)]);
    let id = session.state().waypoints[1].id;
    session.begin_search(1);

    session.update_location_by_id(id, LngLat::new(4.3, 51.3));

    let state = session.state();
    assert_eq!(state.view_kind(), ViewKind::Routes);
    assert_eq!(state.waypoints[1].coordinate, Some(LngLat::new(4.3, 51.3)));
    assert!(!state.waypoints[1].is_user_location);
    assert!(state.routes[0].is_dirty(0));
}

#[test]
fn test_pushed_diff_is_not_mutated_retroactively() {
    let (mut session, sink) = new_session(Vec::new());
    session.map_clicked(LngLat::new(4.0, 51.0));
    let pushed = sink
        .diffs()
        .last()
        .and_then(|d| d.waypoints.clone())
        .expect("Wegpunkte im Diff");

    session.map_clicked(LngLat::new(4.1, 51.1));

    assert!(pushed[0].is_resolved());
    assert!(!pushed[1].is_resolved());
    assert!(session.state().waypoints[1].is_resolved());
}

#[test]
fn test_merged_diffs_reflect_final_state() {
    let (mut session, sink) = new_session(Vec::new());
    session.map_clicked(LngLat::new(4.0, 51.0));
    session.map_clicked(LngLat::new(4.1, 51.1));
    session.select_profile("bike");

    let merged = sink.merged();
    assert_eq!(merged.view, Some(SessionView::Routes));
    assert_eq!(merged.profile, Some(Profile::new("bike")));
    assert_eq!(
        merged.waypoints.as_deref(),
        Some(session.state().waypoints.as_ref())
    );
}

#[test]
fn test_empty_profile_skips_route_requests() {
    let (mut session, _sink) = new_session(vec![resolved(4.0, 51.0), resolved(4.1, 51.1)]);

    session.select_profile("");

    assert!(session.take_route_requests().is_empty());
    assert!(!session.state().pending.route);
}

#[test]
fn test_three_waypoints_request_no_alternatives() {
    let (mut session, _sink) = new_session(vec![
        resolved(4.0, 51.0),
        resolved(4.1, 51.1),
        resolved(4.2, 51.2),
    ]);

    let requests = session.take_route_requests();

    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| !r.alternatives));
    assert!(requests.iter().all(|r| r.sequence == requests[0].sequence));
}

#[test]
fn test_user_location_failed_marks_unavailable() {
    let (mut session, _sink) = new_session(Vec::new());
    session.begin_search(0);
    session.select_user_location();
    assert!(session.state().user_location_requested);

    session.user_location_failed();

    assert!(!session.state().user_location_requested);
    assert!(!session.state().user_location_available);
    // Suche bleibt aktiv
    assert_eq!(session.state().view_kind(), ViewKind::Search);
}

#[test]
fn test_user_location_resolved_in_search_confirms() {
    let (mut session, _sink) = new_session(vec![resolved(4.1, 51.1)]);
    session.begin_search(1);
    session.select_user_location();

    session.user_location_resolved(LngLat::new(4.0, 51.0));

    let state = session.state();
    assert_eq!(state.view_kind(), ViewKind::Routes);
    assert!(state.waypoints[1].is_user_location);
    assert_eq!(state.waypoints[1].description, "Current location");
    assert!(state.validate().is_ok());
}

#[test]
fn test_user_location_resolved_without_target_is_ignored() {
    let (mut session, sink) = new_session(vec![resolved(4.0, 51.0), resolved(4.1, 51.1)]);
    sink.clear();

    session.user_location_resolved(LngLat::new(5.0, 50.0));

    assert!(sink.is_empty());
}
