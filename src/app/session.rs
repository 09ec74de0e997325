//! Routing-Session: öffentliche Event-API über Controller und State.
//!
//! Jedes Event läuft synchron durch Intent-Mapping und Handler; danach wird
//! der Unterschied zum Vorher-Snapshot als [`StateDiff`] gepusht.

use super::requests::{self, ForwardRequest, ReverseRequest, RouteRequest};
use super::{
    ServiceResponse, SessionController, SessionIntent, SessionState, Snapshot, StateDiff,
    StateSink,
};
use crate::core::{LngLat, Profile, WaypointSeed};
use crate::shared::SessionOptions;
use std::sync::Arc;

/// Zustandsautomat einer Routenplanung.
pub struct RoutingSession {
    state: SessionState,
    controller: SessionController,
    sink: Arc<dyn StateSink>,
}

impl RoutingSession {
    /// Erstellt eine Session und pusht den vollständigen Startzustand.
    pub fn new(
        seeds: Vec<WaypointSeed>,
        profile: Profile,
        options: SessionOptions,
        sink: Arc<dyn StateSink>,
    ) -> Self {
        let state = SessionState::new(seeds, profile, options);
        log::info!(
            "Session gestartet: {} Wegpunkte, Profil '{}', Ansicht {:?}",
            state.waypoints.len(),
            state.profile,
            state.view_kind()
        );
        sink.push(StateDiff::full(&state));
        Self {
            state,
            controller: SessionController::new(),
            sink,
        }
    }

    /// Read-only Zugriff auf den Zustand.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Laufzeit-Optionen der Session.
    pub fn options(&self) -> &SessionOptions {
        &self.state.options
    }

    /// Verarbeitet ein Event und pusht den resultierenden Diff.
    pub fn handle_intent(&mut self, intent: SessionIntent) {
        let before = Snapshot::from_state(&self.state);
        if let Err(e) = self.controller.handle_intent(&mut self.state, intent) {
            log::error!("Event-Verarbeitung fehlgeschlagen: {:#}", e);
        }
        self.publish(&before);
    }

    /// Übernimmt eine Dienst-Antwort (nur über den Scheduler erreichbar).
    pub(crate) fn apply_response(&mut self, response: ServiceResponse) {
        let before = Snapshot::from_state(&self.state);
        if let Err(e) = self.controller.handle_response(&mut self.state, response) {
            log::error!("Antwort-Verarbeitung fehlgeschlagen: {:#}", e);
        }
        self.publish(&before);
    }

    fn publish(&mut self, before: &Snapshot) {
        #[cfg(debug_assertions)]
        if let Err(e) = self.state.validate() {
            log::error!("Session-Invariante verletzt: {:#}", e);
        }

        let diff = StateDiff::between(before, &self.state);
        if !diff.is_empty() {
            self.sink.push(diff);
        }
    }

    // ── Events ──────────────────────────────────────────────────────

    pub fn select_profile(&mut self, profile: impl Into<Profile>) {
        self.handle_intent(SessionIntent::ProfileSelected {
            profile: profile.into(),
        });
    }

    pub fn begin_search(&mut self, index: usize) {
        self.handle_intent(SessionIntent::SearchRequested { index });
    }

    pub fn remove_or_clear(&mut self, index: usize) {
        self.handle_intent(SessionIntent::RemoveOrClearRequested { index });
    }

    pub fn add(&mut self) {
        self.handle_intent(SessionIntent::AddWaypointRequested);
    }

    pub fn map_loaded(&mut self) {
        self.handle_intent(SessionIntent::MapLoaded);
    }

    pub fn insert_at(&mut self, index: usize, coordinate: LngLat) {
        self.handle_intent(SessionIntent::InsertWaypointRequested { index, coordinate });
    }

    pub fn map_clicked(&mut self, coordinate: LngLat) {
        self.handle_intent(SessionIntent::MapClicked { coordinate });
    }

    pub fn switch_first_two(&mut self) {
        self.handle_intent(SessionIntent::SwitchFirstTwoRequested);
    }

    pub fn search_input(&mut self, text: impl Into<String>) {
        self.handle_intent(SessionIntent::SearchInputChanged { text: text.into() });
    }

    pub fn cancel_search(&mut self) {
        self.handle_intent(SessionIntent::SearchCancelled);
    }

    pub fn select_search_result(&mut self, result_index: usize) {
        self.handle_intent(SessionIntent::SearchResultSelected { result_index });
    }

    pub fn select_user_location(&mut self) {
        self.handle_intent(SessionIntent::UserLocationSelected);
    }

    pub fn user_location_resolved(&mut self, coordinate: LngLat) {
        self.handle_intent(SessionIntent::UserLocationResolved { coordinate });
    }

    pub fn user_location_failed(&mut self) {
        self.handle_intent(SessionIntent::UserLocationFailed);
    }

    pub fn update_location_by_id(&mut self, id: u64, coordinate: LngLat) {
        self.handle_intent(SessionIntent::LocationUpdated { id, coordinate });
    }

    // ── Pending Work ────────────────────────────────────────────────

    /// Entnimmt alle fälligen Routing-Anfragen.
    pub fn take_route_requests(&mut self) -> Vec<RouteRequest> {
        requests::take_route_requests(&mut self.state)
    }

    /// Entnimmt die fällige Vorwärtssuche.
    pub fn take_forward_request(&mut self) -> Option<ForwardRequest> {
        requests::take_forward_request(&mut self.state)
    }

    /// Entnimmt die nächste Rückwärtssuche.
    pub fn take_reverse_request(&mut self) -> Option<ReverseRequest> {
        requests::take_reverse_request(&mut self.state)
    }
}
