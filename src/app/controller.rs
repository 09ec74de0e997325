//! Session Controller für zentrale Event-Verarbeitung.

use super::intent_mapping;
use super::{ServiceResponse, SessionCommand, SessionIntent, SessionState};

/// Orchestriert Session-Events und Dienst-Antworten auf den SessionState.
#[derive(Default)]
pub struct SessionController;

impl SessionController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut SessionState,
        intent: SessionIntent,
    ) -> anyhow::Result<()> {
        let commands = intent_mapping::map_intent_to_commands(state, intent);
        self.run_commands(state, commands)
    }

    /// Verarbeitet eine Dienst-Antwort über Response->Command Mapping.
    pub(crate) fn handle_response(
        &mut self,
        state: &mut SessionState,
        response: ServiceResponse,
    ) -> anyhow::Result<()> {
        let commands = intent_mapping::map_response_to_commands(state, response);
        self.run_commands(state, commands)
    }

    fn run_commands(
        &mut self,
        state: &mut SessionState,
        commands: Vec<SessionCommand>,
    ) -> anyhow::Result<()> {
        for command in commands {
            self.handle_command(state, command)?;
        }
        Ok(())
    }

    /// Führt mutierende Commands auf dem SessionState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut SessionState,
        command: SessionCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Routing ===
            SessionCommand::SetProfile { profile } => handlers::routes::set_profile(state, profile),
            SessionCommand::ClearAllSegments => handlers::routes::clear_all_segments(state),
            SessionCommand::RequestRouteRecompute => handlers::routes::request_recompute(state),
            SessionCommand::InvalidateAdjacent { index } => {
                handlers::routes::invalidate_adjacent(state, index)?
            }
            SessionCommand::ApplyRouteSegment {
                segment_index,
                data,
            } => handlers::routes::apply_segment(state, segment_index, data)?,
            SessionCommand::ApplyAlternatives {
                primary,
                alternatives,
            } => handlers::routes::apply_alternatives(state, primary, alternatives)?,

            // === Wegpunkte ===
            SessionCommand::RemoveOrClearWaypoint { index } => {
                handlers::waypoints::remove_or_clear(state, index)?
            }
            SessionCommand::AppendWaypoint => handlers::waypoints::append(state),
            SessionCommand::InsertWaypoint { index, coordinate } => {
                handlers::waypoints::insert(state, index, coordinate)?
            }
            SessionCommand::PlaceWaypoint { index, coordinate } => {
                handlers::waypoints::place(state, index, coordinate)?
            }
            SessionCommand::SwapFirstTwo => handlers::waypoints::swap_first_two(state)?,
            SessionCommand::SuppressNextMapClick => handlers::waypoints::suppress_next_click(state),
            SessionCommand::ConsumeSuppressedMapClick => {
                handlers::waypoints::consume_suppressed_click(state)
            }

            // === Suche ===
            SessionCommand::BeginSearch { index } => handlers::search::begin(state, index)?,
            SessionCommand::RestoreSearchBackup => handlers::search::restore_backup(state)?,
            SessionCommand::ConfirmSearch => handlers::search::confirm(state)?,
            SessionCommand::SetSearchQuery { query } => handlers::search::set_query(state, query)?,
            SessionCommand::ApplySearchResult { result_index } => {
                handlers::search::apply_result(state, result_index)?
            }
            SessionCommand::ApplyForwardResults { results } => {
                handlers::geocode::apply_forward_results(state, results)?
            }
            SessionCommand::FinishForwardGeocode => handlers::geocode::finish_forward(state),
            SessionCommand::EnqueueReverseGeocode { index } => {
                handlers::geocode::enqueue_reverse(state, index)?
            }
            SessionCommand::ApplyReverseDescription { index, description } => {
                handlers::geocode::apply_reverse_description(state, index, description)?
            }

            // === Nutzer-Standort ===
            SessionCommand::RequestUserLocation => handlers::user_location::request(state),
            SessionCommand::SetUserLocation { index, coordinate } => {
                handlers::user_location::set(state, index, coordinate)?
            }
            SessionCommand::MarkUserLocationFailed => handlers::user_location::mark_failed(state),

            // === Ansicht ===
            SessionCommand::RecomputeView => handlers::view::recompute(state),
            SessionCommand::SetFocus { index } => handlers::view::set_focus(state, index),
        }

        Ok(())
    }
}
