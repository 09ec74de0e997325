use super::{SessionState, SessionView};
use crate::core::{Profile, Route, Waypoint};
use serde::Serialize;
use std::sync::Arc;

/// Snapshot reduziert auf die für die Darstellung relevanten Teile.
///
/// Nutzt Arc-Clone (Copy-on-Write): Das Erstellen ist O(1), erst der nächste
/// `Arc::make_mut()` in einem Handler klont Wegpunkte bzw. Routen.
#[derive(Clone)]
pub struct Snapshot {
    pub view: SessionView,
    pub waypoints: Arc<Vec<Waypoint>>,
    pub routes: Arc<Vec<Route>>,
    pub focus_index: Option<usize>,
    pub user_location_requested: bool,
    pub user_location_available: bool,
    pub profile: Profile,
}

impl Snapshot {
    /// Erstellt einen O(1)-Snapshot durch Arc-Clone statt Deep-Clone.
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            view: state.view.clone(),
            waypoints: state.waypoints.clone(), // O(1): nur Arc-Ref-Count erhöhen
            routes: state.routes.clone(),
            focus_index: state.focus_index,
            user_location_requested: state.user_location_requested,
            user_location_available: state.user_location_available,
            profile: state.profile.clone(),
        }
    }
}

fn same<T: PartialEq>(a: &Arc<T>, b: &Arc<T>) -> bool {
    Arc::ptr_eq(a, b) || **a == **b
}

/// Teil-Update für die Darstellung: nur geänderte Felder sind gesetzt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<SessionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoints: Option<Arc<Vec<Waypoint>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<Arc<Vec<Route>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_index: Option<Option<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_location_requested: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_location_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl StateDiff {
    /// Vollständiger Zustand (erster Push einer Session).
    pub fn full(state: &SessionState) -> Self {
        let snapshot = Snapshot::from_state(state);
        Self {
            view: Some(snapshot.view),
            waypoints: Some(snapshot.waypoints),
            routes: Some(snapshot.routes),
            focus_index: Some(snapshot.focus_index),
            user_location_requested: Some(snapshot.user_location_requested),
            user_location_available: Some(snapshot.user_location_available),
            profile: Some(snapshot.profile),
        }
    }

    /// Unterschied zwischen einem Snapshot und dem aktuellen Zustand.
    pub fn between(before: &Snapshot, after: &SessionState) -> Self {
        let mut diff = Self::default();
        if before.view != after.view {
            diff.view = Some(after.view.clone());
        }
        if !same(&before.waypoints, &after.waypoints) {
            diff.waypoints = Some(after.waypoints.clone());
        }
        if !same(&before.routes, &after.routes) {
            diff.routes = Some(after.routes.clone());
        }
        if before.focus_index != after.focus_index {
            diff.focus_index = Some(after.focus_index);
        }
        if before.user_location_requested != after.user_location_requested {
            diff.user_location_requested = Some(after.user_location_requested);
        }
        if before.user_location_available != after.user_location_available {
            diff.user_location_available = Some(after.user_location_available);
        }
        if before.profile != after.profile {
            diff.profile = Some(after.profile.clone());
        }
        diff
    }

    /// `true`, wenn kein Feld gesetzt ist.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Überlagert diesen Diff mit einem neueren.
    pub fn merge(&mut self, newer: StateDiff) {
        if newer.view.is_some() {
            self.view = newer.view;
        }
        if newer.waypoints.is_some() {
            self.waypoints = newer.waypoints;
        }
        if newer.routes.is_some() {
            self.routes = newer.routes;
        }
        if newer.focus_index.is_some() {
            self.focus_index = newer.focus_index;
        }
        if newer.user_location_requested.is_some() {
            self.user_location_requested = newer.user_location_requested;
        }
        if newer.user_location_available.is_some() {
            self.user_location_available = newer.user_location_available;
        }
        if newer.profile.is_some() {
            self.profile = newer.profile;
        }
    }

    /// Namen der gesetzten Felder (für Log-Ausgaben).
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.view.is_some() {
            fields.push("view");
        }
        if self.waypoints.is_some() {
            fields.push("waypoints");
        }
        if self.routes.is_some() {
            fields.push("routes");
        }
        if self.focus_index.is_some() {
            fields.push("focus_index");
        }
        if self.user_location_requested.is_some() {
            fields.push("user_location_requested");
        }
        if self.user_location_available.is_some() {
            fields.push("user_location_available");
        }
        if self.profile.is_some() {
            fields.push("profile");
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LngLat, WaypointSeed};
    use crate::shared::SessionOptions;

    fn resolved_state() -> SessionState {
        let seeds = vec![
            WaypointSeed {
                description: "A".into(),
                coordinate: Some(LngLat::new(2.35, 48.85)),
                ..Default::default()
            },
            WaypointSeed {
                description: "B".into(),
                coordinate: Some(LngLat::new(2.29, 48.86)),
                ..Default::default()
            },
        ];
        SessionState::new(seeds, Profile::new("car"), SessionOptions::default())
    }

    #[test]
    fn test_unchanged_state_gives_empty_diff() {
        let state = resolved_state();
        let before = Snapshot::from_state(&state);
        let diff = StateDiff::between(&before, &state);
        assert!(diff.is_empty());
        assert!(diff.changed_fields().is_empty());
    }

    #[test]
    fn test_cow_mutation_shows_only_waypoints() {
        let mut state = resolved_state();
        let before = Snapshot::from_state(&state);
        state.waypoints_mut()[0].description = "Neu".into();

        let diff = StateDiff::between(&before, &state);
        assert_eq!(diff.changed_fields(), vec!["waypoints"]);
        // Snapshot hält weiterhin die alte Version
        assert_eq!(before.waypoints[0].description, "A");
    }

    #[test]
    fn test_merge_keeps_newest_value() {
        let mut older = StateDiff {
            focus_index: Some(Some(0)),
            profile: Some(Profile::new("car")),
            ..Default::default()
        };
        older.merge(StateDiff {
            focus_index: Some(None),
            ..Default::default()
        });
        assert_eq!(older.focus_index, Some(None));
        assert_eq!(older.profile, Some(Profile::new("car")));
    }

    #[test]
    fn test_full_diff_serializes_view_tag() {
        let state = resolved_state();
        let json = serde_json::to_value(StateDiff::full(&state)).expect("serialisierbar");
        assert_eq!(json["view"]["view"], "ROUTES");
        assert_eq!(json["waypoints"].as_array().map(Vec::len), Some(2));
    }
}
