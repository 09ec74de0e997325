use crate::core::{LngLat, Profile};
use serde::{Deserialize, Serialize};

/// Session-Intents: Eingaben aus Oberfläche oder System ohne Mutationslogik.
///
/// Serialisiert intern getaggt (`type = "map_clicked"`), damit Demo-Skripte
/// und Host-Adapter Events als TOML/JSON liefern können.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionIntent {
    /// Routing-Profil gewechselt
    ProfileSelected { profile: Profile },
    /// Suche für einen Wegpunkt beginnen
    SearchRequested { index: usize },
    /// Wegpunkt entfernen (bzw. leeren, wenn nur zwei existieren)
    RemoveOrClearRequested { index: usize },
    /// Leeren Wegpunkt anhängen
    AddWaypointRequested,
    /// Karte ist geladen
    MapLoaded,
    /// Wegpunkt per Drag auf einer Route einfügen
    InsertWaypointRequested { index: usize, coordinate: LngLat },
    /// Roher Klick auf die Karte
    MapClicked { coordinate: LngLat },
    /// Start und Ziel tauschen
    SwitchFirstTwoRequested,
    /// Suchtext geändert
    SearchInputChanged { text: String },
    /// Suche abgebrochen
    SearchCancelled,
    /// Suchtreffer ausgewählt
    SearchResultSelected { result_index: usize },
    /// Aktiver Wegpunkt soll den Nutzer-Standort verwenden
    UserLocationSelected,
    /// Nutzer-Standort ermittelt
    UserLocationResolved { coordinate: LngLat },
    /// Nutzer-Standort nicht ermittelbar
    UserLocationFailed,
    /// Wegpunkt per ID verschoben (Marker-Drag)
    LocationUpdated { id: u64, coordinate: LngLat },
}
