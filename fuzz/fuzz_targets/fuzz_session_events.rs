#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use trip_planner::{
    CollectingSink, LngLat, Profile, RoutingSession, SessionIntent, SessionOptions,
};

/// Baut aus je drei Bytes ein Event (Opcode, Index, Koordinaten-Seed).
fn decode(chunk: &[u8]) -> SessionIntent {
    let index = chunk[1] as usize % 6;
    let seed = chunk[2] as f64;
    let coordinate = LngLat::new(4.0 + seed * 0.01, 51.0 - seed * 0.005);
    match chunk[0] % 15 {
        0 => SessionIntent::ProfileSelected {
            profile: if chunk[1] % 2 == 0 { "car" } else { "bike" }.into(),
        },
        1 => SessionIntent::SearchRequested { index },
        2 => SessionIntent::RemoveOrClearRequested { index },
        3 => SessionIntent::AddWaypointRequested,
        4 => SessionIntent::MapLoaded,
        5 => SessionIntent::InsertWaypointRequested { index, coordinate },
        6 => SessionIntent::MapClicked { coordinate },
        7 => SessionIntent::SwitchFirstTwoRequested,
        8 => SessionIntent::SearchInputChanged {
            text: format!("q{}", chunk[2]),
        },
        9 => SessionIntent::SearchCancelled,
        10 => SessionIntent::SearchResultSelected { result_index: index },
        11 => SessionIntent::UserLocationSelected,
        12 => SessionIntent::UserLocationResolved { coordinate },
        13 => SessionIntent::UserLocationFailed,
        _ => SessionIntent::LocationUpdated {
            id: chunk[1] as u64 % 8,
            coordinate,
        },
    }
}

fuzz_target!(|data: &[u8]| {
    let mut session = RoutingSession::new(
        Vec::new(),
        Profile::new("car"),
        SessionOptions::default(),
        Arc::new(CollectingSink::new()),
    );

    for chunk in data.chunks_exact(3) {
        session.handle_intent(decode(chunk));
        if chunk[0] & 0x80 != 0 {
            let _ = session.take_route_requests();
            let _ = session.take_forward_request();
            let _ = session.take_reverse_request();
        }
        if let Err(e) = session.state().validate() {
            panic!("Invariante verletzt: {e:#}");
        }
    }
});
