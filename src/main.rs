//! Trip Planner Demo-Runner.
//!
//! Spielt ein TOML-Skript mit Session-Events gegen Offline-Kollaborateure ab
//! (Gazetteer-Kette + Luftlinien-Router) und gibt jeden State-Diff als JSON aus.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use trip_planner::geocode::ChainEntry;
use trip_planner::{
    GazetteerProvider, GeocodeFallbackChain, LineRoutingService, Place, Profile, RoutingSession,
    SessionIntent, SessionOptions, SessionRuntime, StateDiff, StateSink, WaypointSeed,
};

fn main() -> anyhow::Result<()> {
    AppRunner::run()
}

/// Demo-Skript
#[derive(Debug, Deserialize)]
struct DemoScript {
    /// Profil beim Start (sonst `default_profile` der Optionen)
    #[serde(default)]
    profile: Option<String>,
    #[serde(default)]
    waypoints: Vec<WaypointSeed>,
    /// Provider der Fallback-Kette in Abfragereihenfolge
    #[serde(default)]
    geocoders: Vec<GeocoderSpec>,
    #[serde(default)]
    steps: Vec<ScriptStep>,
}

#[derive(Debug, Deserialize)]
struct GeocoderSpec {
    name: String,
    /// Rückwärtssuche erst bei nahem Treffer beenden
    #[serde(default)]
    stop_when_near: bool,
    places: Vec<Place>,
}

/// Ein Skriptschritt: optionales Event, danach optionale Wartezeit
#[derive(Debug, Deserialize)]
struct ScriptStep {
    #[serde(default)]
    event: Option<SessionIntent>,
    #[serde(default)]
    wait_ms: u64,
}

/// Gibt jeden Diff als JSON-Zeile auf stdout aus.
struct PrintSink;

impl StateSink for PrintSink {
    fn push(&self, diff: StateDiff) {
        match serde_json::to_string(&diff) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Diff nicht serialisierbar: {}", e),
        }
    }
}

struct AppRunner;

impl AppRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Trip Planner v{} startet...", env!("CARGO_PKG_VERSION"));

        let script_path = std::env::args()
            .nth(1)
            .context("Aufruf: trip-planner <skript.toml>")?;
        let script = Self::load_script(Path::new(&script_path))?;

        // Optionen aus TOML laden (oder Standardwerte)
        let options = SessionOptions::load_from_file(&SessionOptions::config_path());

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Tokio-Runtime konnte nicht erstellt werden")?;
        runtime.block_on(Self::replay(script, options))
    }

    fn load_script(path: &Path) -> anyhow::Result<DemoScript> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Skript nicht lesbar: {}", path.display()))?;
        let script: DemoScript = toml::from_str(&content)
            .with_context(|| format!("Skript fehlerhaft: {}", path.display()))?;
        log::info!(
            "Skript geladen: {} Wegpunkte, {} Geocoder, {} Schritte",
            script.waypoints.len(),
            script.geocoders.len(),
            script.steps.len()
        );
        Ok(script)
    }

    fn build_chain(specs: Vec<GeocoderSpec>, options: &SessionOptions) -> GeocodeFallbackChain {
        specs
            .into_iter()
            .fold(GeocodeFallbackChain::new(options), |chain, spec| {
                let provider = GazetteerProvider::new(spec.name, spec.places);
                let entry = ChainEntry::new(Arc::new(provider));
                let entry = if spec.stop_when_near {
                    entry.stop_when_near()
                } else {
                    entry
                };
                chain.with_entry(entry)
            })
    }

    async fn replay(script: DemoScript, options: SessionOptions) -> anyhow::Result<()> {
        let profile = Profile::new(
            script
                .profile
                .unwrap_or_else(|| options.default_profile.clone()),
        );
        let chain = Self::build_chain(script.geocoders, &options);
        let routing = LineRoutingService::new(&options);
        let settle = options.tick_interval() * 3;

        let session = RoutingSession::new(script.waypoints, profile, options, Arc::new(PrintSink));
        let runtime = SessionRuntime::builder(session)
            .routing(Arc::new(routing))
            .geocoder(Arc::new(chain))
            .spawn();
        let handle = runtime.handle();

        for step in script.steps {
            if let Some(event) = step.event {
                log::info!("Event: {:?}", event);
                handle.send(event)?;
            }
            if step.wait_ms > 0 {
                tokio::time::sleep(Duration::from_millis(step.wait_ms)).await;
            }
        }
        // Letzte Ticks abwarten, damit ausstehende Arbeit ankommt
        tokio::time::sleep(settle).await;

        let session = runtime.shutdown().await?;
        let state = session.state();
        for (index, route) in state.routes.iter().enumerate() {
            let summary = route.summary();
            log::info!(
                "Route {}: {:.1} km, {:.0} min, {} offene Segmente",
                index,
                summary.distance_m / 1000.0,
                summary.duration_s / 60.0,
                summary.dirty_segments
            );
        }
        for waypoint in state.waypoints.iter() {
            log::info!("Wegpunkt {}: {}", waypoint.id, waypoint.description);
        }
        Ok(())
    }
}
