//! Benchmark für Session-Hotpaths.
//!
//! Misst die Kosten pro Event auf großen Sessions:
//! - LocationUpdated auf n Wegpunkten (Copy-on-write + Diff)
//! - Einfügen/Entfernen in der Mitte (Segment-Verschiebung)
//! - Fallback-Kette über mehrere Gazetteers

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use trip_planner::{
    GazetteerProvider, GeocodeFallbackChain, LngLat, Place, Profile, RoutingSession,
    SessionOptions, StateDiff, StateSink, WaypointSeed,
};

/// Verwirft alle Diffs, damit nur die Session gemessen wird.
struct NullSink;

impl StateSink for NullSink {
    fn push(&self, diff: StateDiff) {
        black_box(diff);
    }
}

fn build_session(waypoint_count: usize) -> RoutingSession {
    let seeds = (0..waypoint_count)
        .map(|i| {
            let coordinate = LngLat::new(4.0 + i as f64 * 0.001, 51.0 + i as f64 * 0.0005);
            WaypointSeed {
                description: format!("Punkt {}", i),
                coordinate: Some(coordinate),
                is_user_location: false,
            }
        })
        .collect();
    RoutingSession::new(
        seeds,
        Profile::new("car"),
        SessionOptions::default(),
        Arc::new(NullSink),
    )
}

fn bench_location_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("location_updates");

    for &waypoint_count in &[10usize, 100, 1000] {
        let mut session = build_session(waypoint_count);
        let ids: Vec<u64> = session.state().waypoints.iter().map(|w| w.id).collect();

        group.bench_with_input(
            BenchmarkId::new("burst_of_64", waypoint_count),
            &ids,
            |b, ids| {
                let mut step = 0u64;
                b.iter(|| {
                    for i in 0..64usize {
                        step += 1;
                        let id = ids[i % ids.len()];
                        let offset = (step % 100) as f64 * 0.0001;
                        session.update_location_by_id(
                            black_box(id),
                            LngLat::new(4.0 + offset, 51.0 + offset),
                        );
                    }
                    black_box(session.take_route_requests().len())
                })
            },
        );
    }

    group.finish();
}

fn bench_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_remove_middle");

    for &waypoint_count in &[10usize, 100, 1000] {
        let mut session = build_session(waypoint_count);
        let middle = waypoint_count / 2;

        group.bench_function(BenchmarkId::from_parameter(waypoint_count), |b| {
            b.iter(|| {
                session.insert_at(black_box(middle), LngLat::new(4.5, 51.5));
                session.remove_or_clear(black_box(middle));
                while session.take_reverse_request().is_some() {}
                black_box(session.state().waypoints.len())
            })
        });
    }

    group.finish();
}

fn build_gazetteer(name: &str, place_count: usize) -> GazetteerProvider {
    let places = (0..place_count)
        .map(|i| Place {
            name: format!("{} Ort {}", name, i),
            coordinate: LngLat::new(3.0 + (i % 100) as f64 * 0.01, 50.5 + (i / 100) as f64 * 0.01),
            kind: if i % 3 == 0 { "commune" } else { "street" }.to_string(),
            importance: 0.5,
        })
        .collect();
    GazetteerProvider::new(name, places)
}

fn bench_fallback_chain(c: &mut Criterion) {
    let runtime = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(runtime) => runtime,
        Err(e) => panic!("Tokio-Runtime konnte nicht erstellt werden: {}", e),
    };
    let mut group = c.benchmark_group("fallback_chain");

    for &place_count in &[100usize, 10_000] {
        let chain = GeocodeFallbackChain::new(&SessionOptions::default())
            .with_provider(Arc::new(build_gazetteer("Nord", place_count)))
            .with_provider(Arc::new(build_gazetteer("Sued", place_count)));

        group.bench_with_input(BenchmarkId::new("search", place_count), &chain, |b, chain| {
            b.iter(|| {
                let results = runtime.block_on(chain.search(black_box("ort 4")));
                black_box(results.map(|r| r.len()).unwrap_or(0))
            })
        });

        group.bench_with_input(BenchmarkId::new("locate", place_count), &chain, |b, chain| {
            b.iter(|| {
                let results = runtime.block_on(chain.locate(black_box(LngLat::new(3.25, 50.75))));
                black_box(results.map(|r| r.len()).unwrap_or(0))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_location_updates,
    bench_insert_remove,
    bench_fallback_chain
);
criterion_main!(benches);
