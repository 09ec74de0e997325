use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use trip_planner::geocode::ChainEntry;
use trip_planner::{
    GazetteerProvider, GeocodeFallbackChain, GeocodingProvider, LngLat, Place, ReverseResult,
    SearchResult, ServiceError, SessionOptions,
};

/// Provider mit festen Antworten, zählt Aufrufe.
struct StaticProvider {
    name: &'static str,
    forward: Vec<SearchResult>,
    reverse: Vec<ReverseResult>,
    calls: AtomicUsize,
}

impl StaticProvider {
    fn answering(name: &'static str, forward: Vec<SearchResult>) -> Arc<Self> {
        Arc::new(Self {
            name,
            forward,
            reverse: Vec::new(),
            calls: AtomicUsize::new(0),
        })
    }

    fn locating(name: &'static str, reverse: Vec<ReverseResult>) -> Arc<Self> {
        Arc::new(Self {
            name,
            forward: Vec::new(),
            reverse,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingProvider for StaticProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn forward(&self, _query: &str) -> Result<Vec<SearchResult>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.forward.clone())
    }

    async fn reverse(&self, _coordinate: LngLat) -> Result<Vec<ReverseResult>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reverse.clone())
    }
}

struct FailingProvider;

#[async_trait]
impl GeocodingProvider for FailingProvider {
    fn name(&self) -> &str {
        "offline"
    }

    async fn forward(&self, _query: &str) -> Result<Vec<SearchResult>, ServiceError> {
        Err(ServiceError::Network("timeout".into()))
    }

    async fn reverse(&self, _coordinate: LngLat) -> Result<Vec<ReverseResult>, ServiceError> {
        Err(ServiceError::Network("timeout".into()))
    }
}

fn hit(description: &str, kind: &str, score: f64) -> SearchResult {
    SearchResult {
        description: description.into(),
        coordinate: LngLat::new(4.0, 51.0),
        kind: kind.into(),
        score,
    }
}

fn near(description: &str, distance: f64) -> ReverseResult {
    ReverseResult {
        description: description.into(),
        coordinate: LngLat::new(4.0, 51.0),
        distance,
    }
}

#[tokio::test]
async fn test_coarse_match_falls_through_to_next_provider() {
    let a = StaticProvider::answering("a", vec![hit("Gemeinde Gent", "commune", 0.4)]);
    let b = StaticProvider::answering("b", vec![hit("Gent, Korenmarkt", "street", 0.9)]);
    let chain = GeocodeFallbackChain::new(&SessionOptions::default())
        .with_provider(a.clone())
        .with_provider(b.clone());

    let results = chain.search("gent").await.expect("Suche erfolgreich");

    assert_eq!(a.calls(), 1);
    assert_eq!(b.calls(), 1);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].description, "Gent, Korenmarkt");
    assert_eq!(results[1].kind, "commune");
}

#[tokio::test]
async fn test_confident_match_stops_chain() {
    let a = StaticProvider::answering("a", vec![hit("Korenmarkt", "street", 0.95)]);
    let b = StaticProvider::answering("b", vec![hit("Anderswo", "street", 0.99)]);
    let chain = GeocodeFallbackChain::new(&SessionOptions::default())
        .with_provider(a.clone())
        .with_provider(b.clone());

    let results = chain.search("korenmarkt").await.expect("Suche erfolgreich");

    assert_eq!(b.calls(), 0);
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_results_truncated_to_max_and_sorted() {
    let many: Vec<SearchResult> = (0..8)
        .map(|i| hit(&format!("Treffer {i}"), "commune", i as f64 / 10.0))
        .collect();
    let options = SessionOptions {
        max_results: 3,
        ..SessionOptions::default()
    };
    let chain =
        GeocodeFallbackChain::new(&options).with_provider(StaticProvider::answering("a", many));

    let results = chain.search("x").await.expect("Suche erfolgreich");

    assert_eq!(results.len(), 3);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(results[0].description, "Treffer 7");
}

#[tokio::test]
async fn test_custom_merge_can_stop_early() {
    let a = StaticProvider::answering("a", vec![hit("Nur A", "commune", 0.1)]);
    let b = StaticProvider::answering("b", vec![hit("B", "street", 0.9)]);
    let stop = ChainEntry::new(a.clone()).with_merge(Arc::new(
        |merged: &mut Vec<SearchResult>, results: Vec<SearchResult>| {
            merged.extend(results);
            false
        },
    ));
    let chain = GeocodeFallbackChain::new(&SessionOptions::default())
        .with_entry(stop)
        .with_provider(b.clone());

    let results = chain.search("x").await.expect("Suche erfolgreich");

    assert_eq!(b.calls(), 0);
    assert_eq!(results[0].description, "Nur A");
}

#[tokio::test]
async fn test_failing_provider_is_skipped() {
    let b = StaticProvider::answering("b", vec![hit("B", "street", 0.9)]);
    let chain = GeocodeFallbackChain::new(&SessionOptions::default())
        .with_provider(Arc::new(FailingProvider))
        .with_provider(b);

    let results = chain.search("x").await.expect("Zweiter Provider antwortet");

    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_only_failing_providers_return_error() {
    let chain = GeocodeFallbackChain::new(&SessionOptions::default())
        .with_provider(Arc::new(FailingProvider));

    let result = chain.search("x").await;

    assert!(matches!(result, Err(ServiceError::Network(_))));
}

#[tokio::test]
async fn test_reverse_stops_at_first_non_empty_by_default() {
    let a = StaticProvider::locating("a", Vec::new());
    let b = StaticProvider::locating("b", vec![near("Markt", 30.0)]);
    let c = StaticProvider::locating("c", vec![near("Weiter weg", 10.0)]);
    let chain = GeocodeFallbackChain::new(&SessionOptions::default())
        .with_provider(a.clone())
        .with_provider(b.clone())
        .with_provider(c.clone());

    let results = chain.locate(LngLat::new(4.0, 51.0)).await.expect("Rückwärtssuche");

    assert_eq!(a.calls(), 1);
    assert_eq!(c.calls(), 0);
    assert_eq!(results[0].description, "Markt");
}

#[tokio::test]
async fn test_reverse_far_results_get_coordinate_label() {
    let a = StaticProvider::locating("a", vec![near("Weit", 900.0), near("Nah", 40.0)]);
    let chain = GeocodeFallbackChain::new(&SessionOptions::default()).with_provider(a);
    let query = LngLat::new(4.0, 51.0);

    let results = chain.locate(query).await.expect("Rückwärtssuche");

    assert_eq!(results[0].description, "Nah");
    assert_eq!(results[1].description, query.label());
}

#[tokio::test]
async fn test_stop_when_near_continues_past_far_results() {
    let a = StaticProvider::locating("a", vec![near("Weit", 900.0)]);
    let b = StaticProvider::locating("b", vec![near("Nah", 20.0)]);
    let chain = GeocodeFallbackChain::new(&SessionOptions::default())
        .with_entry(ChainEntry::new(a).stop_when_near())
        .with_provider(b.clone());

    let results = chain.locate(LngLat::new(4.0, 51.0)).await.expect("Rückwärtssuche");

    assert_eq!(b.calls(), 1);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].description, "Nah");
}

#[tokio::test]
async fn test_chain_of_gazetteers_as_provider() {
    let streets = GazetteerProvider::new(
        "streets",
        vec![Place {
            name: "Gent".into(),
            coordinate: LngLat::new(3.7174, 51.0543),
            kind: "commune".into(),
            importance: 0.4,
        }],
    );
    let landmarks = GazetteerProvider::new(
        "landmarks",
        vec![Place {
            name: "Gent Sint-Pieters".into(),
            coordinate: LngLat::new(3.7106, 51.0359),
            kind: "station".into(),
            importance: 1.0,
        }],
    );
    let chain: Arc<dyn GeocodingProvider> = Arc::new(
        GeocodeFallbackChain::new(&SessionOptions::default())
            .with_provider(Arc::new(streets))
            .with_provider(Arc::new(landmarks)),
    );

    let results = chain.forward("gent").await.expect("Suche erfolgreich");

    assert_eq!(chain.name(), "fallback-chain");
    assert_eq!(results[0].description, "Gent Sint-Pieters");
}
