use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{Engine, Services};
use crate::{
    api::{DestinationAPI, DetourParams, LocationAPI, RouteAPI, ViewAPI},
    entities::{
        estimate::{DETOUR_FACTOR, WALKING_SPEED},
        Category, Coordinates, Destination, OpeningHours, Route, ViewState,
    },
    error::{upstream_error, Error},
    external::{
        CurationRequest, CurationService, DetourRouteRequest, ElevationService, FixedPosition,
        RoutingService, WalkingRouteRequest,
    },
    map::{CommandQueue, Layout, MapCommand},
};

const STYLE_URL: &str = "https://tiles.example.com/style.json";

#[derive(Default)]
struct Routing {
    walking: Mutex<Vec<WalkingRouteRequest>>,
    detours: Mutex<Vec<DetourRouteRequest>>,
    results: Mutex<VecDeque<Result<Route, Error>>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl Routing {
    fn respond(&self, result: Result<Route, Error>) {
        self.results.lock().unwrap().push_back(result);
    }

    fn walking_calls(&self) -> usize {
        self.walking.lock().unwrap().len()
    }

    fn next_result(&self) -> Result<Route, Error> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(route(1234.0)))
    }
}

#[async_trait]
impl RoutingService for Routing {
    async fn walking_route(&self, request: WalkingRouteRequest) -> Result<Route, Error> {
        self.walking.lock().unwrap().push(request);
        let result = self.next_result();

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        result
    }

    async fn detour_route(&self, request: DetourRouteRequest) -> Result<Route, Error> {
        self.detours.lock().unwrap().push(request);
        self.next_result()
    }
}

type Transform = fn(Vec<Destination>) -> Vec<Destination>;

struct Curation {
    calls: AtomicUsize,
    gate: Mutex<Option<Arc<Notify>>>,
    fail: Mutex<bool>,
    transform: Transform,
}

impl Curation {
    fn new(transform: Transform) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            gate: Mutex::new(None),
            fail: Mutex::new(false),
            transform,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CurationService for Curation {
    async fn curate(&self, request: CurationRequest) -> Result<Vec<Destination>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if *self.fail.lock().unwrap() {
            return Err(upstream_error());
        }

        Ok((self.transform)(request.destinations))
    }
}

struct Elevation(Option<f64>);

#[async_trait]
impl ElevationService for Elevation {
    async fn point_elevation(&self, _: Coordinates) -> Result<Option<f64>, Error> {
        match self.0 {
            Some(value) => Ok(Some(value)),
            None => Err(upstream_error()),
        }
    }
}

struct Harness {
    engine: Engine,
    routing: Arc<Routing>,
    curation: Arc<Curation>,
    queue: Arc<CommandQueue>,
}

fn route(distance: f64) -> Route {
    Route {
        distance: Some(distance),
        duration: Some(distance / WALKING_SPEED),
        geometry: vec![Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 0.009)],
        steps: vec![],
        is_estimate: false,
        elevation_gain: None,
        via: None,
    }
}

fn destination(id: &str, category: Category, lat: f64) -> Destination {
    Destination::new(
        id,
        id,
        category,
        Coordinates::new(0.0, lat),
        OpeningHours::default(),
    )
}

fn seed() -> Vec<Destination> {
    vec![
        destination("bar-far", Category::Bar, 0.009),
        destination("cafe-near", Category::Cafe, 0.001),
        destination("bar-mid", Category::Bar, 0.004),
        destination("cafe-far", Category::Cafe, 0.02),
        destination("bar-near", Category::Bar, 0.002),
    ]
}

fn identity(destinations: Vec<Destination>) -> Vec<Destination> {
    destinations
}

async fn harness_with(
    curation: Curation,
    elevation: Option<f64>,
    position: Option<Coordinates>,
) -> Harness {
    let routing = Arc::new(Routing::default());
    let curation = Arc::new(curation);
    let queue = Arc::new(CommandQueue::new());

    let services = Services {
        routing: routing.clone(),
        curation: curation.clone(),
        elevation: Arc::new(Elevation(elevation)),
        geolocation: Arc::new(FixedPosition::new(position)),
    };

    let engine = Engine::new(
        services,
        queue.clone(),
        STYLE_URL,
        seed(),
        false,
    )
    .await
    .unwrap();

    Harness {
        engine,
        routing,
        curation,
        queue,
    }
}

async fn harness() -> Harness {
    harness_with(Curation::new(identity), None, None).await
}

fn origin() -> Coordinates {
    Coordinates::new(0.0, 0.0)
}

/// Lets the background curation run finish.
async fn settle(h: &Harness) {
    for _ in 0..1000 {
        if !h.engine.snapshot().await.unwrap().flags.loading {
            return;
        }
        tokio::task::yield_now().await;
    }

    panic!("curation did not settle");
}

async fn located(h: &Harness, coordinates: Coordinates) -> ViewState {
    h.engine.update_location(coordinates).await.unwrap();
    settle(h).await;
    h.engine.snapshot().await.unwrap()
}

fn ids(destinations: &[Destination]) -> Vec<&str> {
    destinations.iter().map(|d| d.id.as_str()).collect()
}

#[tokio::test]
async fn map_initialization_failure_is_reported() {
    let services = Services {
        routing: Arc::new(Routing::default()),
        curation: Arc::new(Curation::new(identity)),
        elevation: Arc::new(Elevation(None)),
        geolocation: Arc::new(FixedPosition::default()),
    };

    let result = Engine::new(
        services,
        Arc::new(CommandQueue::new()),
        "::not a url::",
        seed(),
        false,
    )
    .await;

    match result {
        Err(err) => assert!(err.is_map_initialization_error()),
        Ok(_) => panic!("expected map initialization to fail"),
    }
}

#[tokio::test]
async fn startup_renders_seed_markers() {
    let h = harness().await;
    let commands = h.queue.drain();

    assert!(matches!(commands[0], MapCommand::SetStyle { .. }));
    let markers = commands
        .iter()
        .filter(|c| matches!(c, MapCommand::AddMarker { .. }))
        .count();
    assert_eq!(markers, 5);
    assert!(matches!(
        commands.last(),
        Some(MapCommand::FlyTo { center, .. }) if *center == crate::seed::DEFAULT_CENTER
    ));
}

#[tokio::test]
async fn location_update_attaches_scaled_estimates() {
    let h = harness().await;

    let returned = h.engine.update_location(origin()).await.unwrap();
    assert_eq!(returned.user_location, Some(origin()));

    settle(&h).await;
    let state = h.engine.snapshot().await.unwrap();

    assert_eq!(h.curation.calls(), 1);
    assert!(!state.flags.loading);

    for d in &state.destinations {
        let route = d.route.as_ref().unwrap();
        let expected = origin().distance_to(&d.coordinates) * DETOUR_FACTOR;

        assert!(route.is_estimate);
        assert!((route.distance.unwrap() - expected).abs() < 1e-9);
        assert!((route.duration.unwrap() - expected / WALKING_SPEED).abs() < 1e-9);
    }
}

#[tokio::test]
async fn curated_list_is_sorted_with_missing_distances_last() {
    fn scramble(mut destinations: Vec<Destination>) -> Vec<Destination> {
        destinations.reverse();
        if let Some(route) = destinations
            .iter_mut()
            .find(|d| d.id == "cafe-near")
            .and_then(|d| d.route.as_mut())
        {
            route.distance = None;
        }
        destinations
    }

    let h = harness_with(Curation::new(scramble), None, None).await;

    let state = located(&h, origin()).await;

    assert_eq!(
        ids(&state.destinations),
        vec!["bar-near", "bar-mid", "bar-far", "cafe-far", "cafe-near"]
    );
}

#[tokio::test]
async fn small_moves_leave_the_list_alone() {
    let h = harness().await;

    let before = located(&h, origin()).await;
    let after = located(&h, Coordinates::new(0.0, 0.0001)).await;

    assert_eq!(h.curation.calls(), 1);
    assert_eq!(before.destinations, after.destinations);
    assert_eq!(after.user_location, Some(Coordinates::new(0.0, 0.0001)));
}

#[tokio::test]
async fn location_writes_return_while_curation_is_pending() {
    let gate = Arc::new(Notify::new());
    let curation = Curation::new(identity);
    *curation.gate.lock().unwrap() = Some(gate.clone());

    let h = harness_with(curation, None, None).await;

    let state = h.engine.update_location(origin()).await.unwrap();
    assert!(state.flags.loading);

    // the background run is now parked on the gate
    tokio::task::yield_now().await;

    let state = h
        .engine
        .update_location(Coordinates::new(0.0, 0.01))
        .await
        .unwrap();
    assert!(state.flags.loading);
    assert_eq!(state.user_location, Some(Coordinates::new(0.0, 0.01)));

    h.engine
        .update_location(Coordinates::new(0.0, 0.02))
        .await
        .unwrap();
    let state = h.engine.update_elevation(Some(30.0)).await.unwrap();
    assert_eq!(state.user_elevation, Some(30.0));

    gate.notify_one();
    settle(&h).await;

    assert_eq!(h.curation.calls(), 1);

    // the guard is released once the first run settles
    let state = located(&h, Coordinates::new(0.0, 0.03)).await;
    assert_eq!(h.curation.calls(), 2);
    assert!(!state.flags.loading);
}

#[tokio::test]
async fn failed_curation_keeps_list_and_retries_later() {
    let h = harness().await;
    *h.curation.fail.lock().unwrap() = true;

    let state = located(&h, origin()).await;

    assert_eq!(h.curation.calls(), 1);
    assert!(!state.flags.loading);
    assert!(state.destinations.iter().all(|d| d.route.is_none()));

    *h.curation.fail.lock().unwrap() = false;
    let state = located(&h, Coordinates::new(0.0, 0.00001)).await;

    assert_eq!(h.curation.calls(), 2);
    assert!(state.destinations.iter().all(|d| d.route.is_some()));
}

#[tokio::test]
async fn selecting_an_estimate_issues_one_routing_request() {
    let h = harness().await;
    located(&h, origin()).await;
    h.queue.drain();

    let selected = h
        .engine
        .select_destination("bar-far".into())
        .await
        .unwrap();

    assert_eq!(h.routing.walking_calls(), 1);
    let request = h.routing.walking.lock().unwrap()[0].clone();
    assert_eq!(request.origin, origin());
    assert_eq!(request.destination, Coordinates::new(0.0, 0.009));

    let route = selected.route.unwrap();
    assert!(!route.is_estimate);
    assert_eq!(route.distance, Some(1234.0));

    let state = h.engine.snapshot().await.unwrap();
    assert_eq!(state.selected.as_ref().unwrap().route_distance(), Some(1234.0));

    let commands = h.queue.drain();
    assert!(commands
        .iter()
        .any(|c| matches!(c, MapCommand::FlyTo { .. })));
    assert!(commands.iter().any(|c| matches!(
        c,
        MapCommand::FitBounds { padding, .. } if *padding == Layout::Desktop.padding()
    )));

    // the route is now authoritative
    h.engine
        .select_destination("bar-far".into())
        .await
        .unwrap();
    assert_eq!(h.routing.walking_calls(), 1);
}

#[tokio::test]
async fn routed_selection_resorts_the_list() {
    let h = harness().await;
    located(&h, origin()).await;

    h.routing.respond(Ok(route(5000.0)));
    h.engine
        .select_destination("bar-far".into())
        .await
        .unwrap();

    let state = h.engine.snapshot().await.unwrap();
    assert_eq!(
        ids(&state.destinations),
        vec!["cafe-near", "bar-near", "bar-mid", "cafe-far", "bar-far"]
    );
    assert_eq!(state.selected.unwrap().route_distance(), Some(5000.0));
}

#[tokio::test]
async fn unrouted_destination_is_routed_and_list_stays_sorted() {
    let h = harness().await;
    located(&h, origin()).await;

    // ~1000 m away, no prior authoritative route
    h.routing.respond(Ok(route(5000.0)));
    h.engine
        .select_destination("bar-far".into())
        .await
        .unwrap();
    assert_eq!(h.routing.walking_calls(), 1);

    // moving re-estimates and re-sorts every destination
    let state = located(&h, Coordinates::new(0.0, 0.0005)).await;
    let distances: Vec<f64> = state
        .destinations
        .iter()
        .map(|d| d.route_distance().unwrap())
        .collect();
    let mut sorted = distances.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(distances, sorted);

    let selected = state.selected.unwrap();
    assert_eq!(selected.id, "bar-far");
    assert!(selected.route.unwrap().is_estimate);
}

#[tokio::test]
async fn failed_routing_keeps_the_estimate() {
    let h = harness().await;
    let estimate = located(&h, origin())
        .await
        .destinations
        .into_iter()
        .find(|d| d.id == "bar-mid")
        .unwrap()
        .route;

    h.routing.respond(Err(upstream_error()));
    let selected = h
        .engine
        .select_destination("bar-mid".into())
        .await
        .unwrap();

    assert_eq!(h.routing.walking_calls(), 1);
    assert_eq!(selected.route, estimate);

    let state = h.engine.snapshot().await.unwrap();
    assert_eq!(state.selected.unwrap().route, estimate);
}

#[tokio::test]
async fn selection_without_location_does_not_route() {
    let h = harness().await;

    let selected = h
        .engine
        .select_destination("cafe-near".into())
        .await
        .unwrap();

    assert_eq!(h.routing.walking_calls(), 0);
    assert!(selected.route.is_none());
    assert!(h
        .engine
        .select_destination("missing".into())
        .await
        .unwrap_err()
        .is_invalid_input_error());
}

#[tokio::test]
async fn stale_route_response_does_not_steal_selection() {
    let h = harness().await;
    located(&h, origin()).await;

    let gate = Arc::new(Notify::new());
    *h.routing.gate.lock().unwrap() = Some(gate.clone());
    h.routing.respond(Ok(route(900.0)));
    h.routing.respond(Ok(route(300.0)));

    let first = h.engine.select_destination("bar-far".into());
    let second = async {
        let selected = h
            .engine
            .select_destination("bar-near".into())
            .await
            .unwrap();
        gate.notify_one();
        selected
    };

    let (first, second) = futures::join!(first, second);
    assert_eq!(first.unwrap().route_distance(), Some(900.0));
    assert_eq!(second.route_distance(), Some(300.0));

    let state = h.engine.snapshot().await.unwrap();
    let selected = state.selected.as_ref().unwrap();
    assert_eq!(selected.id, "bar-near");
    assert_eq!(selected.route_distance(), Some(300.0));

    let far = state.destinations.iter().find(|d| d.id == "bar-far").unwrap();
    assert_eq!(far.route_distance(), Some(900.0));
}

#[tokio::test]
async fn filter_to_bars() {
    let h = harness().await;
    h.engine
        .select_destination("cafe-near".into())
        .await
        .unwrap();
    h.queue.drain();

    let list = h.engine.filter_category(Category::Bar).await.unwrap();

    assert_eq!(list.len(), 3);
    assert!(list.iter().all(|d| d.category == Category::Bar));

    let state = h.engine.snapshot().await.unwrap();
    assert!(state.selected.is_none());
    assert_eq!(state.category, Some(Category::Bar));

    let removed = h
        .queue
        .drain()
        .into_iter()
        .filter(|c| matches!(c, MapCommand::RemoveMarker { .. }))
        .count();
    assert_eq!(removed, 2);

    let list = h.engine.clear_filter().await.unwrap();
    assert_eq!(list.len(), 5);
}

#[tokio::test]
async fn filter_applied_during_curation_survives_it() {
    let gate = Arc::new(Notify::new());
    let curation = Curation::new(identity);
    *curation.gate.lock().unwrap() = Some(gate.clone());

    let h = harness_with(curation, None, None).await;

    let state = h.engine.update_location(origin()).await.unwrap();
    assert!(state.flags.loading);

    let list = h.engine.filter_category(Category::Bar).await.unwrap();
    assert_eq!(list.len(), 3);

    gate.notify_one();
    settle(&h).await;

    let state = h.engine.snapshot().await.unwrap();
    assert_eq!(state.category, Some(Category::Bar));
    assert_eq!(
        ids(&state.destinations),
        vec!["bar-near", "bar-mid", "bar-far"]
    );
    assert!(state
        .destinations
        .iter()
        .all(|d| d.route.as_ref().map_or(false, |r| r.is_estimate)));

    // the first result was dropped and the filtered list curated again
    assert_eq!(h.curation.calls(), 2);
}

#[tokio::test]
async fn detour_replaces_route_and_reframes() {
    let h = harness().await;

    let params = DetourParams {
        target_distance: 2500.0,
        round_trip: true,
        scenic: true,
    };

    // no user location yet
    let err = h
        .engine
        .request_detour("bar-far".into(), params.clone())
        .await
        .unwrap_err();
    assert_eq!(err.code, 100);

    located(&h, origin()).await;
    h.engine
        .select_destination("bar-far".into())
        .await
        .unwrap();
    h.queue.drain();

    h.routing.respond(Ok(route(2500.0)));
    let updated = h
        .engine
        .request_detour("bar-far".into(), params)
        .await
        .unwrap();

    assert_eq!(updated.route_distance(), Some(2500.0));
    let request = h.routing.detours.lock().unwrap()[0].clone();
    assert_eq!(request.target_distance, 2500.0);
    assert!(request.round_trip && request.scenic);

    let state = h.engine.snapshot().await.unwrap();
    assert_eq!(state.selected.unwrap().route_distance(), Some(2500.0));
    assert!(h
        .queue
        .drain()
        .iter()
        .any(|c| matches!(c, MapCommand::FitBounds { .. })));
}

#[tokio::test]
async fn detour_resorts_the_list() {
    let h = harness().await;
    located(&h, origin()).await;

    let params = DetourParams {
        target_distance: 10.0,
        round_trip: false,
        scenic: false,
    };

    h.routing.respond(Ok(route(10.0)));
    h.engine
        .request_detour("cafe-far".into(), params)
        .await
        .unwrap();

    let state = h.engine.snapshot().await.unwrap();
    assert_eq!(
        ids(&state.destinations),
        vec!["cafe-far", "cafe-near", "bar-near", "bar-mid", "bar-far"]
    );
}

#[tokio::test]
async fn detour_validates_input_and_survives_failure() {
    let h = harness().await;
    located(&h, origin()).await;

    let bad = DetourParams {
        target_distance: -1.0,
        round_trip: false,
        scenic: false,
    };
    assert!(h
        .engine
        .request_detour("bar-far".into(), bad)
        .await
        .unwrap_err()
        .is_invalid_input_error());

    let params = DetourParams {
        target_distance: 1500.0,
        round_trip: false,
        scenic: false,
    };
    assert!(h
        .engine
        .request_detour("nope".into(), params.clone())
        .await
        .unwrap_err()
        .is_invalid_input_error());

    h.routing.respond(Err(upstream_error()));
    let unchanged = h
        .engine
        .request_detour("bar-far".into(), params)
        .await
        .unwrap();
    assert!(unchanged.route.unwrap().is_estimate);
}

#[tokio::test]
async fn elevations_feed_the_estimates() {
    let h = harness_with(Curation::new(identity), Some(50.0), None).await;

    let state = h.engine.snapshot().await.unwrap();
    assert!(state.destinations.iter().all(|d| d.elevation == Some(50.0)));

    let state = located(&h, origin()).await;
    assert_eq!(state.user_elevation, Some(50.0));
    assert!(state
        .destinations
        .iter()
        .all(|d| d.route.as_ref().unwrap().elevation_gain == Some(0.0)));
}

#[tokio::test]
async fn locate_and_recenter() {
    let h = harness().await;
    assert!(h.engine.recenter().await.is_err());

    // no configured position: state is left as is
    let state = h.engine.locate().await.unwrap();
    assert!(state.user_location.is_none());

    let with_position = harness_with(Curation::new(identity), None, Some(origin())).await;
    let state = with_position.engine.locate().await.unwrap();
    assert_eq!(state.user_location, Some(origin()));
    settle(&with_position).await;
    with_position.queue.drain();

    assert_eq!(with_position.engine.recenter().await.unwrap(), origin());
    assert!(matches!(
        with_position.queue.drain()[..],
        [MapCommand::FlyTo { .. }]
    ));
}

#[tokio::test]
async fn ui_flags() {
    let h = harness().await;

    let flags = h.engine.toggle_sidebar().await.unwrap();
    assert!(!flags.sidebar_open);

    let flags = h.engine.toggle_debug().await.unwrap();
    assert!(flags.debug);

    let flags = h.engine.toggle_debug().await.unwrap();
    assert!(!flags.debug);

    let flags = h.engine.set_layout(Layout::Mobile).await.unwrap();
    assert!(flags.mobile);
}

#[tokio::test]
async fn invalid_coordinates_are_rejected() {
    let h = harness().await;
    let err = h
        .engine
        .update_location(Coordinates::new(0.0, 95.0))
        .await
        .unwrap_err();
    assert!(err.is_invalid_input_error());
    assert_eq!(h.curation.calls(), 0);
}
