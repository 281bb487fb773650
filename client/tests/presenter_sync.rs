//! End-to-end synchronisation tests: presenters over a live model, URL
//! parameter store, and in-memory navigation history.
//!
//! Each test wires the real domain pieces together and substitutes only
//! the outermost surfaces, asserting that one interaction reprints every
//! affected surface with consistent state.

use std::sync::Arc;

use client::domain::ports::{Navigator, View};
use client::domain::wire::PointWire;
use client::domain::{
    BriefPresenter, BriefViewState, Error, FilterKind, FilterPresenter, FilterViewState,
    ListPresenter, ListViewState, OfferId, PointId, PointKind, SortKey, SortPresenter,
    SortViewState, TripModel, UrlParamsStore,
};
use client::outbound::{MemoryNavigator, MemoryScheduleGateway};
use client::test_support::{
    MutableClock, RecordingView, point_wire, sample_destination, sample_offer,
    sample_offer_group,
};

struct World {
    model: Arc<TripModel>,
    store: Arc<UrlParamsStore>,
    navigator: Arc<MemoryNavigator>,
}

/// A loaded model over the given points, with Geneva/Chamonix/Paris as
/// destinations and two taxi offers, clocked at noon on 18 March 2026.
async fn world_with(points: Vec<PointWire>) -> World {
    let gateway = MemoryScheduleGateway::new(
        points,
        vec![
            sample_destination("d-1", "Geneva"),
            sample_destination("d-2", "Chamonix"),
            sample_destination("d-3", "Paris"),
        ],
        vec![sample_offer_group(
            PointKind::Taxi,
            vec![
                sample_offer("o-1", "Upgrade to a business class", 50),
                sample_offer("o-2", "Choose the radio station", 10),
            ],
        )],
    );
    let clock = Arc::new(MutableClock::new(
        "2026-03-18T12:00:00Z".parse().expect("reference time"),
    ));
    let model = Arc::new(TripModel::new(Arc::new(gateway), clock));
    model.load().await.expect("load");

    let navigator = Arc::new(MemoryNavigator::new());
    let store = Arc::new(UrlParamsStore::new(
        Arc::clone(&navigator) as Arc<dyn Navigator>
    ));
    World {
        model,
        store,
        navigator,
    }
}

/// Four taxi legs: one past in Geneva, one underway in Chamonix, one
/// future in Chamonix, one future in Paris. Two legs carry offers.
fn itinerary() -> Vec<PointWire> {
    let mut past = point_wire(
        "p-1",
        "d-1",
        "2026-03-17T10:00:00Z",
        "2026-03-17T11:00:00Z",
    );
    past.offers = vec![OfferId::new("o-1")];
    let present = point_wire(
        "p-2",
        "d-2",
        "2026-03-18T11:00:00Z",
        "2026-03-18T13:00:00Z",
    );
    let mut future = point_wire(
        "p-3",
        "d-2",
        "2026-03-19T10:00:00Z",
        "2026-03-19T12:00:00Z",
    );
    future.offers = vec![OfferId::new("o-1"), OfferId::new("o-2")];
    let last = point_wire(
        "p-4",
        "d-3",
        "2026-03-20T09:00:00Z",
        "2026-03-20T10:00:00Z",
    );
    vec![past, present, future, last]
}

fn selected_filter(state: &FilterViewState) -> Option<FilterKind> {
    state
        .options
        .iter()
        .find(|option| option.is_selected)
        .map(|option| option.value)
}

fn selected_sort(state: &SortViewState) -> Option<SortKey> {
    state
        .options
        .iter()
        .find(|option| option.is_selected)
        .map(|option| option.value)
}

// ---------------------------------------------------------------------------
// URL-driven re-rendering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn selecting_a_filter_pushes_the_url_and_rerenders() {
    let world = world_with(itinerary()).await;
    let filter_view = Arc::new(RecordingView::<FilterViewState>::new());
    let list_view = Arc::new(RecordingView::<ListViewState>::new());
    let filter = FilterPresenter::mount(
        Arc::clone(&world.model),
        Arc::clone(&world.store),
        Arc::clone(&filter_view) as Arc<dyn View<FilterViewState>>,
    )
    .expect("mount filter");
    let _list = ListPresenter::mount(
        Arc::clone(&world.model),
        Arc::clone(&world.store),
        Arc::clone(&list_view) as Arc<dyn View<ListViewState>>,
    )
    .expect("mount list");

    let initial = filter_view.last().expect("initial render");
    assert_eq!(selected_filter(&initial), Some(FilterKind::Everything));
    assert_eq!(list_view.last().expect("initial render").items.len(), 4);

    filter.select_filter(FilterKind::Future).expect("select");

    assert_eq!(world.navigator.query().expect("query"), "filter=future");
    assert_eq!(
        selected_filter(&filter_view.last().expect("rerender")),
        Some(FilterKind::Future)
    );
    let now: chrono::DateTime<chrono::Utc> = "2026-03-18T12:00:00Z".parse().expect("now");
    let list_state = list_view.last().expect("rerender");
    assert_eq!(list_state.items.len(), 2);
    assert!(
        list_state
            .items
            .iter()
            .all(|item| item.start_date_time > now)
    );
}

#[tokio::test]
async fn empty_windows_disable_their_filter_options() {
    let world = world_with(vec![point_wire(
        "p-1",
        "d-1",
        "2026-03-19T10:00:00Z",
        "2026-03-19T11:00:00Z",
    )])
    .await;
    let view = Arc::new(RecordingView::<FilterViewState>::new());
    let _filter = FilterPresenter::mount(
        Arc::clone(&world.model),
        Arc::clone(&world.store),
        Arc::clone(&view) as Arc<dyn View<FilterViewState>>,
    )
    .expect("mount filter");

    let state = view.last().expect("initial render");
    let flags: Vec<(FilterKind, bool)> = state
        .options
        .iter()
        .map(|option| (option.value, option.is_disabled))
        .collect();
    assert_eq!(
        flags,
        vec![
            (FilterKind::Everything, false),
            (FilterKind::Future, false),
            (FilterKind::Present, true),
            (FilterKind::Past, true),
        ]
    );
}

#[tokio::test]
async fn reserved_sort_keys_render_disabled() {
    let world = world_with(itinerary()).await;
    let view = Arc::new(RecordingView::<SortViewState>::new());
    let sort = SortPresenter::mount(
        Arc::clone(&world.model),
        Arc::clone(&world.store),
        Arc::clone(&view) as Arc<dyn View<SortViewState>>,
    )
    .expect("mount sort");

    let state = view.last().expect("initial render");
    let flags: Vec<(SortKey, bool)> = state
        .options
        .iter()
        .map(|option| (option.value, option.is_disabled))
        .collect();
    assert_eq!(
        flags,
        vec![
            (SortKey::Day, false),
            (SortKey::Event, true),
            (SortKey::Time, false),
            (SortKey::Price, false),
            (SortKey::Offers, true),
        ]
    );
    assert_eq!(selected_sort(&state), Some(SortKey::Day));

    sort.select_sort(SortKey::Price).expect("select");

    assert_eq!(world.navigator.query().expect("query"), "sort=price");
    assert_eq!(
        selected_sort(&view.last().expect("rerender")),
        Some(SortKey::Price)
    );
}

// ---------------------------------------------------------------------------
// Model-driven re-rendering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn toggling_a_favourite_rerenders_through_the_busy_bracket() {
    let world = world_with(itinerary()).await;
    let view = Arc::new(RecordingView::<ListViewState>::new());
    let list = ListPresenter::mount(
        Arc::clone(&world.model),
        Arc::clone(&world.store),
        Arc::clone(&view) as Arc<dyn View<ListViewState>>,
    )
    .expect("mount list");

    list.toggle_favorite(&PointId::new("p-2"))
        .await
        .expect("toggle");

    let states = view.states();
    assert_eq!(states.len(), 3, "initial, busy, and idle renders");

    let favourite = |state: &ListViewState| {
        state
            .items
            .iter()
            .find(|item| item.id == PointId::new("p-2"))
            .map(|item| item.is_favorite)
    };
    let busy = states.get(1).expect("busy render");
    assert!(busy.is_busy);
    assert_eq!(favourite(busy), Some(false));

    let idle = states.get(2).expect("idle render");
    assert!(!idle.is_busy);
    assert_eq!(favourite(idle), Some(true));
}

#[tokio::test]
async fn the_brief_summarises_route_dates_and_cost() {
    let world = world_with(itinerary()).await;
    let view = Arc::new(RecordingView::<BriefViewState>::new());
    let _brief = BriefPresenter::mount(
        Arc::clone(&world.model),
        Arc::clone(&world.store),
        Arc::clone(&view) as Arc<dyn View<BriefViewState>>,
    )
    .expect("mount brief");

    let state = view.last().expect("initial render");
    assert_eq!(state.route, "Geneva — Chamonix — Paris");
    assert_eq!(state.dates, "17 — 20 Mar");
    assert_eq!(state.total_cost, 510);
}

#[tokio::test]
async fn mounting_fails_loudly_on_dangling_references() {
    let world = world_with(vec![point_wire(
        "p-1",
        "d-404",
        "2026-03-18T10:00:00Z",
        "2026-03-18T11:00:00Z",
    )])
    .await;
    let view = Arc::new(RecordingView::<ListViewState>::new());

    let error = ListPresenter::mount(
        Arc::clone(&world.model),
        Arc::clone(&world.store),
        Arc::clone(&view) as Arc<dyn View<ListViewState>>,
    )
    .expect_err("mount must fail");

    assert!(matches!(error, Error::UnknownDestination { .. }));
}

// ---------------------------------------------------------------------------
// History semantics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn url_patches_preserve_the_untouched_key() {
    let world = world_with(itinerary()).await;
    let filter_view = Arc::new(RecordingView::<FilterViewState>::new());
    let sort_view = Arc::new(RecordingView::<SortViewState>::new());
    let filter = FilterPresenter::mount(
        Arc::clone(&world.model),
        Arc::clone(&world.store),
        Arc::clone(&filter_view) as Arc<dyn View<FilterViewState>>,
    )
    .expect("mount filter");
    let sort = SortPresenter::mount(
        Arc::clone(&world.model),
        Arc::clone(&world.store),
        Arc::clone(&sort_view) as Arc<dyn View<SortViewState>>,
    )
    .expect("mount sort");

    filter.select_filter(FilterKind::Future).expect("select");
    sort.select_sort(SortKey::Price).expect("select");
    assert_eq!(
        world.navigator.query().expect("query"),
        "filter=future&sort=price"
    );

    filter.select_filter(FilterKind::Past).expect("select");
    assert_eq!(
        world.navigator.query().expect("query"),
        "filter=past&sort=price"
    );
}

#[tokio::test]
async fn history_navigation_resyncs_every_surface() {
    let world = world_with(itinerary()).await;
    let filter_view = Arc::new(RecordingView::<FilterViewState>::new());
    let sort_view = Arc::new(RecordingView::<SortViewState>::new());
    let filter = FilterPresenter::mount(
        Arc::clone(&world.model),
        Arc::clone(&world.store),
        Arc::clone(&filter_view) as Arc<dyn View<FilterViewState>>,
    )
    .expect("mount filter");
    let sort = SortPresenter::mount(
        Arc::clone(&world.model),
        Arc::clone(&world.store),
        Arc::clone(&sort_view) as Arc<dyn View<SortViewState>>,
    )
    .expect("mount sort");

    filter.select_filter(FilterKind::Future).expect("select");
    sort.select_sort(SortKey::Price).expect("select");

    // Back to "filter=future": the sort falls back to its default.
    assert!(world.navigator.back().expect("back"));
    world.store.sync_external().expect("sync");
    assert_eq!(
        selected_filter(&filter_view.last().expect("rerender")),
        Some(FilterKind::Future)
    );
    assert_eq!(
        selected_sort(&sort_view.last().expect("rerender")),
        Some(SortKey::Day)
    );

    // Back to the empty query: everything returns to defaults.
    assert!(world.navigator.back().expect("back"));
    world.store.sync_external().expect("sync");
    assert_eq!(
        selected_filter(&filter_view.last().expect("rerender")),
        Some(FilterKind::Everything)
    );

    // Forward replays the first selection.
    assert!(world.navigator.forward().expect("forward"));
    world.store.sync_external().expect("sync");
    assert_eq!(
        selected_filter(&filter_view.last().expect("rerender")),
        Some(FilterKind::Future)
    );
}
