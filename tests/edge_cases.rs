use chronograph::compute::spatial::{nearest_sample, path_length};
use chronograph::compute::temporal::{common_intervals, resample_node};
use chronograph::{
    ChronoError, Config, Explorer, Graph, GraphBuilder, Interval, IntervalRecord, Point,
    RawDataset, Sample, Selection, Window, WindowState, derive_view,
};

fn record(t0: f64, t1: f64) -> IntervalRecord {
    IntervalRecord::new(t0, t1, Point::new(t0, 0.0), Point::new(t1, 0.0))
}

/// Test 1: Empty dataset
#[test]
fn test_empty_graph() {
    let explorer = Explorer::load(Graph::default(), Config::default()).unwrap();
    assert_eq!(explorer.window(), WindowState::Unset);

    let view = explorer.view();
    assert!(view.nodes.is_empty());
    assert!(view.edges.is_empty());
    assert!(view.movement.is_empty());
    assert_eq!(view.color_domain, (0.0, 0.0));
    assert!(view.age_domain.is_none());
    assert!(view.density.is_none());
}

/// Test 2: Window containing no samples
#[test]
fn test_window_without_samples() {
    let mut builder = GraphBuilder::new();
    builder.add_node_record("a", "a", record(0.0, 10.0)).unwrap();
    builder.add_node_record("a", "a", record(20.0, 30.0)).unwrap();
    let mut explorer =
        Explorer::load(builder.build(), Config::default().with_auto_pin_count(0)).unwrap();

    explorer.set_window(12.0, 18.0).unwrap();
    let view = explorer.view();
    assert!(view.nodes.is_empty());
    assert!(view.segments.is_empty());
    assert_eq!(view.score("a"), Some(0.0));
}

/// Test 3: Single surviving sample synthesizes a closing endpoint
#[test]
fn test_single_surviving_sample() {
    let mut builder = GraphBuilder::new();
    builder.add_node_record("a", "a", record(0.0, 10.0)).unwrap();
    let graph = builder.build();

    let window = Window::new(8.0, 12.0).unwrap();
    let node = resample_node(graph.node("a").unwrap(), Some(&window), false, 4).unwrap();

    // Survivor t=10 is paired with the original sample closest to t=12.
    assert_eq!(node.len(), 5);
    assert!(node.samples.iter().all(|s| s.time == 10.0));
    assert_eq!(node.samples.last().unwrap().age, 12.0);
}

/// Test 4: Zero-width records
#[test]
fn test_zero_width_records() {
    let mut builder = GraphBuilder::new();
    builder.add_node_record("a", "a", record(5.0, 5.0)).unwrap();
    builder.add_node_record("b", "b", record(0.0, 10.0)).unwrap();
    let graph = builder.build();

    let a = graph.node("a").unwrap();
    assert_eq!(a.age, 0.0);
    assert_eq!(path_length(&a.samples, None), 0.0);

    let common = common_intervals(&[a.intervals(), graph.node("b").unwrap().intervals()], None);
    assert!(common.is_empty());
}

/// Test 5: Invalid caller requests
#[test]
fn test_invalid_requests() {
    let mut builder = GraphBuilder::new();
    builder.add_node_record("a", "a", record(0.0, 10.0)).unwrap();
    let mut explorer = Explorer::load(builder.build(), Config::default()).unwrap();

    assert!(matches!(
        explorer.set_window(5.0, 1.0),
        Err(ChronoError::InvalidWindow { start, end }) if start == 5.0 && end == 1.0
    ));
    assert!(explorer.set_window(f64::NEG_INFINITY, 1.0).is_err());
    assert!(matches!(
        explorer.toggle_pin("nobody"),
        Err(ChronoError::UnknownEntity(_))
    ));
    assert!(explorer.set_resample_frequency(0).is_err());

    let mut builder = GraphBuilder::new();
    assert!(builder.add_node_record("x", "x", record(10.0, 0.0)).is_err());
    assert!(
        builder
            .add_node_record(
                "x",
                "x",
                IntervalRecord::new(0.0, f64::NAN, Point::new(0.0, 0.0), Point::new(0.0, 0.0)),
            )
            .is_err()
    );
    assert!(builder.add_edge_presence("e", "a", "b", (3.0, 1.0)).is_err());
}

/// Test 6: Window larger than the dataset is clamped
#[test]
fn test_window_clamped_to_extent() {
    let mut builder = GraphBuilder::new();
    builder.add_node_record("a", "a", record(10.0, 20.0)).unwrap();
    let mut explorer = Explorer::load(builder.build(), Config::default()).unwrap();

    explorer.set_window(-1000.0, 1000.0).unwrap();
    assert_eq!(
        explorer.window(),
        WindowState::Active(Window::new(10.0, 20.0).unwrap())
    );
}

/// Test 7: Dangling and self-referencing edges
#[test]
fn test_dangling_edges_are_dropped() {
    let json = r#"{
        "nodes": [{"id": "a", "position": ["[(0,10):(0,0,1,1)]"]}],
        "edges": [
            {"id": "e1", "source": "a", "target": "ghost", "presence": ["[1,2]"]},
            {"id": "e2", "source": "a", "target": "a", "presence": ["[1,2]"]}
        ]
    }"#;
    let graph = Graph::from_raw(&RawDataset::from_json(json).unwrap());
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
}

/// Test 8: Entirely malformed dataset
#[test]
fn test_malformed_dataset() {
    assert!(matches!(
        RawDataset::from_json("{\"nodes\": 7}"),
        Err(ChronoError::Json(_))
    ));

    let json = r#"{"nodes": [{"id": "a", "position": ["garbage", "[(1,0):(0,0,0,0)]"]}]}"#;
    let graph = Graph::from_raw(&RawDataset::from_json(json).unwrap());
    assert!(graph.is_empty());
}

/// Test 9: Nearest-sample ties resolve to the earlier sample
#[test]
fn test_nearest_sample_tie() {
    let samples = vec![
        Sample::new(0.0, Point::new(0.0, 0.0), 0.0),
        Sample::new(4.0, Point::new(4.0, 0.0), 4.0),
    ];
    assert_eq!(nearest_sample(&samples, 2.0).unwrap().time, 0.0);
}

/// Test 10: Records supplied out of order
#[test]
fn test_unordered_records_are_sorted() {
    let mut builder = GraphBuilder::new();
    builder.add_node_record("a", "a", record(20.0, 30.0)).unwrap();
    builder.add_node_record("a", "a", record(0.0, 10.0)).unwrap();
    let graph = builder.build();

    let node = graph.node("a").unwrap();
    assert_eq!(node.times().collect::<Vec<_>>(), vec![0.0, 10.0, 20.0, 30.0]);
    assert_eq!(
        node.intervals(),
        vec![Interval::new(0.0, 10.0), Interval::new(20.0, 30.0)]
    );
}

/// Test 11: Pure derivation leaves the source untouched
#[test]
fn test_derive_view_does_not_mutate_source() {
    let mut builder = GraphBuilder::new();
    builder.add_node_record("a", "a", record(0.0, 10.0)).unwrap();
    let graph = builder.build();
    let before = graph.clone();

    let selection = Selection::from_ids(graph.node_ids().cloned());
    let window = Window::new(2.0, 8.0).unwrap();
    let _ = derive_view(&graph, Some(&window), &selection, &Config::default());

    assert_eq!(graph, before);
}
