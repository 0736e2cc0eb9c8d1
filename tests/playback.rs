//! Session playback driven by a synthetic clock.

use graph_algo_visualizer::algo::Algorithm;
use graph_algo_visualizer::config::VisualizerConfig;
use graph_algo_visualizer::graph::{ColorToken, Edge, GraphKind, Node};
use graph_algo_visualizer::player::{ElementId, MemoryLogSink, PlayerState, RenderSurface};
use graph_algo_visualizer::session::{ExportFormat, Session};
use graph_algo_visualizer::Error;

#[derive(Default)]
struct Canvas {
	painted: Vec<(String, String)>,
	frames: Vec<(usize, usize)>,
}

impl RenderSurface for Canvas {
	fn highlight(&mut self, element: &ElementId, color: &str) {
		self.painted.push((element.to_string(), color.to_string()));
	}

	fn render(&mut self, nodes: &[Node], edges: &[Edge], _directed: bool) {
		self.frames.push((nodes.len(), edges.len()));
	}
}

fn session(kind: GraphKind, edges: &[(&str, &str, f64)]) -> Session {
	let mut session = Session::new(VisualizerConfig {
		kind,
		delay_ms: 100,
		..VisualizerConfig::default()
	});
	let store = session.store_mut();
	for &(from, to, weight) in edges {
		for id in [from, to] {
			if store.node(id).is_none() {
				store.add_node(id, None).unwrap();
			}
		}
		store.add_edge(from, to, Some(weight)).unwrap();
	}
	session
}

/// Ticks every `delay_ms` until the player leaves `Running`.
fn play_out(session: &mut Session, canvas: &mut Canvas, sink: &mut MemoryLogSink) -> f64 {
	let mut now = 0.0;
	while session.player_state() == PlayerState::Running {
		session.tick(now, canvas, sink);
		now += 100.0;
	}
	now
}

#[test]
fn shortest_path_playback_paints_the_path() {
	let kind = GraphKind {
		directed: true,
		weighted: true,
	};
	let mut session = session(kind, &[("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 5.0)]);
	let (mut canvas, mut sink) = (Canvas::default(), MemoryLogSink::default());

	session
		.run(Algorithm::Dijkstra, Some("A"), Some("C"), None, &mut canvas)
		.unwrap();
	play_out(&mut session, &mut canvas, &mut sink);

	assert_eq!(sink.lines.first().map(String::as_str), Some("Start node: A"));
	assert_eq!(
		sink.lines.last().map(String::as_str),
		Some("Shortest path: A -> B -> C with total cost 2")
	);
	let store = session.store();
	assert_eq!(store.edge("A", "B").unwrap().display_color, Some(ColorToken::Path));
	assert_eq!(store.edge("B", "C").unwrap().display_color, Some(ColorToken::Path));
	assert_ne!(store.edge("A", "C").unwrap().display_color, Some(ColorToken::Path));

	let palette = &session.config().palette;
	assert!(canvas
		.painted
		.contains(&("B->C".to_string(), palette.path.clone())));
}

#[test]
fn max_flow_playback_annotates_flow() {
	let mut session = session(
		GraphKind::MAX_FLOW,
		&[("s", "a", 3.0), ("a", "t", 2.0), ("s", "t", 1.0)],
	);
	let (mut canvas, mut sink) = (Canvas::default(), MemoryLogSink::default());

	session
		.run(Algorithm::MaxFlow, Some("s"), Some("t"), None, &mut canvas)
		.unwrap();
	play_out(&mut session, &mut canvas, &mut sink);

	assert_eq!(
		sink.lines.last().map(String::as_str),
		Some("Maximum flow from s to t: 3")
	);
	assert_eq!(session.store().edge("a", "t").unwrap().display_label(), "2/2");
	assert_eq!(session.store().node("s").unwrap().display_color, Some(ColorToken::Source));
	assert_eq!(session.store().node("t").unwrap().display_color, Some(ColorToken::Sink));
}

#[test]
fn cancel_then_replay() {
	let mut session = session(
		GraphKind::SPANNING_TREE,
		&[("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 3.0), ("C", "D", 4.0)],
	);
	let (mut canvas, mut sink) = (Canvas::default(), MemoryLogSink::default());

	let handle = session
		.run(Algorithm::Bfs, Some("A"), None, None, &mut canvas)
		.unwrap();
	assert_eq!(session.tick(0.0, &mut canvas, &mut sink), 1);
	assert_eq!(
		session
			.run(Algorithm::Kruskal, None, None, None, &mut canvas)
			.unwrap_err(),
		Error::AlreadyRunning
	);

	handle.cancel();
	assert_eq!(session.player_state(), PlayerState::Cancelled);
	assert_eq!(session.tick(1000.0, &mut canvas, &mut sink), 0);
	assert_eq!(sink.lines, ["Visited node A"]);

	// the half-finished traversal is wiped when the next run starts
	session
		.run(Algorithm::Kruskal, None, None, Some(10), &mut canvas)
		.unwrap();
	assert_eq!(session.store().node("A").unwrap().display_color, None);

	sink.lines.clear();
	play_out(&mut session, &mut canvas, &mut sink);
	assert_eq!(sink.lines.len(), 5);
	assert_eq!(
		sink.lines.last().map(String::as_str),
		Some("Minimum spanning tree: A - B (weight 1), B - C (weight 2), C - D (weight 4) (total weight 7)")
	);
	assert!(handle.is_cancelled());
}

#[test]
fn loading_a_document_stops_playback() {
	let mut session = session(GraphKind::SHORTEST_PATH, &[("x", "y", 2.0), ("y", "z", 3.0)]);
	let (mut canvas, mut sink) = (Canvas::default(), MemoryLogSink::default());
	let exported = session.export(ExportFormat::List).unwrap();

	session
		.run(Algorithm::Dfs, Some("x"), None, None, &mut canvas)
		.unwrap();
	session.tick(0.0, &mut canvas, &mut sink);
	session.load(&exported, &mut canvas).unwrap();

	assert_ne!(session.player_state(), PlayerState::Running);
	assert_eq!(session.tick(5000.0, &mut canvas, &mut sink), 0);
	assert_eq!(session.store().len(), 3);
	assert_eq!(session.store().node("x").unwrap().display_color, None);
	assert_eq!(canvas.frames.last(), Some(&(3, 2)));
	assert!(session.last_outcome().is_none());
}
