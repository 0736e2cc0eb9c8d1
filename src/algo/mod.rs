/*!
Algorithm engine.

Every algorithm is a pure function from a [`GraphSnapshot`] (plus endpoints)
to a [`Run`]: the ordered [`StepEvent`]s describing what it did, and its
final [`Outcome`]. Nothing here touches a store or a clock; pacing and
display are the job of the [`crate::player`].

Start and end ids are validated before any step is produced.
*/

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{ColorToken, GraphSnapshot, NodeId};

mod max_flow;
mod mst;
mod shortest_path;
mod traversal;
mod union_find;

pub use max_flow::edmonds_karp;
pub use mst::kruskal;
pub use shortest_path::dijkstra;
pub use traversal::{bfs, dfs};
pub use union_find::UnionFind;

/// Edge as referenced by step events.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRef {
	pub from: NodeId,
	pub to: NodeId,
	pub weight: f64,
}

impl fmt::Display for EdgeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} - {} (weight {})", self.from, self.to, self.weight)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
	Cycle,
}

/// Role of a node marked before the algorithm steps are played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointRole {
	Start,
	Target,
}

/// One observable algorithm step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepEvent {
	/// Traversal reached a node for the first time.
	Visit { node: NodeId },
	/// Dijkstra fixed the distance of a node.
	Settle { node: NodeId },
	/// Dijkstra improved the tentative distance of a node.
	Relax { node: NodeId, distance: f64 },
	/// Flow pushed along one edge of an augmenting path.
	Augment { from: NodeId, to: NodeId, delta: f64 },
	/// Kruskal accepted an edge into the tree.
	Include { edge: EdgeRef },
	/// Kruskal rejected an edge.
	Skip { edge: EdgeRef, reason: SkipReason },
	/// Start/source or target/sink marker.
	Endpoint { node: NodeId, role: EndpointRole },
	/// Edge on the final shortest path.
	PathEdge { from: NodeId, to: NodeId },
	/// Log-only summary line.
	Report { message: String },
}

/// What a step paints, if anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HighlightTarget<'a> {
	Node(&'a str),
	Edge(&'a str, &'a str),
}

impl StepEvent {
	/// Element and color this step paints.
	pub fn highlight(&self) -> Option<(HighlightTarget<'_>, ColorToken)> {
		use HighlightTarget::{Edge, Node};
		Some(match self {
			StepEvent::Visit { node } => (Node(node), ColorToken::Visited),
			StepEvent::Settle { node } => (Node(node), ColorToken::Settled),
			StepEvent::Relax { node, .. } => (Node(node), ColorToken::Frontier),
			StepEvent::Augment { from, to, .. } => (Edge(from, to), ColorToken::Flow),
			StepEvent::Include { edge } => (Edge(&edge.from, &edge.to), ColorToken::Tree),
			StepEvent::Skip { edge, .. } => (Edge(&edge.from, &edge.to), ColorToken::Rejected),
			StepEvent::Endpoint { node, role } => (
				Node(node),
				match role {
					EndpointRole::Start => ColorToken::Source,
					EndpointRole::Target => ColorToken::Sink,
				},
			),
			StepEvent::PathEdge { from, to } => (Edge(from, to), ColorToken::Path),
			StepEvent::Report { .. } => return None,
		})
	}
}

impl fmt::Display for StepEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			StepEvent::Visit { node } => write!(f, "Visited node {}", node),
			StepEvent::Settle { node } => write!(f, "Current node: {}", node),
			StepEvent::Relax { node, distance } => {
				write!(f, "Updated distance to node {}: {}", node, distance)
			}
			StepEvent::Augment { from, to, delta } => {
				write!(f, "Pushed {} units of flow along {} -> {}", delta, from, to)
			}
			StepEvent::Include { edge } => write!(f, "Added edge to spanning tree: {}", edge),
			StepEvent::Skip {
				edge,
				reason: SkipReason::Cycle,
			} => write!(f, "Skipped edge: {} - forms a cycle", edge),
			StepEvent::Endpoint {
				node,
				role: EndpointRole::Start,
			} => write!(f, "Start node: {}", node),
			StepEvent::Endpoint {
				node,
				role: EndpointRole::Target,
			} => write!(f, "Target node: {}", node),
			StepEvent::PathEdge { from, to } => write!(f, "Path edge: {} -> {}", from, to),
			StepEvent::Report { message } => f.write_str(message),
		}
	}
}

/// Shortest path result. `path` is `None` and `cost` infinite when unreachable.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPath {
	pub path: Option<Vec<NodeId>>,
	pub cost: f64,
}

/// Final result of a run.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
	Traversal { order: Vec<NodeId> },
	ShortestPath(ShortestPath),
	MaxFlow { source: NodeId, sink: NodeId, total: f64 },
	SpanningTree { edges: Vec<EdgeRef>, total_weight: f64 },
}

impl fmt::Display for Outcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Outcome::Traversal { order } => write!(f, "Visit order: {}", order.join(", ")),
			Outcome::ShortestPath(ShortestPath {
				path: Some(path),
				cost,
			}) => write!(f, "Shortest path: {} with total cost {}", path.join(" -> "), cost),
			Outcome::ShortestPath(ShortestPath { path: None, .. }) => {
				f.write_str("No path between the selected nodes")
			}
			Outcome::MaxFlow { source, sink, total } => {
				write!(f, "Maximum flow from {} to {}: {}", source, sink, total)
			}
			Outcome::SpanningTree {
				edges,
				total_weight,
			} => {
				let listed: Vec<String> = edges.iter().map(ToString::to_string).collect();
				write!(
					f,
					"Minimum spanning tree: {} (total weight {})",
					listed.join(", "),
					total_weight
				)
			}
		}
	}
}

/// Steps plus outcome of one algorithm invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
	pub steps: Vec<StepEvent>,
	pub outcome: Outcome,
}

impl Run {
	/// Steps to play back: endpoint markers, the algorithm steps, the shortest
	/// path highlight and a closing report line.
	pub fn playback_steps(&self) -> Vec<StepEvent> {
		let mut steps = Vec::with_capacity(self.steps.len() + 4);
		match &self.outcome {
			Outcome::MaxFlow { source, sink, .. } => {
				steps.push(StepEvent::Endpoint {
					node: source.clone(),
					role: EndpointRole::Start,
				});
				steps.push(StepEvent::Endpoint {
					node: sink.clone(),
					role: EndpointRole::Target,
				});
			}
			Outcome::ShortestPath(_) => {
				if let Some(StepEvent::Settle { node }) = self.steps.first() {
					steps.push(StepEvent::Endpoint {
						node: node.clone(),
						role: EndpointRole::Start,
					});
				}
			}
			_ => {}
		}
		steps.extend(self.steps.iter().cloned());
		if let Outcome::ShortestPath(ShortestPath {
			path: Some(path), ..
		}) = &self.outcome
		{
			steps.extend(path.windows(2).map(|w| StepEvent::PathEdge {
				from: w[0].clone(),
				to: w[1].clone(),
			}));
		}
		steps.push(StepEvent::Report {
			message: self.outcome.to_string(),
		});
		steps
	}
}

/// The five supported algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
	Dfs,
	Bfs,
	Dijkstra,
	MaxFlow,
	Kruskal,
}

impl Algorithm {
	pub const ALL: [Algorithm; 5] = [
		Algorithm::Dfs,
		Algorithm::Bfs,
		Algorithm::Dijkstra,
		Algorithm::MaxFlow,
		Algorithm::Kruskal,
	];

	pub fn name(self) -> &'static str {
		match self {
			Algorithm::Dfs => "Depth-first search",
			Algorithm::Bfs => "Breadth-first search",
			Algorithm::Dijkstra => "Dijkstra shortest path",
			Algorithm::MaxFlow => "Edmonds-Karp max flow",
			Algorithm::Kruskal => "Kruskal spanning tree",
		}
	}

	/// Stable key used in forms and config.
	pub fn key(self) -> &'static str {
		match self {
			Algorithm::Dfs => "dfs",
			Algorithm::Bfs => "bfs",
			Algorithm::Dijkstra => "dijkstra",
			Algorithm::MaxFlow => "max_flow",
			Algorithm::Kruskal => "kruskal",
		}
	}

	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|a| a.key() == key)
	}

	pub fn needs_start(self) -> bool {
		!matches!(self, Algorithm::Kruskal)
	}

	pub fn needs_end(self) -> bool {
		matches!(self, Algorithm::Dijkstra | Algorithm::MaxFlow)
	}

	/// Runs the algorithm. A missing start defaults to the first node; a
	/// missing end for a pairwise algorithm is reported as `UnknownNode("")`.
	pub fn run(self, graph: &GraphSnapshot, start: Option<&str>, end: Option<&str>) -> Result<Run> {
		if self == Algorithm::Kruskal {
			return Ok(kruskal(graph));
		}
		let start = match start {
			Some(s) => s,
			None => graph
				.nodes
				.first()
				.map(|n| n.id.as_str())
				.ok_or_else(|| Error::UnknownNode(String::new()))?,
		};
		match self {
			Algorithm::Dfs => dfs(graph, start),
			Algorithm::Bfs => bfs(graph, start),
			Algorithm::Dijkstra => dijkstra(graph, start, end.unwrap_or_default()),
			Algorithm::MaxFlow => edmonds_karp(graph, start, end.unwrap_or_default()),
			Algorithm::Kruskal => unreachable!(),
		}
	}
}

/// Fails with `UnknownNode` unless `id` is part of `graph`.
fn require_node(graph: &GraphSnapshot, id: &str) -> Result<()> {
	if graph.contains(id) {
		Ok(())
	} else {
		Err(Error::UnknownNode(id.into()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphKind, GraphStore};

	fn triangle() -> GraphSnapshot {
		let mut store = GraphStore::new(GraphKind::SHORTEST_PATH);
		for id in ["A", "B", "C"] {
			store.add_node(id, None).unwrap();
		}
		store.add_edge("A", "B", Some(1.0)).unwrap();
		store.add_edge("B", "C", Some(2.0)).unwrap();
		store.add_edge("A", "C", Some(5.0)).unwrap();
		store.snapshot()
	}

	#[test]
	fn test_run_defaults_start_to_first_node() {
		let run = Algorithm::Bfs.run(&triangle(), None, None).unwrap();
		assert_eq!(
			run.outcome,
			Outcome::Traversal {
				order: vec!["A".into(), "B".into(), "C".into()]
			}
		);
	}

	#[test]
	fn test_run_rejects_missing_endpoints() {
		let graph = triangle();
		assert_eq!(
			Algorithm::Dijkstra.run(&graph, Some("A"), None).unwrap_err(),
			Error::UnknownNode(String::new())
		);
		assert_eq!(
			Algorithm::MaxFlow.run(&graph, Some("Q"), Some("A")).unwrap_err(),
			Error::UnknownNode("Q".into())
		);
		assert_eq!(
			Algorithm::Dfs.run(&GraphSnapshot::default(), None, None).unwrap_err(),
			Error::UnknownNode(String::new())
		);
	}

	#[test]
	fn test_playback_steps_wrap_shortest_path() {
		let run = Algorithm::Dijkstra.run(&triangle(), Some("A"), Some("C")).unwrap();
		let steps = run.playback_steps();

		assert_eq!(
			steps.first(),
			Some(&StepEvent::Endpoint {
				node: "A".into(),
				role: EndpointRole::Start
			})
		);
		let path_edges: Vec<_> = steps
			.iter()
			.filter(|s| matches!(s, StepEvent::PathEdge { .. }))
			.collect();
		assert_eq!(path_edges.len(), 2);
		assert_eq!(
			steps.last().map(ToString::to_string),
			Some("Shortest path: A -> B -> C with total cost 3".to_string())
		);
	}

	#[test]
	fn test_algorithm_keys_round_trip() {
		for algorithm in Algorithm::ALL {
			assert_eq!(Algorithm::from_key(algorithm.key()), Some(algorithm));
		}
		assert!(!Algorithm::Kruskal.needs_start());
		assert!(Algorithm::MaxFlow.needs_end());
	}
}
