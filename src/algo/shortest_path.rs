//! Dijkstra's shortest path between two nodes.
//!
//! Uses a linear scan over the unvisited set instead of a heap: graphs are
//! small and the scan gives a stable tie-break (earliest node in snapshot order).

use super::{Outcome, Run, ShortestPath, StepEvent, require_node};
use crate::error::Result;
use crate::graph::GraphSnapshot;

/// Shortest path from `start` to `end`.
///
/// Undirected graphs relax every incident edge; directed graphs only follow
/// outgoing edges. Emits `Settle` once per round and `Relax` for every
/// improved distance, stopping as soon as `end` is settled.
pub fn dijkstra(graph: &GraphSnapshot, start: &str, end: &str) -> Result<Run> {
	require_node(graph, start)?;
	require_node(graph, end)?;

	let n = graph.nodes.len();
	let index = graph.index();
	let (s, t) = (index[start], index[end]);

	// (neighbor, weight) per node, in edge order
	let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
	for edge in &graph.edges {
		let (u, v) = (index[edge.from.as_str()], index[edge.to.as_str()]);
		adjacency[u].push((v, edge.weight));
		if !graph.kind.directed && u != v {
			adjacency[v].push((u, edge.weight));
		}
	}

	let mut distances = vec![f64::INFINITY; n];
	let mut previous: Vec<Option<usize>> = vec![None; n];
	let mut unvisited = vec![true; n];
	let mut steps = Vec::new();
	distances[s] = 0.0;

	let reached = loop {
		let current = (0..n)
			.filter(|&i| unvisited[i])
			.fold(None, |best: Option<usize>, i| match best {
				Some(b) if distances[b] <= distances[i] => Some(b),
				_ => Some(i),
			});
		let Some(u) = current else { break false };
		if distances[u].is_infinite() {
			break false;
		}

		unvisited[u] = false;
		steps.push(StepEvent::Settle {
			node: graph.nodes[u].id.clone(),
		});
		if u == t {
			break true;
		}

		for &(v, weight) in &adjacency[u] {
			if !unvisited[v] {
				continue;
			}
			let candidate = distances[u] + weight;
			if candidate < distances[v] {
				distances[v] = candidate;
				previous[v] = Some(u);
				steps.push(StepEvent::Relax {
					node: graph.nodes[v].id.clone(),
					distance: candidate,
				});
			}
		}
	};

	let result = if reached {
		let mut path = vec![graph.nodes[t].id.clone()];
		let mut current = t;
		while let Some(p) = previous[current] {
			path.push(graph.nodes[p].id.clone());
			current = p;
		}
		path.reverse();
		ShortestPath {
			path: Some(path),
			cost: distances[t],
		}
	} else {
		ShortestPath {
			path: None,
			cost: f64::INFINITY,
		}
	};

	Ok(Run {
		steps,
		outcome: Outcome::ShortestPath(result),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;
	use crate::graph::{GraphKind, GraphStore};

	fn build(kind: GraphKind, nodes: &[&str], edges: &[(&str, &str, f64)]) -> GraphSnapshot {
		let mut store = GraphStore::new(kind);
		for id in nodes {
			store.add_node(id, None).unwrap();
		}
		for &(a, b, w) in edges {
			store.add_edge(a, b, Some(w)).unwrap();
		}
		store.snapshot()
	}

	fn shortest(run: &Run) -> &ShortestPath {
		match &run.outcome {
			Outcome::ShortestPath(sp) => sp,
			other => panic!("unexpected outcome {:?}", other),
		}
	}

	#[test]
	fn test_directed_example() {
		let graph = build(
			GraphKind::MAX_FLOW,
			&["A", "B", "C"],
			&[("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 5.0)],
		);
		let run = dijkstra(&graph, "A", "C").unwrap();
		let sp = shortest(&run);
		assert_eq!(
			sp.path.as_deref(),
			Some(&["A".to_string(), "B".to_string(), "C".to_string()][..])
		);
		assert_eq!(sp.cost, 2.0);
	}

	#[test]
	fn test_step_sequence() {
		let graph = build(
			GraphKind::SHORTEST_PATH,
			&["A", "B", "C"],
			&[("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 5.0)],
		);
		let run = dijkstra(&graph, "A", "C").unwrap();
		assert_eq!(
			run.steps,
			vec![
				StepEvent::Settle { node: "A".into() },
				StepEvent::Relax {
					node: "B".into(),
					distance: 1.0
				},
				StepEvent::Relax {
					node: "C".into(),
					distance: 5.0
				},
				StepEvent::Settle { node: "B".into() },
				StepEvent::Relax {
					node: "C".into(),
					distance: 2.0
				},
				StepEvent::Settle { node: "C".into() },
			]
		);
	}

	#[test]
	fn test_direction_restricts_relaxation() {
		let edges = [("B", "A", 1.0)];
		let undirected = build(GraphKind::SHORTEST_PATH, &["A", "B"], &edges);
		assert_eq!(shortest(&dijkstra(&undirected, "A", "B").unwrap()).cost, 1.0);

		let directed = build(GraphKind::MAX_FLOW, &["A", "B"], &edges);
		let run = dijkstra(&directed, "A", "B").unwrap();
		assert_eq!(shortest(&run).path, None);
		assert!(shortest(&run).cost.is_infinite());
	}

	#[test]
	fn test_unreachable_target() {
		let graph = build(GraphKind::SHORTEST_PATH, &["A", "B", "C"], &[("A", "B", 2.0)]);
		let run = dijkstra(&graph, "A", "C").unwrap();
		assert_eq!(
			*shortest(&run),
			ShortestPath {
				path: None,
				cost: f64::INFINITY
			}
		);
		// only the reachable part gets settled
		let settled = run
			.steps
			.iter()
			.filter(|s| matches!(s, StepEvent::Settle { .. }))
			.count();
		assert_eq!(settled, 2);
	}

	#[test]
	fn test_start_equals_end() {
		let graph = build(GraphKind::SHORTEST_PATH, &["A", "B"], &[("A", "B", 2.0)]);
		let run = dijkstra(&graph, "B", "B").unwrap();
		assert_eq!(shortest(&run).path, Some(vec!["B".to_string()]));
		assert_eq!(shortest(&run).cost, 0.0);
	}

	#[test]
	fn test_unknown_end_emits_nothing() {
		let graph = build(GraphKind::SHORTEST_PATH, &["A"], &[]);
		assert_eq!(dijkstra(&graph, "A", "X").unwrap_err(), Error::UnknownNode("X".into()));
	}
}
