//! Depth- and breadth-first exploration of the component containing a start node.
//!
//! Both walk a node's incident edges in edge-insertion order and ignore edge
//! direction, so they cover exactly the connected component of `start`.

use std::collections::{HashMap, HashSet, VecDeque};

use super::{Outcome, Run, StepEvent, require_node};
use crate::error::Result;
use crate::graph::GraphSnapshot;

/// Neighbors of every node through incident edges, in edge order.
fn incident(graph: &GraphSnapshot) -> HashMap<&str, Vec<&str>> {
	let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::with_capacity(graph.nodes.len());
	for edge in &graph.edges {
		adjacency.entry(&edge.from).or_default().push(&edge.to);
		if edge.from != edge.to {
			adjacency.entry(&edge.to).or_default().push(&edge.from);
		}
	}
	adjacency
}

/// Iterative depth-first search producing recursive pre-order.
///
/// Nodes are marked when popped and neighbors are pushed in reverse, which
/// yields the same order as the recursive formulation without its depth limit.
pub fn dfs(graph: &GraphSnapshot, start: &str) -> Result<Run> {
	require_node(graph, start)?;

	let adjacency = incident(graph);
	let mut visited: HashSet<&str> = HashSet::new();
	let mut stack = vec![start];
	let mut order = Vec::new();

	while let Some(u) = stack.pop() {
		if !visited.insert(u) {
			continue;
		}
		order.push(u.to_owned());

		if let Some(neighbors) = adjacency.get(u) {
			stack.extend(neighbors.iter().rev().filter(|v| !visited.contains(*v)));
		}
	}

	Ok(traversal_run(order))
}

/// Breadth-first search; nodes are reported in enqueue order.
pub fn bfs(graph: &GraphSnapshot, start: &str) -> Result<Run> {
	require_node(graph, start)?;

	let adjacency = incident(graph);
	let mut visited: HashSet<&str> = HashSet::from([start]);
	let mut queue = VecDeque::from([start]);
	let mut order = vec![start.to_owned()];

	while let Some(u) = queue.pop_front() {
		for &v in adjacency.get(u).into_iter().flatten() {
			if visited.insert(v) {
				order.push(v.to_owned());
				queue.push_back(v);
			}
		}
	}

	Ok(traversal_run(order))
}

fn traversal_run(order: Vec<String>) -> Run {
	Run {
		steps: order
			.iter()
			.map(|id| StepEvent::Visit { node: id.clone() })
			.collect(),
		outcome: Outcome::Traversal { order },
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;
	use crate::graph::{Edge, GraphKind, GraphStore, Node};

	/// ```text
	/// 1 - 2 - 4     6 - 7
	///  \     /
	///   3 - 5
	/// ```
	fn sample() -> GraphSnapshot {
		let mut store = GraphStore::new(GraphKind::TRAVERSAL);
		for id in 1..=7 {
			store.add_node(&id.to_string(), None).unwrap();
		}
		for (a, b) in [(1, 2), (1, 3), (2, 4), (3, 5), (5, 4), (6, 7)] {
			store.add_edge(&a.to_string(), &b.to_string(), None).unwrap();
		}
		store.snapshot()
	}

	fn order(run: &Run) -> Vec<&str> {
		match &run.outcome {
			Outcome::Traversal { order } => order.iter().map(String::as_str).collect(),
			other => panic!("unexpected outcome {:?}", other),
		}
	}

	#[test]
	fn test_dfs_pre_order() {
		let run = dfs(&sample(), "1").unwrap();
		assert_eq!(order(&run), ["1", "2", "4", "5", "3"]);
		assert_eq!(run.steps.len(), 5);
		assert_eq!(run.steps[0], StepEvent::Visit { node: "1".into() });
	}

	#[test]
	fn test_dfs_follows_edges_against_direction() {
		// every edge out of 4 is entered at its head
		let run = dfs(&sample(), "4").unwrap();
		assert_eq!(order(&run), ["4", "2", "1", "3", "5"]);
	}

	#[test]
	fn test_bfs_level_order() {
		let run = bfs(&sample(), "1").unwrap();
		assert_eq!(order(&run), ["1", "2", "3", "4", "5"]);
	}

	#[test]
	fn test_single_component_only() {
		assert_eq!(order(&bfs(&sample(), "6").unwrap()), ["6", "7"]);
		assert_eq!(order(&dfs(&sample(), "7").unwrap()), ["7", "6"]);
	}

	#[test]
	fn test_unknown_start() {
		assert_eq!(dfs(&sample(), "9").unwrap_err(), Error::UnknownNode("9".into()));
		assert_eq!(bfs(&sample(), "").unwrap_err(), Error::UnknownNode("".into()));
	}

	#[test]
	fn test_deep_path_does_not_recurse() {
		let n = 200_000;
		let graph = GraphSnapshot {
			kind: GraphKind::TRAVERSAL,
			nodes: (0..n)
				.map(|i| Node {
					id: i.to_string(),
					label: i.to_string(),
					position: None,
					display_color: None,
				})
				.collect(),
			edges: (1..n)
				.map(|i| Edge {
					from: (i - 1).to_string(),
					to: i.to_string(),
					weight: 1.0,
					flow: None,
					display_color: None,
				})
				.collect(),
		};
		let run = dfs(&graph, "199990").unwrap();
		assert_eq!(run.steps.len(), n);
		assert_eq!(run.steps[n - 1], StepEvent::Visit { node: "199999".into() });
	}
}
