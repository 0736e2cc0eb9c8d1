//! Maximum flow via Edmonds-Karp (BFS-based Ford-Fulkerson).

use std::collections::VecDeque;

use super::{Outcome, Run, StepEvent, require_node};
use crate::error::Result;
use crate::graph::GraphSnapshot;

/// Maximum flow from `source` to `sink`, using edge weights as capacities.
///
/// Residuals live in a dense `n x n` table indexed by snapshot node order, so
/// neighbor scans (and therefore the augmenting paths found) are deterministic.
/// Undirected edges contribute capacity in both directions.
pub fn edmonds_karp(graph: &GraphSnapshot, source: &str, sink: &str) -> Result<Run> {
	require_node(graph, source)?;
	require_node(graph, sink)?;

	let n = graph.nodes.len();
	let index = graph.index();
	let (s, t) = (index[source], index[sink]);

	let mut residual = vec![vec![0.0_f64; n]; n];
	for edge in &graph.edges {
		let (u, v) = (index[edge.from.as_str()], index[edge.to.as_str()]);
		if u == v {
			continue;
		}
		residual[u][v] += edge.weight;
		if !graph.kind.directed {
			residual[v][u] += edge.weight;
		}
	}

	let mut steps = Vec::new();
	let mut total = 0.0;

	if s != t {
		while let Some(path) = augmenting_path(&residual, s, t) {
			let path_flow = path
				.windows(2)
				.map(|w| residual[w[0]][w[1]])
				.fold(f64::INFINITY, f64::min);

			for w in path.windows(2) {
				let (u, v) = (w[0], w[1]);
				residual[u][v] -= path_flow;
				residual[v][u] += path_flow;
				steps.push(StepEvent::Augment {
					from: graph.nodes[u].id.clone(),
					to: graph.nodes[v].id.clone(),
					delta: path_flow,
				});
			}
			total += path_flow;
		}
	}

	Ok(Run {
		steps,
		outcome: Outcome::MaxFlow {
			source: source.into(),
			sink: sink.into(),
			total,
		},
	})
}

/// Shortest (fewest edges) path with positive residual capacity, `s` to `t` inclusive.
fn augmenting_path(residual: &[Vec<f64>], s: usize, t: usize) -> Option<Vec<usize>> {
	let n = residual.len();
	let mut parent: Vec<Option<usize>> = vec![None; n];
	let mut seen = vec![false; n];
	let mut queue = VecDeque::from([s]);
	seen[s] = true;

	while let Some(u) = queue.pop_front() {
		if u == t {
			break;
		}
		for v in 0..n {
			if !seen[v] && residual[u][v] > 0.0 {
				seen[v] = true;
				parent[v] = Some(u);
				queue.push_back(v);
			}
		}
	}

	if !seen[t] {
		return None;
	}
	let mut path = vec![t];
	let mut v = t;
	while let Some(u) = parent[v] {
		path.push(u);
		v = u;
	}
	path.reverse();
	Some(path)
}
