//! Minimum spanning tree (forest) via Kruskal's algorithm.
//!
//! Edge direction is ignored.

use super::{EdgeRef, Outcome, Run, SkipReason, StepEvent, UnionFind};
use crate::graph::GraphSnapshot;

/// Scans edges by ascending weight (stable, so ties keep insertion order),
/// including every edge that joins two components and skipping the rest.
pub fn kruskal(graph: &GraphSnapshot) -> Run {
	let mut sorted: Vec<EdgeRef> = graph
		.edges
		.iter()
		.map(|e| EdgeRef {
			from: e.from.clone(),
			to: e.to.clone(),
			weight: e.weight,
		})
		.collect();
	sorted.sort_by(|a, b| a.weight.total_cmp(&b.weight));

	let mut components: UnionFind<&str> = UnionFind::new();
	let mut steps = Vec::with_capacity(sorted.len());
	let mut accepted = Vec::new();

	for edge in &sorted {
		if components.union(&edge.from.as_str(), &edge.to.as_str()) {
			accepted.push(edge.clone());
			steps.push(StepEvent::Include { edge: edge.clone() });
		} else {
			steps.push(StepEvent::Skip {
				edge: edge.clone(),
				reason: SkipReason::Cycle,
			});
		}
	}

	let total_weight = accepted.iter().map(|e| e.weight).sum();
	Run {
		steps,
		outcome: Outcome::SpanningTree {
			edges: accepted,
			total_weight,
		},
	}
}
