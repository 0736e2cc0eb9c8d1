//! Graph data model: nodes, edges, the mutable store and its persisted forms.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub mod codec;
mod store;

pub use store::GraphStore;

/// Node identifier. Assigned by the user and never regenerated.
pub type NodeId = String;

/// Graph-level edge semantics, shared by every edge in a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphKind {
	/// Edges have a direction; `a -> b` and `b -> a` are distinct.
	pub directed: bool,
	/// Edges carry user-supplied weights. Unweighted graphs store weight 1.
	pub weighted: bool,
}

impl GraphKind {
	/// Directed, unweighted graph used for DFS/BFS exploration.
	pub const TRAVERSAL: Self = Self {
		directed: true,
		weighted: false,
	};
	/// Directed capacity network.
	pub const MAX_FLOW: Self = Self {
		directed: true,
		weighted: true,
	};
	/// Undirected weighted graph for minimum spanning trees.
	pub const SPANNING_TREE: Self = Self {
		directed: false,
		weighted: true,
	};
	/// Undirected weighted graph for shortest paths.
	pub const SHORTEST_PATH: Self = Self {
		directed: false,
		weighted: true,
	};

	/// Looks up one of the named presets.
	pub fn preset(name: &str) -> Option<Self> {
		match name {
			"traversal" => Some(Self::TRAVERSAL),
			"max_flow" => Some(Self::MAX_FLOW),
			"spanning_tree" => Some(Self::SPANNING_TREE),
			"shortest_path" => Some(Self::SHORTEST_PATH),
			_ => None,
		}
	}
}

impl Default for GraphKind {
	fn default() -> Self {
		Self::SHORTEST_PATH
	}
}

/// Abstract highlight colors. The palette in the config maps them to CSS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
	/// Node visited by a traversal.
	Visited,
	/// Node whose tentative distance just improved.
	Frontier,
	/// Node settled by Dijkstra.
	Settled,
	/// Start or flow source.
	Source,
	/// Target or flow sink.
	Sink,
	/// Edge carrying augmented flow.
	Flow,
	/// Edge accepted into the spanning tree.
	Tree,
	/// Edge rejected because it closes a cycle.
	Rejected,
	/// Edge on the reported shortest path.
	Path,
}

/// A graph vertex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Unique key.
	pub id: NodeId,
	/// Display string.
	pub label: String,
	/// Layout position, opaque to the core.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub position: Option<(f64, f64)>,
	/// Transient highlight written during playback.
	#[serde(skip)]
	pub display_color: Option<ColorToken>,
}

/// A graph edge. Direction is a property of the owning graph, see [`GraphKind`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	/// Source endpoint.
	pub from: NodeId,
	/// Target endpoint.
	pub to: NodeId,
	/// Non-negative weight (capacity for max flow).
	pub weight: f64,
	/// Flow pushed through this edge by the current max-flow playback.
	#[serde(skip)]
	pub flow: Option<f64>,
	/// Transient highlight written during playback.
	#[serde(skip)]
	pub display_color: Option<ColorToken>,
}

impl Edge {
	/// Whether this edge joins `a` and `b`, honoring direction when `directed`.
	pub fn connects(&self, a: &str, b: &str, directed: bool) -> bool {
		(self.from == a && self.to == b) || (!directed && self.from == b && self.to == a)
	}

	/// Label shown next to the edge: the weight, or `flow/capacity` while a flow is annotated.
	pub fn display_label(&self) -> String {
		match self.flow {
			Some(flow) => format!("{}/{}", flow, self.weight),
			None => format!("{}", self.weight),
		}
	}
}

/// Immutable copy of a store, handed to the algorithm engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphSnapshot {
	/// Edge semantics.
	pub kind: GraphKind,
	/// Nodes in insertion order.
	pub nodes: Vec<Node>,
	/// Edges in insertion order.
	pub edges: Vec<Edge>,
}

impl GraphSnapshot {
	/// Position of each node id in `nodes`.
	pub fn index(&self) -> HashMap<&str, usize> {
		self.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect()
	}

	/// Whether a node with this id exists.
	pub fn contains(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}
}
