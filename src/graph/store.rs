use log::debug;

use super::{ColorToken, Edge, GraphKind, GraphSnapshot, Node};
use crate::error::{Error, Result};

pub const DEFAULT_LABEL_PREFIX: &str = "Node ";

/// Owns the nodes and edges of one session.
///
/// Every mutation either succeeds completely or leaves the store untouched.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	kind: GraphKind,
	label_prefix: String,
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

impl GraphStore {
	pub fn new(kind: GraphKind) -> Self {
		Self {
			kind,
			label_prefix: DEFAULT_LABEL_PREFIX.into(),
			nodes: Vec::new(),
			edges: Vec::new(),
		}
	}

	/// Prefix used to derive labels for nodes added without one.
	pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.label_prefix = prefix.into();
		self
	}

	pub fn kind(&self) -> GraphKind {
		self.kind
	}

	pub fn label_prefix(&self) -> &str {
		&self.label_prefix
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// The edge joining `from` and `to`; either orientation matches on undirected graphs.
	pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
		self.edges
			.iter()
			.find(|e| e.connects(from, to, self.kind.directed))
	}

	/// Number of edges incident to `id`, self-loops counted twice.
	pub fn degree(&self, id: &str) -> usize {
		self.edges
			.iter()
			.map(|e| (e.from == id) as usize + (e.to == id) as usize)
			.sum()
	}

	pub fn add_node(&mut self, id: &str, label: Option<&str>) -> Result<&Node> {
		if id.is_empty() {
			return Err(Error::UnknownNode(String::new()));
		}
		if self.node(id).is_some() {
			return Err(Error::DuplicateId(id.into()));
		}
		let label = label
			.map(str::to_owned)
			.unwrap_or_else(|| format!("{}{}", self.label_prefix, id));
		self.nodes.push(Node {
			id: id.into(),
			label,
			position: None,
			display_color: None,
		});
		debug!("added node {}", id);
		Ok(&self.nodes[self.nodes.len() - 1])
	}

	pub fn add_edge(&mut self, from: &str, to: &str, weight: Option<f64>) -> Result<&Edge> {
		for endpoint in [from, to] {
			if self.node(endpoint).is_none() {
				return Err(Error::UnknownEndpoint(endpoint.into()));
			}
		}
		let weight = match (self.kind.weighted, weight) {
			(true, Some(w)) if !w.is_finite() || w < 0.0 => return Err(Error::InvalidWeight(w)),
			(true, Some(w)) => w,
			_ => 1.0,
		};
		if self.edge(from, to).is_some() {
			return Err(Error::DuplicateEdge {
				from: from.into(),
				to: to.into(),
			});
		}
		self.edges.push(Edge {
			from: from.into(),
			to: to.into(),
			weight,
			flow: None,
			display_color: None,
		});
		debug!("added edge {} -> {} ({})", from, to, weight);
		Ok(&self.edges[self.edges.len() - 1])
	}

	/// Removes the node and every edge touching it. Returns whether it existed.
	pub fn remove_node(&mut self, id: &str) -> bool {
		let before = self.nodes.len();
		self.nodes.retain(|n| n.id != id);
		if self.nodes.len() == before {
			return false;
		}
		self.edges.retain(|e| e.from != id && e.to != id);
		true
	}

	/// Removes the edge joining `from` and `to`. Returns whether it existed.
	pub fn remove_edge(&mut self, from: &str, to: &str) -> bool {
		let directed = self.kind.directed;
		let before = self.edges.len();
		self.edges.retain(|e| !e.connects(from, to, directed));
		self.edges.len() != before
	}

	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
	}

	/// Installs the contents of `other`, keeping this store's label prefix.
	pub fn replace_with(&mut self, other: GraphStore) {
		self.kind = other.kind;
		self.nodes = other.nodes;
		self.edges = other.edges;
	}

	pub fn snapshot(&self) -> GraphSnapshot {
		GraphSnapshot {
			kind: self.kind,
			nodes: self.nodes.clone(),
			edges: self.edges.clone(),
		}
	}

	/// Stores a layout position reported by the renderer.
	pub fn set_position(&mut self, id: &str, position: (f64, f64)) {
		if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
			node.position = Some(position);
		}
	}

	/// Drops every playback annotation (colors and flows).
	pub fn reset_annotations(&mut self) {
		for node in &mut self.nodes {
			node.display_color = None;
		}
		for edge in &mut self.edges {
			edge.display_color = None;
			edge.flow = None;
		}
	}

	pub fn set_node_color(&mut self, id: &str, color: ColorToken) -> bool {
		match self.nodes.iter_mut().find(|n| n.id == id) {
			Some(node) => {
				node.display_color = Some(color);
				true
			}
			None => false,
		}
	}

	pub fn set_edge_color(&mut self, from: &str, to: &str, color: ColorToken) -> bool {
		let directed = self.kind.directed;
		match self.edges.iter_mut().find(|e| e.connects(from, to, directed)) {
			Some(edge) => {
				edge.display_color = Some(color);
				true
			}
			None => false,
		}
	}

	/// Adds `delta` to the flow on `from -> to`.
	///
	/// When only the reverse edge exists the push cancels flow on it instead.
	/// Returns the edge's `(from, to)` that was updated.
	pub fn add_flow(&mut self, from: &str, to: &str, delta: f64) -> Option<(String, String)> {
		if let Some(edge) = self.edges.iter_mut().find(|e| e.from == from && e.to == to) {
			edge.flow = Some(edge.flow.unwrap_or(0.0) + delta);
			return Some((edge.from.clone(), edge.to.clone()));
		}
		let edge = self
			.edges
			.iter_mut()
			.find(|e| e.from == to && e.to == from)?;
		// Undirected edges carry flow both ways; a reverse push is still a forward use.
		let signed = if self.kind.directed { -delta } else { delta };
		edge.flow = Some(edge.flow.unwrap_or(0.0) + signed);
		Some((edge.from.clone(), edge.to.clone()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn abc(kind: GraphKind) -> GraphStore {
		let mut store = GraphStore::new(kind);
		for id in ["A", "B", "C"] {
			store.add_node(id, None).unwrap();
		}
		store
	}

	#[test]
	fn test_add_node_rejects_duplicates() {
		let mut store = abc(GraphKind::SHORTEST_PATH);
		assert_eq!(
			store.add_node("A", Some("again")).unwrap_err(),
			Error::DuplicateId("A".into())
		);
		assert_eq!(store.len(), 3);
		assert_eq!(store.node("A").unwrap().label, "Node A");
	}

	#[test]
	fn test_add_edge_rejects_unknown_endpoint() {
		let mut store = abc(GraphKind::SHORTEST_PATH);
		store.add_edge("A", "B", Some(2.0)).unwrap();
		let before = store.snapshot();

		assert_eq!(
			store.add_edge("A", "Z", None).unwrap_err(),
			Error::UnknownEndpoint("Z".into())
		);
		assert_eq!(
			store.add_edge("Y", "A", None).unwrap_err(),
			Error::UnknownEndpoint("Y".into())
		);
		assert_eq!(store.snapshot(), before);
	}

	#[test]
	fn test_duplicate_edge_depends_on_direction() {
		let mut undirected = abc(GraphKind::SHORTEST_PATH);
		undirected.add_edge("A", "B", Some(1.0)).unwrap();
		assert!(matches!(
			undirected.add_edge("B", "A", Some(3.0)),
			Err(Error::DuplicateEdge { .. })
		));

		let mut directed = abc(GraphKind::MAX_FLOW);
		directed.add_edge("A", "B", Some(1.0)).unwrap();
		directed.add_edge("B", "A", Some(3.0)).unwrap();
		assert!(matches!(
			directed.add_edge("A", "B", Some(3.0)),
			Err(Error::DuplicateEdge { .. })
		));
		assert_eq!(directed.edges().len(), 2);
	}

	#[test]
	fn test_weights() {
		let mut weighted = abc(GraphKind::SHORTEST_PATH);
		assert_eq!(weighted.add_edge("A", "B", None).unwrap().weight, 1.0);
		assert_eq!(
			weighted.add_edge("B", "C", Some(-2.0)).unwrap_err(),
			Error::InvalidWeight(-2.0)
		);
		assert_eq!(weighted.add_edge("B", "C", Some(2.5)).unwrap().weight, 2.5);

		let mut unweighted = abc(GraphKind::TRAVERSAL);
		assert_eq!(unweighted.add_edge("A", "B", Some(7.0)).unwrap().weight, 1.0);
	}

	#[test]
	fn test_remove_node_cascades() {
		let mut store = abc(GraphKind::SHORTEST_PATH);
		store.add_edge("A", "B", None).unwrap();
		store.add_edge("B", "C", None).unwrap();
		store.add_edge("A", "C", None).unwrap();
		assert_eq!(store.degree("B"), 2);

		assert!(store.remove_node("B"));
		assert!(!store.remove_node("B"));
		assert_eq!(store.edges().len(), 1);
		assert_eq!(store.degree("A"), 1);
	}

	#[test]
	fn test_remove_edge_matches_mirror_when_undirected() {
		let mut store = abc(GraphKind::SHORTEST_PATH);
		store.add_edge("A", "B", None).unwrap();
		assert!(store.remove_edge("B", "A"));
		assert!(store.edges().is_empty());

		let mut directed = abc(GraphKind::MAX_FLOW);
		directed.add_edge("A", "B", None).unwrap();
		assert!(!directed.remove_edge("B", "A"));
		assert!(directed.remove_edge("A", "B"));
	}

	#[test]
	fn test_flow_annotations() {
		let mut store = abc(GraphKind::MAX_FLOW);
		store.add_edge("A", "B", Some(4.0)).unwrap();
		store.add_flow("A", "B", 3.0);
		store.add_flow("B", "A", 1.0);
		assert_eq!(store.edge("A", "B").unwrap().flow, Some(2.0));
		assert_eq!(store.edge("A", "B").unwrap().display_label(), "2/4");
		assert!(store.add_flow("A", "C", 1.0).is_none());

		store.set_node_color("A", ColorToken::Source);
		store.reset_annotations();
		assert_eq!(store.edge("A", "B").unwrap().flow, None);
		assert_eq!(store.node("A").unwrap().display_color, None);
	}
}
