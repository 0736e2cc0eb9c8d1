//! Persisted graph documents.
//!
//! Two shapes are supported:
//! - **matrix**: a square JSON array of arrays, `M[i][j] > 0` meaning an edge `i -> j`
//!   with that weight. Node ids are regenerated as `"0".."n-1"` on decode.
//! - **list**: `{"nodes": [...], "edges": [...]}`, lossless for ids, labels and weights.
//!
//! Decoding builds a fresh [`GraphStore`], so a failed load never touches the
//! caller's graph.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{GraphKind, GraphSnapshot, GraphStore, NodeId};
use crate::error::{Error, Result};

/// Square weight matrix, `0` meaning no edge.
pub type AdjacencyMatrix = Vec<Vec<f64>>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
	pub id: NodeId,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub x: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub y: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
	pub from: NodeId,
	pub to: NodeId,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default)]
	pub weight: Option<f64>,
}

impl EdgeRecord {
	/// Explicit weight, else a numeric label, else 1.
	fn resolved_weight(&self) -> f64 {
		self.weight
			.or_else(|| self.label.as_deref().and_then(|l| l.trim().parse().ok()))
			.unwrap_or(1.0)
	}
}

/// Node/edge-list document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListDocument {
	pub nodes: Vec<NodeRecord>,
	pub edges: Vec<EdgeRecord>,
}

/// Either persisted shape, as detected by [`decode_document`].
#[derive(Clone, Debug, PartialEq)]
pub enum Document {
	Matrix(AdjacencyMatrix),
	List(ListDocument),
}

/// Node ids labelling the rows/columns of `matrix`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjacencyTable {
	pub ids: Vec<NodeId>,
	pub matrix: AdjacencyMatrix,
}

pub fn encode_matrix(graph: &GraphSnapshot) -> AdjacencyMatrix {
	adjacency_table(graph).matrix
}

/// Builds the matrix together with the ids of its rows, in node order.
pub fn adjacency_table(graph: &GraphSnapshot) -> AdjacencyTable {
	let n = graph.nodes.len();
	let index = graph.index();
	let mut matrix = vec![vec![0.0; n]; n];
	for edge in &graph.edges {
		if let (Some(&i), Some(&j)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str())) {
			matrix[i][j] = edge.weight;
			if !graph.kind.directed {
				matrix[j][i] = edge.weight;
			}
		}
	}
	AdjacencyTable {
		ids: graph.nodes.iter().map(|n| n.id.clone()).collect(),
		matrix,
	}
}

pub fn encode_list(graph: &GraphSnapshot) -> ListDocument {
	ListDocument {
		nodes: graph
			.nodes
			.iter()
			.map(|n| NodeRecord {
				id: n.id.clone(),
				label: Some(n.label.clone()),
				x: n.position.map(|p| p.0),
				y: n.position.map(|p| p.1),
			})
			.collect(),
		edges: graph
			.edges
			.iter()
			.map(|e| EdgeRecord {
				from: e.from.clone(),
				to: e.to.clone(),
				label: Some(format!("{}", e.weight)),
				weight: Some(e.weight),
			})
			.collect(),
	}
}

/// Parses a matrix value and builds a store of kind `kind`.
pub fn decode_matrix(value: &Value, kind: GraphKind, label_prefix: &str) -> Result<GraphStore> {
	let matrix: AdjacencyMatrix = serde_json::from_value(value.clone())?;
	matrix_to_store(&matrix, kind, label_prefix)
}

pub fn matrix_to_store(matrix: &[Vec<f64>], kind: GraphKind, label_prefix: &str) -> Result<GraphStore> {
	let n = matrix.len();
	if let Some((i, row)) = matrix.iter().enumerate().find(|(_, row)| row.len() != n) {
		return Err(Error::MalformedDocument(format!(
			"matrix is not square: row {} has {} entries, expected {}",
			i,
			row.len(),
			n
		)));
	}

	let mut store = GraphStore::new(kind).with_label_prefix(label_prefix);
	for i in 0..n {
		store.add_node(&i.to_string(), None)?;
	}
	for (i, row) in matrix.iter().enumerate() {
		for (j, &weight) in row.iter().enumerate() {
			if weight <= 0.0 {
				continue;
			}
			let (from, to) = (i.to_string(), j.to_string());
			match store.add_edge(&from, &to, Some(weight)) {
				Ok(_) => {}
				// mirror entry of an undirected edge already added
				Err(Error::DuplicateEdge { .. }) if !kind.directed => {}
				Err(err) => return Err(Error::MalformedDocument(err.to_string())),
			}
		}
	}
	Ok(store)
}

pub fn decode_list(value: &Value, kind: GraphKind, label_prefix: &str) -> Result<GraphStore> {
	let doc: ListDocument = serde_json::from_value(value.clone())?;
	list_to_store(&doc, kind, label_prefix)
}

pub fn list_to_store(doc: &ListDocument, kind: GraphKind, label_prefix: &str) -> Result<GraphStore> {
	let mut store = GraphStore::new(kind).with_label_prefix(label_prefix);
	for record in &doc.nodes {
		store
			.add_node(&record.id, record.label.as_deref())
			.map_err(|e| Error::MalformedDocument(e.to_string()))?;
		if let (Some(x), Some(y)) = (record.x, record.y) {
			store.set_position(&record.id, (x, y));
		}
	}
	for record in &doc.edges {
		store
			.add_edge(&record.from, &record.to, Some(record.resolved_weight()))
			.map_err(|e| Error::MalformedDocument(e.to_string()))?;
	}
	Ok(store)
}

/// Parses `text`, choosing the matrix form for arrays and the list form for objects.
pub fn decode_document(text: &str, kind: GraphKind, label_prefix: &str) -> Result<GraphStore> {
	let value: Value = serde_json::from_str(text)?;
	match value {
		Value::Array(_) => decode_matrix(&value, kind, label_prefix),
		Value::Object(_) => decode_list(&value, kind, label_prefix),
		other => Err(Error::MalformedDocument(format!(
			"expected a matrix or a node/edge list, found {}",
			other
		))),
	}
}

pub fn to_json(document: &Document) -> Result<String> {
	let text = match document {
		Document::Matrix(m) => serde_json::to_string(m)?,
		Document::List(l) => serde_json::to_string_pretty(l)?,
	};
	Ok(text)
}
