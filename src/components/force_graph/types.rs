use crate::config::Palette;
use crate::graph::{Edge, Node};

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub label: String,
	pub color: Option<String>,
}

/// Everything the canvas draws, in display terms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
	pub directed: bool,
}

impl GraphData {
	pub fn from_graph(nodes: &[Node], edges: &[Edge], directed: bool, palette: &Palette) -> Self {
		Self {
			nodes: nodes
				.iter()
				.map(|n| GraphNode {
					id: n.id.clone(),
					label: n.label.clone(),
					color: n.display_color.map(|c| palette.color(c).to_owned()),
				})
				.collect(),
			links: edges
				.iter()
				.map(|e| GraphLink {
					source: e.from.clone(),
					target: e.to.clone(),
					label: e.display_label(),
					color: e.display_color.map(|c| palette.color(c).to_owned()),
				})
				.collect(),
			directed,
		}
	}
}
