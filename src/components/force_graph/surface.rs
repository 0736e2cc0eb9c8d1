use leptos::prelude::*;

use super::types::GraphData;
use crate::config::Palette;
use crate::graph::{Edge, Node};
use crate::player::{ElementId, RenderSurface};

/// Render surface backed by the signal the canvas component draws from.
pub struct CanvasSurface {
	data: RwSignal<GraphData>,
	palette: Palette,
}

impl CanvasSurface {
	pub fn new(data: RwSignal<GraphData>, palette: Palette) -> Self {
		Self { data, palette }
	}
}

impl RenderSurface for CanvasSurface {
	fn highlight(&mut self, element: &ElementId, color: &str) {
		self.data.update(|data| match element {
			ElementId::Node(id) => {
				if let Some(node) = data.nodes.iter_mut().find(|n| &n.id == id) {
					node.color = Some(color.to_owned());
				}
			}
			ElementId::Edge { from, to } => {
				if let Some(link) = data
					.links
					.iter_mut()
					.find(|l| &l.source == from && &l.target == to)
				{
					link.color = Some(color.to_owned());
				}
			}
		});
	}

	fn render(&mut self, nodes: &[Node], edges: &[Edge], directed: bool) {
		self.data
			.set(GraphData::from_graph(nodes, edges, directed, &self.palette));
	}
}
