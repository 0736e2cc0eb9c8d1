use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{GraphData, GraphLink};
use crate::config::SimulationConfig;

pub const NODE_RADIUS: f64 = 14.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: Option<String>,
}

/// Screen-space offset and zoom factor applied before drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub x: f64,
	pub y: f64,
	pub k: f64,
	drag: Option<DragAnchor>,
}

/// Pointer and viewport offset when a drag began.
#[derive(Clone, Copy, Debug, PartialEq)]
struct DragAnchor {
	pointer: (f64, f64),
	origin: (f64, f64),
}

impl Viewport {
	/// Origin at the center of a `width x height` canvas, unscaled.
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
			drag: None,
		}
	}

	pub fn begin_drag(&mut self, px: f64, py: f64) {
		self.drag = Some(DragAnchor {
			pointer: (px, py),
			origin: (self.x, self.y),
		});
	}

	/// Moves with the pointer while a drag is active.
	pub fn drag_to(&mut self, px: f64, py: f64) {
		if let Some(anchor) = self.drag {
			self.x = anchor.origin.0 + (px - anchor.pointer.0);
			self.y = anchor.origin.1 + (py - anchor.pointer.1);
		}
	}

	pub fn end_drag(&mut self) {
		self.drag = None;
	}

	/// Scales by `factor` (clamped to 0.1..=10) keeping the point under the pointer fixed.
	pub fn zoom_at(&mut self, px: f64, py: f64, factor: f64) {
		let k = (self.k * factor).clamp(0.1, 10.0);
		let ratio = k / self.k;
		self.x = px - (px - self.x) * ratio;
		self.y = py - (py - self.y) * ratio;
		self.k = k;
	}
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub viewport: Viewport,
	pub width: f64,
	pub height: f64,
	pub directed: bool,
	pub links: Vec<(DefaultNodeIdx, DefaultNodeIdx, GraphLink)>,
	simulation: SimulationConfig,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, simulation: SimulationConfig) -> Self {
		let mut state = Self {
			graph: new_graph(&simulation),
			viewport: Viewport::centered(width, height),
			width,
			height,
			directed: data.directed,
			links: Vec::new(),
			simulation,
		};
		state.sync(data);
		state
	}

	/// Rebuilds the layout graph from `data`, keeping positions of nodes that survive.
	pub fn sync(&mut self, data: &GraphData) {
		let mut previous: HashMap<String, (f32, f32)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			previous.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});

		let mut graph = new_graph(&self.simulation);
		let mut id_to_idx = HashMap::new();
		let count = data.nodes.len().max(1) as f64;
		for (i, node) in data.nodes.iter().enumerate() {
			let (x, y) = previous.get(&node.id).copied().unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / count;
				((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32)
			});
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: node.color.clone(),
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		self.links.clear();
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(link.source.as_str()), id_to_idx.get(link.target.as_str()))
			{
				// self-loops have no length for the spring force
				if src != tgt {
					graph.add_edge(src, tgt, EdgeData::default());
				}
				self.links.push((src, tgt, link.clone()));
			}
		}

		self.graph = graph;
		self.directed = data.directed;
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}

	/// New canvas size; the graph stays where it was on screen.
	pub fn resize(&mut self, width: f64, height: f64) {
		(self.width, self.height) = (width, height);
	}
}

fn new_graph(simulation: &SimulationConfig) -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: simulation.force_charge,
		force_spring: simulation.force_spring,
		force_max: simulation.force_max,
		node_speed: simulation.node_speed,
		damping_factor: simulation.damping_factor,
	})
}
