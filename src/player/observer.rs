use std::fmt;

use log::info;

use crate::algo::{HighlightTarget, StepEvent};
use crate::config::Palette;
use crate::graph::{ColorToken, Edge, GraphStore, Node};

/// Receives every step the player dispatches.
pub trait StepObserver {
	fn observe(&mut self, step: &StepEvent);
}

/// Element addressed by a highlight call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
	Node(String),
	Edge { from: String, to: String },
}

impl fmt::Display for ElementId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ElementId::Node(id) => f.write_str(id),
			ElementId::Edge { from, to } => write!(f, "{}->{}", from, to),
		}
	}
}

/// Rendering collaborator. The core never reads layout state back.
pub trait RenderSurface {
	/// Paints one element with a CSS color.
	fn highlight(&mut self, element: &ElementId, color: &str);
	/// Replaces everything drawn with the given nodes and edges.
	fn render(&mut self, nodes: &[Node], edges: &[Edge], directed: bool);
}

/// Append-only text log collaborator.
pub trait LogSink {
	fn write(&mut self, message: &str);
}

/// Forwards log lines to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleLogSink;

impl LogSink for ConsoleLogSink {
	fn write(&mut self, message: &str) {
		info!("{}", message);
	}
}

/// Keeps log lines in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryLogSink {
	pub lines: Vec<String>,
}

impl LogSink for MemoryLogSink {
	fn write(&mut self, message: &str) {
		self.lines.push(message.to_owned());
	}
}

/// Writes step colors (and max-flow annotations) into the store and paints
/// them on the surface.
pub struct HighlightObserver<'a> {
	pub store: &'a mut GraphStore,
	pub surface: &'a mut dyn RenderSurface,
	pub palette: &'a Palette,
}

impl HighlightObserver<'_> {
	fn paint(&mut self, element: ElementId, token: ColorToken) {
		self.surface.highlight(&element, self.palette.color(token));
	}
}

impl StepObserver for HighlightObserver<'_> {
	fn observe(&mut self, step: &StepEvent) {
		if let StepEvent::Augment { from, to, delta } = step {
			// the path may run against an edge; colour the edge that actually exists
			if let Some((from, to)) = self.store.add_flow(from, to, *delta) {
				self.store.set_edge_color(&from, &to, ColorToken::Flow);
				let (nodes, edges, directed) = (
					self.store.nodes().to_vec(),
					self.store.edges().to_vec(),
					self.store.kind().directed,
				);
				self.surface.render(&nodes, &edges, directed);
				self.paint(ElementId::Edge { from, to }, ColorToken::Flow);
			}
			return;
		}

		let Some((target, token)) = step.highlight() else {
			return;
		};
		match target {
			HighlightTarget::Node(id) => {
				if self.store.set_node_color(id, token) {
					self.paint(ElementId::Node(id.into()), token);
				}
			}
			HighlightTarget::Edge(from, to) => {
				// undirected lookups match either orientation; paint the stored one
				let stored = self
					.store
					.edge(from, to)
					.map(|e| (e.from.clone(), e.to.clone()));
				if let Some((from, to)) = stored {
					self.store.set_edge_color(&from, &to, token);
					self.paint(ElementId::Edge { from, to }, token);
				}
			}
		}
	}
}

/// Writes each step's description to a log sink.
pub struct LogObserver<'a> {
	pub sink: &'a mut dyn LogSink,
}

impl StepObserver for LogObserver<'_> {
	fn observe(&mut self, step: &StepEvent) {
		self.sink.write(&step.to_string());
	}
}
