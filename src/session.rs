//! One editing/playback session: a graph store, a step player and the
//! settings that drive them.

use log::{info, warn};

use crate::algo::{Algorithm, Outcome};
use crate::config::VisualizerConfig;
use crate::error::{Error, Result};
use crate::graph::codec::{self, AdjacencyTable, Document};
use crate::graph::GraphStore;
use crate::player::{
	HighlightObserver, LogObserver, LogSink, PlaybackHandle, PlayerState, RenderSurface,
	StepObserver, StepPlayer,
};

/// Export format for [`Session::export`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
	/// Square weight matrix; ids are not kept.
	Matrix,
	/// Node/edge list.
	List,
}

/// Graph, player and config for one visualizer instance.
pub struct Session {
	config: VisualizerConfig,
	store: GraphStore,
	player: StepPlayer,
	last_outcome: Option<Outcome>,
}

impl Session {
	pub fn new(config: VisualizerConfig) -> Self {
		let store = GraphStore::new(config.kind).with_label_prefix(config.node_label_prefix.clone());
		Self {
			config,
			store,
			player: StepPlayer::new(),
			last_outcome: None,
		}
	}

	pub fn config(&self) -> &VisualizerConfig {
		&self.config
	}

	pub fn store(&self) -> &GraphStore {
		&self.store
	}

	/// Mutable access for editing. Callers re-render afterwards.
	pub fn store_mut(&mut self) -> &mut GraphStore {
		&mut self.store
	}

	pub fn player_state(&self) -> PlayerState {
		self.player.state()
	}

	/// Outcome of the most recently started run.
	pub fn last_outcome(&self) -> Option<&Outcome> {
		self.last_outcome.as_ref()
	}

	pub fn adjacency_table(&self) -> AdjacencyTable {
		codec::adjacency_table(&self.store.snapshot())
	}

	/// Pushes the whole graph to the surface.
	pub fn render(&self, surface: &mut dyn RenderSurface) {
		surface.render(
			self.store.nodes(),
			self.store.edges(),
			self.store.kind().directed,
		);
	}

	/// Computes `algorithm` on the current graph and starts playing it.
	///
	/// Fails without side effects if a run is already playing or an endpoint
	/// is unknown. On success the previous run's annotations are cleared.
	pub fn run(
		&mut self,
		algorithm: Algorithm,
		start: Option<&str>,
		end: Option<&str>,
		delay_ms: Option<u32>,
		surface: &mut dyn RenderSurface,
	) -> Result<PlaybackHandle> {
		if self.player.is_running() {
			return Err(Error::AlreadyRunning);
		}
		let run = algorithm.run(&self.store.snapshot(), start, end)?;
		info!(
			"{}: {} steps, {}",
			algorithm.name(),
			run.steps.len(),
			run.outcome
		);

		self.store.reset_annotations();
		self.render(surface);
		let handle = self
			.player
			.play(run.playback_steps(), delay_ms.unwrap_or(self.config.delay_ms))?;
		self.last_outcome = Some(run.outcome);
		Ok(handle)
	}

	/// Stops the current playback, keeping what was already painted.
	pub fn stop(&mut self) {
		self.player.cancel();
	}

	/// Drives playback. Returns the number of steps dispatched.
	pub fn tick(&mut self, now_ms: f64, surface: &mut dyn RenderSurface, sink: &mut dyn LogSink) -> usize {
		let mut highlighter = HighlightObserver {
			store: &mut self.store,
			surface,
			palette: &self.config.palette,
		};
		let mut logger = LogObserver { sink };
		let mut observers: [&mut dyn StepObserver; 2] = [&mut highlighter, &mut logger];
		self.player.tick(now_ms, &mut observers)
	}

	/// Replaces the graph with a decoded document. Nothing changes on error.
	pub fn load(&mut self, text: &str, surface: &mut dyn RenderSurface) -> Result<()> {
		let loaded = codec::decode_document(text, self.store.kind(), self.store.label_prefix())
			.inspect_err(|e| warn!("rejected graph document: {}", e))?;
		self.player.cancel();
		self.store.replace_with(loaded);
		self.last_outcome = None;
		info!(
			"loaded graph with {} nodes and {} edges",
			self.store.len(),
			self.store.edges().len()
		);
		self.render(surface);
		Ok(())
	}

	/// Serializes the current graph.
	pub fn export(&self, format: ExportFormat) -> Result<String> {
		let snapshot = self.store.snapshot();
		let document = match format {
			ExportFormat::Matrix => Document::Matrix(codec::encode_matrix(&snapshot)),
			ExportFormat::List => Document::List(codec::encode_list(&snapshot)),
		};
		codec::to_json(&document)
	}
}
