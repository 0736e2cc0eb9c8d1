//! Visualizer settings: graph kind, playback delay, colors and layout physics.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{ColorToken, GraphKind};

/// Playback delay used when none is configured.
pub const DEFAULT_DELAY_MS: u32 = 1000;

/// CSS colors for each [`ColorToken`], plus the base node/edge colors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
	pub node: String,
	pub edge: String,
	pub visited: String,
	pub frontier: String,
	pub settled: String,
	pub source: String,
	pub sink: String,
	pub flow: String,
	pub tree: String,
	pub rejected: String,
	pub path: String,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			node: "#007bff".into(),
			edge: "rgba(100, 180, 255, 0.6)".into(),
			visited: "#ff5733".into(),
			frontier: "#ffcc00".into(),
			settled: "#66ff66".into(),
			source: "red".into(),
			sink: "blue".into(),
			flow: "green".into(),
			tree: "#1f77b4".into(),
			rejected: "#7f7f7f".into(),
			path: "green".into(),
		}
	}
}

impl Palette {
	pub fn color(&self, token: ColorToken) -> &str {
		match token {
			ColorToken::Visited => &self.visited,
			ColorToken::Frontier => &self.frontier,
			ColorToken::Settled => &self.settled,
			ColorToken::Source => &self.source,
			ColorToken::Sink => &self.sink,
			ColorToken::Flow => &self.flow,
			ColorToken::Tree => &self.tree,
			ColorToken::Rejected => &self.rejected,
			ColorToken::Path => &self.path,
		}
	}
}

/// Force layout parameters handed to `force_graph`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

/// Either a preset name (`"max_flow"`) or explicit flags.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum KindSetting {
	Preset(String),
	Flags(GraphKind),
}

fn deserialize_kind<'de, D>(deserializer: D) -> std::result::Result<GraphKind, D::Error>
where
	D: serde::Deserializer<'de>,
{
	match KindSetting::deserialize(deserializer)? {
		KindSetting::Flags(kind) => Ok(kind),
		KindSetting::Preset(name) => GraphKind::preset(&name)
			.ok_or_else(|| serde::de::Error::custom(format!("unknown graph preset `{}`", name))),
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
	#[serde(deserialize_with = "deserialize_kind")]
	pub kind: GraphKind,
	pub delay_ms: u32,
	pub node_label_prefix: String,
	pub palette: Palette,
	pub simulation: SimulationConfig,
}

impl Default for VisualizerConfig {
	fn default() -> Self {
		Self {
			kind: GraphKind::default(),
			delay_ms: DEFAULT_DELAY_MS,
			node_label_prefix: "Node ".into(),
			palette: Palette::default(),
			simulation: SimulationConfig::default(),
		}
	}
}

impl VisualizerConfig {
	/// Parses and validates a JSON config; absent fields keep their defaults.
	pub fn from_json(text: &str) -> Result<Self> {
		let config: Self =
			serde_json::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<()> {
		let sim = &self.simulation;
		if sim.node_speed <= 0.0 {
			return Err(Error::InvalidConfig(format!(
				"node_speed must be positive, got {}",
				sim.node_speed
			)));
		}
		if !(sim.damping_factor > 0.0 && sim.damping_factor <= 1.0) {
			return Err(Error::InvalidConfig(format!(
				"damping_factor must be in (0, 1], got {}",
				sim.damping_factor
			)));
		}
		Ok(())
	}
}
