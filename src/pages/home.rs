use std::time::Duration;

use leptos::prelude::*;

use crate::components::control_panel::{ControlPanel, SessionContext};
use crate::components::force_graph::ForceGraphCanvas;
use crate::config::VisualizerConfig;
use crate::graph::GraphKind;
use crate::session::Session;

/// Interval of the playback clock.
const TICK: Duration = Duration::from_millis(16);

/// Session pre-filled with a small weighted graph (random tree plus a few chords).
fn sample_session(config: VisualizerConfig) -> Session {
	let mut session = Session::new(config);
	let store = session.store_mut();
	let n = 8;
	for i in 0..n {
		let _ = store.add_node(&i.to_string(), None);
	}
	for i in 1..n {
		let parent = (rand_simple(i) * (i as f64)) as usize;
		let weight = 1.0 + (rand_simple(i * 7) * 9.0).floor();
		let _ = store.add_edge(&parent.to_string(), &i.to_string(), Some(weight));
	}
	for (i, (a, b)) in [(2, 5), (3, 7), (1, 6), (4, 6)].into_iter().enumerate() {
		let weight = 1.0 + (rand_simple(i + 40) * 9.0).floor();
		let _ = store.add_edge(&a.to_string(), &b.to_string(), Some(weight));
	}
	session
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = VisualizerConfig::default();
	let ctx = SessionContext::new(sample_session(config.clone()));

	let clock = ctx.clone();
	match set_interval_with_handle(move || clock.tick(js_sys::Date::now()), TICK) {
		Ok(handle) => on_cleanup(move || handle.clear()),
		Err(err) => log::error!("playback clock unavailable: {:?}", err),
	}

	let c = ctx.clone();
	let on_kind = move |ev: web_sys::Event| {
		if let Some(kind) = GraphKind::preset(&event_target_value(&ev)) {
			c.reset(kind);
		}
	};

	view! {
		<div class="visualizer">
			<header class="graph-overlay">
				<h1>"Graph Algorithm Visualizer"</h1>
				<p class="subtitle">
					"Build a graph, pick an algorithm and watch it run step by step. Scroll to zoom, drag to pan."
				</p>
				<label>
					"Graph type "
					<select on:change=on_kind>
						<option value="shortest_path">"Undirected, weighted (shortest path)"</option>
						<option value="spanning_tree">"Undirected, weighted (spanning tree)"</option>
						<option value="max_flow">"Directed, weighted (max flow)"</option>
						<option value="traversal">"Directed, unweighted (traversal)"</option>
					</select>
				</label>
			</header>
			<ControlPanel ctx=ctx.clone() />
			<div class="graph-area">
				<ForceGraphCanvas
					data=ctx.graph_data
					palette=config.palette.clone()
					simulation=config.simulation.clone()
				/>
			</div>
		</div>
	}
}
