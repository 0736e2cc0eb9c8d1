use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use web_sys::MouseEvent;

use super::force_graph::{CanvasSurface, GraphData};
use crate::algo::Algorithm;
use crate::error::{Error, Result};
use crate::graph::codec::AdjacencyTable;
use crate::graph::{GraphKind, GraphStore};
use crate::player::{ConsoleLogSink, LogSink, PlayerState};
use crate::session::{ExportFormat, Session};

/// Log sink feeding the log panel (and the browser console).
pub struct SignalLogSink {
	lines: RwSignal<Vec<String>>,
}

impl LogSink for SignalLogSink {
	fn write(&mut self, message: &str) {
		ConsoleLogSink.write(message);
		self.lines.update(|lines| lines.push(message.to_owned()));
	}
}

/// Handles shared by the control panel, the canvas and the playback clock.
#[derive(Clone)]
pub struct SessionContext {
	pub session: Rc<RefCell<Session>>,
	pub graph_data: RwSignal<GraphData>,
	pub log_lines: RwSignal<Vec<String>>,
	pub matrix: RwSignal<AdjacencyTable>,
	pub running: RwSignal<bool>,
}

impl SessionContext {
	pub fn new(session: Session) -> Self {
		let ctx = Self {
			session: Rc::new(RefCell::new(session)),
			graph_data: RwSignal::new(GraphData::default()),
			log_lines: RwSignal::new(Vec::new()),
			matrix: RwSignal::new(AdjacencyTable::default()),
			running: RwSignal::new(false),
		};
		ctx.refresh();
		ctx
	}

	fn surface(&self) -> CanvasSurface {
		let palette = self.session.borrow().config().palette.clone();
		CanvasSurface::new(self.graph_data, palette)
	}

	fn sink(&self) -> SignalLogSink {
		SignalLogSink {
			lines: self.log_lines,
		}
	}

	/// Redraws the graph and the adjacency matrix from the store.
	pub fn refresh(&self) {
		let mut surface = self.surface();
		let session = self.session.borrow();
		session.render(&mut surface);
		self.matrix.set(session.adjacency_table());
		self.running
			.set(session.player_state() == PlayerState::Running);
	}

	pub fn report(&self, err: impl Display) {
		warn!("{}", err);
		self.log_lines
			.update(|lines| lines.push(format!("Error: {}", err)));
	}

	/// Applies a store edit and redraws; errors go to the log panel.
	pub fn edit(&self, f: impl FnOnce(&mut GraphStore) -> Result<()>) {
		if self.running.get_untracked() {
			self.report("stop the running algorithm before editing the graph");
			return;
		}
		let result = f(self.session.borrow_mut().store_mut());
		match result {
			Ok(()) => self.refresh(),
			Err(err) => self.report(err),
		}
	}

	/// Advances playback; called from the page's interval clock.
	pub fn tick(&self, now_ms: f64) {
		let mut surface = self.surface();
		let mut sink = self.sink();
		let running = {
			let mut session = self.session.borrow_mut();
			session.tick(now_ms, &mut surface, &mut sink);
			session.player_state() == PlayerState::Running
		};
		if self.running.get_untracked() != running {
			self.running.set(running);
		}
	}

	/// Starts a fresh, empty session for another graph kind.
	pub fn reset(&self, kind: GraphKind) {
		if self.running.get_untracked() {
			self.report(Error::AlreadyRunning);
			return;
		}
		let mut config = self.session.borrow().config().clone();
		config.kind = kind;
		*self.session.borrow_mut() = Session::new(config);
		self.log_lines.set(Vec::new());
		self.refresh();
	}
}

fn non_empty(text: &str) -> Option<&str> {
	let text = text.trim();
	(!text.is_empty()).then_some(text)
}

fn matrix_view(table: AdjacencyTable) -> impl IntoView {
	let header = table.ids.clone();
	view! {
		<tr>
			<th></th>
			{header.into_iter().map(|id| view! { <th>{id}</th> }).collect_view()}
		</tr>
		{table
			.ids
			.into_iter()
			.zip(table.matrix)
			.map(|(id, row)| {
				view! {
					<tr>
						<th>{id}</th>
						{row.into_iter().map(|w| view! { <td>{w}</td> }).collect_view()}
					</tr>
				}
			})
			.collect_view()}
	}
}

/// Graph editing, algorithm controls, import/export, matrix and log views.
#[component]
pub fn ControlPanel(ctx: SessionContext) -> impl IntoView {
	let node_id = RwSignal::new(String::new());
	let edge_from = RwSignal::new(String::new());
	let edge_to = RwSignal::new(String::new());
	let edge_weight = RwSignal::new(String::new());
	let algorithm = RwSignal::new(Algorithm::Dfs.key().to_string());
	let start = RwSignal::new(String::new());
	let end = RwSignal::new(String::new());
	let delay = RwSignal::new(ctx.session.borrow().config().delay_ms.to_string());
	let document = RwSignal::new(String::new());
	let (matrix, log_lines, running) = (ctx.matrix, ctx.log_lines, ctx.running);

	let c = ctx.clone();
	let add_node = move |_: MouseEvent| {
		let id = node_id.get_untracked();
		c.edit(|store| store.add_node(id.trim(), None).map(|_| ()));
		node_id.set(String::new());
	};

	let c = ctx.clone();
	let remove_node = move |_: MouseEvent| {
		let id = node_id.get_untracked();
		c.edit(|store| {
			if !store.remove_node(id.trim()) {
				warn!("no node {} to remove", id);
			}
			Ok(())
		});
	};

	let c = ctx.clone();
	let add_edge = move |_: MouseEvent| {
		let weight = match non_empty(&edge_weight.get_untracked()).map(str::parse::<f64>) {
			None => None,
			Some(Ok(w)) => Some(w),
			Some(Err(_)) => {
				c.report(format!("invalid weight `{}`", edge_weight.get_untracked()));
				return;
			}
		};
		let (from, to) = (edge_from.get_untracked(), edge_to.get_untracked());
		c.edit(|store| store.add_edge(from.trim(), to.trim(), weight).map(|_| ()));
	};

	let c = ctx.clone();
	let remove_edge = move |_: MouseEvent| {
		let (from, to) = (edge_from.get_untracked(), edge_to.get_untracked());
		c.edit(|store| {
			if !store.remove_edge(from.trim(), to.trim()) {
				warn!("no edge {} -> {} to remove", from, to);
			}
			Ok(())
		});
	};

	let c = ctx.clone();
	let clear = move |_: MouseEvent| {
		c.edit(|store| {
			store.clear();
			Ok(())
		});
	};

	let c = ctx.clone();
	let run = move |_: MouseEvent| {
		let Some(algorithm) = Algorithm::from_key(&algorithm.get_untracked()) else {
			return;
		};
		let delay_ms = match non_empty(&delay.get_untracked()).map(str::parse::<u32>) {
			None => None,
			Some(Ok(ms)) => Some(ms),
			Some(Err(_)) => {
				c.report(format!("invalid delay `{}`", delay.get_untracked()));
				return;
			}
		};
		let (start, end) = (start.get_untracked(), end.get_untracked());
		let mut surface = c.surface();
		let result = c.session.borrow_mut().run(
			algorithm,
			non_empty(&start),
			non_empty(&end),
			delay_ms,
			&mut surface,
		);
		match result {
			Ok(_) => {
				c.log_lines
					.update(|lines| lines.push(format!("Running {}", algorithm.name())));
				c.running.set(true);
			}
			Err(err) => c.report(err),
		}
	};

	let c = ctx.clone();
	let stop = move |_: MouseEvent| {
		c.session.borrow_mut().stop();
		c.running.set(false);
	};

	let c = ctx.clone();
	let export_matrix = move |_: MouseEvent| match c.session.borrow().export(ExportFormat::Matrix) {
		Ok(text) => document.set(text),
		Err(err) => c.report(err),
	};

	let c = ctx.clone();
	let export_list = move |_: MouseEvent| match c.session.borrow().export(ExportFormat::List) {
		Ok(text) => document.set(text),
		Err(err) => c.report(err),
	};

	let c = ctx.clone();
	let load = move |_: MouseEvent| {
		let text = document.get_untracked();
		let mut surface = c.surface();
		let result = c.session.borrow_mut().load(&text, &mut surface);
		match result {
			Ok(()) => {
				c.refresh();
				c.log_lines
					.update(|lines| lines.push("Graph loaded from document".to_string()));
			}
			Err(err) => c.report(err),
		}
	};

	let clear_log = move |_: MouseEvent| log_lines.set(Vec::new());

	view! {
		<aside class="control-panel">
			<section>
				<h2>"Graph"</h2>
				<input
					placeholder="Node id"
					prop:value=move || node_id.get()
					on:input=move |ev| node_id.set(event_target_value(&ev))
				/>
				<button on:click=add_node>"Add node"</button>
				<button on:click=remove_node>"Remove node"</button>
				<div>
					<input
						placeholder="From"
						prop:value=move || edge_from.get()
						on:input=move |ev| edge_from.set(event_target_value(&ev))
					/>
					<input
						placeholder="To"
						prop:value=move || edge_to.get()
						on:input=move |ev| edge_to.set(event_target_value(&ev))
					/>
					<input
						placeholder="Weight (1)"
						prop:value=move || edge_weight.get()
						on:input=move |ev| edge_weight.set(event_target_value(&ev))
					/>
				</div>
				<button on:click=add_edge>"Add edge"</button>
				<button on:click=remove_edge>"Remove edge"</button>
				<button on:click=clear>"Clear graph"</button>
			</section>

			<section>
				<h2>"Algorithm"</h2>
				<select on:change=move |ev| algorithm.set(event_target_value(&ev))>
					{Algorithm::ALL
						.into_iter()
						.map(|a| view! { <option value=a.key()>{a.name()}</option> })
						.collect_view()}
				</select>
				<input
					placeholder="Start node (first)"
					prop:disabled=move || !Algorithm::from_key(&algorithm.get()).is_some_and(Algorithm::needs_start)
					prop:value=move || start.get()
					on:input=move |ev| start.set(event_target_value(&ev))
				/>
				<input
					placeholder="End node"
					prop:disabled=move || !Algorithm::from_key(&algorithm.get()).is_some_and(Algorithm::needs_end)
					prop:value=move || end.get()
					on:input=move |ev| end.set(event_target_value(&ev))
				/>
				<input
					placeholder="Delay (ms)"
					prop:value=move || delay.get()
					on:input=move |ev| delay.set(event_target_value(&ev))
				/>
				<button on:click=run prop:disabled=move || running.get()>"Run"</button>
				<button on:click=stop>"Stop"</button>
			</section>

			<section>
				<h2>"Import / export"</h2>
				<textarea
					rows="6"
					prop:value=move || document.get()
					on:input=move |ev| document.set(event_target_value(&ev))
				></textarea>
				<button on:click=export_matrix>"Export matrix"</button>
				<button on:click=export_list>"Export list"</button>
				<button on:click=load>"Load"</button>
			</section>

			<section>
				<h2>"Adjacency matrix"</h2>
				<table class="adjacency-matrix">{move || matrix_view(matrix.get())}</table>
			</section>

			<section>
				<h2>"Log"</h2>
				<ul class="log">
					{move || {
						log_lines
							.get()
							.into_iter()
							.map(|line| view! { <li>{line}</li> })
							.collect_view()
					}}
				</ul>
				<button on:click=clear_log>"Clear log"</button>
			</section>
		</aside>
	}
}
