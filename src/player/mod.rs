/*!
Paced playback of precomputed algorithm steps.

The player never sleeps: the host calls [`StepPlayer::tick`] from its
animation or interval clock, and the player dispatches whatever steps are
due. That keeps playback cooperative on a single UI thread and makes the
timing fully testable with synthetic clocks.
*/

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::{debug, info};

use crate::algo::StepEvent;
use crate::error::{Error, Result};

mod observer;

pub use observer::{
	ConsoleLogSink, ElementId, HighlightObserver, LogObserver, LogSink, MemoryLogSink, RenderSurface,
	StepObserver,
};

#[cfg(test)]
pub(crate) use observer::testing;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
	Idle,
	Running,
	Cancelled,
}

/// Cancels the playback it was returned for.
///
/// Cancelling a finished or superseded playback has no effect.
#[derive(Clone, Debug)]
pub struct PlaybackHandle {
	cancelled: Rc<Cell<bool>>,
}

impl PlaybackHandle {
	pub fn cancel(&self) {
		self.cancelled.set(true);
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancelled.get()
	}
}

#[derive(Debug)]
pub struct StepPlayer {
	state: PlayerState,
	queue: VecDeque<StepEvent>,
	delay_ms: f64,
	next_due_ms: Option<f64>,
	token: Rc<Cell<bool>>,
}

impl Default for StepPlayer {
	fn default() -> Self {
		Self::new()
	}
}

impl StepPlayer {
	pub fn new() -> Self {
		Self {
			state: PlayerState::Idle,
			queue: VecDeque::new(),
			delay_ms: 0.0,
			next_due_ms: None,
			token: Rc::new(Cell::new(false)),
		}
	}

	/// Current state; a cancelled handle is reported before the next tick.
	pub fn state(&self) -> PlayerState {
		if self.state == PlayerState::Running && self.token.get() {
			PlayerState::Cancelled
		} else {
			self.state
		}
	}

	pub fn is_running(&self) -> bool {
		self.state() == PlayerState::Running
	}

	/// Steps not yet dispatched.
	pub fn pending(&self) -> usize {
		self.queue.len()
	}

	/// Starts playing `steps`, one every `delay_ms`, beginning on the next tick.
	pub fn play(&mut self, steps: Vec<StepEvent>, delay_ms: u32) -> Result<PlaybackHandle> {
		if self.is_running() {
			return Err(Error::AlreadyRunning);
		}
		self.token = Rc::new(Cell::new(false));
		self.queue = steps.into();
		self.delay_ms = delay_ms as f64;
		self.next_due_ms = None;
		self.state = if self.queue.is_empty() {
			PlayerState::Idle
		} else {
			PlayerState::Running
		};
		info!("playing {} steps every {} ms", self.queue.len(), delay_ms);
		Ok(PlaybackHandle {
			cancelled: self.token.clone(),
		})
	}

	/// Stops dispatching and drops the remaining steps.
	pub fn cancel(&mut self) {
		if self.state == PlayerState::Running {
			self.token.set(true);
		}
		self.settle_cancel();
	}

	/// Dispatches every step due at `now_ms` to `observers`, in order.
	///
	/// Returns the number of steps dispatched.
	pub fn tick(&mut self, now_ms: f64, observers: &mut [&mut dyn StepObserver]) -> usize {
		self.settle_cancel();
		if self.state != PlayerState::Running {
			return 0;
		}

		let mut dispatched = 0;
		loop {
			let due = self.next_due_ms.unwrap_or(now_ms);
			if due > now_ms {
				break;
			}
			let Some(step) = self.queue.pop_front() else {
				break;
			};
			for observer in observers.iter_mut() {
				observer.observe(&step);
			}
			dispatched += 1;
			self.next_due_ms = Some(due + self.delay_ms);

			// an observer may have cancelled through a handle
			if self.token.get() {
				break;
			}
			// zero delay still spreads steps across ticks
			if self.delay_ms <= 0.0 {
				break;
			}
		}

		self.settle_cancel();
		if self.state == PlayerState::Running && self.queue.is_empty() {
			debug!("playback finished");
			self.state = PlayerState::Idle;
			self.next_due_ms = None;
		}
		dispatched
	}

	fn settle_cancel(&mut self) {
		if self.state == PlayerState::Running && self.token.get() {
			debug!("playback cancelled with {} steps left", self.queue.len());
			self.state = PlayerState::Cancelled;
			self.queue.clear();
			self.next_due_ms = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Default)]
	struct Recorder {
		seen: Vec<StepEvent>,
	}

	impl StepObserver for Recorder {
		fn observe(&mut self, step: &StepEvent) {
			self.seen.push(step.clone());
		}
	}

	fn visits(ids: &[&str]) -> Vec<StepEvent> {
		ids.iter()
			.map(|id| StepEvent::Visit { node: (*id).into() })
			.collect()
	}

	#[test]
	fn test_paces_steps_by_delay() {
		let mut player = StepPlayer::new();
		let mut recorder = Recorder::default();
		player.play(visits(&["a", "b", "c"]), 100).unwrap();
		assert_eq!(player.state(), PlayerState::Running);

		assert_eq!(player.tick(1000.0, &mut [&mut recorder]), 1);
		assert_eq!(player.tick(1050.0, &mut [&mut recorder]), 0);
		assert_eq!(player.tick(1100.0, &mut [&mut recorder]), 1);
		assert_eq!(player.state(), PlayerState::Running);
		// a late tick catches up on everything due
		assert_eq!(player.tick(1400.0, &mut [&mut recorder]), 1);

		assert_eq!(recorder.seen, visits(&["a", "b", "c"]));
		assert_eq!(player.state(), PlayerState::Idle);
	}

	#[test]
	fn test_rejects_reentrant_play() {
		let mut player = StepPlayer::new();
		player.play(visits(&["a", "b"]), 10).unwrap();
		assert_eq!(
			player.play(visits(&["z"]), 10).unwrap_err(),
			Error::AlreadyRunning
		);
		assert_eq!(player.pending(), 2);
	}

	#[test]
	fn test_cancel_halts_and_allows_replay() {
		let mut player = StepPlayer::new();
		let mut recorder = Recorder::default();
		let handle = player.play(visits(&["a", "b", "c"]), 100).unwrap();

		player.tick(0.0, &mut [&mut recorder]);
		handle.cancel();
		assert_eq!(player.state(), PlayerState::Cancelled);
		assert_eq!(player.tick(500.0, &mut [&mut recorder]), 0);
		assert_eq!(recorder.seen.len(), 1);
		assert_eq!(player.pending(), 0);

		let handle = player.play(visits(&["d"]), 100).unwrap();
		assert!(!handle.is_cancelled());
		player.tick(600.0, &mut [&mut recorder]);
		assert_eq!(recorder.seen.last(), Some(&StepEvent::Visit { node: "d".into() }));
		assert_eq!(player.state(), PlayerState::Idle);
	}

	#[test]
	fn test_stale_handle_does_not_cancel_new_playback() {
		let mut player = StepPlayer::new();
		let old = player.play(visits(&["a"]), 0).unwrap();
		player.tick(0.0, &mut []);
		assert_eq!(player.state(), PlayerState::Idle);

		player.play(visits(&["b", "c"]), 50).unwrap();
		old.cancel();
		assert_eq!(player.state(), PlayerState::Running);
	}

	#[test]
	fn test_zero_delay_dispatches_one_step_per_tick() {
		let mut player = StepPlayer::new();
		let mut recorder = Recorder::default();
		player.play(visits(&["a", "b"]), 0).unwrap();
		assert_eq!(player.tick(0.0, &mut [&mut recorder]), 1);
		assert_eq!(player.tick(0.0, &mut [&mut recorder]), 1);
		assert_eq!(player.state(), PlayerState::Idle);
	}

	#[test]
	fn test_empty_sequence_stays_idle() {
		let mut player = StepPlayer::new();
		player.play(Vec::new(), 100).unwrap();
		assert_eq!(player.state(), PlayerState::Idle);
		player.cancel();
		assert_eq!(player.state(), PlayerState::Idle);
	}
}
