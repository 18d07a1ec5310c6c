//! Frame pacing and resize debouncing.

use super::host::Host;

/// Drives continuous redraw under the host's refresh signal.
///
/// The loop re-requests a frame after every rendered frame for as long as it
/// is running. `stop` clears the flag, so a frame already in flight renders
/// nothing and schedules nothing.
#[derive(Debug, Default)]
pub struct FrameScheduler {
	running: bool,
	pending: bool,
}

impl FrameScheduler {
	/// Whether the loop keeps requesting frames.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Whether a frame has been requested and not yet delivered.
	pub fn is_pending(&self) -> bool {
		self.pending
	}

	/// Starts the loop. Starting a running loop does nothing.
	pub fn start<H: Host>(&mut self, host: &H) {
		if self.running {
			return;
		}
		self.running = true;
		if !self.pending {
			self.pending = true;
			host.request_frame();
		}
	}

	/// Clears the running flag and cancels any outstanding frame request.
	pub fn stop<H: Host>(&mut self, host: &H) {
		self.running = false;
		if self.pending {
			self.pending = false;
			host.cancel_frame();
		}
	}

	/// Called when the host delivers a frame. Returns whether to render it.
	pub fn begin_frame(&mut self) -> bool {
		self.pending = false;
		self.running
	}

	/// Requests the next frame if still running.
	pub fn end_frame<H: Host>(&mut self, host: &H) {
		if self.running && !self.pending {
			self.pending = true;
			host.request_frame();
		}
	}
}

/// A scheduled one-shot timer that can be cancelled before it fires.
pub trait PendingTimer {
	/// Cancels the timer; it will not fire.
	fn cancel(self);
}

/// Single-slot debounce: at most one timer is pending at any time.
#[derive(Debug)]
pub struct Debouncer<T: PendingTimer> {
	delay_ms: u32,
	pending: Option<T>,
}

impl<T: PendingTimer> Debouncer<T> {
	/// An idle debouncer that settles `delay_ms` after the last arm.
	pub fn new(delay_ms: u32) -> Self {
		Self {
			delay_ms,
			pending: None,
		}
	}

	/// Quiet period in milliseconds.
	pub fn delay_ms(&self) -> u32 {
		self.delay_ms
	}

	/// Whether a timer is armed and has not settled.
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Cancels any pending timer, then stores the one `schedule` creates.
	pub fn arm(&mut self, schedule: impl FnOnce(u32) -> T) {
		if let Some(previous) = self.pending.take() {
			previous.cancel();
		}
		self.pending = Some(schedule(self.delay_ms));
	}

	/// Called when the pending timer fires. Returns false for stray
	/// callbacks arriving after the slot was cleared.
	pub fn settle(&mut self) -> bool {
		self.pending.take().is_some()
	}

	/// Cancels the pending timer, if any.
	pub fn cancel(&mut self) {
		if let Some(previous) = self.pending.take() {
			previous.cancel();
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::super::host::testing::FakeHost;
	use super::*;

	#[derive(Debug)]
	struct Tracked(u32, Rc<RefCell<Vec<u32>>>);

	impl PendingTimer for Tracked {
		fn cancel(self) {
			self.1.borrow_mut().push(self.0);
		}
	}

	#[test]
	fn arming_cancels_the_previous_timer() {
		let cancelled = Rc::new(RefCell::new(Vec::new()));
		let mut debounce = Debouncer::new(250);
		for id in 0..3 {
			debounce.arm(|delay| {
				assert_eq!(delay, 250);
				Tracked(id, cancelled.clone())
			});
		}
		assert_eq!(*cancelled.borrow(), vec![0, 1]);
		assert!(debounce.settle());
		assert!(!debounce.settle());
	}

	#[test]
	fn cancel_clears_the_slot() {
		let cancelled = Rc::new(RefCell::new(Vec::new()));
		let mut debounce = Debouncer::new(10);
		debounce.arm(|_| Tracked(7, cancelled.clone()));
		debounce.cancel();
		assert!(!debounce.is_pending());
		assert_eq!(*cancelled.borrow(), vec![7]);
	}

	#[test]
	fn scheduler_rerequests_only_while_running() {
		let host = FakeHost::new(100, 100);
		let mut frames = FrameScheduler::default();
		frames.start(&host);
		frames.start(&host);
		assert_eq!(host.frame_requests(), 1);

		assert!(frames.begin_frame());
		frames.end_frame(&host);
		assert_eq!(host.frame_requests(), 2);

		frames.stop(&host);
		assert_eq!(host.frame_cancels(), 1);
		assert!(!frames.begin_frame());
		frames.end_frame(&host);
		assert_eq!(host.frame_requests(), 2);
	}
}
