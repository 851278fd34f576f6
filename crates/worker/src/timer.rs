use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

use crate::{GenerationToken, TaskClass, spawn};

/// Single-shot timer that invokes a callback once its delay elapses.
///
/// The callback receives the timer's generation so the owner can tell a
/// superseded firing apart from the current one. Cancelling, or dropping the
/// timer, guarantees the callback never runs if it has not started yet.
#[derive(Debug)]
pub struct DebounceTimer {
	token: GenerationToken,
	handle: JoinHandle<()>,
}

impl DebounceTimer {
	/// Starts a timer that fires `on_fire(generation)` after `delay`.
	pub fn start<F>(generation: u64, delay: Duration, on_fire: F) -> Self
	where
		F: FnOnce(u64) + Send + 'static,
	{
		let token = GenerationToken::new(generation);
		let task_token = token.clone();
		let deadline = tokio::time::Instant::now() + delay;
		let handle = spawn(TaskClass::Timer, async move {
			tokio::select! {
				biased;
				_ = task_token.cancelled() => {
					trace!(generation, "debounce.cancelled");
				}
				_ = tokio::time::sleep_until(deadline) => {
					if !task_token.is_cancelled() {
						trace!(generation, "debounce.fired");
						on_fire(generation);
					}
				}
			}
		});
		Self { token, handle }
	}

	pub fn generation(&self) -> u64 {
		self.token.generation()
	}

	pub fn is_cancelled(&self) -> bool {
		self.token.is_cancelled()
	}

	/// Returns true once the timer task has exited, fired or not.
	pub fn is_finished(&self) -> bool {
		self.handle.is_finished()
	}

	/// Cancels the timer.
	pub fn cancel(&self) {
		self.token.cancel();
	}
}

impl Drop for DebounceTimer {
	fn drop(&mut self) {
		self.token.cancel();
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicU64, Ordering};

	use super::*;

	fn recorder() -> (Arc<AtomicU64>, impl FnOnce(u64) + Send + 'static) {
		let fired = Arc::new(AtomicU64::new(0));
		let sink = Arc::clone(&fired);
		(fired, move |generation| sink.store(generation, Ordering::SeqCst))
	}

	#[tokio::test(start_paused = true)]
	async fn fires_after_delay_with_generation() {
		let (fired, on_fire) = recorder();
		let timer = DebounceTimer::start(5, Duration::from_millis(800), on_fire);

		tokio::time::sleep(Duration::from_millis(799)).await;
		assert_eq!(fired.load(Ordering::SeqCst), 0);

		tokio::time::sleep(Duration::from_millis(2)).await;
		tokio::task::yield_now().await;
		assert_eq!(fired.load(Ordering::SeqCst), 5);
		assert!(timer.is_finished());
	}

	#[tokio::test(start_paused = true)]
	async fn cancelled_timer_never_fires() {
		let (fired, on_fire) = recorder();
		let timer = DebounceTimer::start(1, Duration::from_millis(800), on_fire);
		timer.cancel();

		tokio::time::sleep(Duration::from_secs(5)).await;
		assert_eq!(fired.load(Ordering::SeqCst), 0);
		assert!(timer.is_cancelled());
	}

	#[tokio::test(start_paused = true)]
	async fn dropped_timer_never_fires() {
		let (fired, on_fire) = recorder();
		drop(DebounceTimer::start(1, Duration::from_millis(800), on_fire));

		tokio::time::sleep(Duration::from_secs(5)).await;
		assert_eq!(fired.load(Ordering::SeqCst), 0);
	}
}
