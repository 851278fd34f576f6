use tokio_util::sync::CancellationToken;

/// Monotonic generation counter.
///
/// Owned by a single state machine; generations start at 1 so that 0 never
/// names a live generation.
#[derive(Debug, Default, Clone)]
pub struct GenerationClock {
	current: u64,
}

impl GenerationClock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Advances the clock and returns the new generation.
	pub fn next(&mut self) -> u64 {
		self.current = self.current.wrapping_add(1);
		self.current
	}

	/// Latest generation handed out, or 0 before the first call to [`Self::next`].
	pub const fn current(&self) -> u64 {
		self.current
	}
}

/// Generation-scoped cancellation token.
#[derive(Debug, Clone)]
pub struct GenerationToken {
	generation: u64,
	cancel: CancellationToken,
}

impl GenerationToken {
	pub fn new(generation: u64) -> Self {
		Self {
			generation,
			cancel: CancellationToken::new(),
		}
	}

	pub const fn generation(&self) -> u64 {
		self.generation
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Resolves once cancellation is requested.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}
}
