//! Shared worker primitives for the resolver runtime.
//!
//! Provides classified task spawning, monotonic generation clocks, and the
//! single-shot [`DebounceTimer`] used to coalesce bursts of input.

mod class;
mod spawn;
mod timer;
mod token;

pub use class::TaskClass;
pub use spawn::spawn;
pub use timer::DebounceTimer;
pub use token::{GenerationClock, GenerationToken};
