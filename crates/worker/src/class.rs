/// Execution classes used for task observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Timers that only sleep and then notify their owner.
	Timer,
	/// Outbound lookups against a remote service.
	Lookup,
}

impl TaskClass {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Timer => "timer",
			Self::Lookup => "lookup",
		}
	}
}
